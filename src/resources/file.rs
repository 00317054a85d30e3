//
//  gitlab-node
//  resources/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Repository file operations: get, list, create, update and delete.
//!
//! File paths occupy a single path segment in the endpoint, so they are
//! percent-encoded including slashes. Deleting a file sends only the branch
//! and commit message in the body.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{encode_path, HttpMethod, ListOptions, RequestSpec};

/// A decoded file operation.
#[derive(Debug, Clone)]
pub enum FileOperation {
    /// Get one file's metadata and content.
    Get { path: String, ref_name: String },
    /// List the repository tree, optionally below a path.
    List {
        path: String,
        ref_name: String,
        options: ListOptions,
    },
    /// Create a file on a branch.
    Create {
        path: String,
        branch: String,
        commit_message: String,
        content: String,
    },
    /// Update a file on a branch.
    Update {
        path: String,
        branch: String,
        commit_message: String,
        content: String,
    },
    /// Delete a file from a branch.
    Delete {
        path: String,
        branch: String,
        commit_message: String,
    },
}

impl FileOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        match params.operation().as_str() {
            "get" => Ok(Self::Get {
                path: params.string("path"),
                ref_name: params.string_or("fileRef", "main"),
            }),
            "list" => Ok(Self::List {
                path: params.string("path"),
                ref_name: params.string_or("fileRef", "main"),
                options: ListOptions::from_params(params),
            }),
            "create" => Ok(Self::Create {
                path: params.string("path"),
                branch: params.string_or("fileBranch", "main"),
                commit_message: params.string("commitMessage"),
                content: params.string("fileContent"),
            }),
            "update" => Ok(Self::Update {
                path: params.string("path"),
                branch: params.string_or("fileBranch", "main"),
                commit_message: params.string("commitMessage"),
                content: params.string("fileContent"),
            }),
            "delete" => Ok(Self::Delete {
                path: params.string("path"),
                branch: params.string_or("fileBranch", "main"),
                commit_message: params.string("commitMessage"),
            }),
            other => Err(Error::unsupported("file", other, params.index())),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Get { path, ref_name } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/repository/files/{}", encode_path(&path)),
            )
            .query("ref", ref_name),
            Self::List {
                path,
                ref_name,
                options,
            } => {
                let mut spec =
                    RequestSpec::new(HttpMethod::Get, format!("{base}/repository/tree"))
                        .query("ref", ref_name)
                        .listing(options);
                if !path.is_empty() {
                    spec = spec.query("path", path);
                }
                spec
            }
            Self::Create {
                path,
                branch,
                commit_message,
                content,
            } => RequestSpec::new(
                HttpMethod::Post,
                format!("{base}/repository/files/{}", encode_path(&path)),
            )
            .body("branch", branch)
            .body("commit_message", commit_message)
            .body("content", content),
            Self::Update {
                path,
                branch,
                commit_message,
                content,
            } => RequestSpec::new(
                HttpMethod::Put,
                format!("{base}/repository/files/{}", encode_path(&path)),
            )
            .body("branch", branch)
            .body("commit_message", commit_message)
            .body("content", content),
            Self::Delete {
                path,
                branch,
                commit_message,
            } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/repository/files/{}", encode_path(&path)),
            )
            .body("branch", branch)
            .body("commit_message", commit_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(values: serde_json::Value) -> ItemParams {
        ItemParams::from_value(0, values)
    }

    #[test]
    fn test_get_encodes_path_and_sets_ref() {
        let spec = FileOperation::from_params(&params(json!({
            "operation": "get", "path": "src/main.rs", "fileRef": "develop",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/repository/files/src%2Fmain.rs");
        assert_eq!(spec.query.get("ref"), Some(&json!("develop")));
    }

    #[test]
    fn test_list_includes_path_only_when_set() {
        let spec = FileOperation::from_params(&params(json!({
            "operation": "list", "path": "src", "limit": 10,
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/repository/tree");
        assert_eq!(spec.query.get("path"), Some(&json!("src")));
        assert_eq!(spec.query.get("per_page"), Some(&json!(10)));

        let spec = FileOperation::from_params(&params(json!({ "operation": "list" })))
            .unwrap()
            .into_spec("/projects/1");
        assert!(spec.query.get("path").is_none());
        assert_eq!(spec.query.get("ref"), Some(&json!("main")));
    }

    #[test]
    fn test_create_and_update_commit_content() {
        let values = json!({
            "operation": "create",
            "path": "README.md",
            "fileBranch": "docs",
            "commitMessage": "add readme",
            "fileContent": "# Title",
        });
        let spec = FileOperation::from_params(&params(values.clone()))
            .unwrap()
            .into_spec("/projects/1");
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.body.get("branch"), Some(&json!("docs")));
        assert_eq!(spec.body.get("commit_message"), Some(&json!("add readme")));
        assert_eq!(spec.body.get("content"), Some(&json!("# Title")));

        let mut update = values;
        update["operation"] = json!("update");
        let spec = FileOperation::from_params(&params(update))
            .unwrap()
            .into_spec("/projects/1");
        assert_eq!(spec.method, HttpMethod::Put);
    }

    #[test]
    fn test_delete_body_is_branch_and_message_only() {
        let spec = FileOperation::from_params(&params(json!({
            "operation": "delete",
            "path": "old.txt",
            "fileBranch": "main",
            "commitMessage": "remove",
            "fileContent": "ignored",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.body.len(), 2);
        assert_eq!(spec.body.get("branch"), Some(&json!("main")));
        assert_eq!(spec.body.get("commit_message"), Some(&json!("remove")));
    }
}
