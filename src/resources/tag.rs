//
//  gitlab-node
//  resources/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tag operations: create, get, list and delete.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{encode_path, HttpMethod, ListOptions, RequestSpec};

/// A decoded tag operation.
#[derive(Debug, Clone)]
pub enum TagOperation {
    /// Create a tag on a ref, with an optional message.
    Create {
        tag_name: String,
        source_ref: String,
        message: String,
    },
    /// Get one tag.
    Get { tag_name: String },
    /// List tags.
    GetAll { options: ListOptions },
    /// Delete a tag.
    Delete { tag_name: String },
}

impl TagOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                tag_name: params.string("tagName"),
                source_ref: params.string_or("ref", "main"),
                message: params.string("message"),
            }),
            "get" => Ok(Self::Get {
                tag_name: params.string("tagName"),
            }),
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "delete" => Ok(Self::Delete {
                tag_name: params.string("tagName"),
            }),
            other => Err(Error::unsupported("tag", other, params.index())),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create {
                tag_name,
                source_ref,
                message,
            } => RequestSpec::new(HttpMethod::Post, format!("{base}/repository/tags"))
                .body("tag_name", tag_name)
                .body("ref", source_ref)
                .body_if_set("message", &message),
            Self::Get { tag_name } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/repository/tags/{}", encode_path(&tag_name)),
            ),
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/repository/tags"))
                    .listing(options)
            }
            Self::Delete { tag_name } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/repository/tags/{}", encode_path(&tag_name)),
            ),
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
    fn test_create_includes_message_only_when_set() {
        let spec = TagOperation::from_params(&params(json!({
            "operation": "create", "tagName": "v1.0", "ref": "main", "message": "first",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/repository/tags");
        assert_eq!(spec.body.get("message"), Some(&json!("first")));

        let spec = TagOperation::from_params(&params(json!({
            "operation": "create", "tagName": "v1.0",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert!(spec.body.get("message").is_none());
        assert_eq!(spec.body.get("ref"), Some(&json!("main")));
    }

    #[test]
    fn test_get_and_delete_encode_tag_name() {
        let spec = TagOperation::from_params(&params(json!({
            "operation": "get", "tagName": "release/1 0",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/repository/tags/release%2F1%200");

        let spec = TagOperation::from_params(&params(json!({
            "operation": "delete", "tagName": "v1.0",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.method, HttpMethod::Delete);
        assert_eq!(spec.endpoint, "/projects/1/repository/tags/v1.0");
    }

    #[test]
    fn test_unknown_operation_is_unsupported() {
        assert!(TagOperation::from_params(&params(json!({ "operation": "sign" }))).is_err());
    }
}
