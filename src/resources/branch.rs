//
//  gitlab-node
//  resources/branch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Branch operations: create, get, list, delete, rename, protect, unprotect
//! and merge.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{encode_path, HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_string;

/// A decoded branch operation.
///
/// Each variant carries exactly the fields its request needs, validated at
/// decode time.
#[derive(Debug, Clone)]
pub enum BranchOperation {
    /// Create a branch from an existing ref.
    Create { branch: String, source_ref: String },
    /// Get one branch.
    Get { branch: String },
    /// List branches.
    GetAll { options: ListOptions },
    /// Delete a branch.
    Delete { branch: String },
    /// Rename a branch.
    Rename { branch: String, new_branch: String },
    /// Protect a branch, optionally allowing developers to push or merge.
    Protect {
        branch: String,
        developers_can_push: bool,
        developers_can_merge: bool,
    },
    /// Remove protection from a branch.
    Unprotect { branch: String },
    /// Merge a source branch into a target branch.
    Merge {
        source_branch: String,
        target_branch: String,
    },
}

impl BranchOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                branch: params.string("branch"),
                source_ref: params.string_or("ref", "main"),
            }),
            "get" => Ok(Self::Get {
                branch: params.string("branch"),
            }),
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "delete" => Ok(Self::Delete {
                branch: params.string("branch"),
            }),
            "rename" => {
                let branch = params.string("branch");
                let new_branch = params.string("newBranch");
                require_string(&branch, "branch", index)?;
                require_string(&new_branch, "newBranch", index)?;
                Ok(Self::Rename { branch, new_branch })
            }
            "protect" => {
                let branch = params.string("branch");
                require_string(&branch, "branch", index)?;
                Ok(Self::Protect {
                    branch,
                    developers_can_push: params.boolean("developersCanPush"),
                    developers_can_merge: params.boolean("developersCanMerge"),
                })
            }
            "unprotect" => {
                let branch = params.string("branch");
                require_string(&branch, "branch", index)?;
                Ok(Self::Unprotect { branch })
            }
            "merge" => {
                let source_branch = params.string("branch");
                let target_branch = params.string("targetBranch");
                require_string(&source_branch, "branch", index)?;
                require_string(&target_branch, "targetBranch", index)?;
                Ok(Self::Merge {
                    source_branch,
                    target_branch,
                })
            }
            other => Err(Error::unsupported("branch", other, index)),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create { branch, source_ref } => {
                RequestSpec::new(HttpMethod::Post, format!("{base}/repository/branches"))
                    .body("branch", branch)
                    .body("ref", source_ref)
            }
            Self::Get { branch } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/repository/branches/{}", encode_path(&branch)),
            ),
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/repository/branches"))
                    .listing(options)
            }
            Self::Delete { branch } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/repository/branches/{}", encode_path(&branch)),
            ),
            Self::Rename { branch, new_branch } => RequestSpec::new(
                HttpMethod::Put,
                format!("{base}/repository/branches/{}", encode_path(&branch)),
            )
            .body("new_branch", new_branch),
            Self::Protect {
                branch,
                developers_can_push,
                developers_can_merge,
            } => {
                let mut spec =
                    RequestSpec::new(HttpMethod::Post, format!("{base}/protected_branches"))
                        .body("name", branch);
                if developers_can_push {
                    spec = spec.body("developers_can_push", true);
                }
                if developers_can_merge {
                    spec = spec.body("developers_can_merge", true);
                }
                spec
            }
            Self::Unprotect { branch } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/protected_branches/{}", encode_path(&branch)),
            ),
            Self::Merge {
                source_branch,
                target_branch,
            } => RequestSpec::new(HttpMethod::Post, format!("{base}/repository/merges"))
                .body("source_branch", source_branch)
                .body("target_branch", target_branch),
        }
    }
}
