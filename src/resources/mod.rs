//
//  gitlab-node
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Request Dispatch
//!
//! One module per GitLab resource family. Each module defines a closed
//! operation enum whose variants carry the decoded, validated fields for one
//! resource + operation pair:
//!
//! - `from_params` decodes a variant from the item's generic parameter bag,
//!   running every validation guard before any request exists;
//! - `into_spec` purely builds the [`RequestSpec`] for the variant.
//!
//! [`build_request`] is the dispatch table: it routes an item to the owning
//! resource module by its `resource` parameter. Unknown resource names and
//! unrecognized operation names fail with typed errors carrying the item
//! index.

pub mod branch;
pub mod file;
pub mod group;
pub mod issue;
pub mod merge_request;
pub mod pipeline;
pub mod project;
pub mod raw;
pub mod release;
pub mod tag;

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::RequestSpec;

/// Builds the request for one input item.
///
/// Decodes the item's resource and operation, applies the operation's
/// validation rules, and produces a fully populated [`RequestSpec`] against
/// the given project base path. Group and project operations ignore the base
/// because they address top-level endpoints.
///
/// # Errors
///
/// - [`Error::UnknownResource`] when the resource name is not recognized
/// - [`Error::UnsupportedOperation`] when the operation is not part of the
///   resource's dispatch table
/// - [`Error::Validation`] for any parameter guard failure
///
/// # Example
///
/// ```rust
/// use gitlab_node::resources::build_request;
/// use gitlab_node::ItemParams;
/// use serde_json::json;
///
/// let params = ItemParams::from_value(0, json!({
///     "resource": "branch",
///     "operation": "rename",
///     "branch": "old",
///     "newBranch": "new",
/// }));
///
/// let spec = build_request(&params, "/projects/1").unwrap();
/// assert_eq!(spec.endpoint, "/projects/1/repository/branches/old");
/// assert_eq!(spec.body.get("new_branch"), Some(&json!("new")));
/// ```
pub fn build_request(params: &ItemParams, base: &str) -> Result<RequestSpec> {
    match params.resource().as_str() {
        "branch" => Ok(branch::BranchOperation::from_params(params)?.into_spec(base)),
        "file" => Ok(file::FileOperation::from_params(params)?.into_spec(base)),
        "group" => Ok(group::GroupOperation::from_params(params)?.into_spec()),
        "issue" => Ok(issue::IssueOperation::from_params(params)?.into_spec(base)),
        "mergeRequest" => {
            Ok(merge_request::MergeRequestOperation::from_params(params)?.into_spec(base))
        }
        "pipeline" => Ok(pipeline::PipelineOperation::from_params(params)?.into_spec(base)),
        "project" => Ok(project::ProjectOperation::from_params(params)?.into_spec()),
        "raw" => Ok(raw::RawOperation::from_params(params)?.into_spec()),
        "release" => Ok(release::ReleaseOperation::from_params(params)?.into_spec(base)),
        "tag" => Ok(tag::TagOperation::from_params(params)?.into_spec(base)),
        other => Err(Error::unknown_resource(other, params.index())),
    }
}
