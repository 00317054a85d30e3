//
//  gitlab-node
//  resources/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Group operations: create, get, delete and member listing. Groups live at
//! top-level endpoints and do not use the project base path.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_positive;

/// A decoded group operation.
#[derive(Debug, Clone)]
pub enum GroupOperation {
    /// Create a group with a name and URL path.
    Create { name: String, path: String },
    /// Get one group.
    Get { group_id: i64 },
    /// Delete a group.
    Delete { group_id: i64 },
    /// List the members of a group.
    GetMembers {
        group_id: i64,
        options: ListOptions,
    },
}

impl GroupOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        let group_id = || -> Result<i64> {
            let id = params.integer("groupId");
            require_positive(id, "groupId", index)?;
            Ok(id)
        };

        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                name: params.string("groupName"),
                path: params.string("groupPath"),
            }),
            "get" => Ok(Self::Get {
                group_id: group_id()?,
            }),
            "delete" => Ok(Self::Delete {
                group_id: group_id()?,
            }),
            "getMembers" => Ok(Self::GetMembers {
                group_id: group_id()?,
                options: ListOptions::from_params(params),
            }),
            other => Err(Error::unsupported("group", other, index)),
        }
    }

    /// Builds the request spec. Group endpoints are project-independent.
    pub fn into_spec(self) -> RequestSpec {
        match self {
            Self::Create { name, path } => RequestSpec::new(HttpMethod::Post, "/groups")
                .body("name", name)
                .body("path", path),
            Self::Get { group_id } => {
                RequestSpec::new(HttpMethod::Get, format!("/groups/{group_id}"))
            }
            Self::Delete { group_id } => {
                RequestSpec::new(HttpMethod::Delete, format!("/groups/{group_id}"))
            }
            Self::GetMembers { group_id, options } => {
                RequestSpec::new(HttpMethod::Get, format!("/groups/{group_id}/members"))
                    .listing(options)
            }
        }
    }
}
