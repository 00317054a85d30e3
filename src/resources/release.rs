//
//  gitlab-node
//  resources/release.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Release operations: create, update, get, list and delete.
//!
//! The `assets` parameter is a free-form JSON document describing release
//! asset links. It is parsed at decode time; malformed JSON fails validation
//! before any request is built.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{encode_path, HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_string;

/// A decoded release operation.
#[derive(Debug, Clone)]
pub enum ReleaseOperation {
    /// Create a release for a tag.
    Create {
        tag_name: String,
        name: String,
        description: String,
        assets: Option<Value>,
    },
    /// Update the release of a tag.
    Update {
        tag_name: String,
        name: String,
        description: String,
        assets: Option<Value>,
    },
    /// Get one release.
    Get { tag_name: String },
    /// List releases.
    GetAll { options: ListOptions },
    /// Delete a release.
    Delete { tag_name: String },
}

impl ReleaseOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        match params.operation().as_str() {
            "create" => {
                let tag_name = params.string("tagName");
                require_string(&tag_name, "tagName", index)?;
                Ok(Self::Create {
                    tag_name,
                    name: params.string("name"),
                    description: params.string("releaseDescription"),
                    assets: params.json_value("assets")?,
                })
            }
            "update" => Ok(Self::Update {
                tag_name: params.string("tagName"),
                name: params.string("name"),
                description: params.string("releaseDescription"),
                assets: params.json_value("assets")?,
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
            other => Err(Error::unsupported("release", other, index)),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create {
                tag_name,
                name,
                description,
                assets,
            } => {
                let mut spec = RequestSpec::new(HttpMethod::Post, format!("{base}/releases"))
                    .body("tag_name", tag_name)
                    .body("name", name)
                    .body("description", description);
                if let Some(assets) = assets {
                    spec = spec.body("assets", assets);
                }
                spec
            }
            Self::Update {
                tag_name,
                name,
                description,
                assets,
            } => {
                let mut spec = RequestSpec::new(
                    HttpMethod::Put,
                    format!("{base}/releases/{}", encode_path(&tag_name)),
                )
                .body("name", name)
                .body("description", description);
                if let Some(assets) = assets {
                    spec = spec.body("assets", assets);
                }
                spec
            }
            Self::Get { tag_name } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/releases/{}", encode_path(&tag_name)),
            ),
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/releases")).listing(options)
            }
            Self::Delete { tag_name } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/releases/{}", encode_path(&tag_name)),
            ),
        }
    }
}
