//
//  gitlab-node
//  resources/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Issue operations: create, get, list, update, close and reopen. Issues are
//! addressed by their project-scoped IID, validated positive.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_positive;

/// A decoded issue operation.
#[derive(Debug, Clone)]
pub enum IssueOperation {
    /// Open a new issue.
    Create {
        title: String,
        description: String,
        labels: String,
    },
    /// Get one issue.
    Get { iid: i64 },
    /// List issues.
    GetAll { options: ListOptions },
    /// Update title, description, labels and state.
    Update {
        iid: i64,
        title: String,
        description: String,
        labels: String,
        state_event: String,
    },
    /// Close an issue.
    Close { iid: i64 },
    /// Reopen an issue.
    Reopen { iid: i64 },
}

impl IssueOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        let iid = || -> Result<i64> {
            let iid = params.integer("issueIid");
            require_positive(iid, "issueIid", index)?;
            Ok(iid)
        };

        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                title: params.string("title"),
                description: params.string("description"),
                labels: params.string("issueLabels"),
            }),
            "get" => Ok(Self::Get { iid: iid()? }),
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "update" => Ok(Self::Update {
                iid: iid()?,
                title: params.string("title"),
                description: params.string("description"),
                labels: params.string("issueLabels"),
                state_event: params.string_or("issueState", "reopen"),
            }),
            "close" => Ok(Self::Close { iid: iid()? }),
            "reopen" => Ok(Self::Reopen { iid: iid()? }),
            other => Err(Error::unsupported("issue", other, index)),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create {
                title,
                description,
                labels,
            } => RequestSpec::new(HttpMethod::Post, format!("{base}/issues"))
                .body("title", title)
                .body("description", description)
                .body_if_set("labels", &labels),
            Self::Get { iid } => RequestSpec::new(HttpMethod::Get, format!("{base}/issues/{iid}")),
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/issues")).listing(options)
            }
            Self::Update {
                iid,
                title,
                description,
                labels,
                state_event,
            } => RequestSpec::new(HttpMethod::Put, format!("{base}/issues/{iid}"))
                .body("title", title)
                .body("description", description)
                .body_if_set("labels", &labels)
                .body("state_event", state_event),
            Self::Close { iid } => RequestSpec::new(HttpMethod::Put, format!("{base}/issues/{iid}"))
                .body("state_event", "close"),
            Self::Reopen { iid } => {
                RequestSpec::new(HttpMethod::Put, format!("{base}/issues/{iid}"))
                    .body("state_event", "reopen")
            }
        }
    }
}
