//
//  gitlab-node
//  resources/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Project operations: get, list and search. Projects live at top-level
//! endpoints and do not use the project base path.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_positive;

/// A decoded project operation.
#[derive(Debug, Clone)]
pub enum ProjectOperation {
    /// Get one project by numeric ID.
    Get { project_id: i64 },
    /// List visible projects.
    GetAll { options: ListOptions },
    /// Search projects by term.
    Search {
        term: String,
        options: ListOptions,
    },
}

impl ProjectOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        match params.operation().as_str() {
            "get" => {
                let project_id = params.integer("projectId");
                require_positive(project_id, "projectId", index)?;
                Ok(Self::Get { project_id })
            }
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "search" => Ok(Self::Search {
                term: params.string("searchTerm"),
                options: ListOptions::from_params(params),
            }),
            other => Err(Error::unsupported("project", other, index)),
        }
    }

    /// Builds the request spec. Project endpoints are base-independent.
    pub fn into_spec(self) -> RequestSpec {
        match self {
            Self::Get { project_id } => {
                RequestSpec::new(HttpMethod::Get, format!("/projects/{project_id}"))
            }
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, "/projects").listing(options)
            }
            Self::Search { term, options } => RequestSpec::new(HttpMethod::Get, "/projects")
                .listing(options)
                .query("search", term),
        }
    }
}
