//
//  gitlab-node
//  resources/raw.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! The raw API operation: call any GitLab endpoint with a caller-chosen
//! method, body and query.
//!
//! The `content` and `queryParameters` parameters are free-form JSON objects.
//! They may arrive as parsed values or as strings; strings are parsed at
//! decode time and malformed JSON or non-object values fail validation
//! before any request is built.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{HttpMethod, RequestSpec};

/// A decoded raw API operation.
#[derive(Debug, Clone)]
pub enum RawOperation {
    /// One request against an arbitrary endpoint.
    Request {
        method: HttpMethod,
        endpoint: String,
        body: Map<String, Value>,
        query: Map<String, Value>,
    },
}

impl RawOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        match params.operation().as_str() {
            "request" => {
                let method = HttpMethod::parse(
                    &params.string_or("httpMethod", "GET"),
                    "httpMethod",
                    params.index(),
                )?;
                Ok(Self::Request {
                    method,
                    endpoint: params.string_or("endpoint", "/"),
                    body: params.json_object("content")?,
                    query: params.json_object("queryParameters")?,
                })
            }
            other => Err(Error::unsupported("raw", other, params.index())),
        }
    }

    /// Builds the request spec. Raw requests never paginate.
    pub fn into_spec(self) -> RequestSpec {
        match self {
            Self::Request {
                method,
                endpoint,
                body,
                query,
            } => RequestSpec::new(method, endpoint)
                .body_map(body)
                .query_map(query),
        }
    }
}
