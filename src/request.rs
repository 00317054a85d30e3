//
//  gitlab-node
//  request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Request Specification
//!
//! A [`RequestSpec`] is the fully built description of one GitLab API call:
//! method, endpoint path (no query string), JSON body, query map, and whether
//! the call should be driven through the pagination loop. Dispatchers build
//! one spec per input item; nothing here performs I/O.
//!
//! The module also provides [`encode_path`], the percent-encoding used for
//! every path component inserted into an endpoint, and [`ListOptions`], the
//! shared decode of the `returnAll` / `limit` pair that list-style operations
//! accept.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::params::ItemParams;

/// Characters kept verbatim when encoding a path component, matching the
/// unreserved set: alphanumerics plus `-`, `_`, `.`, `~`.
const PATH_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a single path component.
///
/// Applied to branch names, file paths, tag names, and discussion IDs before
/// they are inserted into an endpoint. Reserved characters (including `/`)
/// are escaped, so a file path like `src/main.rs` becomes `src%2Fmain.rs`
/// and occupies a single path segment.
///
/// # Example
///
/// ```rust
/// use gitlab_node::request::encode_path;
///
/// assert_eq!(encode_path("feature/login"), "feature%2Flogin");
/// assert_eq!(encode_path("my repo"), "my%20repo");
/// assert_eq!(encode_path("v1.0"), "v1.0");
/// ```
pub fn encode_path(component: &str) -> String {
    utf8_percent_encode(component, PATH_COMPONENT).to_string()
}

/// HTTP methods supported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// The canonical upper-case name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a body by convention.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    /// Parses a method name from a parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming `field` and `item_index` when the
    /// value is not one of the five supported methods.
    pub fn parse(value: &str, field: &str, item_index: usize) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(Error::validation(
                field,
                item_index,
                "must be one of GET, POST, PUT, PATCH or DELETE",
            )),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared decode of the `returnAll` / `limit` pair for list operations.
///
/// When `return_all` is set the request is paginated and the limit is
/// ignored; otherwise the limit (defaulting to 50) caps the result count via
/// a `per_page` query parameter.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Whether the caller asked for every result.
    pub return_all: bool,
    /// Maximum results when not returning all.
    pub limit: i64,
}

impl ListOptions {
    /// Decodes the pair from an item's parameters.
    pub fn from_params(params: &ItemParams) -> Self {
        Self {
            return_all: params.boolean("returnAll"),
            limit: params.integer_or("limit", 50),
        }
    }
}

/// A fully built GitLab API request, ready for the transport layer.
///
/// Built fresh per input item and never reused. The `endpoint` is relative to
/// the `/api/v4` base and carries no query string; query parameters live in
/// the `query` map.
///
/// # Example
///
/// ```rust
/// use gitlab_node::request::{HttpMethod, RequestSpec};
///
/// let spec = RequestSpec::new(HttpMethod::Put, "/projects/1/repository/branches/old")
///     .body("new_branch", "new");
///
/// assert_eq!(spec.method, HttpMethod::Put);
/// assert!(!spec.paginate);
/// ```
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method for the call.
    pub method: HttpMethod,
    /// Endpoint path below `/api/v4`, without a query string.
    pub endpoint: String,
    /// JSON body; empty maps are not sent.
    pub body: Map<String, Value>,
    /// Query parameters; empty maps produce no query string.
    pub query: Map<String, Value>,
    /// Whether the pagination driver should fetch every page.
    pub paginate: bool,
}

impl RequestSpec {
    /// Creates a spec with an empty body and query.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: Map::new(),
            query: Map::new(),
            paginate: false,
        }
    }

    /// Adds a body field.
    pub fn body(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    /// Adds a body field only when the string value is non-empty.
    pub fn body_if_set(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.body(key, value)
        }
    }

    /// Replaces the whole body map.
    pub fn body_map(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    /// Replaces the whole query map.
    pub fn query_map(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    /// Applies list semantics: paginate on "return all", else cap with
    /// `per_page`.
    pub fn listing(mut self, options: ListOptions) -> Self {
        if options.return_all {
            self.paginate = true;
        } else {
            self.query
                .insert("per_page".to_string(), Value::from(options.limit));
        }
        self
    }

    /// Renders the query map as string pairs for the HTTP layer.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(k, v)| (k.clone(), scalar_to_string(v)))
            .collect()
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
