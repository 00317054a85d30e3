//
//  gitlab-node
//  client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the GitLab API
//!
//! This module provides the transport layer for the node. It issues exactly
//! one authenticated HTTP call per invocation against
//! `{server}/api/v4{endpoint}`, parses the JSON response, and translates
//! failures into the typed [`ApiError`] shape. There are no automatic
//! retries; callers see exactly one outcome per call attempt.
//!
//! ## Features
//!
//! - Authentication header injection (`Private-Token` or `Bearer`)
//! - Base URL normalization from the credential record
//! - Error translation that prefers the server's response payload
//! - A pagination driver that accumulates list responses across pages
//!
//! ## Error translation
//!
//! When the server answers with a non-success status, the raw response
//! payload becomes both the message and the description of the resulting
//! [`ApiError`]. When the failure happens below the HTTP layer, the transport
//! error's own message is used and no description is attached.

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use crate::credentials::Credential;
use crate::error::{ApiError, Error, Result};
use crate::pagination::{PageCursor, PageStrategy};
use crate::request::{HttpMethod, RequestSpec};

/// How the access token is presented to the server.
///
/// GitLab's personal access tokens travel in a `Private-Token` header;
/// OAuth-style tokens use the standard `Authorization: Bearer` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenScheme {
    /// `Private-Token: {token}`, the personal-access-token convention.
    #[default]
    PrivateToken,

    /// `Authorization: Bearer {token}`.
    Bearer,
}

impl TokenScheme {
    fn apply(&self, request: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        match self {
            TokenScheme::PrivateToken => request.header("Private-Token", token),
            TokenScheme::Bearer => request.bearer_auth(token),
        }
    }
}

/// A parsed response together with its headers.
///
/// The pagination driver needs the headers to read the "more pages" signal;
/// everything else only looks at the body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Parsed JSON body. Empty responses parse to `Value::Null`; non-JSON
    /// payloads (for example artifact archives) are carried as a string.
    pub body: Value,
    /// Response headers.
    pub headers: HeaderMap,
}

/// The HTTP client for one resolved credential.
///
/// Construction validates the credential's server URL and token; requests
/// then share the derived base URL and authentication scheme. A client is
/// built fresh per input item, mirroring the per-item credential lifetime.
///
/// # Example
///
/// ```rust,no_run
/// use gitlab_node::{Credential, GitLabClient};
///
/// # async fn example() -> gitlab_node::Result<()> {
/// let credential = Credential {
///     server: "https://gitlab.com".to_string(),
///     access_token: "glpat-secret".to_string(),
///     project_id: 1,
///     ..Default::default()
/// };
///
/// let client = GitLabClient::new(&credential)?;
/// let branches = client
///     .request(
///         gitlab_node::request::HttpMethod::Get,
///         "/projects/1/repository/branches",
///         &serde_json::Map::new(),
///         &[],
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GitLabClient {
    /// The underlying HTTP client.
    http: Client,
    /// `{server}/api/v4`, with the server's trailing slash stripped.
    base_url: String,
    /// The access token forwarded on every request.
    token: String,
    /// How the token is presented.
    scheme: TokenScheme,
    /// How the target deployment signals further pages.
    page_strategy: PageStrategy,
}

impl GitLabClient {
    /// Creates a client for the given credential.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when the server URL or access token is
    /// missing, and [`Error::Api`] when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(credential: &Credential) -> Result<Self> {
        let base_url = credential.api_base()?;
        if credential.access_token.is_empty() {
            return Err(Error::Credential(
                "Access token is missing in GitLab credentials".to_string(),
            ));
        }
        let http = Client::builder()
            .user_agent(format!("gitlab-node/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::Api(ApiError::from_message(e.to_string())))?;

        Ok(Self {
            http,
            base_url,
            token: credential.access_token.clone(),
            scheme: TokenScheme::default(),
            page_strategy: PageStrategy::default(),
        })
    }

    /// Sets the token presentation scheme.
    pub fn with_scheme(mut self, scheme: TokenScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the pagination signal strategy for the target deployment.
    pub fn with_page_strategy(mut self, strategy: PageStrategy) -> Self {
        self.page_strategy = strategy;
        self
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes a built request, paginating when the spec asks for it.
    ///
    /// Paginated requests return the accumulated items as a JSON array.
    pub async fn send(&self, spec: &RequestSpec) -> Result<Value> {
        let query = spec.query_pairs();
        if spec.paginate {
            let items = self
                .request_all_items(spec.method, &spec.endpoint, &spec.body, &query)
                .await?;
            Ok(Value::Array(items))
        } else {
            self.request(spec.method, &spec.endpoint, &spec.body, &query)
                .await
        }
    }

    /// Issues one API call and returns the parsed body.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &Map<String, Value>,
        query: &[(String, String)],
    ) -> Result<Value> {
        let response = self.request_full(method, endpoint, body, query).await?;
        Ok(response.body)
    }

    /// Issues one API call and returns the parsed body together with the
    /// response headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`]. A non-success status yields an error carrying
    /// the raw response payload as both message and description; failures
    /// below the HTTP layer carry only the transport error's message.
    pub async fn request_full(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &Map<String, Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http.request(method.into(), &url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if !body.is_empty() {
            request = request.json(body);
        }
        request = self.scheme.apply(request, &self.token);

        debug!(%method, %url, "sending GitLab API request");

        let response = request
            .send()
            .await
            .map_err(|e| Error::Api(ApiError::from_message(e.to_string())))?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Api(ApiError::from_message(e.to_string())))?;

        if !status.is_success() {
            if text.is_empty() {
                return Err(Error::Api(ApiError::from_message(format!(
                    "GitLab returned status {status}"
                ))));
            }
            return Err(Error::Api(ApiError::from_payload(text)));
        }

        Ok(ApiResponse {
            body: parse_body(text),
            headers,
        })
    }

    /// Fetches every page of a list endpoint and returns the flattened items.
    ///
    /// Starts at page 1 with a page size of 100, advances the page counter by
    /// one per call, and stops when the deployment's pagination signal
    /// disappears. Items keep the order the server returned them in: page 1
    /// first, server order within each page.
    pub async fn request_all_items(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &Map<String, Value>,
        query: &[(String, String)],
    ) -> Result<Vec<Value>> {
        let mut cursor = PageCursor::first();
        let mut items = Vec::new();

        loop {
            let mut pairs = query.to_vec();
            pairs.push(("per_page".to_string(), cursor.per_page.to_string()));
            pairs.push(("page".to_string(), cursor.page.to_string()));

            let response = self.request_full(method, endpoint, body, &pairs).await?;
            cursor.advance();

            match response.body {
                Value::Array(page_items) => items.extend(page_items),
                Value::Null => {}
                other => items.push(other),
            }

            if !self.page_strategy.has_next(&response.headers) {
                break;
            }
            debug!(page = cursor.page, collected = items.len(), "fetching next page");
        }

        Ok(items)
    }
}

/// Parses a response body: empty bodies become `Null`, valid JSON is parsed,
/// anything else is carried through as a raw string.
fn parse_body(text: String) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn credential(server: &str) -> Credential {
        Credential {
            server: server.to_string(),
            access_token: "secret".to_string(),
            project_id: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_request_sends_private_token_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/user")
            .match_header("private-token", "secret")
            .with_body(r#"{"id":1}"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let body = client
            .request(HttpMethod::Get, "/user", &Map::new(), &[])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn test_bearer_scheme_uses_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/user")
            .match_header("authorization", "Bearer secret")
            .with_body(r#"{"id":1}"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url()))
            .unwrap()
            .with_scheme(TokenScheme::Bearer);
        client
            .request(HttpMethod::Get, "/user", &Map::new(), &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_body_and_query_are_forwarded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v4/projects/1/repository/branches/old")
            .match_query(Matcher::UrlEncoded("foo".into(), "bar".into()))
            .match_body(Matcher::Json(json!({ "new_branch": "new" })))
            .with_body("{}")
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let mut body = Map::new();
        body.insert("new_branch".to_string(), json!("new"));
        client
            .request(
                HttpMethod::Put,
                "/projects/1/repository/branches/old",
                &body,
                &[("foo".to_string(), "bar".to_string())],
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_payload_becomes_message_and_description() {
        let mut server = mockito::Server::new_async().await;
        let payload = r#"{"message":"404 Project Not Found"}"#;
        server
            .mock("GET", "/api/v4/projects/999")
            .with_status(404)
            .with_body(payload)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let err = client
            .request(HttpMethod::Get, "/projects/999", &Map::new(), &[])
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => {
                assert_eq!(api.message, payload);
                assert_eq!(api.description.as_deref(), Some(payload));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_payload_keeps_status_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/projects/999")
            .with_status(500)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let err = client
            .request(HttpMethod::Get, "/projects/999", &Map::new(), &[])
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => {
                assert!(api.message.contains("500"));
                assert!(api.description.is_none());
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pagination_accumulates_until_signal_disappears() {
        let mut server = mockito::Server::new_async().await;

        let page = |n: u64| {
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), n.to_string()),
            ])
        };

        let first = server
            .mock("GET", "/api/v4/projects/1/repository/branches")
            .match_query(page(1))
            .with_header("x-next-page", "2")
            .with_body(r#"[{"name":"a"}]"#)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/api/v4/projects/1/repository/branches")
            .match_query(page(2))
            .with_header("x-next-page", "3")
            .with_body(r#"[{"name":"b"}]"#)
            .create_async()
            .await;
        let third = server
            .mock("GET", "/api/v4/projects/1/repository/branches")
            .match_query(page(3))
            .with_body(r#"[{"name":"c"}]"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let items = client
            .request_all_items(
                HttpMethod::Get,
                "/projects/1/repository/branches",
                &Map::new(),
                &[],
            )
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
        assert_eq!(
            items,
            vec![json!({"name":"a"}), json!({"name":"b"}), json!({"name":"c"})]
        );
    }

    #[tokio::test]
    async fn test_pagination_stops_on_empty_next_page_header() {
        let mut server = mockito::Server::new_async().await;
        let only = server
            .mock("GET", "/api/v4/projects")
            .match_query(Matcher::Any)
            .with_header("x-next-page", "")
            .with_body(r#"[{"id":1},{"id":2}]"#)
            .expect(1)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let items = client
            .request_all_items(HttpMethod::Get, "/projects", &Map::new(), &[])
            .await
            .unwrap();

        only.assert_async().await;
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_pagination_follows_link_header_strategy() {
        let mut server = mockito::Server::new_async().await;

        let page = |n: u64| {
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), n.to_string()),
            ])
        };

        let next_link = format!("<{}/api/v4/tags?page=2>; rel=\"next\"", server.url());
        let first = server
            .mock("GET", "/api/v4/tags")
            .match_query(page(1))
            .with_header("link", &next_link)
            .with_body(r#"[{"name":"v1"}]"#)
            .create_async()
            .await;
        let last_link = format!("<{}/api/v4/tags?page=1>; rel=\"prev\"", server.url());
        let second = server
            .mock("GET", "/api/v4/tags")
            .match_query(page(2))
            .with_header("link", &last_link)
            .with_body(r#"[{"name":"v2"}]"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url()))
            .unwrap()
            .with_page_strategy(PageStrategy::LinkHeader);
        let items = client
            .request_all_items(HttpMethod::Get, "/tags", &Map::new(), &[])
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(items, vec![json!({"name":"v1"}), json!({"name":"v2"})]);
    }

    #[tokio::test]
    async fn test_send_honors_paginate_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/projects/1/pipelines")
            .match_query(Matcher::UrlEncoded("per_page".into(), "20".into()))
            .with_body(r#"[{"id":9}]"#)
            .create_async()
            .await;

        let client = GitLabClient::new(&credential(&server.url())).unwrap();
        let spec = RequestSpec::new(HttpMethod::Get, "/projects/1/pipelines").query("per_page", 20);
        let body = client.send(&spec).await.unwrap();
        assert_eq!(body, json!([{ "id": 9 }]));
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(String::new()), Value::Null);
        assert_eq!(parse_body("[1]".to_string()), json!([1]));
        assert_eq!(
            parse_body("binary garbage".to_string()),
            Value::String("binary garbage".to_string())
        );
    }

    #[test]
    fn test_new_rejects_missing_token() {
        let mut cred = credential("https://gitlab.example.com");
        cred.access_token = String::new();
        assert!(matches!(
            GitLabClient::new(&cred),
            Err(Error::Credential(_))
        ));
    }
}
