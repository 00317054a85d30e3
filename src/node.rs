//
//  gitlab-node
//  node.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Node Execution
//!
//! [`GitLabNode`] is the host-facing entry point. The host hands over one
//! parameter bag per input item; the node processes the batch strictly
//! sequentially. For each item it:
//!
//! 1. resolves the credential (stored, or inline override when the item sets
//!    `useCustomCredentials`), fresh for every item;
//! 2. validates that the credential identifies a project;
//! 3. decodes and validates the resource + operation into a request spec;
//! 4. issues exactly one HTTP call, or one bounded sequential series of
//!    paginated calls, and awaits it before the next item begins.
//!
//! Any failure aborts the batch on first occurrence; there is no parallel
//! fan-out across items and no state is shared between them.
//!
//! Array responses fan out to one [`NodeOutput`] per element so downstream
//! workflow steps see individual items, each tagged with the index of the
//! input item that produced it.

use serde_json::Value;
use tracing::debug;

use crate::client::{GitLabClient, TokenScheme};
use crate::credentials::{Credential, CredentialStore, CREDENTIAL_TYPE};
use crate::error::{Error, Result};
use crate::pagination::PageStrategy;
use crate::params::ItemParams;
use crate::resources::build_request;

/// One result item, tagged with the input item index that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutput {
    /// Index of the input item this result belongs to.
    pub item: usize,
    /// The result payload.
    pub json: Value,
}

/// The GitLab node.
///
/// Generic over the host's [`CredentialStore`] so embedders decide where
/// stored credentials come from.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use gitlab_node::{Credential, CredentialStore, GitLabNode, ItemParams, Result};
/// use serde_json::json;
///
/// struct FixedStore(Credential);
///
/// #[async_trait]
/// impl CredentialStore for FixedStore {
///     async fn get(&self, _credential_type: &str) -> Result<Credential> {
///         Ok(self.0.clone())
///     }
/// }
///
/// # async fn example() -> Result<()> {
/// let store = FixedStore(Credential {
///     server: "https://gitlab.com".to_string(),
///     access_token: "glpat-secret".to_string(),
///     project_id: 1,
///     ..Default::default()
/// });
///
/// let node = GitLabNode::new(store);
/// let outputs = node
///     .run(&[ItemParams::from_value(0, json!({
///         "resource": "branch",
///         "operation": "getAll",
///         "returnAll": true,
///     }))])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GitLabNode<S> {
    store: S,
    scheme: TokenScheme,
    page_strategy: PageStrategy,
}

impl<S: CredentialStore> GitLabNode<S> {
    /// Creates a node backed by the given credential store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            scheme: TokenScheme::default(),
            page_strategy: PageStrategy::default(),
        }
    }

    /// Sets the token presentation scheme for all requests.
    pub fn with_scheme(mut self, scheme: TokenScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the pagination signal strategy for the target deployment.
    pub fn with_page_strategy(mut self, strategy: PageStrategy) -> Self {
        self.page_strategy = strategy;
        self
    }

    /// Processes a batch of input items sequentially.
    ///
    /// # Errors
    ///
    /// The first validation, credential, dispatch or API error aborts the
    /// batch and is returned to the caller.
    pub async fn run(&self, items: &[ItemParams]) -> Result<Vec<NodeOutput>> {
        let mut outputs = Vec::new();

        for params in items {
            let credential = self.resolve_credential(params).await?;
            credential.assert_project()?;
            let base = credential.project_base();

            let spec = build_request(params, &base)?;
            debug!(
                item = params.index(),
                resource = %params.resource(),
                operation = %params.operation(),
                method = %spec.method,
                endpoint = %spec.endpoint,
                "executing GitLab node operation"
            );

            let client = GitLabClient::new(&credential)?
                .with_scheme(self.scheme)
                .with_page_strategy(self.page_strategy);
            let response = client.send(&spec).await?;

            match response {
                Value::Array(values) => outputs.extend(values.into_iter().map(|json| NodeOutput {
                    item: params.index(),
                    json,
                })),
                other => outputs.push(NodeOutput {
                    item: params.index(),
                    json: other,
                }),
            }
        }

        Ok(outputs)
    }

    /// Resolves the credential for one item.
    ///
    /// Items that set `useCustomCredentials` carry their own credential
    /// record in the `customCredentials` parameter; everything else goes
    /// through the stored credential registered under [`CREDENTIAL_TYPE`].
    async fn resolve_credential(&self, params: &ItemParams) -> Result<Credential> {
        if params.boolean("useCustomCredentials") {
            let value = params
                .value("customCredentials")
                .cloned()
                .unwrap_or(Value::Null);
            serde_json::from_value(value)
                .map_err(|e| Error::Credential(format!("Invalid custom credentials: {e}")))
        } else {
            self.store.get(CREDENTIAL_TYPE).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockito::Matcher;
    use serde_json::json;

    struct FixedStore(Credential);

    #[async_trait]
    impl CredentialStore for FixedStore {
        async fn get(&self, credential_type: &str) -> Result<Credential> {
            assert_eq!(credential_type, CREDENTIAL_TYPE);
            Ok(self.0.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl CredentialStore for FailingStore {
        async fn get(&self, _credential_type: &str) -> Result<Credential> {
            Err(Error::Credential("no stored credential".to_string()))
        }
    }

    fn credential(server: &str) -> Credential {
        Credential {
            server: server.to_string(),
            access_token: "secret".to_string(),
            project_id: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_branch_rename_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v4/projects/1/repository/branches/old")
            .match_header("private-token", "secret")
            .match_body(Matcher::Json(json!({ "new_branch": "new" })))
            .with_body(r#"{"name":"new"}"#)
            .create_async()
            .await;

        let node = GitLabNode::new(FixedStore(credential(&server.url())));
        let outputs = node
            .run(&[ItemParams::from_value(
                0,
                json!({
                    "resource": "branch",
                    "operation": "rename",
                    "branch": "old",
                    "newBranch": "new",
                }),
            )])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].item, 0);
        assert_eq!(outputs[0].json, json!({ "name": "new" }));
    }

    #[tokio::test]
    async fn test_array_responses_fan_out_with_item_index() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v4/projects/1/repository/branches")
            .match_query(Matcher::Any)
            .with_body(r#"[{"name":"a"},{"name":"b"}]"#)
            .create_async()
            .await;

        let node = GitLabNode::new(FixedStore(credential(&server.url())));
        let outputs = node
            .run(&[ItemParams::from_value(
                3,
                json!({ "resource": "branch", "operation": "getAll" }),
            )])
            .await
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|o| o.item == 3));
        assert_eq!(outputs[0].json, json!({ "name": "a" }));
        assert_eq!(outputs[1].json, json!({ "name": "b" }));
    }

    #[tokio::test]
    async fn test_inline_credentials_override_the_store() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/9/issues/5")
            .match_header("private-token", "inline-token")
            .with_body(r#"{"iid":5}"#)
            .create_async()
            .await;

        let node = GitLabNode::new(FailingStore);
        let outputs = node
            .run(&[ItemParams::from_value(
                0,
                json!({
                    "resource": "issue",
                    "operation": "get",
                    "issueIid": 5,
                    "useCustomCredentials": true,
                    "customCredentials": {
                        "server": server.url(),
                        "accessToken": "inline-token",
                        "projectId": 9,
                    },
                }),
            )])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outputs[0].json, json!({ "iid": 5 }));
    }

    #[tokio::test]
    async fn test_validation_failure_aborts_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let node = GitLabNode::new(FixedStore(credential(&server.url())));
        let err = node
            .run(&[ItemParams::from_value(
                0,
                json!({ "resource": "pipeline", "operation": "get", "pipelineId": 0 }),
            )])
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_incomplete_project_credentials_are_rejected() {
        let node = GitLabNode::new(FixedStore(Credential {
            server: "https://gitlab.example.com".to_string(),
            access_token: "secret".to_string(),
            ..Default::default()
        }));
        let err = node
            .run(&[ItemParams::from_value(
                0,
                json!({ "resource": "branch", "operation": "getAll" }),
            )])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Credential(_)));
    }

    #[tokio::test]
    async fn test_paginated_operation_collects_every_page() {
        let mut server = mockito::Server::new_async().await;
        let page = |n: u64| {
            Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), n.to_string()),
            ])
        };
        server
            .mock("GET", "/api/v4/projects/1/merge_requests")
            .match_query(page(1))
            .with_header("x-next-page", "2")
            .with_body(r#"[{"iid":1}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v4/projects/1/merge_requests")
            .match_query(page(2))
            .with_body(r#"[{"iid":2}]"#)
            .create_async()
            .await;

        let node = GitLabNode::new(FixedStore(credential(&server.url())));
        let outputs = node
            .run(&[ItemParams::from_value(
                0,
                json!({ "resource": "mergeRequest", "operation": "getAll", "returnAll": true }),
            )])
            .await
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].json, json!({ "iid": 1 }));
        assert_eq!(outputs[1].json, json!({ "iid": 2 }));
    }

    #[tokio::test]
    async fn test_owner_and_name_build_encoded_project_base() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v4/projects/group%2Fsub%2Fmy%20repo/issues/1")
            .with_body(r#"{"iid":1}"#)
            .create_async()
            .await;

        let node = GitLabNode::new(FixedStore(Credential {
            server: server.url(),
            access_token: "secret".to_string(),
            project_owner: "group/sub".to_string(),
            project_name: "my repo".to_string(),
            project_id: 0,
        }));
        node.run(&[ItemParams::from_value(
            0,
            json!({ "resource": "issue", "operation": "get", "issueIid": 1 }),
        )])
        .await
        .unwrap();

        mock.assert_async().await;
    }
}
