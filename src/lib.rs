//
//  gitlab-node
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # GitLab Node Library
//!
//! A workflow-automation node for the GitLab REST API. The crate maps
//! per-item parameter bags supplied by a host runtime onto GitLab API calls,
//! forwards authentication, paginates list responses, and translates
//! failures into typed errors.
//!
//! ## Overview
//!
//! The host runtime owns parameter resolution, credential persistence and
//! execution-data plumbing; this crate owns everything between a resolved
//! parameter bag and a GitLab response:
//!
//! - **Resources**: branch, file, group, issue, merge request, pipeline,
//!   project, release, tag, and a raw escape hatch for arbitrary endpoints
//! - **Typed dispatch**: each resource + operation pair decodes into an enum
//!   variant carrying its validated fields before any request exists
//! - **Pagination**: list operations can fetch every page, with the
//!   deployment's "more pages" signal abstracted behind a strategy
//! - **Typed errors**: validation failures name the parameter and item
//!   index; API failures carry the server's own diagnostic payload
//!
//! ## Module Structure
//!
//! - [`node`]: the host-facing execution loop over input items
//! - [`resources`]: per-resource request dispatchers
//! - [`client`]: the authenticated HTTP transport and pagination driver
//! - [`credentials`]: the credential record and project-base builder
//! - [`params`]: the per-item parameter bag
//! - [`request`]: request specifications and path encoding
//! - [`pagination`]: page cursor and pagination signal strategies
//! - [`validators`]: parameter guards
//! - [`error`]: the crate's error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use gitlab_node::{Credential, CredentialStore, GitLabNode, ItemParams, Result};
//! use serde_json::json;
//!
//! struct VaultStore;
//!
//! #[async_trait]
//! impl CredentialStore for VaultStore {
//!     async fn get(&self, _credential_type: &str) -> Result<Credential> {
//!         // Fetch from the host's credential vault.
//!         # unimplemented!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let node = GitLabNode::new(VaultStore);
//! let outputs = node
//!     .run(&[ItemParams::from_value(0, json!({
//!         "resource": "mergeRequest",
//!         "operation": "labels",
//!         "mergeRequestIid": 42,
//!         "labelAction": "add",
//!         "labels": "reviewed",
//!     }))])
//!     .await?;
//!
//! for output in outputs {
//!     println!("item {}: {}", output.item, output.json);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! Input items are processed strictly sequentially. Each item resolves its
//! credential fresh, performs exactly one HTTP call (or one bounded
//! sequential series of paginated calls), and completes before the next item
//! begins. The first error aborts the batch. There are no internal retries,
//! timeouts or caches; those concerns belong to the host and its transport.

/// The host-facing execution loop.
///
/// Processes batches of input items against a credential store, producing
/// one or more tagged outputs per item.
pub mod node;

/// Per-resource request dispatchers.
///
/// One module per GitLab resource family, each decoding the generic
/// parameter bag into a typed operation and building the request spec for
/// it.
pub mod resources;

/// The authenticated HTTP transport and pagination driver.
///
/// Issues exactly one call per invocation against `{server}/api/v4`,
/// translating failures into typed API errors.
pub mod client;

/// The credential record, project-base builder and store seam.
pub mod credentials;

/// The per-item parameter bag with typed accessors.
pub mod params;

/// Request specifications, HTTP methods, list options and path encoding.
pub mod request;

/// Page cursor and pagination signal strategies.
pub mod pagination;

/// Parameter guards invoked before any network call.
pub mod validators;

/// The crate's error taxonomy.
pub mod error;

pub use client::{ApiResponse, GitLabClient, TokenScheme};
pub use credentials::{Credential, CredentialStore, CREDENTIAL_TYPE};
pub use error::{ApiError, Error, Result};
pub use node::{GitLabNode, NodeOutput};
pub use pagination::{PageCursor, PageStrategy};
pub use params::ItemParams;

/// Crate version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
