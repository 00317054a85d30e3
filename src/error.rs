//
//  gitlab-node
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Error Types
//!
//! This module defines the error taxonomy for the GitLab node:
//!
//! - **Validation errors**: a parameter failed a guard (empty string,
//!   non-positive ID, malformed JSON, missing discussion ID). Raised while
//!   decoding parameters, always before any network call, and always carrying
//!   the item index that produced them.
//! - **Unsupported operation / unknown resource**: the resource + operation
//!   pair is not part of the dispatch table.
//! - **Credential errors**: the resolved credential is unusable (missing
//!   server URL, missing token, no viable project identifier).
//! - **API errors**: the single surface for transport failures, carrying the
//!   best available diagnostic from the server.
//!
//! There are no automatic retries anywhere in this crate; every failure is
//! surfaced to the caller on first occurrence.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Diagnostic payload for a failed GitLab API call.
///
/// When the server answered with an error payload, that payload (stringified
/// if it was not already a string) becomes both the `message` and the
/// `description`. When the failure happened below the HTTP layer (DNS,
/// connect, TLS), only the transport error's own message is available and
/// `description` is `None`.
///
/// # Example
///
/// ```rust
/// use gitlab_node::ApiError;
///
/// let err = ApiError::from_payload(r#"{"message":"404 Project Not Found"}"#.to_string());
/// assert_eq!(err.message, err.description.clone().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Human-readable diagnostic for the failure.
    pub message: String,

    /// Raw response payload, when the server produced one.
    pub description: Option<String>,
}

impl ApiError {
    /// Builds an error from a structured response payload.
    ///
    /// The payload doubles as the message so callers that only look at the
    /// message still see the server's diagnostic.
    pub fn from_payload(payload: String) -> Self {
        Self {
            message: payload.clone(),
            description: Some(payload),
        }
    }

    /// Builds an error from a transport failure that carried no payload.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            description: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Error type for all node operations.
///
/// Validation and dispatch errors carry the index of the input item being
/// processed so batch callers can point at the offending item.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter failed validation before any request was built.
    #[error("'{field}' {message} (item {item_index})")]
    Validation {
        /// Name of the offending parameter.
        field: String,
        /// Index of the input item being processed.
        item_index: usize,
        /// What the parameter failed to satisfy.
        message: String,
    },

    /// The operation is not recognized for the given resource.
    #[error("the operation \"{operation}\" is not supported for resource \"{resource}\" (item {item_index})")]
    UnsupportedOperation {
        resource: String,
        operation: String,
        item_index: usize,
    },

    /// The resource name itself is not recognized.
    #[error("unknown resource \"{resource}\" (item {item_index})")]
    UnknownResource { resource: String, item_index: usize },

    /// The resolved credential cannot be used to reach a GitLab instance.
    #[error("{0}")]
    Credential(String),

    /// A GitLab API call failed. The only place network failures surface.
    #[error("GitLab API request failed: {0}")]
    Api(ApiError),
}

impl Error {
    /// Creates a validation error naming the parameter and item index.
    pub fn validation(field: &str, item_index: usize, message: &str) -> Self {
        Error::Validation {
            field: field.to_string(),
            item_index,
            message: message.to_string(),
        }
    }

    /// Creates an unsupported-operation error for a resource + operation pair.
    pub fn unsupported(resource: &str, operation: &str, item_index: usize) -> Self {
        Error::UnsupportedOperation {
            resource: resource.to_string(),
            operation: operation.to_string(),
            item_index,
        }
    }

    /// Creates an unknown-resource error.
    pub fn unknown_resource(resource: &str, item_index: usize) -> Self {
        Error::UnknownResource {
            resource: resource.to_string(),
            item_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field_and_index() {
        let err = Error::validation("pipelineId", 3, "must be a positive number");
        let text = err.to_string();
        assert!(text.contains("pipelineId"));
        assert!(text.contains("item 3"));
    }

    #[test]
    fn test_api_error_from_payload_mirrors_description() {
        let err = ApiError::from_payload("boom".to_string());
        assert_eq!(err.message, "boom");
        assert_eq!(err.description.as_deref(), Some("boom"));
    }

    #[test]
    fn test_api_error_from_message_has_no_description() {
        let err = ApiError::from_message("connection refused");
        assert_eq!(err.message, "connection refused");
        assert!(err.description.is_none());
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = Error::unsupported("branch", "teleport", 0);
        assert_eq!(
            err.to_string(),
            "the operation \"teleport\" is not supported for resource \"branch\" (item 0)"
        );
    }
}
