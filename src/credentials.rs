//
//  gitlab-node
//  credentials.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Credentials
//!
//! The credential record consumed by the node, the project-base path builder
//! derived from it, and the [`CredentialStore`] seam through which the host
//! runtime supplies stored credentials.
//!
//! A credential identifies the target project either by numeric ID or by the
//! `owner/name` pair. The numeric ID always wins when set. Credentials are
//! resolved fresh for every input item and never cached across items.
//!
//! # Example
//!
//! ```rust
//! use gitlab_node::Credential;
//!
//! let cred = Credential {
//!     server: "https://gitlab.com".to_string(),
//!     access_token: "glpat-secret".to_string(),
//!     project_owner: "group/sub".to_string(),
//!     project_name: "my repo".to_string(),
//!     project_id: 0,
//! };
//!
//! assert_eq!(cred.project_base(), "/projects/group%2Fsub%2Fmy%20repo");
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::encode_path;

/// Credential type name used when looking up stored credentials in the host.
pub const CREDENTIAL_TYPE: &str = "gitlabApi";

/// The persisted credential record shape.
///
/// Field names follow the host's camelCase convention so the record can be
/// decoded directly from stored credential data or from inline override
/// parameters.
///
/// # Invariant
///
/// Either `project_id` is non-zero, or both `project_owner` and
/// `project_name` are non-empty. [`Credential::assert_project`] checks this
/// before any request building.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credential {
    /// Base URL of the GitLab instance, for example `https://gitlab.com`.
    pub server: String,

    /// Personal access token with API permissions.
    pub access_token: String,

    /// Namespace or owner of the project. Ignored if `project_id` is set.
    pub project_owner: String,

    /// Project slug or name. Ignored if `project_id` is set.
    pub project_name: String,

    /// Numeric project ID. Takes precedence over owner and name. Zero means
    /// unset, mirroring the stored record's default.
    pub project_id: u64,
}

impl Credential {
    /// Ensures the credential contains enough information to identify a
    /// project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when neither a numeric project ID nor a
    /// complete owner/name pair is present.
    pub fn assert_project(&self) -> Result<()> {
        if self.project_id == 0 && (self.project_owner.is_empty() || self.project_name.is_empty()) {
            return Err(Error::Credential(
                "Credentials must include either projectId or both projectOwner and projectName"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the REST path prefix for the project.
    ///
    /// A non-zero numeric ID produces `/projects/{id}`. Otherwise the owner
    /// and name are each percent-encoded and joined with the literal `%2F`
    /// sequence, GitLab's escaping convention for the combined
    /// `namespace/name` identifier.
    pub fn project_base(&self) -> String {
        if self.project_id != 0 {
            format!("/projects/{}", self.project_id)
        } else {
            format!(
                "/projects/{}%2F{}",
                encode_path(&self.project_owner),
                encode_path(&self.project_name)
            )
        }
    }

    /// Derives the API base URL: the server with one trailing slash stripped,
    /// followed by `/api/v4`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when the server URL is missing or does
    /// not parse as a URL.
    pub fn api_base(&self) -> Result<String> {
        if self.server.is_empty() {
            return Err(Error::Credential(
                "GitLab server URL is missing in credentials".to_string(),
            ));
        }
        let host = self.server.strip_suffix('/').unwrap_or(&self.server);
        url::Url::parse(host).map_err(|_| {
            Error::Credential(format!("GitLab server URL is not a valid URL: {host}"))
        })?;
        Ok(format!("{host}/api/v4"))
    }
}

/// Host-supplied lookup for stored credentials.
///
/// The node asks the store for the credential registered under
/// [`CREDENTIAL_TYPE`] whenever an item does not carry inline overrides.
/// Implementations typically delegate to the host runtime's credential
/// vault; tests use a fixed in-memory record.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use gitlab_node::{Credential, CredentialStore, Result};
///
/// struct FixedStore(Credential);
///
/// #[async_trait]
/// impl CredentialStore for FixedStore {
///     async fn get(&self, _credential_type: &str) -> Result<Credential> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetches the stored credential registered under the given type name.
    async fn get(&self, credential_type: &str) -> Result<Credential>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential {
            server: "https://gitlab.example.com".to_string(),
            access_token: "token".to_string(),
            project_owner: "owner".to_string(),
            project_name: "repo".to_string(),
            project_id: 0,
        }
    }

    #[test]
    fn test_project_base_prefers_numeric_id() {
        let cred = Credential {
            project_id: 42,
            ..credential()
        };
        assert_eq!(cred.project_base(), "/projects/42");
    }

    #[test]
    fn test_project_base_joins_with_literal_separator() {
        assert_eq!(credential().project_base(), "/projects/owner%2Frepo");
    }

    #[test]
    fn test_project_base_encodes_each_side_independently() {
        let cred = Credential {
            project_owner: "group/sub".to_string(),
            project_name: "my repo".to_string(),
            ..credential()
        };
        assert_eq!(cred.project_base(), "/projects/group%2Fsub%2Fmy%20repo");

        let cred = Credential {
            project_owner: "a&b".to_string(),
            project_name: "c#d".to_string(),
            ..credential()
        };
        assert_eq!(cred.project_base(), "/projects/a%26b%2Fc%23d");
    }

    #[test]
    fn test_numeric_id_wins_over_owner_and_name() {
        let cred = Credential {
            project_id: 7,
            project_owner: "anything/at all".to_string(),
            project_name: "whatever".to_string(),
            ..credential()
        };
        assert_eq!(cred.project_base(), "/projects/7");
    }

    #[test]
    fn test_assert_project_requires_id_or_pair() {
        assert!(credential().assert_project().is_ok());

        let missing_name = Credential {
            project_name: String::new(),
            ..credential()
        };
        assert!(missing_name.assert_project().is_err());

        let id_only = Credential {
            project_id: 1,
            project_owner: String::new(),
            project_name: String::new(),
            ..credential()
        };
        assert!(id_only.assert_project().is_ok());
    }

    #[test]
    fn test_api_base_strips_one_trailing_slash() {
        let cred = Credential {
            server: "https://gitlab.example.com/".to_string(),
            ..credential()
        };
        assert_eq!(
            cred.api_base().unwrap(),
            "https://gitlab.example.com/api/v4"
        );
    }

    #[test]
    fn test_api_base_rejects_missing_server() {
        let cred = Credential {
            server: String::new(),
            ..credential()
        };
        assert!(cred.api_base().is_err());
    }

    #[test]
    fn test_credential_decodes_camel_case() {
        let cred: Credential = serde_json::from_value(serde_json::json!({
            "server": "https://gitlab.com",
            "accessToken": "t",
            "projectOwner": "o",
            "projectName": "n",
            "projectId": 3,
        }))
        .unwrap();
        assert_eq!(cred.access_token, "t");
        assert_eq!(cred.project_id, 3);
    }
}
