//
//  gitlab-node
//  resources/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pipeline operations: create, get, list, jobs, cancel, retry, delete and
//! artifact download. Every pipeline ID is validated positive before the
//! endpoint is built.

use crate::error::{Error, Result};
use crate::params::ItemParams;
use crate::request::{HttpMethod, ListOptions, RequestSpec};
use crate::validators::require_positive;

/// A decoded pipeline operation.
#[derive(Debug, Clone)]
pub enum PipelineOperation {
    /// Trigger a new pipeline for a ref.
    Create { ref_name: String },
    /// Get one pipeline.
    Get { pipeline_id: i64 },
    /// List pipelines.
    GetAll { options: ListOptions },
    /// List the jobs of a pipeline.
    GetJobs {
        pipeline_id: i64,
        options: ListOptions,
    },
    /// Cancel a running pipeline.
    Cancel { pipeline_id: i64 },
    /// Retry a failed pipeline.
    Retry { pipeline_id: i64 },
    /// Delete a pipeline.
    Delete { pipeline_id: i64 },
    /// Download the artifacts archive for a ref.
    DownloadArtifacts {
        pipeline_id: i64,
        ref_name: String,
    },
}

impl PipelineOperation {
    /// Decodes the operation for one item from its parameter bag.
    pub fn from_params(params: &ItemParams) -> Result<Self> {
        let index = params.index();
        let pipeline_id = || -> Result<i64> {
            let id = params.integer("pipelineId");
            require_positive(id, "pipelineId", index)?;
            Ok(id)
        };

        match params.operation().as_str() {
            "create" => Ok(Self::Create {
                ref_name: params.string_or("pipelineRef", "main"),
            }),
            "get" => Ok(Self::Get {
                pipeline_id: pipeline_id()?,
            }),
            "getAll" => Ok(Self::GetAll {
                options: ListOptions::from_params(params),
            }),
            "getJobs" => Ok(Self::GetJobs {
                pipeline_id: pipeline_id()?,
                options: ListOptions::from_params(params),
            }),
            "cancel" => Ok(Self::Cancel {
                pipeline_id: pipeline_id()?,
            }),
            "retry" => Ok(Self::Retry {
                pipeline_id: pipeline_id()?,
            }),
            "delete" => Ok(Self::Delete {
                pipeline_id: pipeline_id()?,
            }),
            "downloadArtifacts" => Ok(Self::DownloadArtifacts {
                pipeline_id: pipeline_id()?,
                ref_name: params.string_or("pipelineRef", "main"),
            }),
            other => Err(Error::unsupported("pipeline", other, index)),
        }
    }

    /// Builds the request spec against a project base path.
    pub fn into_spec(self, base: &str) -> RequestSpec {
        match self {
            Self::Create { ref_name } => {
                RequestSpec::new(HttpMethod::Post, format!("{base}/pipeline"))
                    .body("ref", ref_name)
            }
            Self::Get { pipeline_id } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/pipelines/{pipeline_id}"))
            }
            Self::GetAll { options } => {
                RequestSpec::new(HttpMethod::Get, format!("{base}/pipelines")).listing(options)
            }
            Self::GetJobs {
                pipeline_id,
                options,
            } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/pipelines/{pipeline_id}/jobs"),
            )
            .listing(options),
            Self::Cancel { pipeline_id } => RequestSpec::new(
                HttpMethod::Post,
                format!("{base}/pipelines/{pipeline_id}/cancel"),
            ),
            Self::Retry { pipeline_id } => RequestSpec::new(
                HttpMethod::Post,
                format!("{base}/pipelines/{pipeline_id}/retry"),
            ),
            Self::Delete { pipeline_id } => RequestSpec::new(
                HttpMethod::Delete,
                format!("{base}/pipelines/{pipeline_id}"),
            ),
            Self::DownloadArtifacts {
                pipeline_id,
                ref_name,
            } => RequestSpec::new(
                HttpMethod::Get,
                format!("{base}/pipelines/{pipeline_id}/jobs/artifacts/{ref_name}/download"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(values: serde_json::Value) -> ItemParams {
        ItemParams::from_value(0, values)
    }

    #[test]
    fn test_create_posts_ref() {
        let spec = PipelineOperation::from_params(&params(json!({
            "operation": "create", "pipelineRef": "develop",
        })))
        .unwrap()
        .into_spec("/projects/1");

        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.endpoint, "/projects/1/pipeline");
        assert_eq!(spec.body.get("ref"), Some(&json!("develop")));
    }

    #[test]
    fn test_id_operations_validate_positivity() {
        for operation in ["get", "cancel", "retry", "delete", "getJobs", "downloadArtifacts"] {
            for bad in [0, -3] {
                let err = PipelineOperation::from_params(&params(json!({
                    "operation": operation, "pipelineId": bad,
                })))
                .unwrap_err();
                assert!(
                    err.to_string().contains("pipelineId"),
                    "missing field name for {operation}"
                );
            }
        }
    }

    #[test]
    fn test_cancel_and_retry_endpoints() {
        let spec = PipelineOperation::from_params(&params(json!({
            "operation": "cancel", "pipelineId": 5,
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/pipelines/5/cancel");
        assert_eq!(spec.method, HttpMethod::Post);

        let spec = PipelineOperation::from_params(&params(json!({
            "operation": "retry", "pipelineId": 5,
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/pipelines/5/retry");
    }

    #[test]
    fn test_download_artifacts_inserts_ref_as_given() {
        let spec = PipelineOperation::from_params(&params(json!({
            "operation": "downloadArtifacts", "pipelineId": 9, "pipelineRef": "main",
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(
            spec.endpoint,
            "/projects/1/pipelines/9/jobs/artifacts/main/download"
        );
    }

    #[test]
    fn test_get_jobs_lists_with_limit() {
        let spec = PipelineOperation::from_params(&params(json!({
            "operation": "getJobs", "pipelineId": 2, "limit": 5,
        })))
        .unwrap()
        .into_spec("/projects/1");
        assert_eq!(spec.endpoint, "/projects/1/pipelines/2/jobs");
        assert_eq!(spec.query.get("per_page"), Some(&json!(5)));
    }
}
