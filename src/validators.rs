//
//  gitlab-node
//  validators.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Parameter Validators
//!
//! Two pure guards used by the request dispatchers before any network call:
//! [`require_string`] for fields that must not be empty and
//! [`require_positive`] for ID-typed path parameters. Both fail with a
//! validation error that names the offending field and the index of the item
//! being processed.

use crate::error::{Error, Result};

/// Ensures the given string value is not empty.
///
/// # Parameters
///
/// * `value` - The parameter value to check
/// * `field` - The parameter name used in the error message
/// * `item_index` - Index of the input item being processed
///
/// # Errors
///
/// Returns [`Error::Validation`] naming `field` and `item_index` when the
/// value is empty.
///
/// # Example
///
/// ```rust
/// use gitlab_node::validators::require_string;
///
/// assert!(require_string("main", "branch", 0).is_ok());
/// assert!(require_string("", "branch", 0).is_err());
/// ```
pub fn require_string(value: &str, field: &str, item_index: usize) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, item_index, "must not be empty"));
    }
    Ok(())
}

/// Ensures the given numeric value is positive.
///
/// Zero and negative values are both rejected; every ID-typed path parameter
/// (pipeline ID, issue IID, merge request IID, note ID, group ID, project ID)
/// goes through this guard before an endpoint is built.
///
/// # Parameters
///
/// * `value` - The parameter value to check
/// * `field` - The parameter name used in the error message
/// * `item_index` - Index of the input item being processed
///
/// # Errors
///
/// Returns [`Error::Validation`] naming `field` and `item_index` when the
/// value is zero or negative.
///
/// # Example
///
/// ```rust
/// use gitlab_node::validators::require_positive;
///
/// assert!(require_positive(42, "pipelineId", 0).is_ok());
/// assert!(require_positive(0, "pipelineId", 0).is_err());
/// assert!(require_positive(-7, "pipelineId", 0).is_err());
/// ```
pub fn require_positive(value: i64, field: &str, item_index: usize) -> Result<()> {
    if value <= 0 {
        return Err(Error::validation(
            field,
            item_index,
            "must be a positive number",
        ));
    }
    Ok(())
}
