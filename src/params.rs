//
//  gitlab-node
//  params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Item Parameters
//!
//! The host runtime resolves node parameters per input item and hands them
//! over as a JSON object keyed by parameter name. [`ItemParams`] wraps one
//! such bag together with the item's index and provides typed accessors with
//! the same fallback semantics the host applies for absent values: a missing
//! string is empty, a missing boolean is `false`, a missing number is `0`,
//! unless the accessor is given an explicit default.
//!
//! Decoding from this bag happens exactly once per item, at the dispatch
//! boundary; everything downstream works with fully typed operation records.
//!
//! # Example
//!
//! ```rust
//! use gitlab_node::ItemParams;
//! use serde_json::json;
//!
//! let params = ItemParams::from_value(0, json!({
//!     "resource": "branch",
//!     "operation": "rename",
//!     "branch": "old",
//!     "newBranch": "new",
//! }));
//!
//! assert_eq!(params.string("branch"), "old");
//! assert_eq!(params.string_or("ref", "main"), "main");
//! assert!(!params.boolean("returnAll"));
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One input item's resolved parameters.
#[derive(Debug, Clone, Default)]
pub struct ItemParams {
    index: usize,
    values: Map<String, Value>,
}

impl ItemParams {
    /// Creates a parameter bag from a JSON object map.
    pub fn new(index: usize, values: Map<String, Value>) -> Self {
        Self { index, values }
    }

    /// Creates a parameter bag from any JSON value.
    ///
    /// Non-object values produce an empty bag; every accessor then returns
    /// its fallback.
    pub fn from_value(index: usize, value: Value) -> Self {
        match value {
            Value::Object(values) => Self { index, values },
            _ => Self {
                index,
                values: Map::new(),
            },
        }
    }

    /// Index of this item within the input batch.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The selected resource name (empty when absent).
    pub fn resource(&self) -> String {
        self.string("resource")
    }

    /// The selected operation name (empty when absent).
    pub fn operation(&self) -> String {
        self.string("operation")
    }

    /// Raw access to a parameter value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads a string parameter, falling back to the empty string.
    pub fn string(&self, name: &str) -> String {
        self.string_or(name, "")
    }

    /// Reads a string parameter with an explicit fallback.
    ///
    /// Numbers and booleans are rendered to their canonical string forms so
    /// hosts that hand over loosely typed values still resolve.
    pub fn string_or(&self, name: &str, fallback: &str) -> String {
        match self.values.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Reads an integer parameter, falling back to `0`.
    pub fn integer(&self, name: &str) -> i64 {
        self.integer_or(name, 0)
    }

    /// Reads an integer parameter with an explicit fallback.
    ///
    /// Accepts JSON numbers as well as numeric strings.
    pub fn integer_or(&self, name: &str, fallback: i64) -> i64 {
        match self.values.get(name) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(fallback),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(fallback),
            _ => fallback,
        }
    }

    /// Reads a boolean parameter, falling back to `false`.
    pub fn boolean(&self, name: &str) -> bool {
        self.boolean_or(name, false)
    }

    /// Reads a boolean parameter with an explicit fallback.
    pub fn boolean_or(&self, name: &str, fallback: bool) -> bool {
        match self.values.get(name) {
            Some(Value::Bool(b)) => *b,
            _ => fallback,
        }
    }

    /// Reads a free-form JSON parameter.
    ///
    /// JSON-typed parameters may arrive either as already-parsed values or as
    /// raw strings (for example when the host resolved them from an
    /// expression). Absent values and empty strings yield `None`; string
    /// values are parsed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the parameter when a string value
    /// is not valid JSON.
    pub fn json_value(&self, name: &str) -> Result<Option<Value>> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => serde_json::from_str(s)
                .map(Some)
                .map_err(|_| Error::validation(name, self.index, "must contain valid JSON")),
            Some(other) => Ok(Some(other.clone())),
        }
    }

    /// Reads a free-form JSON parameter that must be an object.
    ///
    /// Used for request bodies and query maps on the raw API operation.
    /// Absent values yield an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the value is malformed JSON or not
    /// a JSON object.
    pub fn json_object(&self, name: &str) -> Result<Map<String, Value>> {
        match self.json_value(name)? {
            None => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(Error::validation(name, self.index, "must be a JSON object")),
        }
    }
}
