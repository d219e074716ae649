// Games Library
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Errors to report invalid domain data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error raised when a single value fails validation.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Collection of validation failures keyed by the name of the offending field.
///
/// Fields are kept sorted so that error messages are stable across runs.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Records that `field` failed validation because of `reason`.
    pub fn add<F: Into<String>, R: Into<String>>(&mut self, field: F, reason: R) {
        self.0.entry(field.into()).or_default().push(reason.into());
    }

    /// Returns true if no failures have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the reasons recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Moves all failures recorded in `other` into `self`.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, reasons) in other.0 {
            self.0.entry(field).or_default().extend(reasons);
        }
    }

    /// Returns `value` if no failures have been recorded or `self` otherwise.
    pub fn check<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Stores the value of `result` into `slot` or records its failure against `field`.
    pub fn collect<T>(&mut self, field: &str, result: ModelResult<T>, slot: &mut Option<T>) {
        match result {
            Ok(value) => *slot = Some(value),
            Err(e) => self.add(field, e.0),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reasons) in &self.0 {
            for reason in reasons {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, reason)?;
                first = false;
            }
        }
        Ok(())
    }
}
