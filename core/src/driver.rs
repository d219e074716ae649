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

//! Generic business logic for any service.
//!
//! Every service should implement its own `Driver` type wrapping the database it uses for
//! persistence.  The definition will look like this:
//!
//! ```rust
//! use games_library_core::db::Db;
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! pub(crate) struct Driver {
//!     /// The database that the driver uses for persistence.
//!     db: Arc<dyn Db + Send + Sync>,
//!
//!     // ... other fields here ...
//! }
//! ```
//!
//! Every operation implemented in the `Driver` should take consume `self` because this is the
//! layer that coordinates multiple operations against the database inside a single transaction.
//! Consuming `self` prevents the caller from easily issuing multiple operations against the driver,
//! as this would require a clone and highlight an undesirable pattern.

use crate::db::DbError;
use crate::model::FieldErrors;

/// Business logic errors.  These errors encompass backend and logical errors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// Indicates that a request to create or modify an entry failed because it would collide
    /// with an existing one.
    #[error("{0}")]
    AlreadyExists(String),

    /// Catch-all error type for unexpected database errors.
    #[error("{0}")]
    BackendError(String),

    /// Indicates an error in the input data.
    #[error("{0}")]
    InvalidInput(String),

    /// Indicates that one or more fields of an entity failed validation.
    #[error("Invalid {what}: {errors}")]
    InvalidFields {
        /// Name of the entity that was being validated.
        what: &'static str,

        /// Per-field validation failures.
        errors: FieldErrors,
    },

    /// Indicates that a requested entry does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<DbError> for DriverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(e.to_string()),
            DbError::BackendError(_) => DriverError::BackendError(e.to_string()),
            DbError::DataIntegrityError(_) => DriverError::BackendError(e.to_string()),
            DbError::NotFound => DriverError::NotFound(e.to_string()),
            DbError::Unavailable => DriverError::BackendError(e.to_string()),
        }
    }
}

/// Result type for this module.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_db_error() {
        assert_eq!(
            DriverError::AlreadyExists("Already exists".to_owned()),
            DriverError::from(DbError::AlreadyExists)
        );
        assert_eq!(
            DriverError::BackendError("Database error: boom".to_owned()),
            DriverError::from(DbError::BackendError("boom".to_owned()))
        );
        assert_eq!(
            DriverError::BackendError("Unavailable".to_owned()),
            DriverError::from(DbError::Unavailable)
        );
        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            DriverError::from(DbError::NotFound)
        );
    }

    #[test]
    fn test_invalid_fields_display() {
        let mut errors = FieldErrors::default();
        errors.add("name", "This field may not be blank.");
        errors.add("website", "Enter a valid URL.");
        let e = DriverError::InvalidFields { what: "publisher", errors };
        assert_eq!(
            "Invalid publisher: name: This field may not be blank.; website: Enter a valid URL.",
            e.to_string()
        );
    }
}
