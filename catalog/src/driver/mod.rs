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

//! Business logic for the service.

use crate::db;
use crate::model::PublisherId;
use games_library_core::db::{Db, DbError, Executor};
use games_library_core::driver::{DriverError, DriverResult};
use games_library_core::model::FieldErrors;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

mod games;
mod publishers;
#[cfg(test)]
mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Returns a function that converts a database error raised while operating on the entity named
/// `what` and identified by `id` into a driver error with a user-facing message.
fn entity_error<I>(what: &'static str, id: I) -> impl FnOnce(DbError) -> DriverError
where
    I: fmt::Display,
{
    move |e| match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(format!("{} already exists.", what)),
        DbError::NotFound => {
            DriverError::NotFound(format!("{} with given ID({}) not found.", what, id))
        }
        e => DriverError::from(e),
    }
}

/// Returns a function that converts a database error raised while creating an entity named
/// `what` into a driver error with a user-facing message.
fn create_error(what: &'static str) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::AlreadyExists => DriverError::AlreadyExists(format!("{} already exists.", what)),
        e => DriverError::from(e),
    }
}

/// Verifies that all `publishers`, if any, exist and returns a field error for each one that
/// does not.
async fn check_publishers(
    ex: &mut Executor,
    publishers: Option<&[PublisherId]>,
) -> DriverResult<FieldErrors> {
    let mut errors = FieldErrors::default();
    let publishers: BTreeSet<PublisherId> =
        publishers.unwrap_or_default().iter().copied().collect();
    for id in publishers {
        if !db::publisher_exists(ex, id).await? {
            errors.add("publisher", format!("Invalid pk \"{}\" - object does not exist.", id));
        }
    }
    Ok(errors)
}
