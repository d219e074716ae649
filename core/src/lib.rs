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

//! Service plumbing shared by the Games Library crates.
//!
//! The catalog service is built in layers and this crate provides the generic half of each one:
//!
//! 1.  `model`: Error types to report invalid data.  `FieldErrors` collects per-field validation
//!     problems so that a client learns about all of them in a single round trip.
//!
//! 1.  `db`: The persistence layer.  Services write free functions that take an `Executor` and
//!     match on it to issue backend-specific queries.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type that wraps an
//!     injected `Db` and coordinates transactions.
//!
//! 1.  `rest`: The HTTP layer.  `RestError` knows how to render every error as a JSON body with
//!     the right status code.
//!
//! 1.  `env`: Helpers to gather configuration from environment variables.
//!
//! Errors float to the top of the app using the `?` operator and are translated to HTTP status
//! codes once they leave the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
