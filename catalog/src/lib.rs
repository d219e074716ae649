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


//! REST service that exposes a catalog of video games and their publishers.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use games_library_core::db::Db;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod config;
pub mod db;
pub mod driver;
pub(crate) mod model;
mod rest;
use driver::Driver;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr` backed by `db`.
///
/// The schema of `db` must have been initialized already.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db);
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
