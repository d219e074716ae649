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


//! Entry point to the games catalog service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use games_library::config::Config;
use games_library::db::init_schema;
use games_library::serve;
use log::error;
use std::error::Error;
use std::process;

/// Connects to the configured database, prepares its schema and serves requests until failure.
async fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env("GAMES")?;
    let db = config.backend.connect().await?;
    init_schema(&mut db.ex().await?).await?;
    serve(config.bind_addr, db).await
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}
