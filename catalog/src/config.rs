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


//! Service configuration read from the environment.

#[cfg(feature = "postgres")]
use games_library_core::db::postgres::{PostgresDb, PostgresOptions};
#[cfg(feature = "sqlite")]
use games_library_core::db::sqlite;
use games_library_core::db::{Db, DbResult};
use games_library_core::env::get_optional_var;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Name of the backend to use when none is configured.
const DEFAULT_BACKEND: &str = "postgres";

/// Path to the SQLite database when none is configured.
#[cfg(feature = "sqlite")]
const DEFAULT_SQLITE_PATH: &str = "games.db";

/// Database in which to persist the catalog.
#[derive(Debug)]
pub enum Backend {
    /// A PostgreSQL server reached with the given options.
    #[cfg(feature = "postgres")]
    Postgres(PostgresOptions),

    /// A SQLite database stored at the given path.
    #[cfg(feature = "sqlite")]
    Sqlite(String),
}

impl Backend {
    /// Establishes the connection to the database described by this backend.
    pub async fn connect(self) -> DbResult<Arc<dyn Db + Send + Sync>> {
        match self {
            #[cfg(feature = "postgres")]
            Backend::Postgres(opts) => Ok(Arc::new(PostgresDb::connect(opts)?)),

            #[cfg(feature = "sqlite")]
            Backend::Sqlite(path) => Ok(Arc::new(sqlite::connect(&path).await?)),
        }
    }
}

/// Runtime configuration of the service.
#[derive(Debug)]
pub struct Config {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Database to use.
    pub backend: Backend,
}

impl Config {
    /// Initializes the configuration from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use `<prefix>_PORT`, `<prefix>_BIND_ALL`, `<prefix>_DB_BACKEND` and
    /// `<prefix>_SQLITE_PATH`.  The PostgreSQL backend takes its connection details from the
    /// `PGSQL_PROD_*` variables.
    pub fn from_env(prefix: &str) -> Result<Config, String> {
        let port = get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT);
        let ip = if get_optional_var::<bool>(prefix, "BIND_ALL")?.unwrap_or(false) {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };

        let backend = get_optional_var::<String>(prefix, "DB_BACKEND")?
            .unwrap_or_else(|| DEFAULT_BACKEND.to_owned());
        let backend = match backend.as_str() {
            #[cfg(feature = "postgres")]
            "postgres" => Backend::Postgres(PostgresOptions::from_env("PGSQL_PROD")?),

            #[cfg(feature = "sqlite")]
            "sqlite" => Backend::Sqlite(
                get_optional_var::<String>(prefix, "SQLITE_PATH")?
                    .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_owned()),
            ),

            other => {
                return Err(format!(
                    "Unsupported database backend {} in {}_DB_BACKEND",
                    other, prefix
                ));
            }
        };

        Ok(Config { bind_addr: SocketAddr::from((ip, port)), backend })
    }
}
