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

//! Common utilities to interact with a PostgreSQL database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use crate::env::{get_optional_var, get_required_var};
use async_trait::async_trait;
use derivative::Derivative;
use log::warn;
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{
    PgConnectOptions, PgConnection, PgDatabaseError, PgPool, PgPoolOptions, Postgres,
};
use std::time::Duration;

/// Maximum amount of time to wait for a connection to become available in the pool.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::Database(e) => match e.try_downcast_ref::<PgDatabaseError>() {
            Some(pg) => match pg.code() {
                "23503" /* foreign_key_violation */ => DbError::NotFound,
                "23505" /* unique_violation */ => DbError::AlreadyExists,
                "53300" /* too_many_connections */ => DbError::Unavailable,
                number => DbError::BackendError(format!("pgsql error {}: {}", number, e)),
            },
            None => DbError::BackendError(e.to_string()),
        },
        sqlx::Error::PoolTimedOut => DbError::Unavailable,
        sqlx::Error::RowNotFound => DbError::NotFound,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Options to establish a connection to a PostgreSQL database.
#[derive(Derivative)]
#[derivative(Debug, Default)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct PostgresOptions {
    /// Host to connect to.
    pub host: String,

    /// Port to connect to (typically 5432).
    pub port: u16,

    /// Database name to connect to.
    pub database: String,

    /// Username to establish the connection with.
    pub username: String,

    /// Password to establish the connection with.
    #[derivative(Debug = "ignore")]
    pub password: String,

    /// Minimum number of connections to keep open against the database.
    pub min_connections: Option<u32>,

    /// Maximum number of connections to allow against the database.
    pub max_connections: Option<u32>,
}

impl PostgresOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_HOST`, `<prefix>_PORT`, `<prefix>_DATABASE`,
    /// `<prefix>_USERNAME`, `<prefix>_PASSWORD`, `<prefix>_MIN_CONNECTIONS` and
    /// `<prefix>_MAX_CONNECTIONS`.
    pub fn from_env(prefix: &str) -> Result<PostgresOptions, String> {
        Ok(PostgresOptions {
            host: get_required_var::<String>(prefix, "HOST")?,
            port: get_required_var::<u16>(prefix, "PORT")?,
            database: get_required_var::<String>(prefix, "DATABASE")?,
            username: get_required_var::<String>(prefix, "USERNAME")?,
            password: get_required_var::<String>(prefix, "PASSWORD")?,
            min_connections: get_optional_var::<u32>(prefix, "MIN_CONNECTIONS")?,
            max_connections: get_optional_var::<u32>(prefix, "MAX_CONNECTIONS")?,
        })
    }
}

/// A database executor for PostgreSQL backed by either a pooled connection or a transaction.
#[derive(Debug)]
pub enum PostgresExecutor {
    /// An executor backed by a connection.
    PoolExec(PoolConnection<Postgres>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Postgres>),
}

impl PostgresExecutor {
    /// Returns the raw connection to pass to `sqlx` queries.
    pub fn conn(&mut self) -> &mut PgConnection {
        match self {
            PostgresExecutor::PoolExec(conn) => &mut **conn,
            PostgresExecutor::TxExec(tx) => &mut **tx,
        }
    }

    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            PostgresExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            PostgresExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// Shareable connection across transactions.
pub struct PostgresDb {
    /// Shared PostgreSQL connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: PgPool,
}

impl Drop for PostgresDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

impl PostgresDb {
    /// Creates a new connection based on a set of options.
    ///
    /// Note that this does *not* establish the connection.
    pub fn connect(opts: PostgresOptions) -> DbResult<Self> {
        let mut pool_options = PgPoolOptions::new();
        if let Some(min_connections) = opts.min_connections {
            pool_options = pool_options.min_connections(min_connections);
        }
        if let Some(max_connections) = opts.max_connections {
            pool_options = pool_options.max_connections(max_connections);
        }
        pool_options = pool_options.acquire_timeout(ACQUIRE_TIMEOUT);

        let options = PgConnectOptions::new()
            .host(&opts.host)
            .port(opts.port)
            .database(&opts.database)
            .username(&opts.username)
            .password(&opts.password);

        let pool = pool_options.connect_lazy_with(options);
        Ok(Self { pool })
    }

    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<PostgresExecutor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(PostgresExecutor::PoolExec(conn))
    }
}

#[async_trait]
impl Db for PostgresDb {
    async fn ex(&self) -> DbResult<Executor> {
        let ex = self.typed_ex().await?;
        Ok(Executor::Postgres(ex))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Postgres(PostgresExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` may contain multiple statements, which are sent in a single round trip.
pub async fn run_schema(e: &mut PostgresExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the PostgreSQL connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Creates a new connection to the test database and initializes it.
    ///
    /// This sets up the database to use the `pg_temp` schema by default so that any tables
    /// created during the test are deleted at disconnection time.  Note that for this to work,
    /// the connection pool must maintain a single connection open at all times, but not more.
    ///
    /// Given that this is for testing purposes only, any errors will panic.
    pub async fn setup() -> PostgresDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let mut opts = PostgresOptions::from_env("PGSQL_TEST").unwrap();
        opts.min_connections = Some(1);
        opts.max_connections = Some(1);
        let db = PostgresDb::connect(opts).unwrap();

        let mut ex = db.typed_ex().await.unwrap();
        sqlx::query("SET search_path TO pg_temp").execute(ex.conn()).await.unwrap();
        db
    }
}
