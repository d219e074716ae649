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

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use async_trait::async_trait;
use log::warn;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool,
    SqlitePoolOptions,
};
use sqlx::Transaction;
use std::str::FromStr;
use std::time::Duration;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Maximum amount of time a connection waits for a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns true if `conn_str` names a database that lives only in memory.
fn is_in_memory(conn_str: &str) -> bool {
    conn_str == ":memory:" || conn_str.contains("mode=memory")
}

/// Opens the database at `conn_str`, creating it if it does not exist yet.
///
/// Use `:memory:` to get a fresh in-memory database.  Foreign keys are always enforced.
///
/// Databases stored in a file run in WAL mode behind a single pooled connection, so concurrent
/// transactions queue on the pool instead of failing with `SQLITE_BUSY` when they upgrade from
/// reading to writing.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let mut options = SqliteConnectOptions::from_str(conn_str)
        .map_err(map_sqlx_error)?
        .create_if_missing(true)
        .foreign_keys(true);
    let mut pool_options = SqlitePoolOptions::new();
    if !is_in_memory(conn_str) {
        options = options.journal_mode(SqliteJournalMode::Wal).busy_timeout(BUSY_TIMEOUT);
        pool_options = pool_options.max_connections(1);
    }
    let pool = pool_options.connect_with(options).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A database executor for SQLite backed by either a pooled connection or a transaction.
#[derive(Debug)]
pub enum SqliteExecutor {
    /// An executor backed by a pool.  Operations issued via this executor aren't guaranteed to
    /// happen on the same connection.
    PoolExec(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl SqliteExecutor {
    /// Returns the raw connection to pass to `sqlx` queries.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            SqliteExecutor::PoolExec(conn) => &mut **conn,
            SqliteExecutor::TxExec(tx) => &mut **tx,
        }
    }

    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            SqliteExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            SqliteExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Sqlite(SqliteExecutor::PoolExec(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(SqliteExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}
