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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Publishers and games live in their own tables and are linked by `game_publishers`, which is
//! cleaned up automatically when either side of a link is deleted.  Games that lose all of their
//! publishers are not removed by the schema: `delete_orphan_games` must be called for that.

use crate::model::{Game, GameId, GameInfo, Publisher, PublisherId, PublisherInfo, Website};
#[cfg(feature = "postgres")]
use games_library_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use games_library_core::db::sqlite;
use games_library_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use std::collections::BTreeSet;
use time::Date;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Builds the details of a publisher from the raw values of a row.
fn build_publisher(
    id: i64,
    name: String,
    location: String,
    website: String,
) -> DbResult<Publisher> {
    Ok(Publisher::new(
        PublisherId::new(id),
        PublisherInfo::new(name, location, Website::new(website)?),
    ))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Publisher {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(postgres::map_sqlx_error)?;
        let website: String = row.try_get("website").map_err(postgres::map_sqlx_error)?;

        build_publisher(id, name, location, website)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Publisher {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(sqlite::map_sqlx_error)?;
        let website: String = row.try_get("website").map_err(sqlite::map_sqlx_error)?;

        build_publisher(id, name, location, website)
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Game {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let publishers: Vec<i64> = row.try_get("publishers").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let release_date: Date = row.try_get("release_date").map_err(postgres::map_sqlx_error)?;
        let genre: String = row.try_get("genre").map_err(postgres::map_sqlx_error)?;
        let on_windows: bool = row.try_get("on_windows").map_err(postgres::map_sqlx_error)?;
        let on_mac: bool = row.try_get("on_mac").map_err(postgres::map_sqlx_error)?;
        let on_linux: bool = row.try_get("on_linux").map_err(postgres::map_sqlx_error)?;

        Ok(Game::new(
            GameId::new(id),
            GameInfo::new(
                title,
                publishers.into_iter().map(PublisherId::new).collect(),
                description,
                release_date,
                genre,
                on_windows,
                on_mac,
                on_linux,
            ),
        ))
    }
}

/// Parses the comma-separated list of publisher identifiers produced by `GROUP_CONCAT`.
#[cfg(any(feature = "sqlite", test))]
fn parse_publisher_list(raw: Option<String>) -> DbResult<BTreeSet<PublisherId>> {
    let mut publishers = BTreeSet::default();
    for id in raw.as_deref().unwrap_or("").split(',').filter(|s| !s.is_empty()) {
        let id = id.parse::<i64>().map_err(|e| {
            DbError::DataIntegrityError(format!("Invalid publisher id {}: {}", id, e))
        })?;
        publishers.insert(PublisherId::new(id));
    }
    Ok(publishers)
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Game {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let publishers: Option<String> =
            row.try_get("publishers").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let release_date: Date = row.try_get("release_date").map_err(sqlite::map_sqlx_error)?;
        let genre: String = row.try_get("genre").map_err(sqlite::map_sqlx_error)?;
        let on_windows: bool = row.try_get("on_windows").map_err(sqlite::map_sqlx_error)?;
        let on_mac: bool = row.try_get("on_mac").map_err(sqlite::map_sqlx_error)?;
        let on_linux: bool = row.try_get("on_linux").map_err(sqlite::map_sqlx_error)?;

        Ok(Game::new(
            GameId::new(id),
            GameInfo::new(
                title,
                parse_publisher_list(publishers)?,
                description,
                release_date,
                genre,
                on_windows,
                on_mac,
                on_linux,
            ),
        ))
    }
}

/// Criteria to select publishers.
#[derive(Clone, Copy)]
enum PublisherFilter<'a> {
    /// Selects all publishers.
    All,

    /// Selects the publisher with the given identifier.
    Id(PublisherId),

    /// Selects the publishers based at exactly the given location.
    Location(&'a str),
}

/// Criteria to select games.
#[derive(Clone, Copy)]
enum GameFilter<'a> {
    /// Selects all games.
    All,

    /// Selects the game with the given identifier.
    Id(GameId),

    /// Selects the games of exactly the given genre.
    Genre(&'a str),

    /// Selects the games released by the given publisher.
    Publisher(PublisherId),
}

impl GameFilter<'_> {
    /// Returns the `WHERE` and `ORDER BY` clauses to apply to a query against the `games` table
    /// aliased as `g`, using `param` as the placeholder of the filter value.
    fn clauses(&self, param: &str) -> String {
        match self {
            GameFilter::All => "ORDER BY g.id".to_owned(),
            GameFilter::Id(_) => format!("WHERE g.id = {}", param),
            GameFilter::Genre(_) => format!("WHERE g.genre = {} ORDER BY g.id", param),
            GameFilter::Publisher(_) => format!(
                "WHERE g.id IN (SELECT game_id FROM game_publishers WHERE publisher_id = {}) \
                ORDER BY g.id",
                param
            ),
        }
    }
}

/// Fetches the publishers that match `filter` sorted by identifier.
async fn query_publishers(
    ex: &mut Executor,
    filter: PublisherFilter<'_>,
) -> DbResult<Vec<Publisher>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let rows = match filter {
                PublisherFilter::All => {
                    sqlx::query("SELECT * FROM publishers ORDER BY id").fetch_all(ex.conn()).await
                }
                PublisherFilter::Id(id) => {
                    sqlx::query("SELECT * FROM publishers WHERE id = $1")
                        .bind(id.as_i64())
                        .fetch_all(ex.conn())
                        .await
                }
                PublisherFilter::Location(location) => {
                    sqlx::query("SELECT * FROM publishers WHERE location = $1 ORDER BY id")
                        .bind(location)
                        .fetch_all(ex.conn())
                        .await
                }
            }
            .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Publisher::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let rows = match filter {
                PublisherFilter::All => {
                    sqlx::query("SELECT * FROM publishers ORDER BY id").fetch_all(ex.conn()).await
                }
                PublisherFilter::Id(id) => {
                    sqlx::query("SELECT * FROM publishers WHERE id = ?")
                        .bind(id.as_i64())
                        .fetch_all(ex.conn())
                        .await
                }
                PublisherFilter::Location(location) => {
                    sqlx::query("SELECT * FROM publishers WHERE location = ? ORDER BY id")
                        .bind(location)
                        .fetch_all(ex.conn())
                        .await
                }
            }
            .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Publisher::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Fetches the games that match `filter` sorted by identifier, along with their publishers.
async fn query_games(ex: &mut Executor, filter: GameFilter<'_>) -> DbResult<Vec<Game>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT g.*, ARRAY(
                    SELECT gp.publisher_id FROM game_publishers gp WHERE gp.game_id = g.id
                ) AS publishers
                FROM games g {}",
                filter.clauses("$1")
            );
            let query = sqlx::query(&query_str);
            let query = match filter {
                GameFilter::All => query,
                GameFilter::Id(id) => query.bind(id.as_i64()),
                GameFilter::Genre(genre) => query.bind(genre),
                GameFilter::Publisher(id) => query.bind(id.as_i64()),
            };
            let rows = query.fetch_all(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Game::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT g.*, (
                    SELECT GROUP_CONCAT(gp.publisher_id) FROM game_publishers gp
                    WHERE gp.game_id = g.id
                ) AS publishers
                FROM games g {}",
                filter.clauses("?")
            );
            let query = sqlx::query(&query_str);
            let query = match filter {
                GameFilter::All => query,
                GameFilter::Id(id) => query.bind(id.as_i64()),
                GameFilter::Genre(genre) => query.bind(genre),
                GameFilter::Publisher(id) => query.bind(id.as_i64()),
            };
            let rows = query.fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Game::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all publishers sorted by identifier.
pub async fn get_publishers(ex: &mut Executor) -> DbResult<Vec<Publisher>> {
    query_publishers(ex, PublisherFilter::All).await
}

/// Gets the publisher identified by `id`.
pub async fn get_publisher(ex: &mut Executor, id: PublisherId) -> DbResult<Publisher> {
    query_publishers(ex, PublisherFilter::Id(id)).await?.pop().ok_or(DbError::NotFound)
}

/// Gets all publishers based at `location`, which must match exactly.
pub async fn get_publishers_by_location(
    ex: &mut Executor,
    location: &str,
) -> DbResult<Vec<Publisher>> {
    query_publishers(ex, PublisherFilter::Location(location)).await
}

/// Checks whether the publisher identified by `id` exists.
pub async fn publisher_exists(ex: &mut Executor, id: PublisherId) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM publishers WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM publishers WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(count > 0)
}

/// Creates a new publisher with the details in `info` and returns its assigned identifier.
///
/// Fails with `AlreadyExists` if the name or the website are already taken.
pub async fn create_publisher(ex: &mut Executor, info: &PublisherInfo) -> DbResult<PublisherId> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO publishers (name, location, website) VALUES ($1, $2, $3) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(info.name())
                .bind(info.location())
                .bind(info.website().as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                "INSERT INTO publishers (name, location, website) VALUES (?, ?, ?) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(info.name())
                .bind(info.location())
                .bind(info.website().as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(PublisherId::new(id))
}

/// Overwrites the stored details of `publisher`.
pub async fn update_publisher(ex: &mut Executor, publisher: &Publisher) -> DbResult<()> {
    let info = publisher.info();
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "UPDATE publishers SET name = $1, location = $2, website = $3 WHERE id = $4";
            let done = sqlx::query(query_str)
                .bind(info.name())
                .bind(info.location())
                .bind(info.website().as_str())
                .bind(publisher.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE publishers SET name = ?, location = ?, website = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(info.name())
                .bind(info.location())
                .bind(info.website().as_str())
                .bind(publisher.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the publisher identified by `id` along with its links to games.
///
/// The games themselves are left in place; see `delete_orphan_games`.
pub async fn delete_publisher(ex: &mut Executor, id: PublisherId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM publishers WHERE id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM publishers WHERE id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}

/// Gets all games sorted by identifier.
pub async fn get_games(ex: &mut Executor) -> DbResult<Vec<Game>> {
    query_games(ex, GameFilter::All).await
}

/// Gets the game identified by `id`.
pub async fn get_game(ex: &mut Executor, id: GameId) -> DbResult<Game> {
    query_games(ex, GameFilter::Id(id)).await?.pop().ok_or(DbError::NotFound)
}

/// Gets all games of `genre`, which must match exactly.
pub async fn get_games_by_genre(ex: &mut Executor, genre: &str) -> DbResult<Vec<Game>> {
    query_games(ex, GameFilter::Genre(genre)).await
}

/// Gets all games released by the publisher identified by `id`.
pub async fn get_games_by_publisher(ex: &mut Executor, id: PublisherId) -> DbResult<Vec<Game>> {
    query_games(ex, GameFilter::Publisher(id)).await
}

/// Replaces the publishers linked to the game `id` with `publishers`.
///
/// Fails with `NotFound` if any of the publishers does not exist.
async fn set_game_publishers(
    ex: &mut Executor,
    id: GameId,
    publishers: &BTreeSet<PublisherId>,
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            sqlx::query("DELETE FROM game_publishers WHERE game_id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            for publisher in publishers {
                sqlx::query("INSERT INTO game_publishers (game_id, publisher_id) VALUES ($1, $2)")
                    .bind(id.as_i64())
                    .bind(publisher.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
            }
            Ok(())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            sqlx::query("DELETE FROM game_publishers WHERE game_id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            for publisher in publishers {
                sqlx::query("INSERT INTO game_publishers (game_id, publisher_id) VALUES (?, ?)")
                    .bind(id.as_i64())
                    .bind(publisher.as_i64())
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
            }
            Ok(())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new game with the details in `info` and returns its assigned identifier.
///
/// This issues multiple statements so it should run within a transaction.  Fails with
/// `AlreadyExists` if the title is already taken and with `NotFound` if any of the publishers
/// does not exist.
pub async fn create_game(ex: &mut Executor, info: &GameInfo) -> DbResult<GameId> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO games
                    (title, description, release_date, genre, on_windows, on_mac, on_linux)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(info.title())
                .bind(info.description())
                .bind(info.release_date())
                .bind(info.genre())
                .bind(info.on_windows())
                .bind(info.on_mac())
                .bind(info.on_linux())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO games
                    (title, description, release_date, genre, on_windows, on_mac, on_linux)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(info.title())
                .bind(info.description())
                .bind(info.release_date())
                .bind(info.genre())
                .bind(info.on_windows())
                .bind(info.on_mac())
                .bind(info.on_linux())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let id = GameId::new(id);
    set_game_publishers(ex, id, info.publishers()).await?;
    Ok(id)
}

/// Overwrites the stored details of `game`, including its links to publishers.
///
/// This issues multiple statements so it should run within a transaction.
pub async fn update_game(ex: &mut Executor, game: &Game) -> DbResult<()> {
    let info = game.info();
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE games
                SET title = $1, description = $2, release_date = $3, genre = $4,
                    on_windows = $5, on_mac = $6, on_linux = $7
                WHERE id = $8";
            let done = sqlx::query(query_str)
                .bind(info.title())
                .bind(info.description())
                .bind(info.release_date())
                .bind(info.genre())
                .bind(info.on_windows())
                .bind(info.on_mac())
                .bind(info.on_linux())
                .bind(game.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE games
                SET title = ?, description = ?, release_date = ?, genre = ?,
                    on_windows = ?, on_mac = ?, on_linux = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(info.title())
                .bind(info.description())
                .bind(info.release_date())
                .bind(info.genre())
                .bind(info.on_windows())
                .bind(info.on_mac())
                .bind(info.on_linux())
                .bind(game.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => return Err(DbError::NotFound),
        1 => (),
        _ => return Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
    set_game_publishers(ex, *game.id(), info.publishers()).await
}

/// Deletes the game identified by `id` along with its links to publishers.
pub async fn delete_game(ex: &mut Executor, id: GameId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done = sqlx::query("DELETE FROM games WHERE id = $1")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done = sqlx::query("DELETE FROM games WHERE id = ?")
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}

/// Deletes all games that are not linked to any publisher and returns how many were deleted.
pub async fn delete_orphan_games(ex: &mut Executor) -> DbResult<u64> {
    let query_str = "DELETE FROM games WHERE id NOT IN (SELECT game_id FROM game_publishers)";
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let done =
                sqlx::query(query_str).execute(ex.conn()).await.map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let done =
                sqlx::query(query_str).execute(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
