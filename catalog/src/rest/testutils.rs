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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use games_library_core::db::{Db, DbError, sqlite};
use std::path::Path;
use std::sync::Arc;
use time::macros::date;

/// State of a running REST API test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct access from tests.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database.
    pub(crate) async fn setup() -> Self {
        Self::setup_with(Arc::new(games_library_core::db::sqlite::testutils::setup().await)).await
    }

    /// Initializes the app using a database stored in the file at `path`.
    pub(crate) async fn setup_file(path: &Path) -> Self {
        let db = sqlite::connect(path.to_str().unwrap()).await.unwrap();
        Self::setup_with(Arc::new(db)).await
    }

    /// Initializes the app on top of `db`, which must not have a schema yet.
    async fn setup_with(db: Arc<dyn Db + Send + Sync>) -> Self {
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Closes the backing database so that any further request fails with an internal error.
    pub(crate) async fn break_db(&self) {
        self.db.close().await;
    }

    /// Creates a publisher by directly modifying the backing database.  The website is derived
    /// from the `name`.
    pub(crate) async fn create_publisher(&self, name: &str, location: &str) -> PublisherId {
        let info = PublisherInfo::new(
            name.to_owned(),
            location.to_owned(),
            Website::new(format!("https://{}.example.com", name.to_lowercase())).unwrap(),
        );
        db::create_publisher(&mut self.db.ex().await.unwrap(), &info).await.unwrap()
    }

    /// Creates a game by directly modifying the backing database.  The game runs on Windows and
    /// Linux.
    pub(crate) async fn create_game(
        &self,
        title: &str,
        genre: &str,
        publishers: &[PublisherId],
    ) -> GameId {
        let info = GameInfo::new(
            title.to_owned(),
            publishers.iter().copied().collect(),
            format!("The {} game", title),
            date!(1998 - 11 - 19),
            genre.to_owned(),
            true,
            false,
            true,
        );
        let mut tx = self.db.begin().await.unwrap();
        let id = db::create_game(tx.ex(), &info).await.unwrap();
        tx.commit().await.unwrap();
        id
    }

    /// Gets the publisher `id` by directly querying the backing database, if it exists.
    pub(crate) async fn get_publisher(&self, id: PublisherId) -> Option<Publisher> {
        match db::get_publisher(&mut self.db.ex().await.unwrap(), id).await {
            Ok(publisher) => Some(publisher),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the game `id` by directly querying the backing database, if it exists.
    pub(crate) async fn get_game(&self, id: GameId) -> Option<Game> {
        match db::get_game(&mut self.db.ex().await.unwrap(), id).await {
            Ok(game) => Some(game),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets all publishers by directly querying the backing database.
    pub(crate) async fn get_publishers(&self) -> Vec<Publisher> {
        db::get_publishers(&mut self.db.ex().await.unwrap()).await.unwrap()
    }

    /// Gets all games by directly querying the backing database.
    pub(crate) async fn get_games(&self) -> Vec<Game> {
        db::get_games(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
