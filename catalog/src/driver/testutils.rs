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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use games_library_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::date;

/// State of a running driver test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct access from tests.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(games_library_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Syntactic sugar to create a publisher with a website derived from its `name`.
    pub(crate) async fn create_publisher(&self, name: &str, location: &str) -> PublisherId {
        let info = PublisherInfo::new(
            name.to_owned(),
            location.to_owned(),
            Website::new(format!("https://{}.example.com", name.to_lowercase())).unwrap(),
        );
        db::create_publisher(&mut self.ex().await, &info).await.unwrap()
    }

    /// Syntactic sugar to create a game with placeholder values for the fields that tests rarely
    /// care about.
    pub(crate) async fn create_game(
        &self,
        title: &str,
        genre: &str,
        publishers: &[PublisherId],
    ) -> GameId {
        let info = GameInfo::new(
            title.to_owned(),
            publishers.iter().copied().collect(),
            format!("All about {}", title),
            date!(2007 - 10 - 10),
            genre.to_owned(),
            true,
            false,
            false,
        );
        let mut tx = self.db.begin().await.unwrap();
        let id = db::create_game(tx.ex(), &info).await.unwrap();
        tx.commit().await.unwrap();
        id
    }
}
