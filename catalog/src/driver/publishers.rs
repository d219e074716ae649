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

//! Operations on publishers.

use super::{create_error, entity_error};
use crate::db;
use crate::driver::Driver;
use crate::model::*;
use games_library_core::driver::{DriverError, DriverResult};
use log::debug;

impl Driver {
    /// Gets all publishers.
    pub(crate) async fn list_publishers(self) -> DriverResult<Vec<Publisher>> {
        let publishers = db::get_publishers(&mut self.db.ex().await?).await?;
        Ok(publishers)
    }

    /// Gets the publisher identified by `id`.
    pub(crate) async fn get_publisher(self, id: PublisherId) -> DriverResult<Publisher> {
        db::get_publisher(&mut self.db.ex().await?, id)
            .await
            .map_err(entity_error("Publisher", id))
    }

    /// Gets all publishers based at `location`.  Finding none is an error.
    pub(crate) async fn get_publishers_by_location(
        self,
        location: &str,
    ) -> DriverResult<Vec<Publisher>> {
        let publishers = db::get_publishers_by_location(&mut self.db.ex().await?, location).await?;
        if publishers.is_empty() {
            return Err(DriverError::NotFound(format!(
                "Publisher with given Location({}) not found.",
                location
            )));
        }
        Ok(publishers)
    }

    /// Gets all games released by the publisher identified by `id`, which must exist.
    pub(crate) async fn get_publisher_games(self, id: PublisherId) -> DriverResult<Vec<Game>> {
        let mut tx = self.db.begin().await?;
        db::get_publisher(tx.ex(), id).await.map_err(entity_error("Publisher", id))?;
        let games = db::get_games_by_publisher(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(games)
    }

    /// Creates a new publisher from the raw `fields`, all of which must be present.
    pub(crate) async fn create_publisher(self, fields: PublisherFields) -> DriverResult<Publisher> {
        let info = fields
            .into_info()
            .map_err(|errors| DriverError::InvalidFields { what: "publisher", errors })?;

        let id = db::create_publisher(&mut self.db.ex().await?, &info)
            .await
            .map_err(create_error("Publisher"))?;
        Ok(Publisher::new(id, info))
    }

    /// Updates the publisher identified by `id` with the `fields` that are present.
    pub(crate) async fn update_publisher(
        self,
        id: PublisherId,
        fields: PublisherFields,
    ) -> DriverResult<Publisher> {
        let mut tx = self.db.begin().await?;
        let publisher =
            db::get_publisher(tx.ex(), id).await.map_err(entity_error("Publisher", id))?;
        let publisher = fields
            .apply(publisher)
            .map_err(|errors| DriverError::InvalidFields { what: "publisher", errors })?;
        db::update_publisher(tx.ex(), &publisher).await.map_err(entity_error("Publisher", id))?;
        tx.commit().await?;
        Ok(publisher)
    }

    /// Deletes the publisher identified by `id` and any games that were only released by it.
    pub(crate) async fn delete_publisher(self, id: PublisherId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_publisher(tx.ex(), id).await.map_err(entity_error("Publisher", id))?;
        let orphans = db::delete_orphan_games(tx.ex()).await?;
        tx.commit().await?;
        if orphans > 0 {
            debug!("Deleted {} games along with publisher {}", orphans, id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use games_library_core::db::DbError;

    /// Syntactic sugar to build a complete set of publisher fields.
    fn fields(name: &str, location: &str, website: &str) -> PublisherFields {
        PublisherFields {
            name: Some(name.to_owned()),
            location: Some(location.to_owned()),
            website: Some(website.to_owned()),
        }
    }

    #[tokio::test]
    async fn test_list_publishers_empty() {
        let context = TestContext::setup().await;

        assert!(context.driver().list_publishers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_publishers_some() {
        let context = TestContext::setup().await;

        let id1 = context.create_publisher("Valve", "Bellevue").await;
        let id2 = context.create_publisher("Nintendo", "Kyoto").await;

        let publishers = context.driver().list_publishers().await.unwrap();
        assert_eq!(vec![id1, id2], publishers.iter().map(|p| *p.id()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_get_publisher_ok() {
        let context = TestContext::setup().await;

        let id = context.create_publisher("Valve", "Bellevue").await;

        let publisher = context.driver().get_publisher(id).await.unwrap();
        assert_eq!(id, *publisher.id());
        assert_eq!("Valve", publisher.info().name());
        assert_eq!("https://valve.example.com", publisher.info().website().as_str());
    }

    #[tokio::test]
    async fn test_get_publisher_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Publisher with given ID(42) not found.".to_owned()),
            context.driver().get_publisher(PublisherId::new(42)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_publishers_by_location_ok() {
        let context = TestContext::setup().await;

        let id1 = context.create_publisher("Capcom", "Osaka").await;
        context.create_publisher("Sega", "Tokyo").await;
        let id3 = context.create_publisher("Snk", "Osaka").await;

        let publishers = context.driver().get_publishers_by_location("Osaka").await.unwrap();
        assert_eq!(vec![id1, id3], publishers.iter().map(|p| *p.id()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_get_publishers_by_location_none() {
        let context = TestContext::setup().await;

        context.create_publisher("Sega", "Tokyo").await;

        assert_eq!(
            DriverError::NotFound("Publisher with given Location(Kyoto) not found.".to_owned()),
            context.driver().get_publishers_by_location("Kyoto").await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_publisher_games() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;
        let sega = context.create_publisher("Sega", "Tokyo").await;
        let portal = context.create_game("Portal", "Puzzle", &[valve]).await;
        context.create_game("Sonic", "Platformer", &[sega]).await;

        let games = context.driver().get_publisher_games(valve).await.unwrap();
        assert_eq!(vec![portal], games.iter().map(|g| *g.id()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_get_publisher_games_empty() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;

        assert!(context.driver().get_publisher_games(valve).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_publisher_games_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Publisher with given ID(7) not found.".to_owned()),
            context.driver().get_publisher_games(PublisherId::new(7)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_publisher_ok() {
        let context = TestContext::setup().await;

        let publisher = context
            .driver()
            .create_publisher(fields(" Nintendo ", "Kyoto", "https://nintendo.com"))
            .await
            .unwrap();
        assert_eq!("Nintendo", publisher.info().name());

        let stored = db::get_publisher(&mut context.ex().await, *publisher.id()).await.unwrap();
        assert_eq!(publisher, stored);
    }

    #[tokio::test]
    async fn test_create_publisher_invalid() {
        let context = TestContext::setup().await;

        let fields = PublisherFields { name: Some("Sega".to_owned()), ..Default::default() };
        match context.driver().create_publisher(fields).await {
            Err(DriverError::InvalidFields { what: "publisher", errors }) => {
                assert_eq!(
                    "location: This field is required.; website: This field is required.",
                    errors.to_string()
                );
            }
            e => panic!("{:?}", e),
        }

        assert!(db::get_publishers(&mut context.ex().await).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_publisher_already_exists() {
        let context = TestContext::setup().await;

        context.create_publisher("Valve", "Bellevue").await;

        assert_eq!(
            DriverError::AlreadyExists("Publisher already exists.".to_owned()),
            context
                .driver()
                .create_publisher(fields("Valve", "Seattle", "https://valve.com"))
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_publisher_partial() {
        let context = TestContext::setup().await;

        let id = context.create_publisher("Valve", "Bellevue").await;

        let fields = PublisherFields { location: Some("Seattle".to_owned()), ..Default::default() };
        let publisher = context.driver().update_publisher(id, fields).await.unwrap();
        assert_eq!("Valve", publisher.info().name());
        assert_eq!("Seattle", publisher.info().location());

        assert_eq!(publisher, db::get_publisher(&mut context.ex().await, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_publisher_invalid() {
        let context = TestContext::setup().await;

        let id = context.create_publisher("Valve", "Bellevue").await;

        let fields = PublisherFields { website: Some("bad".to_owned()), ..Default::default() };
        match context.driver().update_publisher(id, fields).await {
            Err(DriverError::InvalidFields { what: "publisher", errors }) => {
                assert_eq!("website: Enter a valid URL.", errors.to_string());
            }
            e => panic!("{:?}", e),
        }

        let publisher = db::get_publisher(&mut context.ex().await, id).await.unwrap();
        assert_eq!("https://valve.example.com", publisher.info().website().as_str());
    }

    #[tokio::test]
    async fn test_update_publisher_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Publisher with given ID(3) not found.".to_owned()),
            context
                .driver()
                .update_publisher(PublisherId::new(3), PublisherFields::default())
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_publisher_already_exists() {
        let context = TestContext::setup().await;

        context.create_publisher("Valve", "Bellevue").await;
        let id = context.create_publisher("Sega", "Tokyo").await;

        let fields = PublisherFields { name: Some("Valve".to_owned()), ..Default::default() };
        assert_eq!(
            DriverError::AlreadyExists("Publisher already exists.".to_owned()),
            context.driver().update_publisher(id, fields).await.unwrap_err()
        );

        let publisher = db::get_publisher(&mut context.ex().await, id).await.unwrap();
        assert_eq!("Sega", publisher.info().name());
    }

    #[tokio::test]
    async fn test_delete_publisher_ok() {
        let context = TestContext::setup().await;

        let id = context.create_publisher("Valve", "Bellevue").await;

        context.driver().delete_publisher(id).await.unwrap();

        assert_eq!(
            DbError::NotFound,
            db::get_publisher(&mut context.ex().await, id).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_publisher_cascades_to_orphan_games() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;
        let sega = context.create_publisher("Sega", "Tokyo").await;
        let portal = context.create_game("Portal", "Puzzle", &[valve]).await;
        let shared = context.create_game("Shared", "Racing", &[valve, sega]).await;
        let sonic = context.create_game("Sonic", "Platformer", &[sega]).await;

        context.driver().delete_publisher(valve).await.unwrap();

        let games = db::get_games(&mut context.ex().await).await.unwrap();
        assert_eq!(vec![shared, sonic], games.iter().map(|g| *g.id()).collect::<Vec<_>>());
        assert!(!games.iter().any(|g| *g.id() == portal));
        assert!(games.iter().all(|g| !g.info().publishers().contains(&valve)));
    }

    #[tokio::test]
    async fn test_delete_publisher_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Publisher with given ID(5) not found.".to_owned()),
            context.driver().delete_publisher(PublisherId::new(5)).await.unwrap_err()
        );
    }
}
