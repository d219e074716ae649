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

//! Operations on games.

use super::{check_publishers, create_error, entity_error};
use crate::db;
use crate::driver::Driver;
use crate::model::*;
use games_library_core::db::DbError;
use games_library_core::driver::{DriverError, DriverResult};
use games_library_core::model::FieldErrors;
use std::collections::BTreeSet;

/// Builds the error to return when the fields of a game fail validation.
fn invalid_game(errors: FieldErrors) -> DriverError {
    DriverError::InvalidFields { what: "game", errors }
}

impl Driver {
    /// Gets all games.
    pub(crate) async fn list_games(self) -> DriverResult<Vec<Game>> {
        let games = db::get_games(&mut self.db.ex().await?).await?;
        Ok(games)
    }

    /// Gets the game identified by `id`.
    pub(crate) async fn get_game(self, id: GameId) -> DriverResult<Game> {
        db::get_game(&mut self.db.ex().await?, id).await.map_err(entity_error("Game", id))
    }

    /// Gets all games of `genre`.  Finding none is an error.
    pub(crate) async fn get_games_by_genre(self, genre: &str) -> DriverResult<Vec<Game>> {
        let games = db::get_games_by_genre(&mut self.db.ex().await?, genre).await?;
        if games.is_empty() {
            return Err(DriverError::NotFound(format!(
                "No games found with given genre({}).",
                genre
            )));
        }
        Ok(games)
    }

    /// Gets all games released by the publisher `id`.  Finding none is an error, whether or not
    /// the publisher exists.
    pub(crate) async fn get_games_by_publisher(self, id: PublisherId) -> DriverResult<Vec<Game>> {
        let games = db::get_games_by_publisher(&mut self.db.ex().await?, id).await?;
        if games.is_empty() {
            return Err(DriverError::NotFound(format!(
                "No games found with given publisher({}).",
                id
            )));
        }
        Ok(games)
    }

    /// Creates a new game from the raw `fields`, all of which must be present and whose
    /// publishers must exist.
    pub(crate) async fn create_game(self, fields: GameFields) -> DriverResult<Game> {
        let mut tx = self.db.begin().await?;

        let mut errors = check_publishers(tx.ex(), fields.publisher.as_deref()).await?;
        let info = match fields.into_info() {
            Ok(info) => errors.check(info).map_err(invalid_game)?,
            Err(e) => {
                errors.merge(e);
                return Err(invalid_game(errors));
            }
        };

        let id = match db::create_game(tx.ex(), &info).await {
            Ok(id) => id,
            Err(DbError::NotFound) => {
                drop(tx);
                let mut errors = FieldErrors::default();
                errors.add("publisher", "Publisher was deleted while saving the game.");
                return Err(self.recheck_publishers(info.publishers(), invalid_game(errors)).await);
            }
            Err(e) => return Err(create_error("Game")(e)),
        };
        tx.commit().await?;
        Ok(Game::new(id, info))
    }

    /// Updates the game identified by `id` with the `fields` that are present.  Any new
    /// publishers must exist.
    pub(crate) async fn update_game(self, id: GameId, fields: GameFields) -> DriverResult<Game> {
        let mut tx = self.db.begin().await?;

        let game = db::get_game(tx.ex(), id).await.map_err(entity_error("Game", id))?;
        let mut errors = check_publishers(tx.ex(), fields.publisher.as_deref()).await?;
        let game = match fields.apply(game) {
            Ok(game) => errors.check(game).map_err(invalid_game)?,
            Err(e) => {
                errors.merge(e);
                return Err(invalid_game(errors));
            }
        };

        match db::update_game(tx.ex(), &game).await {
            Ok(()) => (),
            Err(DbError::NotFound) => {
                drop(tx);
                let not_found = entity_error("Game", id)(DbError::NotFound);
                return Err(self.recheck_publishers(game.info().publishers(), not_found).await);
            }
            Err(e) => return Err(entity_error("Game", id)(e)),
        }
        tx.commit().await?;
        Ok(game)
    }

    /// Checks `publishers` again after a game write referencing them failed with a missing row,
    /// which happens when a publisher is deleted between the first check and the write.
    ///
    /// Returns a field error naming the publishers that are gone, or `otherwise` if all of them
    /// still exist.
    async fn recheck_publishers(
        &self,
        publishers: &BTreeSet<PublisherId>,
        otherwise: DriverError,
    ) -> DriverError {
        let ids: Vec<PublisherId> = publishers.iter().copied().collect();
        let mut ex = match self.db.ex().await {
            Ok(ex) => ex,
            Err(e) => return e.into(),
        };
        match check_publishers(&mut ex, Some(&ids)).await {
            Ok(errors) if errors.is_empty() => otherwise,
            Ok(errors) => invalid_game(errors),
            Err(e) => e,
        }
    }

    /// Deletes the game identified by `id`.
    pub(crate) async fn delete_game(self, id: GameId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_game(tx.ex(), id).await.map_err(entity_error("Game", id))?;
        tx.commit().await?;
        Ok(())
    }
}
