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

//! API to get all games released by a publisher.

use crate::driver::Driver;
use crate::model::{Game, PublisherId};
use axum::Json;
use axum::extract::State;
use games_library_core::rest::{EmptyBody, PathParam, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParam(id): PathParam<PublisherId>,
    _: EmptyBody,
) -> Result<Json<Vec<Game>>, RestError> {
    let games = driver
        .get_publisher_games(id)
        .await
        .map_err(RestError::context("Error while getting games of publisher"))?;
    Ok(Json(games))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use games_library_core::rest::testutils::*;
    use games_library_core::test_payload_must_be_empty;

    fn route(id: PublisherId) -> (http::Method, String) {
        (http::Method::GET, format!("/publisher/{}/games", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;
        let sega = context.create_publisher("Sega", "Tokyo").await;
        let portal = context.create_game("Portal", "Puzzle", &[valve]).await;
        context.create_game("Sonic", "Platformer", &[sega]).await;
        let shared = context.create_game("Shared", "Racing", &[sega, valve]).await;

        let response = OneShotBuilder::new(context.app(), route(valve))
            .send_empty()
            .await
            .expect_json::<Vec<Game>>()
            .await;
        assert_eq!(
            vec![context.get_game(portal).await.unwrap(), context.get_game(shared).await.unwrap()],
            response
        );
    }

    #[tokio::test]
    async fn test_no_games() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;

        let response = OneShotBuilder::new(context.into_app(), route(valve))
            .send_empty()
            .await
            .expect_json::<Vec<Game>>()
            .await;
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(PublisherId::new(4)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Publisher with given ID\\(4\\) not found.")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(PublisherId::new(1))
    );
}
