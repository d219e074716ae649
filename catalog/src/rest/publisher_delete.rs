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

//! API to delete a publisher along with the games that only it released.

use crate::driver::Driver;
use crate::model::PublisherId;
use axum::extract::State;
use axum::http;
use games_library_core::rest::{EmptyBody, PathParam, RestError};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParam(id): PathParam<PublisherId>,
    _: EmptyBody,
) -> Result<http::StatusCode, RestError> {
    driver
        .delete_publisher(id)
        .await
        .map_err(RestError::context("Error while deleting publisher"))?;
    Ok(http::StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use games_library_core::rest::testutils::*;
    use games_library_core::test_payload_must_be_empty;

    fn route(id: PublisherId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/publisher/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;
        let sega = context.create_publisher("Sega", "Tokyo").await;

        OneShotBuilder::new(context.app(), route(valve))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert!(context.get_publisher(valve).await.is_none());
        assert!(context.get_publisher(sega).await.is_some());
    }

    #[tokio::test]
    async fn test_cascades_to_games() {
        let context = TestContext::setup().await;

        let valve = context.create_publisher("Valve", "Bellevue").await;
        let sega = context.create_publisher("Sega", "Tokyo").await;
        let portal = context.create_game("Portal", "Puzzle", &[valve]).await;
        let shared = context.create_game("Shared", "Racing", &[valve, sega]).await;

        OneShotBuilder::new(context.app(), route(valve))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert!(context.get_game(portal).await.is_none());
        let shared = context.get_game(shared).await.unwrap();
        assert_eq!(vec![sega], shared.info().publishers().iter().copied().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(PublisherId::new(31)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Publisher with given ID\\(31\\) not found.")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(PublisherId::new(1))
    );
}
