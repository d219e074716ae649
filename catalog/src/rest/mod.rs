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

//! REST interface for the service.

use crate::driver::Driver;
use axum::Router;

mod game_delete;
mod game_get;
mod game_post;
mod game_put;
mod games_by_genre_get;
mod games_by_publisher_get;
mod games_get;
mod publisher_delete;
mod publisher_games_get;
mod publisher_get;
mod publisher_post;
mod publisher_put;
mod publishers_by_location_get;
mod publishers_get;
#[cfg(test)]
mod testutils;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/publishers/", get(publishers_get::handler))
        .route("/publisher/", post(publisher_post::handler))
        .route(
            "/publisher/:id",
            get(publisher_get::handler)
                .put(publisher_put::handler)
                .delete(publisher_delete::handler),
        )
        .route("/publisher/:id/games", get(publisher_games_get::handler))
        .route("/publisher/location/:location", get(publishers_by_location_get::handler))
        .route("/games/", get(games_get::handler))
        .route("/game/", post(game_post::handler))
        .route(
            "/game/:id",
            get(game_get::handler).put(game_put::handler).delete(game_delete::handler),
        )
        .route("/game/genre/:genre", get(games_by_genre_get::handler))
        .route("/games_by/:id", get(games_by_publisher_get::handler))
        .with_state(driver)
}
