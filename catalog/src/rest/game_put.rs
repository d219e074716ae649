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

//! API to partially update an existing game.

use crate::driver::Driver;
use crate::model::{Game, GameFields, GameId};
use axum::Json;
use axum::extract::State;
use games_library_core::rest::{JsonBody, PathParam, RestError};

/// PUT handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParam(id): PathParam<GameId>,
    JsonBody(fields): JsonBody<GameFields>,
) -> Result<Json<Game>, RestError> {
    let game = driver
        .update_game(id, fields)
        .await
        .map_err(RestError::context("Error while updating game"))?;
    Ok(Json(game))
}
