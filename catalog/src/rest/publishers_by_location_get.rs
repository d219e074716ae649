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

//! API to get all publishers based at a location.

use crate::driver::Driver;
use crate::model::Publisher;
use axum::Json;
use axum::extract::State;
use games_library_core::rest::{EmptyBody, PathParam, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParam(location): PathParam<String>,
    _: EmptyBody,
) -> Result<Json<Vec<Publisher>>, RestError> {
    let publishers = driver
        .get_publishers_by_location(&location)
        .await
        .map_err(RestError::context("Error while getting publishers by location"))?;
    Ok(Json(publishers))
}
