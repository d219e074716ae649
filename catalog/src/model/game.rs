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

//! The `Game` entity.

use super::{PublisherId, merge, required, validate_short_text, validate_text};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use games_library_core::model::{FieldErrors, ModelError, ModelResult};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Wire format of release dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Identifier of a game, assigned by the database on creation.
#[derive(
    Clone, Copy, Constructor, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct GameId(i64);

impl GameId {
    /// Returns the raw value of the identifier for storage.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

/// Parses a release date in `YYYY-MM-DD` form.
fn parse_date(value: String) -> ModelResult<Date> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|_| {
        ModelError("Date has wrong format. Use one of these formats instead: YYYY-MM-DD.".to_owned())
    })
}

/// Validates the set of publishers of a game, which cannot be empty.
fn validate_publishers(ids: Vec<PublisherId>) -> ModelResult<BTreeSet<PublisherId>> {
    if ids.is_empty() {
        return Err(ModelError("This list may not be empty.".to_owned()));
    }
    Ok(ids.into_iter().collect())
}

/// Serde adapters for release dates.
mod date_format {
    use super::DATE_FORMAT;
    use serde::Serializer;
    use time::Date;

    /// Serializes `date` in `YYYY-MM-DD` form.
    pub(super) fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }

    /// Deserializes a date in `YYYY-MM-DD` form.
    #[cfg(test)]
    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Validated details of a game.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct GameInfo {
    /// Title of the game.  Unique across all games.
    title: String,

    /// Publishers of the game.  Never empty.
    #[serde(rename = "publisher")]
    publishers: BTreeSet<PublisherId>,

    /// Free-form description of the game.
    description: String,

    /// Date when the game was first released.
    #[serde(with = "date_format")]
    release_date: Date,

    /// Genre of the game.
    genre: String,

    /// Whether the game runs on Windows.
    #[serde(rename = "onWindows")]
    on_windows: bool,

    /// Whether the game runs on macOS.
    #[serde(rename = "onMac")]
    on_mac: bool,

    /// Whether the game runs on Linux.
    #[serde(rename = "onLinux")]
    on_linux: bool,
}

impl GameInfo {
    /// Returns the names of the platforms the game runs on, in a fixed order.
    pub fn platforms(&self) -> Vec<&'static str> {
        [(self.on_windows, "Windows"), (self.on_mac, "Mac"), (self.on_linux, "Linux")]
            .into_iter()
            .filter_map(|(supported, name)| supported.then_some(name))
            .collect()
    }
}

/// A game as known to the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Game {
    /// Identifier of the game.
    id: GameId,

    /// Details of the game.
    #[cfg_attr(test, serde(flatten))]
    info: GameInfo,
}

impl Serialize for Game {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        /// Wire representation of a game, which carries the derived list of platforms.
        #[derive(Serialize)]
        struct View<'a> {
            /// Identifier of the game.
            id: GameId,

            /// Details of the game.
            #[serde(flatten)]
            info: &'a GameInfo,

            /// Platforms the game runs on.
            platforms: Vec<&'static str>,
        }

        let view = View { id: self.id, info: &self.info, platforms: self.info.platforms() };
        view.serialize(serializer)
    }
}

/// Raw game details as received from the API.
///
/// Every field is optional so that the same type can carry full records for creation and
/// partial records for updates.  The derived `platforms` list is not an input and is ignored.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub struct GameFields {
    /// Title of the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Identifiers of the publishers of the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Vec<PublisherId>>,

    /// Free-form description of the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Release date in `YYYY-MM-DD` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Genre of the game.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Whether the game runs on Windows.
    #[serde(rename = "onWindows", skip_serializing_if = "Option::is_none")]
    pub on_windows: Option<bool>,

    /// Whether the game runs on macOS.
    #[serde(rename = "onMac", skip_serializing_if = "Option::is_none")]
    pub on_mac: Option<bool>,

    /// Whether the game runs on Linux.
    #[serde(rename = "onLinux", skip_serializing_if = "Option::is_none")]
    pub on_linux: Option<bool>,
}

impl GameFields {
    /// Validates the fields as a brand new game, which requires all of them to be present.
    ///
    /// This does not check whether the referenced publishers exist.
    pub fn into_info(self) -> Result<GameInfo, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut title = None;
        let mut publishers = None;
        let mut description = None;
        let mut release_date = None;
        let mut genre = None;
        let mut on_windows = None;
        let mut on_mac = None;
        let mut on_linux = None;
        errors.collect("title", required(self.title).and_then(validate_short_text), &mut title);
        errors.collect(
            "publisher",
            required(self.publisher).and_then(validate_publishers),
            &mut publishers,
        );
        errors.collect(
            "description",
            required(self.description).and_then(|v| validate_text(v, None)),
            &mut description,
        );
        errors.collect(
            "release_date",
            required(self.release_date).and_then(parse_date),
            &mut release_date,
        );
        errors.collect("genre", required(self.genre).and_then(validate_short_text), &mut genre);
        errors.collect("onWindows", required(self.on_windows), &mut on_windows);
        errors.collect("onMac", required(self.on_mac), &mut on_mac);
        errors.collect("onLinux", required(self.on_linux), &mut on_linux);

        match (title, publishers, description, release_date, genre, on_windows, on_mac, on_linux)
        {
            (
                Some(title),
                Some(publishers),
                Some(description),
                Some(release_date),
                Some(genre),
                Some(on_windows),
                Some(on_mac),
                Some(on_linux),
            ) => Ok(GameInfo {
                title,
                publishers,
                description,
                release_date,
                genre,
                on_windows,
                on_mac,
                on_linux,
            }),
            _ => Err(errors),
        }
    }

    /// Overwrites the details of `game` with the fields that are present.
    ///
    /// This does not check whether the referenced publishers exist.
    pub fn apply(self, game: Game) -> Result<Game, FieldErrors> {
        let Game { id, info } = game;
        let GameInfo {
            mut title,
            mut publishers,
            mut description,
            mut release_date,
            mut genre,
            mut on_windows,
            mut on_mac,
            mut on_linux,
        } = info;

        let mut errors = FieldErrors::default();
        merge(&mut errors, "title", self.title, validate_short_text, &mut title);
        merge(&mut errors, "publisher", self.publisher, validate_publishers, &mut publishers);
        let validate_description = |v| validate_text(v, None);
        merge(&mut errors, "description", self.description, validate_description, &mut description);
        merge(&mut errors, "release_date", self.release_date, parse_date, &mut release_date);
        merge(&mut errors, "genre", self.genre, validate_short_text, &mut genre);
        merge(&mut errors, "onWindows", self.on_windows, Ok, &mut on_windows);
        merge(&mut errors, "onMac", self.on_mac, Ok, &mut on_mac);
        merge(&mut errors, "onLinux", self.on_linux, Ok, &mut on_linux);

        errors.check(Game {
            id,
            info: GameInfo {
                title,
                publishers,
                description,
                release_date,
                genre,
                on_windows,
                on_mac,
                on_linux,
            },
        })
    }
}
