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

//! The `Publisher` entity.

use super::{check_length, merge, required, validate_short_text};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use games_library_core::model::{FieldErrors, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// Maximum length of a publisher's website.
const MAX_WEBSITE_LENGTH: usize = 200;

/// URL schemes accepted for a publisher's website.
const WEBSITE_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Identifier of a publisher, assigned by the database on creation.
#[derive(
    Clone, Copy, Constructor, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct PublisherId(i64);

impl PublisherId {
    /// Returns the raw value of the identifier for storage.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

/// The address of a publisher's website.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub struct Website(String);

impl Website {
    /// Creates a new website after validating that `url` is an absolute web or FTP address.
    ///
    /// The address is kept as provided, minus any surrounding whitespace.
    pub fn new<S: Into<String>>(url: S) -> ModelResult<Self> {
        let url = url.into();
        let url = url.trim();
        if url.is_empty() {
            return Err(ModelError("This field may not be blank.".to_owned()));
        }
        check_length(url, MAX_WEBSITE_LENGTH)?;

        let invalid = || ModelError("Enter a valid URL.".to_owned());
        let parsed = Url::parse(url).map_err(|_| invalid())?;
        if !WEBSITE_SCHEMES.contains(&parsed.scheme()) {
            return Err(invalid());
        }
        match parsed.host() {
            Some(Host::Domain(domain)) if domain == "localhost" || domain.contains('.') => (),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => (),
            _ => return Err(invalid()),
        }

        Ok(Self(url.to_owned()))
    }

    /// Returns a string view of the website.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated details of a publisher.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct PublisherInfo {
    /// Name of the publisher.  Unique across all publishers.
    name: String,

    /// Where the publisher is based.
    location: String,

    /// Website of the publisher.  Unique across all publishers.
    website: Website,
}

/// A publisher as known to the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Publisher {
    /// Identifier of the publisher.
    id: PublisherId,

    /// Details of the publisher.
    #[serde(flatten)]
    info: PublisherInfo,
}

/// Raw publisher details as received from the API.
///
/// Every field is optional so that the same type can carry full records for creation and
/// partial records for updates.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub struct PublisherFields {
    /// Name of the publisher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the publisher is based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Website of the publisher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl PublisherFields {
    /// Validates the fields as a brand new publisher, which requires all of them to be present.
    pub fn into_info(self) -> Result<PublisherInfo, FieldErrors> {
        let mut errors = FieldErrors::default();
        let (mut name, mut location, mut website) = (None, None, None);
        errors.collect("name", required(self.name).and_then(validate_short_text), &mut name);
        errors.collect(
            "location",
            required(self.location).and_then(validate_short_text),
            &mut location,
        );
        errors.collect("website", required(self.website).and_then(Website::new), &mut website);

        match (name, location, website) {
            (Some(name), Some(location), Some(website)) => {
                Ok(PublisherInfo { name, location, website })
            }
            _ => Err(errors),
        }
    }

    /// Overwrites the details of `publisher` with the fields that are present.
    pub fn apply(self, publisher: Publisher) -> Result<Publisher, FieldErrors> {
        let Publisher { id, info: PublisherInfo { mut name, mut location, mut website } } =
            publisher;

        let mut errors = FieldErrors::default();
        merge(&mut errors, "name", self.name, validate_short_text, &mut name);
        merge(&mut errors, "location", self.location, validate_short_text, &mut location);
        merge(&mut errors, "website", self.website, Website::new, &mut website);

        errors.check(Publisher { id, info: PublisherInfo { name, location, website } })
    }
}
