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

//! High-level data types.
//!
//! Every entity comes in three shapes: an `<Entity>Info` with the validated user-provided data,
//! the `<Entity>` itself which pairs the info with its store-assigned identifier, and an
//! `<Entity>Fields` type that captures raw, possibly incomplete, input from the API.

use games_library_core::model::{FieldErrors, ModelError, ModelResult};

mod game;
pub use game::{Game, GameFields, GameId, GameInfo};
mod publisher;
pub use publisher::{Publisher, PublisherFields, PublisherId, PublisherInfo, Website};

/// Maximum length of short text fields such as names and titles.
const MAX_TEXT_LENGTH: usize = 100;

/// Returns the value of a field that must be present.
fn required<T>(value: Option<T>) -> ModelResult<T> {
    value.ok_or_else(|| ModelError("This field is required.".to_owned()))
}

/// Ensures `value` has no more than `max_length` characters.
fn check_length(value: &str, max_length: usize) -> ModelResult<()> {
    if value.chars().count() > max_length {
        return Err(ModelError(format!(
            "Ensure this field has no more than {} characters.",
            max_length
        )));
    }
    Ok(())
}

/// Validates a free-form text field, trimming surrounding whitespace.
///
/// The text must not be blank and, if `max_length` is given, must not be longer than that.
fn validate_text(value: String, max_length: Option<usize>) -> ModelResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ModelError("This field may not be blank.".to_owned()));
    }
    if let Some(max_length) = max_length {
        check_length(value, max_length)?;
    }
    Ok(value.to_owned())
}

/// Validates a short text field such as a name or a title.
fn validate_short_text(value: String) -> ModelResult<String> {
    validate_text(value, Some(MAX_TEXT_LENGTH))
}

/// Validates `input` with `validate` if present and stores the result in `slot`.  Failures are
/// recorded in `errors` under `field` and leave `slot` untouched.
fn merge<I, T, F>(errors: &mut FieldErrors, field: &str, input: Option<I>, validate: F, slot: &mut T)
where
    F: FnOnce(I) -> ModelResult<T>,
{
    if let Some(input) = input {
        match validate(input) {
            Ok(value) => *slot = value,
            Err(e) => errors.add(field, e.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(Ok(3), required(Some(3)));
        assert_eq!(Err(ModelError("This field is required.".to_owned())), required::<i32>(None));
    }

    #[test]
    fn test_validate_text_trims() {
        assert_eq!(Ok("Ubisoft".to_owned()), validate_text("  Ubisoft\n".to_owned(), Some(7)));
    }

    #[test]
    fn test_validate_text_blank() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(
                Err(ModelError("This field may not be blank.".to_owned())),
                validate_text(raw.to_owned(), None)
            );
        }
    }

    #[test]
    fn test_validate_text_length_counts_chars() {
        assert!(validate_text("ñ".repeat(100), Some(100)).is_ok());
        assert_eq!(
            Err(ModelError("Ensure this field has no more than 100 characters.".to_owned())),
            validate_short_text("x".repeat(101))
        );
        assert!(validate_text("x".repeat(5000), None).is_ok());
    }

    #[test]
    fn test_merge() {
        let mut errors = FieldErrors::default();
        let mut slot = "old".to_owned();

        merge(&mut errors, "name", None, validate_short_text, &mut slot);
        assert_eq!("old", slot);

        merge(&mut errors, "name", Some("new".to_owned()), validate_short_text, &mut slot);
        assert_eq!("new", slot);
        assert!(errors.is_empty());

        merge(&mut errors, "name", Some(" ".to_owned()), validate_short_text, &mut slot);
        assert_eq!("new", slot);
        assert_eq!("name: This field may not be blank.", errors.to_string());
    }
}
