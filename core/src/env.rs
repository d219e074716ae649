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

//! Utilities to deal with environment variables.

use std::env;

/// Result type for environment errors.
type Result<T> = std::result::Result<T, String>;

/// Wrapper around an environment variable's value to support conversions to other types.
pub struct Value(String);

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Ok(value.0)
    }
}

/// Generates a `TryFrom<Value>` for a type that can be parsed by `FromStr`.
macro_rules! tryfrom_value_for_fromstr [
    ( $t:ty ) => {
        impl TryFrom<Value> for $t {
            type Error = String;

            fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
                value.0.parse::<$t>().map_err(|e| format!("Invalid {}: {}", stringify!($t), e))
            }
        }
    }
];

tryfrom_value_for_fromstr!(i8);
tryfrom_value_for_fromstr!(i16);
tryfrom_value_for_fromstr!(i32);
tryfrom_value_for_fromstr!(i64);
tryfrom_value_for_fromstr!(i128);
tryfrom_value_for_fromstr!(u8);
tryfrom_value_for_fromstr!(u16);
tryfrom_value_for_fromstr!(u32);
tryfrom_value_for_fromstr!(u64);
tryfrom_value_for_fromstr!(u128);
tryfrom_value_for_fromstr!(usize);

impl TryFrom<Value> for bool {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value.0.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(format!("Invalid bool: {} is not one of true/false/yes/no/1/0", value.0)),
        }
    }
}

/// Gets a required environment variable whose name is `<prefix>_<suffix>` with a conversion to
/// a target type `T`.
pub fn get_required_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<T> {
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) => match Value(value).try_into() {
            Ok(value) => Ok(value),
            Err(e) => Err(format!("Invalid type in environment variable {}: {}", name, e)),
        },
        Err(env::VarError::NotPresent) => {
            Err(format!("Required environment variable {} not present", name))
        }
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

/// Gets an optional environment variable whose name is `<prefix>_<suffix>` with a conversion to
/// a target type `T`.
///
/// Unset and empty variables both yield `None`.
pub fn get_optional_var<T: TryFrom<Value, Error = String>>(
    prefix: &str,
    suffix: &str,
) -> Result<Option<T>> {
    let name = format!("{}_{}", prefix, suffix);
    match env::var(&name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(_) => get_required_var(prefix, suffix).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            Err(format!("Invalid value in environment variable {}", name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    #[test]
    fn test_value_to_string() {
        let title: String = Value("Half-Life 2".to_owned()).try_into().unwrap();
        assert_eq!("Half-Life 2", title);
    }

    #[test]
    fn test_value_to_fromstr() {
        assert_eq!(1998u16, TryInto::<u16>::try_into(Value("1998".to_owned())).unwrap());

        let err = TryInto::<u16>::try_into(Value("-1".to_owned())).unwrap_err();
        assert!(err.starts_with("Invalid u16:"));
    }

    #[test]
    fn test_value_to_bool() {
        for raw in ["1", "true", "TRUE", "yes"] {
            assert!(TryInto::<bool>::try_into(Value(raw.to_owned())).unwrap());
        }
        for raw in ["0", "false", "No"] {
            assert!(!TryInto::<bool>::try_into(Value(raw.to_owned())).unwrap());
        }

        let err = TryInto::<bool>::try_into(Value("maybe".to_owned())).unwrap_err();
        assert!(err.starts_with("Invalid bool:"));
    }

    #[test]
    fn test_get_required_var_ok() {
        temp_env::with_var("LIBRARY_GENRE", Some("Shooter"), || {
            assert_eq!("Shooter", &get_required_var::<String>("LIBRARY", "GENRE").unwrap());
        });
    }

    #[test]
    fn test_get_required_var_missing() {
        temp_env::with_var_unset("LIBRARY_TITLE", || {
            assert_eq!(
                "Required environment variable LIBRARY_TITLE not present",
                &get_required_var::<String>("LIBRARY", "TITLE").unwrap_err()
            );
        });
    }

    #[test]
    fn test_get_required_var_not_utf8() {
        temp_env::with_var("LIBRARY_LOCATION", Some(OsStr::from_bytes(b"\xc3\x28")), || {
            assert_eq!(
                "Invalid value in environment variable LIBRARY_LOCATION",
                &get_required_var::<String>("LIBRARY", "LOCATION").unwrap_err()
            );
        });
    }

    #[test]
    fn test_get_required_var_bad_type() {
        temp_env::with_var("LIBRARY_YEAR", Some("MCMXCVIII"), || {
            let err = get_required_var::<u16>("LIBRARY", "YEAR").unwrap_err();
            assert!(err.starts_with("Invalid type in environment variable LIBRARY_YEAR"));
            assert!(err.contains("Invalid u16"));
        });
    }

    #[test]
    fn test_get_optional_var_present() {
        temp_env::with_var("LIBRARY_LIMIT", Some("25"), || {
            assert_eq!(Some(25u16), get_optional_var::<u16>("LIBRARY", "LIMIT").unwrap());
        });
    }

    #[test]
    fn test_get_optional_var_missing_or_empty() {
        temp_env::with_var_unset("LIBRARY_OFFSET", || {
            assert_eq!(None, get_optional_var::<u16>("LIBRARY", "OFFSET").unwrap());
        });
        temp_env::with_var("LIBRARY_PAGE", Some(""), || {
            assert_eq!(None, get_optional_var::<u16>("LIBRARY", "PAGE").unwrap());
        });
    }

    #[test]
    fn test_get_optional_var_bad_type() {
        temp_env::with_var("LIBRARY_ON_MAC", Some("sometimes"), || {
            let err = get_optional_var::<bool>("LIBRARY", "ON_MAC").unwrap_err();
            assert!(err.starts_with("Invalid type in environment variable LIBRARY_ON_MAC"));
            assert!(err.ends_with("sometimes is not one of true/false/yes/no/1/0"));
        });
    }
}
