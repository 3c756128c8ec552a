// III-IV
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

//! Generic data types and validation support for any service.
//!
//! Services define their own plain data shapes and construct them from untrusted input via
//! validation passes.  A validation pass does not stop at the first problem: it records every
//! failing field into a `ValidationErrors` and only builds the final value when nothing failed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Bound, RangeBounds};

/// Model errors for values that are individually malformed.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Part of the request where an invalid field came from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// The request body.
    Body,

    /// A cookie.
    Cookie,

    /// A request header.
    Header,

    /// A path parameter.
    Path,

    /// A query parameter.
    Query,
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldLocation::Body => "body",
            FieldLocation::Cookie => "cookie",
            FieldLocation::Header => "header",
            FieldLocation::Path => "path",
            FieldLocation::Query => "query",
        };
        f.write_str(name)
    }
}

/// Describes why a single input field failed validation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldError {
    /// Where the field came from.
    pub location: FieldLocation,

    /// Name of the field as the client spelled it.
    pub field: String,

    /// Human-readable explanation of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new<F: Into<String>, M: Into<String>>(
        location: FieldLocation,
        field: F,
        message: M,
    ) -> Self {
        Self { location, field: field.into(), message: message.into() }
    }

    /// Creates an error for a field that was required but not provided.
    pub fn missing<F: Into<String>>(location: FieldLocation, field: F) -> Self {
        Self::new(location, field, "Field required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parameter '{}': {}", self.location, self.field, self.message)
    }
}

/// Outcome of a validation pass: the collection of all fields that failed.
#[derive(Debug, Default, PartialEq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Records a failed field.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Consumes the outcome of validating a single field, recording the error if there was one.
    ///
    /// On error, returns a default value so that the pass can continue with the remaining fields.
    /// Callers must check `into_result` before using any value obtained this way.
    pub fn check<T: Default>(&mut self, result: Result<T, FieldError>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.0.push(e);
                T::default()
            }
        }
    }

    /// Returns the individual field errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terminates the validation pass, failing if any field failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(e: FieldError) -> Self {
        Self(vec![e])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("Validation failed");
        }
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "Invalid {}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks that a numeric `value` for `field` lies within `range`.
pub fn check_range<T, R>(
    location: FieldLocation,
    field: &str,
    value: T,
    range: R,
) -> Result<T, FieldError>
where
    T: PartialOrd + fmt::Display,
    R: RangeBounds<T>,
{
    match range.start_bound() {
        Bound::Included(min) if value < *min => {
            return Err(FieldError::new(
                location,
                field,
                format!("Input should be greater than or equal to {}", min),
            ));
        }
        Bound::Excluded(min) if value <= *min => {
            return Err(FieldError::new(
                location,
                field,
                format!("Input should be greater than {}", min),
            ));
        }
        _ => (),
    }
    match range.end_bound() {
        Bound::Included(max) if value > *max => {
            return Err(FieldError::new(
                location,
                field,
                format!("Input should be less than or equal to {}", max),
            ));
        }
        Bound::Excluded(max) if value >= *max => {
            return Err(FieldError::new(
                location,
                field,
                format!("Input should be less than {}", max),
            ));
        }
        _ => (),
    }
    Ok(value)
}

/// Checks that the length of `value` for `field`, in characters, is within `[min, max]`.
pub fn check_length(
    location: FieldLocation,
    field: &str,
    value: String,
    min: usize,
    max: usize,
) -> Result<String, FieldError> {
    let length = value.chars().count();
    if length < min {
        return Err(FieldError::new(
            location,
            field,
            format!("String should have at least {} characters", min),
        ));
    }
    if length > max {
        return Err(FieldError::new(
            location,
            field,
            format!("String should have at most {} characters", max),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_inclusive() {
        assert_eq!(0, check_range(FieldLocation::Query, "skip", 0, 0..=5).unwrap());
        assert_eq!(5, check_range(FieldLocation::Query, "skip", 5, 0..=5).unwrap());
        assert_eq!(
            FieldError::new(
                FieldLocation::Query,
                "skip",
                "Input should be less than or equal to 5"
            ),
            check_range(FieldLocation::Query, "skip", 6, 0..=5).unwrap_err()
        );
        assert_eq!(
            FieldError::new(
                FieldLocation::Query,
                "skip",
                "Input should be greater than or equal to 0"
            ),
            check_range(FieldLocation::Query, "skip", -1, 0..=5).unwrap_err()
        );
    }

    #[test]
    fn test_check_range_exclusive_start() {
        let range = (Bound::Excluded(0), Bound::Included(100));
        assert_eq!(1, check_range(FieldLocation::Query, "limit", 1, range).unwrap());
        assert_eq!(
            "Input should be greater than 0",
            check_range(FieldLocation::Query, "limit", 0, range).unwrap_err().message
        );
    }

    #[test]
    fn test_check_range_open_end() {
        assert_eq!(1000, check_range(FieldLocation::Query, "offset", 1000, 0..).unwrap());
    }

    #[test]
    fn test_check_length() {
        assert_eq!("abc", check_length(FieldLocation::Query, "q", "abc".to_owned(), 3, 5).unwrap());
        assert_eq!(
            "String should have at least 3 characters",
            check_length(FieldLocation::Query, "q", "ab".to_owned(), 3, 5).unwrap_err().message
        );
        assert_eq!(
            "String should have at most 5 characters",
            check_length(FieldLocation::Query, "q", "abcdef".to_owned(), 3, 5)
                .unwrap_err()
                .message
        );
        let accented = "\u{00e9}\u{00e9}\u{00e9}".to_owned();
        assert!(check_length(FieldLocation::Query, "q", accented, 3, 3).is_ok());
    }

    #[test]
    fn test_validation_errors_collects_all() {
        let mut errors = ValidationErrors::default();
        let a: i64 = errors.check(Err(FieldError::missing(FieldLocation::Query, "a")));
        let b: i64 = errors.check(Ok(7));
        let c: i64 =
            errors.check(Err(FieldError::new(FieldLocation::Path, "c", "Something is off")));
        assert_eq!((0, 7, 0), (a, b, c));
        assert_eq!(2, errors.errors().len());

        let err = errors.into_result().unwrap_err();
        assert_eq!(
            "Invalid query parameter 'a': Field required; \
            Invalid path parameter 'c': Something is off",
            err.to_string()
        );
    }

    #[test]
    fn test_validation_errors_empty_is_ok() {
        let errors = ValidationErrors::default();
        assert!(errors.is_empty());
        errors.into_result().unwrap();
    }

    #[test]
    fn test_field_error_serialization() {
        let e = FieldError::new(FieldLocation::Header, "x-token", "Field required");
        assert_eq!(
            serde_json::json!({
                "location": "header",
                "field": "x-token",
                "message": "Field required",
            }),
            serde_json::to_value(&e).unwrap()
        );
    }
}
