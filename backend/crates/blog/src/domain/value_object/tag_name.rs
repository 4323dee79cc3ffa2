//! Tag Name Value Object
//!
//! Trimmed, 1 to 255 characters.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Maximum tag name length (in characters)
pub const TAG_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Tag name cannot be blank"));
        }

        let length = name.chars().count();
        if length > TAG_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Ensure this value has at most {} characters (it has {})",
                TAG_NAME_MAX_LENGTH, length
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
