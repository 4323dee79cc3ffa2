//! Blog Title Value Object
//!
//! At most 255 characters. An empty title is allowed.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const BLOG_TITLE_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlogTitle(String);

impl BlogTitle {
    pub fn new(title: impl Into<String>) -> AppResult<Self> {
        let title = title.into();

        let length = title.chars().count();
        if length > BLOG_TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Ensure this value has at most {} characters (it has {})",
                BLOG_TITLE_MAX_LENGTH, length
            )));
        }

        Ok(Self(title))
    }

    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
