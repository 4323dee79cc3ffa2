//! User Name Value Object
//!
//! ユーザー名は、ログインとトークンのクレームに使われる一意な識別子。
//!
//! ## 設計方針
//! - NFKC正規化してから検証する
//! - 大文字・小文字は区別する（正規形への小文字化は行わない）
//! - Unicodeの英字・数字と `@ . + - _` を許可
//!
//! ## 不変条件
//! - 長さ: 1〜150文字（正規化後）
//! - 空白・制御文字を含まない

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains invalid character
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "This field cannot be blank"),
            Self::TooLong { length, max } => {
                write!(
                    f,
                    "Ensure this value has at most {max} characters (it has {length})"
                )
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Enter a valid username. Invalid character '{char}' at position {position}; \
                     only letters, numbers, and @/./+/-/_ are allowed"
                )
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies NFKC normalization and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(normalized: &str) -> Result<(), UserNameError> {
        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some((position, char)) = normalized
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_allowed_char(*c))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        Ok(())
    }

    #[inline]
    fn is_allowed_char(c: char) -> bool {
        c.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
