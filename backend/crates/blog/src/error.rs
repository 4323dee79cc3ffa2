//! Blog Error Types

use async_graphql::ErrorExtensions;
use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::global_id::GlobalIdError;
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Tag matching query does not exist")]
    TagNotFound,

    #[error("Blog matching query does not exist")]
    BlogNotFound,

    /// Caller is authenticated but does not own the row
    #[error("You do not own this {resource}")]
    NotOwner { resource: &'static str },

    /// Malformed input or id
    #[error("{0}")]
    Validation(String),

    /// Login required, token problems, user lookups
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::TagNotFound | BlogError::BlogNotFound => ErrorKind::NotFound,
            BlogError::NotOwner { .. } => ErrorKind::Forbidden,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Auth(e) => e.kind(),
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl ErrorExtensions for BlogError {
    fn extend(&self) -> async_graphql::Error {
        match self {
            // Keep the auth crate's own logging and messages
            BlogError::Auth(e) => e.extend(),
            _ => {
                self.log();
                self.to_app_error().extend()
            }
        }
    }
}

impl From<GlobalIdError> for BlogError {
    fn from(err: GlobalIdError) -> Self {
        BlogError::Validation(err.to_string())
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            BlogError::Validation(err.message().to_string())
        } else {
            BlogError::Internal(err.to_string())
        }
    }
}
