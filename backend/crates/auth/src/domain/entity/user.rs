//! User Entity
//!
//! Registered account. The password hash never leaves the auth crate's
//! application layer.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Storage-assigned identifier
    pub user_id: UserId,
    /// User name (unique, case-sensitive)
    pub user_name: UserName,
    pub email: Email,
    /// Argon2id hash
    pub password: UserPassword,
    pub date_joined: DateTime<Utc>,
    /// Last successful `tokenAuth`
    pub last_login: Option<DateTime<Utc>>,
}

/// A user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    pub fn new(user_name: UserName, email: Email, password: UserPassword) -> Self {
        Self {
            user_name,
            email,
            password,
            date_joined: Utc::now(),
        }
    }

    /// Attach the id assigned by storage
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            user_name: self.user_name,
            email: self.email,
            password: self.password,
            date_joined: self.date_joined,
            last_login: None,
        }
    }
}
