//! `UserNode` projection

use async_graphql::{ID, Object};
use chrono::{DateTime, Utc};

use crate::domain::entity::user::User;

/// Public view of a User; the password hash is not reachable from here
#[derive(Debug, Clone)]
pub struct UserNode(pub User);

impl From<User> for UserNode {
    fn from(user: User) -> Self {
        Self(user)
    }
}

#[Object(name = "UserNode")]
impl UserNode {
    /// The ID of the object
    pub async fn id(&self) -> ID {
        ID(self.0.user_id.to_global_id())
    }

    async fn username(&self) -> &str {
        self.0.user_name.as_str()
    }

    async fn email(&self) -> &str {
        self.0.email.as_str()
    }

    async fn date_joined(&self) -> DateTime<Utc> {
        self.0.date_joined
    }

    async fn last_login(&self) -> Option<DateTime<Utc>> {
        self.0.last_login
    }
}
