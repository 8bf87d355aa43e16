use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_uuid, InvalidField};
use crate::model::{User, UserChange};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserJson {
    pub id: String,
    pub account: String,
    #[serde(rename = "playerID")]
    pub player_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<User> for UserJson {
    fn from(u: User) -> Self {
        UserJson {
            id: u.id.to_string(),
            account: u.account,
            player_id: u.player_id.to_string(),
            created: u.created,
            updated: u.updated,
        }
    }
}

impl TryFrom<UserJson> for User {
    type Error = InvalidField;

    fn try_from(u: UserJson) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_uuid("user", "id", &u.id)?,
            player_id: parse_uuid("user", "playerID", &u.player_id)?,
            account: u.account,
            created: u.created,
            updated: u.updated,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub account: String,
    #[serde(rename = "playerID")]
    pub player_id: String,
}

impl From<&UserChange> for UserRequest {
    fn from(c: &UserChange) -> Self {
        UserRequest {
            account: c.account.clone(),
            player_id: c.player_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<UserJson>,
}
