//! User accounts: an external login bound to a player record.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Page;

pub const MAX_ACCOUNT_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Uuid,
    /// Identifier issued by the external login provider, e.g. `github|1234`.
    pub account: String,
    pub player_id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserChange {
    pub account: String,
    pub player_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub account: Option<String>,
    pub player_id: Option<Uuid>,
    pub page: Page,
}
