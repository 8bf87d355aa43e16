use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Page;

#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub home_id: Uuid,
    pub location_id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Writable player fields, used by both create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerChange {
    pub name: String,
    pub description: String,
    pub home_id: Uuid,
    pub location_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub home_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub page: Page,
}
