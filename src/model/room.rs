use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Page;

/// A room. Rooms form a tree rooted at [`super::NOWHERE`], which is its own parent.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub parent_id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomChange {
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub parent_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub page: Page,
}
