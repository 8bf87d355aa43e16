use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::Page;

/// A one-way connector from `location_id` to `destination_id`.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Link {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub location_id: Uuid,
    pub destination_id: Uuid,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkChange {
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub location_id: Uuid,
    pub destination_id: Uuid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkFilter {
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub page: Page,
}
