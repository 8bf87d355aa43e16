use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Page;
use crate::error::AppError;

/// Where an item is: inside a room, carried by a player, or inside another item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Room(Uuid),
    Player(Uuid),
    Item(Uuid),
}

impl Location {
    pub fn new(kind: LocationType, id: Uuid) -> Self {
        match kind {
            LocationType::Room => Location::Room(id),
            LocationType::Player => Location::Player(id),
            LocationType::Item => Location::Item(id),
        }
    }

    pub fn id(&self) -> Uuid {
        match *self {
            Location::Room(id) | Location::Player(id) | Location::Item(id) => id,
        }
    }

    pub fn kind(&self) -> LocationType {
        match self {
            Location::Room(_) => LocationType::Room,
            Location::Player(_) => LocationType::Player,
            Location::Item(_) => LocationType::Item,
        }
    }
}

/// The location tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocationType {
    Room,
    Player,
    Item,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Room => "room",
            LocationType::Player => "player",
            LocationType::Item => "item",
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LocationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "room" => Ok(LocationType::Room),
            "player" => Ok(LocationType::Player),
            "item" => Ok(LocationType::Item),
            _ => Err(AppError::BadRequest(format!(
                "invalid location type '{}' (expected room, player or item)",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub location: Location,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemChange {
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub location: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub location: Option<Location>,
    pub page: Page,
}
