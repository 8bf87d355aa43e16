use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_uuid, InvalidField};
use crate::model::{Room, RoomChange};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomJson {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Room> for RoomJson {
    fn from(r: Room) -> Self {
        RoomJson {
            id: r.id.to_string(),
            name: r.name,
            description: r.description,
            owner_id: r.owner_id.to_string(),
            parent_id: r.parent_id.to_string(),
            created: r.created,
            updated: r.updated,
        }
    }
}

impl TryFrom<RoomJson> for Room {
    type Error = InvalidField;

    fn try_from(r: RoomJson) -> Result<Self, Self::Error> {
        Ok(Room {
            id: parse_uuid("room", "id", &r.id)?,
            owner_id: parse_uuid("room", "ownerID", &r.owner_id)?,
            parent_id: parse_uuid("room", "parentID", &r.parent_id)?,
            name: r.name,
            description: r.description,
            created: r.created,
            updated: r.updated,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
}

impl From<&RoomChange> for RoomRequest {
    fn from(c: &RoomChange) -> Self {
        RoomRequest {
            name: c.name.clone(),
            description: c.description.clone(),
            owner_id: c.owner_id.to_string(),
            parent_id: c.parent_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomEnvelope {
    pub room: RoomJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomsEnvelope {
    pub rooms: Vec<RoomJson>,
}
