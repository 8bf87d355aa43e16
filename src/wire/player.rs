use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_uuid, InvalidField};
use crate::model::{Player, PlayerChange};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerJson {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "homeID")]
    pub home_id: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Player> for PlayerJson {
    fn from(p: Player) -> Self {
        PlayerJson {
            id: p.id.to_string(),
            name: p.name,
            description: p.description,
            home_id: p.home_id.to_string(),
            location_id: p.location_id.to_string(),
            created: p.created,
            updated: p.updated,
        }
    }
}

impl TryFrom<PlayerJson> for Player {
    type Error = InvalidField;

    fn try_from(p: PlayerJson) -> Result<Self, Self::Error> {
        Ok(Player {
            id: parse_uuid("player", "id", &p.id)?,
            home_id: parse_uuid("player", "homeID", &p.home_id)?,
            location_id: parse_uuid("player", "locationID", &p.location_id)?,
            name: p.name,
            description: p.description,
            created: p.created,
            updated: p.updated,
        })
    }
}

/// Create/update body. Missing fields decode as empty and fail validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "homeID")]
    pub home_id: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
}

impl From<&PlayerChange> for PlayerRequest {
    fn from(c: &PlayerChange) -> Self {
        PlayerRequest {
            name: c.name.clone(),
            description: c.description.clone(),
            home_id: c.home_id.to_string(),
            location_id: c.location_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerEnvelope {
    pub player: PlayerJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersEnvelope {
    pub players: Vec<PlayerJson>,
}
