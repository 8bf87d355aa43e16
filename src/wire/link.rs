use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_uuid, InvalidField};
use crate::model::{Link, LinkChange};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkJson {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
    #[serde(rename = "destinationID")]
    pub destination_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Link> for LinkJson {
    fn from(l: Link) -> Self {
        LinkJson {
            id: l.id.to_string(),
            name: l.name,
            description: l.description,
            owner_id: l.owner_id.to_string(),
            location_id: l.location_id.to_string(),
            destination_id: l.destination_id.to_string(),
            created: l.created,
            updated: l.updated,
        }
    }
}

impl TryFrom<LinkJson> for Link {
    type Error = InvalidField;

    fn try_from(l: LinkJson) -> Result<Self, Self::Error> {
        Ok(Link {
            id: parse_uuid("link", "id", &l.id)?,
            owner_id: parse_uuid("link", "ownerID", &l.owner_id)?,
            location_id: parse_uuid("link", "locationID", &l.location_id)?,
            destination_id: parse_uuid("link", "destinationID", &l.destination_id)?,
            name: l.name,
            description: l.description,
            created: l.created,
            updated: l.updated,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    #[serde(rename = "locationID")]
    pub location_id: String,
    #[serde(rename = "destinationID")]
    pub destination_id: String,
}

impl From<&LinkChange> for LinkRequest {
    fn from(c: &LinkChange) -> Self {
        LinkRequest {
            name: c.name.clone(),
            description: c.description.clone(),
            owner_id: c.owner_id.to_string(),
            location_id: c.location_id.to_string(),
            destination_id: c.destination_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkEnvelope {
    pub link: LinkJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinksEnvelope {
    pub links: Vec<LinkJson>,
}
