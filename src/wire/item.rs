use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_uuid, InvalidField};
use crate::model::{Item, ItemChange, Location, LocationType};

/// Nested item location: `{"id": "<uuid>", "type": "room|player|item"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationJson {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Location> for LocationJson {
    fn from(l: Location) -> Self {
        LocationJson {
            id: l.id().to_string(),
            kind: l.kind().as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemJson {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    pub location: LocationJson,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<Item> for ItemJson {
    fn from(i: Item) -> Self {
        ItemJson {
            id: i.id.to_string(),
            name: i.name,
            description: i.description,
            owner_id: i.owner_id.to_string(),
            location: i.location.into(),
            created: i.created,
            updated: i.updated,
        }
    }
}

impl TryFrom<ItemJson> for Item {
    type Error = InvalidField;

    fn try_from(i: ItemJson) -> Result<Self, Self::Error> {
        let kind: LocationType = i.location.kind.parse().map_err(|_| InvalidField {
            entity: "item",
            field: "location type",
            value: i.location.kind.clone(),
        })?;
        let location_id = parse_uuid("item", "locationID", &i.location.id)?;
        Ok(Item {
            id: parse_uuid("item", "id", &i.id)?,
            owner_id: parse_uuid("item", "ownerID", &i.owner_id)?,
            location: Location::new(kind, location_id),
            name: i.name,
            description: i.description,
            created: i.created,
            updated: i.updated,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "ownerID")]
    pub owner_id: String,
    pub location: LocationJson,
}

impl From<&ItemChange> for ItemRequest {
    fn from(c: &ItemChange) -> Self {
        ItemRequest {
            name: c.name.clone(),
            description: c.description.clone(),
            owner_id: c.owner_id.to_string(),
            location: c.location.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub item: ItemJson,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsEnvelope {
    pub items: Vec<ItemJson>,
}
