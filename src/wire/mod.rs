//! JSON shapes exchanged by the REST handlers and the client.
//!
//! Ids travel as strings: the server renders them from domain values and the
//! client parses them back, reporting anything malformed as [`InvalidField`].

mod item;
mod link;
mod player;
mod room;
mod user;

pub use item::{ItemEnvelope, ItemJson, ItemRequest, ItemsEnvelope, LocationJson};
pub use link::{LinkEnvelope, LinkJson, LinkRequest, LinksEnvelope};
pub use player::{PlayerEnvelope, PlayerJson, PlayerRequest, PlayersEnvelope};
pub use room::{RoomEnvelope, RoomJson, RoomRequest, RoomsEnvelope};
pub use user::{UserEnvelope, UserJson, UserRequest, UsersEnvelope};

use thiserror::Error;
use uuid::Uuid;

/// A response field that did not decode into its domain type.
#[derive(Debug, Error)]
#[error("received invalid {entity} {field} '{value}'")]
pub struct InvalidField {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
}

pub(crate) fn parse_uuid(entity: &'static str, field: &'static str, value: &str) -> Result<Uuid, InvalidField> {
    Uuid::parse_str(value).map_err(|_| InvalidField {
        entity,
        field,
        value: value.to_string(),
    })
}
