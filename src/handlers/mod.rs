//! HTTP handlers for the v1 entity routes.

pub mod item;
pub mod link;
pub mod player;
pub mod room;
pub mod user;

use crate::error::AppError;
use uuid::Uuid;

/// Path id segment as a uuid.
fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}
