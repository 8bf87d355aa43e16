//! Domain managers (the seam between REST handlers and storage) and request validation.

mod manager;
mod validation;
pub use manager::{ItemManager, LinkManager, PlayerManager, RoomManager, UserManager};
pub use validation::{QueryParams, RequestValidator};
