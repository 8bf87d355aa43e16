//! Domain entities, their writable changes and list filters.

pub mod item;
pub mod link;
pub mod player;
pub mod room;
pub mod user;

pub use item::{Item, ItemChange, ItemFilter, Location, LocationType};
pub use link::{Link, LinkChange, LinkFilter};
pub use player::{Player, PlayerChange, PlayerFilter};
pub use room::{Room, RoomChange, RoomFilter};
pub use user::{User, UserChange, UserFilter};

use uuid::Uuid;

/// Id shared by every pre-seeded sentinel row.
pub const NIL_ID: Uuid = Uuid::from_u128(1);

/// The player "nobody": owner of anything whose owner was removed.
pub const NOBODY: Uuid = NIL_ID;

/// The room "nowhere": root of the room tree and fallback location.
pub const NOWHERE: Uuid = NIL_ID;

/// The item "nothing": fallback container for items.
pub const NOTHING: Uuid = NIL_ID;

pub const MAX_NAME_LEN: usize = 256;
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Offset and limit shared by every list filter. Zero means unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}
