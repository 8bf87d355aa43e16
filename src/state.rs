//! Shared application state for the v1 routes.

use crate::service::{ItemManager, LinkManager, PlayerManager, RoomManager, UserManager};
use crate::store::{Dialect, PgItemStore, PgLinkStore, PgPlayerStore, PgRoomStore, PgUserStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub players: PlayerManager,
    pub rooms: RoomManager,
    pub items: ItemManager,
    pub links: LinkManager,
    pub users: UserManager,
}

impl AppState {
    /// Managers backed by the SQL stores for `dialect`.
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        AppState {
            players: PlayerManager::new(Arc::new(PgPlayerStore::new(pool.clone(), dialect))),
            rooms: RoomManager::new(Arc::new(PgRoomStore::new(pool.clone(), dialect))),
            items: ItemManager::new(Arc::new(PgItemStore::new(pool.clone(), dialect))),
            links: LinkManager::new(Arc::new(PgLinkStore::new(pool.clone(), dialect))),
            users: UserManager::new(Arc::new(PgUserStore::new(pool, dialect))),
        }
    }
}
