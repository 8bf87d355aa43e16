//! Managers forward every call to their store. Business rules that span
//! requests belong here; today there are none.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::{
    Item, ItemChange, ItemFilter, Link, LinkChange, LinkFilter, Player, PlayerChange, PlayerFilter, Room,
    RoomChange, RoomFilter, User, UserChange, UserFilter,
};
use crate::store::{ItemStore, LinkStore, PlayerStore, RoomStore, UserStore};

#[derive(Clone)]
pub struct PlayerManager {
    store: Arc<dyn PlayerStore>,
}

impl PlayerManager {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: PlayerFilter) -> Result<Vec<Player>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Player, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, change: PlayerChange) -> Result<Player, AppError> {
        self.store.create(change).await
    }

    pub async fn update(&self, id: Uuid, change: PlayerChange) -> Result<Player, AppError> {
        self.store.update(id, change).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.remove(id).await
    }
}

#[derive(Clone)]
pub struct RoomManager {
    store: Arc<dyn RoomStore>,
}

impl RoomManager {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Room, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, change: RoomChange) -> Result<Room, AppError> {
        self.store.create(change).await
    }

    pub async fn update(&self, id: Uuid, change: RoomChange) -> Result<Room, AppError> {
        self.store.update(id, change).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.remove(id).await
    }
}

#[derive(Clone)]
pub struct ItemManager {
    store: Arc<dyn ItemStore>,
}

impl ItemManager {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: ItemFilter) -> Result<Vec<Item>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Item, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, change: ItemChange) -> Result<Item, AppError> {
        self.store.create(change).await
    }

    pub async fn update(&self, id: Uuid, change: ItemChange) -> Result<Item, AppError> {
        self.store.update(id, change).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.remove(id).await
    }
}

#[derive(Clone)]
pub struct LinkManager {
    store: Arc<dyn LinkStore>,
}

impl LinkManager {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Link, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, change: LinkChange) -> Result<Link, AppError> {
        self.store.create(change).await
    }

    pub async fn update(&self, id: Uuid, change: LinkChange) -> Result<Link, AppError> {
        self.store.update(id, change).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.remove(id).await
    }
}

#[derive(Clone)]
pub struct UserManager {
    store: Arc<dyn UserStore>,
}

impl UserManager {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
        self.store.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.store.get(id).await
    }

    pub async fn create(&self, change: UserChange) -> Result<User, AppError> {
        self.store.create(change).await
    }

    pub async fn update(&self, id: Uuid, change: UserChange) -> Result<User, AppError> {
        self.store.update(id, change).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.store.remove(id).await
    }
}
