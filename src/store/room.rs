use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_all, fetch_optional, execute, translate_remove_error, translate_write_error, Dialect, Reference, UniqueField};
use crate::error::AppError;
use crate::model::{Room, RoomChange, RoomFilter};
use crate::sql::{self, BindValue};

const TABLE: &str = "rooms";
const COLUMNS: &[&str] = &["id", "name", "description", "owner_id", "parent_id", "created", "updated"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Room, AppError>;
    async fn create(&self, change: RoomChange) -> Result<Room, AppError>;
    async fn update(&self, id: Uuid, change: RoomChange) -> Result<Room, AppError>;
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgRoomStore {
    pool: PgPool,
    dialect: Dialect,
}

impl PgRoomStore {
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    fn write_error(&self, e: sqlx::Error, change: &RoomChange) -> AppError {
        let refs = [
            Reference::new("owner_id", "ownerID", change.owner_id),
            Reference::new("parent_id", "parentID", change.parent_id),
        ];
        translate_write_error(self.dialect, e, &refs, UniqueField { field: "name", value: &change.name })
    }
}

fn predicates(filter: &RoomFilter) -> Vec<(&'static str, BindValue)> {
    let mut p = Vec::new();
    if let Some(name) = &filter.name {
        p.push(("name", name.as_str().into()));
    }
    if let Some(id) = filter.owner_id {
        p.push(("owner_id", id.into()));
    }
    if let Some(id) = filter.parent_id {
        p.push(("parent_id", id.into()));
    }
    p
}

fn values(change: &RoomChange) -> Vec<(&'static str, BindValue)> {
    vec![
        ("name", change.name.as_str().into()),
        ("description", change.description.as_str().into()),
        ("owner_id", change.owner_id.into()),
        ("parent_id", change.parent_id.into()),
    ]
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn list(&self, filter: RoomFilter) -> Result<Vec<Room>, AppError> {
        let q = sql::select_list(self.dialect, TABLE, COLUMNS, predicates(&filter), filter.page);
        fetch_all(&self.pool, &q).await
    }

    async fn get(&self, id: Uuid) -> Result<Room, AppError> {
        let q = sql::select_by_id(self.dialect, TABLE, COLUMNS, id);
        fetch_optional(&self.pool, &q, AppError::Db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("room {}", id)))
    }

    async fn create(&self, change: RoomChange) -> Result<Room, AppError> {
        let q = sql::insert(self.dialect, TABLE, values(&change), COLUMNS);
        let room: Room = fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no room".into()))?;
        tracing::info!(room_id = %room.id, name = %room.name, "created room");
        Ok(room)
    }

    async fn update(&self, id: Uuid, change: RoomChange) -> Result<Room, AppError> {
        let q = sql::update(self.dialect, TABLE, id, values(&change), COLUMNS);
        fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("room {}", id)))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let q = sql::delete(self.dialect, TABLE, id);
        let removed = execute(&self.pool, &q, |e| translate_remove_error(self.dialect, e, "room", id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("room {}", id)));
        }
        tracing::info!(room_id = %id, "removed room");
        Ok(())
    }
}
