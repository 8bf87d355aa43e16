//! Item storage. The item's location is a tagged union kept in three nullable
//! columns; exactly one of them is populated per row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{fetch_all, fetch_optional, execute, translate_remove_error, translate_write_error, Dialect, Reference, UniqueField};
use crate::error::AppError;
use crate::model::{Item, ItemChange, ItemFilter, Location};
use crate::sql::{self, BindValue};

const TABLE: &str = "items";
const COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "owner_id",
    "location_room_id",
    "location_player_id",
    "location_item_id",
    "created",
    "updated",
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self, filter: ItemFilter) -> Result<Vec<Item>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Item, AppError>;
    async fn create(&self, change: ItemChange) -> Result<Item, AppError>;
    async fn update(&self, id: Uuid, change: ItemChange) -> Result<Item, AppError>;
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: String,
    owner_id: Uuid,
    location_room_id: Option<Uuid>,
    location_player_id: Option<Uuid>,
    location_item_id: Option<Uuid>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = AppError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let location = match (row.location_room_id, row.location_player_id, row.location_item_id) {
            (Some(id), None, None) => Location::Room(id),
            (None, Some(id), None) => Location::Player(id),
            (None, None, Some(id)) => Location::Item(id),
            _ => {
                return Err(AppError::Internal(format!(
                    "item {} does not have exactly one location",
                    row.id
                )))
            }
        };
        Ok(Item {
            id: row.id,
            name: row.name,
            description: row.description,
            owner_id: row.owner_id,
            location,
            created: row.created,
            updated: row.updated,
        })
    }
}

/// Column holding a location of the given variant.
fn location_column(location: &Location) -> &'static str {
    match location {
        Location::Room(_) => "location_room_id",
        Location::Player(_) => "location_player_id",
        Location::Item(_) => "location_item_id",
    }
}

/// Spread a location over the three columns: the matching one gets the id,
/// the other two are NULL.
fn location_values(location: &Location) -> [(&'static str, BindValue); 3] {
    let (room, player, item) = match *location {
        Location::Room(id) => (Some(id), None, None),
        Location::Player(id) => (None, Some(id), None),
        Location::Item(id) => (None, None, Some(id)),
    };
    [
        ("location_room_id", room.into()),
        ("location_player_id", player.into()),
        ("location_item_id", item.into()),
    ]
}

fn predicates(filter: &ItemFilter) -> Vec<(&'static str, BindValue)> {
    let mut p = Vec::new();
    if let Some(name) = &filter.name {
        p.push(("name", name.as_str().into()));
    }
    if let Some(id) = filter.owner_id {
        p.push(("owner_id", id.into()));
    }
    if let Some(location) = &filter.location {
        p.push((location_column(location), location.id().into()));
    }
    p
}

fn values(change: &ItemChange) -> Vec<(&'static str, BindValue)> {
    let mut v = vec![
        ("name", change.name.as_str().into()),
        ("description", change.description.as_str().into()),
        ("owner_id", change.owner_id.into()),
    ];
    v.extend(location_values(&change.location));
    v
}

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
    dialect: Dialect,
}

impl PgItemStore {
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    fn write_error(&self, e: sqlx::Error, change: &ItemChange) -> AppError {
        let refs = [
            Reference::new("owner_id", "ownerID", change.owner_id),
            Reference::new(location_column(&change.location), "locationID", change.location.id()),
        ];
        translate_write_error(self.dialect, e, &refs, UniqueField { field: "name", value: &change.name })
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self, filter: ItemFilter) -> Result<Vec<Item>, AppError> {
        let q = sql::select_list(self.dialect, TABLE, COLUMNS, predicates(&filter), filter.page);
        let rows: Vec<ItemRow> = fetch_all(&self.pool, &q).await?;
        rows.into_iter().map(Item::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Item, AppError> {
        let q = sql::select_by_id(self.dialect, TABLE, COLUMNS, id);
        let row: ItemRow = fetch_optional(&self.pool, &q, AppError::Db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
        row.try_into()
    }

    async fn create(&self, change: ItemChange) -> Result<Item, AppError> {
        let q = sql::insert(self.dialect, TABLE, values(&change), COLUMNS);
        let row: ItemRow = fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no item".into()))?;
        let item = Item::try_from(row)?;
        tracing::info!(item_id = %item.id, name = %item.name, location = %item.location.kind(), "created item");
        Ok(item)
    }

    async fn update(&self, id: Uuid, change: ItemChange) -> Result<Item, AppError> {
        let q = sql::update(self.dialect, TABLE, id, values(&change), COLUMNS);
        let row: ItemRow = fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
        row.try_into()
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let q = sql::delete(self.dialect, TABLE, id);
        let removed = execute(&self.pool, &q, |e| translate_remove_error(self.dialect, e, "item", id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("item {}", id)));
        }
        tracing::info!(item_id = %id, "removed item");
        Ok(())
    }
}
