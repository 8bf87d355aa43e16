use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_all, fetch_optional, execute, translate_remove_error, translate_write_error, Dialect, Reference, UniqueField};
use crate::error::AppError;
use crate::model::{Player, PlayerChange, PlayerFilter};
use crate::sql::{self, BindValue};

const TABLE: &str = "players";
const COLUMNS: &[&str] = &["id", "name", "description", "home_id", "location_id", "created", "updated"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn list(&self, filter: PlayerFilter) -> Result<Vec<Player>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Player, AppError>;
    async fn create(&self, change: PlayerChange) -> Result<Player, AppError>;
    async fn update(&self, id: Uuid, change: PlayerChange) -> Result<Player, AppError>;
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
    dialect: Dialect,
}

impl PgPlayerStore {
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }
}

fn predicates(filter: &PlayerFilter) -> Vec<(&'static str, BindValue)> {
    let mut p = Vec::new();
    if let Some(name) = &filter.name {
        p.push(("name", name.as_str().into()));
    }
    if let Some(id) = filter.home_id {
        p.push(("home_id", id.into()));
    }
    if let Some(id) = filter.location_id {
        p.push(("location_id", id.into()));
    }
    p
}

fn values(change: &PlayerChange) -> Vec<(&'static str, BindValue)> {
    vec![
        ("name", change.name.as_str().into()),
        ("description", change.description.as_str().into()),
        ("home_id", change.home_id.into()),
        ("location_id", change.location_id.into()),
    ]
}

fn references(change: &PlayerChange) -> [Reference; 2] {
    [
        Reference::new("home_id", "homeID", change.home_id),
        Reference::new("location_id", "locationID", change.location_id),
    ]
}

#[async_trait]
impl PlayerStore for PgPlayerStore {
    async fn list(&self, filter: PlayerFilter) -> Result<Vec<Player>, AppError> {
        let q = sql::select_list(self.dialect, TABLE, COLUMNS, predicates(&filter), filter.page);
        fetch_all(&self.pool, &q).await
    }

    async fn get(&self, id: Uuid) -> Result<Player, AppError> {
        let q = sql::select_by_id(self.dialect, TABLE, COLUMNS, id);
        fetch_optional(&self.pool, &q, AppError::Db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("player {}", id)))
    }

    async fn create(&self, change: PlayerChange) -> Result<Player, AppError> {
        let q = sql::insert(self.dialect, TABLE, values(&change), COLUMNS);
        let player: Player = fetch_optional(&self.pool, &q, |e| {
            translate_write_error(
                self.dialect,
                e,
                &references(&change),
                UniqueField { field: "name", value: &change.name },
            )
        })
        .await?
        .ok_or_else(|| AppError::Internal("insert returned no player".into()))?;
        tracing::info!(player_id = %player.id, name = %player.name, "created player");
        Ok(player)
    }

    async fn update(&self, id: Uuid, change: PlayerChange) -> Result<Player, AppError> {
        let q = sql::update(self.dialect, TABLE, id, values(&change), COLUMNS);
        fetch_optional(&self.pool, &q, |e| {
            translate_write_error(
                self.dialect,
                e,
                &references(&change),
                UniqueField { field: "name", value: &change.name },
            )
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("player {}", id)))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let q = sql::delete(self.dialect, TABLE, id);
        let removed = execute(&self.pool, &q, |e| translate_remove_error(self.dialect, e, "player", id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("player {}", id)));
        }
        tracing::info!(player_id = %id, "removed player");
        Ok(())
    }
}
