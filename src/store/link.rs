use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_all, fetch_optional, execute, translate_remove_error, translate_write_error, Dialect, Reference, UniqueField};
use crate::error::AppError;
use crate::model::{Link, LinkChange, LinkFilter};
use crate::sql::{self, BindValue};

const TABLE: &str = "links";
const COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "owner_id",
    "location_id",
    "destination_id",
    "created",
    "updated",
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Link, AppError>;
    async fn create(&self, change: LinkChange) -> Result<Link, AppError>;
    async fn update(&self, id: Uuid, change: LinkChange) -> Result<Link, AppError>;
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgLinkStore {
    pool: PgPool,
    dialect: Dialect,
}

impl PgLinkStore {
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    fn write_error(&self, e: sqlx::Error, change: &LinkChange) -> AppError {
        let refs = [
            Reference::new("owner_id", "ownerID", change.owner_id),
            Reference::new("location_id", "locationID", change.location_id),
            Reference::new("destination_id", "destinationID", change.destination_id),
        ];
        translate_write_error(self.dialect, e, &refs, UniqueField { field: "name", value: &change.name })
    }
}

fn predicates(filter: &LinkFilter) -> Vec<(&'static str, BindValue)> {
    let mut p = Vec::new();
    if let Some(name) = &filter.name {
        p.push(("name", name.as_str().into()));
    }
    if let Some(id) = filter.owner_id {
        p.push(("owner_id", id.into()));
    }
    if let Some(id) = filter.location_id {
        p.push(("location_id", id.into()));
    }
    if let Some(id) = filter.destination_id {
        p.push(("destination_id", id.into()));
    }
    p
}

fn values(change: &LinkChange) -> Vec<(&'static str, BindValue)> {
    vec![
        ("name", change.name.as_str().into()),
        ("description", change.description.as_str().into()),
        ("owner_id", change.owner_id.into()),
        ("location_id", change.location_id.into()),
        ("destination_id", change.destination_id.into()),
    ]
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn list(&self, filter: LinkFilter) -> Result<Vec<Link>, AppError> {
        let q = sql::select_list(self.dialect, TABLE, COLUMNS, predicates(&filter), filter.page);
        fetch_all(&self.pool, &q).await
    }

    async fn get(&self, id: Uuid) -> Result<Link, AppError> {
        let q = sql::select_by_id(self.dialect, TABLE, COLUMNS, id);
        fetch_optional(&self.pool, &q, AppError::Db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("link {}", id)))
    }

    async fn create(&self, change: LinkChange) -> Result<Link, AppError> {
        let q = sql::insert(self.dialect, TABLE, values(&change), COLUMNS);
        let link: Link = fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no link".into()))?;
        tracing::info!(link_id = %link.id, name = %link.name, "created link");
        Ok(link)
    }

    async fn update(&self, id: Uuid, change: LinkChange) -> Result<Link, AppError> {
        let q = sql::update(self.dialect, TABLE, id, values(&change), COLUMNS);
        fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("link {}", id)))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let q = sql::delete(self.dialect, TABLE, id);
        let removed = execute(&self.pool, &q, |e| translate_remove_error(self.dialect, e, "link", id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("link {}", id)));
        }
        Ok(())
    }
}
