use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{fetch_all, fetch_optional, execute, translate_remove_error, translate_write_error, Dialect, Reference, UniqueField};
use crate::error::AppError;
use crate::model::{User, UserChange, UserFilter};
use crate::sql::{self, BindValue};

const TABLE: &str = "users";
const COLUMNS: &[&str] = &["id", "account", "player_id", "created", "updated"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, AppError>;
    async fn get(&self, id: Uuid) -> Result<User, AppError>;
    async fn create(&self, change: UserChange) -> Result<User, AppError>;
    async fn update(&self, id: Uuid, change: UserChange) -> Result<User, AppError>;
    async fn remove(&self, id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
    dialect: Dialect,
}

impl PgUserStore {
    pub fn new(pool: PgPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    fn write_error(&self, e: sqlx::Error, change: &UserChange) -> AppError {
        let refs = [Reference::new("player_id", "playerID", change.player_id)];
        translate_write_error(self.dialect, e, &refs, UniqueField { field: "account", value: &change.account })
    }
}

fn predicates(filter: &UserFilter) -> Vec<(&'static str, BindValue)> {
    let mut p = Vec::new();
    if let Some(account) = &filter.account {
        p.push(("account", account.as_str().into()));
    }
    if let Some(id) = filter.player_id {
        p.push(("player_id", id.into()));
    }
    p
}

fn values(change: &UserChange) -> Vec<(&'static str, BindValue)> {
    vec![
        ("account", change.account.as_str().into()),
        ("player_id", change.player_id.into()),
    ]
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self, filter: UserFilter) -> Result<Vec<User>, AppError> {
        let q = sql::select_list(self.dialect, TABLE, COLUMNS, predicates(&filter), filter.page);
        fetch_all(&self.pool, &q).await
    }

    async fn get(&self, id: Uuid) -> Result<User, AppError> {
        let q = sql::select_by_id(self.dialect, TABLE, COLUMNS, id);
        fetch_optional(&self.pool, &q, AppError::Db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    async fn create(&self, change: UserChange) -> Result<User, AppError> {
        let q = sql::insert(self.dialect, TABLE, values(&change), COLUMNS);
        let user: User = fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::Internal("insert returned no user".into()))?;
        tracing::info!(user_id = %user.id, player_id = %user.player_id, "created user");
        Ok(user)
    }

    async fn update(&self, id: Uuid, change: UserChange) -> Result<User, AppError> {
        let q = sql::update(self.dialect, TABLE, id, values(&change), COLUMNS);
        fetch_optional(&self.pool, &q, |e| self.write_error(e, &change))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))
    }

    async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let q = sql::delete(self.dialect, TABLE, id);
        let removed = execute(&self.pool, &q, |e| translate_remove_error(self.dialect, e, "user", id)).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }
}
