//! Storage adapters: one per entity, all speaking the Postgres wire protocol.
//! Also owns pool setup, migrations, and translation of database errors.

pub mod item;
pub mod link;
pub mod player;
pub mod room;
pub mod user;

pub use item::{ItemStore, PgItemStore};
pub use link::{LinkStore, PgLinkStore};
pub use player::{PgPlayerStore, PlayerStore};
pub use room::{PgRoomStore, RoomStore};
pub use user::{PgUserStore, UserStore};

#[cfg(test)]
pub use item::MockItemStore;
#[cfg(test)]
pub use link::MockLinkStore;
#[cfg(test)]
pub use player::MockPlayerStore;
#[cfg(test)]
pub use room::MockRoomStore;
#[cfg(test)]
pub use user::MockUserStore;

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::sql::QueryBuf;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// SQL flavour of the backing database.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Cockroach,
}

/// SQLSTATE codes a dialect reports for constraint violations.
#[derive(Clone, Copy, Debug)]
pub struct ViolationCodes {
    pub foreign_key: &'static str,
    pub unique: &'static str,
}

const POSTGRES_CODES: ViolationCodes = ViolationCodes {
    foreign_key: "23503",
    unique: "23505",
};

// Cockroach reports the Postgres SQLSTATEs for both violations.
const COCKROACH_CODES: ViolationCodes = ViolationCodes {
    foreign_key: "23503",
    unique: "23505",
};

impl Dialect {
    /// Positional placeholder for the n-th (1-based) parameter.
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Dialect::Postgres | Dialect::Cockroach => format!("${}", n),
        }
    }

    pub fn codes(&self) -> ViolationCodes {
        match self {
            Dialect::Postgres => POSTGRES_CODES,
            Dialect::Cockroach => COCKROACH_CODES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Cockroach => "cockroach",
        }
    }
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "cockroach" | "cockroachdb" => Ok(Dialect::Cockroach),
            _ => Err(ConfigError::Invalid {
                name: "DATABASE_DIALECT",
                value: s.to_string(),
            }),
        }
    }
}

/// Connect a pool sized from config.
pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Create the tables and seed the sentinel rows.
pub async fn run_migrations(pool: &PgPool, dialect: Dialect) -> Result<(), AppError> {
    let result = match dialect {
        Dialect::Postgres => sqlx::migrate!("./migrations/postgres").run(pool).await,
        Dialect::Cockroach => {
            // No advisory locks in Cockroach.
            let mut migrator = sqlx::migrate!("./migrations/cockroach");
            migrator.set_locking(false);
            migrator.run(pool).await
        }
    };
    result.map_err(|e| AppError::Internal(format!("failed to migrate {} schema: {}", dialect.as_str(), e)))
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let (base_and_path, query) = match url.split_once('?') {
        Some((head, q)) => (head, format!("?{}", q)),
        None => (url, String::new()),
    };
    let authority_start = base_and_path
        .find("://")
        .map(|i| i + 3)
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no scheme".into()))?;
    let path_start = match base_and_path[authority_start..].find('/') {
        Some(i) => authority_start + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let (base, db_name) = base_and_path.split_at(path_start);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// One reference column written by a statement, used to name the culprit
/// of a foreign key violation.
#[derive(Clone, Copy, Debug)]
pub struct Reference {
    pub column: &'static str,
    pub field: &'static str,
    pub id: Uuid,
}

impl Reference {
    pub fn new(column: &'static str, field: &'static str, id: Uuid) -> Self {
        Reference { column, field, id }
    }
}

/// The unique value written by a statement.
#[derive(Clone, Copy, Debug)]
pub struct UniqueField<'a> {
    pub field: &'static str,
    pub value: &'a str,
}

/// Map a failed INSERT/UPDATE into bad-request for constraint violations and
/// internal for everything else.
pub fn translate_write_error(
    dialect: Dialect,
    err: sqlx::Error,
    refs: &[Reference],
    unique: UniqueField<'_>,
) -> AppError {
    let codes = dialect.codes();
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        if code.as_deref() == Some(codes.foreign_key) {
            return AppError::BadRequest(missing_reference_message(db_err.constraint(), refs));
        }
        if code.as_deref() == Some(codes.unique) {
            return AppError::BadRequest(format!("{} '{}' already exists", unique.field, unique.value));
        }
    }
    AppError::Db(err)
}

/// Map a failed DELETE. A foreign key violation here means the default a
/// dependent row would fall back to is the row being removed (a sentinel).
pub fn translate_remove_error(dialect: Dialect, err: sqlx::Error, entity: &str, id: Uuid) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(dialect.codes().foreign_key) {
            return AppError::BadRequest(format!("{} {} is still referenced and cannot be removed", entity, id));
        }
    }
    AppError::Db(err)
}

fn missing_reference_message(constraint: Option<&str>, refs: &[Reference]) -> String {
    let named: Vec<&Reference> = match constraint {
        Some(c) => refs.iter().filter(|r| c.contains(r.column)).collect(),
        None => Vec::new(),
    };
    let culprits: Vec<&Reference> = if named.is_empty() { refs.iter().collect() } else { named };
    let listed = culprits
        .iter()
        .map(|r| format!("{} '{}'", r.field, r.id))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("invalid reference: {} does not exist", listed)
}

pub(crate) async fn fetch_all<T>(pool: &PgPool, q: &QueryBuf) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let rows = sqlx::query_as_with::<_, T, _>(&q.sql, q.arguments()?)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub(crate) async fn fetch_optional<T, F>(pool: &PgPool, q: &QueryBuf, on_err: F) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: FnOnce(sqlx::Error) -> AppError,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    sqlx::query_as_with::<_, T, _>(&q.sql, q.arguments()?)
        .fetch_optional(pool)
        .await
        .map_err(on_err)
}

/// Execute a statement and return the number of affected rows.
pub(crate) async fn execute<F>(pool: &PgPool, q: &QueryBuf, on_err: F) -> Result<u64, AppError>
where
    F: FnOnce(sqlx::Error) -> AppError,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let result = sqlx::query_with(&q.sql, q.arguments()?)
        .execute(pool)
        .await
        .map_err(on_err)?;
    Ok(result.rows_affected())
}
