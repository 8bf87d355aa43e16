//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the entity tables.
//! Identifiers come from compile-time constants only; values are always parameters.

use super::params::{to_arguments, BindValue};
use crate::error::AppError;
use crate::model::Page;
use crate::store::Dialect;
use sqlx::postgres::PgArguments;
use uuid::Uuid;

/// Quote identifier (safe: only from constants).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
    dialect: Dialect,
}

impl QueryBuf {
    fn new(dialect: Dialect) -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Record a parameter and return its placeholder.
    fn push_param(&mut self, v: BindValue) -> String {
        self.params.push(v);
        self.dialect.placeholder(self.params.len())
    }

    pub fn arguments(&self) -> Result<PgArguments, AppError> {
        to_arguments(&self.params)
    }
}

/// SELECT with one equality predicate per filter field, ordered by creation,
/// with LIMIT and OFFSET only when positive.
pub fn select_list(
    dialect: Dialect,
    table: &str,
    columns: &[&str],
    predicates: Vec<(&str, BindValue)>,
    page: Page,
) -> QueryBuf {
    let mut q = QueryBuf::new(dialect);
    let mut where_parts = Vec::new();
    for (col, val) in predicates {
        let ph = q.push_param(val);
        where_parts.push(format!("{} = {}", quoted(col), ph));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let limit_clause = if page.limit > 0 {
        format!(" LIMIT {}", page.limit)
    } else {
        String::new()
    };
    let offset_clause = if page.offset > 0 {
        format!(" OFFSET {}", page.offset)
    } else {
        String::new()
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}, {}{}{}",
        column_list(columns),
        quoted(table),
        where_clause,
        quoted("created"),
        quoted("id"),
        limit_clause,
        offset_clause
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(dialect: Dialect, table: &str, columns: &[&str], id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new(dialect);
    let ph = q.push_param(id.into());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        column_list(columns),
        quoted(table),
        quoted("id"),
        ph
    );
    q
}

/// INSERT the given column values; id and timestamps come from column defaults.
pub fn insert(
    dialect: Dialect,
    table: &str,
    values: Vec<(&str, BindValue)>,
    returning: &[&str],
) -> QueryBuf {
    let mut q = QueryBuf::new(dialect);
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (col, val) in values {
        cols.push(quoted(col));
        placeholders.push(q.push_param(val));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table),
        cols.join(", "),
        placeholders.join(", "),
        column_list(returning)
    );
    q
}

/// UPDATE by id: full replace of the given columns, `updated` refreshed.
pub fn update(
    dialect: Dialect,
    table: &str,
    id: Uuid,
    values: Vec<(&str, BindValue)>,
    returning: &[&str],
) -> QueryBuf {
    let mut q = QueryBuf::new(dialect);
    let mut sets = Vec::with_capacity(values.len() + 1);
    for (col, val) in values {
        let ph = q.push_param(val);
        sets.push(format!("{} = {}", quoted(col), ph));
    }
    sets.push(format!("{} = now()", quoted("updated")));
    let id_ph = q.push_param(id.into());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(table),
        sets.join(", "),
        quoted("id"),
        id_ph,
        column_list(returning)
    );
    q
}

/// DELETE by id.
pub fn delete(dialect: Dialect, table: &str, id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new(dialect);
    let ph = q.push_param(id.into());
    q.sql = format!("DELETE FROM {} WHERE {} = {}", quoted(table), quoted("id"), ph);
    q
}
