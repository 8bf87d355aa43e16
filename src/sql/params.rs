//! Typed query parameters and their conversion into sqlx arguments.

use crate::error::AppError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use uuid::Uuid;

/// A value bound to a positional placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Uuid(Uuid),
    /// Nullable uuid column, e.g. one of the item location columns.
    OptUuid(Option<Uuid>),
    Text(String),
}

impl BindValue {
    fn add_to(&self, args: &mut PgArguments) -> Result<(), AppError> {
        let added = match self {
            BindValue::Uuid(u) => args.add(*u),
            BindValue::OptUuid(u) => args.add(*u),
            BindValue::Text(s) => args.add(s.clone()),
        };
        added.map_err(|e| AppError::Internal(format!("failed to bind query parameter: {}", e)))
    }
}

impl From<Uuid> for BindValue {
    fn from(u: Uuid) -> Self {
        BindValue::Uuid(u)
    }
}

impl From<Option<Uuid>> for BindValue {
    fn from(u: Option<Uuid>) -> Self {
        BindValue::OptUuid(u)
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

/// Collect params, in placeholder order, into one argument buffer.
pub fn to_arguments(params: &[BindValue]) -> Result<PgArguments, AppError> {
    let mut args = PgArguments::default();
    for p in params {
        p.add_to(&mut args)?;
    }
    Ok(args)
}
