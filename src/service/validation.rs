//! Request validation helpers. Handlers call them in a fixed order so the
//! first failing rule decides the error: body present, JSON well formed,
//! required fields, length limits, ids, then location tags.

use crate::error::AppError;
use crate::model::{LocationType, Page};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use uuid::Uuid;

pub struct RequestValidator;

impl RequestValidator {
    /// Decode a JSON body, rejecting empty and malformed input.
    pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(AppError::BadRequest("request body is required".into()));
        }
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))
    }

    pub fn required(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{} is required", field)));
        }
        Ok(())
    }

    /// Length limit in characters, not bytes.
    pub fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.chars().count() > max {
            return Err(AppError::BadRequest(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
        Ok(())
    }

    pub fn uuid(field: &str, value: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(value.trim()).map_err(|_| AppError::BadRequest(format!("invalid {} '{}'", field, value)))
    }

    /// Location tag; required whenever a location id was supplied.
    pub fn location_type(value: &str) -> Result<LocationType, AppError> {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest("locationType is required with locationID".into()));
        }
        value.parse()
    }
}

/// Query-string accessors for list filters.
pub struct QueryParams<'a>(pub &'a HashMap<String, String>);

impl QueryParams<'_> {
    /// Non-empty string parameter.
    pub fn string(&self, name: &str) -> Option<String> {
        self.0.get(name).filter(|v| !v.is_empty()).cloned()
    }

    pub fn uuid(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        self.string(name).map(|v| RequestValidator::uuid(name, &v)).transpose()
    }

    pub fn location_type(&self) -> Result<Option<LocationType>, AppError> {
        self.string("locationType").map(|v| v.parse()).transpose()
    }

    pub fn page(&self) -> Result<Page, AppError> {
        Ok(Page {
            offset: self.count("offset")?,
            limit: self.count("limit")?,
        })
    }

    fn count(&self, name: &str) -> Result<u32, AppError> {
        match self.string(name) {
            Some(v) => v
                .parse()
                .map_err(|_| AppError::BadRequest(format!("{} must be a non-negative integer", name))),
            None => Ok(0),
        }
    }
}
