//! Item handlers: list, get, create, update, remove.
//!
//! Item locations arrive as a nested `{id, type}` object on writes and as the
//! `locationID` + `locationType` pair on list queries.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::parse_id;
use crate::error::AppError;
use crate::model::{ItemChange, ItemFilter, Location, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::response::{created, ok};
use crate::service::{QueryParams, RequestValidator};
use crate::state::AppState;
use crate::wire::{ItemEnvelope, ItemJson, ItemRequest, ItemsEnvelope};

fn validate(req: ItemRequest) -> Result<ItemChange, AppError> {
    RequestValidator::required("name", &req.name)?;
    RequestValidator::max_length("name", &req.name, MAX_NAME_LEN)?;
    RequestValidator::max_length("description", &req.description, MAX_DESCRIPTION_LEN)?;
    let owner_id = RequestValidator::uuid("ownerID", &req.owner_id)?;
    let location_id = RequestValidator::uuid("locationID", &req.location.id)?;
    let kind = RequestValidator::location_type(&req.location.kind)?;
    Ok(ItemChange {
        name: req.name,
        description: req.description,
        owner_id,
        location: Location::new(kind, location_id),
    })
}

fn location_filter(q: &QueryParams<'_>) -> Result<Option<Location>, AppError> {
    match (q.uuid("locationID")?, q.location_type()?) {
        (Some(id), Some(kind)) => Ok(Some(Location::new(kind, id))),
        (Some(_), None) => Err(AppError::BadRequest("locationType is required with locationID".into())),
        (None, Some(_)) => Err(AppError::BadRequest("locationID is required with locationType".into())),
        (None, None) => Ok(None),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let q = QueryParams(&params);
    let filter = ItemFilter {
        name: q.string("name"),
        owner_id: q.uuid("ownerID")?,
        location: location_filter(&q)?,
        page: q.page()?,
    };
    let items = state.items.list(filter).await?;
    Ok(ok(ItemsEnvelope {
        items: items.into_iter().map(ItemJson::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let item = state.items.get(id).await?;
    Ok(ok(ItemEnvelope { item: item.into() }))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let item = state.items.create(change).await?;
    Ok(created(ItemEnvelope { item: item.into() }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let item = state.items.update(id, change).await?;
    Ok(ok(ItemEnvelope { item: item.into() }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.items.remove(id).await?;
    Ok(StatusCode::OK)
}
