//! Room handlers: list, get, create, update, remove.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::parse_id;
use crate::error::AppError;
use crate::model::{RoomChange, RoomFilter, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::response::{created, ok};
use crate::service::{QueryParams, RequestValidator};
use crate::state::AppState;
use crate::wire::{RoomEnvelope, RoomJson, RoomRequest, RoomsEnvelope};

fn validate(req: RoomRequest) -> Result<RoomChange, AppError> {
    RequestValidator::required("name", &req.name)?;
    RequestValidator::max_length("name", &req.name, MAX_NAME_LEN)?;
    RequestValidator::max_length("description", &req.description, MAX_DESCRIPTION_LEN)?;
    let owner_id = RequestValidator::uuid("ownerID", &req.owner_id)?;
    let parent_id = RequestValidator::uuid("parentID", &req.parent_id)?;
    Ok(RoomChange {
        name: req.name,
        description: req.description,
        owner_id,
        parent_id,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let q = QueryParams(&params);
    let filter = RoomFilter {
        name: q.string("name"),
        owner_id: q.uuid("ownerID")?,
        parent_id: q.uuid("parentID")?,
        page: q.page()?,
    };
    let rooms = state.rooms.list(filter).await?;
    Ok(ok(RoomsEnvelope {
        rooms: rooms.into_iter().map(RoomJson::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let room = state.rooms.get(id).await?;
    Ok(ok(RoomEnvelope { room: room.into() }))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let room = state.rooms.create(change).await?;
    Ok(created(RoomEnvelope { room: room.into() }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let room = state.rooms.update(id, change).await?;
    Ok(ok(RoomEnvelope { room: room.into() }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.rooms.remove(id).await?;
    Ok(StatusCode::OK)
}
