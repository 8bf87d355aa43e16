//! Player handlers: list, get, create, update, remove.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::parse_id;
use crate::error::AppError;
use crate::model::{PlayerChange, PlayerFilter, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::response::{created, ok};
use crate::service::{QueryParams, RequestValidator};
use crate::state::AppState;
use crate::wire::{PlayerEnvelope, PlayerJson, PlayerRequest, PlayersEnvelope};

fn validate(req: PlayerRequest) -> Result<PlayerChange, AppError> {
    RequestValidator::required("name", &req.name)?;
    RequestValidator::max_length("name", &req.name, MAX_NAME_LEN)?;
    RequestValidator::max_length("description", &req.description, MAX_DESCRIPTION_LEN)?;
    let home_id = RequestValidator::uuid("homeID", &req.home_id)?;
    let location_id = RequestValidator::uuid("locationID", &req.location_id)?;
    Ok(PlayerChange {
        name: req.name,
        description: req.description,
        home_id,
        location_id,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let q = QueryParams(&params);
    let filter = PlayerFilter {
        name: q.string("name"),
        home_id: q.uuid("homeID")?,
        location_id: q.uuid("locationID")?,
        page: q.page()?,
    };
    let players = state.players.list(filter).await?;
    Ok(ok(PlayersEnvelope {
        players: players.into_iter().map(PlayerJson::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let player = state.players.get(id).await?;
    Ok(ok(PlayerEnvelope { player: player.into() }))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let player = state.players.create(change).await?;
    Ok(created(PlayerEnvelope { player: player.into() }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let player = state.players.update(id, change).await?;
    Ok(ok(PlayerEnvelope { player: player.into() }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.players.remove(id).await?;
    Ok(StatusCode::OK)
}
