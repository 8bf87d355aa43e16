//! Link handlers: list, get, create, update, remove.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::parse_id;
use crate::error::AppError;
use crate::model::{LinkChange, LinkFilter, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::response::{created, ok};
use crate::service::{QueryParams, RequestValidator};
use crate::state::AppState;
use crate::wire::{LinkEnvelope, LinkJson, LinkRequest, LinksEnvelope};

fn validate(req: LinkRequest) -> Result<LinkChange, AppError> {
    RequestValidator::required("name", &req.name)?;
    RequestValidator::max_length("name", &req.name, MAX_NAME_LEN)?;
    RequestValidator::max_length("description", &req.description, MAX_DESCRIPTION_LEN)?;
    let owner_id = RequestValidator::uuid("ownerID", &req.owner_id)?;
    let location_id = RequestValidator::uuid("locationID", &req.location_id)?;
    let destination_id = RequestValidator::uuid("destinationID", &req.destination_id)?;
    Ok(LinkChange {
        name: req.name,
        description: req.description,
        owner_id,
        location_id,
        destination_id,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let q = QueryParams(&params);
    let filter = LinkFilter {
        name: q.string("name"),
        owner_id: q.uuid("ownerID")?,
        location_id: q.uuid("locationID")?,
        destination_id: q.uuid("destinationID")?,
        page: q.page()?,
    };
    let links = state.links.list(filter).await?;
    Ok(ok(LinksEnvelope {
        links: links.into_iter().map(LinkJson::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let link = state.links.get(id).await?;
    Ok(ok(LinkEnvelope { link: link.into() }))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let link = state.links.create(change).await?;
    Ok(created(LinkEnvelope { link: link.into() }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let link = state.links.update(id, change).await?;
    Ok(ok(LinkEnvelope { link: link.into() }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.links.remove(id).await?;
    Ok(StatusCode::OK)
}
