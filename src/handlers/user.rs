//! User account handlers: list, get, create, update, remove.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::parse_id;
use crate::error::AppError;
use crate::model::user::MAX_ACCOUNT_LEN;
use crate::model::{UserChange, UserFilter};
use crate::response::{created, ok};
use crate::service::{QueryParams, RequestValidator};
use crate::state::AppState;
use crate::wire::{UserEnvelope, UserJson, UserRequest, UsersEnvelope};

fn validate(req: UserRequest) -> Result<UserChange, AppError> {
    RequestValidator::required("account", &req.account)?;
    RequestValidator::max_length("account", &req.account, MAX_ACCOUNT_LEN)?;
    let player_id = RequestValidator::uuid("playerID", &req.player_id)?;
    Ok(UserChange {
        account: req.account,
        player_id,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let q = QueryParams(&params);
    let filter = UserFilter {
        account: q.string("account"),
        player_id: q.uuid("playerID")?,
        page: q.page()?,
    };
    let users = state.users.list(filter).await?;
    Ok(ok(UsersEnvelope {
        users: users.into_iter().map(UserJson::from).collect(),
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let user = state.users.get(id).await?;
    Ok(ok(UserEnvelope { user: user.into() }))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let user = state.users.create(change).await?;
    Ok(created(UserEnvelope { user: user.into() }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let change = validate(RequestValidator::parse_body(&body)?)?;
    let user = state.users.update(id, change).await?;
    Ok(ok(UserEnvelope { user: user.into() }))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.users.remove(id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_request, json_request, send, MockStores};
    use crate::error::AppError;
    use crate::model::{User, NOBODY};
    use axum::http::StatusCode;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(account: &str, player_id: Uuid) -> User {
        User {
            id: Uuid::new_v4(),
            account: account.to_string(),
            player_id,
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_returns_201_with_the_account() {
        let mut stores = MockStores::default();
        stores
            .users
            .expect_create()
            .withf(|c| c.account == "alice@example.org" && c.player_id == NOBODY)
            .times(1)
            .returning(|c| Ok(user(&c.account, c.player_id)));
        let body = format!(r#"{{"account":"alice@example.org","playerID":"{}"}}"#, NOBODY);
        let (status, json) = send(stores.into_router(), json_request("POST", "/v1/user", &body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["user"]["account"], "alice@example.org");
        assert_eq!(json["user"]["playerID"], NOBODY.to_string());
    }

    #[tokio::test]
    async fn account_is_required() {
        let body = format!(r#"{{"account":"  ","playerID":"{}"}}"#, NOBODY);
        let (status, json) = send(MockStores::default().into_router(), json_request("POST", "/v1/user", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "bad request: account is required");
    }

    #[tokio::test]
    async fn overlong_account_is_rejected() {
        let body = format!(r#"{{"account":"{}","playerID":"{}"}}"#, "a".repeat(257), NOBODY);
        let (status, json) = send(MockStores::default().into_router(), json_request("POST", "/v1/user", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "bad request: account must be at most 256 characters");
    }

    #[tokio::test]
    async fn list_filters_by_player() {
        let player = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores
            .users
            .expect_list()
            .withf(move |f| f.player_id == Some(player) && f.account.is_none())
            .returning(move |_| Ok(vec![user("bob", player)]));
        let uri = format!("/v1/user?playerID={}", player);
        let (status, json) = send(stores.into_router(), empty_request("GET", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["users"].as_array().unwrap().len(), 1);
        assert_eq!(json["users"][0]["playerID"], player.to_string());
    }

    #[tokio::test]
    async fn duplicate_account_passes_through_as_bad_request() {
        let id = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores
            .users
            .expect_update()
            .returning(|_, c| Err(AppError::BadRequest(format!("account '{}' already exists", c.account))));
        let body = format!(r#"{{"account":"bob","playerID":"{}"}}"#, NOBODY);
        let (status, json) = send(
            stores.into_router(),
            json_request("PUT", &format!("/v1/user/{}", id), &body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "bad request: account 'bob' already exists");
    }

    #[tokio::test]
    async fn remove_missing_user_is_not_found() {
        let id = Uuid::new_v4();
        let mut stores = MockStores::default();
        stores
            .users
            .expect_remove()
            .returning(|id| Err(AppError::NotFound(format!("user {}", id))));
        let (status, json) = send(stores.into_router(), empty_request("DELETE", &format!("/v1/user/{}", id))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["detail"], format!("not found: user {}", id));
    }
}
