//! Versioned entity routes: `/v1/<entity>` and `/v1/<entity>/:id` for each entity.

use crate::handlers::{item, link, player, room, user};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn v1_routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/player", get(player::list).post(player::create))
        .route(
            "/v1/player/:id",
            get(player::get).put(player::update).delete(player::remove),
        )
        .route("/v1/room", get(room::list).post(room::create))
        .route("/v1/room/:id", get(room::get).put(room::update).delete(room::remove))
        .route("/v1/item", get(item::list).post(item::create))
        .route("/v1/item/:id", get(item::get).put(item::update).delete(item::remove))
        .route("/v1/link", get(link::list).post(link::create))
        .route("/v1/link/:id", get(link::get).put(link::update).delete(link::remove))
        .route("/v1/user", get(user::list).post(user::create))
        .route("/v1/user/:id", get(user::get).put(user::update).delete(user::remove))
        .with_state(state)
}
