//! Room read endpoints.

use crate::{
    extractors::CurrentUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use confab_cache::{keys, CacheStoreExt, Namespace};
use confab_core::RoomId;
use serde_json::Value;
use tracing::debug;

/// Creates the room router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(public_rooms))
        .route("/rooms/:id", get(room_details))
}

/// The public room directory.
async fn public_rooms(State(state): State<AppState>, _user: CurrentUser) -> ApiResult<Value> {
    debug!("Public room directory");

    let backend = state.backend.clone();
    let value = state
        .store
        .get_or_set(
            &keys::public_rooms(),
            Namespace::PublicRooms.ttl(),
            || async move { backend.public_rooms().await },
        )
        .await?;
    ok(value)
}

/// One room's details.
async fn room_details(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    debug!("Room details for {}", id);

    let room_id = RoomId::new(id);
    let key = keys::room_details(&room_id);
    let backend = state.backend.clone();

    let value = state
        .store
        .get_or_set(&key, Namespace::Rooms.ttl(), || async move {
            backend.room(&room_id).await
        })
        .await?;
    ok(value)
}
