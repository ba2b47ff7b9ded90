//! Cache invalidation webhook.

use crate::{
    responses::{AppError, WebhookResponse},
    state::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use confab_core::{ChatEvent, ConfabError};
use serde_json::Value;
use tracing::{debug, warn};

/// Event type names the dispatcher understands. A payload whose `type`
/// matches one of these but fails to parse is malformed (400); a `type`
/// outside this list is acknowledged and ignored.
const KNOWN_EVENT_TYPES: &[&str] = &[
    "message.sent",
    "message.read",
    "message.reaction",
    "friend.request.sent",
    "friend.request.accepted",
    "conversation.member.change",
    "presence.heartbeat",
    "story.created",
    "room.user.join",
    "room.user.leave",
    "profile.updated",
    "support.ticket.updated",
];

/// Creates the invalidation webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/cache/invalidate", post(invalidate))
}

/// Receives a domain event and fans it out to cache-key deletions.
///
/// Unknown event types are not errors: backends ship new events before this
/// service learns about them, and an ignored event only delays freshness by
/// one TTL. Structurally invalid payloads (no `type` string, or a known
/// type with missing fields) are 400s.
async fn invalidate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<WebhookResponse>, AppError> {
    let event_type = body
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError(ConfabError::validation(
                "Event payload must carry a string 'type' field",
            ))
        })?
        .to_string();

    match serde_json::from_value::<ChatEvent>(body) {
        Ok(event) => {
            let deleted = state.dispatcher.dispatch(&event).await;
            debug!(event = %event_type, deleted, "invalidation webhook handled");
            Ok(Json(WebhookResponse { success: true }))
        }
        Err(e) if KNOWN_EVENT_TYPES.contains(&event_type.as_str()) => {
            Err(AppError(ConfabError::validation(format!(
                "Malformed '{}' event: {}",
                event_type, e
            ))))
        }
        Err(_) => {
            warn!(event = %event_type, "ignoring unknown invalidation event type");
            Ok(Json(WebhookResponse { success: true }))
        }
    }
}
