use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::shell::http::{error_response, internal_error};
use crate::shell::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventBody {
    pub event_id: String,
}

#[derive(Serialize)]
pub struct DeleteEventResponse {
    pub success: bool,
}

/// Removing an id that is not stored still succeeds.
pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<DeleteEventBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    if body.event_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "eventId is required");
    }

    match state.backend.remove(&body.event_id).await {
        Ok(()) => {
            tracing::info!(event_id = %body.event_id, "event deleted");
            Json(DeleteEventResponse { success: true }).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, event_id = %body.event_id, "deleting event failed");
            internal_error()
        }
    }
}
