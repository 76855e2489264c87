use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};

use crate::modules::events::core::event::EventDraft;
use crate::modules::events::use_cases::errors::ApplicationError;
use crate::shell::http::{error_response, internal_error};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<EventDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.create_handler.handle(draft).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(ApplicationError::Domain(err)) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err @ ApplicationError::AlreadyExists(_)) => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "creating event failed");
            internal_error()
        }
    }
}
