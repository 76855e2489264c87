use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};

use crate::modules::events::core::event::Event;
use crate::modules::events::use_cases::errors::ApplicationError;
use crate::shell::http::{error_response, internal_error};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<Vec<Event>>, JsonRejection>,
) -> impl IntoResponse {
    let Json(events) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.replace_handler.handle(events).await {
        Ok(events) => Json(events).into_response(),
        Err(ApplicationError::Domain(err)) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => {
            tracing::error!(error = %err, "replacing events failed");
            internal_error()
        }
    }
}
