use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::modules::events::core::category::Category;
use crate::modules::events::core::filters::{events_on, in_category};
use crate::shell::http::internal_error;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListEventsParams {
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> impl IntoResponse {
    match state.backend.fetch_all().await {
        Ok(events) => {
            let events = in_category(&events, params.category);
            let events = match params.date {
                Some(day) => events_on(&events, day),
                None => events,
            };
            Json(events).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "listing events failed");
            internal_error()
        }
    }
}
