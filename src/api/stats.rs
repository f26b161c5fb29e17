use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::error;

use super::AppState;
use crate::config::REFRESH_TOKEN;

pub async fn stats(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, body) = stats_outcome(&state).await;
    (status, Json(body))
}

/// Status and JSON body for a stats request.
///
/// Shared by the server route and the on-demand handler binary so both
/// answer identically. Missing configuration is reported as 503 before any
/// network call is made; Spotify failures become 500 with the detail.
pub async fn stats_outcome(state: &AppState) -> (StatusCode, Value) {
    let Some(refresh_token) = &state.config.refresh_token else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({
                "error": format!(
                    "Spotify refresh token not configured. Complete /auth/login first and set {REFRESH_TOKEN}."
                )
            }),
        );
    };

    let Some(client) = &state.spotify else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({
                "error": format!(
                    "Missing Spotify configuration: {}.",
                    state.config.missing_for_stats().join(", ")
                )
            }),
        );
    };

    match client.get_stats(refresh_token).await {
        Ok(stats) => match serde_json::to_value(&stats) {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => failure(e.to_string()),
        },
        Err(e) => failure(e.to_string()),
    }
}

fn failure(detail: String) -> (StatusCode, Value) {
    error!("failed to load stats: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "Failed to load Spotify stats.",
            "detail": detail,
        }),
    )
}
