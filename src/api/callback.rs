use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, AppState, missing_config};
use crate::{config::REFRESH_TOKEN, success, types::Grant};

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Html<String>, ApiError> {
    if let Some(error) = params.error.filter(|e| !e.is_empty()) {
        return Err(ApiError::ClientInput(format!("Spotify auth error: {error}")));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::ClientInput(
            "Missing authorization code.".to_string(),
        ));
    };

    let (Some(client), Some(redirect_uri)) = (&state.spotify, &state.config.redirect_uri) else {
        return Err(missing_config(&state.config.missing_for_login()));
    };

    let grant = Grant::AuthorizationCode {
        code,
        redirect_uri: redirect_uri.clone(),
    };

    let token = client
        .exchange(&grant)
        .await
        .map_err(|e| ApiError::Exchange(e.to_string()))?;

    let Some(refresh_token) = token.refresh_token else {
        return Err(ApiError::Consent);
    };

    info!("authorization code exchanged for a refresh token");
    success!("Spotify connected. Copy the refresh token from the browser into {REFRESH_TOKEN}.");

    Ok(Html(confirmation_page(&refresh_token)))
}

/// Page shown once the operator has granted access.
pub fn confirmation_page(refresh_token: &str) -> String {
    format!(
        "<h2>Spotify connected.</h2><p>Copy this into your .env as <code>{REFRESH_TOKEN}</code>:</p><pre>{}</pre>",
        escape_html(refresh_token)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
