use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{ApiError, AppState, missing_config};

pub async fn login(State(state): State<AppState>) -> Result<Response, ApiError> {
    let (Some(client), Some(redirect_uri)) = (&state.spotify, &state.config.redirect_uri) else {
        return Err(missing_config(&state.config.missing_for_login()));
    };

    let url = client
        .authorize_url(redirect_uri)
        .map_err(|e| ApiError::Configuration(format!("Invalid Spotify accounts URL: {e}")))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
