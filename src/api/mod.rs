//! # API Module
//!
//! HTTP endpoints of the spotistats server. Every request is independent:
//! handlers only read the shared [`AppState`], which is built once at
//! start-up and never mutated.
//!
//! ## Endpoints
//!
//! - [`login`] - `GET /auth/login`, redirects to the Spotify consent screen
//! - [`callback`] - `GET /auth/callback`, exchanges the authorization code
//!   and shows the refresh token to the operator
//! - [`stats`] - `GET /stats`, top artists and last played track as JSON
//! - [`health`] - `GET /health`, status and version
//!
//! ## Errors
//!
//! Failures are converted to responses at the route boundary through
//! [`ApiError`]; nothing propagates past a handler. The stats route answers
//! with JSON bodies, the auth routes with plain text.

mod callback;
mod health;
mod login;
mod stats;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

pub use callback::{CallbackParams, callback, confirmation_page};
pub use health::health;
pub use login::login;
pub use stats::{stats, stats_outcome};

use crate::{config::Config, spotify::SpotifyClient};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: Option<SpotifyClient>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let spotify = SpotifyClient::from_config(&config);
        AppState {
            config: Arc::new(config),
            spotify,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Required configuration is not set.
    Configuration(String),
    /// The callback request itself is unusable.
    ClientInput(String),
    /// Authorization succeeded but no refresh token was granted.
    Consent,
    /// The code exchange with Spotify failed.
    Exchange(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Configuration(msg) => {
                warn!("{msg}");
                (StatusCode::SERVICE_UNAVAILABLE, msg).into_response()
            }
            ApiError::ClientInput(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Consent => {
                warn!("authorization completed without a refresh token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "No refresh token returned. Re-authorize and ensure consent was granted.",
                )
                    .into_response()
            }
            ApiError::Exchange(msg) => {
                error!("code exchange failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to exchange code: {msg}"),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn missing_config(keys: &[&str]) -> ApiError {
    ApiError::Configuration(format!(
        "Missing Spotify configuration: {}.",
        keys.join(", ")
    ))
}
