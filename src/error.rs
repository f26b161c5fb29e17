//! Error types shared by the Spotify client, the HTTP front and the binaries.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which Spotify service answered with a failure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Token,
    Api,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Token => f.write_str("token"),
            Endpoint::Api => f.write_str("API"),
        }
    }
}

/// A non-success response from Spotify. The body is kept verbatim.
#[derive(Debug, Clone, Error)]
#[error("Spotify {endpoint} request failed ({}): {body}", .status.as_u16())]
pub struct ProviderError {
    pub endpoint: Endpoint,
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Spotify request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SpotifyError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SpotifyError::Provider(e) => Some(e.status),
            SpotifyError::Transport(e) => e.status(),
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct AggregationError(pub String);

impl From<SpotifyError> for AggregationError {
    fn from(err: SpotifyError) -> Self {
        AggregationError(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("USE_HTTPS=true requires SSL_KEY_PATH and SSL_CERT_PATH.")]
    MissingTlsPaths,
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {0}")]
    Address(String),
    #[error("failed to read TLS material from {path}: {source}")]
    TlsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
