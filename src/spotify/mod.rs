//! # Spotify Integration Module
//!
//! The integration layer between spotistats and Spotify. It performs three
//! things and nothing else:
//!
//! ```text
//! HTTP Front / CLI
//!          ↓
//! Spotify Integration Layer
//!     ├── Token Exchanger   (auth)      POST {accounts}/api/token
//!     ├── Resource Fetcher  (resources) GET  {api}/...
//!     └── Stats Aggregator  (stats)     refresh → top artists ∥ recently played
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! A [`SpotifyClient`] holds the client credentials and service base URLs
//! taken from [`Config`](crate::config::Config) at start-up. It is cheap to
//! clone and carries no per-request state: every access token it obtains is
//! used for one aggregation and then dropped.
//!
//! There is no caching, retry or rate-limit handling here. A non-success
//! status from Spotify becomes a [`ProviderError`](crate::error::ProviderError)
//! with the response body kept verbatim.

pub mod auth;
pub mod resources;
pub mod stats;

use reqwest::{Client, Response};

use crate::{
    config::Config,
    error::{Endpoint, ProviderError, SpotifyError},
    types::Credentials,
};

pub const SCOPES: &str = "user-top-read user-read-recently-played";

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    credentials: Credentials,
    accounts_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials, accounts_url: &str, api_url: &str) -> Self {
        SpotifyClient {
            http: Client::new(),
            credentials,
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from the configuration, or `None` when the client
    /// credentials are not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .credentials()
            .map(|credentials| Self::new(credentials, &config.accounts_url, &config.api_url))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.accounts_url)
    }

    pub fn authorize_base_url(&self) -> String {
        format!("{}/authorize", self.accounts_url)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Passes a success response through, or captures status and body of a
/// failed one.
async fn check_status(endpoint: Endpoint, res: Response) -> Result<Response, SpotifyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(ProviderError {
        endpoint,
        status,
        body,
    }
    .into())
}
