//! Configuration management for spotistats.
//!
//! Configuration comes from environment variables, optionally seeded from
//! `.env` files. It is read exactly once at process start into a [`Config`]
//! value which is then handed to every component that needs it. Nothing in
//! the request path looks at the environment directly.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`spotistats/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{error::ConfigError, types::Credentials};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

pub const CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
pub const REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";

/// Loads `.env` files into the process environment.
///
/// The working directory is tried first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/spotistats/.env`
/// - macOS: `~/Library/Application Support/spotistats/.env`
/// - Windows: `%LOCALAPPDATA%/spotistats/.env`
///
/// Variables already present in the environment are never overwritten, and a
/// missing file is not an error. Returns the files that were actually loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotistats/.env");
    if path.is_file() && dotenv::from_path(&path).is_ok() {
        loaded.push(path);
    }

    loaded
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
}

/// Process-wide configuration, constructed once and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
    pub host: String,
    pub port: u16,
    pub tls: Option<TlsPaths>,
    pub static_dir: Option<PathBuf>,
    pub accounts_url: String,
    pub api_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. The only hard failures are an
    /// unparsable `PORT` and `USE_HTTPS=true` without both `SSL_KEY_PATH`
    /// and `SSL_CERT_PATH`; every other missing key is reported later by the
    /// route that needs it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let use_https = get("USE_HTTPS")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let tls = if use_https {
            match (get("SSL_KEY_PATH"), get("SSL_CERT_PATH")) {
                (Some(key), Some(cert)) => Some(TlsPaths {
                    key_path: PathBuf::from(key),
                    cert_path: PathBuf::from(cert),
                }),
                _ => return Err(ConfigError::MissingTlsPaths),
            }
        } else {
            None
        };

        Ok(Config {
            client_id: get(CLIENT_ID),
            client_secret: get(CLIENT_SECRET),
            redirect_uri: get(REDIRECT_URI),
            refresh_token: get(REFRESH_TOKEN),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            tls,
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            accounts_url: get("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or_else(|| SPOTIFY_ACCOUNTS_URL.to_string()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| SPOTIFY_API_URL.to_string()),
        })
    }

    /// Client credentials, if both halves are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }

    /// Keys the login and callback routes need but do not have.
    pub fn missing_for_login(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_none() {
            missing.push(CLIENT_ID);
        }
        if self.client_secret.is_none() {
            missing.push(CLIENT_SECRET);
        }
        if self.redirect_uri.is_none() {
            missing.push(REDIRECT_URI);
        }
        missing
    }

    /// Keys the stats route needs but does not have.
    pub fn missing_for_stats(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.is_none() {
            missing.push(CLIENT_ID);
        }
        if self.client_secret.is_none() {
            missing.push(CLIENT_SECRET);
        }
        if self.refresh_token.is_none() {
            missing.push(REFRESH_TOKEN);
        }
        missing
    }

    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() { "https" } else { "http" }
    }
}
