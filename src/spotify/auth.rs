use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::debug;
use url::Url;

use super::{SCOPES, SpotifyClient, check_status};
use crate::{
    error::{Endpoint, SpotifyError},
    types::{Credentials, Grant, TokenResult},
};

/// `Basic` authorization value for the client credentials.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

impl SpotifyClient {
    /// Exchanges a grant for an access token.
    ///
    /// Sends a single form-encoded POST to the accounts service's token
    /// endpoint, authenticated with the client credentials as HTTP Basic.
    ///
    /// # Returns
    ///
    /// - `Ok(TokenResult)` - the parsed token response
    /// - `Err(SpotifyError::Provider)` - Spotify answered with a non-success
    ///   status; the body is kept verbatim
    /// - `Err(SpotifyError::Transport)` - the request failed or the body was
    ///   not a token response
    ///
    /// # Refresh tokens
    ///
    /// The presence of `refresh_token` is not checked here. A refresh-token
    /// grant normally comes back without one; for the authorization-code
    /// grant the caller decides what an absent refresh token means.
    pub async fn exchange(&self, grant: &Grant) -> Result<TokenResult, SpotifyError> {
        debug!(grant_type = grant.grant_type(), "requesting access token");

        let res = self
            .http
            .post(self.token_url())
            .header(
                reqwest::header::AUTHORIZATION,
                basic_auth_header(&self.credentials),
            )
            .form(&grant.form())
            .send()
            .await?;

        let res = check_status(Endpoint::Token, res).await?;
        let token: TokenResult = res.json().await?;

        debug!(
            expires_at = ?token.expires_at(),
            has_refresh_token = token.refresh_token.is_some(),
            "access token obtained"
        );
        Ok(token)
    }

    /// Builds the consent screen URL the login route redirects to.
    pub fn authorize_url(&self, redirect_uri: &str) -> Result<String, url::ParseError> {
        let url = Url::parse_with_params(
            &self.authorize_base_url(),
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", redirect_uri),
                ("scope", SCOPES),
            ],
        )?;
        Ok(url.into())
    }
}
