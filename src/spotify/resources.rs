use serde::de::DeserializeOwned;
use tracing::debug;

use super::{SpotifyClient, check_status};
use crate::{
    error::{Endpoint, SpotifyError},
    types::{RecentlyPlayedResponse, TopArtistsResponse},
};

pub const TOP_ARTISTS_PATH: &str = "/me/top/artists?time_range=short_term&limit=3";
pub const RECENTLY_PLAYED_PATH: &str = "/me/player/recently-played?limit=1";

impl SpotifyClient {
    /// Issues one authenticated GET against the Web API.
    ///
    /// `path` is appended to the API base URL as-is, query string included.
    /// A non-success status fails with the same `ProviderError` contract as
    /// the token exchange.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: &str,
    ) -> Result<T, SpotifyError> {
        let url = format!("{}{}", self.api_url(), path);
        debug!(%path, "fetching Spotify resource");

        let res = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let res = check_status(Endpoint::Api, res).await?;
        Ok(res.json::<T>().await?)
    }

    pub async fn top_artists(&self, access_token: &str) -> Result<TopArtistsResponse, SpotifyError> {
        self.fetch(TOP_ARTISTS_PATH, access_token).await
    }

    pub async fn recently_played(
        &self,
        access_token: &str,
    ) -> Result<RecentlyPlayedResponse, SpotifyError> {
        self.fetch(RECENTLY_PLAYED_PATH, access_token).await
    }
}
