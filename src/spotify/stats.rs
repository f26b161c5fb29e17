use tracing::info;

use super::SpotifyClient;
use crate::{
    error::AggregationError,
    types::{
        ArtistSummary, Grant, RecentlyPlayedResponse, StatsResponse, TopArtistsResponse,
        TrackSummary,
    },
};

const TOP_ARTIST_COUNT: usize = 3;

impl SpotifyClient {
    /// Collects the listening summary for the owner of `refresh_token`.
    ///
    /// Runs a linear, fail-fast pipeline:
    /// 1. refresh-token grant for a fresh access token
    /// 2. top artists and recently played, fetched concurrently
    /// 3. both payloads mapped into a [`StatsResponse`]
    ///
    /// If the token exchange fails neither resource is requested. The two
    /// fetches are joined all-or-nothing; whichever fails first is reported.
    pub async fn get_stats(&self, refresh_token: &str) -> Result<StatsResponse, AggregationError> {
        let grant = Grant::RefreshToken {
            token: refresh_token.to_string(),
        };
        let token = self.exchange(&grant).await?;
        let access_token = token.access_token.as_str();

        let (top, recent) = tokio::try_join!(
            self.top_artists(access_token),
            self.recently_played(access_token)
        )?;

        let stats = StatsResponse {
            top_artists: map_top_artists(&top),
            last_played: map_last_played(&recent),
        };

        info!(
            top_artists = stats.top_artists.len(),
            has_last_played = stats.last_played.is_some(),
            "stats aggregated"
        );
        Ok(stats)
    }
}

/// First three artists in the order Spotify returned them.
pub fn map_top_artists(payload: &TopArtistsResponse) -> Vec<ArtistSummary> {
    payload
        .items
        .iter()
        .take(TOP_ARTIST_COUNT)
        .map(|artist| ArtistSummary {
            name: artist.name.clone(),
            url: spotify_url(&artist.external_urls),
        })
        .collect()
}

/// The most recent play, or `None` without play history.
pub fn map_last_played(payload: &RecentlyPlayedResponse) -> Option<TrackSummary> {
    let item = payload.items.first()?;
    let track = item.track.as_ref()?;

    Some(TrackSummary {
        track: track.name.clone(),
        artist: track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        url: spotify_url(&track.external_urls),
        played_at: item.played_at.clone(),
    })
}

fn spotify_url(urls: &std::collections::HashMap<String, String>) -> String {
    urls.get("spotify").cloned().unwrap_or_default()
}
