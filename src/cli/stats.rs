use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    api::{AppState, stats_outcome},
    config::Config,
    error, success,
    types::{StatsResponse, StatsTableRow},
};

/// Fetches the listening summary once, exactly as `GET /stats` would, and
/// prints it as a table or as raw JSON.
pub async fn stats(config: Config, json: bool) {
    let state = AppState::new(config);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching Spotify stats...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let (status, body) = stats_outcome(&state).await;
    pb.finish_and_clear();

    if !status.is_success() {
        error!("Stats request failed ({}): {}", status.as_u16(), body);
    }

    if json {
        match serde_json::to_string_pretty(&body) {
            Ok(out) => println!("{out}"),
            Err(e) => error!("Cannot render stats. Err: {}", e),
        }
        return;
    }

    let stats: StatsResponse = match serde_json::from_value(body) {
        Ok(stats) => stats,
        Err(e) => error!("Cannot read stats. Err: {}", e),
    };

    println!("{}", Table::new(table_rows(&stats)));
    success!("Loaded {} top artists.", stats.top_artists.len());
}

fn table_rows(stats: &StatsResponse) -> Vec<StatsTableRow> {
    let mut rows: Vec<StatsTableRow> = stats
        .top_artists
        .iter()
        .enumerate()
        .map(|(i, artist)| StatsTableRow {
            kind: format!("top artist #{}", i + 1),
            name: artist.name.clone(),
            url: artist.url.clone(),
        })
        .collect();

    if let Some(track) = &stats.last_played {
        rows.push(StatsTableRow {
            kind: "last played".to_string(),
            name: format!("{} - {}", track.artist, track.track),
            url: track.url.clone(),
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArtistSummary, TrackSummary};

    #[test]
    fn test_table_rows() {
        let stats = StatsResponse {
            top_artists: vec![
                ArtistSummary { name: "A".to_string(), url: "ua".to_string() },
                ArtistSummary { name: "B".to_string(), url: String::new() },
            ],
            last_played: Some(TrackSummary {
                track: "T".to_string(),
                artist: "A, B".to_string(),
                url: "ut".to_string(),
                played_at: None,
            }),
        };

        let rows = table_rows(&stats);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, "top artist #1");
        assert_eq!(rows[1].name, "B");
        assert_eq!(rows[2].kind, "last played");
        assert_eq!(rows[2].name, "A, B - T");
    }

    #[test]
    fn test_table_rows_without_last_played() {
        let stats = StatsResponse {
            top_artists: vec![],
            last_played: None,
        };
        assert!(table_rows(&stats).is_empty());
    }
}
