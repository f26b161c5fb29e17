//! On-demand stats handler.
//!
//! Answers exactly one stats request and exits, for platforms that spawn a
//! process per request (CGI-style). The response is written to stdout as a
//! `Status` line, headers, a blank line and the JSON body. Diagnostics go
//! to stderr.

use std::io::Write;

use axum::http::StatusCode;
use serde_json::{Value, json};

use spotistats::{api::AppState, api::stats_outcome, config, logging};

/// CGI response text for a status and JSON body.
fn render(status: StatusCode, body: &Value) -> String {
    format!(
        "Status: {} {}\r\nContent-Type: application/json\r\n\r\n{}",
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
        body
    )
}

#[tokio::main]
async fn main() {
    config::load_env();
    logging::init("spotistats=warn");

    let (status, body) = match config::Config::from_env() {
        Ok(config) => stats_outcome(&AppState::new(config)).await,
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": format!("Invalid configuration: {e}") }),
        ),
    };

    let mut stdout = std::io::stdout().lock();
    let written = stdout.write_all(render(status, &body).as_bytes());
    if let Err(e) = written.and_then(|_| stdout.flush()) {
        tracing::error!("failed to write response: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cgi_response() {
        let out = render(StatusCode::SERVICE_UNAVAILABLE, &json!({"error": "x"}));
        assert_eq!(
            out,
            "Status: 503 Service Unavailable\r\nContent-Type: application/json\r\n\r\n{\"error\":\"x\"}"
        );
    }

    #[tokio::test]
    async fn test_missing_refresh_token_renders_503() {
        let config = config::Config::from_lookup(|key| match key {
            "SPOTIFY_CLIENT_ID" => Some("id".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some("secret".to_string()),
            // nothing listens here; a token request would end in 500, not 503
            "SPOTIFY_ACCOUNTS_URL" => Some("http://127.0.0.1:9".to_string()),
            _ => None,
        })
        .unwrap();

        let (status, body) = stats_outcome(&AppState::new(config)).await;
        let out = render(status, &body);

        assert!(out.starts_with("Status: 503 Service Unavailable\r\nContent-Type: application/json\r\n\r\n"));
        let (_, json_body) = out.split_once("\r\n\r\n").unwrap();
        let parsed: Value = serde_json::from_str(json_body).unwrap();
        assert!(
            parsed["error"]
                .as_str()
                .unwrap()
                .contains("refresh token not configured")
        );
    }
}
