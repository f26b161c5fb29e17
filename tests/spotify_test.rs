use serde_json::json;
use spotistats::{
    error::{Endpoint, SpotifyError},
    spotify::SpotifyClient,
    types::{Credentials, Grant},
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

// base64("id:secret")
const BASIC_AUTH: &str = "Basic aWQ6c2VjcmV0";

fn create_test_client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(
        Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        },
        &server.uri(),
        &format!("{}/v1", server.uri()),
    )
}

async fn mount_refresh_ok(server: &MockServer, expected_calls: impl Into<Times>) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r3fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc3ss",
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "user-top-read user-read-recently-played"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_top_artists(
    server: &MockServer,
    template: ResponseTemplate,
    expected_calls: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path("/v1/me/top/artists"))
        .and(query_param("time_range", "short_term"))
        .and(query_param("limit", "3"))
        .and(header("authorization", "Bearer acc3ss"))
        .respond_with(template)
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_recently_played(
    server: &MockServer,
    template: ResponseTemplate,
    expected_calls: impl Into<Times>,
) {
    Mock::given(method("GET"))
        .and(path("/v1/me/player/recently-played"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer acc3ss"))
        .respond_with(template)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_exchange_authorization_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=c0de"))
        .and(body_string_contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc3ss",
            "refresh_token": "r3fresh",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = create_test_client(&server)
        .exchange(&Grant::AuthorizationCode {
            code: "c0de".to_string(),
            redirect_uri: "http://localhost:3000/auth/callback".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token.access_token, "acc3ss");
    assert_eq!(token.refresh_token.as_deref(), Some("r3fresh"));
    assert_eq!(token.expires_in, 3600);
    assert!(token.expires_at().unwrap() > token.obtained_at);
}

#[tokio::test]
async fn test_exchange_refresh_token_without_new_refresh_token() {
    let server = MockServer::start().await;
    mount_refresh_ok(&server, 1).await;

    let token = create_test_client(&server)
        .exchange(&Grant::RefreshToken {
            token: "r3fresh".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token.access_token, "acc3ss");
    assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn test_exchange_failure_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .exchange(&Grant::RefreshToken {
            token: "revoked".to_string(),
        })
        .await
        .unwrap_err();

    match &err {
        SpotifyError::Provider(e) => {
            assert_eq!(e.endpoint, Endpoint::Token);
            assert_eq!(e.status.as_u16(), 400);
            assert_eq!(e.body, r#"{"error":"invalid_grant"}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        r#"Spotify token request failed (400): {"error":"invalid_grant"}"#
    );
}

#[tokio::test]
async fn test_fetch_failure_reports_api_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/me/player/recently-played"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .expect(1)
        .mount(&server)
        .await;

    let err = create_test_client(&server)
        .recently_played("stale")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    assert_eq!(err.to_string(), "Spotify API request failed (401): expired");
}

#[tokio::test]
async fn test_get_stats() {
    let server = MockServer::start().await;
    mount_refresh_ok(&server, 1).await;
    mount_top_artists(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"name": "First", "external_urls": {"spotify": "https://open.spotify.com/artist/1"}},
                {"name": "Second"},
                {"name": "Third", "external_urls": {"spotify": "https://open.spotify.com/artist/3"}},
                {"name": "Fourth", "external_urls": {"spotify": "https://open.spotify.com/artist/4"}}
            ]
        })),
        1,
    )
    .await;
    mount_recently_played(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "track": {
                    "name": "T",
                    "artists": [{"name": "A"}, {"name": "B"}],
                    "external_urls": {"spotify": "u"}
                },
                "played_at": "2024-01-01T00:00:00Z"
            }]
        })),
        1,
    )
    .await;

    let stats = create_test_client(&server).get_stats("r3fresh").await.unwrap();

    let names: Vec<&str> = stats.top_artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(stats.top_artists[1].url, "");

    let last = stats.last_played.unwrap();
    assert_eq!(last.track, "T");
    assert_eq!(last.artist, "A, B");
    assert_eq!(last.url, "u");
    assert_eq!(last.played_at.as_deref(), Some("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_get_stats_without_history() {
    let server = MockServer::start().await;
    mount_refresh_ok(&server, 1).await;
    mount_top_artists(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"items": []})),
        1,
    )
    .await;
    mount_recently_played(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"items": []})),
        1,
    )
    .await;

    let stats = create_test_client(&server).get_stats("r3fresh").await.unwrap();

    assert!(stats.top_artists.is_empty());
    assert!(stats.last_played.is_none());
}

#[tokio::test]
async fn test_get_stats_stops_after_failed_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad refresh token"))
        .expect(1)
        .mount(&server)
        .await;
    mount_top_artists(&server, ResponseTemplate::new(200), 0).await;
    mount_recently_played(&server, ResponseTemplate::new(200), 0).await;

    let err = create_test_client(&server)
        .get_stats("r3fresh")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Spotify token request failed (400): bad refresh token"
    );
}

#[tokio::test]
async fn test_get_stats_fails_when_one_fetch_fails() {
    let server = MockServer::start().await;
    mount_refresh_ok(&server, 1).await;
    mount_top_artists(
        &server,
        ResponseTemplate::new(429).set_body_string("slow down"),
        1,
    )
    .await;
    mount_recently_played(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"items": []})),
        ..=1,
    )
    .await;

    let err = create_test_client(&server)
        .get_stats("r3fresh")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Spotify API request failed (429): slow down");
}
