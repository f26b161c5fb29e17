use std::net::SocketAddr;

use axum::{Router, routing::get};
use axum_server::tls_rustls::RustlsConfig;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    api::{self, AppState},
    config::{Config, TlsPaths},
    error::ServerError,
    info, warning,
};

/// Routes of the server, including the legacy `/auth/spotify/*` and
/// `/api/spotify/stats` paths.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/health", get(api::health))
        .route("/auth/login", get(api::login))
        .route("/auth/callback", get(api::callback))
        .route("/stats", get(api::stats))
        .route("/auth/spotify/login", get(api::login))
        .route("/auth/spotify/callback", get(api::callback))
        .route("/api/spotify/stats", get(api::stats));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

pub async fn start_api_server(config: Config) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::Address(format!("{}:{}", config.host, config.port)))?;

    let missing = config.missing_for_login();
    if !missing.is_empty() {
        warning!("Missing required env vars: {}", missing.join(", "));
    }
    if config.refresh_token.is_none() {
        warning!("SPOTIFY_REFRESH_TOKEN is not set, /stats will answer 503 until it is.");
    }

    let scheme = config.scheme();
    let tls = config.tls.clone();
    let app = router(AppState::new(config));

    match tls {
        Some(paths) => {
            let rustls = load_tls(&paths).await?;
            info!("Server running at {scheme}://localhost:{}", addr.port());
            tracing::info!(%addr, "listening with TLS");
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Server running at {scheme}://localhost:{}", addr.port());
            tracing::info!(%addr, "listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

async fn load_tls(paths: &TlsPaths) -> Result<RustlsConfig, ServerError> {
    let read = |path: &std::path::Path| {
        let path = path.to_path_buf();
        async move {
            async_fs::read(&path).await.map_err(|source| ServerError::TlsFile {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let cert = read(&paths.cert_path).await?;
    let key = read(&paths.key_path).await?;

    RustlsConfig::from_pem(cert, key)
        .await
        .map_err(|source| ServerError::TlsFile {
            path: paths.cert_path.display().to_string(),
            source,
        })
}
