use std::time::Duration;

use crate::{config::Config, error, server::start_api_server, warning};

/// Runs the HTTP server until the process is stopped.
///
/// With `open_browser` the local login route is opened in the default
/// browser shortly after start-up, so the consent flow can be completed
/// right away.
pub async fn serve(config: Config, open_browser: bool) {
    if open_browser {
        let login = format!("{}://localhost:{}/auth/login", config.scheme(), config.port);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            if webbrowser::open(&login).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    login
                )
            }
        });
    }

    if let Err(e) = start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
