use crate::{config::Config, error, spotify::SpotifyClient};

pub fn login_url(config: &Config) {
    let (Some(client), Some(redirect_uri)) =
        (SpotifyClient::from_config(config), &config.redirect_uri)
    else {
        error!(
            "Missing required env vars: {}",
            config.missing_for_login().join(", ")
        );
    };

    match client.authorize_url(redirect_uri) {
        Ok(url) => println!("{url}"),
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    }
}
