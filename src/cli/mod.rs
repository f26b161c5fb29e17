//! # CLI Module
//!
//! Commands behind the `spotistats` binary. The server is the main
//! deliverable; the other commands help the operator through the one-time
//! authorization and check the configured refresh token from a terminal.
//!
//! ## Commands
//!
//! - [`serve`] - run the HTTP server, optionally opening the login page
//! - [`stats`] - fetch the listening summary once and print it
//! - [`login_url`] - print the Spotify consent URL
//!
//! ## Setup flow
//!
//! ```bash
//! spotistats serve --open        # grant access in the browser
//! # copy the refresh token shown into .env as SPOTIFY_REFRESH_TOKEN
//! spotistats stats               # verify the token works
//! ```
//!
//! Every command takes the [`Config`](crate::config::Config) it runs with as
//! an argument. Fatal problems are reported with the `error!` macro, which
//! terminates the process.

mod login;
mod serve;
mod stats;

pub use login::login_url;
pub use serve::serve;
pub use stats::stats;
