//! Spotify listening stats proxy.
//!
//! This library performs a one-time OAuth2 authorization-code flow to obtain
//! a refresh token, and afterwards turns that refresh token into a small JSON
//! summary of the owner's listening: their top three artists of the last
//! weeks and the most recently played track.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers (login, callback, stats, health)
//! - `cli` - Operator command implementations
//! - `config` - Configuration loading from environment variables and `.env`
//! - `error` - Error types
//! - `logging` - Tracing subscriber set-up
//! - `server` - Router assembly and the HTTP/HTTPS listener
//! - `spotify` - Token exchange, resource fetching and stats aggregation
//! - `types` - Data structures and type definitions
//!
//! Two binaries share this library: `spotistats`, the standalone server with
//! a few operator commands, and `stats-handler`, an on-demand handler that
//! answers a single stats request.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod spotify;
pub mod types;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Server running at http://localhost:{}", port);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal start-up or command failures. Request handlers never use
/// it; they turn failures into responses instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
