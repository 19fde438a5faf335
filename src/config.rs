//! Runtime configuration: CLI arguments and logging initialization.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line arguments. The API base URL is the only required setting and
/// can also come from the environment (or a `.env` file) as `API_BASE_URL`.
#[derive(Parser, Debug)]
#[command(
    name = "biblio-manager",
    version,
    about = "TUI to manage a library's authors, copies, loans and readers over its REST API"
)]
pub struct Cli {
    /// Base URL of the library API, e.g. http://localhost:5034/api.
    #[arg(long = "api-url", env = "API_BASE_URL")]
    pub api_url: String,

    /// File the log subscriber writes to; the terminal is owned by the TUI.
    #[arg(long, default_value = "biblio-manager.log")]
    pub log_file: String,

    /// Theme configuration file (created with defaults when missing).
    #[arg(long, default_value = "theme.conf")]
    pub theme_file: String,

    /// Keybindings configuration file (created with defaults when missing).
    #[arg(long, default_value = "keybinds.conf")]
    pub keybinds_file: String,
}

/// Install the global tracing subscriber, appending to `path`.
///
/// `RUST_LOG` overrides the default `biblio_manager=info` filter.
pub fn init_tracing(path: &str) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("biblio_manager=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_flag_is_parsed() {
        let cli = Cli::try_parse_from([
            "biblio-manager",
            "--api-url",
            "http://localhost:5034/api",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://localhost:5034/api");
        assert_eq!(cli.log_file, "biblio-manager.log");
        assert_eq!(cli.theme_file, "theme.conf");
    }

    #[test]
    fn missing_api_url_is_an_error() {
        // Only when the environment does not provide API_BASE_URL either.
        if std::env::var("API_BASE_URL").is_err() {
            assert!(Cli::try_parse_from(["biblio-manager"]).is_err());
        }
    }
}
