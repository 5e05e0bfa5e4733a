//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(author, version, about = "A friendly multi-turn chat with Gemini, in your browser")]
#[command(long_about = r#"
Parley serves a single-page chat UI backed by a Gemini model.

The API key is read from GEMINI_API_KEY, first in the secrets file
(./.parley/secrets.toml or ~/.config/parley/secrets.toml), then in the
environment. Without a key the page only shows an error.

Configuration files are loaded from (in priority order):
1. PARLEY_* environment variables (e.g. PARLEY_SERVER__PORT=9000)
2. --config <path>     Explicit config file
3. ./parley.toml       Project-level config
4. ~/.config/parley/config.toml   Global config

Example:
  parley
  parley --port 9000 --model gemini-2.5-pro
  GEMINI_API_KEY=... parley -vv --log-file parley.log
"#)]
pub struct Cli {
    /// Address to bind the web UI to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to serve the web UI on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Model for new conversations
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "parley", "--port", "9000", "-m", "gemini-2.5-pro", "-vv", "--no-config",
        ]);
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        assert!(cli.host.is_none());
    }
}
