//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for tool-relay
#[derive(Parser, Debug)]
#[command(name = "tool-relay")]
#[command(
    author,
    version,
    about = "Anthropic Messages to OpenAI Chat Completions relay with tool validation recovery"
)]
#[command(long_about = r#"
tool-relay accepts Anthropic Messages API requests, forwards them to an
OpenAI-compatible Chat Completions backend with exactly the tools the
client declared, and converts the backend's "tool call validation failed"
rejections into ordinary assistant turns the agent can recover from.

Configuration is loaded from (in priority order):
1. TOOL_RELAY_* environment variables (TOOL_RELAY_SERVER__PORT=9000)
2. --config <path>                     Explicit config file
3. ./tool-relay.toml                   Project-level config
4. ~/.config/tool-relay/config.toml    Global config

Example:
  tool-relay --port 8082
  tool-relay -vv --event-log ./relay-events.jsonl
  tool-relay --show-config
"#)]
pub struct Cli {
    /// Address to bind (overrides [server].host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostic logs to this file (daily rotation)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write structured relay events as JSONL to this file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "tool-relay",
            "--port",
            "9000",
            "-vv",
            "--event-log",
            "events.jsonl",
            "--no-config",
        ]);
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.event_log, Some(PathBuf::from("events.jsonl")));
        assert!(cli.no_config);
        assert!(cli.host.is_none());
    }
}
