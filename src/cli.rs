//! CLI module
//!
//! This module provides the command-line interface for querying a Felix API.

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use serde_json::Value;
use std::io;

use crate::api::{ClientConfig, ClientError, FelixClient};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Felix service URL (endpoints live under <URL>/api)
    #[arg(short, long, env = "FELIX_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Bearer token sent with every request
    #[arg(short, long, env = "FELIX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in milliseconds (0 disables it)
    #[arg(long, env = "FELIX_TIMEOUT_MS", default_value_t = 6000)]
    timeout_ms: u64,

    /// Return lists and mutual guilds exactly as the API sends them
    #[arg(long, env = "FELIX_NO_CONVERSION")]
    no_conversion: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the API is up
    Status,

    /// Fetch a user by id
    User {
        /// User id
        id: String,
    },

    /// Fetch a guild by id
    Guild {
        /// Guild id
        id: String,
    },

    /// Fetch a named client value
    Value {
        /// Value name
        name: String,
    },

    /// Upsert a user from a JSON document
    #[command(name = "post-user")]
    PostUser {
        /// User record as JSON
        json: String,
    },

    /// Upsert a guild from a JSON document
    #[command(name = "post-guild")]
    PostGuild {
        /// Guild record as JSON
        json: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run the CLI application
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(());
    }

    let client = create_client(&cli)?;
    let result = match &cli.command {
        Commands::Status => {
            if client.status().await {
                println!("{} {}", "up".green().bold(), client.config().api_root());
            } else {
                println!("{} {}", "down".red().bold(), client.config().api_root());
                std::process::exit(1);
            }
            return Ok(());
        }
        Commands::User { id } => client.get_user(id).await.map(|u| u.into_value()),
        Commands::Guild { id } => client.get_guild(id).await.map(|g| g.into_value()),
        Commands::Value { name } => client.fetch_client_value(name).await,
        Commands::PostUser { json } => {
            let user: Value = serde_json::from_str(json)?;
            client.post_user(&user).await
        }
        Commands::PostGuild { json } => {
            let guild: Value = serde_json::from_str(json)?;
            client.post_guild(&guild).await
        }
        Commands::Completions { .. } => return Ok(()),
    };

    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            // The descriptor is the whole report; don't hand the error back to main
            print_error(&e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn create_client(cli: &Cli) -> Result<FelixClient, ClientError> {
    let token = cli.token.clone().unwrap_or_default();
    if token.is_empty() {
        tracing::warn!("no token given; requests will be sent with an empty bearer token");
    }

    let config = ClientConfig::builder(cli.url.clone(), token)
        .timeout_ms(cli.timeout_ms)
        .auto_conversion(!cli.no_conversion)
        .build();

    FelixClient::new(config)
}

/// Print the error descriptor so scripts can parse failures
fn print_error(error: &ClientError) {
    match serde_json::to_string_pretty(&error.descriptor()) {
        Ok(descriptor) => eprintln!("{}", descriptor.red()),
        Err(_) => eprintln!("{}", error.to_string().red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_options() {
        let cli = Cli::try_parse_from([
            "felix",
            "--url",
            "http://felix.local",
            "--token",
            "secret",
            "--timeout-ms",
            "250",
            "--no-conversion",
            "user",
            "42",
        ])
        .unwrap();

        assert_eq!(cli.url, "http://felix.local");
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.timeout_ms, 250);
        assert!(cli.no_conversion);
        assert!(matches!(cli.command, Commands::User { ref id } if id == "42"));

        let client = create_client(&cli).unwrap();
        assert!(!client.config().auto_conversion());
        assert_eq!(client.config().timeout().as_millis(), 250);
    }

    #[test]
    fn test_no_conversion_reads_env() {
        std::env::set_var("FELIX_NO_CONVERSION", "true");
        let cli = Cli::try_parse_from(["felix", "guild", "g1"]);
        std::env::remove_var("FELIX_NO_CONVERSION");

        assert!(cli.unwrap().no_conversion);
    }

    #[test]
    fn test_post_commands_use_kebab_names() {
        let cli = Cli::try_parse_from(["felix", "post-guild", r#"{"id":"g1"}"#]).unwrap();
        assert!(matches!(cli.command, Commands::PostGuild { .. }));
    }
}
