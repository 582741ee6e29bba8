// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Courier - relays WhatsApp conversations to an OpenAI assistant.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_config::{ConfigError, CourierConfig};

/// Courier - WhatsApp to OpenAI Assistants relay.
#[derive(Parser, Debug)]
#[command(name = "courier", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Validate configuration and exit.
    CheckConfig,
}

fn load(path: Option<&PathBuf>) -> Result<CourierConfig, Vec<ConfigError>> {
    match path {
        Some(path) => courier_config::load_and_validate_path(path),
        None => courier_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            courier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("courier: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::CheckConfig) => {
            println!(
                "courier: config OK (agent.name={}, gateway={}:{}, storage={:?})",
                config.agent.name,
                config.gateway.host,
                config.gateway.port,
                config.storage.backend
            );
        }
        None => {
            println!("courier: use --help for available commands");
        }
    }
}
