// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nudge - a multi-tenant shopping-list and reminder chat bot.
//!
//! This is the binary entry point for the Nudge bot.

use clap::{Parser, Subcommand};

mod serve;
mod shell;
mod task_log;

/// Nudge - a multi-tenant shopping-list and reminder chat bot.
#[derive(Parser, Debug)]
#[command(name = "nudge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the reminder sync engine on its configured interval.
    Serve,
    /// Run a single reminder sync pass and exit (for external cron).
    Sync,
    /// Launch an interactive REPL that drives the dialogue router.
    Shell,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match nudge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            nudge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Sync) => serve::run_sync_once(config).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        None => {
            println!("nudge: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = nudge_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "nudge");
    }
}
