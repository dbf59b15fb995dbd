//! # rforge CLI entry point
//!
//! Parses command-line arguments, configures logging and the backend
//! client, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rforge_cli::build_client;
use rforge_cli::check::{run_check, CheckArgs};
use rforge_cli::generate::{run_generate, GenerateArgs};
use rforge_cli::health::run_health;
use rforge_cli::options::{run_options, OptionsArgs};
use rforge_cli::wizard::{run_wizard, WizardArgs};

/// ResponseForge — incident response plan questionnaire.
///
/// Checks answer files against the questionnaire rules, walks through the
/// questionnaire interactively, and saves the plan rendered by the backend.
#[derive(Parser, Debug)]
#[command(name = "rforge", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML client configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the option catalogs offered by the backend.
    Options(OptionsArgs),

    /// Validate an answers file section by section.
    Check(CheckArgs),

    /// Submit an answers file and save the generated plan.
    Generate(GenerateArgs),

    /// Fill in the questionnaire interactively.
    Wizard(WizardArgs),

    /// Probe the backend.
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout stays clean for reports and the wizard.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("rforge CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let client = match build_client(cli.config.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Options(args) => run_options(args, &client).await,
        Commands::Check(args) => run_check(args, &client).await,
        Commands::Generate(args) => run_generate(args, &client).await,
        Commands::Wizard(args) => run_wizard(args, &client).await,
        Commands::Health => run_health(&client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
