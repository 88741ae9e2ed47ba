use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "plugcheck")]
#[command(about = "Check plugin dependencies against the host binary")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the dependencies of a plugin against the host
    #[command(alias = "plugin")]
    CheckPlugin(cli::check_plugin::CheckPluginArgs),
    /// Show version information
    Version,
    /// Manage configuration
    #[command(subcommand)]
    Config(cli::config::ConfigCommands),
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CheckPlugin(args) => cli::check_plugin::run(args),
        Commands::Version => cli::version::run(),
        Commands::Config(cmd) => cli::config::run(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", plugcheck::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
