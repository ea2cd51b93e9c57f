mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filmgrain", about = "Add film grain to photos via a grain service")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and save the grained result
    Process(commands::process::ProcessArgs),
    /// Show what would be uploaded for an image file
    Info(commands::info::InfoArgs),
    /// Check that the grain service is reachable
    Health(commands::health::HealthArgs),
    /// Print or save the default client config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Health(args) => commands::health::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
