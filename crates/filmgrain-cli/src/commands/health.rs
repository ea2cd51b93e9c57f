use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use filmgrain_core::transport::HttpTransport;

use super::resolve_config;

#[derive(Args)]
pub struct HealthArgs {
    /// Client config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grain service base URL (overrides the config)
    #[arg(long)]
    pub endpoint: Option<String>,
}

pub fn run(args: &HealthArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.endpoint.as_deref())?;
    let transport = HttpTransport::new(&config.endpoint)?;

    let status = transport
        .health()
        .with_context(|| format!("Service at {} is not healthy", transport.base_url()))?;
    println!(
        "{} {} ({})",
        style("\u{2713}").green().bold(),
        transport.base_url(),
        status
    );
    Ok(())
}
