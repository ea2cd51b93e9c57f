use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use filmgrain_core::asset::ImageBlob;

#[derive(Args)]
pub struct InfoArgs {
    /// Image file (any common format or HEIC/HEIF)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let blob = ImageBlob::from_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("File:       {}", blob.file_name());
    println!("Type:       {}", blob.mime_type());
    println!("Size:       {}", format_bytes(blob.len()));
    match blob.dimensions() {
        Some((w, h)) => println!("Dimensions: {w}x{h}"),
        None => println!("Dimensions: unknown (decoded by the service only)"),
    }

    Ok(())
}

fn format_bytes(n: usize) -> String {
    const KIB: f64 = 1024.0;
    let n = n as f64;
    if n < KIB {
        format!("{n} B")
    } else if n < KIB * KIB {
        format!("{:.1} KiB", n / KIB)
    } else {
        format!("{:.1} MiB", n / (KIB * KIB))
    }
}
