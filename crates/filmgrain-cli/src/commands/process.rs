use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use filmgrain_core::asset::{ImageBlob, NullSurface};
use filmgrain_core::consts::DOWNLOAD_FILE_NAME;
use filmgrain_core::params::{BooleanField, NumericField};
use filmgrain_core::session::{Session, Settlement};
use filmgrain_core::transport::{HttpTransport, Transport};
use indicatif::{ProgressBar, ProgressStyle};

use super::resolve_config;
use crate::summary::print_request_summary;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input image (any common format or HEIC/HEIF)
    pub file: PathBuf,

    /// Client config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grain service base URL (overrides the config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Grain scale factor (0.1-5.0)
    #[arg(long)]
    pub scale: Option<String>,

    /// Source image classification
    #[arg(long)]
    pub src_type: Option<String>,

    /// Grain intensity (0.0-5.0)
    #[arg(long)]
    pub grain_power: Option<String>,

    /// Shadow-region grain weighting (0.0-1.0)
    #[arg(long)]
    pub shadows: Option<String>,

    /// Highlight-region grain weighting (0.0-1.0)
    #[arg(long)]
    pub highs: Option<String>,

    /// Grain pattern: 1 = fine, 2 = fine (simple), 3 = coarse, 4 = coarser
    #[arg(long)]
    pub grain_type: Option<String>,

    /// Grain color saturation (0.0-1.0)
    #[arg(long)]
    pub grain_sat: Option<String>,

    /// Sharpening amount
    #[arg(long)]
    pub sharpen: Option<String>,

    /// Force grayscale output
    #[arg(long, overrides_with = "no_gray")]
    pub gray: bool,

    /// Keep colour output even if the config enables grayscale
    #[arg(long, overrides_with = "gray")]
    pub no_gray: bool,

    /// Output file path
    #[arg(short, long, default_value = DOWNLOAD_FILE_NAME)]
    pub output: PathBuf,
}

impl ProcessArgs {
    fn numeric_overrides(&self) -> [(NumericField, Option<&String>); 8] {
        [
            (NumericField::Scale, self.scale.as_ref()),
            (NumericField::SrcType, self.src_type.as_ref()),
            (NumericField::GrainPower, self.grain_power.as_ref()),
            (NumericField::Shadows, self.shadows.as_ref()),
            (NumericField::Highs, self.highs.as_ref()),
            (NumericField::GrainType, self.grain_type.as_ref()),
            (NumericField::GrainSat, self.grain_sat.as_ref()),
            (NumericField::Sharpen, self.sharpen.as_ref()),
        ]
    }

    /// `--gray` / `--no-gray`; the last one given wins.
    fn gray_override(&self) -> Option<bool> {
        match (self.gray, self.no_gray) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.endpoint.as_deref())?;
    let transport = HttpTransport::new(&config.endpoint)?;

    let blob = ImageBlob::from_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut session = Session::new(NullSurface::default(), config.params);
    for (field, raw) in args.numeric_overrides() {
        let Some(raw) = raw else { continue };
        if !session.set_numeric(field, raw) {
            eprintln!(
                "{} ignoring --{} {:?}, keeping {}",
                style("warning:").yellow().bold(),
                field.name().replace('_', "-"),
                raw,
                session.params().numeric(field)
            );
        }
    }
    if let Some(gray) = args.gray_override() {
        session.set_boolean(BooleanField::Gray, gray);
    }
    session.select_source(Some(blob));

    let request = session
        .begin_process()
        .context("Parameters are not valid numbers")?;
    print_request_summary(&request, transport.base_url(), &args.output);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")?);
    spinner.set_message("Applying grain...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = transport.send(&request);
    spinner.finish_and_clear();

    match session.settle(request.generation(), outcome) {
        Settlement::Succeeded => {
            let download = session
                .download()
                .context("Processed image missing after success")?;
            download
                .save_to(&args.output)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            println!(
                "{} Saved to {}",
                style("\u{2713}").green().bold(),
                args.output.display()
            );
            Ok(())
        }
        _ => bail!(
            "{}",
            session.notice().unwrap_or("Failed to process image.")
        ),
    }
}
