use clap::Parser;
use color_eyre::eyre::{bail, Result};
use pore_mask::{ConverterConfig, MaskConverter};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

/// Convert pore segmentation masks into LabelMe polygon annotations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML or JSON file with `source_dir` and `dest_dir`
    /// (defaults: prompt_mask -> json)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConverterConfig::from_file(path)?,
        None => ConverterConfig::default(),
    };
    info!(
        "Converting masks from {} into {}",
        config.source_dir.display(),
        config.dest_dir.display()
    );

    let report = MaskConverter::new(config).run()?;
    info!("Wrote {} annotation files", report.written.len());

    if !report.is_clean() {
        for failure in &report.failures {
            error!("{}: {}", failure.path.display(), failure.error);
        }
        bail!("{} mask(s) could not be converted", report.failures.len());
    }

    Ok(())
}
