//! Stamps the firmware version header from a version string.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Stamp the firmware version header.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Version string to stamp.
    version: String,
    /// Path of the version header.
    #[arg(default_value = "src/version.h")]
    header: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!("stamping {} into {}", args.version, args.header.display());

    modulant_build::write_version_file(&args.header, &args.version)
        .with_context(|| format!("cannot write {}", args.header.display()))?;

    eprintln!("{} stamped with version {}", args.header.display(), args.version);
    Ok(())
}
