//! Derives the firmware artifact name.
//!
//! Combines the stamped version, the active feature defines and a revision
//! string supplied by the caller into the program name used for build
//! artifacts, for example `modulant-v1.8.2+VOR-3fa9c21`.

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Derive the firmware artifact name.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Revision identifier appended to the name.
    #[arg(short, long)]
    revision: String,
    /// Compiler define string to scan for feature extras.
    #[arg(short, long, env = "CUSTOM_BUILD_FLAGS", default_value = "")]
    defines: String,
    /// Path of the version header.
    #[arg(long, default_value = "src/version.h")]
    header: PathBuf,
    /// Name prefix.
    #[arg(short, long, default_value = "modulant")]
    prefix: String,
}

/// Collects the version-string extras encoded in a define string.
///
/// Every `VERSION_EXTRA` value is appended verbatim, then `-DVOR` appends
/// `+VOR` and `-DFLIP_180` appends `_flipped`, matching the order the
/// firmware displays them in.
fn extras(defines: &str) -> String {
    // The quotes may arrive shell-escaped.
    let re = Regex::new(r#"-DVERSION_EXTRA=\\?"([^"\\]*)\\?""#).unwrap();

    let mut extras = String::new();
    for cap in re.captures_iter(defines) {
        extras.push_str(&cap[1]);
    }

    let names: Vec<&str> = defines.split_whitespace().collect();
    if names.contains(&"-DVOR") {
        extras.push_str("+VOR");
    }
    if names.contains(&"-DFLIP_180") {
        extras.push_str("_flipped");
    }

    extras
}

fn program_name(prefix: &str, version: &str, extras: &str, revision: &str) -> String {
    format!("{prefix}-{version}{extras}-{revision}")
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let version = modulant_build::read_version(&args.header)
        .with_context(|| format!("cannot read {}", args.header.display()))?;
    let extras = extras(&args.defines);

    log::debug!("version {version}, extras {extras:?}");
    println!("{}", program_name(&args.prefix, &version, &extras, &args.revision));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_defines_means_no_extras() {
        assert_eq!(extras(""), "");
        assert_eq!(extras("-DCUSTOM_BUILD -DENABLE_APP_PONG"), "");
    }

    #[test]
    fn vor_and_flip_extras() {
        assert_eq!(extras("-DCUSTOM_BUILD -DVOR"), "+VOR");
        assert_eq!(extras("-DCUSTOM_BUILD -DFLIP_180"), "_flipped");
        assert_eq!(extras("-DCUSTOM_BUILD -DFLIP_180 -DVOR"), "+VOR_flipped");
    }

    #[test]
    fn feature_defines_need_an_exact_name() {
        // -DVORTEX enables an app, not the VOR hardware variant.
        assert_eq!(extras("-DVORTEX"), "");
        assert_eq!(extras("-DFLIP_1800"), "");
    }

    #[test]
    fn version_extra_values_come_first() {
        assert_eq!(extras(r#"-DVERSION_EXTRA="+beta" -DVOR"#), "+beta+VOR");
        assert_eq!(extras(r#"-DVERSION_EXTRA=\"+rc1\""#), "+rc1");
    }

    #[test]
    fn name_composition() {
        assert_eq!(program_name("modulant", "v1.8.2", "+VOR", "3fa9c21"), "modulant-v1.8.2+VOR-3fa9c21");
        assert_eq!(program_name("modulant", "v1.8.2", "", "3fa9c21"), "modulant-v1.8.2-3fa9c21");
    }

    #[test]
    fn name_from_stamped_header() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("version.h");
        modulant_build::write_version_file(&header, "v1.8.2").unwrap();

        let version = modulant_build::read_version(&header).unwrap();
        let name = program_name("modulant", &version, &extras("-DCUSTOM_BUILD -DVOR"), "deadbee");
        assert_eq!(name, "modulant-v1.8.2+VOR-deadbee");
    }
}
