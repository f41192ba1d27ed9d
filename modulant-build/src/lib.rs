//! Modulant build helpers.

use std::{
    fs::File,
    io::{BufRead, BufReader, Error, ErrorKind, Result, Write},
    path::Path,
};

/// Writes the firmware version header.
///
/// The header is not meant to be included directly; the firmware wraps it in
/// its version-string constant. The version itself sits quoted on the last
/// line so the build tools can read it back without a C parser.
pub fn write_version_file(path: &Path, version: &str) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "// NOTE: DO NOT INCLUDE DIRECTLY, USE Modulant::Strings::VERSION")?;
    writeln!(file, "\"{version}\"")?;
    Ok(())
}

/// Reads the firmware version back from the version header.
///
/// Returns the last non-empty line with surrounding quotes stripped.
pub fn read_version(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let lines = BufReader::new(file);

    let mut version = None;
    for line in lines.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            version = Some(line.replace('"', ""));
        }
    }

    version.ok_or_else(|| Error::new(ErrorKind::InvalidData, "version header is empty"))
}
