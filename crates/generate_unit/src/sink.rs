// crates/generate_unit/src/sink.rs

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{GenerateError, Result};
use unit_config::UnitConfig;

/// Destination of the unit file: `<output_dir>/<name>.service`.
pub fn unit_file_path(config: &UnitConfig) -> PathBuf {
    config.output_dir.join(config.file_name())
}

/// Delivers the rendered unit.
///
/// In stdout mode the text plus a newline goes to `out` and `None` is
/// returned. Otherwise the text is written to [`unit_file_path`] and that
/// path is returned.
pub fn deliver<W: Write>(rendered: &str, config: &UnitConfig, out: &mut W) -> Result<Option<PathBuf>> {
    if config.stdout {
        writeln!(out, "{}", rendered).map_err(GenerateError::Stdout)?;
        out.flush().map_err(GenerateError::Stdout)?;
        return Ok(None);
    }

    let path = unit_file_path(config);
    write_unit_file(&path, rendered.as_bytes()).map_err(|source| GenerateError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = rendered.len(), "wrote unit file");
    Ok(Some(path))
}

/// Replaces `path` with `contents`, owner read/write only.
///
/// The bytes go to a temporary file next to `path` (created `0600`), which is
/// then renamed over the destination. On any error the old file is untouched.
fn write_unit_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
