// crates/generate_unit/src/lib.rs

//! Generates a systemd service unit from command-line flags.
//!
//! The pipeline is collect ([`parse_args`]), render
//! ([`render_unit::render_unit`]) and deliver ([`deliver`]).

pub mod args;
pub mod error;
pub mod sink;

use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

pub use args::{parse_args, usage, Invocation};
pub use error::{GenerateError, Result};
pub use sink::{deliver, unit_file_path};
pub use unit_config::UnitConfig;

/// Renders `config` and hands the text to the output sink.
///
/// Returns the path written, or `None` in stdout mode.
pub fn generate_unit<W: Write>(config: &UnitConfig, out: &mut W) -> Result<Option<PathBuf>> {
    debug!(
        name = %config.name,
        output_dir = %config.output_dir.display(),
        after = %config.after,
        stdout = config.stdout,
        "generating unit"
    );
    let rendered = render_unit::render_unit(config)?;
    deliver(&rendered, config, out)
}
