// crates/unit_config/src/lib.rs

//! The flat record describing one generated systemd unit, plus the fixed
//! names shared by the collector, the renderer and the output sink.

use std::path::PathBuf;

/// Where unit files go when neither the flag nor the environment says otherwise.
pub const DEFAULT_SYSTEMD_DIR: &str = "/usr/lib/systemd/system";

/// Environment variable overriding [`DEFAULT_SYSTEMD_DIR`].
pub const SYSTEMD_CONFIG_DIR_ENV: &str = "SYSTEMD_CONFIG_DIR";

/// Every generated unit starts after this target.
pub const BASE_AFTER_TOKEN: &str = "network-online.target";

/// Appended to the unit name to form the output file name.
pub const SERVICE_SUFFIX: &str = ".service";

/// Configuration for a single generated unit.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitConfig {
    /// Unit name; only used for the output file name.
    pub name: String,
    pub description: String,
    pub working_directory: String,
    /// Shell command placed in `ExecStart=`.
    pub command: String,
    pub output_dir: PathBuf,
    /// Space-joined ordering dependencies, always led by [`BASE_AFTER_TOKEN`].
    pub after: String,
    pub help: bool,
    /// Print to stdout instead of writing `<output_dir>/<name>.service`.
    pub stdout: bool,
}

/// Resolves the output directory from an optional environment value.
///
/// An unset or empty value falls back to [`DEFAULT_SYSTEMD_DIR`].
pub fn default_output_dir(env_value: Option<&str>) -> PathBuf {
    match env_value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_SYSTEMD_DIR),
    }
}

/// Builds the `After=` value from the user-supplied tokens.
///
/// Tokens are split on whitespace and re-joined with single spaces behind
/// [`BASE_AFTER_TOKEN`].
pub fn compose_after(extra: &str) -> String {
    std::iter::once(BASE_AFTER_TOKEN)
        .chain(extra.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

impl UnitConfig {
    /// File name of the unit, e.g. `myapp.service`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, SERVICE_SUFFIX)
    }
}
