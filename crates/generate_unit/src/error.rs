// crates/generate_unit/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Every way a generator run can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required flag was absent or empty. Holds the flag name.
    #[error("Argument {0} is required")]
    MissingArgument(&'static str),

    /// The command line could not be parsed.
    #[error("Invalid arguments: {0}")]
    InvalidArgument(String),

    #[error("Failed to render unit template: {0}")]
    Template(#[from] askama::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenerateError>;
