// crates/generate_unit/src/main.rs

use anyhow::Result;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

use generate_unit::{generate_unit, parse_args, usage};
use unit_config::SYSTEMD_CONFIG_DIR_ENV;

fn main() {
    if let Err(err) = run() {
        // The top-level message already carries the io cause.
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let env_dir = env::var(SYSTEMD_CONFIG_DIR_ENV).ok();
    let invocation = parse_args(env::args_os(), env_dir.as_deref())?;

    if invocation.config.help {
        print!("{}", usage());
        return Ok(());
    }

    init_logging(invocation.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Some(path) = generate_unit(&invocation.config, &mut out)? {
        tracing::info!(path = %path.display(), "unit file generated");
    }
    Ok(())
}

/// Logs go to stderr so `-stdout` output stays clean.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
