// crates/generate_unit/src/args.rs

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{GenerateError, Result};
use unit_config::{
    compose_after, default_output_dir, UnitConfig, DEFAULT_SYSTEMD_DIR, SYSTEMD_CONFIG_DIR_ENV,
};

/// Whether a flag consumes a value or is a boolean switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlagKind {
    Value,
    Switch,
}

/// Every flag the generator understands, by its bare name.
const FLAGS: &[(&str, FlagKind)] = &[
    ("name", FlagKind::Value),
    ("d", FlagKind::Value),
    ("wd", FlagKind::Value),
    ("cmd", FlagKind::Value),
    ("after", FlagKind::Value),
    ("systemd-config-dir", FlagKind::Value),
    ("h", FlagKind::Switch),
    ("help", FlagKind::Switch),
    ("stdout", FlagKind::Switch),
    ("verbose", FlagKind::Switch),
];

/// Result of collecting the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub config: UnitConfig,
    /// Raise the log level to `debug`.
    pub verbose: bool,
}

fn command() -> Command {
    Command::new("generate_unit")
        .about("Generates a systemd service unit from command-line flags")
        .override_usage("generate_unit -name <NAME> -cmd <COMMAND> [OPTIONS]")
        .disable_help_flag(true)
        .args_override_self(true)
        .arg(value_arg("name", "NAME", "Name of the daemon").long("name"))
        .arg(value_arg("d", "DESCRIPTION", "Daemon description").short('d'))
        .arg(value_arg("wd", "DIR", "Working directory").long("wd"))
        .arg(value_arg("cmd", "COMMAND", "The command to run").long("cmd"))
        .arg(
            value_arg(
                "after",
                "UNITS",
                "Extra space-separated units to start after (network-online.target is always included)",
            )
            .long("after"),
        )
        .arg(
            value_arg(
                "systemd-config-dir",
                "DIR",
                "Systemd config directory the unit file is written to",
            )
            .long("systemd-config-dir"),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Show help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the unit to stdout instead of writing a file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .after_help(format!(
            "Flags may be written with one or two dashes (-name or --name).\n\
             The config directory defaults to ${} when set, else {}.",
            SYSTEMD_CONFIG_DIR_ENV, DEFAULT_SYSTEMD_DIR
        ))
}

fn value_arg(id: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .value_name(value_name)
        .num_args(1)
        .allow_hyphen_values(true)
        .help(help)
}

/// Usage text printed for `-h`.
pub fn usage() -> String {
    command().render_help().to_string()
}

/// Collects a [`UnitConfig`] from `argv` (program name first) and the value
/// of `$SYSTEMD_CONFIG_DIR`.
///
/// When help is requested the config is returned with `help` set and no
/// validation is performed. Otherwise `name` and `cmd` must be non-empty;
/// both are checked and the last failing check is the one reported.
pub fn parse_args<I, T>(argv: I, env_dir: Option<&str>) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let normalized = normalize_flags(argv)?;
    let matches = command()
        .try_get_matches_from(normalized)
        .map_err(|err| GenerateError::InvalidArgument(clap_message(&err)))?;

    let output_dir = matches
        .get_one::<String>("systemd-config-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_dir(env_dir));

    let config = UnitConfig {
        name: string_value(&matches, "name"),
        description: string_value(&matches, "d"),
        working_directory: string_value(&matches, "wd"),
        command: string_value(&matches, "cmd"),
        output_dir,
        after: compose_after(&string_value(&matches, "after")),
        help: matches.get_flag("help"),
        stdout: matches.get_flag("stdout"),
    };
    let verbose = matches.get_flag("verbose");

    if config.help {
        return Ok(Invocation { config, verbose });
    }

    let mut missing = None;
    if config.name.is_empty() {
        missing = Some("name");
    }
    if config.command.is_empty() {
        missing = Some("cmd");
    }
    if let Some(flag) = missing {
        return Err(GenerateError::MissingArgument(flag));
    }

    Ok(Invocation { config, verbose })
}

fn string_value(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .trim()
        .trim_start_matches("error: ")
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Rewrites single-dash long flags (`-name`, `-cmd=x`) into the form clap
/// parses, splitting inline values into their own token.
///
/// Parsing stops at the first non-flag argument or at `--`; everything from
/// there on is dropped. Boolean switches accept an inline `=true`/`=false`.
/// A repeated flag keeps its last value. Unknown flags are rejected here,
/// before clap can read `-dfoo` as `-d foo`.
fn normalize_flags<I, T>(argv: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = argv.into_iter().map(|arg| into_string(arg.into()));
    let mut normalized = Vec::new();

    if let Some(program) = args.next() {
        normalized.push(program?);
    }

    while let Some(arg) = args.next() {
        let arg = arg?;
        if arg == "--" || arg == "-" || !arg.starts_with('-') {
            break;
        }

        let body = arg.strip_prefix("--").unwrap_or(&arg[1..]);
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match lookup_flag(name) {
            None => {
                return Err(GenerateError::InvalidArgument(format!(
                    "flag provided but not defined: -{}",
                    name
                )))
            }
            Some(FlagKind::Value) => {
                normalized.push(canonical_flag(name));
                match inline {
                    Some(value) => normalized.push(value.to_string()),
                    None => {
                        if let Some(value) = args.next() {
                            normalized.push(value?);
                        }
                    }
                }
            }
            Some(FlagKind::Switch) => match inline {
                None => normalized.push(canonical_flag(name)),
                Some(value) => match parse_bool(value) {
                    Some(true) => normalized.push(canonical_flag(name)),
                    Some(false) => {}
                    None => {
                        return Err(GenerateError::InvalidArgument(format!(
                            "invalid boolean value \"{}\" for -{}",
                            value, name
                        )))
                    }
                },
            },
        }
    }

    Ok(normalized)
}

fn into_string(arg: OsString) -> Result<String> {
    arg.into_string().map_err(|raw| {
        GenerateError::InvalidArgument(format!("argument is not valid UTF-8: {:?}", raw))
    })
}

fn lookup_flag(name: &str) -> Option<FlagKind> {
    FLAGS
        .iter()
        .find(|(flag, _)| *flag == name)
        .map(|(_, kind)| *kind)
}

fn canonical_flag(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
