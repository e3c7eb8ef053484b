//! LIMEJAM CLI
//!
//! Shuffles or sorts the lines of an ASCII/UTF-8 text file in place.
//!
//! # Usage
//!
//! - `limejam FILE` - shuffle the lines of FILE
//! - `limejam -s FILE` - sort the lines of FILE
//! - `limejam -k FILE` - leave the first line where it is

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use limejam_core::{Config, Mode, WriteStrategy};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Shuffle lines in ASCII/UTF-8 text file.
#[derive(Parser, Debug)]
#[command(name = "limejam")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keep first line
    #[arg(short = 'k')]
    keep_first_line: bool,

    /// Just sort, no shuffle
    #[arg(short = 's')]
    sort: bool,

    /// Keep the first N lines in place (overrides -k)
    #[arg(long, value_name = "N")]
    keep: Option<usize>,

    /// Seed the shuffle for a reproducible order
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Split physical lines longer than BYTES
    #[arg(long, value_name = "BYTES", conflicts_with = "legacy_line_len")]
    max_line_len: Option<usize>,

    /// Split lines at 1023 bytes like LIMEJAM 1.x
    #[arg(long)]
    legacy_line_len: bool,

    /// Overwrite the file directly instead of replacing it atomically
    #[arg(long)]
    in_place: bool,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Text file to reorder
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Silent on success
    Text,
    /// Print a JSON summary
    Json,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new()
            .mode(if self.sort { Mode::Sort } else { Mode::Shuffle })
            .keep_first(
                self.keep
                    .unwrap_or_else(|| usize::from(self.keep_first_line)),
            )
            .max_line_len(self.max_line_len)
            .write_strategy(if self.in_place {
                WriteStrategy::InPlace
            } else {
                WriteStrategy::Atomic
            });
        if self.legacy_line_len {
            config = config.legacy_line_len();
        }
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        config
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    match early_exit(&args) {
        Some(Early::Usage) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Some(Early::TooManyArguments) => {
            eprintln!("limejam: error: Too many arguments");
            return ExitCode::from(1);
        }
        None => {}
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(report_parse_error(&err)),
    };

    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("limejam: error: {err}");
            ExitCode::from(1)
        }
    }
}

/// Decided before clap parses the arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Early {
    /// Print usage and exit 0.
    Usage,
    /// A second file name was given.
    TooManyArguments,
}

/// Scans the arguments left to right so the first deciding one wins, as in
/// LIMEJAM 1.x: no arguments, `/?` or `--help` print usage, and a second file
/// name is an error. Scanning stops at `--version` or an unknown option,
/// leaving the report to clap.
///
/// Unlike 1.x, bundled flags such as `-ks` are accepted.
fn early_exit(args: &[OsString]) -> Option<Early> {
    if args.len() <= 1 {
        return Some(Early::Usage);
    }

    let command = Cli::command();
    let mut files = 0usize;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        let text = arg.to_string_lossy();
        match &*text {
            "/?" | "--help" | "-h" => return Some(Early::Usage),
            "--version" | "-V" => return None,
            "--" => {
                files += rest.by_ref().count();
                return (files > 1).then_some(Early::TooManyArguments);
            }
            option if option.len() > 1 && option.starts_with('-') => {
                match value_follows(&command, option) {
                    Some(true) => {
                        rest.next();
                    }
                    Some(false) => {}
                    None => return None,
                }
            }
            _ => {
                files += 1;
                if files > 1 {
                    return Some(Early::TooManyArguments);
                }
            }
        }
    }
    None
}

/// Whether a known option takes the next argument as its value.
/// `None` if clap does not know the option.
fn value_follows(command: &clap::Command, option: &str) -> Option<bool> {
    if let Some(long) = option.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))?;
        return Some(arg.get_action().takes_values() && !inline);
    }

    let mut shorts = option[1..].chars();
    while let Some(short) = shorts.next() {
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_short() == Some(short))?;
        if arg.get_action().takes_values() {
            return Some(shorts.as_str().is_empty());
        }
    }
    Some(false)
}

fn print_usage() {
    let mut command = Cli::command();
    if command.print_help().is_ok() {
        println!();
    }
}

/// Prints a clap error and returns the exit status for it.
fn report_parse_error(err: &clap::Error) -> u8 {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.files.len() > 1 {
        return Err("Too many arguments".into());
    }

    let path = cli.files.first().map(PathBuf::as_path);
    let summary = limejam_core::reorder(path, &cli.config())?;

    if cli.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use limejam_core::LEGACY_MAX_LINE_LEN;
    use limejam_testkit::TextFile;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("limejam").chain(args.iter().copied()))
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        std::iter::once("limejam")
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn flags_map_to_config() {
        let cli = parse(&["-k", "-s", "list.txt"]).unwrap();
        let config = cli.config();
        assert_eq!(config.mode, Mode::Sort);
        assert_eq!(config.keep_first, 1);
        assert_eq!(config.write_strategy, WriteStrategy::Atomic);
        assert_eq!(cli.files, vec![PathBuf::from("list.txt")]);
    }

    #[test]
    fn defaults_shuffle_everything() {
        let config = parse(&["list.txt"]).unwrap().config();
        assert_eq!(config.mode, Mode::Shuffle);
        assert_eq!(config.keep_first, 0);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_line_len, None);
    }

    #[test]
    fn extended_options() {
        let cli = parse(&[
            "--keep", "3", "--seed", "42", "--legacy-line-len", "--in-place", "-f", "json",
            "list.txt",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.keep_first, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_line_len, Some(LEGACY_MAX_LINE_LEN));
        assert_eq!(config.write_strategy, WriteStrategy::InPlace);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn line_length_options_conflict() {
        let err = parse(&["--max-line-len", "10", "--legacy-line-len", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert_eq!(report_parse_error(&err), 1);
    }

    #[test]
    fn unknown_option_fails_with_one() {
        let err = parse(&["-x", "list.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(report_parse_error(&err), 1);
    }

    #[test]
    fn help_and_version_succeed() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(report_parse_error(&err), 0);

        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(report_parse_error(&err), 0);
    }

    #[test]
    fn usage_requests() {
        assert_eq!(early_exit(&os_args(&[])), Some(Early::Usage));
        assert_eq!(early_exit(&os_args(&["-k", "/?"])), Some(Early::Usage));
        assert_eq!(early_exit(&os_args(&["--seed", "5", "/?"])), Some(Early::Usage));
        assert_eq!(early_exit(&os_args(&["list.txt", "--help"])), Some(Early::Usage));
        assert_eq!(early_exit(&os_args(&["-k", "list.txt"])), None);
    }

    #[test]
    fn first_deciding_argument_wins() {
        assert_eq!(early_exit(&os_args(&["-x", "/?"])), None);
        let err = parse(&["-x", "/?"]).unwrap_err();
        assert_eq!(report_parse_error(&err), 1);

        assert_eq!(
            early_exit(&os_args(&["a.txt", "b.txt", "--help"])),
            Some(Early::TooManyArguments)
        );
        assert_eq!(early_exit(&os_args(&["--version", "a.txt", "b.txt"])), None);
    }

    #[test]
    fn option_values_are_not_file_names() {
        assert_eq!(early_exit(&os_args(&["--keep", "3", "a.txt"])), None);
        assert_eq!(early_exit(&os_args(&["-f", "json", "a.txt"])), None);
        assert_eq!(early_exit(&os_args(&["-fjson", "a.txt"])), None);
        assert_eq!(
            early_exit(&os_args(&["--seed=7", "a.txt", "b.txt"])),
            Some(Early::TooManyArguments)
        );
        assert_eq!(
            early_exit(&os_args(&["a.txt", "--", "b.txt"])),
            Some(Early::TooManyArguments)
        );
    }

    #[test]
    fn bundled_flags_are_accepted() {
        assert_eq!(early_exit(&os_args(&["-ks", "a.txt"])), None);
        let config = parse(&["-ks", "a.txt"]).unwrap().config();
        assert_eq!(config.mode, Mode::Sort);
        assert_eq!(config.keep_first, 1);
    }

    #[test]
    fn too_many_arguments() {
        let cli = parse(&["a.txt", "b.txt"]).unwrap();
        let err = execute(&cli).unwrap_err();
        assert_eq!(err.to_string(), "Too many arguments");
    }

    #[test]
    fn flags_without_file_fail() {
        let cli = parse(&["-k", "-s"]).unwrap();
        assert!(execute(&cli).is_err());
    }

    #[test]
    fn sorts_a_file() {
        let file = TextFile::with_lines(&["banana\n", "apple\n", "cherry\n"]);
        let path = file.path().to_str().unwrap();
        let cli = parse(&["-s", "-f", "json", path]).unwrap();
        execute(&cli).unwrap();
        assert_eq!(file.lines(), vec!["apple\n", "banana\n", "cherry\n"]);
    }
}
