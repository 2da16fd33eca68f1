mod commands;
mod error;
mod io;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use commands::check::{handle_check, OutputFormat};
use commands::init::handle_init;
use commands::registry::handle_registry;

#[derive(Parser, Debug)]
#[command(name = "netguard")]
#[command(about = "Finds network calls that escape without error handling", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Check analysis units for unguarded network calls
    Check {
        /// Unit documents, or directories searched for them
        #[arg(value_name = "PATHS", default_value = ".")]
        paths: Vec<PathBuf>,
        /// Configuration file (defaults to the nearest netguard.toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// How findings are printed
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },

    /// Write a default netguard.toml
    Init {
        /// Directory to create the file in
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective effect registry
    Registry {
        /// Configuration file (defaults to the nearest netguard.toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

/// Exit status when a command fails before producing a verdict.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let result = match args.command {
        Command::Check { paths, config, format } => handle_check(paths, config, format).map(|outcome| {
            if outcome.failed > 0 {
                ExitCode::from(EXIT_ERROR)
            } else if outcome.findings > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }),
        Command::Init { dir, force } => handle_init(&dir, force).map(|_| ExitCode::SUCCESS),
        Command::Registry { config } => handle_registry(config.as_deref()).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| {
        eprintln!("{:?}", miette::Report::new(err));
        ExitCode::from(EXIT_ERROR)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn check_defaults_to_current_directory() {
        let args = Args::try_parse_from(["netguard", "check"]).unwrap();
        match args.command {
            Command::Check { paths, config, format } => {
                assert_eq!(paths, vec![PathBuf::from(".")]);
                assert_eq!(config, None);
                assert_eq!(format, OutputFormat::Human);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn json_format_is_accepted() {
        let args = Args::try_parse_from(["netguard", "-q", "check", "units", "--format", "json"]).unwrap();
        assert!(matches!(args.command, Command::Check { format: OutputFormat::Json, .. }));
    }
}
