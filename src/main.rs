//! TuneSpec - inspect, tune and export tunable spec files
//!
//! Spec files are JSON arrays of tunable values. This binary reads and edits
//! them from scripts, and opens a terminal tuning panel for live adjustment.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tunespec::cli::{
    CliResult, ConfigArgs, ExitCode, ExportArgs, GetArgs, SetArgs, ShowArgs, TuneArgs, ValidateArgs,
};
use tunespec::constants::{APP_BINARY_NAME, APP_NAME};

/// TuneSpec - inspect, tune and export tunable spec files
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the entries of a spec
    Show(ShowArgs),
    /// Print one value
    Get(GetArgs),
    /// Change one value and save the spec file
    Set(SetArgs),
    /// Check a spec file for errors
    Validate(ValidateArgs),
    /// Write the spec out as a new file or to the clipboard
    Export(ExportArgs),
    /// Tune a spec interactively in the terminal
    Tune(TuneArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Show(args) => args.execute(),
            Self::Get(args) => args.execute(),
            Self::Set(args) => args.execute(),
            Self::Validate(args) => args.execute(),
            Self::Export(args) => args.execute(),
            Self::Tune(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "tunespec=debug" } else { "tunespec=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let usage_error = err.use_stderr();
        // --help and --version also arrive here; only real parse errors are usage failures.
        let _ = err.print();
        std::process::exit(if usage_error {
            ExitCode::Usage.code()
        } else {
            ExitCode::Success.code()
        });
    });

    init_tracing(cli.verbose);
    tracing::debug!(app = APP_NAME, version = env!("CARGO_PKG_VERSION"), "starting");

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
