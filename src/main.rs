#![forbid(unsafe_code)]

//! `evolve-clang-format` — fitness worker binary.
//!
//! Parses the command line, initialises logging on stderr, and serves the
//! JSON-RPC channel on stdin/stdout until end of input.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use evolve_clang_format::diff::DiffyLineCounter;
use evolve_clang_format::fitness::FitnessEvaluator;
use evolve_clang_format::format::ClangFormat;
use evolve_clang_format::protocol::Dispatcher;
use evolve_clang_format::{AppError, Result, WorkerConfig};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "evolve-clang-format",
    about = "Scores clang-format configurations for an evolutionary search harness",
    version,
    long_about = None
)]
struct Cli {
    /// Source file scored by every `evolve.measure` request.
    target: PathBuf,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the formatter executable.
    #[arg(long)]
    clang_format: Option<PathBuf>,

    /// Log output format (text or json). Logs always go to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Emit debug diagnostics for every evaluation.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if let Err(err) = init_tracing(args.log_format, args.debug) {
        eprintln!("{err}");
        return ExitCode::from(1);
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "worker terminated");
            ExitCode::from(1)
        }
    }
}

fn run(args: Cli) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => WorkerConfig::load_from_path(path)?,
        None => WorkerConfig::default(),
    }
    .with_target(args.target);

    if let Some(binary) = args.clang_format {
        config.formatter.binary = binary;
    }

    info!(
        path = %config.target.display(),
        formatter = %config.formatter.binary.display(),
        "evolve-clang-format starting"
    );

    let evaluator = FitnessEvaluator::new(
        ClangFormat::from_config(&config),
        DiffyLineCounter::new(),
        config.target.clone(),
    )
    .allow_missing_target(config.allow_missing_target);
    let mut dispatcher = Dispatcher::new(evaluator);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?;
    let outcome = runtime.block_on(dispatcher.serve(tokio::io::stdin(), tokio::io::stdout()));
    // A pending blocking stdin read must not hold up exit.
    runtime.shutdown_background();
    outcome
}

fn init_tracing(log_format: LogFormat, debug: bool) -> Result<()> {
    let env_filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
