//! Terminal runner: generate an array, sort it, print every frame.
//!
//! Run with: `cargo run --package sortviz-demo -- --algorithm quick`
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::process::ExitCode;

use sortviz_core::config::load_config;
use sortviz_core::{EngineConfig, RunController, RunOutcome};
use sortviz_demo::args::USAGE;
use sortviz_demo::render::DEFAULT_WIDTH;
use sortviz_demo::{DemoArgs, DemoError, play};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<bool, DemoError> {
    let args = DemoArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(true);
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;
    let algorithm = args.algorithm.unwrap_or(config.default_algorithm);

    let mut ctl = RunController::new(config)?;
    let report = play(&mut ctl, algorithm, &mut std::io::stdout().lock(), DEFAULT_WIDTH)?;
    Ok(report.outcome == RunOutcome::Completed)
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            if matches!(
                e,
                DemoError::UnknownArgument { .. }
                    | DemoError::MissingValue { .. }
                    | DemoError::InvalidValue { .. }
            ) {
                eprintln!("\n{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
