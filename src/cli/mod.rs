//! The harness command-line entry point.
//!
//! Wires the pieces together in the order that matters: build the logger from
//! the output flags, discover and load fixtures, let the caller register
//! suites, run whatever the positional filters select, and map the summary
//! onto the process exit code (nonzero on any failure or aborted suite).

use std::process::ExitCode;

use clap::Parser;

use crate::cli::args::HarnessArgs;
use crate::cli::output::Logger;
use crate::fixtures::FixtureMap;
use crate::harness::Harness;

pub mod args;
pub mod output;

/// Parses `std::env::args`, then drives a full run. The `register` callback
/// receives the harness to add fixtures and suites to.
pub fn run<F>(register: F) -> ExitCode
where
    F: FnOnce(&mut Harness),
{
    run_with_args(HarnessArgs::parse(), register)
}

/// Same as [`run`] but with pre-parsed arguments, for tests and embedders.
pub fn run_with_args<F>(args: HarnessArgs, register: F) -> ExitCode
where
    F: FnOnce(&mut Harness),
{
    let logger = Logger::stdout(args.log_filter());

    let fixtures = match FixtureMap::load_dir(&args.fixture_root) {
        Ok(fixtures) => fixtures,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            return ExitCode::FAILURE;
        }
    };

    let mut harness = Harness::new(fixtures, logger);
    register(&mut harness);

    let summary = harness.run(&args.suites);
    if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
