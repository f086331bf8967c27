//! Defines the command-line arguments for the harness runner.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::Parser;

use crate::cli::output::LogFilter;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "attest",
    version,
    about = "A minimal fixture-injecting unit test harness with tallied assertions and spies."
)]
pub struct HarnessArgs {
    /// Suite names to run; exact, case-insensitive match against "<name>.test".
    /// With no names, every registered suite runs.
    pub suites: Vec<String>,

    /// Directory scanned recursively for *.fixtures.{json,yaml,yml} files.
    #[arg(long, default_value = ".")]
    pub fixture_root: PathBuf,

    /// Disable general logs.
    #[arg(long)]
    pub no_logs: bool,

    /// Disable error logs.
    #[arg(long)]
    pub no_errors: bool,

    /// Disable test headers and failure alerts.
    #[arg(long)]
    pub no_test_logs: bool,

    /// Disable per-assertion failure messages.
    #[arg(long)]
    pub no_assert_logs: bool,

    /// Disable the final results block.
    #[arg(long)]
    pub no_result_logs: bool,

    /// Disable everything except the final results block.
    #[arg(long)]
    pub only_result_logs: bool,
}

impl HarnessArgs {
    /// Folds the disable flags into a category filter. `--only-result-logs`
    /// wins over the individual flags.
    pub fn log_filter(&self) -> LogFilter {
        if self.only_result_logs {
            return LogFilter::only_results();
        }
        LogFilter {
            log: !self.no_logs,
            error: !self.no_errors,
            test: !self.no_test_logs,
            assert: !self.no_assert_logs,
            result: !self.no_result_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_the_filter() {
        let args = HarnessArgs::parse_from(["attest", "--no-test-logs", "--no-errors"]);
        let filter = args.log_filter();
        assert!(!filter.test);
        assert!(!filter.error);
        assert!(filter.assert);
        assert!(filter.result);
    }

    #[test]
    fn only_result_logs_overrides_everything() {
        let args = HarnessArgs::parse_from(["attest", "--only-result-logs"]);
        let filter = args.log_filter();
        assert_eq!(filter, LogFilter::only_results());
    }

    #[test]
    fn positional_args_become_suite_filters() {
        let args = HarnessArgs::parse_from(["attest", "blockchain", "wallet"]);
        assert_eq!(args.suites, ["blockchain", "wallet"]);
    }
}
