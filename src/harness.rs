//! The run driver: owns the fixture map and logger, collects registered
//! suites, executes the ones the CLI filters select, and aggregates results.
//!
//! Registration and execution are separate phases so the driver can filter
//! first, then run everything sequentially against one shared, read-only
//! fixture map.

use std::rc::Rc;

use crate::cli::output::Logger;
use crate::discovery::suite_matches_filters;
use crate::errors::HarnessError;
use crate::fixtures::FixtureMap;
use crate::report;
use crate::suite::runner::SuiteRunner;
use crate::suite::SuiteResult;
use crate::value::Value;

type SuiteBody = Box<dyn FnOnce(&mut SuiteRunner) -> Result<(), HarnessError>>;

struct SuiteEntry {
    /// Label the CLI filters match against, e.g. "ledger.test".
    source: String,
    description: String,
    body: SuiteBody,
}

/// Aggregate outcome of one whole run, across suites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tests_passed: usize,
    pub tests_failed: usize,
    /// Suites whose body errored out (missing fixture or propagated test
    /// error) before completing.
    pub aborted_suites: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.tests_failed > 0 || self.aborted_suites > 0
    }

    pub fn total_tests(&self) -> usize {
        self.tests_passed + self.tests_failed
    }
}

pub struct Harness {
    fixtures: FixtureMap,
    logger: Rc<Logger>,
    suites: Vec<SuiteEntry>,
}

impl Harness {
    pub fn new(fixtures: FixtureMap, logger: Logger) -> Self {
        Harness {
            fixtures,
            logger: Rc::new(logger),
            suites: Vec::new(),
        }
    }

    /// Adds or overwrites one fixture. Merges over anything discovery loaded.
    pub fn add_fixture(&mut self, name: impl Into<String>, value: Value) {
        self.fixtures.insert(name, value);
    }

    /// Registers a suite under a source label. The body runs later, during
    /// [`Harness::run`], with the suite runner as its authoring surface.
    pub fn suite<F>(&mut self, source: &str, description: &str, body: F)
    where
        F: FnOnce(&mut SuiteRunner) -> Result<(), HarnessError> + 'static,
    {
        self.suites.push(SuiteEntry {
            source: source.to_string(),
            description: description.to_string(),
            body: Box::new(body),
        });
    }

    /// Runs every suite matching the filters, in registration order, then
    /// writes the results block and returns the aggregate summary.
    ///
    /// A suite whose body errors is logged and counted as aborted; its partial
    /// tallies still appear in the report, and later suites still run.
    pub fn run(self, filters: &[String]) -> RunSummary {
        let fixtures = Rc::new(self.fixtures);
        let logger = self.logger;

        let mut results: Vec<SuiteResult> = Vec::new();
        let mut aborted_suites = 0;

        for entry in self.suites {
            if !suite_matches_filters(&entry.source, filters) {
                continue;
            }
            let mut runner = SuiteRunner::new(Rc::clone(&fixtures), Rc::clone(&logger));
            match runner.run(&entry.description, entry.body) {
                Ok(result) => results.push(result),
                Err(err) => {
                    aborted_suites += 1;
                    logger.log_error(&format!(
                        "suite \"{}\" aborted: {err}",
                        entry.description
                    ));
                    results.push(runner.results());
                }
            }
        }

        report::write(&results, &logger);

        let mut summary = RunSummary {
            aborted_suites,
            ..RunSummary::default()
        };
        for result in &results {
            summary.tests_passed += result.tallies.tests.passed;
            summary.tests_failed += result.tallies.tests.failed;
        }
        summary
    }
}
