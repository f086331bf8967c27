//! Executes one suite: owns its tally and hook list, exposes the test-authoring
//! API to the suite body, and derives per-test verdicts.
//!
//! Execution is single-threaded and cooperative: a suite's tests run strictly
//! one at a time in registration order, and every before-each hook completes
//! before the test body begins. The tally is suite-scoped mutable state, which
//! is exactly why nothing here interleaves.

use std::cell::RefCell;
use std::rc::Rc;

use crate::assert::Assert;
use crate::cli::output::Logger;
use crate::errors::HarnessError;
use crate::fixtures::FixtureMap;
use crate::manifest::FixtureManifest;
use crate::spy::Spy;
use crate::suite::{Count, SuiteResult, Tally, TallyKind, Verdict};
use crate::value::Value;

/// Boxed hook body. Hooks resolve their own fixture manifest before every test,
/// exactly like a test does.
type HookBody = Box<dyn FnMut(&[Value], &Assert) -> Result<(), HarnessError>>;

struct Hook {
    manifest: FixtureManifest,
    body: HookBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuiteState {
    Uninitialized,
    Running,
    Complete,
}

/// Owns one suite's lifecycle: `Uninitialized -> Running -> Complete`.
pub struct SuiteRunner {
    fixtures: Rc<FixtureMap>,
    logger: Rc<Logger>,
    tally: Rc<RefCell<Tally>>,
    hooks: Vec<Hook>,
    description: String,
    state: SuiteState,
}

impl SuiteRunner {
    pub fn new(fixtures: Rc<FixtureMap>, logger: Rc<Logger>) -> Self {
        SuiteRunner {
            fixtures,
            logger,
            tally: Rc::new(RefCell::new(Tally::default())),
            hooks: Vec::new(),
            description: String::new(),
            state: SuiteState::Uninitialized,
        }
    }

    /// Resets tallies and the hook list, runs the suite body, and returns the
    /// completed snapshot.
    ///
    /// An error from the body (a missing fixture, or anything a test chose to
    /// propagate) aborts the remaining tests in this suite and surfaces to the
    /// caller; partial tallies stay readable through [`SuiteRunner::results`].
    pub fn run<F>(&mut self, description: &str, body: F) -> Result<SuiteResult, HarnessError>
    where
        F: FnOnce(&mut SuiteRunner) -> Result<(), HarnessError>,
    {
        self.description = description.to_string();
        self.initialize_test_data();
        self.state = SuiteState::Running;
        self.logger
            .log_test(&format!("\nRunning tests for {description} \n"));
        body(self)?;
        self.state = SuiteState::Complete;
        Ok(self.results())
    }

    fn initialize_test_data(&mut self) {
        *self.tally.borrow_mut() = Tally::default();
        self.hooks.clear();
    }

    /// Registers and immediately executes one named test.
    ///
    /// Replays every before-each hook, resolves the test's own fixture
    /// arguments, runs the body, then derives the verdict: FAILED iff the
    /// assertions-failed counter strictly increased during the body's
    /// execution window (hook assertions land before the snapshot and do not
    /// affect the verdict). Fixture-resolution and body errors propagate
    /// uncaught; assertion failures never do.
    pub fn test<M, F>(&mut self, name: &str, manifest: M, mut body: F) -> Result<(), HarnessError>
    where
        M: Into<FixtureManifest>,
        F: FnMut(&[Value], &Assert) -> Result<(), HarnessError>,
    {
        self.logger.log_test(&format!("Test: \"{name}\""));
        self.run_before_each_hooks()?;

        let prev_failed = self.tally.borrow().assertions.failed;
        let args = self.fixtures.resolve_args(&manifest.into())?;
        let assert = self.assert();
        body(&args, &assert)?;

        let failed_after = self.tally.borrow().assertions.failed;
        let verdict = if failed_after > prev_failed {
            Verdict::Failed
        } else {
            Verdict::Passed
        };
        self.increment_tests_tally(verdict);
        if verdict == Verdict::Failed {
            self.alert_test_failure(name);
        }
        Ok(())
    }

    fn run_before_each_hooks(&mut self) -> Result<(), HarnessError> {
        let fixtures = Rc::clone(&self.fixtures);
        let assert = Assert::new(Rc::clone(&self.tally), Rc::clone(&self.logger));
        for hook in &mut self.hooks {
            let args = fixtures.resolve_args(&hook.manifest)?;
            (hook.body)(&args, &assert)?;
        }
        Ok(())
    }

    /// Appends a hook replayed before every subsequent test in this suite, in
    /// registration order.
    pub fn before_each<M, F>(&mut self, manifest: M, hook: F)
    where
        M: Into<FixtureManifest>,
        F: FnMut(&[Value], &Assert) -> Result<(), HarnessError> + 'static,
    {
        self.hooks.push(Hook {
            manifest: manifest.into(),
            body: Box::new(hook),
        });
    }

    /// A fresh assertion handle bound to this suite's tally and logger.
    ///
    /// Usable outside any test as well; such assertions move the assertion
    /// tally but never a test tally.
    pub fn assert(&self) -> Assert {
        Assert::new(Rc::clone(&self.tally), Rc::clone(&self.logger))
    }

    /// Spy factory, part of the test-authoring surface.
    pub fn spy<F>(&self, name: &str, target: F) -> Spy
    where
        F: FnMut(&[Value]) -> Result<Value, HarnessError> + 'static,
    {
        Spy::watch(name, target)
    }

    /// Fixture provider: wraps a helper so its last parameter is bound to the
    /// entire fixture map. See [`FixtureMap::provider`].
    pub fn provider<M, F, R>(&self, manifest: M, f: F) -> impl Fn(&[Value]) -> R
    where
        M: Into<FixtureManifest>,
        F: Fn(&[Value]) -> R + 'static,
    {
        FixtureMap::provider(Rc::clone(&self.fixtures), manifest.into(), f)
    }

    fn alert_test_failure(&self, name: &str) {
        self.logger.log_test(&format!(
            "\nALERT: \"{name}\" TEST HAS FAILED! SEE ABOVE ERROR FOR DETAILS\n"
        ));
    }

    /// Snapshot of the suite so far. After [`SuiteRunner::run`] returns Ok this
    /// is the final result; after an abort it carries the partial tallies.
    pub fn results(&self) -> SuiteResult {
        SuiteResult {
            description: self.description.clone(),
            tallies: *self.tally.borrow(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SuiteState::Complete
    }

    pub fn tally(&self) -> Tally {
        *self.tally.borrow()
    }

    pub fn get_tally(&self, kind: TallyKind) -> Count {
        self.tally.borrow().get(kind)
    }

    pub fn increment_tally(&self, kind: TallyKind, verdict: Verdict) {
        self.tally.borrow_mut().increment(kind, verdict);
    }

    pub fn increment_tests_tally(&self, verdict: Verdict) {
        self.increment_tally(TallyKind::Tests, verdict);
    }

    pub fn increment_assertions_tally(&self, verdict: Verdict) {
        self.increment_tally(TallyKind::Assertions, verdict);
    }
}
