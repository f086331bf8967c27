//! Core suite types: verdicts, tallies, and the exported per-suite result.

pub mod runner;

/// Per-test (or per-assertion) outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

/// Which tally a count belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyKind {
    Tests,
    Assertions,
}

/// Pass/fail counters for one tally kind. Monotonically non-decreasing within
/// a suite run; reset only when the suite initializes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count {
    pub passed: usize,
    pub failed: usize,
}

impl Count {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// Aggregate pass/fail counters, kept separately for whole tests and for
/// individual assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub tests: Count,
    pub assertions: Count,
}

impl Tally {
    pub fn get(&self, kind: TallyKind) -> Count {
        match kind {
            TallyKind::Tests => self.tests,
            TallyKind::Assertions => self.assertions,
        }
    }

    pub fn increment(&mut self, kind: TallyKind, verdict: Verdict) {
        match kind {
            TallyKind::Tests => self.tests.record(verdict),
            TallyKind::Assertions => self.assertions.record(verdict),
        }
    }
}

/// Immutable snapshot of a completed suite, handed to the report formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteResult {
    pub description: String,
    pub tallies: Tally,
}

impl SuiteResult {
    pub fn has_failures(&self) -> bool {
        self.tallies.tests.failed > 0
    }
}
