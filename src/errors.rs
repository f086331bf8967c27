//! Unified error type for the harness.
//!
//! Assertion failures are deliberately *not* represented here: a failed
//! assertion is a recorded outcome (tally increment plus log line), never an
//! error value. Everything that can actually abort a test or a run funnels
//! through [`HarnessError`].

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// A test or hook declared a fixture name that is not in the fixture map.
    /// Fatal to the test that triggered it; never downgraded to an assertion failure.
    #[error("{name} does not exist as a fixture!")]
    #[diagnostic(
        code(attest::missing_fixture),
        help("declare `{name}` in a *.fixtures.json or *.fixtures.yaml file, or check the manifest key for typos")
    )]
    MissingFixture { name: String },

    #[error("failed to read fixture file '{}'", path.display())]
    #[diagnostic(code(attest::fixture_io))]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture file '{}': {message}", path.display())]
    #[diagnostic(
        code(attest::fixture_parse),
        help("fixture files must be valid JSON or YAML")
    )]
    FixtureParse { path: PathBuf, message: String },

    #[error("fixture file '{}' must contain a top-level mapping of names to values", path.display())]
    #[diagnostic(code(attest::fixture_shape))]
    FixtureShape { path: PathBuf },

    #[error("failed to walk '{}': {message}", root.display())]
    #[diagnostic(code(attest::discovery))]
    Discovery { root: PathBuf, message: String },
}

impl HarnessError {
    pub fn missing_fixture(name: impl Into<String>) -> Self {
        HarnessError::MissingFixture { name: name.into() }
    }
}
