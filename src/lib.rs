pub use crate::errors::HarnessError;
pub use crate::value::Value;

pub mod assert;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod fixtures;
pub mod harness;
pub mod manifest;
pub mod report;
pub mod spy;
pub mod suite;
pub mod value;

/// Common imports for harness users and internal modules.
pub mod prelude {
    pub use crate::assert::Assert;
    pub use crate::cli::output::{BufferSink, LogFilter, Logger, StdoutSink};
    pub use crate::errors::HarnessError;
    pub use crate::fixtures::FixtureMap;
    pub use crate::harness::{Harness, RunSummary};
    pub use crate::manifest::FixtureManifest;
    pub use crate::spy::{Spy, SpyReport};
    pub use crate::suite::runner::SuiteRunner;
    pub use crate::suite::{SuiteResult, Tally, TallyKind, Verdict};
    pub use crate::value::Value;
}
