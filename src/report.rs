//! Renders completed suite results into the human-readable summary block.

use std::fmt::Write as _;

use crate::cli::output::Logger;
use crate::suite::SuiteResult;

const BANNER_TOP: &str =
    "=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~= TEST RESULTS =~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=";
const BANNER_BOTTOM: &str =
    "=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=";

/// Renders one block per suite plus the grand total line.
pub fn render(results: &[SuiteResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n\n{BANNER_TOP}");

    let mut passed = 0;
    let mut failed = 0;
    for result in results {
        let tests = result.tallies.tests;
        let assertions = result.tallies.assertions;
        passed += tests.passed;
        failed += tests.failed;

        let _ = writeln!(out, "\n===== {} =====\n", result.description);
        let _ = writeln!(out, "{} TESTS FINISHED\n", tests.total());
        let _ = writeln!(out, "*");
        let _ = writeln!(out, "* {} Assertions Passed", assertions.passed);
        let _ = writeln!(out, "* {} Assertions Failed", assertions.failed);
        let _ = writeln!(out, "*");
        let _ = writeln!(out, "* {} Tests Passed", tests.passed);
        let _ = writeln!(out, "* {} Tests Failed", tests.failed);
        let _ = writeln!(out, "*");
    }

    let _ = writeln!(out, "\nTOTAL: Passed: {passed}, Failed: {failed}");
    let _ = write!(out, "\n{BANNER_BOTTOM}\n\n");
    out
}

/// Writes the rendered summary to the result log category.
pub fn write(results: &[SuiteResult], logger: &Logger) {
    logger.log_result(&render(results));
}
