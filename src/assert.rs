//! The assertion engine.
//!
//! Every assertion method evaluates a predicate, then records PASS or FAIL on
//! the active suite tally. Failures write a descriptive message to the assert
//! log category and execution continues: assertions never panic and never
//! abort a test. The test's verdict is derived later from whether the
//! assertions-failed counter moved during its execution window.

use std::cell::RefCell;
use std::rc::Rc;

use difference::{Changeset, Difference};

use crate::cli::output::Logger;
use crate::suite::{Tally, TallyKind, Verdict};
use crate::value::Value;

/// Assertion handle bound to one suite's tally and logger.
pub struct Assert {
    tally: Rc<RefCell<Tally>>,
    logger: Rc<Logger>,
}

impl Assert {
    pub(crate) fn new(tally: Rc<RefCell<Tally>>, logger: Rc<Logger>) -> Self {
        Assert { tally, logger }
    }

    /// Structural deep equality.
    ///
    /// Containers compare by canonical form: map keys sort lexicographically,
    /// list elements keep their original order. Scalars compare directly.
    pub fn equal(&self, actual: &Value, expected: &Value) {
        if actual.structural_eq(expected) {
            self.pass();
            return;
        }
        let mut detail = format!("Expected \"{expected}\" but instead got \"{actual}\"");
        if actual.is_container() || expected.is_container() {
            detail.push('\n');
            detail.push_str(&render_diff(&expected.canonical(), &actual.canonical()));
        }
        self.fail(&detail, None);
    }

    /// Logical complement of [`Assert::equal`], same normalization.
    pub fn not_equal(&self, actual: &Value, expected: &Value) {
        if !actual.structural_eq(expected) {
            self.pass();
        } else {
            self.fail(
                &format!("Expected \"{expected}\" to not equal \"{actual}\""),
                None,
            );
        }
    }

    /// Passes iff every name in `keys` exists as an entry of the map `actual`.
    /// Extra entries on `actual` are allowed.
    pub fn has_keys(&self, actual: &Value, keys: &[&str]) {
        let Some(entries) = actual.as_map() else {
            self.fail(
                &format!("Expected a map but got {}", actual.type_name()),
                Some("\nAssertion Fail, Object missing key"),
            );
            return;
        };
        for key in keys {
            if !entries.contains_key(*key) {
                self.fail(
                    &format!("Missing expected property: \"{key}\""),
                    Some("\nAssertion Fail, Object missing key"),
                );
                return;
            }
        }
        self.pass();
    }

    /// Deprecated in favor of [`Assert::equal`]; kept for compatibility.
    ///
    /// Passes iff `actual` has at least as many entries as `expected` and every
    /// entry of `expected` appears in `actual` with a structurally equal value
    /// (same normalization as [`Assert::equal`]). A non-empty `actual` checked
    /// against an empty `expected` fails.
    pub fn has_values(&self, actual: &Value, expected: &Value) {
        self.logger.log_error(
            "assert.has_values is deprecated. Try using assert.equal to check map equality",
        );
        let (Some(actual_entries), Some(expected_entries)) = (actual.as_map(), expected.as_map())
        else {
            self.fail(
                "Expected maps on both sides",
                Some("\nAssertion Fail, Object properties not equal"),
            );
            return;
        };
        let actual_len = actual_entries.len();
        let expected_len = expected_entries.len();
        if actual_len < expected_len {
            self.fail(
                &format!("Missing {} properties", expected_len - actual_len),
                Some("\nAssertion Fail, Object properties not equal"),
            );
            return;
        }
        if actual_len != 0 && expected_len == 0 {
            self.fail(
                "Expected an empty map",
                Some("\nAssertion Fail, Object properties not equal"),
            );
            return;
        }
        for (key, expected_value) in expected_entries {
            let matched = actual_entries
                .get(key)
                .is_some_and(|actual_value| actual_value.structural_eq(expected_value));
            if !matched {
                let shown = actual_entries.get(key).cloned().unwrap_or(Value::Nil);
                self.fail(
                    &format!("\"{shown}\" does not equal \"{expected_value}\""),
                    Some("\nAssertion Fail, Object properties not equal"),
                );
                return;
            }
        }
        self.pass();
    }

    /// Passes iff the value is present. `Some(Value::Nil)` is *defined*: the
    /// present/absent distinction is what this checks, not nullness.
    pub fn is_defined(&self, value: Option<&Value>) {
        match value {
            Some(_) => self.pass(),
            None => self.fail("\"undefined\" does not exist.", None),
        }
    }

    /// Passes iff the value is absent.
    pub fn is_undefined(&self, value: Option<&Value>) {
        match value {
            None => self.pass(),
            Some(v) => self.fail(&format!("Value does exist: {v}"), None),
        }
    }

    fn pass(&self) {
        self.tally
            .borrow_mut()
            .increment(TallyKind::Assertions, Verdict::Passed);
    }

    fn fail(&self, detail: &str, header: Option<&str>) {
        self.logger.log_assert(header.unwrap_or("\nAssertion Fail"));
        self.logger.log_assert(detail);
        self.tally
            .borrow_mut()
            .increment(TallyKind::Assertions, Verdict::Failed);
    }
}

/// Line diff between two canonical forms, for container mismatch messages.
fn render_diff(expected: &str, actual: &str) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut out = String::new();
    for diff in changeset.diffs {
        let (prefix, text) = match diff {
            Difference::Same(ref x) => (' ', x.clone()),
            Difference::Add(ref x) => ('+', x.clone()),
            Difference::Rem(ref x) => ('-', x.clone()),
        };
        for line in text.lines() {
            out.push(prefix);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}
