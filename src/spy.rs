//! Call-recording spies.
//!
//! A spy wraps a function so every invocation's arguments and return value are
//! captured without altering observable behavior. Each spy owns its own report,
//! keyed by the handle `watch` returns rather than by function name, so
//! anonymous closures and name collisions are non-issues.

use crate::errors::HarnessError;
use crate::value::Value;

/// Accumulated record of every successful call through one spy.
///
/// `args` and `returned` are parallel, call-indexed sequences; entries are
/// appended and never overwritten. The report lives as long as its spy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpyReport {
    pub name: String,
    pub call_count: usize,
    pub args: Vec<(usize, Vec<Value>)>,
    pub returned: Vec<(usize, Value)>,
}

impl SpyReport {
    fn new(name: &str) -> Self {
        SpyReport {
            name: name.to_string(),
            ..SpyReport::default()
        }
    }

    fn record(&mut self, args: Vec<Value>, returned: Value) {
        self.args.push((self.args.len(), args));
        self.returned.push((self.returned.len(), returned));
        self.call_count += 1;
    }
}

type SpyTarget = Box<dyn FnMut(&[Value]) -> Result<Value, HarnessError>>;

/// A watched function. Call it through [`Spy::call`]; read what happened
/// through [`Spy::report`].
pub struct Spy {
    report: SpyReport,
    target: SpyTarget,
}

impl Spy {
    /// Wraps a fallible function for observation.
    pub fn watch<F>(name: &str, target: F) -> Self
    where
        F: FnMut(&[Value]) -> Result<Value, HarnessError> + 'static,
    {
        Spy {
            report: SpyReport::new(name),
            target: Box::new(target),
        }
    }

    /// Wraps an infallible function for observation.
    pub fn watch_value<F>(name: &str, mut target: F) -> Self
    where
        F: FnMut(&[Value]) -> Value + 'static,
    {
        Spy::watch(name, move |args| Ok(target(args)))
    }

    /// Invokes the wrapped function, records the call, and passes the return
    /// value through unchanged.
    ///
    /// An error from the target propagates unmodified and is NOT recorded; the
    /// report only updates after a successful return.
    pub fn call(&mut self, args: &[Value]) -> Result<Value, HarnessError> {
        let returned = (self.target)(args)?;
        self.report.record(args.to_vec(), returned.clone());
        Ok(returned)
    }

    pub fn report(&self) -> &SpyReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_one_entry_per_call_in_order() {
        let mut spy = Spy::watch_value("double", |args| {
            Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0)
        });

        for n in 1..=3 {
            let returned = spy.call(&[Value::Number(n as f64)]).unwrap();
            assert_eq!(returned, Value::Number(n as f64 * 2.0));
        }

        let report = spy.report();
        assert_eq!(report.name, "double");
        assert_eq!(report.call_count, 3);
        assert_eq!(report.args.len(), 3);
        assert_eq!(report.returned.len(), 3);
        assert_eq!(report.args[1], (1, vec![Value::Number(2.0)]));
        assert_eq!(report.returned[2], (2, Value::Number(6.0)));
    }

    #[test]
    fn errors_propagate_unrecorded() {
        let mut spy = Spy::watch("flaky", |args| {
            if args.is_empty() {
                Err(HarnessError::missing_fixture("input"))
            } else {
                Ok(args[0].clone())
            }
        });

        spy.call(&[Value::from("ok")]).unwrap();
        let err = spy.call(&[]).unwrap_err();
        assert!(matches!(err, HarnessError::MissingFixture { .. }));

        let report = spy.report();
        assert_eq!(report.call_count, 1);
        assert_eq!(report.args.len(), 1);
    }

    #[test]
    fn fresh_spy_has_an_empty_report() {
        let spy = Spy::watch_value("noop", |_| Value::Nil);
        assert_eq!(spy.report().call_count, 0);
        assert!(spy.report().args.is_empty());
        assert!(spy.report().returned.is_empty());
    }
}
