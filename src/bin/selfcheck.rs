// Runs the harness's own example suites through the full CLI path: fixture
// discovery, filtering, execution, reporting, exit-code signaling.
// Usage: cargo run --bin selfcheck [suite...] [--only-result-logs] [...]

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use attest::cli;
use attest::prelude::*;

fn main() -> ExitCode {
    cli::run(|harness| {
        register_fixtures(harness);
        register_assert_suite(harness);
        register_spy_suite(harness);
        register_hooks_suite(harness);
        register_ledger_suite(harness);
    })
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

fn register_fixtures(harness: &mut Harness) {
    harness.add_fixture("left", Value::from(3.0));
    harness.add_fixture("right", Value::from(4.0));
    harness.add_fixture("greeting", Value::from("hello"));
    harness.add_fixture(
        "config",
        map(&[("retries", Value::from(3.0)), ("verbose", Value::from(false))]),
    );
    harness.add_fixture(
        "samples",
        Value::List(vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]),
    );
}

fn register_assert_suite(harness: &mut Harness) {
    harness.suite("assert.test", "assertion engine", |t| {
        t.test("adds injected fixture values", ["left", "right"], |args, assert| {
            let sum = args[0].as_number().unwrap_or(0.0) + args[1].as_number().unwrap_or(0.0);
            assert.equal(&Value::from(sum), &Value::from(7.0));
            Ok(())
        })?;

        t.test("maps compare key-order insensitively", ["config"], |args, assert| {
            let reordered = map(&[("verbose", Value::from(false)), ("retries", Value::from(3.0))]);
            assert.equal(&args[0], &reordered);
            assert.has_keys(&args[0], &["retries", "verbose"]);
            Ok(())
        })?;

        t.test("greeting fixture is present", ["greeting"], |args, assert| {
            assert.is_defined(args.first());
            assert.not_equal(&args[0], &Value::from("goodbye"));
            Ok(())
        })?;

        Ok(())
    });
}

fn register_spy_suite(harness: &mut Harness) {
    harness.suite("spy.test", "spy recorder", |t| {
        t.test("records every call in order", FixtureManifest::empty(), |_args, assert| {
            let mut spy = Spy::watch_value("double", |args| {
                Value::from(args[0].as_number().unwrap_or(0.0) * 2.0)
            });
            for n in [1.0, 2.0, 3.0] {
                spy.call(&[Value::from(n)])?;
            }
            let report = spy.report();
            assert.equal(&Value::from(report.call_count as f64), &Value::from(3.0));
            assert.equal(&report.returned[2].1, &Value::from(6.0));
            assert.equal(&report.args[0].1[0], &Value::from(1.0));
            Ok(())
        })?;

        t.test("passes return values through unchanged", ["samples"], |args, assert| {
            let mut spy = Spy::watch_value("identity", |args| args[0].clone());
            let returned = spy.call(&[args[0].clone()])?;
            assert.equal(&returned, &args[0]);
            Ok(())
        })?;

        let mut head = t.spy("head", |args| {
            args.first()
                .and_then(|list| list.as_list())
                .and_then(|items| items.first())
                .cloned()
                .ok_or_else(|| HarnessError::missing_fixture("samples"))
        });
        t.test("fallible targets surface their errors", ["samples"], move |args, assert| {
            let first = head.call(&[args[0].clone()])?;
            assert.equal(&first, &Value::from(1.0));
            assert.equal(&Value::from(head.report().call_count as f64), &Value::from(1.0));
            Ok(())
        })?;

        Ok(())
    });
}

fn register_hooks_suite(harness: &mut Harness) {
    harness.suite("hooks.test", "before-each hooks and fixture provider", |t| {
        let hook_runs = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&hook_runs);
        t.before_each(["samples"], move |args, _assert| {
            if args[0].as_list().is_some() {
                counter.set(counter.get() + 1);
            }
            Ok(())
        });

        let seen_once = Rc::clone(&hook_runs);
        t.test("hook replays before the first test", FixtureManifest::empty(), move |_args, assert| {
            assert.equal(&Value::from(seen_once.get() as f64), &Value::from(1.0));
            Ok(())
        })?;

        let seen_twice = Rc::clone(&hook_runs);
        t.test("and again before the second", FixtureManifest::empty(), move |_args, assert| {
            assert.equal(&Value::from(seen_twice.get() as f64), &Value::from(2.0));
            Ok(())
        })?;

        let helper = t.provider(["label", "fixtures"], |args: &[Value]| {
            args[1]
                .as_map()
                .and_then(|fixtures| fixtures.get("greeting"))
                .cloned()
                .unwrap_or(Value::Nil)
        });
        t.test("provider binds the whole fixture map last", FixtureManifest::empty(), move |_args, assert| {
            assert.equal(&helper(&[Value::from("tag")]), &Value::from("hello"));
            Ok(())
        })?;

        Ok(())
    });
}

// Depends on demos/*.fixtures.* being discovered; run from the repository root
// (or point --fixture-root at the demos directory).
fn register_ledger_suite(harness: &mut Harness) {
    harness.suite("ledger.test", "file-discovered fixtures", |t| {
        t.test("later fixture files win on collision", ["chain_height"], |args, assert| {
            assert.equal(&args[0], &Value::from(42.0));
            Ok(())
        })?;

        t.test("non-colliding names survive the merge", ["network"], |args, assert| {
            assert.equal(&args[0], &Value::from("devnet"));
            Ok(())
        })?;

        Ok(())
    });
}
