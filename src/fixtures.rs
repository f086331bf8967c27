//! The fixture registry: a read-only map from fixture name to value, built once
//! per run and shared by every suite.
//!
//! Fixtures come from two sources that merge into one map: files discovered
//! under the fixture root (`*.fixtures.json`, `*.fixtures.yaml`, `*.fixtures.yml`)
//! and programmatic inserts. Files merge in sorted path order, and a
//! later-loaded fixture overwrites an earlier one with the same name.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use im::HashMap;

use crate::discovery::FixtureDiscoverer;
use crate::errors::HarnessError;
use crate::manifest::FixtureManifest;
use crate::value::Value;

/// Process-wide mapping from fixture name to fixture value. Read-only during
/// suite execution.
#[derive(Debug, Clone, Default)]
pub struct FixtureMap {
    entries: HashMap<String, Value>,
}

impl FixtureMap {
    pub fn new() -> Self {
        FixtureMap::default()
    }

    /// Discovers and merges every fixture file under `root`.
    ///
    /// Files merge in sorted path order so collisions resolve deterministically:
    /// the lexicographically last file wins.
    pub fn load_dir<P: AsRef<Path>>(root: P) -> Result<Self, HarnessError> {
        let files = FixtureDiscoverer::discover_fixture_files(root)?;
        let mut map = FixtureMap::new();
        for path in &files {
            map.merge(FixtureMap::load_file(path)?);
        }
        Ok(map)
    }

    /// Loads a single fixture file. The file must parse to a top-level mapping
    /// of names to values.
    pub fn load_file(path: &Path) -> Result<Self, HarnessError> {
        let source = fs::read_to_string(path).map_err(|source| HarnessError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        let parsed: Value = if is_yaml {
            serde_yaml::from_str(&source).map_err(|e| HarnessError::FixtureParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_json::from_str(&source).map_err(|e| HarnessError::FixtureParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        match parsed {
            Value::Map(entries) => Ok(FixtureMap { entries }),
            _ => Err(HarnessError::FixtureShape {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Inserts one fixture, overwriting any existing value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Merges another map into this one; `other`'s entries win on collision.
    pub fn merge(&mut self, other: FixtureMap) {
        for (name, value) in other.entries {
            self.entries.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole registry as a single Map value, for the fixture provider's
    /// final argument.
    pub fn as_value(&self) -> Value {
        Value::Map(self.entries.clone())
    }

    /// Maps a manifest's keys through the registry in declaration order.
    ///
    /// Lookup is strict: the first missing name fails with
    /// [`HarnessError::MissingFixture`] naming that key. There is no defaulting.
    pub fn resolve_args(&self, manifest: &FixtureManifest) -> Result<Vec<Value>, HarnessError> {
        manifest
            .iter()
            .map(|name| {
                self.entries
                    .get(name)
                    .cloned()
                    .ok_or_else(|| HarnessError::missing_fixture(name))
            })
            .collect()
    }

    /// Wraps `f` so callers supply its leading arguments positionally while the
    /// final declared parameter is always bound to the entire fixture map.
    ///
    /// The first `N-1` manifest slots fill from the caller's arguments, with
    /// `Value::Nil` standing in for any the caller omits; the map itself is
    /// appended last. This gives helper functions that are not tests ad hoc
    /// access to every fixture.
    pub fn provider<F, R>(
        fixtures: Rc<FixtureMap>,
        manifest: FixtureManifest,
        f: F,
    ) -> impl Fn(&[Value]) -> R
    where
        F: Fn(&[Value]) -> R,
    {
        move |caller_args: &[Value]| {
            let positional = manifest.len().saturating_sub(1);
            let mut bound: Vec<Value> = Vec::with_capacity(positional + 1);
            for i in 0..positional {
                bound.push(caller_args.get(i).cloned().unwrap_or(Value::Nil));
            }
            bound.push(fixtures.as_value());
            f(&bound)
        }
    }
}

impl FromIterator<(String, Value)> for FixtureMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        FixtureMap {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> FixtureMap {
        let mut map = FixtureMap::new();
        map.insert("a", Value::Number(1.0));
        map.insert("b", Value::Number(2.0));
        map
    }

    #[test]
    fn resolves_manifest_keys_in_order() {
        let map = sample_map();
        let args = map
            .resolve_args(&FixtureManifest::new(["a", "b"]))
            .expect("both fixtures present");
        assert_eq!(args, vec![Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn missing_fixture_error_names_the_key() {
        let mut map = sample_map();
        map.insert("a", Value::Number(1.0));
        let err = map
            .resolve_args(&FixtureManifest::new(["a", "missing"]))
            .unwrap_err();
        match err {
            HarnessError::MissingFixture { name } => assert_eq!(name, "missing"),
            other => panic!("expected MissingFixture, got {other:?}"),
        }
    }

    #[test]
    fn later_inserts_overwrite_earlier_ones() {
        let mut map = sample_map();
        map.insert("a", Value::from("overwritten"));
        assert_eq!(map.get("a"), Some(&Value::from("overwritten")));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn merge_is_last_wins() {
        let mut base = sample_map();
        let mut incoming = FixtureMap::new();
        incoming.insert("b", Value::from("new"));
        incoming.insert("c", Value::from("extra"));
        base.merge(incoming);
        assert_eq!(base.get("b"), Some(&Value::from("new")));
        assert_eq!(base.get("c"), Some(&Value::from("extra")));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn provider_fills_positionally_and_appends_the_map() {
        let fixtures = Rc::new(sample_map());
        let seen: Rc<std::cell::RefCell<Vec<Value>>> = Rc::default();
        let seen_inner = Rc::clone(&seen);
        let helper = FixtureMap::provider(
            Rc::clone(&fixtures),
            FixtureManifest::new(["x", "y", "fixtures"]),
            move |args: &[Value]| {
                *seen_inner.borrow_mut() = args.to_vec();
            },
        );

        helper(&[Value::from("only-one")]);

        let bound = seen.borrow();
        assert_eq!(bound.len(), 3);
        assert_eq!(bound[0], Value::from("only-one"));
        assert_eq!(bound[1], Value::Nil);
        assert_eq!(bound[2], fixtures.as_value());
    }
}
