//! Fixture file discovery and merge semantics, on scratch directories.

use std::fs;

use attest::discovery::FixtureDiscoverer;
use attest::errors::HarnessError;
use attest::fixtures::FixtureMap;
use attest::value::Value;
use tempfile::tempdir;

#[test]
fn discovers_and_merges_json_and_yaml_fixture_files() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("a.fixtures.json"),
        r#"{"a": 1, "shared": "from-json"}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("b.fixtures.yaml"),
        "b: 2\nshared: from-yaml\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested/c.fixtures.yml"), "c: true\n").unwrap();
    // Not fixture files: wrong suffix, wrong extension.
    fs::write(dir.path().join("plain.json"), r#"{"ignored": 1}"#).unwrap();
    fs::write(dir.path().join("notes.fixtures.txt"), "ignored").unwrap();

    let map = FixtureMap::load_dir(dir.path()).expect("loads cleanly");
    assert_eq!(map.get("a"), Some(&Value::Number(1.0)));
    assert_eq!(map.get("b"), Some(&Value::Number(2.0)));
    assert_eq!(map.get("c"), Some(&Value::Bool(true)));
    assert_eq!(map.get("ignored"), None);
    // Sorted merge order: b.fixtures.yaml loads after a.fixtures.json and wins.
    assert_eq!(map.get("shared"), Some(&Value::from("from-yaml")));
}

#[test]
fn skip_list_directories_are_not_descended() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("target")).unwrap();
    fs::write(
        dir.path().join("target/hidden.fixtures.json"),
        r#"{"hidden": 1}"#,
    )
    .unwrap();
    fs::write(dir.path().join("seen.fixtures.json"), r#"{"seen": 1}"#).unwrap();

    let files = FixtureDiscoverer::discover_fixture_files(dir.path()).expect("walk succeeds");
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("seen.fixtures.json"));
}

#[test]
fn non_mapping_fixture_file_is_a_shape_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("bad.fixtures.json"), "[1, 2, 3]").unwrap();

    let err = FixtureMap::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, HarnessError::FixtureShape { .. }));
}

#[test]
fn malformed_fixture_file_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("broken.fixtures.json"), "{not json").unwrap();

    let err = FixtureMap::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, HarnessError::FixtureParse { .. }));
}

#[test]
fn unreadable_fixture_file_is_an_io_error() {
    let err = FixtureMap::load_file(std::path::Path::new("/no/such/file.fixtures.json"))
        .unwrap_err();
    assert!(matches!(err, HarnessError::FixtureIo { .. }));
}

#[test]
fn empty_directory_yields_an_empty_map() {
    let dir = tempdir().expect("tempdir");
    let map = FixtureMap::load_dir(dir.path()).expect("loads cleanly");
    assert!(map.is_empty());
}
