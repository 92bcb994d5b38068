//! Integration tests for loading brand files from a data directory.

mod fixtures;

use car_catalog::catalog::{self, LoadError, DEFAULT_FILE_PREFIX};
use fixtures::DataDir;

#[test]
fn loads_every_brand_file() {
    let dir = DataDir::new()
        .brand_file("CarToyota.json", r#"[{"id":1,"title":"Corolla"},{"id":2,"title":"Yaris"}]"#)
        .brand_file("CarBMW.json", r#"[{"id":"x5","title":"X5"}]"#);

    let store = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap();
    let snapshot = store.snapshot().unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.records_for("toyota").unwrap().len(), 2);
    assert_eq!(snapshot.records_for("BMW").unwrap().len(), 1);
}

#[test]
fn brand_order_follows_file_names() {
    let dir = DataDir::new()
        .brand_file("CarToyota.json", "[]")
        .brand_file("CarAudi.json", "[]")
        .brand_file("CarKia.json", "[]");

    let store = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap();
    assert_eq!(store.all_brands().unwrap(), vec!["audi", "kia", "toyota"]);
}

#[test]
fn unrelated_files_are_ignored() {
    let dir = DataDir::new()
        .brand_file("CarKia.json", r#"[{"id":1}]"#)
        .brand_file("README.md", "# not data")
        .brand_file("Kia.json", "not even json")
        .brand_file("CarKia.json.bak", "junk")
        .subdir("CarNested.json");

    let store = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap();
    assert_eq!(store.all_brands().unwrap(), vec!["kia"]);
}

#[test]
fn custom_prefix() {
    let dir = DataDir::new()
        .brand_file("AutoFord.json", r#"[{"id":1}]"#)
        .brand_file("CarKia.json", r#"[{"id":1}]"#);

    let store = catalog::load_dir(dir.path(), "Auto").unwrap();
    assert_eq!(store.all_brands().unwrap(), vec!["ford"]);
}

#[test]
fn malformed_file_fails_the_whole_load() {
    let dir = DataDir::new()
        .brand_file("CarAudi.json", r#"[{"id":1}]"#)
        .brand_file("CarKia.json", r#"[{"id":1},"#);

    let err = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().contains("CarKia.json"));
}

#[test]
fn non_array_file_fails() {
    let dir = DataDir::new().brand_file("CarKia.json", r#"{"cars":[]}"#);

    let err = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::NotAnArray { .. }));
}

#[test]
fn bare_prefix_file_has_no_brand() {
    let dir = DataDir::new().brand_file("Car.json", "[]");

    let err = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::EmptyBrand { .. }));
}

#[test]
fn colliding_brand_names_fail() {
    let dir = DataDir::new()
        .brand_file("CarKia.json", "[]")
        .brand_file("Car Kia .json", "[]");

    let err = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateBrand { ref brand, .. } if brand == "kia"));
}

#[test]
fn empty_directory_fails() {
    let dir = DataDir::new();

    let err = catalog::load_dir(dir.path(), DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::NoSources { .. }));
}

#[test]
fn missing_directory_fails() {
    let dir = DataDir::new();
    let missing = dir.path().join("nope");

    let err = catalog::load_dir(&missing, DEFAULT_FILE_PREFIX).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
