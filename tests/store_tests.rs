use clinicfile::StoreError;
use clinicfile::storage::{CorruptPolicy, JsonStore};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

#[test]
fn round_trip_preserves_value() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("value.json");
    let store = JsonStore::new();

    let value = json!({
        "nested": { "list": [1, 2, 3], "flag": true },
        "text": "héllo wörld",
        "none": null,
    });
    store.write_atomic(&path, &value).expect("write");

    let read: Value = store.read_or_default(&path, Value::Null).expect("read");
    assert_eq!(read, value);
}

#[test]
fn written_file_is_complete_valid_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("doc.json");
    let store = JsonStore::new();

    store
        .write_atomic(&path, &json!([{"k": "v"}]))
        .expect("write");

    let raw = fs::read_to_string(&path).expect("read raw file");
    let parsed: Value = serde_json::from_str(&raw).expect("file must hold valid JSON");
    assert_eq!(parsed, json!([{"k": "v"}]));
}

#[test]
fn missing_file_returns_default() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.json");
    let store = JsonStore::new();

    let read: Vec<Value> = store
        .read_or_default(&path, vec![json!("fallback")])
        .expect("read");
    assert_eq!(read, vec![json!("fallback")]);
}

#[test]
fn corrupt_file_returns_default_under_lenient_policy() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, b"{not json at all").expect("seed corrupt file");

    let store = JsonStore::new();
    let read: Value = store.read_or_default(&path, json!([])).expect("read");
    assert_eq!(read, json!([]));
}

#[test]
fn corrupt_file_errors_under_strict_policy() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, b"[1, 2,").expect("seed corrupt file");

    let store = JsonStore::with_corrupt_policy(CorruptPolicy::Fail);
    let err = store
        .read_or_default::<Value>(&path, Value::Null)
        .expect_err("corrupt file must fail under strict policy");
    assert!(matches!(err, StoreError::Corrupt(_, _)), "got: {err:?}");
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("a").join("b").join("deep.json");
    let store = JsonStore::new();

    store.write_atomic(&path, &json!({"ok": true})).expect("write");
    let read: Value = store.read_or_default(&path, Value::Null).expect("read");
    assert_eq!(read, json!({"ok": true}));
}

#[test]
fn write_leaves_no_temp_files_behind() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("data.json");
    let store = JsonStore::new();

    store.write_atomic(&path, &json!([1, 2, 3])).expect("write");
    store.write_atomic(&path, &json!([4, 5, 6])).expect("rewrite");

    let entries: Vec<String> = fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["data.json".to_string()]);
}

#[test]
fn rewrite_replaces_previous_content() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("data.json");
    let store = JsonStore::new();

    store.write_atomic(&path, &json!({"version": 1})).expect("first write");
    store.write_atomic(&path, &json!({"version": 2})).expect("second write");

    let read: Value = store.read_or_default(&path, Value::Null).expect("read");
    assert_eq!(read, json!({"version": 2}));
}
