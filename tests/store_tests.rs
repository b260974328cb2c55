//! Integration tests for the file-backed token store.

use std::fs;

use jobline_client::auth::{AuthTokens, FileTokenStore, TokenStore, TokenStoreConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn temp_store() -> (TempDir, FileTokenStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = FileTokenStore::new(TokenStoreConfig::new(dir.path().to_path_buf()));
    (dir, store)
}

#[test]
fn round_trip_preserves_both_fields() {
    let (_dir, store) = temp_store();
    let original = AuthTokens::new("acc-123", "ref-456");

    store.save(&original).expect("save should succeed");
    let loaded = store
        .load()
        .expect("load should succeed")
        .expect("tokens should exist");

    assert_eq!(loaded, original);
}

#[test]
fn persisted_record_uses_wire_field_names() {
    let (dir, store) = temp_store();
    store.save(&AuthTokens::new("acc", "ref")).unwrap();

    let raw = fs::read_to_string(dir.path().join("tokens.json")).unwrap();
    assert!(raw.contains("\"accessToken\""));
    assert!(raw.contains("\"refreshToken\""));
}

#[test]
fn load_missing_returns_none() {
    let (_dir, store) = temp_store();
    assert!(store.load().expect("load should succeed").is_none());
}

#[test]
fn clear_then_load_returns_none() {
    let (_dir, store) = temp_store();
    store.save(&AuthTokens::new("a", "r")).unwrap();
    assert!(store.load().unwrap().is_some());

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn clear_missing_is_noop() {
    let (_dir, store) = temp_store();
    store.clear().expect("clearing an empty store succeeds");
}

#[test]
fn malformed_file_is_treated_as_absent() {
    let (dir, store) = temp_store();
    fs::write(dir.path().join("tokens.json"), "{\"accessToken\": 12}").unwrap();
    assert!(store.load().expect("no error for malformed data").is_none());
}

#[test]
fn save_overwrites_previous_record_wholesale() {
    let (_dir, store) = temp_store();
    store.save(&AuthTokens::new("first", "ref-a")).unwrap();
    store.save(&AuthTokens::new("second", "ref-b")).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded, AuthTokens::new("second", "ref-b"));
}

#[cfg(unix)]
#[test]
fn saved_record_is_owner_readable_only() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, store) = temp_store();
    store.save(&AuthTokens::new("a", "r")).unwrap();

    let mode = fs::metadata(dir.path().join("tokens.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}
