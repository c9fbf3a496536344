use settingsbox_settings::persistence::write_entries;
use settingsbox_settings::{SettingValue, Settings, SettingsError, StoredMap, StoredValue};
use std::rc::Rc;

fn scalar_settings() -> Settings {
    let mut settings = Settings::new();
    settings.set("count", 3);
    settings.set("gain", 0.75);
    settings.set("name", "camera");
    settings.set("enabled", false);
    settings.set("origin", [1.0, -2.0, 3.5]);
    settings
}

#[test]
fn test_missing_backing_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::open_or_default(dir.path().join("missing.bin"), [("x", 1)]);
    assert_eq!(settings.get_int("x").unwrap(), 1);
    assert_eq!(settings.settings_path(), Some(dir.path().join("missing.bin").as_path()));
}

#[test]
fn test_corrupt_backing_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");
    std::fs::write(&path, b"\xff\xff\xff\xff not settings").unwrap();

    let settings = Settings::open_or_default(&path, [("x", 1)]);
    assert_eq!(settings.get_int("x").unwrap(), 1);
    assert_eq!(settings.len(), 1);
}

#[test]
fn test_strict_open_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");
    std::fs::write(&path, b"garbage").unwrap();

    let err = Settings::open(&path, [("x", 1)]).unwrap_err();
    assert!(matches!(err, SettingsError::Deserialize { .. }));

    let err = Settings::open(dir.path().join("missing.bin"), [("x", 1)]).unwrap_err();
    assert!(matches!(err, SettingsError::Deserialize { .. }));
}

#[test]
fn test_save_then_open_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    let settings = scalar_settings();
    settings.save_to(&path).unwrap();

    let reopened = Settings::open_or_default(&path, Vec::<(String, SettingValue)>::new());
    assert_eq!(reopened, settings);
}

#[test]
fn test_save_uses_backing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    let mut settings = Settings::open_or_default(&path, [("x", 1)]);
    settings.set("x", 42);
    settings.save().unwrap();

    let reopened = Settings::open(&path, [("x", 0)]).unwrap();
    assert_eq!(reopened.get_int("x").unwrap(), 42);
}

#[test]
fn test_loaded_values_override_defaults_and_new_defaults_fill_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    Settings::with_defaults([("x", 7)]).save_to(&path).unwrap();

    let mut settings = Settings::open_or_default(&path, [("x", 1)]);
    settings.establish_defaults([("added_in_new_release", true)]);
    assert_eq!(settings.get_int("x").unwrap(), 7);
    assert!(settings.get_bool("added_in_new_release").unwrap());
}

#[test]
fn test_load_upconverts_nested_maps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.bin");
    let mut inner = StoredMap::new();
    inner.insert("a".to_string(), StoredValue::Int(1));
    let mut deeper = StoredMap::new();
    deeper.insert("b".to_string(), StoredValue::Bool(true));
    inner.insert("deeper".to_string(), StoredValue::Map(deeper));
    let mut entries = StoredMap::new();
    entries.insert("nested".to_string(), StoredValue::Map(inner));
    write_entries(&path, &entries).unwrap();

    let mut settings = Settings::new();
    settings.load(&path).unwrap();

    let nested = settings.get_nested("nested").unwrap();
    assert_eq!(nested.borrow().get_int("a").unwrap(), 1);
    assert!(nested.borrow().get_nested("deeper").is_ok());
    assert_eq!(settings.lookup("nested.deeper.b").unwrap(), SettingValue::Bool(true));
}

#[test]
fn test_load_replaces_nested_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    let mut on_disk = Settings::new();
    on_disk.set("nested", Settings::with_defaults([("a", 2)]));
    on_disk.save_to(&path).unwrap();

    let mut settings = Settings::new();
    settings.set("nested", Settings::with_defaults([("a", 1), ("keep", 1)]));
    let before = settings.get_nested("nested").unwrap();
    settings.load(&path).unwrap();

    let after = settings.get_nested("nested").unwrap();
    assert!(!Rc::ptr_eq(&before, &after));
    assert!(!after.borrow().contains_key("keep"));
}

#[test]
fn test_reload_preserves_nested_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    let mut on_disk = Settings::new();
    on_disk.set("nested", Settings::with_defaults([("a", 2), ("b", 3)]));
    on_disk.set("plain", "updated");
    on_disk.set("brand_new", 9);
    on_disk.save_to(&path).unwrap();

    let mut settings = Settings::new();
    settings.set("nested", Settings::with_defaults([("a", 1), ("keep", 1)]));
    settings.set("plain", "original");
    let held = settings.get_nested("nested").unwrap();

    settings.reload(&path).unwrap();

    assert!(Rc::ptr_eq(&held, &settings.get_nested("nested").unwrap()));
    assert_eq!(held.borrow().get_int("a").unwrap(), 2);
    assert_eq!(held.borrow().get_int("b").unwrap(), 3);
    assert_eq!(held.borrow().get_int("keep").unwrap(), 1);
    assert_eq!(settings.get_text("plain").unwrap(), "updated");
    assert_eq!(settings.get_int("brand_new").unwrap(), 9);
}

#[test]
fn test_reload_overwrites_nested_with_scalar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.bin");
    Settings::with_defaults([("nested", 5)]).save_to(&path).unwrap();

    let mut settings = Settings::new();
    settings.set("nested", Settings::with_defaults([("a", 1)]));
    settings.reload(&path).unwrap();
    assert_eq!(settings.get_int("nested").unwrap(), 5);
}

#[test]
fn test_reload_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = scalar_settings();
    let err = settings.reload(dir.path().join("absent.bin")).unwrap_err();
    assert!(matches!(err, SettingsError::Deserialize { .. }));
    assert_eq!(settings, scalar_settings());
}
