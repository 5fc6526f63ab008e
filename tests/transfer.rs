use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use turkeybowl_terminal::seed::default_data;
use turkeybowl_terminal::store::{DataKind, Store};
use turkeybowl_terminal::transfer::{self, Bundle};

#[test]
fn export_into_directory_uses_dated_name() {
    let dir = tempfile::tempdir().unwrap();
    let data = default_data();
    let written = transfer::export_to(dir.path(), &data).unwrap();

    let name = written.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("turkeybowl-data-"));
    assert!(name.ends_with(".json"));

    let mut restored = default_data();
    restored.players.clear();
    transfer::import_from(&written, &mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn default_name_format() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 27).unwrap();
    assert_eq!(transfer::default_export_name(date), "turkeybowl-data-2025-11-27.json");
}

#[test]
fn bundle_uses_camel_case_keys() {
    let at = Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap();
    let json = transfer::export_json(&default_data(), at).unwrap();
    assert!(json.contains("\"exportDate\": \"2025-11-01T12:00:00.000Z\""));
    assert!(json.contains("\"captainId\""));
    assert!(json.contains("\"adminPassword\""));
}

#[test]
fn partial_bundle_only_touches_present_parts() {
    let mut data = default_data();
    let raw = r#"{"settings":{"eventDate":"2026-11-26T10:00","eventLocation":"Gym","registrationDeadline":"2026-11-19T23:59","currentYear":2026,"adminPassword":"pie"}}"#;

    let kinds = transfer::import_str(raw, &mut data).unwrap();
    assert_eq!(kinds, vec![DataKind::Settings]);
    assert_eq!(data.settings.current_year, 2026);
    assert_eq!(data.players, default_data().players);
}

#[test]
fn invalid_json_changes_nothing() {
    let mut data = default_data();
    let err = transfer::import_str("{\"players\": [oops", &mut data).unwrap_err();
    assert!(err.to_string().contains("invalid JSON bundle"));
    assert_eq!(data, default_data());

    let bad_player = r#"{"players":[{"id":1}],"settings":null}"#;
    assert!(transfer::import_str(bad_player, &mut data).is_err());
    assert_eq!(data, default_data());
}

#[test]
fn empty_bundle_is_a_no_op() {
    let mut data = default_data();
    let kinds = Bundle::default().apply(&mut data);
    assert!(kinds.is_empty());
    assert_eq!(data, default_data());
}

#[test]
fn imported_data_survives_a_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    let bundle_path = dir.path().join("in.json");

    let mut source = default_data();
    source.teams.truncate(1);
    source.settings.event_location = "North Field".to_string();
    fs::write(&bundle_path, transfer::export_json(&source, Utc::now()).unwrap()).unwrap();

    let mut data = store.load_data();
    for kind in transfer::import_from(&bundle_path, &mut data).unwrap() {
        store.save_kind(&data, kind).unwrap();
    }

    let reloaded = store.load_data();
    assert_eq!(reloaded.teams.len(), 1);
    assert_eq!(reloaded.settings.event_location, "North Field");

    store.reset().unwrap();
    assert_eq!(store.load_data(), default_data());
}
