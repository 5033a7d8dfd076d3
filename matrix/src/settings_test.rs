#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use super::*;

fn recorder(store: &mut SettingsStore) -> (SubscriptionId, Arc<Mutex<Vec<SettingsChange>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = store.subscribe(move |change, _| sink.lock().unwrap().push(*change));
    (id, seen)
}

#[test]
fn defaults_use_marker_size_twenty_five() {
    let s = Settings::default();
    assert_eq!(s.marker_radius, 25.0);
    assert_eq!(s.marker_font_size, 25.0);
    assert_eq!(s.axis_label_font_size, 25.0);
    assert!(s.show_mid_axis);
}

#[test]
fn apply_updates_present_fields_only() {
    let mut store = SettingsStore::default();
    store
        .apply(SettingsPatch { marker_radius: Some(40.0), ..Default::default() })
        .unwrap();
    let s = store.current();
    assert_eq!(s.marker_radius, 40.0);
    assert_eq!(s.marker_font_size, 25.0);
}

#[test]
fn observers_receive_each_change() {
    let mut store = SettingsStore::default();
    let (_, seen) = recorder(&mut store);
    store
        .apply(SettingsPatch { marker_radius: Some(30.0), show_mid_axis: Some(false), ..Default::default() })
        .unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![SettingsChange::MarkerRadius(30.0), SettingsChange::ShowMidAxis(false)]
    );
}

#[test]
fn observer_sees_new_value_in_place() {
    let mut store = SettingsStore::default();
    let radius = Arc::new(Mutex::new(0.0));
    let sink = Arc::clone(&radius);
    store.subscribe(move |_, settings| *sink.lock().unwrap() = settings.marker_radius);
    store
        .apply(SettingsPatch { marker_radius: Some(12.0), ..Default::default() })
        .unwrap();
    assert_eq!(*radius.lock().unwrap(), 12.0);
}

#[test]
fn unchanged_values_do_not_notify() {
    let mut store = SettingsStore::default();
    let (_, seen) = recorder(&mut store);
    let changes = store
        .apply(SettingsPatch { marker_radius: Some(25.0), ..Default::default() })
        .unwrap();
    assert!(changes.is_empty());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn unsubscribe_stops_notifications() {
    let mut store = SettingsStore::default();
    let (id, seen) = recorder(&mut store);
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store
        .apply(SettingsPatch { marker_font_size: Some(18.0), ..Default::default() })
        .unwrap();
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(store.observer_count(), 0);
}

#[test]
fn non_positive_size_is_rejected_without_partial_apply() {
    let mut store = SettingsStore::default();
    let err = store
        .apply(SettingsPatch { marker_font_size: Some(30.0), marker_radius: Some(0.0), ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
    assert_eq!(store.current(), Settings::default());
}

#[test]
fn nan_size_is_rejected() {
    let mut store = SettingsStore::default();
    let err = store
        .apply(SettingsPatch { axis_label_font_size: Some(f64::NAN), ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, BoardError::Validation(_)));
}

#[test]
fn patch_deserializes_sparse_json() {
    let patch: SettingsPatch = serde_json::from_str(r#"{"show_mid_axis": false}"#).unwrap();
    assert_eq!(patch.show_mid_axis, Some(false));
    assert!(patch.marker_radius.is_none());
}
