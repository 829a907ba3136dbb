use inventory_core::{InventoryStore, Item, JsonFileStore, StoreError, WriteOutcome};
use std::fs;

fn sample_items() -> Vec<Item> {
    vec![
        Item::new("Rice", "Grain", 10.0, 5, "kg"),
        Item::new("Olive Oil", "Pantry", 7.25, 12, "l"),
    ]
}

#[test]
fn write_then_read_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("inventory.json"));
    let items = sample_items();

    store.write(&items).unwrap();

    assert_eq!(store.read(), items);
}

#[test]
fn read_missing_file_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));

    assert!(store.read().is_empty());
}

#[test]
fn read_invalid_json_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);

    assert!(store.read().is_empty());

    fs::write(&path, r#"{"name": "not an array"}"#).unwrap();
    assert!(store.read().is_empty());
}

#[test]
fn read_accepts_documents_from_the_desktop_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(
        &path,
        r#"[
  {
    "name": "Rice",
    "category": "Grain",
    "price": 10,
    "quantity": 5,
    "unit": "kg"
  }
]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    let items = store.read();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Rice");
    assert_eq!(items[0].price, 10.0);
    assert_eq!(items[0].quantity, 5);
}

#[test]
fn write_produces_pretty_printed_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonFileStore::new(&path);
    let items = sample_items();

    store.write(&items).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {\n"));
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = parsed.as_array().expect("document must be a JSON array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[1]["name"], "Olive Oil");
}

#[test]
fn write_overwrites_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("inventory.json"));

    store.write(&sample_items()).unwrap();
    store.write(&[]).unwrap();

    assert!(store.read().is_empty());
}

#[test]
fn ensure_data_file_creates_empty_array_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("inventory.json");
    let store = JsonFileStore::new(&path);

    store.ensure_data_file().unwrap();
    let created: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(created, serde_json::json!([]));

    store.write(&sample_items()).unwrap();
    store.ensure_data_file().unwrap();
    assert_eq!(store.read().len(), 2);
}

#[test]
fn write_into_missing_directory_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("missing").join("inventory.json"));

    let err = store.write(&sample_items()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));

    let outcome = WriteOutcome::from(Err(err));
    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("failed to write"));
}

#[test]
fn failed_write_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonFileStore::new(&path);
    let items = sample_items();
    store.write(&items).unwrap();

    // A directory at the target path makes the final rename fail.
    let blocked = JsonFileStore::new(dir.path());
    assert!(blocked.write(&[]).is_err());

    assert_eq!(store.read(), items);
}

#[test]
fn quantities_above_f64_precision_round_trip_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonFileStore::new(&path);
    let items = vec![Item::new("Bolts", "Hardware", 0.01, 9_007_199_254_740_993, "pcs")];

    store.write(&items).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("9007199254740993"));
    assert_eq!(store.read(), items);

    fs::write(
        &path,
        r#"[{"name":"Bolts","category":"Hardware","price":1,"quantity":"9007199254740993","unit":"pcs"}]"#,
    )
    .unwrap();
    assert_eq!(store.read()[0].quantity, 9_007_199_254_740_993);
}

#[test]
fn write_rejects_non_finite_price_and_keeps_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    let store = JsonFileStore::new(&path);
    store.write(&sample_items()).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut items = sample_items();
    items[1].price = f64::NAN;
    let err = store.write(&items).unwrap_err();
    assert!(matches!(err, StoreError::Unencodable { index: 1, .. }));
    assert!(err.to_string().contains("item 1 cannot be stored"));

    items[1].price = f64::INFINITY;
    assert!(store.write(&items).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn ensure_data_file_persists_ids_for_records_without_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(
        &path,
        r#"[
            {"name":"Rice","category":"Grain","price":10,"quantity":5,"unit":"kg"},
            {"id":null,"name":"Salt","category":"Spice","price":1,"quantity":1,"unit":"kg"},
            {"id":"0b5e7c1e-9a43-4b1f-8f2d-3c7a1d2e4f50","name":"Oil","category":"Pantry","price":7,"quantity":2,"unit":"l"}
        ]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    assert_eq!(store.backfill_missing_ids().unwrap(), 2);
    let first = store.read();
    let second = store.read();
    assert_eq!(first, second);
    assert_eq!(
        first[2].id.to_string(),
        "0b5e7c1e-9a43-4b1f-8f2d-3c7a1d2e4f50"
    );

    store.ensure_data_file().unwrap();
    assert_eq!(store.backfill_missing_ids().unwrap(), 0);
    assert_eq!(store.read(), first);
}

#[test]
fn backfill_leaves_invalid_documents_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);

    assert_eq!(store.backfill_missing_ids().unwrap(), 0);
    store.ensure_data_file().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}
