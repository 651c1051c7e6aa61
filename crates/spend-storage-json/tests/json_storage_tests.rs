use std::fs;

use spend_core::{RecordStore, StoragePort, CUSTOM_CATEGORIES_KEY, RECORDS_KEY};
use spend_domain::{PredefinedCategory, SpendingRecord};
use spend_storage_json::JsonFileStorage;
use tempfile::tempdir;

#[test]
fn missing_key_reads_as_none() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path().join("store")).expect("create storage");
    assert_eq!(storage.read(RECORDS_KEY).expect("read"), None);
    assert!(storage.keys().expect("keys").is_empty());
}

#[test]
fn write_replaces_previous_value_without_leftovers() {
    let dir = tempdir().expect("tempdir");
    let mut storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("create storage");

    storage.write(RECORDS_KEY, "[]").expect("first write");
    storage.write(RECORDS_KEY, "[1]").expect("second write");

    assert_eq!(storage.read(RECORDS_KEY).expect("read").as_deref(), Some("[1]"));
    let files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, vec!["spendingData.json".to_string()]);
}

#[test]
fn record_store_round_trips_through_files() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("data");
    let predefined = vec![PredefinedCategory::new("Food")];

    {
        let storage = JsonFileStorage::new(root.clone()).expect("create storage");
        let (mut store, _) = RecordStore::open(Box::new(storage), &predefined);
        store.add_record("2024-03-15", "Food", 9.99).expect("add");
        store.add_custom_category("Gifts").expect("category");
    }

    let storage = JsonFileStorage::new(root.clone()).expect("reopen storage");
    assert_eq!(
        storage.keys().expect("keys"),
        vec![CUSTOM_CATEGORIES_KEY.to_string(), RECORDS_KEY.to_string()]
    );
    let (store, report) = RecordStore::open(Box::new(storage), &predefined);
    assert_eq!(
        store.records(),
        [SpendingRecord::new("2024-03-15", "Food", 9.99)]
    );
    assert_eq!(report.custom_categories, vec!["Gifts".to_string()]);
}

#[test]
fn corrupt_file_is_recovered_as_empty() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.key_path(RECORDS_KEY), "{{{").expect("seed corrupt file");

    let (store, report) = RecordStore::open(Box::new(storage), &[]);
    assert!(store.records().is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn unwritable_directory_surfaces_error() {
    let dir = tempdir().expect("tempdir");
    let mut storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("create storage");
    // A directory in place of the temp file makes File::create fail.
    fs::create_dir_all(dir.path().join("spendingData.json.tmp")).unwrap();
    assert!(storage.write(RECORDS_KEY, "[]").is_err());
    assert_eq!(storage.read(RECORDS_KEY).expect("read"), None);
}

#[test]
fn unreadable_key_loads_store_empty_with_warning() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path().to_path_buf()).expect("create storage");
    // A directory where the records file should be makes the read fail.
    fs::create_dir_all(storage.key_path(RECORDS_KEY)).unwrap();
    assert!(storage.read(RECORDS_KEY).is_err());

    let (store, report) = RecordStore::open(Box::new(storage), &[]);
    assert!(store.records().is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains(RECORDS_KEY));
}
