//! Tests for favorites persistence
//!
//! Tests the favorites file including:
//! - Save/load round trips through a fresh store
//! - Name canonicalization and idempotent saves
//! - Ordering of new and replaced entries
//! - Deletes that must not touch the file
//! - Degraded reads and failed writes

use crate::{Error, FavoritesStore};
use run_types::Favorite;
use std::fs;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FavoritesStore {
    FavoritesStore::load(&dir.path().join("run.fav"))
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.list().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_save_then_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store
        .save("chrome", r"C:\Program Files\Google\Chrome\Application\chrome.exe")
        .unwrap();

    let reloaded = store_in(&dir);
    assert_eq!(
        reloaded.lookup("chrome"),
        Some(r"C:\Program Files\Google\Chrome\Application\chrome.exe")
    );
}

#[test]
fn test_saving_twice_keeps_one_entry() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.save("code", r"C:\Tools\code.exe").unwrap();
    store.save("code", r"C:\Tools\code.exe").unwrap();

    assert_eq!(store.list().len(), 1);
    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, "code C:\\Tools\\code.exe\n");
}

#[test]
fn test_wildcard_names_canonicalize_to_one_key() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    let first = store.save("fire*fox", r"C:\Mozilla\firefox.exe").unwrap();
    let second = store.save("%firefox%", r"D:\Mozilla\firefox.exe").unwrap();

    assert_eq!(first, "firefox");
    assert_eq!(second, "firefox");
    assert_eq!(
        store.list(),
        &[Favorite::new("firefox", r"D:\Mozilla\firefox.exe")]
    );
}

#[test]
fn test_new_entries_go_first_and_replacements_stay_in_place() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    store.save("alpha", r"C:\a.exe").unwrap();
    store.save("beta", r"C:\b.exe").unwrap();
    store.save("ALPHA", r"C:\a2.exe").unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content, "beta C:\\b.exe\nalpha C:\\a2.exe\n");
}

#[test]
fn test_delete_missing_favorite_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.fav");
    let original = "chrome C:\\Apps\\chrome.exe\nstray-line\n";
    fs::write(&path, original).unwrap();
    let mut store = FavoritesStore::load(&path);

    let removed = store.delete("nosuch").unwrap();

    assert!(removed.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_delete_on_empty_store_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);

    assert!(store.delete("nosuch").unwrap().is_none());
    assert!(!store.path().exists());
}

#[test]
fn test_delete_rewrites_without_entry() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.save("a", r"C:\a.exe").unwrap();
    store.save("b", r"C:\b.exe").unwrap();

    let removed = store.delete("A").unwrap();

    assert_eq!(removed, Some(Favorite::new("a", r"C:\a.exe")));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "b C:\\b.exe\n");
    assert!(store.lookup("a").is_none());
}

#[test]
fn test_load_is_permissive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.fav");
    fs::write(&path, "orphan\r\nnotes C:\\Program Files\\Notes\\notes.exe\r\n").unwrap();

    let store = FavoritesStore::load(&path);

    assert_eq!(store.lookup("orphan"), Some(""));
    assert_eq!(
        store.lookup("NOTES"),
        Some(r"C:\Program Files\Notes\notes.exe")
    );
}

#[test]
fn test_unreadable_file_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let store = FavoritesStore::load(dir.path());

    assert!(store.list().is_empty());
}

#[test]
fn test_failed_write_keeps_memory_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut store = FavoritesStore::new(dir.path().join("missing").join("run.fav"));

    let err = store.save("chrome", r"C:\Apps\chrome.exe").unwrap_err();

    assert!(matches!(err, Error::Persistence { .. }));
    assert!(store.lookup("chrome").is_none());
}
