use codeshelf::core::store::Store;
use codeshelf::plugins::prefs::{
    FAVORITES_KEY, KeyValueStore, LAST_OPENED_KEY, MemoryStore, Preferences, SqliteStore,
    TAGS_KEY, WorkspaceMetadata,
};
use codeshelf::plugins::sort::SortMode;
use tempfile::tempdir;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_preferences_persist_across_connections() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path().join("data"));
    store.ensure().unwrap();
    let db = store.prefs_db_path();

    {
        let prefs = Preferences::new(SqliteStore::open(&db).unwrap());
        assert!(prefs.toggle_favorite("a1").unwrap());
        prefs.record_last_opened("a1", 1_700_000_000_000).unwrap();
        prefs.set_tags("a1", &tags(&["work", "rust"])).unwrap();
        prefs.set_sort_mode(SortMode::FavoritesFirst).unwrap();
    }

    let prefs = Preferences::new(SqliteStore::open(&db).unwrap());
    assert_eq!(
        prefs.metadata("a1").unwrap(),
        WorkspaceMetadata {
            is_favorite: true,
            last_opened: Some(1_700_000_000_000),
            tags: tags(&["work", "rust"]),
        }
    );
    assert_eq!(prefs.sort_mode().unwrap(), SortMode::FavoritesFirst);
}

#[test]
fn test_toggle_twice_restores_state() {
    let prefs = Preferences::new(MemoryStore::new());
    assert!(!prefs.is_favorite("x").unwrap());
    assert!(prefs.toggle_favorite("x").unwrap());
    assert!(prefs.is_favorite("x").unwrap());
    assert!(!prefs.toggle_favorite("x").unwrap());
    assert!(!prefs.is_favorite("x").unwrap());
    assert!(prefs.favorites().unwrap().is_empty());
}

#[test]
fn test_values_are_stored_as_json() {
    let prefs = Preferences::new(MemoryStore::new());
    prefs.toggle_favorite("b").unwrap();
    prefs.toggle_favorite("a").unwrap();
    prefs.record_last_opened("a", 5).unwrap();
    prefs.set_tags("a", &tags(&["t"])).unwrap();

    let store = prefs.store();
    assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["a","b"]"#));
    assert_eq!(store.get(LAST_OPENED_KEY).unwrap().as_deref(), Some(r#"{"a":5}"#));
    assert_eq!(store.get(TAGS_KEY).unwrap().as_deref(), Some(r#"{"a":["t"]}"#));
}

#[test]
fn test_empty_tag_list_removes_entry() {
    let prefs = Preferences::new(MemoryStore::new());
    prefs.set_tags("a", &tags(&["one"])).unwrap();
    assert_eq!(prefs.tags_map().unwrap().len(), 1);

    assert!(prefs.set_tags("a", &tags(&["  ", ""])).unwrap().is_empty());
    assert!(prefs.tags_map().unwrap().is_empty());
    assert!(prefs.tags("a").unwrap().is_empty());
}

#[test]
fn test_touch_last_opened_uses_current_time() {
    let prefs = Preferences::new(MemoryStore::new());
    assert_eq!(prefs.last_opened("a").unwrap(), None);
    let stamped = prefs.touch_last_opened("a").unwrap();
    assert!(stamped > 1_600_000_000_000);
    assert_eq!(prefs.last_opened("a").unwrap(), Some(stamped));
}

#[test]
fn test_metadata_for_covers_every_requested_id() {
    let prefs = Preferences::new(SqliteStore::in_memory().unwrap());
    prefs.toggle_favorite("a").unwrap();
    prefs.set_tags("b", &tags(&["x"])).unwrap();
    // preference for an id that is no longer in the history
    prefs.toggle_favorite("gone").unwrap();

    let all = prefs.metadata_for(["a", "b", "c"]).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all["a"].is_favorite);
    assert_eq!(all["b"].tags, tags(&["x"]));
    assert_eq!(all["c"], WorkspaceMetadata::default());
    assert!(!all.contains_key("gone"));
}

#[test]
fn test_sort_mode_defaults_and_overwrites() {
    let prefs = Preferences::new(SqliteStore::in_memory().unwrap());
    assert_eq!(prefs.stored_sort_mode().unwrap(), None);
    assert_eq!(prefs.sort_mode().unwrap(), SortMode::Alphabetical);
    prefs.set_sort_mode(SortMode::RecentlyOpened).unwrap();
    prefs.set_sort_mode(SortMode::ProjectType).unwrap();
    assert_eq!(prefs.sort_mode().unwrap(), SortMode::ProjectType);
}
