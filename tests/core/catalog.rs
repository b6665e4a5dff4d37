use codeshelf::core::catalog;
use codeshelf::core::locator::Locator;
use codeshelf::core::platform::Platform;
use codeshelf::core::session::Session;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn mac_storage(home: &Path, editor_dir: &str) -> PathBuf {
    let root = home
        .join("Library")
        .join("Application Support")
        .join(editor_dir)
        .join("User")
        .join("workspaceStorage");
    fs::create_dir_all(&root).unwrap();
    root
}

fn write_entry(root: &Path, id: &str, body: &serde_json::Value) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("workspace.json"), body.to_string()).unwrap();
}

#[test]
fn test_mixed_entries_keep_only_parsable_records() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "a1", &json!({"folder": "file:///Users/x/Projects/Alpha"}));
    write_entry(&root, "b2", &json!({"folder": "file:///Users/x/Projects/beta"}));
    write_entry(&root, "c3", &json!({"workspace": "file:///Users/x/multi.code-workspace"}));

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    let records = session.load_workspaces().unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "beta"]);
    assert_eq!(records[0].id, "a1");
    assert_eq!(records[0].path, "/Users/x/Projects/Alpha");
    assert!(records.iter().all(|r| r.id != "c3"));
}

#[test]
fn test_broken_entries_are_skipped_not_fatal() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "ok", &json!({"folder": "file:///srv/app"}));
    // no workspace.json at all
    fs::create_dir_all(root.join("empty")).unwrap();
    // not JSON
    fs::create_dir_all(root.join("garbage")).unwrap();
    fs::write(root.join("garbage").join("workspace.json"), "{not json").unwrap();
    // JSON but not an object
    write_entry(&root, "array", &json!(["file:///srv/other"]));
    // blank folder value
    write_entry(&root, "blank", &json!({"folder": "   "}));
    // stray file at the root level
    fs::write(root.join("stray.txt"), "hello").unwrap();

    let records = catalog::load_from_root(&root, Platform::MacOs).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "ok");
    assert_eq!(records[0].name, "app");
}

#[test]
fn test_every_folder_reference_key_is_understood() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "k1", &json!({"folder": "file:///w/one"}));
    write_entry(&root, "k2", &json!({"configURIPath": "file:///w/two"}));
    write_entry(&root, "k3", &json!({"configPath": "/w/three"}));
    write_entry(&root, "k4", &json!({"folderUri": "file:///w/four"}));
    // priority: folder wins over the others
    write_entry(
        &root,
        "k5",
        &json!({"folderUri": "file:///w/loser", "folder": "file:///w/five"}),
    );

    let records = catalog::load_from_root(&root, Platform::MacOs).unwrap();
    let mut pairs: Vec<_> = records
        .iter()
        .map(|r| (r.id.as_str(), r.path.as_str()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("k1", "/w/one"),
            ("k2", "/w/two"),
            ("k3", "/w/three"),
            ("k4", "/w/four"),
            ("k5", "/w/five"),
        ]
    );
}

#[test]
fn test_percent_encoded_paths_are_decoded() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "sp", &json!({"folder": "file:///Users/x/My%20Project"}));

    let records = catalog::load_from_root(&root, Platform::MacOs).unwrap();
    assert_eq!(records[0].path, "/Users/x/My Project");
    assert_eq!(records[0].name, "My Project");
}

#[test]
fn test_windows_entries_use_native_paths() {
    let home = tempdir().unwrap();
    let root = home.path().join("storage");
    fs::create_dir_all(&root).unwrap();
    write_entry(&root, "w1", &json!({"folder": "file:///c%3A/Users/x/dev/api"}));

    let records = catalog::load_from_root(&root, Platform::Windows).unwrap();
    assert_eq!(records[0].path, r"c:\Users\x\dev\api");
    assert_eq!(records[0].name, "api");
}

#[test]
fn test_same_path_under_two_ids_is_kept_twice() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "one", &json!({"folder": "file:///srv/app"}));
    write_entry(&root, "two", &json!({"folder": "file:///srv/app"}));

    let records = catalog::load_from_root(&root, Platform::MacOs).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["one", "two"]);
}

#[test]
fn test_first_candidate_wins_and_variants_are_not_merged() {
    let home = tempdir().unwrap();
    let insiders = mac_storage(home.path(), "Code - Insiders");
    write_entry(&insiders, "ins", &json!({"folder": "file:///from/insiders"}));
    let stable = mac_storage(home.path(), "Code");
    write_entry(&stable, "sta", &json!({"folder": "file:///from/stable"}));

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert_eq!(session.storage_root(), Some(stable.as_path()));
    let records = session.load_workspaces().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "sta");
}

#[test]
fn test_missing_storage_root_loads_empty() {
    let home = tempdir().unwrap();
    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert!(session.storage_root().is_none());
    assert!(session.load_workspaces().unwrap().is_empty());
}

#[test]
fn test_unsupported_platform_has_no_candidates() {
    let home = tempdir().unwrap();
    mac_storage(home.path(), "Code");
    let locator = Locator::new(home.path(), Platform::Unsupported);
    assert!(locator.candidate_storage_paths().is_empty());
    let session = Session::new(locator);
    assert!(session.load_workspaces().unwrap().is_empty());
}

#[test]
fn test_find_workspace_reports_unknown_ids() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path(), "Code");
    write_entry(&root, "a1", &json!({"folder": "file:///srv/a"}));

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert_eq!(session.find_workspace("a1").unwrap().name, "a");
    let err = session.find_workspace("zz").unwrap_err();
    assert!(err.to_string().contains("zz"));
}
