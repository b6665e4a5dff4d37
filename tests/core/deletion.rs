use codeshelf::core::deletion::{self, DeleteOutcome};
use codeshelf::core::error::ShelfError;
use codeshelf::core::locator::Locator;
use codeshelf::core::platform::Platform;
use codeshelf::core::session::Session;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn mac_storage(home: &Path) -> PathBuf {
    let root = home
        .join("Library")
        .join("Application Support")
        .join("Code")
        .join("User")
        .join("workspaceStorage");
    fs::create_dir_all(&root).unwrap();
    root
}

fn write_entry(root: &Path, id: &str, folder: &str) {
    let dir = root.join(id);
    fs::create_dir_all(dir.join("state")).unwrap();
    fs::write(
        dir.join("workspace.json"),
        serde_json::json!({ "folder": folder }).to_string(),
    )
    .unwrap();
    fs::write(dir.join("state").join("state.vscdb"), b"sqlite bytes").unwrap();
}

fn snapshot(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_delete_then_list_no_longer_shows_entry() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path());
    write_entry(&root, "a1", "file:///Users/x/Projects/Alpha");
    write_entry(&root, "b2", "file:///Users/x/Projects/beta");

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert_eq!(session.load_workspaces().unwrap().len(), 2);

    assert_eq!(session.delete_workspace("a1").unwrap(), DeleteOutcome::Removed);
    assert!(!root.join("a1").exists());
    assert!(root.join("b2").exists());

    let fresh = Session::new(Locator::new(home.path(), Platform::MacOs));
    let ids: Vec<_> = fresh
        .load_workspaces()
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["b2".to_string()]);
}

#[test]
fn test_delete_is_idempotent() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path());
    write_entry(&root, "a1", "file:///srv/a");

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert_eq!(session.delete_workspace("a1").unwrap(), DeleteOutcome::Removed);
    assert_eq!(
        session.delete_workspace("a1").unwrap(),
        DeleteOutcome::AlreadyAbsent
    );
    assert_eq!(
        session.delete_workspace("never-existed").unwrap(),
        DeleteOutcome::AlreadyAbsent
    );
}

#[test]
fn test_unparsable_entry_can_still_be_deleted() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path());
    fs::create_dir_all(root.join("broken")).unwrap();
    fs::write(root.join("broken").join("workspace.json"), "{nope").unwrap();

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert!(session.load_workspaces().unwrap().is_empty());
    assert_eq!(
        session.delete_workspace("broken").unwrap(),
        DeleteOutcome::Removed
    );
    assert!(!root.join("broken").exists());
}

#[test]
fn test_traversal_ids_are_rejected_without_touching_disk() {
    let home = tempdir().unwrap();
    let root = mac_storage(home.path());
    write_entry(&root, "a1", "file:///srv/a");
    // A sibling the traversal would reach.
    let outside = root.parent().unwrap().join("etc");
    fs::create_dir_all(&outside).unwrap();

    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    let before = snapshot(&root);
    for bad in ["../etc", "..", "a1/../../etc", "a1\\..", "/etc", "C:", "a1 ", ""] {
        match session.delete_workspace(bad) {
            Err(ShelfError::InvalidIdentity(id)) => assert_eq!(id, bad),
            other => panic!("{:?} should be rejected, got {:?}", bad, other),
        }
    }
    assert_eq!(snapshot(&root), before);
    assert!(outside.exists());
}

#[test]
fn test_missing_storage_root_is_reported() {
    let home = tempdir().unwrap();
    let session = Session::new(Locator::new(home.path(), Platform::MacOs));
    assert!(matches!(
        session.delete_workspace("a1"),
        Err(ShelfError::StorageNotFound)
    ));
}

#[test]
fn test_containment_is_lexical() {
    let root = Path::new("/data/workspaceStorage");
    assert_eq!(
        deletion::ensure_contained(root, &root.join("abc")).unwrap(),
        PathBuf::from("abc")
    );
    assert!(deletion::ensure_contained(root, root).is_err());
    assert!(deletion::ensure_contained(root, Path::new("/data/workspaceStorage/../x")).is_err());
    assert!(deletion::ensure_contained(root, Path::new("/data/other/abc")).is_err());
    assert!(deletion::ensure_contained(root, Path::new("/data/workspaceStorageX/abc")).is_err());
}

#[test]
fn test_fallback_commands_quote_the_path() {
    let target = Path::new("/tmp/a \"b\"");
    assert_eq!(
        deletion::fallback_command(Platform::MacOs, target).unwrap(),
        r#"rm -rf -- '/tmp/a "b"'"#
    );
    assert_eq!(
        deletion::fallback_command(Platform::Windows, Path::new(r"C:\s\abc")).unwrap(),
        r#"rd /s /q "C:\s\abc""#
    );
    assert!(deletion::fallback_command(Platform::Unsupported, target).is_none());
}
