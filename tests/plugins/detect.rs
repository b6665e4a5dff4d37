use codeshelf::plugins::detect::detect_project_type;
use codeshelf::plugins::stats::{self, workspace_stats};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_marker_file_detection() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "Cargo.toml", "[package]\nname = \"x\"\n");
    assert_eq!(detect_project_type(tmp.path()).id, "rust");
}

#[test]
fn test_pubspec_splits_flutter_from_dart() {
    let app = tempdir().unwrap();
    touch(
        app.path(),
        "pubspec.yaml",
        "name: app\ndependencies:\n  flutter:\n    sdk: flutter\n",
    );
    assert_eq!(detect_project_type(app.path()).id, "flutter");

    let lib = tempdir().unwrap();
    touch(lib.path(), "pubspec.yaml", "name: lib\ndependencies:\n  http: ^1.0.0\n");
    assert_eq!(detect_project_type(lib.path()).id, "dart");
}

#[test]
fn test_package_json_dependencies_pick_the_framework() {
    let next = tempdir().unwrap();
    touch(
        next.path(),
        "package.json",
        r#"{"dependencies": {"next": "14.0.0", "react": "18.2.0"}}"#,
    );
    assert_eq!(detect_project_type(next.path()).id, "nextjs");

    let react = tempdir().unwrap();
    touch(
        react.path(),
        "package.json",
        r#"{"devDependencies": {"react": "18.2.0"}}"#,
    );
    assert_eq!(detect_project_type(react.path()).id, "react");

    let plain = tempdir().unwrap();
    touch(plain.path(), "package.json", r#"{"name": "tool"}"#);
    assert_eq!(detect_project_type(plain.path()).id, "nodejs");
}

#[test]
fn test_malformed_package_json_still_counts_as_node() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "package.json", "{oops");
    assert_eq!(detect_project_type(tmp.path()).id, "nodejs");
}

#[test]
fn test_all_markers_must_match() {
    let rails = tempdir().unwrap();
    touch(rails.path(), "Gemfile", "gem 'rails'");
    touch(rails.path(), "config.ru", "run App");
    assert_eq!(detect_project_type(rails.path()).id, "rails");

    let ruby = tempdir().unwrap();
    touch(ruby.path(), "Gemfile", "gem 'sinatra'");
    assert_eq!(detect_project_type(ruby.path()).id, "ruby");
}

#[test]
fn test_file_content_detection_is_case_insensitive() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "requirements.txt", "Flask==3.0\nrequests\n");
    assert_eq!(detect_project_type(tmp.path()).id, "flask");

    let plain = tempdir().unwrap();
    touch(plain.path(), "requirements.txt", "numpy\n");
    assert_eq!(detect_project_type(plain.path()).id, "python");
}

#[test]
fn test_extension_markers() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "Api.csproj", "<Project />");
    assert_eq!(detect_project_type(tmp.path()).id, "csharp");
}

#[test]
fn test_unknown_folder_is_generic() {
    let tmp = tempdir().unwrap();
    touch(tmp.path(), "notes.txt", "hi");
    let generic = detect_project_type(tmp.path());
    assert_eq!(generic.id, "code");
    assert!(generic.icon_url().ends_with("code/code-original.svg"));
}

#[test]
fn test_stats_skip_vendored_dirs_and_respect_depth() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    touch(root, "a.txt", "12345");
    touch(root, "src/b.rs", "123");
    touch(root, "node_modules/pkg/index.js", "ignored ignored");
    touch(root, "build/out.bin", "ignored");
    touch(root, "one/two/three/c.txt", "12");
    touch(root, "one/two/three/four/too_deep.txt", "ignored");

    let stats = workspace_stats(root).unwrap();
    assert_eq!(stats.file_count, 3);
    assert_eq!(stats.size, 10);
    assert!(stats.last_modified > 0);
}

#[test]
fn test_stats_of_missing_folder() {
    assert!(workspace_stats(Path::new("/definitely/not/a/folder")).is_none());
    assert_eq!(stats::format_file_size(2048), "2.0 KB");
}
