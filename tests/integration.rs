//! Integration tests for taskprune

mod harness;

use std::fs;

use harness::{SnapshotFile, TODAY, run_taskprune};

fn export(snapshot: &SnapshotFile, file: &str, extra: &[&str]) -> (String, String, bool) {
    let input = snapshot.path().to_string_lossy().to_string();
    let out = snapshot.dir().join(file).to_string_lossy().to_string();
    let mut args = vec!["-i", input.as_str(), "-o", out.as_str(), "--today", TODAY];
    args.extend_from_slice(extra);
    let (_stdout, stderr, success) = run_taskprune(snapshot.dir(), &args);
    let text = fs::read_to_string(snapshot.dir().join(file)).unwrap_or_default();
    (text, stderr, success)
}

#[test]
fn test_console_tree_by_default() {
    let snapshot = SnapshotFile::sample();
    let input = snapshot.path().to_string_lossy().to_string();
    let (stdout, _stderr, success) = run_taskprune(snapshot.dir(), &["-i", &input]);
    assert!(success, "taskprune should succeed");
    assert!(stdout.starts_with("Home\n└── Garden\n"), "got: {}", stdout);
    assert!(stdout.contains("    ├── Mow lawn  [done 2013-02-10]\n"), "got: {}", stdout);
    assert!(stdout.contains("    └── Plant bulbs\n        ├── Buy bulbs\n"), "got: {}", stdout);
    assert!(stdout.ends_with("\n2 projects, 5 tasks\n"), "got: {}", stdout);
}

#[test]
fn test_folder_include() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "home.tp", &["--fi", "^Home$"]);
    assert!(success);
    assert!(text.starts_with("Home:\n\tGarden:\n"), "got: {}", text);
    assert!(!text.contains("Work"), "Work should be filtered out: {}", text);
}

#[test]
fn test_recent_completion_with_prune() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "recent.tp", &["--tci", "-3d", "--prune"]);
    assert!(success);
    assert_eq!(text, "Home:\n\tGarden:\n\t\t- Mow lawn @2013-02-10-Sun\n");
}

#[test]
fn test_exclude_completed() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "open.md", &["--tce", "."]);
    assert!(success);
    assert!(!text.contains("Mow lawn"), "completed task should be gone: {}", text);
    assert!(text.contains("- Plant bulbs\n    - Buy bulbs\n"), "got: {}", text);
}

#[test]
fn test_context_mode() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "contexts.tp", &["-C"]);
    assert!(success);
    assert_eq!(
        text,
        "Errands:\n\tShops:\n\t\t- Plant bulbs\n\t\t- Buy bulbs\n\t- Mow lawn @2013-02-10-Sun\n\t- Dig bed\nPhone:\n\t- Call accountant\n"
    );
}

#[test]
fn test_context_filter_with_prune() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "phone.tp", &["-C", "--ci", "^Phone$", "--prune"]);
    assert!(success);
    assert_eq!(text, "Phone:\n\t- Call accountant\n");
}

#[test]
fn test_flatten_reverses_lifted_children() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "flat.tp", &["-F"]);
    assert!(success);
    assert_eq!(
        text,
        "Garden:\n\t- Mow lawn @2013-02-10-Sun\n\t- Dig bed\n\t- Buy bulbs\n\t- Plant bulbs\nQuarterly report:\n\t- Call accountant\n"
    );
}

#[test]
fn test_filters_run_in_argv_order() {
    let snapshot = SnapshotFile::sample();

    let (text, _stderr, success) =
        export(&snapshot, "a.tp", &["--fi", "^Home$", "--fe", "^Home$"]);
    assert!(success);
    assert!(text.starts_with("Work:"), "exclude ran last: {}", text);
    assert!(!text.contains("Home"));

    let (text, _stderr, success) =
        export(&snapshot, "b.tp", &["--fe", "^Home$", "--fi", "^Home$"]);
    assert!(success);
    assert!(text.starts_with("Home:"), "include ran last: {}", text);
    assert!(!text.contains("Work"));
}

#[test]
fn test_sort_by_completion() {
    let snapshot = SnapshotFile::new(
        r#"{ "projects": [
            { "type": "project", "name": "P", "children": [
                { "type": "task", "name": "open" },
                { "type": "task", "name": "late", "completed": "2013-02-09T10:00:00" },
                { "type": "task", "name": "early", "completed": "2013-01-05T10:00:00" }
            ]}
        ]}"#,
    );
    let (text, _stderr, success) = export(&snapshot, "sorted.tp", &["--tsc"]);
    assert!(success);
    assert_eq!(
        text,
        "P:\n\t- early @2013-01-05-Sat\n\t- late @2013-02-09-Sat\n\t- open\n"
    );
}

#[test]
fn test_opml_and_html_documents() {
    let snapshot = SnapshotFile::sample();

    let (opml, _stderr, success) = export(&snapshot, "out.opml", &["--title", "Chores"]);
    assert!(success);
    assert!(opml.contains("<title>Chores</title>"));
    assert!(opml.contains("<outline text=\"Quarterly report\">"));

    let (html, _stderr, success) = export(&snapshot, "out.html", &[]);
    assert!(success);
    assert!(html.contains("<title>Tasks</title>"));
    assert!(html.contains("<li><del>Mow lawn</del></li>"));
}

#[test]
fn test_json_output() {
    let snapshot = SnapshotFile::sample();
    let (text, _stderr, success) = export(&snapshot, "out.json", &["--pi", "report", "--prune"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    let roots = value.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["name"], "Work");
}

#[test]
fn test_invalid_pattern_writes_nothing() {
    let snapshot = SnapshotFile::sample();
    let (_text, stderr, success) = export(&snapshot, "bad.tp", &["--ti", "(unclosed"]);
    assert!(!success);
    assert!(stderr.contains("invalid pattern '(unclosed'"), "got: {}", stderr);
    assert!(!snapshot.dir().join("bad.tp").exists());
}

#[test]
fn test_unknown_format() {
    let snapshot = SnapshotFile::sample();
    let (_text, stderr, success) = export(&snapshot, "out.doc", &[]);
    assert!(!success);
    assert!(stderr.contains("unknown output format 'doc'"), "got: {}", stderr);
}

#[test]
fn test_unknown_context_reference() {
    let snapshot = SnapshotFile::new(
        r#"{ "projects": [
            { "type": "project", "name": "P", "children": [
                { "type": "task", "name": "T", "context": "moon" }
            ]}
        ]}"#,
    );
    let (_text, stderr, success) = export(&snapshot, "out.tp", &[]);
    assert!(!success);
    assert!(stderr.contains("unknown context 'moon'"), "got: {}", stderr);
}
