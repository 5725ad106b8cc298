//! Test utilities: dates, sample snapshots and generated trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use crate::tree::{NodeKind, Tree};

/// Noon on the given day.
pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid test date")
}

/// Late afternoon `days` calendar days before `today`.
pub fn days_before(today: NaiveDate, days: i64) -> NaiveDateTime {
    (today - chrono::Duration::days(days))
        .and_hms_opt(17, 30, 0)
        .expect("valid test time")
}

/// Names of every marked node, in creation order.
pub fn marked_names(tree: &Tree) -> Vec<String> {
    tree.iter()
        .filter(|(_, n)| n.marked)
        .map(|(_, n)| n.name.clone())
        .collect()
}

/// A small household snapshot with two folders, nested tasks and contexts.
pub const SAMPLE_SNAPSHOT: &str = r#"{
  "contexts": [
    { "id": "errands", "name": "Errands", "children": [
      { "id": "shops", "name": "Shops" }
    ]},
    { "id": "phone", "name": "Phone" }
  ],
  "projects": [
    { "type": "folder", "name": "Home", "children": [
      { "type": "project", "name": "Garden", "children": [
        { "type": "task", "name": "Mow lawn", "context": "errands",
          "completed": "2013-02-10T09:30:00" },
        { "type": "task", "name": "Plant bulbs", "context": "shops", "children": [
          { "type": "task", "name": "Buy bulbs", "context": "shops" },
          { "type": "task", "name": "Dig bed", "context": "errands" }
        ]}
      ]}
    ]},
    { "type": "folder", "name": "Work", "children": [
      { "type": "project", "name": "Quarterly report", "children": [
        { "type": "task", "name": "Call accountant", "context": "phone" }
      ]}
    ]}
  ]
}"#;

/// A snapshot written to a temporary directory, removed on drop.
pub struct SnapshotFile {
    dir: TempDir,
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(json: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("snapshot.json");
        fs::write(&path, json).expect("Failed to write snapshot");
        Self { dir, path }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_SNAPSHOT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the snapshot, free for output files.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// A wide tree: `folders` folders of `projects` projects, each holding
/// `tasks` tasks with one sub-task apiece. Every other task is completed.
pub fn generated_tree(folders: usize, projects: usize, tasks: usize) -> Tree {
    let mut tree = Tree::new();
    let done = at(2013, 2, 10);
    for f in 0..folders {
        let folder = tree.add_root(NodeKind::Folder, &format!("Folder {}", f), None);
        for p in 0..projects {
            let project =
                tree.add_child(folder, NodeKind::Project, &format!("Project {}.{}", f, p), None);
            for t in 0..tasks {
                let completed = (t % 2 == 0).then_some(done);
                let task = tree.add_child(
                    project,
                    NodeKind::Task,
                    &format!("Task {}.{}.{}", f, p, t),
                    completed,
                );
                tree.add_child(task, NodeKind::Task, &format!("Step {}.{}.{}", f, p, t), None);
            }
        }
    }
    tree
}
