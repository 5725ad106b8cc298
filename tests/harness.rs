//! Test harness for taskprune integration tests

use std::path::Path;
use std::process::Command;

pub use taskprune::test_utils::{SAMPLE_SNAPSHOT, SnapshotFile};

/// Fixed "today" for the sample snapshot: Mow lawn was completed 3 days earlier.
pub const TODAY: &str = "2013-02-13";

pub fn run_taskprune(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_taskprune");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run taskprune");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_writes_snapshot() {
        let snapshot = SnapshotFile::sample();
        assert!(snapshot.path().exists());
        assert!(snapshot.dir().is_dir());
    }
}
