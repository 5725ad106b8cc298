//! Completion-date ordering of project children

use chrono::{Local, NaiveDateTime};

use crate::error::Result;
use crate::tree::{NodeId, Tree, Visitor};

/// Stable-sorts each project's children by completion date. Items that are
/// not completed sort as if completed "now", so they follow everything
/// finished earlier and keep their relative order.
#[derive(Debug, Clone)]
pub struct CompletionSorter {
    now: NaiveDateTime,
}

impl CompletionSorter {
    pub fn new() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    pub fn with_now(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Default for CompletionSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for CompletionSorter {
    fn end_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        let now = self.now;
        let mut children = std::mem::take(&mut tree[id].children);
        children.sort_by_key(|&c| tree[c].date_completed.unwrap_or(now));
        tree[id].children = children;
        Ok(())
    }
}
