//! Mark-and-sweep filter passes
//!
//! Each filter is one complete traversal. While walking it keeps the stack of
//! open ancestors (the node path). The first node of the trigger kind on a
//! branch is tested against the pattern; everything beneath it inherits that
//! decision and is never tested by the same pass.
//!
//! - a positive outcome marks the node and every open ancestor
//! - a negative outcome unmarks the node only
//!
//! Passes compose by running one after another over the same tree, so
//! several narrow patterns can refine what a single regex cannot express.

mod completion;

use chrono::NaiveDate;
use log::{debug, trace};
use regex::Regex;

use crate::error::{Error, Result};
use crate::tree::{NodeId, NodeKind, Tree, Visitor};

pub use completion::{completion_string, local_date_today};

/// What a filter pass tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTarget {
    FolderName,
    ProjectName,
    ContextName,
    TaskName,
    ProjectCompletion,
    TaskCompletion,
}

impl FilterTarget {
    /// Node kind whose visit triggers pattern evaluation.
    pub fn trigger(self) -> NodeKind {
        match self {
            FilterTarget::FolderName => NodeKind::Folder,
            FilterTarget::ProjectName | FilterTarget::ProjectCompletion => NodeKind::Project,
            FilterTarget::ContextName => NodeKind::Context,
            FilterTarget::TaskName | FilterTarget::TaskCompletion => NodeKind::Task,
        }
    }

    fn matches_completion(self) -> bool {
        matches!(
            self,
            FilterTarget::ProjectCompletion | FilterTarget::TaskCompletion
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            FilterTarget::FolderName => "folders",
            FilterTarget::ProjectName => "projects",
            FilterTarget::ContextName => "contexts",
            FilterTarget::TaskName => "tasks",
            FilterTarget::ProjectCompletion => "project completion",
            FilterTarget::TaskCompletion => "task completion",
        }
    }
}

/// Uncompiled description of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub target: FilterTarget,
    pub pattern: Option<String>,
    pub include: bool,
}

impl FilterSpec {
    pub fn include(target: FilterTarget, pattern: &str) -> Self {
        Self {
            target,
            pattern: Some(pattern.to_string()),
            include: true,
        }
    }

    pub fn exclude(target: FilterTarget, pattern: &str) -> Self {
        Self {
            target,
            pattern: Some(pattern.to_string()),
            include: false,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            if self.include { "include" } else { "exclude" },
            self.target.describe(),
            self.pattern.as_deref().unwrap_or("<none>")
        )
    }
}

/// Compile a filter pattern, naming it in the error.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// One filter pass. A missing pattern makes the pass a no-op apart from
/// refreshing each node's inherited match flag.
#[derive(Debug)]
pub struct FilterVisitor {
    target: FilterTarget,
    pattern: Option<Regex>,
    include: bool,
    today: NaiveDate,
    node_path: Vec<NodeId>,
}

impl FilterVisitor {
    pub fn new(target: FilterTarget, pattern: Option<&str>, include: bool) -> Result<Self> {
        Ok(Self {
            target,
            pattern: pattern.map(compile_pattern).transpose()?,
            include,
            today: local_date_today(),
            node_path: Vec::new(),
        })
    }

    pub fn from_spec(spec: &FilterSpec) -> Result<Self> {
        Self::new(spec.target, spec.pattern.as_deref(), spec.include)
    }

    /// Fix the date completion strings count days from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn begin_item(&mut self, tree: &mut Tree, id: NodeId) {
        let inherited = self
            .node_path
            .last()
            .is_some_and(|&parent| tree[parent].matched_by_current_pass);
        tree[id].matched_by_current_pass = inherited;
        self.node_path.push(id);

        if tree[id].kind != self.target.trigger() || tree[id].matched_by_current_pass {
            return;
        }
        if let Some(matched) = self.evaluate(tree, id) {
            self.set_item_matched(tree, id, matched);
        }
    }

    fn end_item(&mut self, id: NodeId) {
        if let Some(pos) = self.node_path.iter().rposition(|&n| n == id) {
            self.node_path.remove(pos);
        }
    }

    /// None when there is no pattern to test.
    fn evaluate(&self, tree: &Tree, id: NodeId) -> Option<bool> {
        let pattern = self.pattern.as_ref()?;
        let node = &tree[id];
        let matched = if self.target.matches_completion() {
            pattern.is_match(&completion_string(node.date_completed, self.today))
        } else {
            pattern.is_match(&node.name)
        };
        trace!("{} '{}' matched={}", node.kind.label(), node.name, matched);
        Some(matched)
    }

    fn set_item_matched(&self, tree: &mut Tree, id: NodeId, matched: bool) {
        let effective = if self.include { matched } else { !matched };
        tree[id].matched_by_current_pass = true;
        if effective {
            for &node in &self.node_path {
                tree[node].marked = true;
            }
        } else {
            debug!("unmarking {} '{}'", tree[id].kind.label(), tree[id].name);
            tree[id].marked = false;
        }
    }
}

impl Visitor for FilterVisitor {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id);
        Ok(())
    }
    fn end_folder(&mut self, _tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(id);
        Ok(())
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id);
        Ok(())
    }
    fn end_project(&mut self, _tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(id);
        Ok(())
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id);
        Ok(())
    }
    fn end_context(&mut self, _tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(id);
        Ok(())
    }
    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id);
        Ok(())
    }
    fn end_task(&mut self, _tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::tree::{View, traverse};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 2, 13).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDateTime {
        (today() - chrono::Duration::days(n))
            .and_hms_opt(16, 45, 0)
            .unwrap()
    }

    fn run(tree: &mut Tree, target: FilterTarget, pattern: &str, include: bool) {
        let mut filter = FilterVisitor::new(target, Some(pattern), include)
            .unwrap()
            .with_today(today());
        traverse(&mut filter, tree, View::Projects).unwrap();
    }

    fn marked(tree: &Tree, name: &str) -> bool {
        tree[tree.find(name).unwrap()].marked
    }

    /// Home/P1 and Work/P2, each project holding one task.
    fn home_and_work() -> Tree {
        let mut tree = Tree::new();
        let home = tree.add_root(NodeKind::Folder, "Home", None);
        let p1 = tree.add_child(home, NodeKind::Project, "P1", None);
        tree.add_child(p1, NodeKind::Task, "Water plants", None);
        let work = tree.add_root(NodeKind::Folder, "Work", None);
        let p2 = tree.add_child(work, NodeKind::Project, "P2", None);
        tree.add_child(p2, NodeKind::Task, "File report", None);
        tree
    }

    #[test]
    fn test_folder_include_keeps_matching_branch() {
        let mut tree = home_and_work();
        run(&mut tree, FilterTarget::FolderName, "^Home$", true);
        assert!(marked(&tree, "Home"));
        assert!(marked(&tree, "P1"));
        assert!(marked(&tree, "Water plants"));
        assert!(!marked(&tree, "Work"));
        // Descendants of an unmarked folder keep their own flag; rendering
        // skips them with the folder.
        assert!(marked(&tree, "P2"));
    }

    #[test]
    fn test_folder_exclude() {
        let mut tree = home_and_work();
        run(&mut tree, FilterTarget::FolderName, "^Work$", false);
        assert!(marked(&tree, "Home"));
        assert!(!marked(&tree, "Work"));
    }

    #[test]
    fn test_task_include_marks_ancestor_path() {
        let mut tree = home_and_work();
        for id in tree.ids().collect::<Vec<_>>() {
            tree[id].marked = false;
        }
        run(&mut tree, FilterTarget::TaskName, "report", true);
        assert!(marked(&tree, "Work"));
        assert!(marked(&tree, "P2"));
        assert!(marked(&tree, "File report"));
        assert!(!marked(&tree, "Home"));
        assert!(!marked(&tree, "P1"));
    }

    #[test]
    fn test_ancestor_closure_after_include_pass() {
        let mut tree = home_and_work();
        for id in tree.ids().collect::<Vec<_>>() {
            tree[id].marked = false;
        }
        run(&mut tree, FilterTarget::TaskName, "Water|report", true);
        assert!(marked(&tree, "Work"));
        assert!(marked(&tree, "Home"));
        for (_, node) in tree.iter() {
            if node.marked {
                if let Some(parent) = node.parent {
                    assert!(tree[parent].marked, "{} marked under unmarked parent", node.name);
                }
            }
        }
    }

    #[test]
    fn test_first_match_wins_for_nested_tasks() {
        let mut tree = Tree::new();
        let project = tree.add_root(NodeKind::Project, "P", None);
        let parent = tree.add_child(project, NodeKind::Task, "Plan trip", None);
        let child = tree.add_child(parent, NodeKind::Task, "Book hotel", None);

        // The child would fail the pattern, but it inherits the parent's match.
        run(&mut tree, FilterTarget::TaskName, "trip", true);
        assert!(tree[parent].marked);
        assert!(tree[child].marked);
        assert!(tree[child].matched_by_current_pass);
        assert_eq!(
            tree[child].matched_by_current_pass,
            tree[parent].matched_by_current_pass
        );
    }

    #[test]
    fn test_negative_outcome_is_inherited_too() {
        let mut tree = Tree::new();
        let project = tree.add_root(NodeKind::Project, "P", None);
        let parent = tree.add_child(project, NodeKind::Task, "Plan trip", None);
        let child = tree.add_child(parent, NodeKind::Task, "Book hotel", None);

        // The parent is evaluated (and fails); the child is never tested.
        run(&mut tree, FilterTarget::TaskName, "hotel", true);
        assert!(!tree[parent].marked);
        assert!(tree[child].marked);
        assert!(tree[child].matched_by_current_pass);
    }

    #[test]
    fn test_match_flag_reset_between_passes() {
        let mut tree = home_and_work();
        run(&mut tree, FilterTarget::FolderName, "Home", true);
        let p1 = tree.find("P1").unwrap();
        assert!(tree[p1].matched_by_current_pass);

        // A project pass re-derives the flag from the stack, so P1 is tested.
        run(&mut tree, FilterTarget::ProjectName, "^P2$", true);
        assert!(!tree[p1].marked);
        assert!(tree[tree.find("P2").unwrap()].marked);
    }

    #[test]
    fn test_sibling_positive_match_survives_negative() {
        let mut tree = Tree::new();
        let project = tree.add_root(NodeKind::Project, "P", None);
        tree.add_child(project, NodeKind::Task, "keep", None);
        tree.add_child(project, NodeKind::Task, "drop", None);
        tree[project].marked = false;

        run(&mut tree, FilterTarget::TaskName, "keep", true);
        assert!(tree[project].marked);
        assert!(marked(&tree, "keep"));
        assert!(!marked(&tree, "drop"));
    }

    #[test]
    fn test_task_completion_recency() {
        let mut tree = Tree::new();
        let folder = tree.add_root(NodeKind::Folder, "Home", None);
        let project = tree.add_child(folder, NodeKind::Project, "P", None);
        let t1 = tree.add_child(project, NodeKind::Task, "T1", Some(days_ago(3)));
        for id in [folder, project, t1] {
            tree[id].marked = false;
        }

        run(&mut tree, FilterTarget::TaskCompletion, "-3d", true);
        assert!(tree[t1].marked);
        assert!(tree[project].marked);
        assert!(tree[folder].marked);
    }

    #[test]
    fn test_task_completion_exclude_drops_completed_only() {
        let mut tree = Tree::new();
        let project = tree.add_root(NodeKind::Project, "P", None);
        let done = tree.add_child(project, NodeKind::Task, "done", Some(days_ago(1)));
        let open = tree.add_child(project, NodeKind::Task, "open", None);

        run(&mut tree, FilterTarget::TaskCompletion, ".", false);
        assert!(!tree[done].marked);
        assert!(tree[open].marked);
    }

    #[test]
    fn test_project_completion_by_month() {
        let mut tree = Tree::new();
        let jan = tree.add_root(NodeKind::Project, "Jan", Some(days_ago(30)));
        let feb = tree.add_root(NodeKind::Project, "Feb", Some(days_ago(2)));

        run(&mut tree, FilterTarget::ProjectCompletion, "February", true);
        assert!(!tree[jan].marked);
        assert!(tree[feb].marked);
    }

    #[test]
    fn test_context_filter_in_context_view() {
        let mut tree = Tree::new();
        let project = tree.add_root(NodeKind::Project, "P", None);
        let call = tree.add_child(project, NodeKind::Task, "Call mum", None);
        let buy = tree.add_child(project, NodeKind::Task, "Buy milk", None);
        let phone = tree.add_root(NodeKind::Context, "Phone", None);
        let shops = tree.add_root(NodeKind::Context, "Shops", None);
        tree.assign_context(phone, call);
        tree.assign_context(shops, buy);

        let mut filter = FilterVisitor::new(FilterTarget::ContextName, Some("^Phone$"), true)
            .unwrap()
            .with_today(today());
        traverse(&mut filter, &mut tree, View::Contexts).unwrap();
        assert!(tree[phone].marked);
        assert!(tree[call].marked);
        assert!(!tree[shops].marked);
    }

    #[test]
    fn test_absent_pattern_is_noop() {
        let mut tree = home_and_work();
        let mut filter = FilterVisitor::new(FilterTarget::FolderName, None, true).unwrap();
        traverse(&mut filter, &mut tree, View::Projects).unwrap();
        assert!(tree.iter().all(|(_, n)| n.marked));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FilterVisitor::new(FilterTarget::TaskName, Some("(unclosed"), true).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_filter_describe() {
        let spec = FilterSpec::exclude(FilterTarget::TaskCompletion, ".");
        assert_eq!(spec.describe(), "exclude task completion .");
    }
}
