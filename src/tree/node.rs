//! Arena-backed task hierarchy

use std::ops::{Index, IndexMut};

use chrono::NaiveDateTime;
use serde::Serialize;

/// Index of a node inside its owning [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    Project,
    Context,
    Task,
}

impl NodeKind {
    /// Only projects and tasks carry a completion date.
    pub fn can_complete(self) -> bool {
        matches!(self, NodeKind::Project | NodeKind::Task)
    }

    pub fn is_container(self) -> bool {
        !matches!(self, NodeKind::Task)
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Project => "project",
            NodeKind::Context => "context",
            NodeKind::Task => "task",
        }
    }
}

/// Which of the two root sets a pass walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Folders and projects, with tasks nested under projects.
    #[default]
    Projects,
    /// Contexts, with tasks filed under their assigned context.
    Contexts,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    pub date_completed: Option<NaiveDateTime>,
    pub children: Vec<NodeId>,
    /// Owner in the project view (or the enclosing context for sub-contexts).
    /// Only used to locate the node inside its owner's `children`.
    pub parent: Option<NodeId>,
    /// Whether the node survives into the rendered output.
    pub marked: bool,
    /// Resolved by the filter pass currently running; inherited from the
    /// enclosing node at every visit.
    pub matched_by_current_pass: bool,
}

impl Node {
    fn new(kind: NodeKind, name: String, date_completed: Option<NaiveDateTime>) -> Self {
        Self {
            kind,
            name,
            date_completed: date_completed.filter(|_| kind.can_complete()),
            children: Vec::new(),
            parent: None,
            marked: true,
            matched_by_current_pass: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.date_completed.is_some()
    }
}

/// Owns every node of both views.
///
/// A task is stored once and may be referenced from its project-view owner
/// and from one context, so `marked` reads the same through either view.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    project_roots: Vec<NodeId>,
    context_roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, name: &str, completed: Option<NaiveDateTime>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, name.to_string(), completed));
        id
    }

    /// Add a top-level node. Contexts become context-view roots, everything
    /// else a project-view root.
    pub fn add_root(
        &mut self,
        kind: NodeKind,
        name: &str,
        completed: Option<NaiveDateTime>,
    ) -> NodeId {
        let id = self.push(kind, name, completed);
        if kind == NodeKind::Context {
            self.context_roots.push(id);
        } else {
            self.project_roots.push(id);
        }
        id
    }

    /// Add a node owned by `parent`, appended to the end of its children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: &str,
        completed: Option<NaiveDateTime>,
    ) -> NodeId {
        let id = self.push(kind, name, completed);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// File an existing task under a context. Ownership stays with the
    /// task's project-view parent.
    pub fn assign_context(&mut self, context: NodeId, task: NodeId) {
        self.nodes[context.0].children.push(task);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn project_roots(&self) -> &[NodeId] {
        &self.project_roots
    }

    pub fn context_roots(&self) -> &[NodeId] {
        &self.context_roots
    }

    pub fn roots(&self, view: View) -> &[NodeId] {
        match view {
            View::Projects => &self.project_roots,
            View::Contexts => &self.context_roots,
        }
    }

    pub fn set_project_roots(&mut self, roots: Vec<NodeId>) {
        self.project_roots = roots;
    }

    /// Children the traversal descends into for `view`. Tasks reached
    /// through a context are leaves there; their sub-tasks sit under their
    /// own contexts.
    pub fn traversal_children(&self, view: View, id: NodeId) -> &[NodeId] {
        let node = &self.nodes[id.0];
        match (view, node.kind) {
            (View::Contexts, NodeKind::Task) => &[],
            _ => &node.children,
        }
    }

    /// Whether any child reached by the traversal in `view` is marked.
    pub fn has_marked_children(&self, view: View, id: NodeId) -> bool {
        self.traversal_children(view, id)
            .iter()
            .any(|&c| self.nodes[c.0].marked)
    }

    /// First node with this exact name, in creation order.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
