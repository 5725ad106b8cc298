//! Flattening of nested tasks

use log::info;

use crate::error::{Error, Result};
use crate::tree::{NodeId, Tree, Visitor, traverse_list};

/// Moves every task's children up beside it and collects the projects it
/// walks past, which become the new project-view roots.
///
/// Children are each inserted at the task's own position, so they land in
/// reverse order ahead of the (now childless) task: `T[c1, c2, c3]` becomes
/// `c3, c2, c1, T`.
#[derive(Debug, Default)]
pub struct Flattener {
    projects: Vec<NodeId>,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects in the order they were entered.
    pub fn into_projects(self) -> Vec<NodeId> {
        self.projects
    }
}

impl Visitor for Flattener {
    fn begin_project(&mut self, _tree: &mut Tree, id: NodeId) -> Result<()> {
        self.projects.push(id);
        Ok(())
    }

    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Err(Error::structural(format!(
            "cannot flatten context '{}': flattening only applies to the project view",
            tree[id].name
        )))
    }

    fn end_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        let parent = tree[id]
            .parent
            .ok_or_else(|| Error::structural(format!("task '{}' has no parent", tree[id].name)))?;
        let pos = tree[parent]
            .children
            .iter()
            .position(|&c| c == id)
            .ok_or_else(|| {
                Error::structural(format!(
                    "task '{}' is missing from its parent's children",
                    tree[id].name
                ))
            })?;

        let children = std::mem::take(&mut tree[id].children);
        for child in children {
            tree[parent].children.insert(pos, child);
            tree[child].parent = Some(parent);
        }
        Ok(())
    }
}

/// Flatten the project view and replace its roots with the collected projects.
pub fn flatten(tree: &mut Tree) -> Result<()> {
    info!("flattening project/task structure");
    let roots = tree.project_roots().to_vec();
    let mut flattener = Flattener::new();
    traverse_list(&mut flattener, tree, &roots)?;
    tree.set_project_roots(flattener.into_projects());
    Ok(())
}
