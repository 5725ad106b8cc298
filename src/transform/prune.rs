//! Pruning of empty containers

use log::debug;

use crate::error::Result;
use crate::tree::{NodeId, Tree, Visitor};

/// Unmarks folders, projects and contexts that have no marked children.
///
/// Works post-order, so a folder whose only project was just pruned is
/// itself pruned in the same pass.
#[derive(Debug, Default)]
pub struct Pruner;

impl Pruner {
    fn prune_if_empty(&self, tree: &mut Tree, id: NodeId) {
        if !tree[id].marked {
            return;
        }
        let empty = !tree[id].children.iter().any(|&c| tree[c].marked);
        if empty {
            debug!("pruning empty {} '{}'", tree[id].kind.label(), tree[id].name);
            tree[id].marked = false;
        }
    }
}

impl Visitor for Pruner {
    fn end_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.prune_if_empty(tree, id);
        Ok(())
    }

    fn end_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.prune_if_empty(tree, id);
        Ok(())
    }

    fn end_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.prune_if_empty(tree, id);
        Ok(())
    }
}
