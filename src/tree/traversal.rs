//! Depth-first traversal with begin/end callbacks per node kind.
//!
//! Every pass over the tree (filters, transforms and renderers) is a
//! [`Visitor`]. `begin_*` fires before a node's children are visited and
//! `end_*` after all of them, which is where stateful visitors push and pop
//! their ancestor stacks or inspect fully processed children.

use crate::error::Result;

use super::node::{NodeId, NodeKind, Tree, View};

/// Callbacks for one pass. Every method defaults to a no-op.
#[allow(unused_variables)]
pub trait Visitor {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn end_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn end_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn end_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
    fn end_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        Ok(())
    }
}

/// Walk the project-view roots (folders and top-level projects).
pub fn traverse_list<V: Visitor + ?Sized>(
    visitor: &mut V,
    tree: &mut Tree,
    roots: &[NodeId],
) -> Result<()> {
    for &id in roots {
        visit(visitor, tree, View::Projects, id)?;
    }
    Ok(())
}

/// Walk the context-view roots. Tasks are leaves in this view.
pub fn traverse_contexts<V: Visitor + ?Sized>(
    visitor: &mut V,
    tree: &mut Tree,
    roots: &[NodeId],
) -> Result<()> {
    for &id in roots {
        visit(visitor, tree, View::Contexts, id)?;
    }
    Ok(())
}

/// Walk the current root set of `view`.
pub fn traverse<V: Visitor + ?Sized>(visitor: &mut V, tree: &mut Tree, view: View) -> Result<()> {
    let roots = tree.roots(view).to_vec();
    match view {
        View::Projects => traverse_list(visitor, tree, &roots),
        View::Contexts => traverse_contexts(visitor, tree, &roots),
    }
}

fn visit<V: Visitor + ?Sized>(
    visitor: &mut V,
    tree: &mut Tree,
    view: View,
    id: NodeId,
) -> Result<()> {
    let kind = tree[id].kind;
    match kind {
        NodeKind::Folder => visitor.begin_folder(tree, id)?,
        NodeKind::Project => visitor.begin_project(tree, id)?,
        NodeKind::Context => visitor.begin_context(tree, id)?,
        NodeKind::Task => visitor.begin_task(tree, id)?,
    }

    // Snapshot: transforms may rewrite this sequence from a child's end_*.
    let children = tree.traversal_children(view, id).to_vec();
    for child in children {
        visit(visitor, tree, view, child)?;
    }

    match kind {
        NodeKind::Folder => visitor.end_folder(tree, id),
        NodeKind::Project => visitor.end_project(tree, id),
        NodeKind::Context => visitor.end_context(tree, id),
        NodeKind::Task => visitor.end_task(tree, id),
    }
}
