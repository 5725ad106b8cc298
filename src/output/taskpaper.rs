//! TaskPaper output formatting

use std::io::Write;

use crate::error::Result;
use crate::tree::{NodeId, Tree, Visitor};

use super::Renderer;
use super::utils::{completion_tag, first_line};

/// Containers are written as `Name:` lines and tasks as `- Name`, indented
/// with one tab per level. Completed items carry a ` @YYYY-MM-DD-Ddd` tag.
pub struct TaskPaperRenderer<W> {
    out: W,
    depth: usize,
}

impl<W: Write> TaskPaperRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin_container(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        writeln!(
            self.out,
            "{}{}:{}",
            "\t".repeat(self.depth),
            first_line(&node.name),
            completion_tag(node.date_completed)
        )?;
        self.depth += 1;
        Ok(())
    }

    fn end_item(&mut self) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}

impl<W: Write> Visitor for TaskPaperRenderer<W> {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_folder(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_project(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_context(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }

    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        writeln!(
            self.out,
            "{}- {}{}",
            "\t".repeat(self.depth),
            first_line(&node.name),
            completion_tag(node.date_completed)
        )?;
        self.depth += 1;
        Ok(())
    }

    fn end_task(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
}

impl<W: Write> Renderer for TaskPaperRenderer<W> {}
