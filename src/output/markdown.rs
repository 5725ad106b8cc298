//! Markdown output formatting
//!
//! Folders, projects and contexts become headings by depth; tasks become a
//! nested bullet list under their container. FoldingText reads the same
//! layout.

use std::io::Write;

use crate::error::Result;
use crate::tree::{NodeId, Tree, Visitor};

use super::Renderer;
use super::utils::first_line;

pub struct MarkdownRenderer<W> {
    out: W,
    heading_depth: usize,
    task_depth: usize,
    needs_gap: bool,
}

impl<W: Write> MarkdownRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            heading_depth: 0,
            task_depth: 0,
            needs_gap: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin_container(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        self.heading_depth += 1;
        if self.needs_gap {
            writeln!(self.out)?;
        }
        writeln!(
            self.out,
            "{} {}",
            "#".repeat(self.heading_depth.min(6)),
            first_line(&tree[id].name)
        )?;
        writeln!(self.out)?;
        self.needs_gap = false;
        Ok(())
    }

    fn end_container(&mut self) -> Result<()> {
        self.heading_depth = self.heading_depth.saturating_sub(1);
        Ok(())
    }
}

impl<W: Write> Visitor for MarkdownRenderer<W> {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_folder(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_container()
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_project(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_container()
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_container(tree, id)
    }
    fn end_context(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_container()
    }

    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        write!(
            self.out,
            "{}- {}",
            "    ".repeat(self.task_depth),
            first_line(&node.name)
        )?;
        if let Some(when) = node.date_completed {
            write!(self.out, " (completed {})", when.format("%Y-%m-%d"))?;
        }
        writeln!(self.out)?;
        self.task_depth += 1;
        self.needs_gap = true;
        Ok(())
    }

    fn end_task(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.task_depth = self.task_depth.saturating_sub(1);
        Ok(())
    }
}

impl<W: Write> Renderer for MarkdownRenderer<W> {}
