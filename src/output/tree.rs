//! Console tree output
//!
//! This module provides `TreeRenderer` which draws the surviving hierarchy
//! with box-drawing connectors and colours, ending with a summary line.

use termcolor::{Color, ColorSpec, WriteColor};

use crate::error::Result;
use crate::tree::{NodeId, NodeKind, Tree, View, Visitor};

use super::Renderer;
use super::utils::{connector, continuation_prefix, first_line};

/// Open node whose visible children are still being drawn.
struct Frame {
    remaining: usize,
    prefix: String,
}

pub struct TreeRenderer<W> {
    out: W,
    view: View,
    frames: Vec<Frame>,
    project_count: usize,
    task_count: usize,
}

impl<W: WriteColor> TreeRenderer<W> {
    pub fn new(out: W, view: View) -> Self {
        Self {
            out,
            view,
            frames: Vec::new(),
            project_count: 0,
            task_count: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn color_for(kind: NodeKind, completed: bool) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match kind {
            NodeKind::Folder => {
                spec.set_fg(Some(Color::Blue)).set_bold(true);
            }
            NodeKind::Project => {
                spec.set_fg(Some(Color::Green)).set_bold(true);
            }
            NodeKind::Context => {
                spec.set_fg(Some(Color::Magenta)).set_bold(true);
            }
            NodeKind::Task => {
                spec.set_fg(Some(Color::White));
            }
        }
        if completed {
            spec.set_dimmed(true);
        }
        spec
    }

    fn begin_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        let child_prefix = match self.frames.last_mut() {
            Some(frame) => {
                frame.remaining = frame.remaining.saturating_sub(1);
                let is_last = frame.remaining == 0;
                write!(self.out, "{}{}", frame.prefix, connector(is_last))?;
                continuation_prefix(&frame.prefix, is_last)
            }
            None => String::new(),
        };

        self.out
            .set_color(&Self::color_for(node.kind, node.is_completed()))?;
        write!(self.out, "{}", first_line(&node.name))?;
        self.out.reset()?;
        if let Some(when) = node.date_completed {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(self.out, "  [done {}]", when.format("%Y-%m-%d"))?;
            self.out.reset()?;
        }
        writeln!(self.out)?;

        match node.kind {
            NodeKind::Project => self.project_count += 1,
            NodeKind::Task => self.task_count += 1,
            _ => {}
        }

        let remaining = tree
            .traversal_children(self.view, id)
            .iter()
            .filter(|&&c| tree[c].marked)
            .count();
        self.frames.push(Frame {
            remaining,
            prefix: child_prefix,
        });
        Ok(())
    }

    fn end_item(&mut self) -> Result<()> {
        self.frames.pop();
        Ok(())
    }
}

impl<W: WriteColor> Visitor for TreeRenderer<W> {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_folder(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_project(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_context(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_task(&mut self, _tree: &mut Tree, _id: NodeId) -> Result<()> {
        self.end_item()
    }
}

impl<W: WriteColor> Renderer for TreeRenderer<W> {
    fn finish(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} projects, {} tasks",
            self.project_count, self.task_count
        )?;
        Ok(())
    }
}
