//! HTML output formatting

use std::io::Write;

use crate::error::Result;
use crate::tree::{NodeId, Tree, View, Visitor};

use super::Renderer;
use super::utils::{escape_xml, first_line};

/// Writes a standalone HTML page of nested lists. Containers are bold,
/// completed tasks struck through.
pub struct HtmlRenderer<W> {
    out: W,
    view: View,
    title: String,
    depth: usize,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W, view: View, title: &str) -> Self {
        Self {
            out,
            view,
            title: title.to_string(),
            depth: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&self) -> String {
        "  ".repeat(2 * self.depth + 3)
    }

    fn begin_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        let name = escape_xml(first_line(&node.name));
        let label = if node.kind.is_container() {
            format!("<strong>{}</strong>", name)
        } else if node.is_completed() {
            format!("<del>{}</del>", name)
        } else {
            name
        };

        if tree.has_marked_children(self.view, id) {
            writeln!(self.out, "{}<li>{}", self.indent(), label)?;
            writeln!(self.out, "{}  <ul>", self.indent())?;
        } else {
            writeln!(self.out, "{}<li>{}</li>", self.indent(), label)?;
        }
        self.depth += 1;
        Ok(())
    }

    fn end_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if tree.has_marked_children(self.view, id) {
            writeln!(self.out, "{}  </ul>", self.indent())?;
            writeln!(self.out, "{}</li>", self.indent())?;
        }
        Ok(())
    }
}

impl<W: Write> Visitor for HtmlRenderer<W> {
    fn begin_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_folder(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(tree, id)
    }
    fn begin_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_project(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(tree, id)
    }
    fn begin_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_context(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(tree, id)
    }
    fn begin_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.begin_item(tree, id)
    }
    fn end_task(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
        self.end_item(tree, id)
    }
}

impl<W: Write> Renderer for HtmlRenderer<W> {
    fn start(&mut self) -> Result<()> {
        writeln!(self.out, "<!DOCTYPE html>")?;
        writeln!(self.out, "<html>")?;
        writeln!(self.out, "  <head>")?;
        writeln!(self.out, "    <meta charset=\"utf-8\">")?;
        writeln!(self.out, "    <title>{}</title>", escape_xml(&self.title))?;
        writeln!(self.out, "  </head>")?;
        writeln!(self.out, "  <body>")?;
        writeln!(self.out, "    <ul>")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out, "    </ul>")?;
        writeln!(self.out, "  </body>")?;
        writeln!(self.out, "</html>")?;
        Ok(())
    }
}
