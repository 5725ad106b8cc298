//! OPML output formatting

use std::io::Write;

use crate::error::Result;
use crate::tree::{NodeId, Tree, View, Visitor};

use super::Renderer;
use super::utils::{escape_xml, first_line};

/// Writes an OPML 1.0 document with one `<outline>` per visible node.
pub struct OpmlRenderer<W> {
    out: W,
    view: View,
    title: String,
    depth: usize,
}

impl<W: Write> OpmlRenderer<W> {
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
        "  ".repeat(self.depth + 2)
    }

    fn begin_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        let close = if tree.has_marked_children(self.view, id) {
            ">"
        } else {
            "/>"
        };
        write!(
            self.out,
            "{}<outline text=\"{}\"",
            self.indent(),
            escape_xml(first_line(&node.name))
        )?;
        if let Some(when) = node.date_completed {
            write!(self.out, " _completed=\"{}\"", when.format("%Y-%m-%dT%H:%M:%S"))?;
        }
        writeln!(self.out, "{}", close)?;
        self.depth += 1;
        Ok(())
    }

    fn end_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if tree.has_marked_children(self.view, id) {
            writeln!(self.out, "{}</outline>", self.indent())?;
        }
        Ok(())
    }
}

impl<W: Write> Visitor for OpmlRenderer<W> {
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

impl<W: Write> Renderer for OpmlRenderer<W> {
    fn start(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"
        )?;
        writeln!(self.out, "<opml version=\"1.0\">")?;
        writeln!(self.out, "  <head>")?;
        writeln!(self.out, "    <title>{}</title>", escape_xml(&self.title))?;
        writeln!(self.out, "  </head>")?;
        writeln!(self.out, "  <body>")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out, "  </body>")?;
        writeln!(self.out, "</opml>")?;
        Ok(())
    }
}
