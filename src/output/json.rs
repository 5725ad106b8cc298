//! JSON output formatting

use std::io::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::Result;
use crate::tree::{NodeId, NodeKind, Tree, Visitor};

use super::Renderer;

/// Surviving node as written to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct JsonNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

/// Collects the visible tree and writes it as one pretty-printed array.
pub struct JsonRenderer<W> {
    out: W,
    open: Vec<JsonNode>,
    roots: Vec<JsonNode>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            open: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin_item(&mut self, tree: &Tree, id: NodeId) -> Result<()> {
        let node = &tree[id];
        self.open.push(JsonNode {
            kind: node.kind,
            name: node.name.clone(),
            completed: node.date_completed,
            children: Vec::new(),
        });
        Ok(())
    }

    fn end_item(&mut self) -> Result<()> {
        if let Some(done) = self.open.pop() {
            match self.open.last_mut() {
                Some(parent) => parent.children.push(done),
                None => self.roots.push(done),
            }
        }
        Ok(())
    }
}

impl<W: Write> Visitor for JsonRenderer<W> {
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

impl<W: Write> Renderer for JsonRenderer<W> {
    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.roots)?;
        writeln!(self.out)?;
        Ok(())
    }
}
