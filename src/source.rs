//! Snapshot loading
//!
//! A snapshot is a JSON export of the task database: the folder/project/task
//! hierarchy plus the context hierarchy. Tasks name their context by id and
//! are filed under it after the context's own sub-contexts.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::tree::{NodeId, NodeKind, Tree};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub contexts: Vec<ContextEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    /// Defaults to `name`.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub children: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProjectEntry {
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<ProjectEntry>,
    },
    Project {
        name: String,
        #[serde(default)]
        completed: Option<NaiveDateTime>,
        #[serde(default)]
        children: Vec<ProjectEntry>,
    },
    Task {
        name: String,
        #[serde(default)]
        completed: Option<NaiveDateTime>,
        #[serde(default)]
        context: Option<String>,
        #[serde(default)]
        children: Vec<ProjectEntry>,
    },
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot file, or stdin when `path` is `-`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(path)?
        };
        Self::from_json(&json)
    }

    /// Build the tree. Every node starts marked.
    pub fn build(&self) -> Result<Tree> {
        let mut builder = Builder::default();
        for context in &self.contexts {
            builder.add_context(None, context)?;
        }
        for entry in &self.projects {
            builder.add_entry(None, entry)?;
        }
        builder.finish()
    }
}

/// Load and build a snapshot in one step.
pub fn load_tree(path: &Path) -> Result<Tree> {
    let tree = Snapshot::load(path)?.build()?;
    debug!("loaded {} nodes from {}", tree.len(), path.display());
    Ok(tree)
}

#[derive(Default)]
struct Builder {
    tree: Tree,
    contexts: HashMap<String, NodeId>,
    assignments: Vec<(String, NodeId)>,
}

impl Builder {
    fn add_context(&mut self, parent: Option<NodeId>, entry: &ContextEntry) -> Result<()> {
        let key = entry.id.clone().unwrap_or_else(|| entry.name.clone());
        let id = match parent {
            Some(parent) => self
                .tree
                .add_child(parent, NodeKind::Context, &entry.name, None),
            None => self.tree.add_root(NodeKind::Context, &entry.name, None),
        };
        match self.contexts.entry(key) {
            Entry::Occupied(taken) => return Err(Error::DuplicateContext(taken.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        for child in &entry.children {
            self.add_context(Some(id), child)?;
        }
        Ok(())
    }

    fn add_entry(&mut self, parent: Option<NodeId>, entry: &ProjectEntry) -> Result<()> {
        let parent_kind = parent.map(|p| self.tree[p].kind);
        let (kind, name, completed, children) = match entry {
            ProjectEntry::Folder { name, children } => (NodeKind::Folder, name, None, children),
            ProjectEntry::Project {
                name,
                completed,
                children,
            } => (NodeKind::Project, name, *completed, children),
            ProjectEntry::Task {
                name,
                completed,
                children,
                ..
            } => (NodeKind::Task, name, *completed, children),
        };

        let allowed = match (kind, parent_kind) {
            (NodeKind::Folder | NodeKind::Project, None | Some(NodeKind::Folder)) => true,
            (NodeKind::Task, Some(NodeKind::Project | NodeKind::Task)) => true,
            _ => false,
        };
        if !allowed {
            return Err(Error::structural(format!(
                "{} '{}' cannot be placed {}",
                kind.label(),
                name,
                match parent_kind {
                    Some(p) => format!("inside a {}", p.label()),
                    None => "at the top level".to_string(),
                }
            )));
        }

        let id = match parent {
            Some(parent) => self.tree.add_child(parent, kind, name, completed),
            None => self.tree.add_root(kind, name, completed),
        };
        if let ProjectEntry::Task {
            context: Some(context),
            ..
        } = entry
        {
            self.assignments.push((context.clone(), id));
        }
        for child in children {
            self.add_entry(Some(id), child)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Tree> {
        for (context, task) in std::mem::take(&mut self.assignments) {
            let ctx = *self
                .contexts
                .get(&context)
                .ok_or_else(|| Error::UnknownContext(context.clone()))?;
            self.tree.assign_context(ctx, task);
        }
        Ok(self.tree)
    }
}
