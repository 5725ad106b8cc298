//! Rendering of the filtered tree
//!
//! Renderers are visitors. They are always driven through [`MarkedOnly`],
//! which hides every unmarked node together with its whole subtree, so a
//! renderer only ever sees what survived filtering.
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared helpers (escaping, tree prefixes, completion tags)
//! - `markdown` - Markdown (also used for FoldingText)
//! - `taskpaper` - TaskPaper
//! - `opml` - OPML outline
//! - `html` - HTML nested lists
//! - `json` - JSON dump of the surviving tree
//! - `tree` - coloured console tree

mod config;
mod html;
mod json;
mod markdown;
mod opml;
mod taskpaper;
mod tree;
mod utils;

use std::io::Write;
use std::path::Path;

use termcolor::WriteColor;

use crate::error::{Error, Result};
use crate::tree::{NodeId, Tree, View, Visitor, traverse};

pub use config::OutputConfig;
pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use opml::OpmlRenderer;
pub use taskpaper::TaskPaperRenderer;
pub use tree::TreeRenderer;
pub use utils::{completion_tag, escape_xml};

/// A visitor that also writes a document prologue and epilogue.
pub trait Renderer: Visitor {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Forwards callbacks to `inner` only for marked nodes with no unmarked
/// ancestor in the current walk.
pub struct MarkedOnly<V> {
    inner: V,
    hidden_depth: usize,
}

impl<V> MarkedOnly<V> {
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            hidden_depth: 0,
        }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    fn enter(&mut self, tree: &Tree, id: NodeId) -> bool {
        if self.hidden_depth > 0 || !tree[id].marked {
            self.hidden_depth += 1;
            false
        } else {
            true
        }
    }

    fn leave(&mut self) -> bool {
        if self.hidden_depth > 0 {
            self.hidden_depth -= 1;
            false
        } else {
            true
        }
    }
}

macro_rules! forward_visible {
    ($($begin:ident / $end:ident),* $(,)?) => {
        $(
            fn $begin(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
                if self.enter(tree, id) {
                    self.inner.$begin(tree, id)
                } else {
                    Ok(())
                }
            }

            fn $end(&mut self, tree: &mut Tree, id: NodeId) -> Result<()> {
                if self.leave() {
                    self.inner.$end(tree, id)
                } else {
                    Ok(())
                }
            }
        )*
    };
}

impl<V: Visitor> Visitor for MarkedOnly<V> {
    forward_visible!(
        begin_folder / end_folder,
        begin_project / end_project,
        begin_context / end_context,
        begin_task / end_task,
    );
}

/// Run `renderer` over the marked part of `view` and hand it back.
pub fn render_with<R: Renderer>(renderer: R, tree: &mut Tree, view: View) -> Result<R> {
    let mut visible = MarkedOnly::new(renderer);
    visible.inner.start()?;
    traverse(&mut visible, tree, view)?;
    let mut renderer = visible.into_inner();
    renderer.finish()?;
    Ok(renderer)
}

/// File formats selected by output file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    TaskPaper,
    Opml,
    Html,
    Json,
}

impl Format {
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        match suffix {
            "md" | "ft" => Ok(Format::Markdown),
            "tp" | "taskpaper" => Ok(Format::TaskPaper),
            "opml" => Ok(Format::Opml),
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }

    /// Format named by everything after the first `.` of the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match file_name.find('.') {
            Some(dot) => Self::from_suffix(&file_name[dot + 1..]),
            None => Err(Error::MissingSuffix(path.display().to_string())),
        }
    }
}

/// Render the marked part of `view` in `format` into `out`.
pub fn render<W: Write>(
    format: Format,
    tree: &mut Tree,
    view: View,
    config: &OutputConfig,
    out: W,
) -> Result<W> {
    let out = match format {
        Format::Markdown => render_with(MarkdownRenderer::new(out), tree, view)?.into_inner(),
        Format::TaskPaper => render_with(TaskPaperRenderer::new(out), tree, view)?.into_inner(),
        Format::Opml => {
            render_with(OpmlRenderer::new(out, view, &config.title), tree, view)?.into_inner()
        }
        Format::Html => {
            render_with(HtmlRenderer::new(out, view, &config.title), tree, view)?.into_inner()
        }
        Format::Json => render_with(JsonRenderer::new(out), tree, view)?.into_inner(),
    };
    Ok(out)
}

/// Render the marked part of `view` as a console tree.
pub fn render_console<W: WriteColor>(tree: &mut Tree, view: View, out: W) -> Result<W> {
    Ok(render_with(TreeRenderer::new(out, view), tree, view)?.into_inner())
}
