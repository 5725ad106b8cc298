//! Taskprune - filter, reshape and export task hierarchies
//!
//! A task database snapshot is loaded into one [`Tree`] holding two views
//! (projects and contexts). Filter and transform passes then flip each
//! node's `marked` flag or reshape the tree in place, and a renderer writes
//! whatever is still marked.

pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod transform;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use filter::{FilterSpec, FilterTarget, FilterVisitor, completion_string};
pub use output::{Format, OutputConfig, render, render_console};
pub use pipeline::{PipelineConfig, run};
pub use source::{Snapshot, load_tree};
pub use transform::{CompletionSorter, Flattener, Pruner, flatten};
pub use tree::{Node, NodeId, NodeKind, Tree, View, Visitor, traverse, traverse_contexts, traverse_list};
