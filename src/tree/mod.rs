//! Task hierarchy model and traversal
//!
//! - `node`: the arena (`Tree`) of folder/project/context/task nodes
//! - `traversal`: the `Visitor` protocol and the two root-set walkers

mod node;
mod traversal;

pub use node::{Node, NodeId, NodeKind, Tree, View};
pub use traversal::{Visitor, traverse, traverse_contexts, traverse_list};
