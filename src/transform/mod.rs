//! Passes that reshape the marked tree in place
//!
//! - `flatten`: lift nested tasks up to their project
//! - `sort`: order project children by completion date
//! - `prune`: unmark containers left without marked children

mod flatten;
mod prune;
mod sort;

pub use flatten::{Flattener, flatten};
pub use prune::Pruner;
pub use sort::CompletionSorter;
