//! Ordered application of filter and transform passes

use chrono::{NaiveDate, NaiveDateTime};
use log::info;

use crate::error::Result;
use crate::filter::{FilterSpec, FilterVisitor};
use crate::transform::{CompletionSorter, Pruner, flatten};
use crate::tree::{Tree, View, traverse};

/// Which passes to run over the tree, and over which view.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// View filtered, sorted, pruned and rendered.
    pub view: View,
    /// Filter passes, in the order they run.
    pub filters: Vec<FilterSpec>,
    pub flatten: bool,
    pub sort_by_completion: bool,
    pub prune: bool,
    /// Date completion filters count days from. Defaults to the local date.
    pub today: Option<NaiveDate>,
    /// Sort key for uncompleted items. Defaults to the local time.
    pub now: Option<NaiveDateTime>,
}

/// Run every configured pass over `tree`:
/// filters in order, then flatten, then sort, then prune.
///
/// All patterns are compiled before the first pass, so an invalid pattern
/// leaves the tree untouched.
pub fn run(tree: &mut Tree, config: &PipelineConfig) -> Result<()> {
    let mut filters = config
        .filters
        .iter()
        .map(|spec| {
            let visitor = FilterVisitor::from_spec(spec)?;
            Ok(match config.today {
                Some(today) => visitor.with_today(today),
                None => visitor,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for (spec, filter) in config.filters.iter().zip(filters.iter_mut()) {
        info!("{}", spec.describe());
        traverse(filter, tree, config.view)?;
    }

    // Flattening always reshapes the project view, whichever view is shown.
    if config.flatten {
        flatten(tree)?;
    }

    if config.sort_by_completion {
        info!("sort by task completion");
        let mut sorter = match config.now {
            Some(now) => CompletionSorter::with_now(now),
            None => CompletionSorter::new(),
        };
        traverse(&mut sorter, tree, config.view)?;
    }

    if config.prune {
        info!("pruning empty folders, projects, contexts");
        traverse(&mut Pruner, tree, config.view)?;
    }

    Ok(())
}
