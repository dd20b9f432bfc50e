//! Early-exit path queries from a start tile to the nearest of several
//! destinations.

use std::collections::HashSet;

use crate::error::PathError;
use crate::node::{trace, trim_ends};
use crate::search::{self, Hooks};
use crate::traits::Adjacency;

/// Shortest path from `start` to whichever of `destinations` is finalized
/// first by the search.
///
/// The start and every destination must be walkable, otherwise
/// [`PathError::InvalidDestinationSet`] names the offending tile. An empty
/// destination list is rejected the same way with `coord: None`. If no
/// destination is reachable the result is an empty path.
pub(crate) fn calculate<A: Adjacency>(
    adj: &A,
    start: A::Coord,
    destinations: &[A::Coord],
    include_start: bool,
    include_destination: bool,
    hooks: Hooks<'_, '_>,
) -> Result<Vec<A::Coord>, PathError<A::Coord>> {
    if destinations.is_empty() {
        return Err(PathError::InvalidDestinationSet { coord: None });
    }
    let info = search::walkable_cell(adj, start)
        .ok_or(PathError::InvalidDestinationSet { coord: Some(start) })?;
    if let Some(&bad) = destinations
        .iter()
        .find(|&&d| search::walkable_cell(adj, d).is_none())
    {
        return Err(PathError::InvalidDestinationSet { coord: Some(bad) });
    }

    let wanted: HashSet<A::Coord> = destinations.iter().copied().collect();
    let explored = search::explore(adj, start, info, 0.0, hooks, |c| wanted.contains(&c))?;
    let Some(reached) = explored.reached else {
        log::debug!("no destination reachable from {start}");
        return Ok(Vec::new());
    };

    let mut path = trace(&explored.nodes, reached);
    path.reverse();
    log::debug!(
        "path from {start} to {reached}: {} steps, {} tiles explored",
        path.len().saturating_sub(1),
        explored.nodes.len()
    );
    Ok(trim_ends(path, include_start, include_destination))
}
