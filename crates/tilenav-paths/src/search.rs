//! Label-correcting shortest-path search shared by path maps, path grids
//! and direct path queries.

use std::collections::BinaryHeap;

use tilenav_core::{Context, Coord};

use crate::error::PathError;
use crate::node::{FrontierEntry, Node, NodeMap};
use crate::traits::{Adjacency, CellInfo};

/// Cancellation and progress hooks for one search.
#[derive(Default)]
pub(crate) struct Hooks<'c, 'p> {
    pub(crate) ctx: Option<&'c Context>,
    pub(crate) progress: Option<&'p mut dyn FnMut(f32)>,
}

impl<'c, 'p> Hooks<'c, 'p> {
    pub(crate) fn new(ctx: &'c Context, progress: Option<&'p mut dyn FnMut(f32)>) -> Self {
        Self {
            ctx: Some(ctx),
            progress,
        }
    }

    #[inline]
    pub(crate) fn cancelled(&self) -> bool {
        self.ctx.is_some_and(Context::is_done)
    }

    #[inline]
    pub(crate) fn report(&mut self, value: f32) {
        if let Some(report) = self.progress.as_deref_mut() {
            report(value);
        }
    }
}

/// Outcome of a search: every discovered node, plus the node that stopped
/// the search early, if any.
#[derive(Debug)]
pub(crate) struct Explored<C> {
    pub(crate) nodes: NodeMap<C>,
    pub(crate) reached: Option<C>,
}

/// Run the search from `anchor`.
///
/// `anchor` must be walkable (`info` is its cell). A positive `max_distance`
/// bounds the cumulative cost; zero, negative or NaN means unbounded. `stop`
/// is evaluated for each node as it is finalized; returning `true` ends the
/// search with that node recorded in [`Explored::reached`].
pub(crate) fn explore<A: Adjacency>(
    adj: &A,
    anchor: A::Coord,
    info: CellInfo,
    max_distance: f64,
    mut hooks: Hooks<'_, '_>,
    mut stop: impl FnMut(A::Coord) -> bool,
) -> Result<Explored<A::Coord>, PathError<A::Coord>> {
    let bounded = max_distance > 0.0;
    let total = adj.cell_count().max(1) as f32;

    let mut nodes = NodeMap::new();
    nodes.insert(anchor, Node::anchor(anchor, info.weight));
    hooks.report(1.0 / total);

    let mut open: BinaryHeap<FrontierEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;
    open.push(FrontierEntry {
        distance: 0.0,
        seq,
        idx: 0,
    });

    let mut nbuf = Vec::with_capacity(26);
    let mut reached = None;

    while let Some(current) = open.pop() {
        let Some((&cp, cn)) = nodes.get_index(current.idx) else {
            continue;
        };
        // Skip stale entries.
        if current.distance > cn.distance {
            continue;
        }
        if stop(cp) {
            reached = Some(cp);
            break;
        }
        let current_distance = cn.distance;

        nbuf.clear();
        adj.neighbors(cp, &mut nbuf);

        for step in nbuf.iter() {
            debug_assert!(step.direction.is_unit_step());
            if hooks.cancelled() {
                log::debug!("search from {anchor} cancelled after {} tiles", nodes.len());
                return Err(PathError::OperationCancelled);
            }
            let tentative = current_distance + step.cost();
            if bounded && tentative > max_distance {
                continue;
            }

            let idx = match nodes.get_full_mut(&step.to) {
                Some((ni, _, n)) => {
                    if tentative >= n.distance {
                        continue;
                    }
                    n.distance = tentative;
                    n.next = cp;
                    n.direction = -step.direction;
                    ni
                }
                None => {
                    let (ni, _) = nodes.insert_full(
                        step.to,
                        Node {
                            weight: step.weight,
                            distance: tentative,
                            next: cp,
                            direction: -step.direction,
                        },
                    );
                    hooks.report(nodes.len() as f32 / total);
                    ni
                }
            };

            seq += 1;
            open.push(FrontierEntry {
                distance: tentative,
                seq,
                idx,
            });
        }
    }

    log::debug!(
        "search from {anchor} discovered {} of {} tiles",
        nodes.len(),
        adj.cell_count()
    );
    Ok(Explored { nodes, reached })
}

/// The cell at `c` if it exists and is walkable.
#[inline]
pub(crate) fn walkable_cell<A: Adjacency>(adj: &A, c: A::Coord) -> Option<CellInfo> {
    adj.cell(c).filter(|info| info.walkable)
}
