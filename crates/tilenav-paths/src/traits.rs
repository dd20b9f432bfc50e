use std::fmt;

use tilenav_core::Coord;

/// Walkability and effective weight of a cell, as read from its tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInfo {
    pub walkable: bool,
    /// Entry cost, already clamped to at least 1.
    pub weight: f64,
}

/// Shape of a step between neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Changes a single axis.
    Straight,
    /// Changes exactly two axes.
    EdgeDiagonal,
    /// Changes all three axes (3D only).
    VertexDiagonal,
}

/// An admissible move from a cell into one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<C> {
    /// The neighbour being entered.
    pub to: C,
    /// Unit offset from the source to `to`.
    pub direction: C,
    pub kind: StepKind,
    /// Cost multiplier for this kind of step (1 for straight steps).
    pub multiplier: f64,
    /// Effective weight of `to`.
    pub weight: f64,
}

impl<C> Step<C> {
    /// Cost of taking this step.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.weight * self.multiplier
    }
}

/// Neighbourhood evaluator used by the search engine.
///
/// Implementations apply grid bounds, walkability, diagonal gating and
/// surface-contact rules, and only ever read the grid.
pub trait Adjacency {
    /// Coordinate type of the grid.
    type Coord: Coord;
    /// Policy snapshot stored with every result.
    type Policy: Clone + fmt::Debug;

    /// Grid extents.
    fn extent(&self) -> Self::Coord;

    /// Total number of grid cells, walkable or not.
    #[inline]
    fn cell_count(&self) -> usize {
        Self::Coord::volume(self.extent())
    }

    /// Tile information at `c`, or `None` when out of bounds or empty.
    fn cell(&self, c: Self::Coord) -> Option<CellInfo>;

    /// Append the admissible steps out of `c` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, c: Self::Coord, buf: &mut Vec<Step<Self::Coord>>);

    /// The policy this evaluator applies.
    fn policy(&self) -> &Self::Policy;
}

/// Whether a diagonal step is allowed given how many of its surrounding
/// cells are walkable. Cells are only inspected until the answer is known.
pub(crate) fn corners_allow<C: Copy>(
    required: Option<usize>,
    corners: &[C],
    walkable: impl Fn(C) -> bool,
) -> bool {
    let Some(required) = required else {
        return false;
    };
    if required == 0 {
        return true;
    }
    let mut free = 0;
    for (i, &c) in corners.iter().enumerate() {
        if walkable(c) {
            free += 1;
            if free >= required {
                return true;
            }
        }
        if free + (corners.len() - i - 1) < required {
            return false;
        }
    }
    false
}
