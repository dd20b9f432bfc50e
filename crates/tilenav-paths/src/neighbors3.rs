//! 26-connected adjacency for 3D grids.

use tilenav_core::{Point3, Tile, TileGrid3};

use crate::policy::{MovementsPolicy, PathfindingPolicy3};
use crate::traits::{Adjacency, CellInfo, Step, StepKind, corners_allow};

/// Face steps, then edge diagonals, then vertex diagonals.
const DIRS: [Point3; 26] = directions();

const fn directions() -> [Point3; 26] {
    let mut out = [Point3::ZERO; 26];
    let mut n = 0;
    let mut axes = 1;
    while axes <= 3 {
        let mut dz = -1;
        while dz <= 1 {
            let mut dy = -1;
            while dy <= 1 {
                let mut dx = -1;
                while dx <= 1 {
                    let count = (dx != 0) as usize + (dy != 0) as usize + (dz != 0) as usize;
                    if count == axes {
                        out[n] = Point3::new(dx, dy, dz);
                        n += 1;
                    }
                    dx += 1;
                }
                dy += 1;
            }
            dz += 1;
        }
        axes += 1;
    }
    out
}

/// Adjacency evaluator for a [`TileGrid3`] under a [`PathfindingPolicy3`].
#[derive(Debug)]
pub struct SpatialAdjacency<'g, G> {
    grid: &'g G,
    policy: PathfindingPolicy3,
}

impl<'g, G: TileGrid3> SpatialAdjacency<'g, G> {
    pub fn new(grid: &'g G, policy: PathfindingPolicy3) -> Self {
        Self { grid, policy }
    }

    #[inline]
    fn walkable(&self, p: Point3) -> bool {
        self.grid.get(p).is_some_and(|t| t.is_walkable())
    }

    #[inline]
    fn wall(&self, p: Point3) -> bool {
        self.grid.get(p).is_some_and(|t| !t.is_walkable())
    }

    fn touches_surface(&self, p: Point3) -> bool {
        let m = self.policy.movements;
        if m.is_empty() {
            return true;
        }
        (m.contains(MovementsPolicy::WALL_BELOW) && self.wall(p.shift(0, -1, 0)))
            || (m.contains(MovementsPolicy::WALL_ASIDE)
                && (self.wall(p.shift(-1, 0, 0))
                    || self.wall(p.shift(1, 0, 0))
                    || self.wall(p.shift(0, 0, -1))
                    || self.wall(p.shift(0, 0, 1))))
            || (m.contains(MovementsPolicy::WALL_ABOVE) && self.wall(p.shift(0, 1, 0)))
    }

    /// Gate and multiplier for a diagonal step, or `None` if disallowed.
    fn diagonal(&self, p: Point3, d: Point3) -> Option<(StepKind, f64)> {
        let walkable = |c| self.walkable(c);
        if d.nonzero_axes() == 3 {
            let corners = [
                p.shift(d.x, 0, 0),
                p.shift(0, d.y, 0),
                p.shift(0, 0, d.z),
                p.shift(d.x, d.y, 0),
                p.shift(d.x, 0, d.z),
                p.shift(0, d.y, d.z),
            ];
            return corners_allow(self.policy.vertices.required_free(), &corners, walkable)
                .then(|| (StepKind::VertexDiagonal, self.policy.effective_vertices_weight()));
        }
        let (policy, weight) = if d.y == 0 {
            (
                self.policy.horizontal_edges,
                self.policy.effective_horizontal_edges_weight(),
            )
        } else {
            (
                self.policy.vertical_edges,
                self.policy.effective_vertical_edges_weight(),
            )
        };
        // The two corners are the single-axis components of the step.
        let mut corners = [p; 2];
        let mut n = 0;
        for single in [
            Point3::new(d.x, 0, 0),
            Point3::new(0, d.y, 0),
            Point3::new(0, 0, d.z),
        ] {
            if single != Point3::ZERO {
                corners[n] = p + single;
                n += 1;
            }
        }
        corners_allow(policy.required_free(), &corners, walkable)
            .then_some((StepKind::EdgeDiagonal, weight))
    }
}

impl<G: TileGrid3> Adjacency for SpatialAdjacency<'_, G> {
    type Coord = Point3;
    type Policy = PathfindingPolicy3;

    #[inline]
    fn extent(&self) -> Point3 {
        self.grid.extent()
    }

    #[inline]
    fn cell(&self, p: Point3) -> Option<CellInfo> {
        self.grid.get(p).map(|t| CellInfo {
            walkable: t.is_walkable(),
            weight: t.weight().max(1.0),
        })
    }

    fn neighbors(&self, p: Point3, buf: &mut Vec<Step<Point3>>) {
        for dir in DIRS {
            let to = p + dir;
            let Some(tile) = self.grid.get(to) else {
                continue;
            };
            if !tile.is_walkable() {
                continue;
            }
            let (kind, multiplier) = if dir.nonzero_axes() == 1 {
                (StepKind::Straight, 1.0)
            } else {
                match self.diagonal(p, dir) {
                    Some(gate) => gate,
                    None => continue,
                }
            };
            if !self.touches_surface(to) {
                continue;
            }
            buf.push(Step {
                to,
                direction: dir,
                kind,
                multiplier,
                weight: tile.weight().max(1.0),
            });
        }
    }

    #[inline]
    fn policy(&self) -> &PathfindingPolicy3 {
        &self.policy
    }
}
