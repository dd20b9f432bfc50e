//! 8-connected adjacency for 2D grids.

use tilenav_core::{Point, Tile, TileGrid};

use crate::policy::{MovementsPolicy, PathfindingPolicy};
use crate::traits::{Adjacency, CellInfo, Step, StepKind, corners_allow};

/// Orthogonal steps first, then diagonals. The order feeds the frontier's
/// FIFO tie-break, so it is part of the observable behaviour.
const DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Adjacency evaluator for a [`TileGrid`] under a [`PathfindingPolicy`].
#[derive(Debug)]
pub struct PlanarAdjacency<'g, G> {
    grid: &'g G,
    policy: PathfindingPolicy,
}

impl<'g, G: TileGrid> PlanarAdjacency<'g, G> {
    pub fn new(grid: &'g G, policy: PathfindingPolicy) -> Self {
        Self { grid, policy }
    }

    #[inline]
    fn walkable(&self, p: Point) -> bool {
        self.grid.get(p).is_some_and(|t| t.is_walkable())
    }

    #[inline]
    fn wall(&self, p: Point) -> bool {
        self.grid.get(p).is_some_and(|t| !t.is_walkable())
    }

    /// Whether `p` satisfies the surface-contact constraints.
    fn touches_surface(&self, p: Point) -> bool {
        let m = self.policy.movements;
        if m.is_empty() {
            return true;
        }
        (m.contains(MovementsPolicy::WALL_BELOW) && self.wall(p.shift(0, -1)))
            || (m.contains(MovementsPolicy::WALL_ASIDE)
                && (self.wall(p.shift(-1, 0)) || self.wall(p.shift(1, 0))))
            || (m.contains(MovementsPolicy::WALL_ABOVE) && self.wall(p.shift(0, 1)))
    }
}

impl<G: TileGrid> Adjacency for PlanarAdjacency<'_, G> {
    type Coord = Point;
    type Policy = PathfindingPolicy;

    #[inline]
    fn extent(&self) -> Point {
        self.grid.extent()
    }

    #[inline]
    fn cell(&self, p: Point) -> Option<CellInfo> {
        self.grid.get(p).map(|t| CellInfo {
            walkable: t.is_walkable(),
            weight: t.weight().max(1.0),
        })
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Step<Point>>) {
        for dir in DIRS {
            let to = p + dir;
            let Some(tile) = self.grid.get(to) else {
                continue;
            };
            if !tile.is_walkable() {
                continue;
            }
            let (kind, multiplier) = if dir.x != 0 && dir.y != 0 {
                let corners = [p.shift(dir.x, 0), p.shift(0, dir.y)];
                if !corners_allow(self.policy.diagonals.required_free(), &corners, |c| {
                    self.walkable(c)
                }) {
                    continue;
                }
                (StepKind::EdgeDiagonal, self.policy.effective_diagonals_weight())
            } else {
                (StepKind::Straight, 1.0)
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
    fn policy(&self) -> &PathfindingPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DiagonalsPolicy;
    use crate::testutil::grid2;
    use tilenav_core::Coord;

    fn targets(adj: &impl Adjacency<Coord = Point>, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        adj.neighbors(p, &mut buf);
        let mut out: Vec<_> = buf.iter().map(|s| s.to).collect();
        out.sort();
        out
    }

    #[test]
    fn open_grid_all_diagonals() {
        let g = grid2(&["...", "...", "..."]);
        let policy =
            PathfindingPolicy::default().with_diagonals(DiagonalsPolicy::AllDiagonals, 1.5);
        let adj = PlanarAdjacency::new(&g, policy);
        let mut buf = Vec::new();
        adj.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
        for s in &buf {
            let expected = if s.direction.x != 0 && s.direction.y != 0 {
                1.5
            } else {
                1.0
            };
            assert_eq!(s.multiplier, expected);
            assert!(s.direction.is_unit_step());
            assert_eq!(s.to, Point::new(1, 1) + s.direction);
        }
    }

    #[test]
    fn corner_and_edge_of_grid() {
        let g = grid2(&["...", "...", "..."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        assert_eq!(
            targets(&adj, Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }

    #[test]
    fn diagonal_gating() {
        // Wall at (1, 0): the diagonal (0,0)->(1,1) has one free corner.
        let g = grid2(&[".#.", "...", "..."]);
        let from = Point::new(0, 0);
        let diag = Point::new(1, 1);
        let with = |policy| {
            let adj = PlanarAdjacency::new(
                &g,
                PathfindingPolicy::default().with_diagonals(policy, 2f64.sqrt()),
            );
            targets(&adj, from).contains(&diag)
        };
        assert!(!with(DiagonalsPolicy::None));
        assert!(!with(DiagonalsPolicy::Diagonal2Free));
        assert!(with(DiagonalsPolicy::Diagonal1Free));
        assert!(with(DiagonalsPolicy::AllDiagonals));
    }

    #[test]
    fn missing_cells_are_not_free_corners() {
        // Empty cell at (1, 0) counts as blocked for corner checks.
        let g = grid2(&[". .", "...", "..."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        assert!(!targets(&adj, Point::new(0, 0)).contains(&Point::new(1, 1)));
    }

    #[test]
    fn walls_and_weights() {
        let g = grid2(&[".#.", ".5.", "..."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        let mut buf = Vec::new();
        adj.neighbors(Point::new(0, 0), &mut buf);
        assert!(buf.iter().all(|s| s.to != Point::new(1, 0)));
        let heavy = buf.iter().find(|s| s.to == Point::new(1, 1));
        // (1, 1) is diagonal behind a wall corner, so only reachable with looser gating.
        assert!(heavy.is_none());
        buf.clear();
        adj.neighbors(Point::new(1, 2), &mut buf);
        let heavy = buf.iter().find(|s| s.to == Point::new(1, 1)).unwrap();
        assert_eq!(heavy.weight, 5.0);
        assert_eq!(heavy.cost(), 5.0);
    }

    #[test]
    fn wall_below_movement() {
        // Row y=0 is solid; only row y=1 rests on it.
        let g = grid2(&["###", "...", "..."]);
        let policy = PathfindingPolicy::default()
            .with_diagonals(DiagonalsPolicy::AllDiagonals, 2f64.sqrt())
            .with_movements(MovementsPolicy::WALL_BELOW);
        let adj = PlanarAdjacency::new(&g, policy);
        assert_eq!(
            targets(&adj, Point::new(1, 1)),
            vec![Point::new(0, 1), Point::new(2, 1)]
        );
    }

    #[test]
    fn wall_aside_and_above_movement() {
        let g = grid2(&["...", "#..", "..."]);
        let aside = PlanarAdjacency::new(
            &g,
            PathfindingPolicy::default().with_movements(MovementsPolicy::WALL_ASIDE),
        );
        // Only cells horizontally adjacent to the wall at (0, 1) are enterable.
        assert_eq!(targets(&aside, Point::new(2, 1)), vec![Point::new(1, 1)]);

        let above = PlanarAdjacency::new(
            &g,
            PathfindingPolicy::default().with_movements(MovementsPolicy::WALL_ABOVE),
        );
        assert_eq!(targets(&above, Point::new(1, 0)), vec![Point::new(0, 0)]);
    }

    #[test]
    fn out_of_grid_is_not_a_wall() {
        let g = grid2(&["...", "..."]);
        let adj = PlanarAdjacency::new(
            &g,
            PathfindingPolicy::default().with_movements(MovementsPolicy::WALL_BELOW),
        );
        assert!(targets(&adj, Point::new(1, 1)).is_empty());
    }
}
