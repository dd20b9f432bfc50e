use tilenav_core::{Coord, Point, Point3};

use crate::error::PathError;
use crate::pathmap::{self, PathMap};
use crate::policy::{PathfindingPolicy, PathfindingPolicy3};
use crate::search::{self, Hooks};
use crate::traits::Adjacency;

/// One [`PathMap`] per walkable tile, answering queries between any two
/// tiles.
///
/// Maps are stored densely by linear index over the grid extent; slots for
/// missing or non-walkable tiles are empty.
#[derive(Debug, Clone)]
pub struct PathGrid<C, P> {
    maps: Vec<Option<PathMap<C, P>>>,
    extent: C,
    policy: P,
}

/// Path grid over a 2D grid.
pub type PathGrid2 = PathGrid<Point, PathfindingPolicy>;
/// Path grid over a 3D grid.
pub type PathGrid3 = PathGrid<Point3, PathfindingPolicy3>;

impl<C: Coord, P> PathGrid<C, P> {
    /// Extent of the grid the maps were built from.
    #[inline]
    pub fn extent(&self) -> C {
        self.extent
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of stored maps, that is the number of walkable tiles.
    pub fn map_count(&self) -> usize {
        self.maps.iter().filter(|m| m.is_some()).count()
    }

    /// The map whose target is `destination`.
    pub fn path_map(&self, destination: C) -> Result<&PathMap<C, P>, PathError<C>> {
        destination
            .linear_index(self.extent)
            .and_then(|i| self.maps.get(i))
            .and_then(Option::as_ref)
            .ok_or(PathError::TileNotAccessible { coord: destination })
    }

    /// Whether `to` can be reached from `from`.
    pub fn is_tile_accessible(&self, from: C, to: C) -> bool {
        self.path_map(to)
            .is_ok_and(|map| map.is_tile_accessible(from))
    }

    /// First step from `from` towards `to`.
    pub fn next_tile(&self, from: C, to: C) -> Result<C, PathError<C>> {
        self.path_map(to)?.next_tile(from)
    }

    pub fn next_direction(&self, from: C, to: C) -> Result<C, PathError<C>> {
        self.path_map(to)?.next_direction(from)
    }

    /// Cost of the shortest path from `from` to `to`.
    pub fn distance(&self, from: C, to: C) -> Result<f64, PathError<C>> {
        self.path_map(to)?.distance(from)
    }

    /// Shortest path from `from` to `to`.
    pub fn path(
        &self,
        from: C,
        to: C,
        include_start: bool,
        include_destination: bool,
    ) -> Result<Vec<C>, PathError<C>> {
        self.path_map(to)?
            .path_to_target(from, include_start, include_destination)
    }
}

/// Build a path grid, running one unbounded search per walkable cell.
///
/// Progress is reported once per cell visited, as `visited / total`.
pub(crate) fn build<A: Adjacency>(
    adj: &A,
    mut hooks: Hooks<'_, '_>,
) -> Result<PathGrid<A::Coord, A::Policy>, PathError<A::Coord>> {
    let extent = adj.extent();
    let total = adj.cell_count();
    let mut maps = Vec::with_capacity(total);

    for i in 0..total {
        if hooks.cancelled() {
            log::debug!("path grid build cancelled at cell {i} of {total}");
            return Err(PathError::OperationCancelled);
        }
        let c = A::Coord::from_linear(i, extent);
        let map = match search::walkable_cell(adj, c) {
            Some(_) => {
                let inner = Hooks {
                    ctx: hooks.ctx,
                    progress: None,
                };
                Some(pathmap::generate(adj, c, 0.0, inner)?)
            }
            None => None,
        };
        maps.push(map);
        hooks.report((i + 1) as f32 / total as f32);
    }

    let grid = PathGrid {
        maps,
        extent,
        policy: adj.policy().clone(),
    };
    log::debug!(
        "path grid built: {} maps over {} cells",
        grid.map_count(),
        total
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::PlanarAdjacency;
    use crate::neighbors3::SpatialAdjacency;
    use crate::policy::DiagonalsPolicy;
    use crate::testutil::{grid2, grid3};
    use tilenav_core::Context;

    fn orthogonal() -> PathfindingPolicy {
        PathfindingPolicy::default().with_diagonals(DiagonalsPolicy::None, 1.0)
    }

    #[test]
    fn any_to_any_queries() {
        let g = grid2(&["..#", ".#.", "..."]);
        let adj = PlanarAdjacency::new(&g, orthogonal());
        let pg = build(&adj, Hooks::default()).unwrap();
        assert_eq!(pg.extent(), Point::new(3, 3));
        assert_eq!(pg.map_count(), 7);

        let a = Point::new(1, 0);
        let b = Point::new(2, 1);
        assert!(pg.is_tile_accessible(a, b));
        assert_eq!(pg.distance(a, b).unwrap(), 6.0);
        assert_eq!(pg.distance(b, a).unwrap(), 6.0);
        assert_eq!(pg.next_tile(a, b).unwrap(), Point::new(0, 0));
        assert_eq!(pg.next_direction(a, b).unwrap(), Point::new(-1, 0));
        let path = pg.path(a, b, true, true).unwrap();
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&b));
        assert_eq!(path.len(), 7);
        assert_eq!(pg.path(a, b, false, false).unwrap(), path[1..6].to_vec());
    }

    #[test]
    fn walls_have_no_map() {
        let g = grid2(&["..#", ".#.", "..."]);
        let adj = PlanarAdjacency::new(&g, orthogonal());
        let pg = build(&adj, Hooks::default()).unwrap();
        let wall = Point::new(2, 0);
        assert_eq!(
            pg.path_map(wall).unwrap_err(),
            PathError::TileNotAccessible { coord: wall }
        );
        assert!(!pg.is_tile_accessible(Point::new(0, 0), wall));
        assert!(!pg.is_tile_accessible(wall, Point::new(0, 0)));
        assert!(pg.path_map(Point::new(-1, 0)).is_err());
        assert_eq!(
            pg.distance(wall, Point::new(0, 0)).unwrap_err(),
            PathError::TileNotAccessible { coord: wall }
        );
    }

    #[test]
    fn disconnected_regions() {
        let g = grid2(&[".#."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        let pg = build(&adj, Hooks::default()).unwrap();
        let (a, b) = (Point::new(0, 0), Point::new(2, 0));
        assert!(!pg.is_tile_accessible(a, b));
        assert_eq!(
            pg.path(a, b, true, true).unwrap_err(),
            PathError::TileNotAccessible { coord: a }
        );
    }

    #[test]
    fn matches_individual_maps() {
        let g = grid2(&["...", ".3.", "..."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        let pg = build(&adj, Hooks::default()).unwrap();
        for to in tilenav_core::Range::new(0, 0, 3, 3) {
            let single = pathmap::generate(&adj, to, 0.0, Hooks::default()).unwrap();
            let stored = pg.path_map(to).unwrap();
            for node in single.iter() {
                assert_eq!(stored.distance(node.pos).unwrap(), node.distance);
            }
        }
    }

    #[test]
    fn progress_per_cell_and_cancel() {
        let g = grid2(&["..", "#."]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        let ctx = Context::new();
        let mut seen = Vec::new();
        let mut record = |v: f32| seen.push(v);
        build(&adj, Hooks::new(&ctx, Some(&mut record))).unwrap();
        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);

        ctx.cancel();
        assert_eq!(
            build(&adj, Hooks::new(&ctx, None)).unwrap_err(),
            PathError::OperationCancelled
        );
    }

    #[test]
    fn spatial_grid() {
        let g = grid3(&[&["..", ".."], &["#.", ".."]]);
        let adj = SpatialAdjacency::new(&g, crate::policy::PathfindingPolicy3::faces_only());
        let pg = build(&adj, Hooks::default()).unwrap();
        assert_eq!(pg.extent(), Point3::new(2, 2, 2));
        assert_eq!(pg.map_count(), 7);
        let (a, b) = (Point3::new(0, 0, 0), Point3::new(1, 1, 1));
        assert_eq!(pg.distance(a, b).unwrap(), 3.0);
        assert!(pg.path_map(Point3::new(0, 0, 1)).is_err());
    }
}
