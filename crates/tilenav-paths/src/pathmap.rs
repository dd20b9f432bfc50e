use tilenav_core::{Coord, Point, Point3};

use crate::error::PathError;
use crate::node::{Node, NodeMap, trace, trim_ends};
use crate::policy::{PathfindingPolicy, PathfindingPolicy3};
use crate::search::{self, Hooks};
use crate::traits::Adjacency;

/// A reachable tile as recorded in a [`PathMap`]. Only walkable tiles are
/// ever recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode<C> {
    pub pos: C,
    /// Neighbour one step closer to the target (the target itself for the
    /// target's own node).
    pub next: C,
    /// Unit offset towards `next`.
    pub direction: C,
    /// Cumulative cost from `pos` to the target.
    pub distance: f64,
    /// Effective weight of the tile.
    pub weight: f64,
}

impl<C: Copy> PathNode<C> {
    fn new(pos: C, node: &Node<C>) -> Self {
        Self {
            pos,
            next: node.next,
            direction: node.direction,
            distance: node.distance,
            weight: node.weight,
        }
    }
}

/// Shortest-path information from every tile reachable from a target.
///
/// A `PathMap` is an immutable snapshot: any later change to the grid's
/// walkability or weights makes it stale, and it should be regenerated.
#[derive(Debug, Clone)]
pub struct PathMap<C, P> {
    nodes: NodeMap<C>,
    target: C,
    max_distance: f64,
    policy: P,
}

/// Path map over a 2D grid.
pub type PathMap2 = PathMap<Point, PathfindingPolicy>;
/// Path map over a 3D grid.
pub type PathMap3 = PathMap<Point3, PathfindingPolicy3>;

impl<C: Coord, P> PathMap<C, P> {
    /// The tile every path leads to.
    #[inline]
    pub fn target(&self) -> C {
        self.target
    }

    /// Cost budget used to build the map (0 when unbounded).
    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Policy the map was built with.
    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of reachable tiles, target included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the target itself is reachable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `tile` has a path to the target.
    #[inline]
    pub fn is_tile_accessible(&self, tile: C) -> bool {
        self.nodes.contains_key(&tile)
    }

    fn node(&self, tile: C) -> Result<&Node<C>, PathError<C>> {
        self.nodes
            .get(&tile)
            .ok_or(PathError::TileNotAccessible { coord: tile })
    }

    /// Full record of a reachable tile.
    pub fn path_node(&self, tile: C) -> Result<PathNode<C>, PathError<C>> {
        self.node(tile).map(|n| PathNode::new(tile, n))
    }

    /// The neighbour to step onto to get closer to the target.
    pub fn next_tile(&self, tile: C) -> Result<C, PathError<C>> {
        self.node(tile).map(|n| n.next)
    }

    /// Unit offset of [`next_tile`](Self::next_tile) from `tile`.
    pub fn next_direction(&self, tile: C) -> Result<C, PathError<C>> {
        self.node(tile).map(|n| n.direction)
    }

    /// Cumulative cost from `tile` to the target.
    pub fn distance(&self, tile: C) -> Result<f64, PathError<C>> {
        self.node(tile).map(|n| n.distance)
    }

    /// Path from `tile` to the target.
    ///
    /// `include_start` keeps `tile` as the first element and `include_target`
    /// keeps the target as the last one.
    pub fn path_to_target(
        &self,
        tile: C,
        include_start: bool,
        include_target: bool,
    ) -> Result<Vec<C>, PathError<C>> {
        self.node(tile)?;
        Ok(trim_ends(
            trace(&self.nodes, tile),
            include_start,
            include_target,
        ))
    }

    /// Path from the target to `tile`: the reverse of
    /// [`path_to_target`](Self::path_to_target).
    pub fn path_from_target(
        &self,
        tile: C,
        include_target: bool,
        include_destination: bool,
    ) -> Result<Vec<C>, PathError<C>> {
        let mut path = self.path_to_target(tile, include_destination, include_target)?;
        path.reverse();
        Ok(path)
    }

    /// Every reachable tile in discovery order; the target comes first when
    /// `include_target` is set.
    pub fn accessible_tiles(&self, include_target: bool) -> Vec<C> {
        let skip = usize::from(!include_target);
        self.nodes.keys().skip(skip).copied().collect()
    }

    /// Iterate over reachable tiles in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = PathNode<C>> + '_ {
        self.nodes.iter().map(|(&pos, n)| PathNode::new(pos, n))
    }
}

/// Build a path map around `target` with the given evaluator.
pub(crate) fn generate<A: Adjacency>(
    adj: &A,
    target: A::Coord,
    max_distance: f64,
    hooks: Hooks<'_, '_>,
) -> Result<PathMap<A::Coord, A::Policy>, PathError<A::Coord>> {
    let info =
        search::walkable_cell(adj, target).ok_or(PathError::InvalidAnchor { coord: target })?;
    let explored = search::explore(adj, target, info, max_distance, hooks, |_| false)?;
    Ok(PathMap {
        nodes: explored.nodes,
        target,
        max_distance: if max_distance > 0.0 { max_distance } else { 0.0 },
        policy: adj.policy().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::PlanarAdjacency;
    use crate::policy::DiagonalsPolicy;
    use crate::testutil::grid2;

    fn corridor() -> PathMap2 {
        // An L-shaped corridor ending at (0, 0).
        let g = grid2(&["...#", "##.#", "##.."]);
        let policy = PathfindingPolicy::default().with_diagonals(DiagonalsPolicy::None, 1.0);
        let adj = PlanarAdjacency::new(&g, policy);
        generate(&adj, Point::new(0, 0), 0.0, Hooks::default()).unwrap()
    }

    #[test]
    fn queries_along_corridor() {
        let map = corridor();
        let end = Point::new(3, 2);
        assert_eq!(map.target(), Point::new(0, 0));
        assert_eq!(map.len(), 6);
        assert_eq!(map.distance(end).unwrap(), 5.0);
        assert_eq!(map.next_tile(end).unwrap(), Point::new(2, 2));
        assert_eq!(map.next_direction(end).unwrap(), Point::new(-1, 0));
        assert_eq!(map.next_direction(Point::new(2, 1)).unwrap(), Point::new(0, -1));
        assert_eq!(
            map.path_to_target(end, true, true).unwrap(),
            vec![
                Point::new(3, 2),
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(2, 0),
                Point::new(1, 0),
                Point::new(0, 0),
            ]
        );
        assert_eq!(
            map.path_from_target(end, false, true).unwrap(),
            vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
                Point::new(3, 2),
            ]
        );
    }

    #[test]
    fn target_queries() {
        let map = corridor();
        let t = map.target();
        assert_eq!(map.next_tile(t).unwrap(), t);
        assert_eq!(map.next_direction(t).unwrap(), Point::ZERO);
        assert_eq!(map.distance(t).unwrap(), 0.0);
        assert_eq!(map.path_to_target(t, true, true).unwrap(), vec![t]);
        assert!(map.path_to_target(t, false, true).unwrap().is_empty());
    }

    #[test]
    fn accessible_tiles_in_discovery_order() {
        let map = corridor();
        let all = map.accessible_tiles(true);
        assert_eq!(all[0], map.target());
        assert_eq!(all.len(), map.len());
        let others = map.accessible_tiles(false);
        assert_eq!(&all[1..], &others[..]);
        let iterated: Vec<_> = map.iter().map(|n| n.pos).collect();
        assert_eq!(iterated, all);
    }

    #[test]
    fn unreachable_tiles_fail() {
        let map = corridor();
        let wall = Point::new(3, 0);
        assert!(!map.is_tile_accessible(wall));
        let err = PathError::TileNotAccessible { coord: wall };
        assert_eq!(map.distance(wall).unwrap_err(), err);
        assert_eq!(map.next_tile(wall).unwrap_err(), err);
        assert_eq!(map.path_to_target(wall, true, true).unwrap_err(), err);
        assert_eq!(map.path_node(Point::new(9, 9)).unwrap_err(), PathError::TileNotAccessible {
            coord: Point::new(9, 9)
        });
    }

    #[test]
    fn invalid_anchor() {
        let g = grid2(&[".#", ". "]);
        let adj = PlanarAdjacency::new(&g, PathfindingPolicy::default());
        for p in [Point::new(1, 0), Point::new(1, 1), Point::new(5, 5)] {
            assert_eq!(
                generate(&adj, p, 0.0, Hooks::default()).unwrap_err(),
                PathError::InvalidAnchor { coord: p }
            );
        }
    }

    #[test]
    fn path_node_record() {
        let map = corridor();
        let n = map.path_node(Point::new(2, 1)).unwrap();
        assert_eq!(n.pos, Point::new(2, 1));
        assert_eq!(n.next, Point::new(2, 0));
        assert_eq!(n.distance, 3.0);
        assert_eq!(n.weight, 1.0);
    }
}
