use crate::geom::Coord;

/// Read-only capability set the path engine needs from a tile.
///
/// Tiles are identified by their coordinates, never by identity: two
/// distinct values with equal coordinates denote the same graph node.
pub trait Tile {
    /// Coordinate type ([`Point`](crate::Point) or [`Point3`](crate::Point3)).
    type Coord: Coord;

    /// Whether an agent may stand on this tile.
    fn is_walkable(&self) -> bool;

    /// Cost of entering this tile. Values below 1 are treated as 1.
    fn weight(&self) -> f64 {
        1.0
    }

    /// Position of the tile in its grid.
    fn coord(&self) -> Self::Coord;
}

impl<T: Tile + ?Sized> Tile for &T {
    type Coord = T::Coord;

    #[inline]
    fn is_walkable(&self) -> bool {
        (**self).is_walkable()
    }

    #[inline]
    fn weight(&self) -> f64 {
        (**self).weight()
    }

    #[inline]
    fn coord(&self) -> Self::Coord {
        (**self).coord()
    }
}
