//! **tilenav-core**: grid navigation core types.
//!
//! This crate provides the foundational types used by the *tilenav* path
//! engine: 2D/3D geometry primitives, the [`Tile`] capability trait, grid
//! accessors with configurable storage order, and a cooperative
//! cancellation [`Context`].

pub mod context;
pub mod geom;
pub mod grid;
pub mod tile;

pub use context::Context;
pub use geom::{Coord, Point, Point3, Range, RangeIter};
pub use grid::{Grid, Grid3, GridError, MajorOrder, MajorOrder3, TileGrid, TileGrid3};
pub use tile::Tile;
