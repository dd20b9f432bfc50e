//! Weighted shortest paths on 2D and 3D tile grids.
//!
//! This crate builds reachability and distance information over grids whose
//! tiles implement [`Tile`](tilenav_core::Tile):
//!
//! - **Path maps**: every tile's cost, next step and full path towards one
//!   target ([`planar::generate_path_map`], [`spatial::generate_path_map`])
//! - **Path grids**: a path map per walkable tile, for queries between any
//!   two tiles ([`planar::generate_path_grid`])
//! - **Direct paths**: the shortest path from a start to the nearest of
//!   several destinations, stopping as soon as one is reached
//!   ([`planar::calculate_path_to_any`])
//!
//! 2D grids are 8-connected and 3D grids 26-connected. Which diagonals may be
//! taken, what they cost and whether movers must keep contact with a wall is
//! set by [`PathfindingPolicy`] and [`PathfindingPolicy3`].
//!
//! Each operation has a `_with` variant that observes a cancellation
//! [`Context`] and reports progress, and an `_async` variant that runs on a
//! background thread and returns a [`PathTask`].
//!
//! # Seams
//!
//! | Trait | Role |
//! |---|---|
//! | [`TileGrid`](tilenav_core::TileGrid), [`TileGrid3`](tilenav_core::TileGrid3) | Read access to caller-owned tiles |
//! | [`Adjacency`] | Admissible steps out of a cell, used by the search engine |

mod direct;
mod error;
mod neighbors;
mod neighbors3;
mod node;
mod pathgrid;
mod pathmap;
pub mod planar;
mod policy;
mod search;
pub mod spatial;
mod task;
mod traits;

#[cfg(test)]
mod testutil;

pub use error::PathError;
pub use neighbors::PlanarAdjacency;
pub use neighbors3::SpatialAdjacency;
pub use pathgrid::{PathGrid, PathGrid2, PathGrid3};
pub use pathmap::{PathMap, PathMap2, PathMap3, PathNode};
pub use policy::{
    DiagonalsPolicy, MovementsPolicy, PathfindingPolicy, PathfindingPolicy3,
    VerticesDiagonalsPolicy,
};
pub use task::{PathTask, Progress};
pub use tilenav_core::Context;
pub use traits::{Adjacency, CellInfo, Step, StepKind};
