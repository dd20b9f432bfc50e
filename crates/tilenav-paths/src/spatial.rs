//! Path operations on 3D grids (26-connected).
//!
//! The same operations as [`planar`](crate::planar), over a [`TileGrid3`].
//! The `y` axis is elevation: movement policies look for walls at `y - 1`
//! and `y + 1`, and edge diagonals that change `y` follow the vertical
//! edge policy.

use std::sync::Arc;

use tilenav_core::{Context, Point3, TileGrid3};

use crate::direct;
use crate::error::PathError;
use crate::neighbors3::SpatialAdjacency;
use crate::pathgrid::{self, PathGrid3};
use crate::pathmap::{self, PathMap3};
use crate::policy::PathfindingPolicy3;
use crate::search::Hooks;
use crate::task::{PathTask, Progress, progress_ref};

/// Shortest paths from every tile within `max_distance` of `target`
/// (`max_distance <= 0` means unbounded).
pub fn generate_path_map<G: TileGrid3>(
    grid: &G,
    target: Point3,
    max_distance: f64,
    policy: PathfindingPolicy3,
) -> Result<PathMap3, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    pathmap::generate(&adj, target, max_distance, Hooks::default())
}

/// [`generate_path_map`] with cancellation and progress reporting.
pub fn generate_path_map_with<G: TileGrid3>(
    grid: &G,
    target: Point3,
    max_distance: f64,
    policy: PathfindingPolicy3,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<PathMap3, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    pathmap::generate(&adj, target, max_distance, Hooks::new(ctx, progress))
}

/// [`generate_path_map`] on a background thread.
pub fn generate_path_map_async<G>(
    grid: Arc<G>,
    target: Point3,
    max_distance: f64,
    policy: PathfindingPolicy3,
    progress: Option<Progress>,
) -> PathTask<PathMap3, Point3>
where
    G: TileGrid3 + Send + Sync + 'static,
{
    PathTask::spawn(move |ctx| {
        let mut progress = progress;
        generate_path_map_with(
            &*grid,
            target,
            max_distance,
            policy,
            ctx,
            progress_ref(&mut progress),
        )
    })
}

/// A path map for every walkable tile of `grid`.
pub fn generate_path_grid<G: TileGrid3>(
    grid: &G,
    policy: PathfindingPolicy3,
) -> Result<PathGrid3, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    pathgrid::build(&adj, Hooks::default())
}

pub fn generate_path_grid_with<G: TileGrid3>(
    grid: &G,
    policy: PathfindingPolicy3,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<PathGrid3, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    pathgrid::build(&adj, Hooks::new(ctx, progress))
}

pub fn generate_path_grid_async<G>(
    grid: Arc<G>,
    policy: PathfindingPolicy3,
    progress: Option<Progress>,
) -> PathTask<PathGrid3, Point3>
where
    G: TileGrid3 + Send + Sync + 'static,
{
    PathTask::spawn(move |ctx| {
        let mut progress = progress;
        generate_path_grid_with(&*grid, policy, ctx, progress_ref(&mut progress))
    })
}

/// Shortest path from `start` to `destination`, or an empty path if there
/// is none.
pub fn calculate_path<G: TileGrid3>(
    grid: &G,
    start: Point3,
    destination: Point3,
    policy: PathfindingPolicy3,
    include_start: bool,
    include_destination: bool,
) -> Result<Vec<Point3>, PathError<Point3>> {
    calculate_path_to_any(
        grid,
        start,
        &[destination],
        policy,
        include_start,
        include_destination,
    )
}

/// Shortest path from `start` to the nearest of `destinations`, or an empty
/// path if none is reachable.
pub fn calculate_path_to_any<G: TileGrid3>(
    grid: &G,
    start: Point3,
    destinations: &[Point3],
    policy: PathfindingPolicy3,
    include_start: bool,
    include_destination: bool,
) -> Result<Vec<Point3>, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    direct::calculate(
        &adj,
        start,
        destinations,
        include_start,
        include_destination,
        Hooks::default(),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_path_to_any_with<G: TileGrid3>(
    grid: &G,
    start: Point3,
    destinations: &[Point3],
    policy: PathfindingPolicy3,
    include_start: bool,
    include_destination: bool,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<Vec<Point3>, PathError<Point3>> {
    let adj = SpatialAdjacency::new(grid, policy);
    direct::calculate(
        &adj,
        start,
        destinations,
        include_start,
        include_destination,
        Hooks::new(ctx, progress),
    )
}

pub fn calculate_path_to_any_async<G>(
    grid: Arc<G>,
    start: Point3,
    destinations: Vec<Point3>,
    policy: PathfindingPolicy3,
    include_start: bool,
    include_destination: bool,
    progress: Option<Progress>,
) -> PathTask<Vec<Point3>, Point3>
where
    G: TileGrid3 + Send + Sync + 'static,
{
    PathTask::spawn(move |ctx| {
        let mut progress = progress;
        calculate_path_to_any_with(
            &*grid,
            start,
            &destinations,
            policy,
            include_start,
            include_destination,
            ctx,
            progress_ref(&mut progress),
        )
    })
}

/// [`calculate_path`] on a background thread.
pub fn calculate_path_async<G>(
    grid: Arc<G>,
    start: Point3,
    destination: Point3,
    policy: PathfindingPolicy3,
    include_start: bool,
    include_destination: bool,
    progress: Option<Progress>,
) -> PathTask<Vec<Point3>, Point3>
where
    G: TileGrid3 + Send + Sync + 'static,
{
    calculate_path_to_any_async(
        grid,
        start,
        vec![destination],
        policy,
        include_start,
        include_destination,
        progress,
    )
}
