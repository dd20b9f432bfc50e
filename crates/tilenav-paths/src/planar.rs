//! Path operations on 2D grids (8-connected).
//!
//! Every operation comes in three flavours: a plain synchronous call, a
//! `_with` variant that observes a [`Context`] and reports progress, and an
//! `_async` variant that runs the `_with` variant on a background thread and
//! returns a [`PathTask`].

use std::sync::Arc;

use tilenav_core::{Context, Point, TileGrid};

use crate::direct;
use crate::error::PathError;
use crate::neighbors::PlanarAdjacency;
use crate::pathgrid::{self, PathGrid2};
use crate::pathmap::{self, PathMap2};
use crate::policy::PathfindingPolicy;
use crate::search::Hooks;
use crate::task::{PathTask, Progress, progress_ref};

/// Shortest paths from every tile within `max_distance` of `target`
/// (`max_distance <= 0` means unbounded).
pub fn generate_path_map<G: TileGrid>(
    grid: &G,
    target: Point,
    max_distance: f64,
    policy: PathfindingPolicy,
) -> Result<PathMap2, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
    pathmap::generate(&adj, target, max_distance, Hooks::default())
}

/// [`generate_path_map`] with cancellation and progress reporting.
pub fn generate_path_map_with<G: TileGrid>(
    grid: &G,
    target: Point,
    max_distance: f64,
    policy: PathfindingPolicy,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<PathMap2, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
    pathmap::generate(&adj, target, max_distance, Hooks::new(ctx, progress))
}

/// [`generate_path_map`] on a background thread.
pub fn generate_path_map_async<G>(
    grid: Arc<G>,
    target: Point,
    max_distance: f64,
    policy: PathfindingPolicy,
    progress: Option<Progress>,
) -> PathTask<PathMap2, Point>
where
    G: TileGrid + Send + Sync + 'static,
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
pub fn generate_path_grid<G: TileGrid>(
    grid: &G,
    policy: PathfindingPolicy,
) -> Result<PathGrid2, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
    pathgrid::build(&adj, Hooks::default())
}

pub fn generate_path_grid_with<G: TileGrid>(
    grid: &G,
    policy: PathfindingPolicy,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<PathGrid2, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
    pathgrid::build(&adj, Hooks::new(ctx, progress))
}

pub fn generate_path_grid_async<G>(
    grid: Arc<G>,
    policy: PathfindingPolicy,
    progress: Option<Progress>,
) -> PathTask<PathGrid2, Point>
where
    G: TileGrid + Send + Sync + 'static,
{
    PathTask::spawn(move |ctx| {
        let mut progress = progress;
        generate_path_grid_with(&*grid, policy, ctx, progress_ref(&mut progress))
    })
}

/// Shortest path from `start` to `destination`, or an empty path if there
/// is none.
pub fn calculate_path<G: TileGrid>(
    grid: &G,
    start: Point,
    destination: Point,
    policy: PathfindingPolicy,
    include_start: bool,
    include_destination: bool,
) -> Result<Vec<Point>, PathError<Point>> {
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
pub fn calculate_path_to_any<G: TileGrid>(
    grid: &G,
    start: Point,
    destinations: &[Point],
    policy: PathfindingPolicy,
    include_start: bool,
    include_destination: bool,
) -> Result<Vec<Point>, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
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
pub fn calculate_path_to_any_with<G: TileGrid>(
    grid: &G,
    start: Point,
    destinations: &[Point],
    policy: PathfindingPolicy,
    include_start: bool,
    include_destination: bool,
    ctx: &Context,
    progress: Option<&mut dyn FnMut(f32)>,
) -> Result<Vec<Point>, PathError<Point>> {
    let adj = PlanarAdjacency::new(grid, policy);
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
    start: Point,
    destinations: Vec<Point>,
    policy: PathfindingPolicy,
    include_start: bool,
    include_destination: bool,
    progress: Option<Progress>,
) -> PathTask<Vec<Point>, Point>
where
    G: TileGrid + Send + Sync + 'static,
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
    start: Point,
    destination: Point,
    policy: PathfindingPolicy,
    include_start: bool,
    include_destination: bool,
    progress: Option<Progress>,
) -> PathTask<Vec<Point>, Point>
where
    G: TileGrid + Send + Sync + 'static,
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
