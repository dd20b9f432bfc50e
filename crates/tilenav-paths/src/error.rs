use std::fmt;

/// Errors raised by path generation and path queries.
///
/// `C` is the coordinate type of the grid ([`Point`](tilenav_core::Point)
/// or [`Point3`](tilenav_core::Point3)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError<C> {
    /// The anchor tile is missing or not walkable.
    InvalidAnchor { coord: C },
    /// The start or a destination of a direct path query is missing or not
    /// walkable. `coord` is `None` when no destination was given.
    InvalidDestinationSet { coord: Option<C> },
    /// A query named a tile absent from the reachable set.
    TileNotAccessible { coord: C },
    /// Cancellation was requested before the search finished.
    OperationCancelled,
    /// A background search ended without producing a result.
    WorkerLost,
}

impl<C: fmt::Display> fmt::Display for PathError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAnchor { coord } => {
                write!(f, "anchor tile {coord} is missing or not walkable")
            }
            Self::InvalidDestinationSet { coord: Some(coord) } => {
                write!(f, "path endpoint {coord} is missing or not walkable")
            }
            Self::InvalidDestinationSet { coord: None } => {
                write!(f, "no destination was given")
            }
            Self::TileNotAccessible { coord } => {
                write!(f, "tile {coord} is not accessible from the anchor")
            }
            Self::OperationCancelled => write!(f, "path search was cancelled"),
            Self::WorkerLost => write!(f, "path search worker terminated without a result"),
        }
    }
}

impl<C: fmt::Debug + fmt::Display> std::error::Error for PathError<C> {}
