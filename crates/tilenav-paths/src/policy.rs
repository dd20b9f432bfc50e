//! Movement policies: which diagonal steps are allowed, what they cost, and
//! whether an agent must keep in contact with a surface.

use bitflags::bitflags;

/// Gate applied to edge-diagonal steps, based on the two orthogonal
/// "corner" tiles shared by the source and the diagonal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagonalsPolicy {
    /// No diagonal steps.
    None,
    /// Both corner tiles must be walkable.
    #[default]
    Diagonal2Free,
    /// At least one corner tile must be walkable.
    Diagonal1Free,
    /// Corners are ignored.
    AllDiagonals,
}

impl DiagonalsPolicy {
    /// Minimum number of walkable corner tiles, or `None` when diagonals
    /// are disallowed.
    #[inline]
    pub const fn required_free(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Diagonal2Free => Some(2),
            Self::Diagonal1Free => Some(1),
            Self::AllDiagonals => Some(0),
        }
    }
}

/// Gate applied to vertex-diagonal steps (3D), based on the six face and
/// edge tiles surrounding the shared corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticesDiagonalsPolicy {
    /// No vertex-diagonal steps.
    None,
    /// All six surrounding tiles must be walkable.
    #[default]
    Diagonal6Free,
    Diagonal5Free,
    Diagonal4Free,
    Diagonal3Free,
    Diagonal2Free,
    /// At least one surrounding tile must be walkable.
    Diagonal1Free,
    /// Surrounding tiles are ignored.
    AllDiagonals,
}

impl VerticesDiagonalsPolicy {
    /// Minimum number of walkable surrounding tiles, or `None` when vertex
    /// diagonals are disallowed.
    #[inline]
    pub const fn required_free(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Diagonal6Free => Some(6),
            Self::Diagonal5Free => Some(5),
            Self::Diagonal4Free => Some(4),
            Self::Diagonal3Free => Some(3),
            Self::Diagonal2Free => Some(2),
            Self::Diagonal1Free => Some(1),
            Self::AllDiagonals => Some(0),
        }
    }
}

bitflags! {
    /// Surface-contact constraints. A tile is enterable only if at least one
    /// of the selected relative positions holds a non-walkable tile. The
    /// empty set means free flight.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MovementsPolicy: u8 {
        /// A wall directly below (`y - 1`).
        const WALL_BELOW = 0b0000_0001;
        /// A wall on any horizontal side.
        const WALL_ASIDE = 0b0000_0010;
        /// A wall directly above (`y + 1`).
        const WALL_ABOVE = 0b0000_0100;
    }
}

#[inline]
fn clamp_weight(w: f64) -> f64 {
    // `max` maps NaN to 1 as well.
    w.max(1.0)
}

// ---------------------------------------------------------------------------
// 2D
// ---------------------------------------------------------------------------

/// Policy for 8-connected 2D grids.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindingPolicy {
    pub diagonals: DiagonalsPolicy,
    /// Cost multiplier of a diagonal step. Clamped to at least 1.
    pub diagonals_weight: f64,
    pub movements: MovementsPolicy,
}

impl Default for PathfindingPolicy {
    fn default() -> Self {
        Self {
            diagonals: DiagonalsPolicy::default(),
            diagonals_weight: std::f64::consts::SQRT_2,
            movements: MovementsPolicy::empty(),
        }
    }
}

impl PathfindingPolicy {
    /// Replace the diagonal gate and its cost multiplier.
    pub fn with_diagonals(mut self, policy: DiagonalsPolicy, weight: f64) -> Self {
        self.diagonals = policy;
        self.diagonals_weight = weight;
        self
    }

    /// Replace the surface-contact constraints.
    pub fn with_movements(mut self, movements: MovementsPolicy) -> Self {
        self.movements = movements;
        self
    }

    /// Diagonal multiplier as used by the engine.
    #[inline]
    pub fn effective_diagonals_weight(&self) -> f64 {
        clamp_weight(self.diagonals_weight)
    }
}

// ---------------------------------------------------------------------------
// 3D
// ---------------------------------------------------------------------------

/// Policy for 26-connected 3D grids.
///
/// Horizontal edge diagonals keep the same elevation and change `x` and `z`;
/// vertical edge diagonals change the elevation and one other axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindingPolicy3 {
    pub horizontal_edges: DiagonalsPolicy,
    pub horizontal_edges_weight: f64,
    pub vertical_edges: DiagonalsPolicy,
    pub vertical_edges_weight: f64,
    pub vertices: VerticesDiagonalsPolicy,
    pub vertices_weight: f64,
    pub movements: MovementsPolicy,
}

impl Default for PathfindingPolicy3 {
    fn default() -> Self {
        Self {
            horizontal_edges: DiagonalsPolicy::default(),
            horizontal_edges_weight: std::f64::consts::SQRT_2,
            vertical_edges: DiagonalsPolicy::default(),
            vertical_edges_weight: std::f64::consts::SQRT_2,
            vertices: VerticesDiagonalsPolicy::default(),
            vertices_weight: 3f64.sqrt(),
            movements: MovementsPolicy::empty(),
        }
    }
}

impl PathfindingPolicy3 {
    /// Policy allowing only the six face neighbours.
    pub fn faces_only() -> Self {
        Self::default()
            .with_horizontal_edges(DiagonalsPolicy::None, std::f64::consts::SQRT_2)
            .with_vertical_edges(DiagonalsPolicy::None, std::f64::consts::SQRT_2)
            .with_vertices(VerticesDiagonalsPolicy::None, 3f64.sqrt())
    }

    /// Replace the horizontal edge-diagonal gate and multiplier.
    pub fn with_horizontal_edges(mut self, policy: DiagonalsPolicy, weight: f64) -> Self {
        self.horizontal_edges = policy;
        self.horizontal_edges_weight = weight;
        self
    }

    /// Replace the vertical edge-diagonal gate and multiplier.
    pub fn with_vertical_edges(mut self, policy: DiagonalsPolicy, weight: f64) -> Self {
        self.vertical_edges = policy;
        self.vertical_edges_weight = weight;
        self
    }

    /// Replace the vertex-diagonal gate and multiplier.
    pub fn with_vertices(mut self, policy: VerticesDiagonalsPolicy, weight: f64) -> Self {
        self.vertices = policy;
        self.vertices_weight = weight;
        self
    }

    /// Replace the surface-contact constraints.
    pub fn with_movements(mut self, movements: MovementsPolicy) -> Self {
        self.movements = movements;
        self
    }

    #[inline]
    pub fn effective_horizontal_edges_weight(&self) -> f64 {
        clamp_weight(self.horizontal_edges_weight)
    }

    #[inline]
    pub fn effective_vertical_edges_weight(&self) -> f64 {
        clamp_weight(self.vertical_edges_weight)
    }

    #[inline]
    pub fn effective_vertices_weight(&self) -> f64 {
        clamp_weight(self.vertices_weight)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn policy_round_trip() {
        let p = PathfindingPolicy::default()
            .with_diagonals(DiagonalsPolicy::Diagonal1Free, 1.5)
            .with_movements(MovementsPolicy::WALL_BELOW | MovementsPolicy::WALL_ASIDE);
        let json = serde_json::to_string(&p).unwrap();
        let back: PathfindingPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let back: PathfindingPolicy3 =
            serde_json::from_str(r#"{ "vertices": "AllDiagonals" }"#).unwrap();
        assert_eq!(back.vertices, VerticesDiagonalsPolicy::AllDiagonals);
        assert_eq!(back.horizontal_edges, DiagonalsPolicy::Diagonal2Free);
        assert!(back.movements.is_empty());
    }
}
