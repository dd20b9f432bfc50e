//! Geometry primitives: [`Point`], [`Point3`], [`Range`] and the [`Coord`]
//! trait that lets grid algorithms be written once for both.
//!
//! The `y` axis is the elevation axis in both dimensionalities: "below" a
//! cell is `y - 1` and "above" is `y + 1`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

/// An integer grid coordinate with a dense linearisation.
///
/// Implemented by [`Point`] and [`Point3`]. The linear index is canonical
/// (x fastest, then y, then z) and independent of any storage order a grid
/// accessor may use.
pub trait Coord:
    Copy
    + Eq
    + Hash
    + Ord
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
{
    /// Number of axes (2 or 3).
    const AXES: usize;

    /// The origin, also used as the "no step" direction.
    const ORIGIN: Self;

    /// Number of cells in a box of the given extent (0 if any axis is ≤ 0).
    fn volume(extent: Self) -> usize;

    /// Canonical flat index of `self` inside `[0, extent)`, or `None` when
    /// out of bounds.
    fn linear_index(self, extent: Self) -> Option<usize>;

    /// Inverse of [`linear_index`](Self::linear_index). `index` must be
    /// smaller than `volume(extent)`.
    fn from_linear(index: usize, extent: Self) -> Self;

    /// Whether every component is in `-1..=1` and at least one is non-zero.
    fn is_unit_step(self) -> bool;
}

/// Component-wise `+`, `-`, unary `-` and scaling by `i32`.
macro_rules! componentwise_ops {
    ($ty:ident { $($f:ident),+ }) => {
        impl Add for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($f: self.$f + rhs.$f),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($f: self.$f - rhs.$f),+ }
            }
        }

        impl Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($f: -self.$f),+ }
            }
        }

        impl Mul<i32> for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, k: i32) -> Self {
                Self { $($f: self.$f * k),+ }
            }
        }
    };
}

/// A 2D cell coordinate. `x` grows to the right, `y` grows upwards.
///
/// Ordered by `y`, then `x`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self + (dx, dy)`, usable in const contexts.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Orthogonal neighbours, starting below and turning counter-clockwise.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [(0, -1), (1, 0), (0, 1), (-1, 0)].map(|(dx, dy)| self.shift(dx, dy))
    }
}

componentwise_ops!(Point { x, y });

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coord for Point {
    const AXES: usize = 2;
    const ORIGIN: Self = Self::ZERO;

    #[inline]
    fn volume(extent: Self) -> usize {
        usize::try_from(extent.x).unwrap_or(0) * usize::try_from(extent.y).unwrap_or(0)
    }

    #[inline]
    fn linear_index(self, extent: Self) -> Option<usize> {
        let inside = (0..extent.x).contains(&self.x) && (0..extent.y).contains(&self.y);
        inside.then(|| self.y as usize * extent.x as usize + self.x as usize)
    }

    #[inline]
    fn from_linear(index: usize, extent: Self) -> Self {
        let w = extent.x.max(1) as usize;
        Self::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    fn is_unit_step(self) -> bool {
        self != Self::ZERO && self.x.abs().max(self.y.abs()) == 1
    }
}

/// A 3D cell coordinate; `y` is elevation.
///
/// Ordered by `z`, then `y`, then `x`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// How many components are non-zero: 1 for a face step, 2 for an edge
    /// diagonal, 3 for a vertex diagonal.
    #[inline]
    pub fn nonzero_axes(self) -> usize {
        [self.x, self.y, self.z].iter().filter(|&&c| c != 0).count()
    }
}

componentwise_ops!(Point3 { x, y, z });

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.z, self.y, self.x).cmp(&(other.z, other.y, other.x))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Coord for Point3 {
    const AXES: usize = 3;
    const ORIGIN: Self = Self::ZERO;

    #[inline]
    fn volume(extent: Self) -> usize {
        [extent.x, extent.y, extent.z]
            .iter()
            .map(|&n| usize::try_from(n).unwrap_or(0))
            .product()
    }

    #[inline]
    fn linear_index(self, extent: Self) -> Option<usize> {
        let inside = (0..extent.x).contains(&self.x)
            && (0..extent.y).contains(&self.y)
            && (0..extent.z).contains(&self.z);
        let (w, h) = (extent.x as usize, extent.y as usize);
        inside.then(|| (self.z as usize * h + self.y as usize) * w + self.x as usize)
    }

    #[inline]
    fn from_linear(index: usize, extent: Self) -> Self {
        let w = extent.x.max(1) as usize;
        let layer = w * extent.y.max(1) as usize;
        Self::new(
            (index % w) as i32,
            (index % layer / w) as i32,
            (index / layer) as i32,
        )
    }

    #[inline]
    fn is_unit_step(self) -> bool {
        self != Self::ZERO && self.x.abs().max(self.y.abs()).max(self.z.abs()) == 1
    }
}

/// A half-open rectangle of 2D cells, `origin` inclusive and
/// `origin + size` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub origin: Point,
    pub size: Point,
}

impl Range {
    /// The rectangle spanned by two corners, in any order. The larger corner
    /// is exclusive.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            origin: Point::new(x0.min(x1), y0.min(y1)),
            size: Point::new((x1 - x0).abs(), (y1 - y0).abs()),
        }
    }

    /// `[0, extent)`.
    #[inline]
    pub fn from_extent(extent: Point) -> Self {
        Self {
            origin: Point::ZERO,
            size: Point::new(extent.x.max(0), extent.y.max(0)),
        }
    }

    #[inline]
    pub fn size(self) -> Point {
        self.size
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.size.y
    }

    #[inline]
    pub fn len(self) -> usize {
        Point::volume(self.size)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (p - self.origin).linear_index(self.size).is_some()
    }

    /// Iterate over the cells, `x` fastest.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}x{}", self.origin, self.size.x, self.size.y)
    }
}

/// Iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.range.len() {
            return None;
        }
        let p = self.range.origin + Point::from_linear(self.next, self.range.size);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.range.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}
