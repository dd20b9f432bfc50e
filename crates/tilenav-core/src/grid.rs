//! Grid accessors: the [`TileGrid`] / [`TileGrid3`] lookup traits and the
//! owned [`Grid`] / [`Grid3`] storages.
//!
//! A grid accessor maps logical coordinates to tiles and reports extents.
//! How cells are laid out in memory is selected by [`MajorOrder`] (2D) or
//! [`MajorOrder3`] (3D) and is invisible to the path engine.

use std::fmt;

use crate::geom::{Point, Point3, Range};
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// Accessor traits
// ---------------------------------------------------------------------------

/// Read-only 2D tile lookup.
pub trait TileGrid {
    /// Tile type stored in the grid.
    type Tile: Tile<Coord = Point>;

    /// Tile at `p`, or `None` when out of bounds or the cell is empty.
    fn get(&self, p: Point) -> Option<&Self::Tile>;

    /// Number of columns.
    fn extent_x(&self) -> i32;

    /// Number of rows.
    fn extent_y(&self) -> i32;

    /// Extents as a point (x = columns, y = rows).
    #[inline]
    fn extent(&self) -> Point {
        Point::new(self.extent_x(), self.extent_y())
    }
}

/// Read-only 3D tile lookup.
pub trait TileGrid3 {
    /// Tile type stored in the grid.
    type Tile: Tile<Coord = Point3>;

    /// Tile at `p`, or `None` when out of bounds or the cell is empty.
    fn get(&self, p: Point3) -> Option<&Self::Tile>;

    /// Extent along the x axis.
    fn extent_x(&self) -> i32;

    /// Extent along the y (elevation) axis.
    fn extent_y(&self) -> i32;

    /// Extent along the z axis.
    fn extent_z(&self) -> i32;

    /// Extents as a point.
    #[inline]
    fn extent(&self) -> Point3 {
        Point3::new(self.extent_x(), self.extent_y(), self.extent_z())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A tile's coordinate lies outside the grid extents.
    OutOfBounds { coord: String },
    /// Two tiles share the same coordinate.
    DuplicateCoord { coord: String },
    /// Nested rows or layers have inconsistent lengths.
    Ragged { expected: usize, found: usize },
    /// Stored cells do not fill the declared extent exactly.
    ExtentMismatch { extent: String, cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord } => write!(f, "tile at {coord} lies outside the grid"),
            Self::DuplicateCoord { coord } => write!(f, "two tiles share coordinate {coord}"),
            Self::Ragged { expected, found } => {
                write!(f, "ragged grid data: expected length {expected}, found {found}")
            }
            Self::ExtentMismatch { extent, cells } => {
                write!(f, "extent {extent} does not match {cells} stored cells")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// 2D storage
// ---------------------------------------------------------------------------

/// Storage order of a 2D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MajorOrder {
    /// Rows are contiguous: nested data is indexed `[y][x]`.
    #[default]
    RowMajor,
    /// Columns are contiguous: nested data is indexed `[x][y]`.
    ColumnMajor,
}

/// An owned 2D grid of optional tiles.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid<T>"))]
pub struct Grid<T> {
    cells: Vec<Option<T>>,
    width: i32,
    height: i32,
    order: MajorOrder,
}

impl<T> Grid<T> {
    /// Create an empty grid (every cell `None`).
    pub fn new(width: i32, height: i32, order: MajorOrder) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        let mut cells = Vec::new();
        cells.resize_with(width as usize * height as usize, || None);
        Self {
            cells,
            width,
            height,
            order,
        }
    }

    /// Create a grid by calling `f` once per cell.
    pub fn from_fn(
        width: i32,
        height: i32,
        order: MajorOrder,
        mut f: impl FnMut(Point) -> Option<T>,
    ) -> Self {
        let mut grid = Self::new(width, height, order);
        for p in grid.range() {
            let i = grid.index(p);
            grid.cells[i] = f(p);
        }
        grid
    }

    /// Build a grid from nested data interpreted under `order`.
    ///
    /// With [`MajorOrder::RowMajor`] the data is `rows[y][x]`; with
    /// [`MajorOrder::ColumnMajor`] it is `columns[x][y]`.
    pub fn from_rows(rows: Vec<Vec<Option<T>>>, order: MajorOrder) -> Result<Self, GridError> {
        let outer = rows.len();
        let inner = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(outer * inner);
        for row in rows {
            if row.len() != inner {
                return Err(GridError::Ragged {
                    expected: inner,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        let (width, height) = match order {
            MajorOrder::RowMajor => (inner, outer),
            MajorOrder::ColumnMajor => (outer, inner),
        };
        Ok(Self {
            cells,
            width: width as i32,
            height: height as i32,
            order,
        })
    }

    /// Storage order.
    pub fn order(&self) -> MajorOrder {
        self.order
    }

    /// Bounding range `[0, extent)`.
    pub fn range(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of cells (empty or not).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        match self.order {
            MajorOrder::RowMajor => (p.y * self.width + p.x) as usize,
            MajorOrder::ColumnMajor => (p.x * self.height + p.y) as usize,
        }
    }

    /// Tile at `p`, or `None` if out of bounds or empty.
    pub fn get(&self, p: Point) -> Option<&T> {
        if !self.range().contains(p) {
            return None;
        }
        self.cells[self.index(p)].as_ref()
    }

    /// Mutable tile at `p`.
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if !self.range().contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].as_mut()
    }

    /// Store `tile` at `p`, returning the previous occupant. Does nothing
    /// (and returns `None`) when out of bounds.
    pub fn set(&mut self, p: Point, tile: T) -> Option<T> {
        if !self.range().contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].replace(tile)
    }

    /// Remove and return the tile at `p`.
    pub fn take(&mut self, p: Point) -> Option<T> {
        if !self.range().contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].take()
    }

    /// Iterate over occupied cells in row-major coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.range()
            .iter()
            .filter_map(move |p| self.get(p).map(|t| (p, t)))
    }
}

impl<T: Tile<Coord = Point>> Grid<T> {
    /// Build a grid by placing each tile at its own coordinate.
    pub fn from_tiles(
        width: i32,
        height: i32,
        order: MajorOrder,
        tiles: impl IntoIterator<Item = T>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height, order);
        for tile in tiles {
            let p = tile.coord();
            if !grid.range().contains(p) {
                return Err(GridError::OutOfBounds {
                    coord: p.to_string(),
                });
            }
            if grid.set(p, tile).is_some() {
                return Err(GridError::DuplicateCoord {
                    coord: p.to_string(),
                });
            }
        }
        Ok(grid)
    }
}

impl<T: Tile<Coord = Point>> TileGrid for Grid<T> {
    type Tile = T;

    #[inline]
    fn get(&self, p: Point) -> Option<&T> {
        Grid::get(self, p)
    }

    #[inline]
    fn extent_x(&self) -> i32 {
        self.width
    }

    #[inline]
    fn extent_y(&self) -> i32 {
        self.height
    }
}

// ---------------------------------------------------------------------------
// 3D storage
// ---------------------------------------------------------------------------

/// Storage order of a 3D grid, outermost axis first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MajorOrder3 {
    /// Nested data is indexed `[x][y][z]`.
    Xyz,
    /// Nested data is indexed `[x][z][y]`.
    Xzy,
    /// Nested data is indexed `[y][x][z]`.
    Yxz,
    /// Nested data is indexed `[y][z][x]`.
    Yzx,
    /// Nested data is indexed `[z][x][y]`.
    Zxy,
    /// Nested data is indexed `[z][y][x]`: x contiguous.
    #[default]
    Zyx,
}

impl MajorOrder3 {
    /// Axis ids (0 = x, 1 = y, 2 = z), outermost first.
    #[inline]
    pub const fn axes(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }
}

#[inline]
fn components(p: Point3) -> [i32; 3] {
    [p.x, p.y, p.z]
}

/// An owned 3D grid of optional tiles.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid3<T>"))]
pub struct Grid3<T> {
    cells: Vec<Option<T>>,
    extent: Point3,
    order: MajorOrder3,
}

impl<T> Grid3<T> {
    /// Create an empty grid (every cell `None`).
    pub fn new(extent: Point3, order: MajorOrder3) -> Self {
        let extent = Point3::new(extent.x.max(0), extent.y.max(0), extent.z.max(0));
        let mut cells = Vec::new();
        cells.resize_with(
            extent.x as usize * extent.y as usize * extent.z as usize,
            || None,
        );
        Self {
            cells,
            extent,
            order,
        }
    }

    /// Create a grid by calling `f` once per cell.
    pub fn from_fn(
        extent: Point3,
        order: MajorOrder3,
        mut f: impl FnMut(Point3) -> Option<T>,
    ) -> Self {
        let mut grid = Self::new(extent, order);
        for z in 0..grid.extent.z {
            for y in 0..grid.extent.y {
                for x in 0..grid.extent.x {
                    let p = Point3::new(x, y, z);
                    let i = grid.index(p);
                    grid.cells[i] = f(p);
                }
            }
        }
        grid
    }

    /// Build a grid from nested data interpreted under `order`, e.g. with
    /// [`MajorOrder3::Zyx`] the data is `layers[z][y][x]`.
    pub fn from_layers(
        layers: Vec<Vec<Vec<Option<T>>>>,
        order: MajorOrder3,
    ) -> Result<Self, GridError> {
        let outer = layers.len();
        let middle = layers.first().map_or(0, Vec::len);
        let inner = layers
            .first()
            .and_then(|l| l.first())
            .map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(outer * middle * inner);
        for layer in layers {
            if layer.len() != middle {
                return Err(GridError::Ragged {
                    expected: middle,
                    found: layer.len(),
                });
            }
            for row in layer {
                if row.len() != inner {
                    return Err(GridError::Ragged {
                        expected: inner,
                        found: row.len(),
                    });
                }
                cells.extend(row);
            }
        }
        let mut dims = [0i32; 3];
        let axes = order.axes();
        dims[axes[0]] = outer as i32;
        dims[axes[1]] = middle as i32;
        dims[axes[2]] = inner as i32;
        Ok(Self {
            cells,
            extent: Point3::new(dims[0], dims[1], dims[2]),
            order,
        })
    }

    /// Storage order.
    pub fn order(&self) -> MajorOrder3 {
        self.order
    }

    /// Extents of the grid.
    pub fn extent(&self) -> Point3 {
        self.extent
    }

    /// Number of cells (empty or not).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid extents.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && p.x < self.extent.x
            && p.y < self.extent.y
            && p.z < self.extent.z
    }

    #[inline]
    fn index(&self, p: Point3) -> usize {
        let [a0, a1, a2] = self.order.axes();
        let c = components(p);
        let e = components(self.extent);
        ((c[a0] * e[a1] + c[a1]) * e[a2] + c[a2]) as usize
    }

    /// Tile at `p`, or `None` if out of bounds or empty.
    pub fn get(&self, p: Point3) -> Option<&T> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.index(p)].as_ref()
    }

    /// Mutable tile at `p`.
    pub fn get_mut(&mut self, p: Point3) -> Option<&mut T> {
        if !self.contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].as_mut()
    }

    /// Store `tile` at `p`, returning the previous occupant. Does nothing
    /// (and returns `None`) when out of bounds.
    pub fn set(&mut self, p: Point3, tile: T) -> Option<T> {
        if !self.contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].replace(tile)
    }

    /// Remove and return the tile at `p`.
    pub fn take(&mut self, p: Point3) -> Option<T> {
        if !self.contains(p) {
            return None;
        }
        let i = self.index(p);
        self.cells[i].take()
    }
}

impl<T: Tile<Coord = Point3>> Grid3<T> {
    /// Build a grid by placing each tile at its own coordinate.
    pub fn from_tiles(
        extent: Point3,
        order: MajorOrder3,
        tiles: impl IntoIterator<Item = T>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(extent, order);
        for tile in tiles {
            let p = tile.coord();
            if !grid.contains(p) {
                return Err(GridError::OutOfBounds {
                    coord: p.to_string(),
                });
            }
            if grid.set(p, tile).is_some() {
                return Err(GridError::DuplicateCoord {
                    coord: p.to_string(),
                });
            }
        }
        Ok(grid)
    }
}

impl<T: Tile<Coord = Point3>> TileGrid3 for Grid3<T> {
    type Tile = T;

    #[inline]
    fn get(&self, p: Point3) -> Option<&T> {
        Grid3::get(self, p)
    }

    #[inline]
    fn extent_x(&self) -> i32 {
        self.extent.x
    }

    #[inline]
    fn extent_y(&self) -> i32 {
        self.extent.y
    }

    #[inline]
    fn extent_z(&self) -> i32 {
        self.extent.z
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Number of cells spanned by `dims`, or `None` for a negative extent.
#[cfg(feature = "serde")]
fn cell_count(dims: &[i32]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| {
        usize::try_from(d).ok().and_then(|d| acc.checked_mul(d))
    })
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid<T> {
    cells: Vec<Option<T>>,
    width: i32,
    height: i32,
    order: MajorOrder,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, GridError> {
        if cell_count(&[raw.width, raw.height]) != Some(raw.cells.len()) {
            return Err(GridError::ExtentMismatch {
                extent: format!("{}x{}", raw.width, raw.height),
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            cells: raw.cells,
            width: raw.width,
            height: raw.height,
            order: raw.order,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid3<T> {
    cells: Vec<Option<T>>,
    extent: Point3,
    order: MajorOrder3,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid3<T>> for Grid3<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid3<T>) -> Result<Self, GridError> {
        let e = raw.extent;
        if cell_count(&[e.x, e.y, e.z]) != Some(raw.cells.len()) {
            return Err(GridError::ExtentMismatch {
                extent: format!("{}x{}x{}", e.x, e.y, e.z),
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            cells: raw.cells,
            extent: e,
            order: raw.order,
        })
    }
}
