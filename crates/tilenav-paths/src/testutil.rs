//! Test fixtures: tiles and ASCII grid builders.
//!
//! `.` is a walkable tile of weight 1, `#` a wall, a digit a walkable tile of
//! that weight and a space an empty cell. Row `i` of the input is `y = i`.

use tilenav_core::{Grid, Grid3, MajorOrder, MajorOrder3, Point, Point3, Tile};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell2 {
    pub(crate) pos: Point,
    pub(crate) walkable: bool,
    pub(crate) weight: f64,
}

impl Tile for Cell2 {
    type Coord = Point;
    fn is_walkable(&self) -> bool {
        self.walkable
    }
    fn weight(&self) -> f64 {
        self.weight
    }
    fn coord(&self) -> Point {
        self.pos
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cell3 {
    pub(crate) pos: Point3,
    pub(crate) walkable: bool,
    pub(crate) weight: f64,
}

impl Tile for Cell3 {
    type Coord = Point3;
    fn is_walkable(&self) -> bool {
        self.walkable
    }
    fn weight(&self) -> f64 {
        self.weight
    }
    fn coord(&self) -> Point3 {
        self.pos
    }
}

fn parse(ch: char) -> Option<(bool, f64)> {
    match ch {
        '.' => Some((true, 1.0)),
        '#' => Some((false, 1.0)),
        ' ' => None,
        d => d.to_digit(10).map(|w| (true, f64::from(w))),
    }
}

pub(crate) fn grid2(rows: &[&str]) -> Grid<Cell2> {
    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
    Grid::from_fn(width, height, MajorOrder::RowMajor, |p| {
        let ch = rows[p.y as usize].chars().nth(p.x as usize)?;
        parse(ch).map(|(walkable, weight)| Cell2 {
            pos: p,
            walkable,
            weight,
        })
    })
}

/// `layers[z][y]` is a row string indexed by `x`.
pub(crate) fn grid3<L: AsRef<[&'static str]>>(layers: &[L]) -> Grid3<Cell3> {
    let depth = layers.len() as i32;
    let height = layers.first().map_or(0, |l| l.as_ref().len()) as i32;
    let width = layers
        .first()
        .and_then(|l| l.as_ref().first())
        .map_or(0, |r| r.chars().count()) as i32;
    Grid3::from_fn(
        Point3::new(width, height, depth),
        MajorOrder3::Zyx,
        |p| {
            let row = layers[p.z as usize].as_ref()[p.y as usize];
            let ch = row.chars().nth(p.x as usize)?;
            parse(ch).map(|(walkable, weight)| Cell3 {
                pos: p,
                walkable,
                weight,
            })
        },
    )
}

/// A fully walkable `w × h` grid.
pub(crate) fn open2(w: i32, h: i32) -> Grid<Cell2> {
    Grid::from_fn(w, h, MajorOrder::RowMajor, |p| {
        Some(Cell2 {
            pos: p,
            walkable: true,
            weight: 1.0,
        })
    })
}
