//! Dense grid map of [`Tile`]s.

use gridway_core::{Point, Range};
use gridway_paths::Passable;

use crate::error::{Error, Result};

/// Classification of one map cell.
///
/// The discriminants double as the snapshot byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tile {
    Collision = 0,
    #[default]
    Road = 1,
}

impl Tile {
    /// Snapshot byte for this tile.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a snapshot byte.
    #[inline]
    pub const fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Tile::Collision),
            1 => Some(Tile::Road),
            _ => None,
        }
    }
}

/// Largest number of cells a map may hold.
pub const MAX_CELLS: usize = i32::MAX as usize;

/// `width * height` for positive dimensions within [`MAX_CELLS`].
pub(crate) fn cell_count(width: i32, height: i32) -> Option<usize> {
    if width <= 0 || height <= 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n <= MAX_CELLS)
}

/// A `width × height` grid with exactly one [`Tile`] per in-bounds cell.
///
/// Cells are stored row-major, so [`GridMap::cells_of`] and
/// [`GridMap::iter`] enumerate in `(y, x)` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    cells: Vec<Tile>,
    width: i32,
    height: i32,
}

impl GridMap {
    /// Create an all-[`Tile::Road`] map.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidParameters(format!(
                "map size {width}x{height} is not positive"
            )));
        }
        let len = cell_count(width, height).ok_or_else(|| {
            Error::InvalidParameters(format!(
                "map size {width}x{height} exceeds {MAX_CELLS} cells"
            ))
        })?;
        Ok(Self {
            cells: vec![Tile::Road; len],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Get the tile at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the tile at a point. Returns `false` and changes nothing if out
    /// of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) -> bool {
        if !self.contains(p) {
            return false;
        }
        let idx = self.index(p);
        self.cells[idx] = tile;
        true
    }

    /// Fill the entire map with the given tile.
    pub fn fill(&mut self, tile: Tile) {
        self.cells.fill(tile);
    }

    pub fn is_road(&self, p: Point) -> bool {
        self.at(p) == Some(Tile::Road)
    }

    pub fn is_collision(&self, p: Point) -> bool {
        self.at(p) == Some(Tile::Collision)
    }

    /// Every point holding `tile`, row-major.
    pub fn cells_of(&self, tile: Tile) -> Vec<Point> {
        self.iter()
            .filter(|&(_, t)| t == tile)
            .map(|(p, _)| p)
            .collect()
    }

    /// Count how many cells hold the given tile.
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Iterate over `(Point, Tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Tile)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

impl Passable for GridMap {
    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.is_road(p)
    }
}
