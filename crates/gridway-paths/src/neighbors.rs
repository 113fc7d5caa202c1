use gridway_core::{Point, Range};

use crate::traits::Passable;

/// Cached neighbor computation helper.
///
/// Enumerates the 3×3 block around a cell, row by row, and keeps the cells a
/// walker may step to next.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the admissible successors of `current` inside `bounds`.
    ///
    /// A neighbor is kept when it is in bounds, `closed` is false for it and
    /// it is passable. Diagonal neighbors are only considered when
    /// `allow_corner` is set, and additionally require both orthogonal cells
    /// flanking the move to be passable so a walker never squeezes between
    /// two blocked corners.
    pub fn admissible<P: Passable + ?Sized>(
        &mut self,
        current: Point,
        bounds: Range,
        allow_corner: bool,
        passable: &P,
        closed: impl Fn(Point) -> bool,
    ) -> &[Point] {
        self.buf.clear();
        let pass = |p: Point| bounds.contains(p) && passable.passable(p);
        for y in (current.y - 1).max(bounds.min.y)..=current.y + 1 {
            for x in (current.x - 1).max(bounds.min.x)..=current.x + 1 {
                let n = Point::new(x, y);
                if n == current || !bounds.contains(n) || closed(n) {
                    continue;
                }
                let keep = if current.manhattan(n) == 1 {
                    passable.passable(n)
                } else {
                    allow_corner
                        && passable.passable(n)
                        && pass(Point::new(n.x, current.y))
                        && pass(Point::new(current.x, n.y))
                };
                if keep {
                    self.buf.push(n);
                }
            }
        }
        &self.buf
    }
}
