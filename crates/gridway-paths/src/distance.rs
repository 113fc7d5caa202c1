use gridway_core::Point;

use crate::astar::{DIAGONAL_COST, STEP_COST};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Cost of the cheapest unobstructed 8-way route between two points under
/// the 10/14 step model.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    diag * DIAGONAL_COST + (dx.max(dy) - diag) * STEP_COST
}
