use gridway_core::Point;

/// Passability predicate consulted by the search engine.
///
/// Only called for points inside the searched bounds.
pub trait Passable {
    /// Whether a walker may stand on `p`.
    fn passable(&self, p: Point) -> bool;
}

impl<F: Fn(Point) -> bool> Passable for F {
    #[inline]
    fn passable(&self, p: Point) -> bool {
        self(p)
    }
}
