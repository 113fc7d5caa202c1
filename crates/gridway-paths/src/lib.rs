//! A* pathfinding over binary passable/blocked grids.
//!
//! The engine is built from three pieces that live for exactly one search:
//!
//! - a [`NodePool`] handing out [`SearchNode`] slots and reclaiming them in
//!   bulk when the search ends,
//! - a dense node index mapping each grid cell to its pooled node,
//! - an [`OpenList`] binary min-heap ordered by `f = g + h`, with
//!   decrease-key by percolating a node's slot upward.
//!
//! [`AstarSearch`] ties them together. Orthogonal steps cost
//! [`STEP_COST`], diagonal steps cost [`DIAGONAL_COST`], and the heuristic
//! is the Manhattan distance scaled by the orthogonal step cost.
//!
//! ```
//! use gridway_core::Point;
//! use gridway_paths::{AstarSearch, SearchParams};
//!
//! let params = SearchParams::new(3, 3, Point::new(0, 0), Point::new(2, 2), |_: Point| true);
//! let path = AstarSearch::new().find(&params).unwrap();
//! assert_eq!(path, vec![Point::new(1, 1), Point::new(2, 2)]);
//! ```

mod astar;
mod distance;
mod heap;
mod neighbors;
mod pool;
mod traits;

pub use astar::{AstarSearch, DIAGONAL_COST, STEP_COST, SearchError, SearchParams};
pub use distance::{manhattan, octile};
pub use heap::OpenList;
pub use neighbors::Neighbors;
pub use pool::{NodeId, NodePool, NodeState, SearchNode};
pub use traits::Passable;
