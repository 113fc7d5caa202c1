use gridway_core::{Point, Range};
use log::{debug, trace};
use thiserror::Error;

use crate::distance::manhattan;
use crate::heap::OpenList;
use crate::neighbors::Neighbors;
use crate::pool::{NodeId, NodePool, NodeState, SearchNode};
use crate::traits::Passable;

/// Cost of a horizontal or vertical step.
pub const STEP_COST: i32 = 10;
/// Cost of a diagonal step, `10 * sqrt(2)` rounded to an integer.
pub const DIAGONAL_COST: i32 = 14;

/// Why a search produced no path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Rejected before any allocation took place.
    #[error("invalid search parameters: {0}")]
    InvalidParameters(String),

    /// The frontier emptied without reaching the goal.
    #[error("no path between the requested points")]
    PathNotFound,
}

/// One path query: grid extent, endpoints, movement model and passability.
#[derive(Clone, Debug)]
pub struct SearchParams<P> {
    pub width: i32,
    pub height: i32,
    /// Allow diagonal steps (8-way movement). Otherwise 4-way.
    pub allow_corner: bool,
    pub start: Point,
    pub end: Point,
    pub passable: P,
}

impl<P: Passable> SearchParams<P> {
    /// Parameters for an 8-way search from `start` to `end`.
    pub fn new(width: i32, height: i32, start: Point, end: Point, passable: P) -> Self {
        Self {
            width,
            height,
            allow_corner: true,
            start,
            end,
            passable,
        }
    }

    /// Set whether diagonal steps are allowed (builder).
    pub fn allow_corner(mut self, allow: bool) -> Self {
        self.allow_corner = allow;
        self
    }

    /// The searched rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Check dimensions and endpoints.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SearchError::InvalidParameters(format!(
                "map size {}x{} is not positive",
                self.width, self.height
            )));
        }
        if (self.width as u64) * (self.height as u64) > i32::MAX as u64 {
            return Err(SearchError::InvalidParameters(format!(
                "map size {}x{} has too many cells",
                self.width, self.height
            )));
        }
        let bounds = self.bounds();
        for (what, p) in [("start", self.start), ("end", self.end)] {
            if !bounds.contains(p) {
                return Err(SearchError::InvalidParameters(format!(
                    "{what} {p} outside {bounds}"
                )));
            }
        }
        Ok(())
    }
}

/// A* search engine.
///
/// Owns the node pool, the dense cell → node index and the open list. All
/// three are reset at the start of every [`AstarSearch::find`] call and
/// released when it returns, so one engine may serve many sequential
/// queries, but concurrent queries each need their own engine.
#[derive(Default)]
pub struct AstarSearch {
    pool: NodePool,
    index: Vec<Option<NodeId>>,
    width: i32,
    open: OpenList,
    neighbors: Neighbors,
    expanded: usize,
}

impl AstarSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Find a shortest path from `params.start` to `params.end`.
    ///
    /// The returned path excludes the start cell and ends with the goal; it
    /// is empty when start and goal coincide. Only neighbors are tested for
    /// passability, so an impassable goal is never reached while an
    /// impassable start is simply left behind.
    pub fn find<P: Passable>(
        &mut self,
        params: &SearchParams<P>,
    ) -> Result<Vec<Point>, SearchError> {
        if let Err(e) = params.validate() {
            debug!("search rejected: {e}");
            return Err(e);
        }

        self.reset(params.width, params.height);
        let bounds = params.bounds();

        let start = self.pool.alloc(SearchNode {
            h: manhattan(params.start, params.end) * STEP_COST,
            state: NodeState::Open,
            ..SearchNode::new(params.start)
        });
        let si = self.cell(params.start);
        self.index[si] = Some(start);
        self.open.push(start, &mut self.pool);

        let found = loop {
            let Some(current) = self.open.pop(&mut self.pool) else {
                break None;
            };
            let (cp, cg) = {
                let node = self.pool.get_mut(current);
                node.state = NodeState::Closed;
                (node.pos, node.g)
            };
            if cp == params.end {
                break Some(current);
            }
            self.expanded += 1;

            let (index, pool, width) = (&self.index, &self.pool, self.width as usize);
            let closed = |p: Point| {
                index[p.y as usize * width + p.x as usize]
                    .is_some_and(|id| pool.get(id).state == NodeState::Closed)
            };
            let successors = self.neighbors.admissible(
                cp,
                bounds,
                params.allow_corner,
                &params.passable,
                closed,
            );

            for &np in successors {
                let step = if cp.manhattan(np) == 1 {
                    STEP_COST
                } else {
                    DIAGONAL_COST
                };
                let g = cg + step;
                let ni = np.y as usize * self.width as usize + np.x as usize;
                match self.index[ni] {
                    Some(id) => {
                        let node = self.pool.get_mut(id);
                        if g < node.g {
                            node.g = g;
                            node.parent = Some(current);
                            self.open.decrease(id, &mut self.pool);
                        }
                    }
                    None => {
                        let id = self.pool.alloc(SearchNode {
                            g,
                            h: manhattan(np, params.end) * STEP_COST,
                            state: NodeState::Open,
                            parent: Some(current),
                            ..SearchNode::new(np)
                        });
                        self.index[ni] = Some(id);
                        self.open.push(id, &mut self.pool);
                    }
                }
            }
        };

        let result = match found {
            Some(goal) => Ok(self.walk_back(goal)),
            None => Err(SearchError::PathNotFound),
        };
        trace!(
            "search {} -> {}: expanded {} nodes, pooled {}",
            params.start,
            params.end,
            self.expanded,
            self.pool.len()
        );
        self.release();
        match &result {
            Ok(path) => debug!(
                "path {} -> {} found, {} steps",
                params.start,
                params.end,
                path.len()
            ),
            Err(_) => debug!("no path {} -> {}", params.start, params.end),
        }
        result
    }

    fn reset(&mut self, width: i32, height: i32) {
        self.width = width;
        self.index.clear();
        self.index.resize(width as usize * height as usize, None);
        self.open.clear();
        self.pool.release_all();
        self.expanded = 0;
    }

    fn release(&mut self) {
        self.open.clear();
        self.pool.release_all();
    }

    #[inline]
    fn cell(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    fn walk_back(&self, goal: NodeId) -> Vec<Point> {
        let mut path = Vec::new();
        let mut id = goal;
        while let Some(parent) = self.pool.get(id).parent {
            path.push(self.pool.get(id).pos);
            id = parent;
        }
        path.reverse();
        path
    }
}
