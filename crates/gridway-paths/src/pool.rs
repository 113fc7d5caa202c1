use gridway_core::Point;

/// Handle to a [`SearchNode`] slot inside a [`NodePool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Slot index inside the owning pool.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle of a cell during one search. Transitions are monotone:
/// `NotExist → Open → Closed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    NotExist,
    Open,
    Closed,
}

/// Per-cell bookkeeping for one A* search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// Cost from the start cell.
    pub g: i32,
    /// Estimated remaining cost to the goal.
    pub h: i32,
    pub pos: Point,
    pub state: NodeState,
    pub parent: Option<NodeId>,
    /// Position in the open list heap, kept current by [`crate::OpenList`].
    pub(crate) heap_slot: usize,
}

impl SearchNode {
    /// A fresh node at `pos` with zero costs and no parent.
    pub fn new(pos: Point) -> Self {
        Self {
            g: 0,
            h: 0,
            pos,
            state: NodeState::NotExist,
            parent: None,
            heap_slot: 0,
        }
    }

    /// Priority used by the open list.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g + self.h
    }
}

/// Fixed-size slot allocator for [`SearchNode`]s.
///
/// Freed slots go onto a free list and are handed out again before the
/// backing vector grows. [`NodePool::release_all`] drops every node at once
/// but keeps the allocation, so a pool reused across searches stops growing
/// once it has seen its largest search.
///
/// Not synchronised: each search owns its pool.
#[derive(Debug, Default)]
pub struct NodePool {
    slots: Vec<SearchNode>,
    free: Vec<NodeId>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool with room for `n` nodes before reallocating.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            slots: Vec::with_capacity(n),
            free: Vec::new(),
        }
    }

    /// Store `node` and return its handle, recycling a freed slot when one
    /// is available.
    pub fn alloc(&mut self, node: SearchNode) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = node;
            return id;
        }
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(node);
        id
    }

    /// Return a single slot to the pool.
    pub fn free(&mut self, id: NodeId) {
        debug_assert!(id.index() < self.slots.len(), "foreign node id");
        debug_assert!(!self.free.contains(&id), "double free of {id:?}");
        self.free.push(id);
    }

    /// Release every node. Capacity is retained.
    pub fn release_all(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes the pool can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// # Panics
    /// Panics if `id` was not handed out by this pool.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.slots[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not handed out by this pool.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.slots[id.index()]
    }
}
