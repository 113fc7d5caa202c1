use crate::pool::{NodeId, NodePool};

/// Binary min-heap of pooled nodes ordered by `f`, the A* frontier.
///
/// Every node in the heap records its own slot, so [`OpenList::decrease`]
/// can restore heap order after a `g` improvement without searching for
/// the node first. Ties are left wherever the sift operations put them.
#[derive(Debug, Default)]
pub struct OpenList {
    heap: Vec<NodeId>,
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry. Capacity is retained.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Insert `id`.
    pub fn push(&mut self, id: NodeId, pool: &mut NodePool) {
        let hole = self.heap.len();
        self.heap.push(id);
        pool.get_mut(id).heap_slot = hole;
        self.percolate_up(hole, pool);
    }

    /// Remove and return the node with the smallest `f`.
    pub fn pop(&mut self, pool: &mut NodePool) -> Option<NodeId> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last);
        }
        let top = std::mem::replace(&mut self.heap[0], last);
        pool.get_mut(last).heap_slot = 0;
        self.percolate_down(0, pool);
        Some(top)
    }

    /// Restore heap order after the `f` of `id` went down.
    pub fn decrease(&mut self, id: NodeId, pool: &mut NodePool) {
        let hole = pool.get(id).heap_slot;
        debug_assert_eq!(self.heap.get(hole), Some(&id), "node is not in the open list");
        self.percolate_up(hole, pool);
    }

    fn percolate_up(&mut self, mut hole: usize, pool: &mut NodePool) {
        while hole > 0 {
            let parent = (hole - 1) / 2;
            if pool.get(self.heap[hole]).f() < pool.get(self.heap[parent]).f() {
                self.swap(hole, parent, pool);
                hole = parent;
            } else {
                return;
            }
        }
    }

    fn percolate_down(&mut self, mut hole: usize, pool: &mut NodePool) {
        let len = self.heap.len();
        loop {
            let left = 2 * hole + 1;
            if left >= len {
                return;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && pool.get(self.heap[right]).f() < pool.get(self.heap[left]).f() {
                child = right;
            }
            if pool.get(self.heap[child]).f() < pool.get(self.heap[hole]).f() {
                self.swap(hole, child, pool);
                hole = child;
            } else {
                return;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize, pool: &mut NodePool) {
        self.heap.swap(a, b);
        pool.get_mut(self.heap[a]).heap_slot = a;
        pool.get_mut(self.heap[b]).heap_slot = b;
    }
}
