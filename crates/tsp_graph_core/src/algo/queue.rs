use std::collections::HashMap;

use crate::graph::VertexId;

/// Binary min-heap of vertices keyed by tentative distance, with O(log n)
/// decrease-key.
///
/// The queue owns the vertex-to-slot mapping, so callers never track heap
/// positions themselves. Ties are broken arbitrarily.
#[derive(Clone, Debug, Default)]
pub struct IndexedMinQueue {
    heap: Vec<(f64, VertexId)>,
    slots: HashMap<VertexId, usize>,
}

impl IndexedMinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn key(&self, id: VertexId) -> Option<f64> {
        self.slots.get(&id).map(|&slot| self.heap[slot].0)
    }

    /// Returns `false` if the vertex is already queued.
    pub fn push(&mut self, id: VertexId, key: f64) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        let slot = self.heap.len();
        self.heap.push((key, id));
        self.slots.insert(id, slot);
        self.sift_up(slot);
        true
    }

    /// Removes the vertex with the smallest key.
    pub fn pop_min(&mut self) -> Option<(VertexId, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (key, id) = self.heap.pop()?;
        self.slots.remove(&id);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((id, key))
    }

    /// Lowers the key of a queued vertex and restores heap order.
    ///
    /// Returns `false` if the vertex is not queued or `key` is larger than
    /// its current key; the queue is left untouched in both cases.
    pub fn decrease_key(&mut self, id: VertexId, key: f64) -> bool {
        let Some(&slot) = self.slots.get(&id) else {
            return false;
        };
        if key > self.heap[slot].0 {
            return false;
        }
        self.heap[slot].0 = key;
        self.sift_up(slot);
        true
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < n && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < n && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].1, a);
        self.slots.insert(self.heap[b].1, b);
    }
}
