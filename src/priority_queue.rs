//! Urgency heap.
//!
//! Array-backed binary min-heap keyed by [`Prioritized::priority`]. The
//! entry with the lowest priority value sits at index 0; children of `i`
//! live at `2i + 1` and `2i + 2`. Equal priorities have no defined order.

use crate::traits::Prioritized;

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<T>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T: Prioritized> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a heap from `items` in O(n).
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut queue = Self::new();
        queue.build_heap(items);
        queue
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Entries in backing-array order (heap order, not sorted).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter()
    }

    /// Adds an entry and sifts it up past every strictly larger parent.
    pub fn insert(&mut self, item: T) {
        self.heap.push(item);
        let mut i = self.heap.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].priority() <= self.heap[i].priority() {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    /// The most urgent entry, if any.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Removes and returns the most urgent entry.
    pub fn extract_min(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let root = self.heap.swap_remove(0);
        self.sift_down(0);
        Some(root)
    }

    /// Replaces the contents with `items` and heapifies bottom-up.
    pub fn build_heap(&mut self, items: impl IntoIterator<Item = T>) {
        self.heap = items.into_iter().collect();
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            // Left wins ties; right only takes over when strictly smaller.
            if left < len && self.heap[left].priority() < self.heap[smallest].priority() {
                smallest = left;
            }
            if right < len && self.heap[right].priority() < self.heap[smallest].priority() {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
