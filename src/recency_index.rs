//! Recency tree.
//!
//! AVL tree keyed by last-update timestamp. Nodes live in an arena and refer
//! to their children by index, so a rotation only rewrites child links.
//! Insertion records the descent path and rebalances on the way back up
//! instead of recursing.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::traits::Timestamped;

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    key: DateTime<Utc>,
    left: Option<usize>,
    right: Option<usize>,
    height: u32,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct RecencyIndex<T> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for RecencyIndex<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T: Timestamped> RecencyIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the root; 0 for an empty tree.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts `item` and rebalances along the insertion path.
    ///
    /// Returns `false` without touching the tree when an entry with the same
    /// timestamp already exists.
    pub fn insert(&mut self, item: T) -> bool {
        let key = item.last_updated();
        let mut path: Vec<(usize, Side)> = Vec::new();
        let mut current = self.root;

        while let Some(i) = current {
            match key.cmp(&self.nodes[i].key) {
                Ordering::Less => {
                    path.push((i, Side::Left));
                    current = self.nodes[i].left;
                }
                Ordering::Greater => {
                    path.push((i, Side::Right));
                    current = self.nodes[i].right;
                }
                Ordering::Equal => {
                    debug!(timestamp = %key, "duplicate timestamp ignored");
                    return false;
                }
            }
        }

        let mut subtree = self.nodes.len();
        self.nodes.push(Node {
            item,
            key,
            left: None,
            right: None,
            height: 1,
        });

        while let Some((i, side)) = path.pop() {
            match side {
                Side::Left => self.nodes[i].left = Some(subtree),
                Side::Right => self.nodes[i].right = Some(subtree),
            }
            subtree = self.rebalance(i, key);
        }
        self.root = Some(subtree);
        true
    }

    /// All entries in ascending timestamp order.
    pub fn in_order_list(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = Vec::new();
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(i) = current {
                stack.push(i);
                current = self.nodes[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(&self.nodes[i].item);
                current = self.nodes[i].right;
            }
        }
        out
    }

    /// Entry with the latest timestamp.
    pub fn most_recent(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(&self.nodes[current].item)
    }

    /// Checks that every node's subtree heights differ by at most one.
    ///
    /// Heights are recomputed from the structure rather than trusted.
    pub fn is_balanced(&self) -> bool {
        let Some(root) = self.root else {
            return true;
        };

        let mut preorder = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            preorder.push(i);
            stack.extend(self.nodes[i].left);
            stack.extend(self.nodes[i].right);
        }

        // Reverse preorder visits children before their parent.
        let mut heights = vec![0u32; self.nodes.len()];
        for &i in preorder.iter().rev() {
            let left = self.nodes[i].left.map_or(0, |l| heights[l]);
            let right = self.nodes[i].right.map_or(0, |r| heights[r]);
            if left.abs_diff(right) > 1 {
                return false;
            }
            heights[i] = 1 + left.max(right);
        }
        true
    }

    fn height_of(&self, node: Option<usize>) -> u32 {
        node.map_or(0, |i| self.nodes[i].height)
    }

    fn update_height(&mut self, i: usize) {
        let node = &self.nodes[i];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[i].height = height;
    }

    fn balance_factor(&self, i: usize) -> i64 {
        let node = &self.nodes[i];
        i64::from(self.height_of(node.left)) - i64::from(self.height_of(node.right))
    }

    /// Restores balance at `i` after inserting `key` below it.
    ///
    /// Returns the index of the subtree's new root.
    fn rebalance(&mut self, i: usize, key: DateTime<Utc>) -> usize {
        self.update_height(i);
        let balance = self.balance_factor(i);

        if balance > 1 {
            if let Some(left) = self.nodes[i].left {
                match key.cmp(&self.nodes[left].key) {
                    Ordering::Less => return self.rotate_right(i),
                    Ordering::Greater => {
                        let pivot = self.rotate_left(left);
                        self.nodes[i].left = Some(pivot);
                        return self.rotate_right(i);
                    }
                    Ordering::Equal => {}
                }
            }
        } else if balance < -1 {
            if let Some(right) = self.nodes[i].right {
                match key.cmp(&self.nodes[right].key) {
                    Ordering::Greater => return self.rotate_left(i),
                    Ordering::Less => {
                        let pivot = self.rotate_right(right);
                        self.nodes[i].right = Some(pivot);
                        return self.rotate_left(i);
                    }
                    Ordering::Equal => {}
                }
            }
        }
        i
    }

    fn rotate_right(&mut self, y: usize) -> usize {
        let Some(x) = self.nodes[y].left else {
            return y;
        };
        let moved = self.nodes[x].right;

        self.nodes[x].right = Some(y);
        self.nodes[y].left = moved;

        self.update_height(y);
        self.update_height(x);
        x
    }

    fn rotate_left(&mut self, x: usize) -> usize {
        let Some(y) = self.nodes[x].right else {
            return x;
        };
        let moved = self.nodes[y].left;

        self.nodes[y].left = Some(x);
        self.nodes[x].right = moved;

        self.update_height(x);
        self.update_height(y);
        y
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Update(&'static str, DateTime<Utc>);

    impl Timestamped for Update {
        fn last_updated(&self) -> DateTime<Utc> {
            self.1
        }
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn minutes(index: &RecencyIndex<Update>) -> Vec<i64> {
        index
            .in_order_list()
            .iter()
            .map(|u| (u.1 - at(0)).num_minutes())
            .collect()
    }

    #[test]
    fn test_empty_tree() {
        let index: RecencyIndex<Update> = RecencyIndex::new();
        assert!(index.is_balanced());
        assert_eq!(index.height(), 0);
        assert!(index.most_recent().is_none());
        assert!(index.in_order_list().is_empty());
    }

    #[test]
    fn test_ascending_inserts_rotate_left() {
        let mut index = RecencyIndex::new();
        for m in [1, 2, 3] {
            index.insert(Update("x", at(m)));
        }
        assert_eq!(index.height(), 2);
        assert!(index.is_balanced());
        assert_eq!(minutes(&index), vec![1, 2, 3]);
    }

    #[test]
    fn test_descending_inserts_rotate_right() {
        let mut index = RecencyIndex::new();
        for m in [3, 2, 1] {
            index.insert(Update("x", at(m)));
        }
        assert_eq!(index.height(), 2);
        assert_eq!(minutes(&index), vec![1, 2, 3]);
    }

    #[test]
    fn test_left_right_case() {
        let mut index = RecencyIndex::new();
        for m in [30, 10, 20] {
            index.insert(Update("x", at(m)));
        }
        assert_eq!(index.height(), 2);
        assert!(index.is_balanced());
        assert_eq!(minutes(&index), vec![10, 20, 30]);
    }

    #[test]
    fn test_right_left_case() {
        let mut index = RecencyIndex::new();
        for m in [10, 30, 20] {
            index.insert(Update("x", at(m)));
        }
        assert_eq!(index.height(), 2);
        assert!(index.is_balanced());
        assert_eq!(minutes(&index), vec![10, 20, 30]);
    }

    #[test]
    fn test_duplicate_timestamp_dropped() {
        let mut index = RecencyIndex::new();
        assert!(index.insert(Update("first", at(5))));
        assert!(!index.insert(Update("second", at(5))));
        assert_eq!(index.len(), 1);
        assert_eq!(index.in_order_list()[0].0, "first");
    }

    #[test]
    fn test_sequential_inserts_stay_logarithmic() {
        let mut index = RecencyIndex::new();
        for m in 0..1024 {
            index.insert(Update("x", at(m)));
        }
        assert!(index.is_balanced());
        // 1024 nodes fit in a perfectly balanced tree of height 11.
        assert!(index.height() <= 11, "height {}", index.height());
        assert_eq!(minutes(&index), (0..1024).collect::<Vec<_>>());
    }

    #[test]
    fn test_most_recent() {
        let mut index = RecencyIndex::new();
        for (name, m) in [("a", 15), ("b", 45), ("c", -20)] {
            index.insert(Update(name, at(m)));
        }
        assert_eq!(index.most_recent().map(|u| u.0), Some("b"));
    }

    #[test]
    fn test_is_balanced_detects_skew() {
        let mut index = RecencyIndex::new();
        for m in [1, 2, 3] {
            index.insert(Update("x", at(m)));
        }
        // Hand-build a right-leaning chain: 1 -> 2 -> 3.
        index.nodes[0].right = Some(1);
        index.nodes[1].left = None;
        index.nodes[1].right = Some(2);
        index.nodes[0].left = None;
        index.root = Some(0);
        assert!(!index.is_balanced());
    }

    #[test]
    fn test_clear() {
        let mut index = RecencyIndex::new();
        index.insert(Update("x", at(1)));
        index.clear();
        assert!(index.is_empty());
        assert!(index.insert(Update("x", at(1))));
    }
}
