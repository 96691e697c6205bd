//! Ticket search tree.
//!
//! Unbalanced binary search tree keyed by ticket identifier, compared
//! case-insensitively. Ticket identifiers are pseudo-random, so no
//! rebalancing is done; already-sorted input degrades to a list.
//!
//! Insertion, search and traversal are iterative so a degenerate tree cannot
//! overflow the call stack.

use std::cmp::Ordering;

use tracing::debug;

use crate::traits::Ticketed;

#[derive(Debug)]
struct Node<T> {
    item: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn leaf(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }
}

#[derive(Debug)]
pub struct TicketIndex<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Default for TicketIndex<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

/// Orders ticket identifiers ignoring case (upper-case folding).
pub fn compare_tickets(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}

impl<T: Ticketed> TicketIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item` as a new leaf.
    ///
    /// Returns `false` and keeps the existing entry when the ticket is
    /// already present.
    pub fn insert(&mut self, item: T) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match compare_tickets(item.ticket(), node.item.ticket()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    debug!(ticket = item.ticket(), "duplicate ticket ignored");
                    return false;
                }
            };
        }
        *slot = Some(Node::leaf(item));
        self.len += 1;
        true
    }

    /// Looks up an entry by ticket. Blank queries never match.
    pub fn search(&self, ticket: &str) -> Option<&T> {
        if ticket.trim().is_empty() {
            return None;
        }

        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match compare_tickets(ticket, node.item.ticket()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.item),
            };
        }
        None
    }

    /// All entries in ascending ticket order.
    pub fn in_order_list(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<T>> = Vec::new();
        let mut current = self.root.as_deref();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(&node.item);
                current = node.right.as_deref();
            }
        }
        out
    }

    /// Number of stored entries.
    pub fn count(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Depth of the deepest leaf; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    pub fn clear(&mut self) {
        self.drop_nodes();
        self.len = 0;
    }
}

impl<T> TicketIndex<T> {
    // Tear down without recursive Box drops on deep trees.
    fn drop_nodes(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Drop for TicketIndex<T> {
    fn drop(&mut self) {
        self.drop_nodes();
    }
}
