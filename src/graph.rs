//! Service-area routing graph.
//!
//! Weighted undirected graph over named service areas. Every edge is stored
//! in both endpoints' adjacency lists, in the order edges were added;
//! parallel edges are kept.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::traits::AreaTopology;

/// Weight used by [`ServiceAreaGraph::connect`].
pub const DEFAULT_WEIGHT: u32 = 1;

#[derive(Debug, Clone, Copy)]
struct Adjacent {
    to: usize,
    weight: u32,
}

/// One edge of a spanning tree, oriented from the tree towards the newly
/// reached area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

/// Result of a minimum-spanning-tree query.
///
/// When the graph is disconnected this only spans the start area's
/// component, and `total_cost` is the cost of that partial tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningTree {
    pub edges: Vec<RouteEdge>,
    pub total_cost: u64,
}

impl SpanningTree {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServiceAreaGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<Adjacent>>,
    edge_count: usize,
}

impl ServiceAreaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from every link the topology provides, in order.
    pub fn from_topology<P: AreaTopology + ?Sized>(topology: &P) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for link in topology.links() {
            graph.add_edge(&link.from, &link.to, link.weight)?;
        }
        Ok(graph)
    }

    /// Adds an undirected edge, creating unknown endpoints on the fly.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u32) -> Result<(), GraphError> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return Err(GraphError::EmptyAreaName);
        }
        if weight == 0 {
            return Err(GraphError::ZeroWeight {
                from: a.to_string(),
                to: b.to_string(),
            });
        }

        let from = self.node(a);
        let to = self.node(b);
        self.adjacency[from].push(Adjacent { to, weight });
        self.adjacency[to].push(Adjacent { to: from, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Adds an edge with the default weight of 1.
    pub fn connect(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        self.add_edge(a, b, DEFAULT_WEIGHT)
    }

    pub fn contains(&self, area: &str) -> bool {
        self.index.contains_key(area)
    }

    /// Known areas in the order they were first seen.
    pub fn areas(&self) -> &[String] {
        &self.names
    }

    /// Neighbours of `area` with edge weights, in edge insertion order.
    pub fn neighbors(&self, area: &str) -> Vec<(&str, u32)> {
        self.index
            .get(area)
            .map(|&i| {
                self.adjacency[i]
                    .iter()
                    .map(|adj| (self.names[adj.to].as_str(), adj.weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected edges added, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Breadth-first visitation order from `start`.
    ///
    /// Neighbours are queued in edge insertion order and marked visited when
    /// queued. Unknown start areas yield an empty order.
    pub fn breadth_first(&self, start: &str) -> Vec<String> {
        let Some(&start) = self.index.get(start) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.names.len()];
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();
        visited[start] = true;

        while let Some(current) = queue.pop_front() {
            order.push(self.names[current].clone());
            for adj in &self.adjacency[current] {
                if !visited[adj.to] {
                    visited[adj.to] = true;
                    queue.push_back(adj.to);
                }
            }
        }
        order
    }

    /// Prim's minimum spanning tree grown from `start`.
    ///
    /// Candidate edges are ordered by weight, then from-name, then to-name.
    /// Areas unreachable from `start` are left out; an unknown start gives
    /// an empty tree.
    pub fn minimum_spanning_tree(&self, start: &str) -> SpanningTree {
        let Some(&start) = self.index.get(start) else {
            return SpanningTree::default();
        };

        let mut visited = vec![false; self.names.len()];
        let mut remaining = self.names.len() - 1;
        let mut candidates: BinaryHeap<Reverse<(u32, &str, &str, usize)>> = BinaryHeap::new();
        let mut tree = SpanningTree::default();

        visited[start] = true;
        self.push_candidates(start, &visited, &mut candidates);

        while remaining > 0 {
            let Some(Reverse((weight, from, to, to_index))) = candidates.pop() else {
                break;
            };
            // Stale: reached through a cheaper edge after this one was queued.
            if visited[to_index] {
                continue;
            }

            visited[to_index] = true;
            remaining -= 1;
            tree.edges.push(RouteEdge {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
            tree.total_cost += u64::from(weight);
            self.push_candidates(to_index, &visited, &mut candidates);
        }
        tree
    }

    fn push_candidates<'a>(
        &'a self,
        from: usize,
        visited: &[bool],
        candidates: &mut BinaryHeap<Reverse<(u32, &'a str, &'a str, usize)>>,
    ) {
        for adj in &self.adjacency[from] {
            if !visited[adj.to] {
                candidates.push(Reverse((
                    adj.weight,
                    self.names[from].as_str(),
                    self.names[adj.to].as_str(),
                    adj.to,
                )));
            }
        }
    }

    fn node(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.adjacency.push(Vec::new());
        i
    }
}
