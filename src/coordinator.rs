//! Index coordinator.
//!
//! Owns the urgency heap, both trees and the snapshot they were built from,
//! and answers the presentation layer's queries. Issues are shared between
//! the structures behind `Arc`, so every index hands back the same record.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::graph::{ServiceAreaGraph, SpanningTree};
use crate::issue::{Category, DEFAULT_AREA, Issue};
use crate::priority_queue::PriorityQueue;
use crate::recency_index::RecencyIndex;
use crate::ticket_index::TicketIndex;
use crate::topology::WardTopology;
use crate::traits::{AreaTopology, IssueSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorOptions {
    /// Area a route starts from when nothing better is known.
    pub default_start_area: String,
    /// Start routes from the area of the most urgent open issue.
    pub route_from_most_urgent: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            default_start_area: DEFAULT_AREA.to_string(),
            route_from_most_urgent: true,
        }
    }
}

/// Open-issue counts for one service area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area: String,
    pub pending: usize,
    /// Non-zero counts only, in [`Category::ALL`] order.
    pub by_category: Vec<(Category, usize)>,
}

/// One area on a planned route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStop {
    pub area: String,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub start: String,
    /// Breadth-first visit order from `start`.
    pub stops: Vec<RouteStop>,
    /// Cheapest set of links connecting the reachable areas.
    pub tree: SpanningTree,
}

#[derive(Debug)]
pub struct IndexCoordinator<P = WardTopology> {
    options: CoordinatorOptions,
    topology: P,
    issues: Vec<Arc<Issue>>,
    urgency: PriorityQueue<Arc<Issue>>,
    tickets: TicketIndex<Arc<Issue>>,
    recency: RecencyIndex<Arc<Issue>>,
}

impl Default for IndexCoordinator<WardTopology> {
    fn default() -> Self {
        Self::new(CoordinatorOptions::default(), WardTopology::default())
    }
}

impl<P: AreaTopology> IndexCoordinator<P> {
    pub fn new(options: CoordinatorOptions, topology: P) -> Self {
        Self {
            options,
            topology,
            issues: Vec::new(),
            urgency: PriorityQueue::new(),
            tickets: TicketIndex::new(),
            recency: RecencyIndex::new(),
        }
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    /// Discards every structure and rebuilds from `source`.
    ///
    /// Priorities are assigned from the category rule table.
    pub fn rebuild<S: IssueSource + ?Sized>(&mut self, source: &S) {
        self.issues = source
            .issues()
            .iter()
            .map(|issue| {
                let mut issue = issue.clone();
                issue.assign_priority();
                Arc::new(issue)
            })
            .collect();

        self.urgency.build_heap(self.issues.iter().cloned());
        self.tickets.clear();
        self.recency.clear();
        for issue in &self.issues {
            self.tickets.insert(Arc::clone(issue));
            self.recency.insert(Arc::clone(issue));
        }

        debug!(
            issues = self.issues.len(),
            queued = self.urgency.len(),
            tickets = self.tickets.count(),
            timestamps = self.recency.len(),
            "rebuilt indices"
        );
    }

    /// Adds one new issue to every structure without a rebuild.
    pub fn append(&mut self, mut issue: Issue) {
        issue.assign_priority();
        let issue = Arc::new(issue);

        self.urgency.insert(Arc::clone(&issue));
        let ticket_added = self.tickets.insert(Arc::clone(&issue));
        let timestamp_added = self.recency.insert(Arc::clone(&issue));
        debug!(
            ticket = %issue.ticket,
            priority = issue.priority,
            ticket_added,
            timestamp_added,
            "appended issue"
        );
        self.issues.push(issue);
    }

    /// Issues in snapshot order, priorities assigned.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().map(|issue| issue.as_ref())
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Most urgent queued issue.
    pub fn peek_urgent(&self) -> Option<&Issue> {
        self.urgency.peek().map(|issue| issue.as_ref())
    }

    /// Removes the most urgent issue from the queue.
    ///
    /// The issue stays in the trees and the snapshot.
    pub fn next_urgent(&mut self) -> Option<Arc<Issue>> {
        self.urgency.extract_min()
    }

    pub fn queued(&self) -> usize {
        self.urgency.len()
    }

    pub fn find_ticket(&self, ticket: &str) -> Option<&Issue> {
        self.tickets.search(ticket).map(|issue| issue.as_ref())
    }

    /// Issues in ascending ticket order.
    pub fn by_ticket(&self) -> Vec<&Issue> {
        self.tickets
            .in_order_list()
            .into_iter()
            .map(|issue| issue.as_ref())
            .collect()
    }

    /// Issues in ascending last-update order.
    pub fn by_recency(&self) -> Vec<&Issue> {
        self.recency
            .in_order_list()
            .into_iter()
            .map(|issue| issue.as_ref())
            .collect()
    }

    pub fn most_recent(&self) -> Option<&Issue> {
        self.recency.most_recent().map(|issue| issue.as_ref())
    }

    pub fn recency_is_balanced(&self) -> bool {
        self.recency.is_balanced()
    }

    /// Issues in ticket order matching every whitespace-separated token.
    ///
    /// A token matches when it occurs, ignoring case, in the ticket,
    /// category, location, description or channel. A blank query matches
    /// everything.
    pub fn filter(&self, query: &str) -> Vec<&Issue> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        self.by_ticket()
            .into_iter()
            .filter(|issue| matches_all(issue, &tokens))
            .collect()
    }

    /// Distinct areas in first-seen snapshot order.
    pub fn areas(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.issues()
            .map(|issue| issue.area.as_str())
            .filter(|area| seen.insert(*area))
            .collect()
    }

    /// Issues filed under `area`, most urgent first.
    ///
    /// Equal priorities keep snapshot order.
    pub fn issues_in_area(&self, area: &str) -> Vec<&Issue> {
        let mut found: Vec<&Issue> = self.issues().filter(|issue| issue.area == area).collect();
        found.sort_by_key(|issue| issue.priority);
        found
    }

    /// Open issues in `area`.
    pub fn pending_in(&self, area: &str) -> usize {
        self.issues()
            .filter(|issue| issue.area == area && issue.status.is_open())
            .count()
    }

    /// Open-issue counts per area, areas in first-seen order.
    pub fn area_summaries(&self) -> Vec<AreaSummary> {
        self.areas()
            .into_iter()
            .map(|area| {
                let open: Vec<&Issue> = self
                    .issues()
                    .filter(|issue| issue.area == area && issue.status.is_open())
                    .collect();
                let by_category = Category::ALL
                    .into_iter()
                    .map(|category| {
                        let count = open.iter().filter(|issue| issue.category == category).count();
                        (category, count)
                    })
                    .filter(|(_, count)| *count > 0)
                    .collect();
                AreaSummary {
                    area: area.to_string(),
                    pending: open.len(),
                    by_category,
                }
            })
            .collect()
    }

    /// Area a route starts from when the caller does not name one.
    pub fn default_route_start(&self) -> &str {
        if self.options.route_from_most_urgent {
            let most_urgent = self
                .issues()
                .filter(|issue| issue.status.is_open() && !issue.area.trim().is_empty())
                .min_by_key(|issue| issue.priority);
            if let Some(issue) = most_urgent {
                return &issue.area;
            }
        }
        &self.options.default_start_area
    }

    /// Plans a visit order and the cheapest connecting links over the area
    /// topology, starting from `start` or [`Self::default_route_start`].
    ///
    /// An unknown start area gives a plan with no stops and an empty tree.
    pub fn route_plan(&self, start: Option<&str>) -> Result<RoutePlan, GraphError> {
        let graph = ServiceAreaGraph::from_topology(&self.topology)?;
        let start = match start.map(str::trim) {
            Some(area) if !area.is_empty() => area,
            _ => self.default_route_start(),
        };

        if !graph.contains(start) {
            warn!(start, "route start is not a known service area");
        }

        let stops: Vec<RouteStop> = graph
            .breadth_first(start)
            .into_iter()
            .map(|area| RouteStop {
                pending: self.pending_in(&area),
                area,
            })
            .collect();
        let tree = graph.minimum_spanning_tree(start);

        debug!(start, stops = stops.len(), total_cost = tree.total_cost, "planned route");
        Ok(RoutePlan {
            start: start.to_string(),
            stops,
            tree,
        })
    }
}

/// Groups issues by category, categories in first-seen order.
pub fn group_by_category<'a, I>(issues: I) -> Vec<(Category, Vec<&'a Issue>)>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut groups: Vec<(Category, Vec<&'a Issue>)> = Vec::new();
    for issue in issues {
        match groups.iter_mut().find(|(category, _)| *category == issue.category) {
            Some((_, members)) => members.push(issue),
            None => groups.push((issue.category, vec![issue])),
        }
    }
    groups
}

fn matches_all(issue: &Issue, tokens: &[String]) -> bool {
    let fields = [
        issue.ticket.to_lowercase(),
        issue.category.as_str().to_lowercase(),
        issue.location.to_lowercase(),
        issue.description.to_lowercase(),
        issue.channel.to_lowercase(),
    ];
    tokens
        .iter()
        .all(|token| fields.iter().any(|field| field.contains(token.as_str())))
}
