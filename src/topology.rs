//! Fixed area topologies.
//!
//! [`WardTopology`] is the default travel network between wards; it is the
//! graph the route planner falls back to when the host injects nothing else.

use crate::issue::Category;
use crate::traits::{AreaLink, AreaTopology};

/// Weighted travel links between municipal wards (costs in minutes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardTopology {
    links: Vec<AreaLink>,
}

impl Default for WardTopology {
    fn default() -> Self {
        Self {
            links: vec![
                AreaLink::new("Ward A", "Ward B", 5),
                AreaLink::new("Ward B", "Ward C", 3),
                AreaLink::new("Ward A", "Ward D", 2),
                AreaLink::new("Ward C", "Ward D", 4),
            ],
        }
    }
}

impl WardTopology {
    /// A topology with exactly `links`, in order.
    pub fn new(links: Vec<AreaLink>) -> Self {
        Self { links }
    }

    pub fn with_link(mut self, from: impl Into<String>, to: impl Into<String>, weight: u32) -> Self {
        self.links.push(AreaLink::new(from, to, weight));
        self
    }
}

impl AreaTopology for WardTopology {
    fn links(&self) -> Vec<AreaLink> {
        self.links.clone()
    }
}

/// Unweighted coordination links between service departments.
///
/// Each department is named after the issue category it handles. Every link
/// has weight 1, so a breadth-first walk answers which departments a given
/// one coordinates with, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentTopology {
    links: Vec<(Category, Category)>,
}

impl Default for DepartmentTopology {
    fn default() -> Self {
        Self {
            links: vec![
                (Category::Water, Category::Sanitation),
                (Category::Roads, Category::Electricity),
                (Category::Roads, Category::SolidWaste),
                (Category::Sanitation, Category::SolidWaste),
            ],
        }
    }
}

impl DepartmentTopology {
    /// A topology with no links.
    pub fn empty() -> Self {
        Self { links: Vec::new() }
    }

    pub fn with_link(mut self, a: Category, b: Category) -> Self {
        self.links.push((a, b));
        self
    }
}

impl AreaTopology for DepartmentTopology {
    fn links(&self) -> Vec<AreaLink> {
        self.links
            .iter()
            .map(|(a, b)| AreaLink::new(a.as_str(), b.as_str(), 1))
            .collect()
    }
}

impl AreaTopology for [AreaLink] {
    fn links(&self) -> Vec<AreaLink> {
        self.to_vec()
    }
}

impl AreaTopology for Vec<AreaLink> {
    fn links(&self) -> Vec<AreaLink> {
        self.clone()
    }
}
