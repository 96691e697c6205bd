//! Core read interfaces for the indices.
//!
//! The heap and trees only need one key each, so they are generic over these
//! narrow traits rather than tied to [`Issue`]. Host applications hand the
//! coordinator an [`IssueSource`] instead of exposing a global issue list.

use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::issue::Issue;

/// Urgency rank, lower is more urgent.
pub trait Prioritized {
    fn priority(&self) -> u8;
}

/// Unique ticket identifier.
pub trait Ticketed {
    fn ticket(&self) -> &str;
}

/// Last-update timestamp.
pub trait Timestamped {
    fn last_updated(&self) -> DateTime<Utc>;
}

/// Supplies a snapshot of issues for a rebuild.
pub trait IssueSource {
    fn issues(&self) -> &[Issue];
}

impl IssueSource for [Issue] {
    fn issues(&self) -> &[Issue] {
        self
    }
}

impl IssueSource for Vec<Issue> {
    fn issues(&self) -> &[Issue] {
        self
    }
}

/// A weighted undirected link between two service areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaLink {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

impl AreaLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Provides the area topology a route graph is populated from.
///
/// Links are returned in insertion order; traversal order depends on it.
pub trait AreaTopology {
    fn links(&self) -> Vec<AreaLink>;
}

macro_rules! forward_through_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Prioritized + ?Sized> Prioritized for $ptr<T> {
                fn priority(&self) -> u8 {
                    (**self).priority()
                }
            }

            impl<T: Ticketed + ?Sized> Ticketed for $ptr<T> {
                fn ticket(&self) -> &str {
                    (**self).ticket()
                }
            }

            impl<T: Timestamped + ?Sized> Timestamped for $ptr<T> {
                fn last_updated(&self) -> DateTime<Utc> {
                    (**self).last_updated()
                }
            }
        )*
    };
}

forward_through_pointer!(Arc, Rc, Box);

impl<T: Prioritized + ?Sized> Prioritized for &T {
    fn priority(&self) -> u8 {
        (**self).priority()
    }
}

impl<T: Ticketed + ?Sized> Ticketed for &T {
    fn ticket(&self) -> &str {
        (**self).ticket()
    }
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn last_updated(&self) -> DateTime<Utc> {
        (**self).last_updated()
    }
}
