//! Route entry definitions.
//!
//! A route is either a path template such as `/users/:id` or a named group of
//! further routes, addressed with dotted names (`users.show`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::routing::path::RoutePath;

/// Ordered mapping of route names to entries.
pub type Routes = IndexMap<String, RouteEntry>;

/// A named route definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RouteEntry {
    /// Path pattern with `:name` placeholder segments.
    Template(String),
    /// Nested routes. Never rendered directly.
    Group(Routes),
}

impl RouteEntry {
    /// Build a group from `(name, entry)` pairs.
    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, RouteEntry)>,
        K: Into<String>,
    {
        RouteEntry::Group(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The template string, if this is a template.
    pub fn as_template(&self) -> Option<&str> {
        match self {
            RouteEntry::Template(t) => Some(t),
            RouteEntry::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, RouteEntry::Group(_))
    }

    /// Child entry of a group.
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        match self {
            RouteEntry::Group(routes) => routes.get(name),
            RouteEntry::Template(_) => None,
        }
    }

    /// Prepend `prefix` to every template reachable from this entry.
    pub fn prefixed(&self, prefix: &RoutePath) -> RouteEntry {
        match self {
            RouteEntry::Template(t) => {
                RouteEntry::Template(prefix.join(&RoutePath::parse(t)).to_string())
            }
            RouteEntry::Group(routes) => RouteEntry::Group(
                routes
                    .iter()
                    .map(|(name, entry)| (name.clone(), entry.prefixed(prefix)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for RouteEntry {
    fn from(template: &str) -> Self {
        RouteEntry::Template(template.to_string())
    }
}

impl From<String> for RouteEntry {
    fn from(template: String) -> Self {
        RouteEntry::Template(template)
    }
}

impl From<Routes> for RouteEntry {
    fn from(routes: Routes) -> Self {
        RouteEntry::Group(routes)
    }
}
