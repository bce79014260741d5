//! Named route storage for one routing scope.
//!
//! # Responsibilities
//! - Store name → entry mappings
//! - Resolve dotted names through nested groups
//!
//! # Design Decisions
//! - Redefining a name overwrites the earlier entry
//! - Populated during setup only; read-only while serving

use crate::error::{RouteError, RouteResult};
use crate::routing::entry::{RouteEntry, Routes};

/// Name → entry mapping owned by exactly one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: Routes,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entry` under `name`. Returns `self` for chaining.
    pub fn define(&mut self, name: impl Into<String>, entry: impl Into<RouteEntry>) -> &mut Self {
        let name = name.into();
        tracing::debug!(name = %name, "Defining route");
        self.routes.insert(name, entry.into());
        self
    }

    /// The whole mapping, as defined.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Resolve `name`, walking one group level per `.`-separated segment.
    pub fn lookup(&self, name: &str) -> RouteResult<&RouteEntry> {
        let not_found = || RouteError::RouteNotFound(name.to_string());
        let mut segments = name.split('.');

        let first = segments.next().ok_or_else(not_found)?;
        let mut entry = self.routes.get(first).ok_or_else(not_found)?;
        for segment in segments {
            entry = entry.get(segment).ok_or_else(not_found)?;
        }
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl From<Routes> for RouteRegistry {
    fn from(routes: Routes) -> Self {
        Self { routes }
    }
}
