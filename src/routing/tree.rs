//! Routing scopes and mount composition.
//!
//! # Responsibilities
//! - Own every scope's registry in one arena
//! - Record mount links (child → parent, labeled with the mount name)
//! - Compose lookups across mount boundaries
//!
//! # Composition
//! ```text
//! lookup(scope, "m.rest")   where scope mounts child under "m"
//!     → lookup(child, "rest")            (parent side)
//!
//! lookup(scope, name)       where scope is mounted under "m" in parent
//!     → own registry entry for name
//!     → prefixed with lookup(parent, "m") (child side, recursive)
//! ```
//!
//! # Design Decisions
//! - Scopes are addressed by `ScopeId`; links are indices, not pointers
//! - A scope has at most one parent; a parent may mount many children
//! - Mount names are checked newest first, so a later mount under the same
//!   name shadows the earlier one

use std::fmt;

use indexmap::IndexMap;

use crate::error::{MountError, RouteError, RouteResult};
use crate::routing::entry::{RouteEntry, Routes};
use crate::routing::path::RoutePath;
use crate::routing::registry::RouteRegistry;

/// Index of a scope inside a [`RouteTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Directed link from a child scope to the parent it is mounted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountLink {
    pub parent: ScopeId,
    pub mount_name: String,
}

#[derive(Debug)]
struct ScopeNode {
    label: String,
    registry: RouteRegistry,
    link: Option<MountLink>,
    /// Children keyed by mount name, in attachment order.
    mounts: IndexMap<String, ScopeId>,
}

/// Every routing scope of an application and the mount links between them.
#[derive(Debug, Default)]
pub struct RouteTree {
    scopes: Vec<ScopeNode>,
}

impl RouteTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, unmounted scope.
    pub fn add_scope(&mut self, label: impl Into<String>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(ScopeNode {
            label: label.into(),
            registry: RouteRegistry::new(),
            link: None,
            mounts: IndexMap::new(),
        });
        id
    }

    /// Number of scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Mutable registry of a scope, for `define` chains during setup.
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn registry_mut(&mut self, id: ScopeId) -> &mut RouteRegistry {
        &mut self.scopes[id.0].registry
    }

    /// Read-only view of one scope.
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn scope(&self, id: ScopeId) -> Scope<'_> {
        assert!(id.0 < self.scopes.len(), "scope {} is not part of this tree", id);
        Scope { tree: self, id }
    }

    /// First scope with the given label.
    pub fn find(&self, label: &str) -> Option<ScopeId> {
        self.scopes.iter().position(|s| s.label == label).map(ScopeId)
    }

    pub fn ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len()).map(ScopeId)
    }

    /// Scopes without a parent.
    pub fn roots(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.ids().filter(|id| self.scopes[id.0].link.is_none())
    }

    /// Attach `child` under `parent` as `mount_name`.
    ///
    /// After this, `parent` answers `"<mount_name>.<rest>"` from `child`, and
    /// every lookup on `child` carries the parent's prefix for `mount_name`.
    pub fn mount(
        &mut self,
        parent: ScopeId,
        mount_name: impl Into<String>,
        child: ScopeId,
    ) -> Result<(), MountError> {
        let parent_node = self.scopes.get(parent.0).ok_or(MountError::UnknownScope(parent))?;
        let child_node = self.scopes.get(child.0).ok_or(MountError::UnknownScope(child))?;

        if parent == child {
            return Err(MountError::SelfMount(child_node.label.clone()));
        }
        if let Some(link) = &child_node.link {
            return Err(MountError::AlreadyMounted {
                child: child_node.label.clone(),
                parent: self.scopes[link.parent.0].label.clone(),
            });
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(MountError::Cycle {
                child: child_node.label.clone(),
                parent: parent_node.label.clone(),
            });
        }

        let mount_name = mount_name.into();
        tracing::info!(
            parent = %parent_node.label,
            child = %child_node.label,
            mount = %mount_name,
            "Mounting scope"
        );

        // Newest mount first, matching the order a chain of wrappers would check.
        let mounts = &mut self.scopes[parent.0].mounts;
        mounts.shift_remove(&mount_name);
        mounts.shift_insert(0, mount_name.clone(), child);

        self.scopes[child.0].link = Some(MountLink { parent, mount_name });
        Ok(())
    }

    /// `id` followed by its parent, grandparent and so on.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), move |current| {
            self.scopes.get(current.0)?.link.as_ref().map(|l| l.parent)
        })
    }

    /// Mount-composed lookup of `name` from the perspective of `id`.
    ///
    /// A miss is reported under the full `name`, even when it happened inside
    /// a mounted child.
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn lookup(&self, id: ScopeId, name: &str) -> RouteResult<RouteEntry> {
        let node = &self.scopes[id.0];

        if let Some((head, rest)) = name.split_once('.') {
            if let Some(&child) = node.mounts.get(head) {
                return self.lookup(child, rest).map_err(|e| match e {
                    RouteError::RouteNotFound(_) => RouteError::RouteNotFound(name.to_string()),
                    other => other,
                });
            }
        }

        let entry = node.registry.lookup(name)?;
        match &node.link {
            None => Ok(entry.clone()),
            Some(link) => {
                let prefix = self.mount_prefix(link)?;
                Ok(entry.prefixed(&prefix))
            }
        }
    }

    /// Fully-qualified prefix a child receives from its mount link.
    ///
    /// Never yields `RouteNotFound`: a child whose prefix cannot be built must
    /// not let the request fall back to an enclosing scope's route.
    fn mount_prefix(&self, link: &MountLink) -> RouteResult<RoutePath> {
        match self.lookup(link.parent, &link.mount_name) {
            Ok(RouteEntry::Template(template)) => Ok(RoutePath::parse(&template)),
            Ok(RouteEntry::Group(_)) | Err(RouteError::RouteNotFound(_)) => {
                Err(RouteError::MissingMountPrefix {
                    mount: link.mount_name.clone(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Borrowed view of one scope in a [`RouteTree`].
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    tree: &'a RouteTree,
    id: ScopeId,
}

impl<'a> Scope<'a> {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn label(&self) -> &'a str {
        &self.node().label
    }

    /// The scope's own mapping, without any mount prefix applied.
    pub fn routes(&self) -> &'a Routes {
        self.node().registry.routes()
    }

    pub fn registry(&self) -> &'a RouteRegistry {
        &self.node().registry
    }

    /// Mount-composed lookup.
    pub fn lookup(&self, name: &str) -> RouteResult<RouteEntry> {
        self.tree.lookup(self.id, name)
    }

    pub fn link(&self) -> Option<&'a MountLink> {
        self.node().link.as_ref()
    }

    pub fn parent(&self) -> Option<Scope<'a>> {
        self.link().map(|l| self.tree.scope(l.parent))
    }

    /// Mounted children as `(mount name, child)`, newest first.
    pub fn mounts(&self) -> impl Iterator<Item = (&'a str, Scope<'a>)> + 'a {
        let tree = self.tree;
        self.node()
            .mounts
            .iter()
            .map(move |(name, id)| (name.as_str(), tree.scope(*id)))
    }

    fn node(&self) -> &'a ScopeNode {
        &self.tree.scopes[self.id.0]
    }
}
