//! Error types for route lookup, rendering and mounting.

use thiserror::Error;

use crate::routing::tree::ScopeId;

/// Errors raised by `lookup`, `render` and `resolve`.
///
/// All of these are local to a single call; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No entry exists at that dotted path in the reachable registries.
    #[error("route does not exist: {0}")]
    RouteNotFound(String),

    /// The name resolved to a group where a template was needed.
    #[error("route is a group, not a template: {0}")]
    RouteIsGroup(String),

    /// The renderer was handed a group.
    #[error("not a template: {0}")]
    NotATemplate(String),

    /// A mounted scope's parent has no template for the mount name.
    #[error("parent scope has no template for mount `{mount}`")]
    MissingMountPrefix { mount: String },

    /// `resolve` was called with no scope installed on the request.
    #[error("no routing scope is active for this request")]
    NoActiveScope,
}

impl RouteError {
    /// True for the one failure that lets a request fall back to an enclosing scope.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::RouteNotFound(_))
    }
}

/// Result type for route operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors raised while attaching one scope under another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("unknown scope id {0:?}")]
    UnknownScope(ScopeId),

    #[error("scope `{0}` cannot be mounted under itself")]
    SelfMount(String),

    /// A scope has a single mount point.
    #[error("scope `{child}` is already mounted under `{parent}`")]
    AlreadyMounted { child: String, parent: String },

    #[error("mounting `{child}` under `{parent}` would create a cycle")]
    Cycle { child: String, parent: String },
}
