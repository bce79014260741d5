//! Named routing subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     scope registries ← define(name, entry)     (registry.rs)
//!     parent ─ mount(name) → child                (tree.rs)
//!
//! Request:
//!     RequestContext (params + resolver stack)    (resolver.rs)
//!     → RouteTree::lookup (mount-composed)        (tree.rs)
//!     → render(template, params)                  (path.rs)
//!     → concrete path string
//! ```
//!
//! # Design Decisions
//! - Name → path only; matching requests to routes is the host framework's job
//! - Registries and mount links are immutable once serving starts
//! - Entries are an explicit `Template` / `Group` enum

pub mod entry;
pub mod path;
pub mod registry;
pub mod resolver;
pub mod tree;

pub use entry::{RouteEntry, Routes};
pub use path::{render, render_entry, RoutePath};
pub use registry::RouteRegistry;
pub use resolver::{ParamSet, RequestContext, Resolver, ResolverGuard};
pub use tree::{MountLink, RouteTree, Scope, ScopeId};
