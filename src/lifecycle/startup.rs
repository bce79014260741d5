//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build every scope registry and attach mounts
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The route tree is frozen behind an `Arc` before it is handed out

use std::path::Path;
use std::sync::Arc;

use crate::config::{build_tree, load_config, AppConfig, ConfigError};
use crate::routing::{RouteTree, ScopeId};

/// Everything needed to serve or query routes.
pub struct Prepared {
    pub config: AppConfig,
    pub tree: Arc<RouteTree>,
    pub root: ScopeId,
}

/// Load `path` and build its route tree.
pub fn prepare(path: &Path) -> Result<Prepared, ConfigError> {
    let config = load_config(path)?;
    let (tree, root) = build_tree(&config)?;

    tracing::info!(
        scopes = tree.len(),
        root = %tree.scope(root).label(),
        "Route tree built"
    );

    Ok(Prepared {
        config,
        tree: Arc::new(tree),
        root,
    })
}
