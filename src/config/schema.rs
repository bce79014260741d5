//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::Routes;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routing scopes and their named routes.
    pub scopes: Vec<ScopeConfig>,

    /// Mount links between scopes, attached in file order.
    pub mounts: Vec<MountConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "named_routes=info,tower_http=info".to_string(),
            json_logs: false,
        }
    }
}

/// One routing scope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopeConfig {
    /// Unique scope identifier, referenced by mounts.
    pub name: String,

    /// Named routes. A string is a template, a table is a group.
    #[serde(default)]
    pub routes: Routes,
}

/// Attachment of `child` under `parent` as `name`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// Parent scope name.
    pub parent: String,

    /// Mount name; the parent's template for it is the child's prefix.
    pub name: String,

    /// Child scope name.
    pub child: String,
}
