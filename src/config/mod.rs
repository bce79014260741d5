//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → build.rs (registries + mount links)
//!     → RouteTree, shared via Arc to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes are fixed before serving starts
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod build;
pub mod loader;
pub mod schema;
pub mod validation;

pub use build::build_tree;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig, MountConfig, ObservabilityConfig, ScopeConfig, TimeoutConfig};
pub use validation::ValidationError;
