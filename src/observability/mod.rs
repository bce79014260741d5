//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (setup: define/mount, request: fallbacks, errors)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, JSON or human-readable)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`scope`, `name`, `mount`) rather than formatted text
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
