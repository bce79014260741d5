//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one nested router per scope)
//!     → scope.rs (each entered scope pushes its resolver)
//!     → handler: Extension<RequestContext>::resolve(name, override)
//!     → response.rs (RouteError → status + message)
//! ```

pub mod response;
pub mod scope;
pub mod server;

pub use scope::{install_resolver, scoped_router, to_axum_path};
pub use server::HttpServer;
