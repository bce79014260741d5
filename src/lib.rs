//! Named routes: register symbolic names for URL path templates, compose
//! them across mounted scopes, and render them back into concrete paths.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use error::{MountError, RouteError, RouteResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ParamSet, RequestContext, Resolver, RouteEntry, RouteRegistry, RouteTree, ScopeId};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
