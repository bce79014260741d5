//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create one Axum Router per routing scope
//! - Nest child scopes under their parent's template for the mount name
//! - Wire up middleware (tracing, timeout, resolver installation)
//! - Bind server to listener and shut down gracefully
//!
//! # Routes (per scope, relative to its mount point)
//! - `GET /_routes` - the scope's own route mapping as JSON
//! - `GET /_routes/{*route_name}` - mount-composed entry as JSON
//! - `GET /_path/{*route_name}?k=v` - rendered path, query pairs override params

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::error::{RouteError, RouteResult};
use crate::http::scope::{scoped_router, to_axum_path};
use crate::lifecycle::signals::shutdown_signal;
use crate::routing::{ParamSet, RequestContext, Resolver, RouteEntry, RouteTree, Routes, ScopeId};

/// HTTP server exposing a route tree.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `tree` with `root` at `/`.
    pub fn new(config: AppConfig, tree: Arc<RouteTree>, root: ScopeId) -> Self {
        let router = Self::build_router(&config, &tree, root);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, tree: &Arc<RouteTree>, root: ScopeId) -> Router {
        scope_router(tree, root)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Config the server was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The assembled router, for embedding in another application.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Router for one scope with its mounted children nested inside.
fn scope_router(tree: &Arc<RouteTree>, id: ScopeId) -> Router {
    let scope = tree.scope(id);
    let mut router = Router::new()
        .route("/_routes", get(list_routes))
        .route("/_routes/{*route_name}", get(show_route))
        .route("/_path/{*route_name}", get(render_path));

    for (mount_name, child) in scope.mounts() {
        let prefix = match scope.registry().lookup(mount_name) {
            Ok(RouteEntry::Template(template)) => to_axum_path(template),
            _ => {
                tracing::warn!(
                    scope = %scope.label(),
                    mount = %mount_name,
                    "No template for mount, child scope not served"
                );
                continue;
            }
        };
        if prefix == "/" {
            tracing::warn!(scope = %scope.label(), mount = %mount_name, "Cannot nest a scope at the root");
            continue;
        }

        tracing::debug!(scope = %scope.label(), child = %child.label(), path = %prefix, "Nesting scope");
        router = router.nest(&prefix, scope_router(tree, child.id()));
    }

    scoped_router(router, tree.clone(), id)
}

fn current_scope(ctx: &RequestContext) -> RouteResult<&Resolver> {
    ctx.current().ok_or(RouteError::NoActiveScope)
}

async fn list_routes(Extension(ctx): Extension<RequestContext>) -> RouteResult<Json<Routes>> {
    let resolver = current_scope(&ctx)?;
    Ok(Json(resolver.scope().routes().clone()))
}

async fn show_route(
    Extension(ctx): Extension<RequestContext>,
    Path(params): Path<Vec<(String, String)>>,
) -> RouteResult<Json<RouteEntry>> {
    let name = route_name(&params)?;
    let resolver = current_scope(&ctx)?;
    Ok(Json(resolver.lookup(name)?))
}

async fn render_path(
    Extension(ctx): Extension<RequestContext>,
    Path(params): Path<Vec<(String, String)>>,
    Query(overrides): Query<Vec<(String, String)>>,
) -> RouteResult<String> {
    let name = route_name(&params)?;
    let overrides: ParamSet = overrides.into_iter().collect();
    ctx.resolve(name, Some(&overrides))
}

/// The wildcard capture, among any captures from enclosing mount prefixes.
fn route_name(params: &[(String, String)]) -> RouteResult<&str> {
    params
        .iter()
        .rev()
        .find(|(key, _)| key == "route_name")
        .map(|(_, value)| value.trim_start_matches('/'))
        .ok_or_else(|| RouteError::RouteNotFound(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::{build_tree, parse_config};

    const ROUTES: &str = r#"
[timeouts]
request_secs = 5

[[scopes]]
name = "app"
[scopes.routes]
orgs = "/orgs/:org"
home = "/"

[[scopes]]
name = "team"
[scopes.routes]
member = "/members/:member"

[[mounts]]
parent = "app"
name = "orgs"
child = "team"
"#;

    async fn call(router: &Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_router_serves_nested_scopes() {
        let config = parse_config(ROUTES).unwrap();
        let (tree, root) = build_tree(&config).unwrap();
        let server = HttpServer::new(config, Arc::new(tree), root);
        assert_eq!(server.config().timeouts.request_secs, 5);

        let router = server.into_router();
        assert_eq!(
            call(&router, "/orgs/acme/_path/member?member=bob").await,
            (StatusCode::OK, "/orgs/acme/members/bob".into())
        );
        assert_eq!(call(&router, "/orgs/acme/_path/home").await, (StatusCode::OK, "/".into()));
        assert_eq!(
            call(&router, "/_path/orgs.zz").await,
            (StatusCode::NOT_FOUND, "route does not exist: orgs.zz".into())
        );
    }

    #[test]
    fn test_route_name_picks_wildcard() {
        let params = vec![
            ("org".to_string(), "acme".to_string()),
            ("route_name".to_string(), "users.show".to_string()),
        ];
        assert_eq!(route_name(&params), Ok("users.show"));
        assert!(route_name(&[]).is_err());
    }
}
