//! Per-scope resolver installation.
//!
//! # Responsibilities
//! - Capture the request's matched path parameters
//! - Push the scope's resolver onto the request's `RequestContext`
//! - Translate route templates into axum paths for nesting
//!
//! # Design Decisions
//! - Installed with `route_layer`, so it runs after matching and sees params
//! - An enclosing scope's middleware runs first; the resolver stack therefore
//!   follows the order the request entered the scopes
//! - Each layer inserts its own copy of the context, so nothing needs to be
//!   restored when an inner scope returns or fails

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::RawPathParamsRejection, RawPathParams, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};

use crate::routing::{ParamSet, RequestContext, Resolver, RouteTree, RoutePath, ScopeId};

/// Install `resolver` on the request before the scope's handlers run.
pub async fn install_resolver(
    State(resolver): State<Resolver>,
    path_params: Result<RawPathParams, RawPathParamsRejection>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let mut ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();

    if let Ok(raw) = path_params {
        ctx.set_params(raw.iter().collect::<ParamSet>());
    }

    tracing::trace!(
        scope = %resolver.scope().label(),
        depth = ctx.depth() + 1,
        "Installing route resolver"
    );

    request.extensions_mut().insert(ctx.with_resolver(resolver));
    next.run(request).await
}

/// Wrap every route currently in `router` with `scope`'s resolver.
///
/// # Panics
/// If `router` has no routes yet (axum rejects an empty `route_layer`).
pub fn scoped_router(router: Router, tree: Arc<RouteTree>, scope: ScopeId) -> Router {
    let resolver = Resolver::new(tree, scope);
    router.route_layer(middleware::from_fn_with_state(resolver, install_resolver))
}

/// `/users/:id` → `/users/{id}`.
pub fn to_axum_path(template: &str) -> String {
    let path = RoutePath::parse(template);
    let segments: Vec<String> = path
        .segments()
        .iter()
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => segment.clone(),
        })
        .collect();
    format!("/{}", segments.join("/"))
}
