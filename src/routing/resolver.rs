//! Per-request path resolution.
//!
//! # Data Flow
//! ```text
//! request enters scope A      → push resolver(A)
//!   request enters scope B    → push resolver(B)
//!     handler: resolve(name)  → B.lookup(name)
//!                                 ├─ found    → render with request params (+ override)
//!                                 └─ missing  → A.lookup(name) → ...
//!   leave B                   → pop
//! leave A                     → pop
//! ```
//!
//! # Design Decisions
//! - Only `RouteNotFound` falls back to the enclosing scope; a local name that
//!   resolves to a group is reported, never masked by an ancestor's template
//! - The request-time chain is independent of the static mount tree: a request
//!   may pass through scopes that are not mounted in each other

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};
use crate::routing::entry::RouteEntry;
use crate::routing::path::render;
use crate::routing::tree::{RouteTree, Scope, ScopeId};

/// Parameter bindings for one request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet(IndexMap<String, String>);

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a binding. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self` overlaid with `overrides`; override values win.
    pub fn merge(&self, overrides: &ParamSet) -> ParamSet {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.insert(key, value);
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Resolves names against one scope of a shared tree.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: Arc<RouteTree>,
    scope: ScopeId,
}

impl Resolver {
    pub fn new(tree: Arc<RouteTree>, scope: ScopeId) -> Self {
        Self { tree, scope }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.scope
    }

    pub fn scope(&self) -> Scope<'_> {
        self.tree.scope(self.scope)
    }

    pub fn lookup(&self, name: &str) -> RouteResult<RouteEntry> {
        self.tree.lookup(self.scope, name)
    }
}

/// Request-scoped state: the matched parameters and the stack of resolvers
/// installed by the scopes the request has entered so far.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    params: ParamSet,
    resolvers: Vec<Resolver>,
}

impl RequestContext {
    pub fn new(params: ParamSet) -> Self {
        Self {
            params,
            resolvers: Vec::new(),
        }
    }

    /// Context as if a request had entered every ancestor of `scope`, root first.
    pub fn for_scope(tree: Arc<RouteTree>, scope: ScopeId, params: ParamSet) -> Self {
        let mut chain: Vec<ScopeId> = tree.ancestors(scope).collect();
        chain.reverse();
        Self {
            params,
            resolvers: chain
                .into_iter()
                .map(|id| Resolver::new(tree.clone(), id))
                .collect(),
        }
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn set_params(&mut self, params: ParamSet) {
        self.params = params;
    }

    /// The innermost installed resolver.
    pub fn current(&self) -> Option<&Resolver> {
        self.resolvers.last()
    }

    pub fn depth(&self) -> usize {
        self.resolvers.len()
    }

    /// Install `resolver` until the returned guard is dropped.
    pub fn enter(&mut self, resolver: Resolver) -> ResolverGuard<'_> {
        let depth = self.resolvers.len();
        self.resolvers.push(resolver);
        ResolverGuard { ctx: self, depth }
    }

    /// A copy of this context with `resolver` installed on top.
    pub fn with_resolver(&self, resolver: Resolver) -> Self {
        let mut next = self.clone();
        next.resolvers.push(resolver);
        next
    }

    /// Render `name` from the innermost scope, falling back outward on a miss.
    pub fn resolve(&self, name: &str, overrides: Option<&ParamSet>) -> RouteResult<String> {
        let mut last_miss = RouteError::NoActiveScope;

        for resolver in self.resolvers.iter().rev() {
            match resolver.lookup(name) {
                Ok(RouteEntry::Template(template)) => {
                    let params = match overrides {
                        Some(o) => self.params.merge(o),
                        None => self.params.clone(),
                    };
                    return Ok(render(&template, &params));
                }
                Ok(RouteEntry::Group(_)) => {
                    return Err(RouteError::RouteIsGroup(name.to_string()));
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(
                        scope = %resolver.scope().label(),
                        name = %name,
                        "Route not defined in scope, falling back"
                    );
                    last_miss = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_miss)
    }
}

/// Pops the resolver it guards on drop, on every exit path.
#[derive(Debug)]
pub struct ResolverGuard<'a> {
    ctx: &'a mut RequestContext,
    depth: usize,
}

impl Deref for ResolverGuard<'_> {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ResolverGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ResolverGuard<'_> {
    fn drop(&mut self) {
        self.ctx.resolvers.truncate(self.depth);
    }
}
