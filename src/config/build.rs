//! Building a `RouteTree` from validated configuration.

use std::collections::HashMap;

use crate::config::loader::ConfigError;
use crate::config::schema::AppConfig;
use crate::config::validation::ValidationError;
use crate::routing::{RouteTree, ScopeId};

/// Create every scope, define its routes, then attach mounts in file order.
///
/// Returns the tree and its root scope.
pub fn build_tree(config: &AppConfig) -> Result<(RouteTree, ScopeId), ConfigError> {
    let mut tree = RouteTree::new();
    let mut ids = HashMap::new();

    for scope in &config.scopes {
        let id = tree.add_scope(scope.name.clone());
        let registry = tree.registry_mut(id);
        for (name, entry) in &scope.routes {
            registry.define(name.clone(), entry.clone());
        }
        ids.insert(scope.name.as_str(), id);
    }

    for mount in &config.mounts {
        let scope_id = |name: &str| {
            ids.get(name).copied().ok_or_else(|| {
                ConfigError::Validation(vec![ValidationError::UnknownScope {
                    mount: mount.name.clone(),
                    scope: name.to_string(),
                }])
            })
        };
        let parent = scope_id(&mount.parent)?;
        let child = scope_id(&mount.child)?;
        tree.mount(parent, mount.name.clone(), child)?;
    }

    let roots: Vec<ScopeId> = tree.roots().collect();
    match roots.as_slice() {
        [root] => Ok((tree, *root)),
        _ => Err(ConfigError::Validation(vec![ValidationError::RootCount(roots.len())])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;
    use crate::routing::RouteEntry;

    #[test]
    fn test_build_nested_tree() {
        let config = parse_config(
            r#"
            [[scopes]]
            name = "app"
            routes = { home = "/", admin = "/admin/" }

            [[scopes]]
            name = "admin"
            [scopes.routes]
            dashboard = "/dashboard"
            users = { index = "/users", show = "/users/:id" }

            [[mounts]]
            parent = "app"
            name = "admin"
            child = "admin"
            "#,
        )
        .unwrap();

        let (tree, root) = build_tree(&config).unwrap();
        assert_eq!(tree.scope(root).label(), "app");

        let admin = tree.find("admin").unwrap();
        assert_eq!(tree.lookup(admin, "dashboard"), Ok(RouteEntry::from("/admin/dashboard")));
        assert_eq!(tree.lookup(root, "admin.users.show"), Ok(RouteEntry::from("/admin/users/:id")));
    }

    #[test]
    fn test_unvalidated_cycle_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [[scopes]]
            name = "a"
            routes = { b = "/b" }
            [[scopes]]
            name = "b"
            routes = { a = "/a" }

            [[mounts]]
            parent = "a"
            name = "b"
            child = "b"
            [[mounts]]
            parent = "b"
            name = "a"
            child = "a"
            "#,
        )
        .unwrap();

        assert!(matches!(build_tree(&config), Err(ConfigError::Mount(_))));
    }
}
