//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (mounts reference existing scopes)
//! - Check mount structure (single parent, no cycles, one root)
//! - Check every mount has a usable prefix template in its parent
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::routing::{RouteEntry, RoutePath};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("scope #{0} has an empty name")]
    EmptyScopeName(usize),

    #[error("duplicate scope `{0}`")]
    DuplicateScope(String),

    #[error("mount `{mount}` references unknown scope `{scope}`")]
    UnknownScope { mount: String, scope: String },

    #[error("scope `{0}` cannot be mounted under itself")]
    SelfMount(String),

    #[error("scope `{0}` is mounted more than once")]
    MultipleMounts(String),

    #[error("scope `{0}` is part of a mount cycle")]
    Cycle(String),

    #[error("scope `{parent}` has no template for mount `{mount}`")]
    MissingMountPrefix { parent: String, mount: String },

    #[error("mount `{mount}` in `{parent}` has prefix `{template}`, expected an absolute non-root path")]
    InvalidMountPrefix {
        parent: String,
        mount: String,
        template: String,
    },

    #[error("expected exactly one root scope, found {0}")]
    RootCount(usize),
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for (i, scope) in config.scopes.iter().enumerate() {
        if scope.name.is_empty() {
            errors.push(ValidationError::EmptyScopeName(i));
        } else if !names.insert(scope.name.as_str()) {
            errors.push(ValidationError::DuplicateScope(scope.name.clone()));
        }
    }

    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    for mount in &config.mounts {
        let mut known = true;
        for scope in [&mount.parent, &mount.child] {
            if !names.contains(scope.as_str()) {
                errors.push(ValidationError::UnknownScope {
                    mount: mount.name.clone(),
                    scope: scope.clone(),
                });
                known = false;
            }
        }
        if !known {
            continue;
        }

        if mount.parent == mount.child {
            errors.push(ValidationError::SelfMount(mount.child.clone()));
            continue;
        }
        if parent_of.contains_key(mount.child.as_str()) {
            errors.push(ValidationError::MultipleMounts(mount.child.clone()));
        } else {
            parent_of.insert(mount.child.as_str(), mount.parent.as_str());
        }

        let prefix = config
            .scopes
            .iter()
            .find(|s| s.name == mount.parent)
            .and_then(|s| s.routes.get(&mount.name));
        match prefix {
            Some(RouteEntry::Template(template)) => {
                if !template.starts_with('/') || RoutePath::parse(template).is_root() {
                    errors.push(ValidationError::InvalidMountPrefix {
                        parent: mount.parent.clone(),
                        mount: mount.name.clone(),
                        template: template.clone(),
                    });
                }
            }
            _ => errors.push(ValidationError::MissingMountPrefix {
                parent: mount.parent.clone(),
                mount: mount.name.clone(),
            }),
        }
    }

    // A walk longer than the scope count must have revisited a scope.
    for scope in &config.scopes {
        let mut current = scope.name.as_str();
        let mut steps = 0;
        while let Some(&parent) = parent_of.get(current) {
            current = parent;
            steps += 1;
            if steps > config.scopes.len() {
                errors.push(ValidationError::Cycle(scope.name.clone()));
                break;
            }
        }
    }

    let roots = config
        .scopes
        .iter()
        .filter(|s| !parent_of.contains_key(s.name.as_str()))
        .count();
    if roots != 1 {
        errors.push(ValidationError::RootCount(roots));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{MountConfig, ScopeConfig};
    use crate::routing::Routes;

    fn scope(name: &str, routes: &[(&str, &str)]) -> ScopeConfig {
        ScopeConfig {
            name: name.into(),
            routes: routes
                .iter()
                .map(|(k, v)| (k.to_string(), RouteEntry::from(*v)))
                .collect::<Routes>(),
        }
    }

    fn mount(parent: &str, name: &str, child: &str) -> MountConfig {
        MountConfig {
            parent: parent.into(),
            name: name.into(),
            child: child.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = AppConfig {
            scopes: vec![scope("app", &[("admin", "/admin")]), scope("admin", &[])],
            mounts: vec![mount("app", "admin", "admin")],
            ..Default::default()
        };
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_reports_all_errors() {
        let config = AppConfig {
            scopes: vec![
                scope("app", &[("root", "/"), ("rel", "rel")]),
                scope("app", &[]),
                scope("", &[]),
            ],
            mounts: vec![
                mount("app", "ghost", "nowhere"),
                mount("app", "root", "app"),
            ],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateScope("app".into())));
        assert!(errors.contains(&ValidationError::EmptyScopeName(2)));
        assert!(errors.contains(&ValidationError::UnknownScope {
            mount: "ghost".into(),
            scope: "nowhere".into()
        }));
        assert!(errors.contains(&ValidationError::SelfMount("app".into())));
    }

    #[test]
    fn test_mount_prefix_checks() {
        let config = AppConfig {
            scopes: vec![
                scope("app", &[("root", "/"), ("rel", "rel")]),
                scope("a", &[]),
                scope("b", &[]),
                scope("c", &[]),
            ],
            mounts: vec![
                mount("app", "root", "a"),
                mount("app", "rel", "b"),
                mount("app", "missing", "c"),
            ],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::InvalidMountPrefix { .. }));
        assert!(matches!(errors[1], ValidationError::InvalidMountPrefix { .. }));
        assert_eq!(
            errors[2],
            ValidationError::MissingMountPrefix { parent: "app".into(), mount: "missing".into() }
        );
    }

    #[test]
    fn test_structure_checks() {
        let config = AppConfig {
            scopes: vec![
                scope("app", &[("x", "/x")]),
                scope("a", &[("b", "/b")]),
                scope("b", &[("a", "/a")]),
            ],
            mounts: vec![mount("a", "b", "b"), mount("b", "a", "a"), mount("app", "x", "b")],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MultipleMounts("b".into())));
        assert!(errors.contains(&ValidationError::Cycle("a".into())));
    }

    #[test]
    fn test_root_count() {
        let config = AppConfig {
            scopes: vec![scope("one", &[]), scope("two", &[])],
            ..Default::default()
        };
        assert_eq!(validate_config(&config), Err(vec![ValidationError::RootCount(2)]));
    }
}
