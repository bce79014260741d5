//! Path rendering and prefix composition.
//!
//! # Responsibilities
//! - Fill a template's `:name` placeholders from a parameter set
//! - Compose mount prefixes with route templates
//!
//! # Design Decisions
//! - Substitution replaces the first `/:key` occurrence per key, in the
//!   parameter set's iteration order. `:id` is therefore able to eat the
//!   front of `:identity` if `id` comes first.
//! - Unfilled placeholders pass through untouched; values are not escaped
//! - Composed paths are held as segments and joined once, so a prefix that
//!   ends in `/` never produces `//`

use std::fmt;

use crate::error::{RouteError, RouteResult};
use crate::routing::entry::RouteEntry;
use crate::routing::resolver::ParamSet;

/// Render `template` by substituting every parameter in `params`.
pub fn render(template: &str, params: &ParamSet) -> String {
    let mut path = template.to_string();
    for (key, value) in params.iter() {
        path = path.replacen(&format!("/:{}", key), &format!("/{}", value), 1);
    }
    path
}

/// Render a looked-up entry. `name` is only used for the error.
pub fn render_entry(name: &str, entry: &RouteEntry, params: &ParamSet) -> RouteResult<String> {
    match entry {
        RouteEntry::Template(template) => Ok(render(template, params)),
        RouteEntry::Group(_) => Err(RouteError::NotATemplate(name.to_string())),
    }
}

/// A path as an ordered list of non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutePath {
    absolute: bool,
    segments: Vec<String>,
}

impl RoutePath {
    /// Split a template on `/`, dropping empty segments.
    pub fn parse(template: &str) -> Self {
        Self {
            absolute: template.starts_with('/'),
            segments: template
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// `self` followed by `other`.
    pub fn join(&self, other: &RoutePath) -> RoutePath {
        let absolute = if self.absolute || !self.segments.is_empty() {
            self.absolute
        } else {
            other.absolute
        };
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        RoutePath { absolute, segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Names of the `:name` placeholder segments, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| s.strip_prefix(':'))
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        if self.absolute {
            f.write_str("/")?;
        }
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParamSet {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_render_simple() {
        assert_eq!(render("/a/:x", &params(&[("x", "5")])), "/a/5");
    }

    #[test]
    fn test_render_multiple_and_leftovers() {
        let p = params(&[("user", "7"), ("post", "42")]);
        assert_eq!(render("/users/:user/posts/:post", &p), "/users/7/posts/42");
        assert_eq!(render("/users/:user/tags/:tag", &p), "/users/7/tags/:tag");
        assert_eq!(render("/static", &p), "/static");
    }

    #[test]
    fn test_render_first_occurrence_only() {
        assert_eq!(render("/:x/:x", &params(&[("x", "1")])), "/1/:x");
    }

    #[test]
    fn test_render_prefix_key_is_order_dependent() {
        let id_first = params(&[("id", "1"), ("identity", "me")]);
        assert_eq!(render("/p/:identity/:id", &id_first), "/p/1entity/:id");

        let identity_first = params(&[("identity", "me"), ("id", "1")]);
        assert_eq!(render("/p/:identity/:id", &identity_first), "/p/me/1");
    }

    #[test]
    fn test_render_does_not_escape() {
        assert_eq!(render("/q/:v", &params(&[("v", "a b/c")])), "/q/a b/c");
    }

    #[test]
    fn test_render_entry_rejects_group() {
        let group = RouteEntry::group([("index", RouteEntry::from("/"))]);
        assert_eq!(
            render_entry("users", &group, &ParamSet::new()),
            Err(RouteError::NotATemplate("users".into()))
        );
    }

    #[test]
    fn test_join_collapses_slashes() {
        let joined = RoutePath::parse("/m/").join(&RoutePath::parse("/r"));
        assert_eq!(joined.to_string(), "/m/r");

        let joined = RoutePath::parse("//m//").join(&RoutePath::parse("/r/"));
        assert_eq!(joined.to_string(), "/m/r");
    }

    #[test]
    fn test_join_root_cases() {
        assert_eq!(RoutePath::parse("/").join(&RoutePath::parse("/")).to_string(), "/");
        assert_eq!(RoutePath::parse("/m").join(&RoutePath::parse("/")).to_string(), "/m");
        assert_eq!(RoutePath::parse("").join(&RoutePath::parse("/r")).to_string(), "/r");
        assert_eq!(RoutePath::parse("m").join(&RoutePath::parse("/r")).to_string(), "m/r");
    }

    #[test]
    fn test_placeholders() {
        let path = RoutePath::parse("/orgs/:org/users/:id");
        assert_eq!(path.placeholders().collect::<Vec<_>>(), vec!["org", "id"]);
    }
}
