//! History-based routing over a static route table.
//!
//! Paths are matched against `RouteDef` patterns whose segments are either
//! literals or `:name` parameters. Matching is deterministic: the first
//! entry that matches wins, and a path matches at most one shape.

use crate::config::{BASE_PATH, ROUTE_TABLE};
use crate::utils::dom;

/// Named views a route can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Login,
    UserProfile,
    SavedPosts,
    Folder,
    SharedFolder,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::UserProfile => "UserProfile",
            Self::SavedPosts => "SavedPosts",
            Self::Folder => "Folder",
            Self::SharedFolder => "SharedFolder",
        }
    }
}

/// A single path pattern bound to a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub name: RouteName,
}

const MINIMAL_ROUTES: &[RouteDef] = &[
    RouteDef { pattern: "/", name: RouteName::Home },
    RouteDef { pattern: "/login", name: RouteName::Login },
    RouteDef { pattern: "/users/:userId", name: RouteName::UserProfile },
];

const EXPANDED_ROUTES: &[RouteDef] = &[
    RouteDef { pattern: "/", name: RouteName::Home },
    RouteDef { pattern: "/login", name: RouteName::Login },
    RouteDef { pattern: "/users/:userId", name: RouteName::UserProfile },
    RouteDef { pattern: "/savedposts", name: RouteName::SavedPosts },
    RouteDef { pattern: "/folder/:id", name: RouteName::Folder },
    RouteDef { pattern: "/shared-folder/:id", name: RouteName::SharedFolder },
];

/// Which set of routes the application serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteTable {
    /// Home, login and user profile only.
    Minimal,
    /// Adds saved posts, folders and shared folders.
    Expanded,
}

impl RouteTable {
    pub fn routes(self) -> &'static [RouteDef] {
        match self {
            Self::Minimal => MINIMAL_ROUTES,
            Self::Expanded => EXPANDED_ROUTES,
        }
    }

    /// Resolve a path (without base prefix) to at most one route.
    ///
    /// Query string and fragment are ignored and a trailing slash is optional.
    pub fn resolve(self, path: &str) -> Option<RouteMatch> {
        let path = strip_query(path);
        self.routes().iter().find_map(|def| {
            match_pattern(def.pattern, path).map(|params| RouteMatch {
                name: def.name,
                params,
            })
        })
    }

    pub fn contains(self, name: RouteName) -> bool {
        self.routes().iter().any(|def| def.name == name)
    }
}

/// A resolved route with its captured parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// Split a path into segments, dropping the leading slash and one trailing slash.
fn segments(path: &str) -> std::str::Split<'_, char> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.split('/')
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<Vec<(&'static str, String)>> {
    let mut params = Vec::new();
    let mut pattern_segs = segments(pattern);
    let mut path_segs = segments(path);

    loop {
        match (pattern_segs.next(), path_segs.next()) {
            (None, None) => return Some(params),
            (Some(pat), Some(seg)) => {
                if let Some(name) = pat.strip_prefix(':') {
                    // Params become document path segments; dot segments would escape them
                    if seg.is_empty() || seg == "." || seg == ".." {
                        return None;
                    }
                    params.push((name, seg.to_string()));
                } else if !pat.eq_ignore_ascii_case(seg) {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Remove the deployment base path from a browser pathname.
///
/// Returns `None` when the pathname lies outside the base.
pub fn strip_base<'a>(pathname: &'a str, base: &str) -> Option<&'a str> {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return Some(pathname);
    }
    let rest = pathname.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Prefix an application path with the deployment base path.
pub fn with_base(path: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{}{}", base, path)
}

/// Typed application route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Login,
    UserProfile { user_id: String },
    SavedPosts,
    Folder { id: String },
    SharedFolder { id: String },
    /// No table entry matched.
    NotFound { path: String },
}

impl AppRoute {
    /// Resolve a path against a table, falling back to [`AppRoute::NotFound`].
    pub fn resolve(table: RouteTable, path: &str) -> Self {
        match table.resolve(path) {
            Some(m) => Self::from_match(&m),
            None => Self::NotFound {
                path: strip_query(path).to_string(),
            },
        }
    }

    pub fn from_match(m: &RouteMatch) -> Self {
        let param = |key: &str| m.param(key).unwrap_or_default().to_string();
        match m.name {
            RouteName::Home => Self::Home,
            RouteName::Login => Self::Login,
            RouteName::UserProfile => Self::UserProfile {
                user_id: param("userId"),
            },
            RouteName::SavedPosts => Self::SavedPosts,
            RouteName::Folder => Self::Folder { id: param("id") },
            RouteName::SharedFolder => Self::SharedFolder { id: param("id") },
        }
    }

    pub fn name(&self) -> Option<RouteName> {
        match self {
            Self::Home => Some(RouteName::Home),
            Self::Login => Some(RouteName::Login),
            Self::UserProfile { .. } => Some(RouteName::UserProfile),
            Self::SavedPosts => Some(RouteName::SavedPosts),
            Self::Folder { .. } => Some(RouteName::Folder),
            Self::SharedFolder { .. } => Some(RouteName::SharedFolder),
            Self::NotFound { .. } => None,
        }
    }

    /// Application path for this route (without base prefix).
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::UserProfile { user_id } => format!("/users/{}", user_id),
            Self::SavedPosts => "/savedposts".to_string(),
            Self::Folder { id } => format!("/folder/{}", id),
            Self::SharedFolder { id } => format!("/shared-folder/{}", id),
            Self::NotFound { path } => path.clone(),
        }
    }

    /// Browser URL for this route, including the base path.
    pub fn href(&self) -> String {
        with_base(&self.to_path(), BASE_PATH)
    }

    /// Get current route from browser URL
    pub fn current() -> Self {
        let pathname = dom::pathname();
        match strip_base(&pathname, BASE_PATH) {
            Some(path) => Self::resolve(ROUTE_TABLE, path),
            None => Self::NotFound { path: pathname },
        }
    }

    /// Update browser URL to match this route (using pushState)
    pub fn push(&self) {
        dom::push_url(&self.href());
    }
}
