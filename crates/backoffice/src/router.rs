//! Route table and navigation guard.
//!
//! Every transition is checked against the target route's metadata and the
//! current session. The guard only returns a decision; it never performs the
//! redirect itself and never touches the network.

use backoffice_session::{LOGIN_PATH, Session};
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

/// Where unauthorized (wrong role) navigations end up.
pub const FORBIDDEN_PATH: &str = "/403";

/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Access requirements attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Roles allowed in; `None` admits any authenticated session.
    pub roles: Option<Vec<String>>,
}

impl RouteMeta {
    /// Open to everyone.
    pub fn public() -> Self {
        Self::default()
    }

    /// Requires a token.
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            roles: None,
        }
    }

    /// Restrict to the given roles.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }
}

/// A named route. `:name` segments in the pattern match any single segment.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: &'static str,
    pub pattern: &'static str,
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(name: &'static str, pattern: &'static str, meta: RouteMeta) -> Self {
        Self {
            name,
            pattern,
            meta,
        }
    }

    /// Whether `path` (without query or fragment) matches this route.
    pub fn matches(&self, path: &str) -> bool {
        let expected: Vec<&str> = segments(self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();
        expected.len() == actual.len()
            && expected
                .iter()
                .zip(&actual)
                .all(|(want, got)| want.starts_with(':') || want == got)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strip the query string and fragment from a full path.
fn path_only(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    &full_path[..end]
}

/// Outcome of a guarded transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation proceeds unmodified.
    Allowed,
    /// No session; go to the login page, remembering the target.
    RedirectLogin { location: String },
    /// Session present but its role is not admitted.
    RedirectForbidden { location: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allowed)
    }

    /// Redirect location, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            GuardDecision::Allowed => None,
            GuardDecision::RedirectLogin { location }
            | GuardDecision::RedirectForbidden { location } => Some(location),
        }
    }
}

/// Decide a transition to `full_path` whose route carries `meta`.
///
/// Rules, first match wins:
/// 1. auth required and no token: login redirect carrying `full_path`
/// 2. auth required and the role list doesn't admit the session's role: forbidden
/// 3. otherwise allowed
pub fn guard(meta: Option<&RouteMeta>, full_path: &str, session: &Session) -> GuardDecision {
    let Some(meta) = meta.filter(|m| m.requires_auth) else {
        return GuardDecision::Allowed;
    };

    if session.token.is_none() {
        return GuardDecision::RedirectLogin {
            location: login_location(full_path),
        };
    }

    if let Some(roles) = &meta.roles {
        let admitted = session
            .role
            .as_deref()
            .is_some_and(|role| roles.iter().any(|r| r == role));
        if !admitted {
            return GuardDecision::RedirectForbidden {
                location: FORBIDDEN_PATH.to_string(),
            };
        }
    }

    GuardDecision::Allowed
}

/// `/login?redirect=<full_path>`, keeping `/` readable in the parameter.
pub fn login_location(full_path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(full_path.as_bytes()).collect();
    format!(
        "{}?{}={}",
        LOGIN_PATH,
        REDIRECT_PARAM,
        encoded.replace("%2F", "/")
    )
}

/// The post-login destination encoded in a login location.
///
/// Only same-origin paths (starting with a single `/`) are returned.
pub fn redirect_target(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == REDIRECT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
}

/// The application's routes plus the guard evaluation over them.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// First route matching the path part of `full_path`.
    pub fn resolve(&self, full_path: &str) -> Option<&Route> {
        let path = path_only(full_path);
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Run the guard for a transition to `full_path`.
    pub fn navigate(&self, full_path: &str, session: &Session) -> GuardDecision {
        let route = self.resolve(full_path);
        let decision = guard(route.map(|r| &r.meta), full_path, session);
        debug!(
            path = full_path,
            route = route.map(|r| r.name),
            ?decision,
            "navigation guard"
        );
        decision
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(vec![
            Route::new("home", "/", RouteMeta::public()),
            Route::new("about", "/about", RouteMeta::public()),
            Route::new("login", LOGIN_PATH, RouteMeta::public()),
            Route::new(
                "users",
                "/users",
                RouteMeta::authenticated().with_roles(["admin"]),
            ),
            Route::new(
                "user-detail",
                "/users/:id",
                RouteMeta::authenticated().with_roles(["admin", "manager"]),
            ),
            Route::new("forbidden", FORBIDDEN_PATH, RouteMeta::public()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: Option<&str>, role: Option<&str>) -> Session {
        Session {
            token: token.map(String::from),
            role: role.map(String::from),
        }
    }

    #[test]
    fn test_anonymous_to_protected_route_redirects_to_login() {
        let router = Router::default();
        let decision = router.navigate("/users", &Session::default());
        assert_eq!(
            decision,
            GuardDecision::RedirectLogin {
                location: "/login?redirect=/users".to_string()
            }
        );
    }

    #[test]
    fn test_login_redirect_preserves_full_path() {
        let router = Router::default();
        let decision = router.navigate("/users?page=2", &Session::default());
        let location = decision.location().unwrap();
        assert_eq!(location, "/login?redirect=/users%3Fpage%3D2");
        assert_eq!(redirect_target(location).as_deref(), Some("/users?page=2"));
    }

    #[test]
    fn test_wrong_role_is_forbidden() {
        let router = Router::default();
        let decision = router.navigate("/users", &session(Some("abc"), Some("viewer")));
        assert_eq!(
            decision,
            GuardDecision::RedirectForbidden {
                location: "/403".to_string()
            }
        );
    }

    #[test]
    fn test_missing_role_is_forbidden_on_role_restricted_route() {
        let router = Router::default();
        let decision = router.navigate("/users", &session(Some("abc"), None));
        assert!(matches!(decision, GuardDecision::RedirectForbidden { .. }));
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let router = Router::default();
        assert!(router
            .navigate("/users", &session(Some("abc"), Some("admin")))
            .is_allowed());
        assert!(router
            .navigate("/users/42", &session(Some("abc"), Some("manager")))
            .is_allowed());
    }

    #[test]
    fn test_missing_token_wins_over_role_check() {
        let router = Router::default();
        let decision = router.navigate("/users", &session(None, Some("admin")));
        assert!(matches!(decision, GuardDecision::RedirectLogin { .. }));
    }

    #[test]
    fn test_public_and_unknown_routes_are_allowed() {
        let router = Router::default();
        for path in ["/", "/about", "/login", "/403", "/nowhere/at/all"] {
            assert!(router.navigate(path, &Session::default()).is_allowed(), "{path}");
        }
    }

    #[test]
    fn test_authenticated_route_without_roles() {
        let meta = RouteMeta::authenticated();
        assert!(guard(Some(&meta), "/me", &session(Some("abc"), None)).is_allowed());
        assert!(!guard(Some(&meta), "/me", &Session::default()).is_allowed());
    }

    #[test]
    fn test_roles_ignored_when_auth_not_required() {
        let meta = RouteMeta::public().with_roles(["admin"]);
        assert!(guard(Some(&meta), "/x", &Session::default()).is_allowed());
    }

    #[test]
    fn test_param_segments_match_single_segment() {
        let router = Router::default();
        assert_eq!(router.resolve("/users/42").map(|r| r.name), Some("user-detail"));
        assert_eq!(router.resolve("/users/").map(|r| r.name), Some("users"));
        assert!(router.resolve("/users/42/roles").is_none());
        assert_eq!(router.resolve("/users/42#top").map(|r| r.name), Some("user-detail"));
    }

    #[test]
    fn test_redirect_target_rejects_foreign_locations() {
        assert_eq!(redirect_target("/login"), None);
        assert_eq!(redirect_target("/login?redirect=//evil.example"), None);
        assert_eq!(redirect_target("/login?redirect=https://evil.example"), None);
        assert_eq!(redirect_target("/login?redirect=/about").as_deref(), Some("/about"));
    }
}
