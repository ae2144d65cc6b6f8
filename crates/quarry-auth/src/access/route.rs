//! Protected-route guard.

use serde::Serialize;

use quarry_entity::session::SessionSnapshot;

use super::navigation::MENU;

/// Route that shows the login form.
pub const LOGIN_ROUTE: &str = "/login";

/// Where `/` and post-login navigation land.
pub const DEFAULT_ROUTE: &str = "/dashboard";

/// Protected routes that are not part of the sidebar.
const EXTRA_PROTECTED: &[&str] = &["/companies"];

/// What the shell should do for a requested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Session validation is still running; show a neutral spinner.
    Loading,
    /// No session; go to the login route.
    RedirectToLogin,
    /// Navigate elsewhere.
    Redirect(&'static str),
    /// Render the requested page.
    Render,
    /// No such route.
    NotFound,
}

/// Decides route access from a session snapshot.
///
/// Routes require an authenticated session only. Per-resource permissions
/// decide menu visibility and data access, not whether a route renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Whether `path` is a protected route.
    pub fn is_protected(path: &str) -> bool {
        MENU.iter().any(|item| item.path == path) || EXTRA_PROTECTED.contains(&path)
    }

    /// Decide what to show for `path`.
    pub fn decide(snapshot: &SessionSnapshot, path: &str) -> RouteDecision {
        let path = normalize(path);

        if path == LOGIN_ROUTE {
            return RouteDecision::Render;
        }
        if path == "/" {
            return RouteDecision::Redirect(DEFAULT_ROUTE);
        }
        if !Self::is_protected(path) {
            return RouteDecision::NotFound;
        }
        if snapshot.loading || snapshot.state.is_pending() {
            return RouteDecision::Loading;
        }
        if snapshot.is_authenticated() {
            RouteDecision::Render
        } else {
            RouteDecision::RedirectToLogin
        }
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.split(['?', '#']).next().unwrap_or(path);
    match trimmed.trim_end_matches('/') {
        "" => "/",
        other => other,
    }
}
