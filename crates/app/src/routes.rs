//! Top-level view gate: the login view and the authenticated dashboard.

use feedback_core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// The route actually shown for `requested` given the current session.
///
/// The dashboard without a session redirects to login; login with a session
/// redirects to the dashboard.
pub fn resolve(requested: Route, session: Option<&Session>) -> Route {
    match (requested, session) {
        (Route::Dashboard, None) => Route::Login,
        (Route::Login, Some(_)) => Route::Dashboard,
        (route, _) => route,
    }
}
