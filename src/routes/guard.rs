use serde::{Deserialize, Serialize};

use super::Route;
use crate::config::ClientConfig;
use crate::navigation::Navigation;
use crate::session::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shell {
    /// Navigation chrome around the protected pages
    Authenticated,
    /// Login/registration layout
    Auth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render { shell: Shell, route: Route },
    Redirect(Navigation),
}

impl RouteDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, RouteDecision::Redirect(_))
    }
}

/// Decide what a navigation to `path` renders, from the token state right now.
///
/// Called on every navigation; the result must not be cached, since the
/// token may be cleared by a failed request between two navigations.
pub fn guard(store: &dyn TokenStore, config: &ClientConfig, path: &str) -> RouteDecision {
    let route = Route::parse(path);
    let authenticated = store.has_token();

    match (route.is_auth_route(), authenticated) {
        (false, false) => {
            tracing::debug!("no session for {}, redirecting to login", route);
            RouteDecision::Redirect(Navigation::replace(config.routes.login_path.clone()))
        }
        (false, true) => RouteDecision::Render { shell: Shell::Authenticated, route },
        (true, true) => RouteDecision::Redirect(Navigation::replace(config.routes.home_path.clone())),
        (true, false) => RouteDecision::Render { shell: Shell::Auth, route },
    }
}
