//! Path routing and the session guard.
//!
//! Every navigation bumps an epoch. Fetches remember the epoch they were issued
//! under so results that arrive after the user moved on can be dropped.

use crate::ports::SessionStore;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Login,
    /// `/legacy`
    Directory,
    /// `/legacy/:id`
    Profile(String),
    /// `/forum`
    Forum,
    /// `/blog`
    BlogIndex,
    /// `/blog/:id`
    BlogPost(String),
    /// Anything else. Renders an empty page.
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path_only.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Login,
            ["legacy"] => Route::Directory,
            ["legacy", id] => Route::Profile((*id).to_string()),
            ["forum"] => Route::Forum,
            ["blog"] => Route::BlogIndex,
            ["blog", id] => Route::BlogPost((*id).to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Directory => "/legacy".to_string(),
            Route::Profile(id) => format!("/legacy/{}", id),
            Route::Forum => "/forum".to_string(),
            Route::BlogIndex => "/blog".to_string(),
            Route::BlogPost(id) => format!("/blog/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Everything except the login page requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// The guard replaced the requested route with the login page.
    pub redirected: bool,
    pub epoch: u64,
}

pub struct Router {
    session: Arc<dyn SessionStore>,
    epoch: AtomicU64,
}

impl Router {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            epoch: AtomicU64::new(0),
        }
    }

    /// Protected routes without a stored profile id go to login. Nothing else is checked.
    pub fn guard(&self, route: Route) -> (Route, bool) {
        if route.is_protected() && !self.session.is_logged_in() {
            return (Route::Login, true);
        }
        (route, false)
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        let requested = Route::parse(path);
        let (route, redirected) = self.guard(requested.clone());
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if redirected {
            info!(requested = %requested, "no session, redirecting to login");
        } else {
            debug!(route = %route, epoch, "navigate");
        }
        Navigation {
            route,
            redirected,
            epoch,
        }
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch
    }

    /// The navigation bar is only shown to logged-in sessions.
    pub fn nav_visible(&self) -> bool {
        self.session.is_logged_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::MemorySession;

    #[test]
    fn test_parse_round_trips_known_paths() {
        for path in ["/", "/legacy", "/legacy/p1", "/forum", "/blog", "/blog/b1"] {
            assert_eq!(Route::parse(path).path(), path);
        }
        assert_eq!(Route::parse("/legacy/p1/"), Route::Profile("p1".into()));
        assert_eq!(Route::parse("/blog?x=1"), Route::BlogIndex);
        assert!(matches!(Route::parse("/admin"), Route::NotFound(_)));
    }

    #[test]
    fn test_guard_redirects_without_session() {
        let session = Arc::new(MemorySession::new());
        let router = Router::new(session.clone());

        for path in ["/legacy", "/legacy/p1", "/forum", "/blog", "/blog/b1"] {
            let nav = router.navigate(path);
            assert_eq!(nav.route, Route::Login, "{path}");
            assert!(nav.redirected);
        }

        session.set("p1");
        let nav = router.navigate("/forum");
        assert_eq!(nav.route, Route::Forum);
        assert!(!nav.redirected);
    }

    #[test]
    fn test_forged_session_value_passes_guard() {
        let session = Arc::new(MemorySession::new());
        session.set("not-a-real-profile");
        let router = Router::new(session);
        assert_eq!(router.navigate("/legacy").route, Route::Directory);
    }

    #[test]
    fn test_each_navigation_starts_new_epoch() {
        let router = Router::new(Arc::new(MemorySession::new()));
        let first = router.navigate("/");
        assert!(router.is_current(first.epoch));
        let second = router.navigate("/");
        assert!(!router.is_current(first.epoch));
        assert!(router.is_current(second.epoch));
    }
}
