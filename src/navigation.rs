//! Routes and navigation.
//!
//! The HTTP client needs to send the user to the login screen on a 401
//! without knowing anything about the front end, so it talks to a
//! [`Navigator`]. [`AppRouter`] is the implementation the CLI and tests
//! use: it records the current route and lets a renderer watch it.

use std::fmt;
use std::sync::Arc;

use aula_auth::SessionStore;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Students,
    Teachers,
    Parents,
    Courses,
    Grades,
    Attendance,
    Justifications,
    Calendar,
    Messages,
    Gps,
    Reports,
    Settings,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Login,
        Route::Dashboard,
        Route::Students,
        Route::Teachers,
        Route::Parents,
        Route::Courses,
        Route::Grades,
        Route::Attendance,
        Route::Justifications,
        Route::Calendar,
        Route::Messages,
        Route::Gps,
        Route::Reports,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Students => "/students",
            Route::Teachers => "/teachers",
            Route::Parents => "/parents",
            Route::Courses => "/courses",
            Route::Grades => "/grades",
            Route::Attendance => "/attendance",
            Route::Justifications => "/justifications",
            Route::Calendar => "/calendar",
            Route::Messages => "/messages",
            Route::Gps => "/gps",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Everything but the login screen needs a session.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Moves the user to another screen.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Route state for the running client.
#[derive(Clone)]
pub struct AppRouter {
    current: Arc<watch::Sender<Route>>,
}

impl fmt::Debug for AppRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppRouter")
            .field("current", &self.current())
            .finish()
    }
}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl AppRouter {
    pub fn new(initial: Route) -> Self {
        Self {
            current: Arc::new(watch::channel(initial).0),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    /// Opens `route`, redirecting to login when it needs a session the
    /// store does not have. Returns the route actually shown.
    pub fn open(&self, route: Route, session: &SessionStore) -> Route {
        let target = if route.requires_auth() && !session.is_authenticated() {
            debug!(requested = %route, "Redirecting anonymous user to login");
            Route::Login
        } else {
            route
        };
        self.navigate(target);
        target
    }
}

impl Navigator for AppRouter {
    fn navigate(&self, route: Route) {
        let previous = self.current.send_replace(route);
        if previous != route {
            debug!(from = %previous, to = %route, "Navigated");
        }
    }
}
