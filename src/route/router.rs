use std::{fmt, str::FromStr};

use {
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::{
    error::ParseRouteError,
    store::{Store, Subscription},
};

/// Top-level views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Clipboard history (default).
    #[default]
    Home,
    /// Preferences page.
    Settings,
}

impl Route {
    /// Every route, in declaration order.
    pub const ALL: [Route; 2] = [Route::Home, Route::Settings];

    /// The label used for this route in strings and serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Settings => "settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| ParseRouteError(s.to_string()))
    }
}

/// Holds the currently active route.
///
/// Starts at [`Route::Home`] and is never persisted.
#[derive(Clone, Default)]
pub struct RouteStore {
    current: Store<Route>,
}

impl RouteStore {
    /// Create a store showing [`Route::Home`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The active route.
    pub fn current(&self) -> Route {
        self.current.get()
    }

    /// Whether `route` is the active route.
    pub fn is_active(&self, route: Route) -> bool {
        self.current.read(|current| *current == route)
    }

    /// Make `route` the active route. Always notifies, even if unchanged.
    pub fn navigate(&self, route: Route) {
        debug!(%route, "navigate");
        self.current.set(route);
    }

    /// Navigate to [`Route::Home`].
    pub fn go_home(&self) {
        self.navigate(Route::Home);
    }

    /// Navigate to [`Route::Settings`].
    pub fn go_to_settings(&self) {
        self.navigate(Route::Settings);
    }

    /// Observe route changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Route) + Send + Sync + 'static,
    {
        self.current.subscribe(move |route| callback(*route))
    }
}
