use std::{fmt, str::FromStr, sync::Arc};

use {
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

use crate::{
    config::DEFAULT_THEME_KEY,
    error::ParseThemeError,
    store::{Store, Subscription},
    theme::{ColorSchemePreference, KeyValueStorage},
};

/// Colour schemes the UI can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    LightPink,
    /// Follow the host's colour scheme (default).
    #[default]
    System,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::LightPink, Theme::System];

    /// The label used in storage and serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::LightPink => "light-pink",
            Theme::System => "system",
        }
    }

    /// Successor in the `light -> dark -> light-pink -> light` cycle.
    ///
    /// Returns `None` for [`Theme::System`], which is not part of the cycle
    /// and has to be resolved against the host preference.
    pub fn next(self) -> Option<Theme> {
        match self {
            Theme::Light => Some(Theme::Dark),
            Theme::Dark => Some(Theme::LightPink),
            Theme::LightPink => Some(Theme::Light),
            Theme::System => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}

/// Holds the user's theme preference.
///
/// The initial value is read once from a [`KeyValueStorage`] when one is
/// supplied. Changes stay in memory unless [`ThemeStore::persist_to`] is
/// used to install a write-back.
#[derive(Clone)]
pub struct ThemeStore {
    theme: Store<Theme>,
    key: String,
    ambient: Option<Arc<dyn ColorSchemePreference>>,
}

impl ThemeStore {
    /// Create a store under the default `"theme"` key.
    ///
    /// Pass `None` for `storage` in headless contexts: the default
    /// [`Theme::System`] is used without touching persistence. Pass `None`
    /// for `ambient` when the host cannot report a colour scheme.
    pub fn new(
        storage: Option<&dyn KeyValueStorage>,
        ambient: Option<Arc<dyn ColorSchemePreference>>,
    ) -> Self {
        Self::with_key(DEFAULT_THEME_KEY, storage, ambient)
    }

    /// Create a store that reads its initial value from `key`.
    pub fn with_key(
        key: &str,
        storage: Option<&dyn KeyValueStorage>,
        ambient: Option<Arc<dyn ColorSchemePreference>>,
    ) -> Self {
        let initial = storage
            .and_then(|storage| load_stored_theme(storage, key))
            .unwrap_or_default();
        debug!(theme = %initial, "theme store initialized");

        Self {
            theme: Store::new(initial),
            key: key.to_string(),
            ambient,
        }
    }

    /// The live theme value.
    pub fn current(&self) -> Theme {
        self.theme.get()
    }

    /// Replace the theme unconditionally.
    pub fn set_theme(&self, theme: Theme) {
        debug!(%theme, "set theme");
        self.theme.set(theme);
    }

    /// Advance to the next theme.
    ///
    /// The three concrete themes cycle `light -> dark -> light-pink ->
    /// light`. From `system` the store switches to the opposite of the host
    /// preference: `light` when the host prefers dark, `dark` otherwise. A
    /// store without a host preference behaves as if the host prefers light.
    pub fn toggle(&self) {
        let ambient = self.ambient.clone();
        let theme = self.theme.update(move |theme| {
            *theme = theme.next().unwrap_or_else(|| {
                let prefers_dark = ambient.as_ref().is_some_and(|a| a.prefers_dark());
                if prefers_dark {
                    Theme::Light
                } else {
                    Theme::Dark
                }
            });
            *theme
        });
        debug!(%theme, "toggled theme");
    }

    /// Observe theme changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        self.theme.subscribe(move |theme| callback(*theme))
    }

    /// Write every later change to `storage` under this store's key.
    ///
    /// The current value is not written. Write failures are logged and
    /// otherwise ignored. Dropping the returned subscription stops the
    /// write-back.
    pub fn persist_to(&self, storage: Arc<dyn KeyValueStorage>) -> Subscription {
        let key = self.key.clone();
        self.theme.subscribe(move |theme| {
            if let Err(e) = storage.set(&key, theme.as_str()) {
                warn!("Failed to persist theme {}: {}", theme, e);
            }
        })
    }

    /// Storage key the theme is read from and written to.
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn load_stored_theme(storage: &dyn KeyValueStorage, key: &str) -> Option<Theme> {
    let stored = match storage.get(key) {
        Ok(stored) => stored?,
        Err(e) => {
            warn!("Failed to read stored theme, using default: {}", e);
            return None;
        }
    };
    match stored.parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            debug!("Ignoring stored theme: {}", e);
            None
        }
    }
}
