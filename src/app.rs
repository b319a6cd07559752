//! The set of stores an application creates once at start-up.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::{
    config::StoresConfig,
    route::RouteStore,
    theme::{ColorSchemePreference, KeyValueStorage, ThemeStore},
    toast::ToastStore,
};

/// All UI state containers, built once and handed to views by reference.
#[derive(Clone)]
pub struct AppStores {
    pub routes: RouteStore,
    pub theme: ThemeStore,
    pub toasts: ToastStore,
}

impl AppStores {
    /// Build every store from `config`.
    ///
    /// `storage` and `ambient` are optional for the same reasons as in
    /// [`ThemeStore::new`]. Toast timers run on `handle`.
    pub fn new(
        config: &StoresConfig,
        storage: Option<&dyn KeyValueStorage>,
        ambient: Option<Arc<dyn ColorSchemePreference>>,
        handle: Handle,
    ) -> Self {
        Self {
            routes: RouteStore::new(),
            theme: ThemeStore::with_key(&config.theme_key, storage, ambient),
            toasts: ToastStore::from_config(config, handle),
        }
    }
}
