//! # Clipman stores
//!
//! Observable UI state for the clipboard manager front end.
//!
//! ## Store (observable container)
//!
//! - `Store<T>` - Thread-safe value that notifies subscribers on every change
//! - `Subscription` - RAII guard that unsubscribes when dropped
//!
//! ## Application stores
//!
//! - `RouteStore` - Which top-level view is active
//! - `ThemeStore` - Colour scheme preference, read from persistent storage at
//!   start-up, with a toggle cycle
//! - `ToastStore` - Notification queue whose entries expire on a timer
//!
//! `AppStores` builds all three once so they can be passed to views by
//! reference.

pub mod app;
pub mod config;
pub mod error;
pub mod route;
pub mod store;
pub mod theme;
pub mod toast;

// Re-export main types for convenience
pub use app::AppStores;
pub use config::{StoresConfig, DEFAULT_THEME_KEY, DEFAULT_TOAST_LIFETIME};
pub use error::{ConfigError, ParseRouteError, ParseThemeError, StorageError};
pub use route::{Route, RouteStore};
pub use store::{Store, Subscription};
pub use theme::{
    ColorSchemePreference, FixedPreference, JsonFileStorage, KeyValueStorage, MemoryStorage,
    Theme, ThemeStore,
};
pub use toast::{ExpiryTimer, Toast, ToastId, ToastKind, ToastStore};
