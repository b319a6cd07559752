//! Theme preference with persisted start-up value.
//!
//! - [`ThemeStore`] holds the active [`Theme`] and implements the toggle
//!   cycle.
//! - [`KeyValueStorage`] is the persistence boundary the initial value is
//!   read from, with in-memory and JSON file implementations.
//! - [`ColorSchemePreference`] reports the host's light/dark setting.

mod preference;
mod storage;
mod theme;

pub use preference::{ColorSchemePreference, FixedPreference};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use theme::{Theme, ThemeStore};
