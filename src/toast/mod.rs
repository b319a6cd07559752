//! Transient notifications.
//!
//! Toasts are kept in insertion order and expire after a fixed lifetime
//! unless removed earlier.

mod timer;
mod toast;

pub use timer::ExpiryTimer;
pub use toast::{Toast, ToastId, ToastKind, ToastStore};
