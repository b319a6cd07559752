//! Observable state containers.
//!
//! A [`Store`] holds one value and notifies its subscribers whenever the value
//! is replaced or mutated. The route, theme and toast stores are all built on
//! top of it.

mod store;

pub use store::{Store, Subscription};
