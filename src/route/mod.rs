//! Current top-level view.
//!
//! There is no path matching and no history: a route is a label from a
//! closed set, replaced wholesale on navigation.

mod router;

pub use router::{Route, RouteStore};
