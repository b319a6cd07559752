//! A scripted session against every store, logging each change.
//!
//! Run with `RUST_LOG=debug` to also see the stores' own tracing output.

use std::sync::Arc;
use std::time::Duration;

use clipman_stores::{
    AppStores, ColorSchemePreference, JsonFileStorage, KeyValueStorage, StoresConfig, ToastKind,
};
use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let storage: Option<Arc<JsonFileStorage>> = match JsonFileStorage::new() {
        Ok(storage) => Some(Arc::new(storage)),
        Err(e) => {
            warn!("Running without persisted preferences: {}", e);
            None
        }
    };

    // Headless stand-in for a desktop colour-scheme query.
    let ambient: Arc<dyn ColorSchemePreference> =
        Arc::new(|| std::env::var("DEMO_PREFERS_DARK").is_ok_and(|v| v == "1"));

    let config = StoresConfig::default();
    let stores = AppStores::new(
        &config,
        storage.as_deref().map(|s| s as &dyn KeyValueStorage),
        Some(ambient),
        Handle::current(),
    );

    let _route_sub = stores
        .routes
        .subscribe(|route| info!("   [Route] now showing {}", route));
    let _theme_sub = stores
        .theme
        .subscribe(|theme| info!("   [Theme] now {}", theme));
    let _toast_sub = stores.toasts.subscribe(|toasts| {
        let messages: Vec<&str> = toasts.iter().map(|t| t.message.as_str()).collect();
        info!("   [Toasts] {:?}", messages);
    });
    let _persist = storage
        .clone()
        .map(|storage| stores.theme.persist_to(storage));

    info!("1. Starting theme: {}", stores.theme.current());

    info!("2. Opening settings and cycling themes");
    stores.routes.go_to_settings();
    for _ in 0..4 {
        stores.theme.toggle();
    }

    info!("3. Raising a few notifications");
    stores.toasts.add("Copied to clipboard", ToastKind::Success);
    let id = stores.toasts.add("Item pinned", ToastKind::Info);
    stores.toasts.add("Could not read image", ToastKind::Error);
    stores.toasts.remove(id);

    info!("4. Waiting for the rest to expire");
    tokio::time::sleep(config.toast_lifetime() + Duration::from_millis(100)).await;
    info!("   {} toast(s) left", stores.toasts.len());

    stores.routes.go_home();
    info!("=== Done ===");
}
