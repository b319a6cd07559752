//! Integration tests for the application stores

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use clipman_stores::{
    AppStores, FixedPreference, JsonFileStorage, KeyValueStorage, MemoryStorage, Route,
    StoresConfig, Theme, ThemeStore, Toast, ToastKind,
};
use tempfile::tempdir;
use tokio::{runtime::Handle, task::yield_now, time::sleep};

fn stores_with(storage: Option<&dyn KeyValueStorage>, prefers_dark: bool) -> AppStores {
    AppStores::new(
        &StoresConfig::default(),
        storage,
        Some(Arc::new(FixedPreference(prefers_dark))),
        Handle::current(),
    )
}

#[tokio::test(start_paused = true)]
async fn fresh_stores_have_defaults() {
    let stores = stores_with(None, false);

    assert_eq!(stores.routes.current(), Route::Home);
    assert_eq!(stores.theme.current(), Theme::System);
    assert!(stores.toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn stores_are_independent() {
    let stores = stores_with(None, false);
    let theme_changes = Arc::new(AtomicUsize::new(0));
    let counter = theme_changes.clone();
    let _sub = stores.theme.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    stores.routes.go_to_settings();
    stores.toasts.info("saved");

    assert_eq!(theme_changes.load(Ordering::SeqCst), 0);
    assert_eq!(stores.theme.current(), Theme::System);
}

#[tokio::test(start_paused = true)]
async fn theme_key_comes_from_config() {
    let storage = MemoryStorage::with_entry("appearance", "light-pink");
    let config = StoresConfig {
        theme_key: "appearance".to_string(),
        ..StoresConfig::default()
    };

    let stores = AppStores::new(&config, Some(&storage), None, Handle::current());
    assert_eq!(stores.theme.current(), Theme::LightPink);
}

#[tokio::test(start_paused = true)]
async fn toast_lifetime_comes_from_config() {
    let config = StoresConfig {
        toast_lifetime_ms: 300,
        ..StoresConfig::default()
    };
    let stores = AppStores::new(&config, None, None, Handle::current());

    stores.toasts.add("quick", ToastKind::Error);
    sleep(Duration::from_millis(301)).await;
    yield_now().await;
    yield_now().await;

    assert!(stores.toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn toast_add_and_expire() {
    let stores = stores_with(None, false);
    stores.toasts.add("hi", ToastKind::Success);

    assert_eq!(
        stores.toasts.toasts(),
        vec![Toast {
            id: 1,
            message: "hi".to_string(),
            kind: ToastKind::Success,
        }]
    );

    sleep(Duration::from_millis(2001)).await;
    yield_now().await;
    yield_now().await;
    assert!(stores.toasts.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn toasts_expire_on_a_multi_threaded_runtime() {
    let config = StoresConfig {
        toast_lifetime_ms: 20,
        ..StoresConfig::default()
    };
    let stores = AppStores::new(&config, None, None, Handle::current());

    for i in 0..10 {
        stores.toasts.info(format!("toast {i}"));
    }
    assert_eq!(stores.toasts.len(), 10);

    sleep(Duration::from_millis(500)).await;
    assert!(stores.toasts.is_empty());
    assert_eq!(stores.toasts.pending_timers(), 0);
}

#[test]
fn theme_persists_across_restarts_when_write_back_enabled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    {
        let storage = Arc::new(JsonFileStorage::at(&path));
        let theme = ThemeStore::new(Some(&*storage as &dyn KeyValueStorage), None);
        let _persist = theme.persist_to(storage.clone());
        theme.set_theme(Theme::Light);
        theme.toggle();
    }

    let storage = JsonFileStorage::at(&path);
    let theme = ThemeStore::new(Some(&storage), None);
    assert_eq!(theme.current(), Theme::Dark);
}

#[test]
fn corrupt_preference_file_falls_back_to_system() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();

    let storage = JsonFileStorage::at(&path);
    let theme = ThemeStore::new(Some(&storage), Some(Arc::new(FixedPreference::DARK)));

    assert_eq!(theme.current(), Theme::System);
    theme.toggle();
    assert_eq!(theme.current(), Theme::Light);
}

#[test]
fn write_back_recovers_from_a_torn_preferences_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{ "theme": "da"#).unwrap();

    {
        let storage = Arc::new(JsonFileStorage::at(&path));
        let theme = ThemeStore::new(Some(&*storage as &dyn KeyValueStorage), None);
        assert_eq!(theme.current(), Theme::System);
        let _persist = theme.persist_to(storage.clone());
        theme.set_theme(Theme::Dark);
    }

    let storage = JsonFileStorage::at(&path);
    assert_eq!(ThemeStore::new(Some(&storage), None).current(), Theme::Dark);
}
