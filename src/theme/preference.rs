/// The host's system-level colour scheme setting.
pub trait ColorSchemePreference: Send + Sync {
    /// Whether the host reports a preference for dark mode.
    fn prefers_dark(&self) -> bool;
}

/// A preference that never changes. Useful for tests and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPreference(pub bool);

impl FixedPreference {
    pub const DARK: FixedPreference = FixedPreference(true);
    pub const LIGHT: FixedPreference = FixedPreference(false);
}

impl ColorSchemePreference for FixedPreference {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

impl<F> ColorSchemePreference for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn prefers_dark(&self) -> bool {
        self()
    }
}
