//! Display theme preference.
//!
//! Tri-state preference persisted under a single storage key. `System`
//! is resolved against the OS colour-scheme at read-time and never
//! stored as a resolved boolean.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::store::KvStore;

pub const STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Effective dark flag. `system_dark` is the OS-level media query
    /// result at the moment of resolution.
    pub fn resolve_dark(self, system_dark: bool) -> bool {
        match self {
            ThemePreference::Light => false,
            ThemePreference::Dark => true,
            ThemePreference::System => system_dark,
        }
    }

    /// Read the persisted preference. Missing or unreadable values fall
    /// back to the default rather than surfacing an error.
    pub fn from_store(store: &dyn KvStore) -> Self {
        store
            .get(STORAGE_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Best-effort persist; a store that drops the write is acceptable.
    pub fn persist(self, store: &dyn KvStore) {
        store.set(STORAGE_KEY, self.as_str());
    }
}

impl FromStr for ThemePreference {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(ParseError::ThemePreference(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn light_never_resolves_dark() {
        assert!(!ThemePreference::Light.resolve_dark(false));
        assert!(!ThemePreference::Light.resolve_dark(true));
    }

    #[test]
    fn dark_always_resolves_dark() {
        assert!(ThemePreference::Dark.resolve_dark(false));
        assert!(ThemePreference::Dark.resolve_dark(true));
    }

    #[test]
    fn system_follows_media_query() {
        assert!(!ThemePreference::System.resolve_dark(false));
        assert!(ThemePreference::System.resolve_dark(true));
    }

    #[test]
    fn persist_then_reload_round_trips() {
        let store = MemoryStore::new();
        for pref in [
            ThemePreference::Light,
            ThemePreference::Dark,
            ThemePreference::System,
        ] {
            pref.persist(&store);
            assert_eq!(ThemePreference::from_store(&store), pref);
        }
    }

    #[test]
    fn missing_value_defaults_to_dark() {
        let store = MemoryStore::new();
        assert_eq!(ThemePreference::from_store(&store), ThemePreference::Dark);
    }

    #[test]
    fn garbage_value_defaults_to_dark() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "solarized");
        assert_eq!(ThemePreference::from_store(&store), ThemePreference::Dark);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "blue".parse::<ThemePreference>(),
            Err(ParseError::ThemePreference("blue".to_owned()))
        );
    }
}
