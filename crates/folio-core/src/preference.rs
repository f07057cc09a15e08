#![forbid(unsafe_code)]

//! Durable key-value preference storage.
//!
//! The controller persists exactly one value, the theme, under a configurable
//! key. Backends implement [`PreferenceStore`]:
//!
//! - [`MemoryStore`]: in-memory, used by tests and when the browser denies
//!   access to `localStorage`.
//! - `LocalStorage` in `folio-web`: the per-origin browser store.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Unavailable` | Storage disabled or blocked | Default theme used, logged |
//! | `StorageError::Rejected` | Quota exceeded, write refused | Theme still applied, logged |
//! | Unparseable value | Foreign writer, old format | Default theme used, logged |
//!
//! Storage failures never panic and never stop the visual theme change.

use std::collections::HashMap;
use std::fmt;

use crate::theme::Theme;
use crate::warn;

/// Errors that can occur while reading or writing a preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store cannot be reached at all.
    Unavailable(String),
    /// The store refused a read or write.
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Rejected(msg) => write!(f, "storage rejected operation: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable string-to-string preference store.
pub trait PreferenceStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory preference store.
///
/// Values are lost when the store is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = HashMap::new();
        data.insert(key.into(), value.into());
        Self {
            data,
            unavailable: false,
        }
    }

    /// Create a store whose every operation fails with
    /// [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            data: HashMap::new(),
            unavailable: true,
        }
    }

    /// Direct read access for inspection.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// Read the stored theme, falling back to `default` when the entry is
/// missing, unparseable, or the store fails.
pub fn load_theme(store: &dyn PreferenceStore, key: &str, default: Theme) -> Theme {
    match store.get(key) {
        Ok(Some(raw)) => match raw.parse::<Theme>() {
            Ok(theme) => theme,
            Err(err) => {
                warn!(store = store.name(), key, error = %err, "ignoring stored theme");
                default
            }
        },
        Ok(None) => default,
        Err(err) => {
            warn!(store = store.name(), key, error = %err, "theme preference unreadable");
            default
        }
    }
}

/// Persist `theme` under `key`.
pub fn save_theme(store: &mut dyn PreferenceStore, key: &str, theme: Theme) -> StorageResult<()> {
    store.set(key, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basic_operations() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("theme"), Ok(None));

        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme"), Ok(Some("light".to_string())));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.peek("theme"), Some("dark"));
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("theme"), Err(StorageError::Unavailable(_))));
        assert!(matches!(
            store.set("theme", "dark"),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn load_theme_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store, "theme", Theme::Dark), Theme::Dark);
        assert_eq!(load_theme(&store, "theme", Theme::Light), Theme::Light);
    }

    #[test]
    fn load_theme_reads_stored_value() {
        let store = MemoryStore::with_entry("theme", "light");
        assert_eq!(load_theme(&store, "theme", Theme::Dark), Theme::Light);
    }

    #[test]
    fn load_theme_ignores_garbage_and_failures() {
        let store = MemoryStore::with_entry("theme", "sepia");
        assert_eq!(load_theme(&store, "theme", Theme::Dark), Theme::Dark);

        let store = MemoryStore::unavailable();
        assert_eq!(load_theme(&store, "theme", Theme::Dark), Theme::Dark);
    }

    #[test]
    fn save_theme_writes_canonical_spelling() {
        let mut store = MemoryStore::new();
        save_theme(&mut store, "pref", Theme::Light).unwrap();
        assert_eq!(store.peek("pref"), Some("light"));
    }

    #[test]
    fn storage_error_display() {
        assert_eq!(
            StorageError::Unavailable("blocked".into()).to_string(),
            "storage unavailable: blocked"
        );
        assert_eq!(
            StorageError::Rejected("quota".into()).to_string(),
            "storage rejected operation: quota"
        );
    }
}
