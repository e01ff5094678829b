//! User preferences: theme, high-contrast, season-1 theme, favorites.
//!
//! The worker has no `localStorage`, so preferences live in a worker-side
//! mirror (`MemoryStore`) seeded from the page's storage at startup via
//! `restore`. Every successful write is queued in an outbox that the
//! dashboard turns into `Persist` effects for the main thread to apply.
//!
//! ## Keys
//!
//! ```text
//! springfield_theme         "night"
//! springfield_highContrast  true
//! springfield_season1Theme  false
//! springfield_favorites     ["moes-tavern","kwik-e-mart"]
//! ```
//!
//! Values are JSON. Absent, malformed, or unreadable entries fall back to
//! their defaults without surfacing an error.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::theme::Theme;

/// Minimal `localStorage`-shaped interface.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store with an optional byte quota. Can be switched into a
/// failing mode to mimic disabled storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { quota_bytes: Some(quota_bytes), ..Self::default() }
    }

    /// A store whose every operation fails.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        if let Some(quota) = self.quota_bytes {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_string() });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The named preference entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    Theme,
    HighContrast,
    Season1Theme,
    Favorites,
}

impl PrefKey {
    pub const ALL: [PrefKey; 4] = [
        PrefKey::Theme,
        PrefKey::HighContrast,
        PrefKey::Season1Theme,
        PrefKey::Favorites,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrefKey::Theme => "theme",
            PrefKey::HighContrast => "highContrast",
            PrefKey::Season1Theme => "season1Theme",
            PrefKey::Favorites => "favorites",
        }
    }
}

/// In-memory view of every preference, with documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Preferences {
    pub theme: Theme,
    pub high_contrast: bool,
    pub season1_theme: bool,
    pub favorites: BTreeSet<String>,
}

/// A write the host page must mirror into real `localStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistEntry {
    pub key: String,
    pub value: String,
}

/// Namespaced, JSON-encoded preference access over any `KeyValueStore`.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    store: S,
    prefix: String,
    available: bool,
    outbox: Vec<PersistEntry>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self { store, prefix: prefix.into(), available: true, outbox: Vec::new() }
    }

    pub fn full_key(&self, key: PrefKey) -> String {
        format!("{}{}", self.prefix, key.name())
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Stop touching storage for the rest of the session.
    pub fn mark_unavailable(&mut self) {
        if self.available {
            tracing::warn!("preference storage disabled for this session");
        }
        self.available = false;
        self.outbox.clear();
    }

    /// Read and decode a preference. Missing, malformed, or unreadable → `None`.
    pub fn read<T: DeserializeOwned>(&self, key: PrefKey) -> Option<T> {
        if !self.available {
            return None;
        }
        let full = self.full_key(key);
        match self.store.get_item(&full) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(key = %full, error = %e, "ignoring malformed preference");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %full, error = %e, "preference read failed");
                None
            }
        }
    }

    /// Encode and store a preference. Returns whether it was written. The
    /// first failed write disables storage for the session.
    pub fn write<T: Serialize>(&mut self, key: PrefKey, value: &T) -> bool {
        if !self.available {
            return false;
        }
        let full = self.full_key(key);
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %full, error = %e, "preference not serializable");
                return false;
            }
        };
        match self.store.set_item(&full, &raw) {
            Ok(()) => {
                self.outbox.push(PersistEntry { key: full, value: raw });
                true
            }
            Err(e) => {
                tracing::warn!(key = %full, error = %e, "preference write failed");
                self.mark_unavailable();
                false
            }
        }
    }

    /// Read every preference, applying per-field defaults.
    pub fn load(&self) -> Preferences {
        Preferences {
            theme: self.read(PrefKey::Theme).unwrap_or_default(),
            high_contrast: self.read(PrefKey::HighContrast).unwrap_or(false),
            season1_theme: self.read(PrefKey::Season1Theme).unwrap_or(false),
            favorites: self.read(PrefKey::Favorites).unwrap_or_default(),
        }
    }

    /// Seed the store from raw entries the host read out of `localStorage`.
    /// Entries outside this store's namespace are ignored. Returns how many
    /// entries were accepted.
    pub fn restore<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if !self.available {
            return 0;
        }
        let mut accepted = 0;
        for (key, value) in entries {
            if !key.starts_with(&self.prefix) {
                continue;
            }
            if let Err(e) = self.store.set_item(&key, &value) {
                tracing::warn!(key = %key, error = %e, "preference restore failed");
                self.mark_unavailable();
                return accepted;
            }
            accepted += 1;
        }
        accepted
    }

    /// Take the writes the host has not yet mirrored.
    pub fn drain_outbox(&mut self) -> Vec<PersistEntry> {
        std::mem::take(&mut self.outbox)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
