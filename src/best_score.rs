//! Best score tracking
//!
//! A single high-water mark persisted as decimal text. Never decreases.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Best score across all finished sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "space-shot-high";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Fold a finished session's score in. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Parse a stored value; anything that isn't a non-negative integer is 0
    pub fn parse(text: &str) -> Self {
        Self {
            value: Self::parse_value(text).unwrap_or_default(),
        }
    }

    fn parse_value(text: &str) -> Option<u64> {
        let text = text.trim();
        if let Ok(value) = text.parse::<u64>() {
            return Some(value);
        }
        // Tolerate "120.0" style values written by other tools. Anything
        // past the u64 range is as unreadable as garbage.
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v < u64::MAX as f64 => Some(v.floor() as u64),
            _ => None,
        }
    }

    /// Load from a store (absent or corrupt -> 0)
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(text) => match Self::parse_value(&text) {
                Some(value) => {
                    log::info!("Loaded best score {}", value);
                    Self { value }
                }
                None => {
                    log::warn!("Ignoring unreadable best score {:?}", text);
                    Self::default()
                }
            },
            None => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write to a store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("Best score saved ({})", self.value);
        Ok(())
    }
}
