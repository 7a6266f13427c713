//! Durable key-value slot storage
//!
//! A small localStorage-style store: one file per key under a base
//! directory, values are opaque string blobs. Reads are forgiving (a missing
//! or unreadable slot is simply absent); writes are synchronous.

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scoped key-value storage backed by one file per slot
pub struct SlotStore {
    base_path: PathBuf,
}

impl SlotStore {
    /// Open or create a slot store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened slot store");
        Ok(Self { base_path })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Read a slot; missing or unreadable slots yield None
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Failed to read slot, treating as absent");
                None
            }
        }
    }

    /// Write a slot synchronously
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.slot_path(key), value).context(format!("Failed to write slot: {}", key))
    }
}

/// Layout direction preference for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    /// Forgiving parse: anything other than "rtl" is LTR
    pub fn parse(s: &str) -> Self {
        if s.trim() == "rtl" { LayoutDirection::Rtl } else { LayoutDirection::Ltr }
    }

    pub fn toggled(self) -> Self {
        match self {
            LayoutDirection::Ltr => LayoutDirection::Rtl,
            LayoutDirection::Rtl => LayoutDirection::Ltr,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutDirection::Ltr => "ltr",
            LayoutDirection::Rtl => "rtl",
        }
    }
}

impl SlotStore {
    /// Read the layout direction preference, defaulting to LTR
    pub fn layout_direction(&self) -> LayoutDirection {
        self.get(crate::LAYOUT_KEY)
            .map(|s| LayoutDirection::parse(&s))
            .unwrap_or_default()
    }

    /// Persist the layout direction preference
    pub fn set_layout_direction(&self, dir: LayoutDirection) -> Result<()> {
        self.put(crate::LAYOUT_KEY, dir.as_str())
    }
}
