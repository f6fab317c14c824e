//! Named key-value slots for the local backend.
//!
//! A slot holds one string value under one key, the same shape as browser
//! local storage.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A string-valued key-value store.
pub trait SlotStorage {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be stored. The previous value
    /// is left in place in that case.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Slots stored as `<dir>/<key>.json` files.
///
/// # Examples
///
/// ```
/// use innkeep::store::{FileSlotStorage, SlotStorage};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut storage = FileSlotStorage::new(dir.path());
///
/// assert_eq!(storage.read("reservations").unwrap(), None);
/// storage.write("reservations", "[]").unwrap();
/// assert_eq!(storage.read("reservations").unwrap().as_deref(), Some("[]"));
/// ```
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    /// Creates slot storage rooted at `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The file backing `key`.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let storage_error = |e: std::io::Error| Error::Storage {
            key: key.to_string(),
            reason: e.to_string(),
        };

        fs::create_dir_all(&self.dir).map_err(storage_error)?;

        // Write beside the slot, then swap it in
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value).map_err(storage_error)?;
        fs::rename(&staging, self.slot_path(key)).map_err(storage_error)
    }
}

/// In-process slots.
///
/// Can be told to refuse writes, which is how a full storage quota looks to
/// the local backend.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: HashMap<String, String>,
    reject_writes: bool,
}

impl MemorySlotStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage with one pre-filled slot.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.into(), value.into());
        storage
    }

    /// Makes every subsequent write fail.
    #[must_use]
    pub const fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Peeks at a slot without going through the trait.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes {
            return Err(Error::Storage {
                key: key.to_string(),
                reason: "storage quota exceeded".to_string(),
            });
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
