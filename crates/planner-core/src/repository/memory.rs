//! In-memory storage backend
//!
//! Stands in for localStorage in tests and when the browser refuses access
//! (private mode, disabled storage).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::domain::{DomainError, DomainResult};
use super::traits::RawStorage;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    /// Byte budget over keys + values, like the browser's quota
    quota: Option<usize>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail as if the quota were exhausted
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw stored string, bypassing JSON handling
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Store a raw string without counting it as a write
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl RawStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> DomainResult<()> {
        if self.fail_writes.get() {
            return Err(DomainError::Storage(format!("quota exceeded writing {}", key)));
        }
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(DomainError::Storage(format!(
                    "quota exceeded writing {} ({} of {} bytes)",
                    key, needed, quota
                )));
            }
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(16);
        assert!(storage.set_item("k", "short").is_ok());
        let err = storage.set_item("k2", "this value is far too long").unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        // Overwriting an existing key only counts the new value
        assert!(storage.set_item("k", "0123456789").is_ok());
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_fail_switch() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(storage.set_item("k", "v").is_err());
        storage.set_fail_writes(false);
        assert!(storage.set_item("k", "v").is_ok());
        assert_eq!(storage.raw("k").as_deref(), Some("v"));
    }
}
