//! Key-Value Store
//!
//! JSON layer over a [`RawStorage`] backend. Reads never fail: missing or
//! corrupt values come back as `None` and are logged. Write failures go
//! through an injected [`WriteErrorPolicy`].

use std::rc::Rc;

use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{DomainError, DomainResult};
use super::memory::MemoryStorage;
use super::traits::RawStorage;

/// Decides what a failed write means for the caller
pub trait WriteErrorPolicy {
    fn on_write_error(&self, key: &str, err: DomainError) -> DomainResult<()>;
}

/// Surface write failures to the caller
#[derive(Debug, Default, Clone, Copy)]
pub struct PropagateWriteErrors;

impl WriteErrorPolicy for PropagateWriteErrors {
    fn on_write_error(&self, key: &str, err: DomainError) -> DomainResult<()> {
        warn!("write to {} failed: {}", key, err);
        Err(err)
    }
}

/// Log write failures and report success
#[derive(Debug, Default, Clone, Copy)]
pub struct SwallowWriteErrors;

impl WriteErrorPolicy for SwallowWriteErrors {
    fn on_write_error(&self, key: &str, err: DomainError) -> DomainResult<()> {
        error!("write to {} failed, continuing: {}", key, err);
        Ok(())
    }
}

#[derive(Clone)]
pub struct KeyValueStore {
    backend: Rc<dyn RawStorage>,
    policy: Rc<dyn WriteErrorPolicy>,
}

impl KeyValueStore {
    /// Store over `backend`, propagating write errors
    pub fn new(backend: Rc<dyn RawStorage>) -> Self {
        Self {
            backend,
            policy: Rc::new(PropagateWriteErrors),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn with_policy(mut self, policy: Rc<dyn WriteErrorPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("read of {} failed: {}", key, err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ignoring corrupt JSON under {}: {}", key, err);
                None
            }
        }
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("value under {} has an unexpected shape: {}", key, err);
                None
            }
        }
    }

    pub fn set(&self, key: &str, value: &Value) -> DomainResult<()> {
        self.set_json(key, value)
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DomainResult<()> {
        let result = serde_json::to_string(value)
            .map_err(DomainError::from)
            .and_then(|raw| self.backend.set_item(key, &raw));
        match result {
            Ok(()) => Ok(()),
            Err(err) => self.policy.on_write_error(key, err),
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(backend: &Rc<MemoryStorage>) -> KeyValueStore {
        KeyValueStore::new(backend.clone())
    }

    #[test]
    fn test_get_missing_and_corrupt() {
        let backend = Rc::new(MemoryStorage::new());
        let store = store_with(&backend);
        assert!(store.get("nothing").is_none());

        backend.insert_raw("broken", "{not json");
        assert!(store.get("broken").is_none());
        assert!(store.get_json::<Vec<String>>("broken").is_none());
    }

    #[test]
    fn test_shape_mismatch_is_absent() {
        let backend = Rc::new(MemoryStorage::new());
        let store = store_with(&backend);
        store.set("numbers", &json!({"a": 1})).unwrap();
        assert!(store.get_json::<Vec<u32>>("numbers").is_none());
        assert_eq!(store.get("numbers"), Some(json!({"a": 1})));
    }

    #[test]
    fn test_set_get_remove() {
        let store = KeyValueStore::in_memory();
        store.set_json("list", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.get_json::<Vec<u32>>("list"), Some(vec![1, 2, 3]));
        store.remove("list");
        assert!(store.get("list").is_none());
        store.remove("list");
    }

    #[test]
    fn test_propagate_policy_surfaces_quota() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_fail_writes(true);
        let store = store_with(&backend);
        let err = store.set("k", &json!(1)).unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[test]
    fn test_swallow_policy_hides_quota() {
        let backend = Rc::new(MemoryStorage::new());
        backend.set_fail_writes(true);
        let store = store_with(&backend).with_policy(Rc::new(SwallowWriteErrors));
        assert!(store.set("k", &json!(1)).is_ok());
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_unserializable_value_is_a_serialization_error() {
        use std::collections::HashMap;
        let store = KeyValueStore::in_memory();
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], "non-string map key");
        let err = store.set_json("bad", &bad).unwrap_err();
        assert!(matches!(err, DomainError::Serialization(_)));
    }
}
