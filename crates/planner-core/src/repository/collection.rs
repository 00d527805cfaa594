//! JSON Collection Repository
//!
//! A list of entities stored as one JSON array under one key. Entries that
//! no longer parse are skipped individually so one bad record does not
//! hide the rest, and writes carry them along unchanged.

use std::marker::PhantomData;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{DomainError, DomainResult, Entity};
use super::kv_store::KeyValueStore;
use super::traits::Repository;

#[derive(Clone)]
pub struct JsonCollection<T> {
    store: KeyValueStore,
    key: String,
    _entity: PhantomData<T>,
}

impl<T: Entity + Serialize + DeserializeOwned> JsonCollection<T> {
    pub fn new(store: KeyValueStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _entity: PhantomData,
        }
    }

    /// Typed entries plus the raw entries that no longer parse
    fn read(&self) -> (Vec<T>, Vec<Value>) {
        match self.store.get(&self.key) {
            None => (Vec::new(), Vec::new()),
            Some(Value::Array(values)) => {
                let mut entities = Vec::with_capacity(values.len());
                let mut unreadable = Vec::new();
                for value in values {
                    match serde_json::from_value(value.clone()) {
                        Ok(entity) => entities.push(entity),
                        Err(err) => {
                            warn!("skipping unreadable entry in {}: {}", self.key, err);
                            unreadable.push(value);
                        }
                    }
                }
                (entities, unreadable)
            }
            Some(_) => {
                warn!("{} is not a list, treating as empty", self.key);
                (Vec::new(), Vec::new())
            }
        }
    }

    /// Unreadable entries are written back untouched after the typed ones.
    fn write(&self, entities: &[T], unreadable: Vec<Value>) -> DomainResult<()> {
        let mut values = entities
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        values.extend(unreadable);
        self.store.set(&self.key, &Value::Array(values))
    }

    pub fn load(&self) -> Vec<T> {
        self.read().0
    }

    /// Replace the typed entries, keeping any that fail to parse
    pub fn save(&self, entities: &[T]) -> DomainResult<()> {
        let (_, unreadable) = self.read();
        self.write(entities, unreadable)
    }
}

impl<T: Entity + Serialize + DeserializeOwned> Repository<T> for JsonCollection<T> {
    fn list(&self) -> Vec<T> {
        self.load()
    }

    fn find_by_id(&self, id: &str) -> Option<T> {
        self.load().into_iter().find(|entity| entity.id() == id)
    }

    fn create(&self, entity: &T) -> DomainResult<T> {
        let (mut entities, unreadable) = self.read();
        if entities.iter().any(|existing| existing.id() == entity.id()) {
            return Err(DomainError::Conflict(format!(
                "{} already contains {}",
                self.key,
                entity.id()
            )));
        }
        entities.push(entity.clone());
        self.write(&entities, unreadable)?;
        Ok(entity.clone())
    }

    fn update(&self, entity: &T) -> DomainResult<T> {
        let (mut entities, unreadable) = self.read();
        let slot = entities
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
            .ok_or_else(|| DomainError::NotFound(format!("{} in {}", entity.id(), self.key)))?;
        *slot = entity.clone();
        self.write(&entities, unreadable)?;
        Ok(entity.clone())
    }

    fn delete(&self, id: &str) -> DomainResult<()> {
        let (mut entities, unreadable) = self.read();
        let before = entities.len();
        entities.retain(|entity| entity.id() != id);
        if entities.len() == before {
            return Ok(());
        }
        self.write(&entities, unreadable)
    }
}
