//! Repository Layer - Core Traits
//!
//! Abstract interfaces for data access. The raw backend is injected so the
//! browser's localStorage and an in-memory fake are interchangeable.

use crate::domain::{DomainResult, Entity};

/// Durable string key-value backend (localStorage, in-memory, ...)
pub trait RawStorage {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Best effort; missing keys are not an error
    fn remove_item(&self, key: &str);
}

/// Core repository trait for CRUD operations over one collection.
///
/// Operations are synchronous: every call is a read-modify-write against
/// the backing key within a single task turn.
pub trait Repository<T: Entity> {
    /// List all entities; unreadable data yields an empty list
    fn list(&self) -> Vec<T>;

    /// Find entity by ID
    fn find_by_id(&self, id: &str) -> Option<T>;

    /// Insert a new entity; an existing id is a `Conflict`
    fn create(&self, entity: &T) -> DomainResult<T>;

    /// Replace an existing entity; an unknown id is `NotFound`
    fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID. Deleting an unknown id succeeds.
    fn delete(&self, id: &str) -> DomainResult<()>;
}
