//! Repository Layer
//!
//! Data access over the injected key-value backend.

mod collection;
mod keys;
mod kv_store;
mod memory;
mod pending_link_repo;
mod plugin_item_store;
mod preferences_repo;
mod traits;
mod widget_config_repo;


pub use collection::JsonCollection;
pub use keys::{StorageKeys, DEFAULT_APP_PREFIX};
pub use kv_store::{KeyValueStore, PropagateWriteErrors, SwallowWriteErrors, WriteErrorPolicy};
pub use memory::MemoryStorage;
pub use pending_link_repo::{PendingLinkRepository, PendingLinks};
pub use plugin_item_store::PluginItemStore;
pub use preferences_repo::PreferencesRepository;
pub use traits::{RawStorage, Repository};
pub use widget_config_repo::WidgetConfigRepository;
