//! Browser Storage Backend
//!
//! `localStorage` behind the core's `RawStorage` seam.

use std::rc::Rc;

use log::warn;
use magic_planner_core::domain::{DomainError, DomainResult};
use magic_planner_core::repository::{MemoryStorage, RawStorage};
use wasm_bindgen::JsValue;

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// `None` when the page has no usable `localStorage` (private mode, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        Some(Self { storage })
    }
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl RawStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> DomainResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| DomainError::Storage(js_error(e)))
    }

    fn set_item(&self, key: &str, value: &str) -> DomainResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| DomainError::Storage(format!("writing {}: {}", key, js_error(e))))
    }

    fn remove_item(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!("could not remove {}: {}", key, js_error(e));
        }
    }
}

/// `localStorage` when available, otherwise a session-only memory store
pub fn open_backend() -> Rc<dyn RawStorage> {
    match BrowserStorage::open() {
        Some(storage) => Rc::new(storage),
        None => {
            warn!("localStorage unavailable, changes will not survive a reload");
            Rc::new(MemoryStorage::new())
        }
    }
}
