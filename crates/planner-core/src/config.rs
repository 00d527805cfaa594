//! Application configuration

use std::rc::Rc;

use crate::autosave::AutoSaveOptions;
use crate::repository::{
    PropagateWriteErrors, StorageKeys, SwallowWriteErrors, WriteErrorPolicy, DEFAULT_APP_PREFIX,
};

/// What a failed storage write means for callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteErrorMode {
    /// Return the error; auto-save shows it
    #[default]
    Propagate,
    /// Log it and carry on
    Swallow,
}

impl WriteErrorMode {
    pub fn policy(&self) -> Rc<dyn WriteErrorPolicy> {
        match self {
            WriteErrorMode::Propagate => Rc::new(PropagateWriteErrors),
            WriteErrorMode::Swallow => Rc::new(SwallowWriteErrors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of every storage key
    pub storage_prefix: String,
    pub autosave: AutoSaveOptions,
    pub write_errors: WriteErrorMode,
    /// Entries kept by the in-app log viewer
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_APP_PREFIX.to_string(),
            autosave: AutoSaveOptions::default(),
            write_errors: WriteErrorMode::default(),
            log_capacity: 200,
        }
    }
}

impl AppConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_autosave_delay_ms(mut self, ms: u64) -> Self {
        self.autosave = self.autosave.with_delay_ms(ms);
        self
    }

    pub fn with_write_errors(mut self, mode: WriteErrorMode) -> Self {
        self.write_errors = mode;
        self
    }

    pub fn keys(&self) -> StorageKeys {
        StorageKeys::new(self.storage_prefix.clone())
    }
}
