//! Auto-save engine

mod debounce;
mod runtime;

pub use debounce::{
    AutoSave, AutoSaveBuilder, AutoSaveOptions, AutoSaveState, AutoSaveStatus, SaveFn,
    DEFAULT_DEBOUNCE_MS,
};
pub use runtime::{LocalBoxFuture, TimerRuntime};
