//! Magic Planner Core
//!
//! Layered like the app it serves:
//! - domain: entities, typed feature data, errors
//! - repository: key-value store and the collections on top of it
//! - autosave: debounced commit engine
//! - services: widget linking, per-feature auto-save, registry, gating

pub mod autosave;
pub mod config;
pub mod domain;
pub mod repository;
pub mod services;

pub use config::{AppConfig, WriteErrorMode};
pub use services::PlannerServices;
