//! Application Context
//!
//! Shared services and signals provided via Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use magic_planner_core::PlannerServices;

/// App-wide services and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Storage-backed services; not `Send`, so kept in local storage
    services: StoredValue<Rc<PlannerServices>, LocalStorage>,
    /// Bumped whenever the dashboard layout or tier changes - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped whenever the dashboard layout or tier changes - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(services: Rc<PlannerServices>, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            services: StoredValue::new_local(services),
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn services(&self) -> Rc<PlannerServices> {
        self.services.get_value()
    }

    /// Trigger a reload of the dashboard
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
