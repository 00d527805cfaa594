//! Magic Planner Frontend Entry Point

mod app;
mod components;
mod context;
mod hooks;
mod runtime;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;
use magic_planner_core::AppConfig;

fn main() {
    console_error_panic_hook::set_once();
    let capacity = AppConfig::default().log_capacity;
    if ring_logger::init_logger("MagicPlanner", LevelFilter::Debug, capacity).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
    mount_to_body(App);
}
