//! Browser timers for the auto-save engine

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use magic_planner_core::autosave::{LocalBoxFuture, TimerRuntime};

pub struct BrowserTimers;

impl TimerRuntime for BrowserTimers {
    fn spawn(&self, task: LocalBoxFuture<()>) {
        spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<()> {
        let ms = duration.as_millis().min(u32::MAX as u128) as u32;
        Box::pin(TimeoutFuture::new(ms))
    }
}
