//! Timer runtime seam
//!
//! The engine only needs "spawn a local task" and "sleep". The browser
//! build backs this with `spawn_local` + gloo timers; tests use tokio.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;

pub trait TimerRuntime {
    /// Run `task` on the current thread's executor
    fn spawn(&self, task: LocalBoxFuture<()>);

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<()>;
}
