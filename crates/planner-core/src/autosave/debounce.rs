//! Debounced Auto-Save
//!
//! State machine over one edited value:
//!
//! ```text
//! Idle ──change──▶ PendingSave ──timer──▶ Saving ──ok──▶ Idle
//!                      ▲   │                 │
//!                      └───┘ change          └──err──▶ Error ──▶ Idle
//! ```
//!
//! Every change bumps a generation counter; a timer only commits if its
//! generation is still current when it wakes. That is how superseding
//! changes, `force_save` and `dispose` cancel a scheduled commit.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::domain::{DomainError, DomainResult};
use super::runtime::{LocalBoxFuture, TimerRuntime};

pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveOptions {
    /// Quiet period before a change is committed
    pub delay: Duration,
    /// When false, no commit is ever attempted
    pub enabled: bool,
}

impl AutoSaveOptions {
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for AutoSaveOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSaveState {
    #[default]
    Idle,
    PendingSave,
    Saving,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoSaveStatus {
    pub state: AutoSaveState,
    pub last_saved: Option<DateTime<Utc>>,
    /// Message of the last failed commit, cleared when the next one starts
    pub error: Option<String>,
}

impl AutoSaveStatus {
    pub fn is_saving(&self) -> bool {
        self.state == AutoSaveState::Saving
    }
}

pub type SaveFn<T> = Rc<dyn Fn(T) -> LocalBoxFuture<DomainResult<()>>>;

struct Callbacks<T> {
    on_success: Option<Box<dyn Fn(&T)>>,
    on_error: Option<Box<dyn Fn(&DomainError)>>,
    on_status: Option<Box<dyn Fn(&AutoSaveStatus)>>,
}

struct Inner<T> {
    options: AutoSaveOptions,
    current: Option<T>,
    /// Serialization of the last committed value
    snapshot: Option<String>,
    generation: u64,
    timer_armed: bool,
    in_flight: bool,
    disposed: bool,
    status: AutoSaveStatus,
}

impl<T> Inner<T> {
    fn settled_state(&self) -> AutoSaveState {
        if self.timer_armed {
            AutoSaveState::PendingSave
        } else {
            AutoSaveState::Idle
        }
    }
}

enum Commit<T> {
    Skip,
    Save(T, String),
    Fail(DomainError),
}

pub struct AutoSaveBuilder<T> {
    runtime: Rc<dyn TimerRuntime>,
    save_fn: SaveFn<T>,
    options: AutoSaveOptions,
    callbacks: Callbacks<T>,
}

impl<T> AutoSaveBuilder<T> {
    pub fn options(mut self, options: AutoSaveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_success(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.callbacks.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&DomainError) + 'static) -> Self {
        self.callbacks.on_error = Some(Box::new(f));
        self
    }

    /// Observe every state transition
    pub fn on_status(mut self, f: impl Fn(&AutoSaveStatus) + 'static) -> Self {
        self.callbacks.on_status = Some(Box::new(f));
        self
    }

    pub fn build(self) -> AutoSave<T> {
        AutoSave {
            inner: Rc::new(RefCell::new(Inner {
                options: self.options,
                current: None,
                snapshot: None,
                generation: 0,
                timer_armed: false,
                in_flight: false,
                disposed: false,
                status: AutoSaveStatus::default(),
            })),
            callbacks: Rc::new(self.callbacks),
            runtime: self.runtime,
            save_fn: self.save_fn,
        }
    }
}

/// Debounced saver for one edited value. Cloning shares the same state.
pub struct AutoSave<T> {
    inner: Rc<RefCell<Inner<T>>>,
    callbacks: Rc<Callbacks<T>>,
    runtime: Rc<dyn TimerRuntime>,
    save_fn: SaveFn<T>,
}

impl<T> Clone for AutoSave<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            callbacks: self.callbacks.clone(),
            runtime: self.runtime.clone(),
            save_fn: self.save_fn.clone(),
        }
    }
}

impl<T: Serialize + Clone + 'static> AutoSave<T> {
    pub fn builder(
        runtime: Rc<dyn TimerRuntime>,
        save_fn: impl Fn(T) -> LocalBoxFuture<DomainResult<()>> + 'static,
    ) -> AutoSaveBuilder<T> {
        AutoSaveBuilder {
            runtime,
            save_fn: Rc::new(save_fn),
            options: AutoSaveOptions::default(),
            callbacks: Callbacks {
                on_success: None,
                on_error: None,
                on_status: None,
            },
        }
    }

    pub fn status(&self) -> AutoSaveStatus {
        self.inner.borrow().status.clone()
    }

    pub fn state(&self) -> AutoSaveState {
        self.inner.borrow().status.state
    }

    pub fn is_saving(&self) -> bool {
        self.inner.borrow().status.is_saving()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.inner.borrow().status.last_saved
    }

    pub fn error(&self) -> Option<String> {
        self.inner.borrow().status.error.clone()
    }

    /// Record `value` as already persisted; nothing is written
    pub fn prime(&self, value: T) {
        let serialized = serde_json::to_string(&value).ok();
        let mut inner = self.inner.borrow_mut();
        inner.current = Some(value);
        inner.snapshot = serialized;
    }

    /// Observe a new value and restart the debounce timer
    pub fn update(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.current = Some(value);
            if !inner.options.enabled {
                return;
            }
        }
        self.schedule();
    }

    /// Cancel any pending timer and commit now, still skipping no-ops
    pub async fn force_save(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || !inner.options.enabled || inner.current.is_none() {
                return;
            }
            if inner.in_flight {
                drop(inner);
                // One save at a time: commit again once the current one lands
                self.schedule();
                return;
            }
            inner.generation += 1;
            inner.timer_armed = false;
        }
        self.commit().await;
    }

    /// Cancel the pending timer for good; later changes are ignored
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.generation += 1;
        inner.timer_armed = false;
    }

    fn schedule(&self) {
        let (generation, delay) = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.timer_armed = true;
            if !inner.in_flight {
                inner.status.state = AutoSaveState::PendingSave;
            }
            (inner.generation, inner.options.delay)
        };
        self.notify_status();

        let this = self.clone();
        self.runtime
            .spawn(Box::pin(async move { this.run_timer(generation, delay).await }));
    }

    async fn run_timer(self, generation: u64, delay: Duration) {
        loop {
            self.runtime.sleep(delay).await;
            let inner = self.inner.borrow();
            if inner.disposed || inner.generation != generation {
                return;
            }
            if !inner.in_flight {
                break;
            }
            // A save is still running; wait another quiet period
        }
        self.inner.borrow_mut().timer_armed = false;
        self.commit().await;
    }

    fn begin_commit(&self) -> Commit<T> {
        let mut inner = self.inner.borrow_mut();
        let Some(value) = inner.current.clone() else {
            return Commit::Skip;
        };
        match serde_json::to_string(&value) {
            Ok(serialized) if inner.snapshot.as_deref() == Some(serialized.as_str()) => {
                inner.status.state = inner.settled_state();
                Commit::Skip
            }
            Ok(serialized) => {
                inner.in_flight = true;
                inner.status.state = AutoSaveState::Saving;
                inner.status.error = None;
                Commit::Save(value, serialized)
            }
            Err(err) => Commit::Fail(err.into()),
        }
    }

    async fn commit(&self) {
        let step = self.begin_commit();
        self.notify_status();
        let (value, serialized) = match step {
            Commit::Skip => {
                debug!("auto-save skipped, value unchanged");
                return;
            }
            Commit::Fail(err) => {
                self.finish_error(err);
                return;
            }
            Commit::Save(value, serialized) => (value, serialized),
        };

        match (self.save_fn)(value.clone()).await {
            Ok(()) => self.finish_success(&value, serialized),
            Err(err) => self.finish_error(err),
        }
    }

    fn finish_success(&self, value: &T, serialized: String) {
        let disposed = {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = false;
            inner.snapshot = Some(serialized);
            inner.status.last_saved = Some(Utc::now());
            inner.status.error = None;
            inner.status.state = inner.settled_state();
            inner.disposed
        };
        if disposed {
            return;
        }
        self.notify_status();
        if let Some(on_success) = &self.callbacks.on_success {
            on_success(value);
        }
    }

    fn finish_error(&self, err: DomainError) {
        warn!("auto-save failed: {}", err);
        let disposed = {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = false;
            inner.status.error = Some(err.to_string());
            inner.status.state = AutoSaveState::Error;
            inner.disposed
        };
        if !disposed {
            self.notify_status();
            if let Some(on_error) = &self.callbacks.on_error {
                on_error(&err);
            }
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.status.state = inner.settled_state();
        }
        if !disposed {
            self.notify_status();
        }
    }

    fn notify_status(&self) {
        if let Some(on_status) = &self.callbacks.on_status {
            let status = self.status();
            on_status(&status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::future::Future;
    use tokio::task::LocalSet;

    struct TokioTimers;

    impl TimerRuntime for TokioTimers {
        fn spawn(&self, task: LocalBoxFuture<()>) {
            tokio::task::spawn_local(task);
        }

        fn sleep(&self, duration: Duration) -> LocalBoxFuture<()> {
            Box::pin(tokio::time::sleep(duration))
        }
    }

    #[derive(Default)]
    struct Recorder {
        saved: RefCell<Vec<String>>,
        failures_left: Cell<u32>,
        latency_ms: Cell<u64>,
        in_flight: Cell<u32>,
        max_in_flight: Cell<u32>,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    async fn run_local<F: Future>(f: F) -> F::Output {
        LocalSet::new().run_until(f).await
    }

    fn builder(rec: &Rc<Recorder>) -> AutoSaveBuilder<String> {
        let rec = rec.clone();
        AutoSave::builder(
            Rc::new(TokioTimers),
            move |value: String| -> LocalBoxFuture<DomainResult<()>> {
                let rec = rec.clone();
                Box::pin(async move {
                    rec.in_flight.set(rec.in_flight.get() + 1);
                    rec.max_in_flight.set(rec.max_in_flight.get().max(rec.in_flight.get()));
                    if rec.latency_ms.get() > 0 {
                        tokio::time::sleep(ms(rec.latency_ms.get())).await;
                    }
                    rec.in_flight.set(rec.in_flight.get() - 1);
                    if rec.failures_left.get() > 0 {
                        rec.failures_left.set(rec.failures_left.get() - 1);
                        return Err(DomainError::Storage("quota exceeded".to_string()));
                    }
                    rec.saved.borrow_mut().push(value);
                    Ok(())
                })
            },
        )
    }

    fn saved(rec: &Recorder) -> Vec<String> {
        rec.saved.borrow().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_coalesce_into_one_save() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec).build();

            for value in ["E", "Ep", "Epc", "Epcot"] {
                auto_save.update(value.to_string());
                tokio::time::sleep(ms(300)).await;
            }
            assert_eq!(auto_save.state(), AutoSaveState::PendingSave);
            assert!(saved(&rec).is_empty());

            tokio::time::sleep(ms(1000)).await;
            assert_eq!(saved(&rec), vec!["Epcot"]);
            assert_eq!(auto_save.state(), AutoSaveState::Idle);
            assert!(auto_save.last_saved().is_some());
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_value_is_not_saved_twice() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec).build();

            auto_save.update("Space Mountain".to_string());
            tokio::time::sleep(ms(1500)).await;
            auto_save.update("Space Mountain".to_string());
            tokio::time::sleep(ms(1500)).await;
            auto_save.force_save().await;

            assert_eq!(saved(&rec).len(), 1);
            assert_eq!(auto_save.state(), AutoSaveState::Idle);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_save_cancels_timer_and_commits_once() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec).build();

            auto_save.update("draft".to_string());
            tokio::time::sleep(ms(200)).await;
            auto_save.force_save().await;
            assert_eq!(saved(&rec), vec!["draft"]);

            tokio::time::sleep(ms(2000)).await;
            assert_eq!(saved(&rec), vec!["draft"]);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_then_retry_on_next_change() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            rec.failures_left.set(1);
            let errors = Rc::new(Cell::new(0));
            let seen = errors.clone();
            let auto_save = builder(&rec)
                .on_error(move |_| seen.set(seen.get() + 1))
                .build();

            auto_save.update("first".to_string());
            tokio::time::sleep(ms(1500)).await;
            assert!(auto_save.error().is_some());
            assert!(!auto_save.is_saving());
            assert_eq!(auto_save.state(), AutoSaveState::Idle);
            assert_eq!(errors.get(), 1);

            // No automatic retry
            tokio::time::sleep(ms(5000)).await;
            assert!(saved(&rec).is_empty());

            auto_save.update("second".to_string());
            tokio::time::sleep(ms(1500)).await;
            assert!(auto_save.error().is_none());
            assert_eq!(saved(&rec), vec!["second"]);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_one_save_in_flight() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            rec.latency_ms.set(3000);
            let auto_save = builder(&rec).build();

            auto_save.update("a".to_string());
            tokio::time::sleep(ms(1500)).await;
            assert!(auto_save.is_saving());

            auto_save.update("b".to_string());
            tokio::time::sleep(ms(3000)).await;
            // First save landed at 4s, the second timer is still waiting it out
            assert_eq!(saved(&rec), vec!["a"]);

            tokio::time::sleep(ms(5000)).await;
            assert_eq!(saved(&rec), vec!["a", "b"]);
            assert_eq!(rec.max_in_flight.get(), 1);
            assert_eq!(auto_save.state(), AutoSaveState::Idle);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_commit() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec).build();

            auto_save.update("unsaved".to_string());
            tokio::time::sleep(ms(500)).await;
            auto_save.dispose();
            auto_save.update("after teardown".to_string());
            tokio::time::sleep(ms(3000)).await;

            assert!(saved(&rec).is_empty());
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_commits() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec)
                .options(AutoSaveOptions::default().enabled(false))
                .build();

            auto_save.update("locked".to_string());
            tokio::time::sleep(ms(1500)).await;
            auto_save.force_save().await;

            assert!(saved(&rec).is_empty());
            assert_eq!(auto_save.state(), AutoSaveState::Idle);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_primed_value_is_a_no_op() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let auto_save = builder(&rec)
                .options(AutoSaveOptions::default().with_delay_ms(250))
                .build();

            auto_save.prime("loaded".to_string());
            auto_save.update("loaded".to_string());
            tokio::time::sleep(ms(500)).await;
            assert!(saved(&rec).is_empty());

            auto_save.update("edited".to_string());
            tokio::time::sleep(ms(500)).await;
            assert_eq!(saved(&rec), vec!["edited"]);
        })
        .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_observer_sees_transitions() {
        run_local(async {
            let rec = Rc::new(Recorder::default());
            let states = Rc::new(RefCell::new(Vec::new()));
            let sink = states.clone();
            let auto_save = builder(&rec)
                .on_status(move |status| sink.borrow_mut().push(status.state))
                .build();

            auto_save.update("value".to_string());
            tokio::time::sleep(ms(1500)).await;

            assert_eq!(
                *states.borrow(),
                vec![AutoSaveState::PendingSave, AutoSaveState::Saving, AutoSaveState::Idle]
            );
        })
        .await;
    }
}
