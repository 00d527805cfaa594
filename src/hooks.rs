//! Reactive hooks over the auto-save engine

use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};
use magic_planner_core::autosave::{AutoSave, AutoSaveOptions, AutoSaveState, AutoSaveStatus, LocalBoxFuture};
use magic_planner_core::domain::{DomainResult, FeatureData};
use magic_planner_core::services::{AutoSaveService, FeatureSaver};
use magic_planner_core::PlannerServices;
use serde::Serialize;

use crate::context::use_app_context;
use crate::runtime::BrowserTimers;
use crate::store::{store_update_widget, use_app_store, AppStore};

/// Reactive view of one auto-save engine
pub struct AutoSaveHandle<T: 'static> {
    engine: StoredValue<AutoSave<T>, LocalStorage>,
    status: ReadSignal<AutoSaveStatus>,
}

impl<T: 'static> Clone for AutoSaveHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for AutoSaveHandle<T> {}

impl<T: Serialize + Clone + 'static> AutoSaveHandle<T> {
    /// Commit now instead of waiting for the quiet period
    pub fn force_save(&self) {
        if let Some(engine) = self.engine.try_get_value() {
            spawn_local(async move { engine.force_save().await });
        }
    }

    pub fn state(&self) -> AutoSaveState {
        self.status.get().state
    }

    pub fn is_saving(&self) -> bool {
        self.status.get().is_saving()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.status.get().last_saved
    }

    pub fn error(&self) -> Option<String> {
        self.status.get().error
    }
}

/// Debounce-save `value` with `save_fn` for as long as the calling
/// component lives. The value at mount time counts as already saved.
pub fn use_auto_save<T>(
    value: Signal<T>,
    save_fn: impl Fn(T) -> LocalBoxFuture<DomainResult<()>> + 'static,
    options: AutoSaveOptions,
    on_success: impl Fn(&T) + 'static,
) -> AutoSaveHandle<T>
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    let (status, set_status) = signal(AutoSaveStatus::default());
    let engine = AutoSave::builder(Rc::new(BrowserTimers), save_fn)
        .options(options)
        .on_status(move |s| {
            set_status.try_set(s.clone());
        })
        .on_success(on_success)
        .on_error(|err| error!("auto-save failed: {}", err))
        .build();
    engine.prime(value.get_untracked());

    let tracked = engine.clone();
    Effect::new(move |seen: Option<()>| {
        let current = value.get();
        if seen.is_some() {
            tracked.update(current);
        }
    });

    let engine = StoredValue::new_local(engine);
    on_cleanup(move || {
        engine.try_with_value(|engine| engine.dispose());
    });

    AutoSaveHandle { engine, status }
}

/// Editor state for one feature widget
pub struct FeatureEditor<D: 'static> {
    pub draft: RwSignal<D>,
    pub auto_save: AutoSaveHandle<D>,
    /// Whether background saving is on; otherwise edits wait for `save`
    pub auto_enabled: bool,
    widget_id: StoredValue<String>,
    saver: StoredValue<Rc<AutoSaveService<D>>, LocalStorage>,
    services: StoredValue<Rc<PlannerServices>, LocalStorage>,
    store: AppStore,
}

impl<D: 'static> Clone for FeatureEditor<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: 'static> Copy for FeatureEditor<D> {}

impl<D: FeatureData + Send + Sync> FeatureEditor<D> {
    /// Save now, whether or not background saving is on
    pub fn save(&self) {
        if self.auto_enabled {
            self.auto_save.force_save();
            return;
        }
        let (Some(saver), Some(services)) = (self.saver.try_get_value(), self.services.try_get_value()) else {
            return;
        };
        let widget_id = self.widget_id.get_value();
        let data = self.draft.get_untracked();
        let store = self.store;
        spawn_local(async move {
            match saver.save_feature_data(&data, Some(&widget_id)).await {
                Ok(Some(_)) => refresh_widget(&store, &services, &widget_id),
                Ok(None) => debug!("{} not saved", D::PLUGIN),
                Err(err) => error!("saving {} failed: {}", D::PLUGIN, err),
            }
        });
    }
}

/// Load the widget's item into a draft signal and auto-save edits to it.
///
/// A widget without an item starts from the feature's defaults under a
/// fresh id, so the first save creates the item and later ones update it.
pub fn use_feature_editor<D: FeatureData + Send + Sync>(widget_id: String) -> FeatureEditor<D> {
    let services = use_app_context().services();
    let store = use_app_store();
    let saver = services.saver::<D>();

    let initial = saver.load_for_widget(&widget_id).unwrap_or_else(|| {
        let mut data = D::default();
        data.ensure_id();
        data
    });
    let draft = RwSignal::new(initial);
    let options = services.auto_save_options();

    let save_fn = {
        let saver = saver.clone();
        let widget_id = widget_id.clone();
        move |data: D| -> LocalBoxFuture<DomainResult<()>> {
            let saver = saver.clone();
            let widget_id = widget_id.clone();
            Box::pin(async move {
                saver.save_feature_data(&data, Some(&widget_id)).await.map(|_| ())
            })
        }
    };
    let on_success = {
        let services = services.clone();
        let widget_id = widget_id.clone();
        move |_: &D| refresh_widget(&store, &services, &widget_id)
    };
    let auto_save = use_auto_save(draft.into(), save_fn, options, on_success);

    FeatureEditor {
        draft,
        auto_save,
        auto_enabled: options.enabled,
        widget_id: StoredValue::new(widget_id),
        saver: StoredValue::new_local(saver),
        services: StoredValue::new_local(services),
        store,
    }
}

/// Pull the widget's current selection into the store after a save
fn refresh_widget(store: &AppStore, services: &PlannerServices, widget_id: &str) {
    if let Some(widget) = services.widgets.get_widget(widget_id) {
        store_update_widget(store, widget);
    }
}
