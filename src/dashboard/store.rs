use crate::dashboard::config::{
    DashboardLayout, DashboardView, GridConfig, PositionUpdate, ViewUpdate,
};
use crate::dashboard::persist::{self, STORAGE_KEY};
use crate::dashboard::reducer::{reduce, DashboardAction, DashboardState, ReduceContext};
use crate::dashboard::widgets::{Role, WidgetConfig, WidgetRegistry};
use crate::ids::{IdGenerator, UuidGenerator};
use crate::settings::Settings;
use crate::storage::Storage;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Construction options for [`DashboardStore`].
pub struct StoreOptions {
    pub storage_key: String,
    pub grid: GridConfig,
    pub ids: Box<dyn IdGenerator>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            grid: GridConfig::default(),
            ids: Box::new(UuidGenerator),
        }
    }
}

impl StoreOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            storage_key: settings.storage_key.clone(),
            grid: settings.grid(),
            ids: Box::new(UuidGenerator),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }
}

/// Owner of the working layout, saved views and edit-mode transaction.
///
/// Every method that changes persisted fields writes the state through to
/// storage before returning. A failed write switches the store to
/// in-memory operation for the rest of the session.
pub struct DashboardStore {
    state: DashboardState,
    registry: Arc<WidgetRegistry>,
    storage: Box<dyn Storage>,
    ids: Box<dyn IdGenerator>,
    storage_key: String,
    grid: GridConfig,
    storage_degraded: bool,
    warnings: Vec<String>,
}

impl DashboardStore {
    /// Load the dashboard from `storage`. A blob that cannot be parsed or
    /// migrated is logged and replaced by the starter layout. Only a storage
    /// read that fails outright is returned as an error.
    pub fn open(
        storage: Box<dyn Storage>,
        registry: Arc<WidgetRegistry>,
        options: StoreOptions,
    ) -> anyhow::Result<Self> {
        let StoreOptions {
            storage_key,
            grid,
            ids,
        } = options;
        let blob = storage
            .get(&storage_key)
            .with_context(|| format!("read dashboard storage slot '{storage_key}'"))?;

        let mut warnings = Vec::new();
        let state = match blob.as_deref().map(persist::decode) {
            Some(Ok((persisted, sanitize_warnings))) => {
                for w in &sanitize_warnings {
                    tracing::warn!("{w}");
                }
                warnings = sanitize_warnings;
                persisted.into_state()
            }
            Some(Err(e)) => {
                tracing::warn!(
                    error = %format!("{e:#}"),
                    key = %storage_key,
                    "discarding unreadable persisted dashboard; starting from defaults"
                );
                warnings.push(format!("persisted dashboard discarded: {e:#}"));
                Self::initial_state(&grid, &registry, ids.as_ref())
            }
            None => {
                tracing::debug!(key = %storage_key, "no persisted dashboard; using defaults");
                Self::initial_state(&grid, &registry, ids.as_ref())
            }
        };

        Ok(Self {
            state,
            registry,
            storage,
            ids,
            storage_key,
            grid,
            storage_degraded: false,
            warnings,
        })
    }

    fn initial_state(
        grid: &GridConfig,
        registry: &WidgetRegistry,
        ids: &dyn IdGenerator,
    ) -> DashboardState {
        DashboardState::new(DashboardLayout::starter(grid, registry, ids, Utc::now()))
    }

    /// Apply one action, then write through if a persisted field changed.
    pub fn dispatch(&mut self, action: DashboardAction) {
        let ctx = ReduceContext {
            registry: &self.registry,
            ids: self.ids.as_ref(),
            grid: self.grid,
            now: Utc::now(),
        };
        let next = reduce(&self.state, &action, &ctx);
        if next == self.state {
            tracing::debug!(action = action.name(), "dashboard action had no effect");
            return;
        }
        let persist = self.state.persisted_differs(&next);
        self.state = next;
        if persist {
            self.persist();
        }
    }

    fn persist(&mut self) {
        if self.storage_degraded {
            return;
        }
        let result = persist::encode(&self.state)
            .and_then(|blob| self.storage.set(&self.storage_key, &blob));
        if let Err(e) = result {
            tracing::warn!(
                error = %format!("{e:#}"),
                key = %self.storage_key,
                "dashboard storage write failed; keeping changes in memory only"
            );
            self.storage_degraded = true;
        }
    }

    /// Remove the persisted slot and start over from the starter layout.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.storage
            .remove(&self.storage_key)
            .with_context(|| format!("remove dashboard storage slot '{}'", self.storage_key))?;
        self.state = Self::initial_state(&self.grid, &self.registry, self.ids.as_ref());
        self.storage_degraded = false;
        self.warnings.clear();
        Ok(())
    }

    pub fn enter_edit_mode(&mut self) {
        tracing::debug!("entering dashboard edit mode");
        self.dispatch(DashboardAction::EnterEditMode);
    }

    pub fn exit_edit_mode(&mut self, save: bool) {
        tracing::debug!(save, "leaving dashboard edit mode");
        self.dispatch(DashboardAction::ExitEditMode { save });
    }

    pub fn move_widget(&mut self, instance_id: &str, update: PositionUpdate) {
        self.dispatch(DashboardAction::MoveWidget {
            instance_id: instance_id.to_string(),
            update,
        });
    }

    pub fn reorder_widgets(&mut self, active_id: &str, over_id: &str) {
        self.dispatch(DashboardAction::ReorderWidgets {
            active_id: active_id.to_string(),
            over_id: over_id.to_string(),
        });
    }

    pub fn add_widget(&mut self, widget_id: &str, position: Option<PositionUpdate>) {
        self.dispatch(DashboardAction::AddWidget {
            widget_id: widget_id.to_string(),
            position,
        });
    }

    pub fn remove_widget(&mut self, instance_id: &str) {
        self.dispatch(DashboardAction::RemoveWidget {
            instance_id: instance_id.to_string(),
        });
    }

    pub fn update_widget_config(&mut self, instance_id: &str, config: WidgetConfig) {
        self.dispatch(DashboardAction::UpdateWidgetConfig {
            instance_id: instance_id.to_string(),
            config,
        });
    }

    pub fn toggle_widget_visibility(&mut self, instance_id: &str) {
        self.dispatch(DashboardAction::ToggleWidgetVisibility {
            instance_id: instance_id.to_string(),
        });
    }

    pub fn reset_widget(&mut self, instance_id: &str) {
        self.dispatch(DashboardAction::ResetWidget {
            instance_id: instance_id.to_string(),
        });
    }

    pub fn reset_layout(&mut self) {
        self.dispatch(DashboardAction::ResetLayout);
    }

    /// Snapshot the working layout as a new active view and return its id.
    pub fn save_current_as_view(&mut self, name: &str, description: Option<&str>) -> String {
        self.dispatch(DashboardAction::SaveCurrentAsView {
            name: name.to_string(),
            description: description.map(str::to_string),
        });
        let id = self
            .state
            .views
            .last()
            .map(|v| v.id.clone())
            .unwrap_or_default();
        tracing::debug!(view_id = %id, name, "saved dashboard view");
        id
    }

    pub fn load_view(&mut self, view_id: &str) {
        self.dispatch(DashboardAction::LoadView {
            view_id: view_id.to_string(),
        });
    }

    pub fn update_view(&mut self, view_id: &str, update: ViewUpdate) {
        self.dispatch(DashboardAction::UpdateView {
            view_id: view_id.to_string(),
            update,
        });
    }

    pub fn delete_view(&mut self, view_id: &str) {
        self.dispatch(DashboardAction::DeleteView {
            view_id: view_id.to_string(),
        });
    }

    pub fn set_default_view(&mut self, view_id: &str) {
        self.dispatch(DashboardAction::SetDefaultView {
            view_id: view_id.to_string(),
        });
    }

    pub fn set_role_default_view(&mut self, view_id: &str, role: Role) {
        self.dispatch(DashboardAction::SetRoleDefaultView {
            view_id: view_id.to_string(),
            role,
        });
    }

    pub fn set_dragged_widget(&mut self, instance_id: Option<&str>) {
        self.dispatch(DashboardAction::SetDraggedWidget {
            instance_id: instance_id.map(str::to_string),
        });
    }

    pub fn set_syncing(&mut self, syncing: bool) {
        self.dispatch(DashboardAction::SetSyncing { syncing });
    }

    pub fn mark_synced(&mut self) {
        self.dispatch(DashboardAction::MarkSynced);
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn current_layout(&self) -> &DashboardLayout {
        &self.state.current_layout
    }

    pub fn views(&self) -> &[DashboardView] {
        &self.state.views
    }

    pub fn active_view_id(&self) -> Option<&str> {
        self.state.active_view_id.as_deref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state.is_edit_mode
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    pub fn is_syncing(&self) -> bool {
        self.state.is_syncing
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.state.last_synced_at
    }

    pub fn dragged_widget_id(&self) -> Option<&str> {
        self.state.dragged_widget_id.as_deref()
    }

    pub fn layout_backup(&self) -> Option<&DashboardLayout> {
        self.state.layout_backup.as_ref()
    }

    pub fn is_storage_degraded(&self) -> bool {
        self.storage_degraded
    }

    /// Problems found while loading the persisted dashboard.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
