//! Pure state transitions for the dashboard.
//!
//! [`reduce`] never touches its input: it clones the state, applies one
//! [`DashboardAction`] to the copy and hands the copy back. Unknown instance,
//! view or widget ids leave the copy untouched, so a stale reference from
//! the UI is a no-op rather than an error.

use crate::dashboard::config::{
    DashboardLayout, DashboardView, GridConfig, PositionUpdate, UserWidgetInstance, ViewUpdate,
    WidgetPosition,
};
use crate::dashboard::layout::{clamp_to_grid, next_free_row, restack_visible, splice_move};
use crate::dashboard::widgets::{merge_config, Role, WidgetConfig, WidgetRegistry};
use crate::ids::IdGenerator;
use chrono::{DateTime, Utc};

/// Height given to a freshly added widget.
pub const NEW_WIDGET_HEIGHT: u32 = 2;

/// Everything the store owns.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub current_layout: DashboardLayout,
    pub views: Vec<DashboardView>,
    pub active_view_id: Option<String>,
    pub is_edit_mode: bool,
    pub is_dirty: bool,
    pub is_syncing: bool,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub dragged_widget_id: Option<String>,
    pub layout_backup: Option<DashboardLayout>,
}

impl DashboardState {
    pub fn new(current_layout: DashboardLayout) -> Self {
        Self {
            current_layout,
            views: Vec::new(),
            active_view_id: None,
            is_edit_mode: false,
            is_dirty: false,
            is_syncing: false,
            last_synced_at: None,
            dragged_widget_id: None,
            layout_backup: None,
        }
    }

    pub fn view(&self, view_id: &str) -> Option<&DashboardView> {
        self.views.iter().find(|v| v.id == view_id)
    }

    fn view_mut(&mut self, view_id: &str) -> Option<&mut DashboardView> {
        self.views.iter_mut().find(|v| v.id == view_id)
    }

    /// True when the fields that go to storage differ.
    pub fn persisted_differs(&self, other: &DashboardState) -> bool {
        self.current_layout != other.current_layout
            || self.views != other.views
            || self.active_view_id != other.active_view_id
            || self.last_synced_at != other.last_synced_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    EnterEditMode,
    ExitEditMode {
        save: bool,
    },
    MoveWidget {
        instance_id: String,
        update: PositionUpdate,
    },
    ReorderWidgets {
        active_id: String,
        over_id: String,
    },
    AddWidget {
        widget_id: String,
        position: Option<PositionUpdate>,
    },
    RemoveWidget {
        instance_id: String,
    },
    UpdateWidgetConfig {
        instance_id: String,
        config: WidgetConfig,
    },
    ToggleWidgetVisibility {
        instance_id: String,
    },
    ResetWidget {
        instance_id: String,
    },
    ResetLayout,
    SaveCurrentAsView {
        name: String,
        description: Option<String>,
    },
    LoadView {
        view_id: String,
    },
    UpdateView {
        view_id: String,
        update: ViewUpdate,
    },
    DeleteView {
        view_id: String,
    },
    SetDefaultView {
        view_id: String,
    },
    SetRoleDefaultView {
        view_id: String,
        role: Role,
    },
    SetDraggedWidget {
        instance_id: Option<String>,
    },
    SetSyncing {
        syncing: bool,
    },
    MarkSynced,
}

impl DashboardAction {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardAction::EnterEditMode => "enter_edit_mode",
            DashboardAction::ExitEditMode { .. } => "exit_edit_mode",
            DashboardAction::MoveWidget { .. } => "move_widget",
            DashboardAction::ReorderWidgets { .. } => "reorder_widgets",
            DashboardAction::AddWidget { .. } => "add_widget",
            DashboardAction::RemoveWidget { .. } => "remove_widget",
            DashboardAction::UpdateWidgetConfig { .. } => "update_widget_config",
            DashboardAction::ToggleWidgetVisibility { .. } => "toggle_widget_visibility",
            DashboardAction::ResetWidget { .. } => "reset_widget",
            DashboardAction::ResetLayout => "reset_layout",
            DashboardAction::SaveCurrentAsView { .. } => "save_current_as_view",
            DashboardAction::LoadView { .. } => "load_view",
            DashboardAction::UpdateView { .. } => "update_view",
            DashboardAction::DeleteView { .. } => "delete_view",
            DashboardAction::SetDefaultView { .. } => "set_default_view",
            DashboardAction::SetRoleDefaultView { .. } => "set_role_default_view",
            DashboardAction::SetDraggedWidget { .. } => "set_dragged_widget",
            DashboardAction::SetSyncing { .. } => "set_syncing",
            DashboardAction::MarkSynced => "mark_synced",
        }
    }
}

/// Collaborators a transition may need.
pub struct ReduceContext<'a> {
    pub registry: &'a WidgetRegistry,
    pub ids: &'a dyn IdGenerator,
    pub grid: GridConfig,
    pub now: DateTime<Utc>,
}

pub fn reduce(
    state: &DashboardState,
    action: &DashboardAction,
    ctx: &ReduceContext<'_>,
) -> DashboardState {
    let mut next = state.clone();
    apply(&mut next, action, ctx);
    next
}

fn apply(state: &mut DashboardState, action: &DashboardAction, ctx: &ReduceContext<'_>) {
    match action {
        DashboardAction::EnterEditMode => {
            // A second enter must not overwrite the original snapshot.
            if state.is_edit_mode {
                return;
            }
            state.layout_backup = Some(state.current_layout.clone());
            state.is_edit_mode = true;
        }
        DashboardAction::ExitEditMode { save } => {
            if !state.is_edit_mode {
                return;
            }
            if let Some(backup) = state.layout_backup.take() {
                if !*save {
                    state.current_layout = backup;
                    state.is_dirty = false;
                }
            }
            state.is_edit_mode = false;
            state.dragged_widget_id = None;
        }
        DashboardAction::MoveWidget {
            instance_id,
            update,
        } => {
            let Some(widget) = state.current_layout.widget_mut(instance_id) else {
                return;
            };
            widget.position = clamp_to_grid(widget.position.merged(update));
            widget.last_updated = ctx.now;
            state.is_dirty = true;
        }
        DashboardAction::ReorderWidgets { active_id, over_id } => {
            let layout = &mut state.current_layout;
            let (Some(from), Some(to)) = (layout.index_of(active_id), layout.index_of(over_id))
            else {
                return;
            };
            if from == to {
                return;
            }
            splice_move(&mut layout.widgets, from, to);
            layout.widgets[to].last_updated = ctx.now;
            restack_visible(&mut layout.widgets, ctx.now);
            state.is_dirty = true;
        }
        DashboardAction::AddWidget {
            widget_id,
            position,
        } => {
            let Some(definition) = ctx.registry.get_definition(widget_id) else {
                return;
            };
            let defaults = WidgetPosition::new(
                0,
                next_free_row(&state.current_layout.widgets),
                definition.size_config.default_grid_width(),
                NEW_WIDGET_HEIGHT,
            );
            let mut placed = match position {
                Some(update) => clamp_to_grid(defaults.merged(update)),
                None => clamp_to_grid(defaults),
            };
            // Stacking below the last widget may run past MAX_ROW.
            if position.map_or(true, |update| update.y.is_none()) {
                placed.y = defaults.y;
            }
            state.current_layout.widgets.push(UserWidgetInstance::new(
                ctx.ids.next_id(),
                widget_id,
                placed,
                definition.default_config.clone(),
                ctx.now,
            ));
            state.is_dirty = true;
        }
        DashboardAction::RemoveWidget { instance_id } => {
            let widgets = &mut state.current_layout.widgets;
            let before = widgets.len();
            widgets.retain(|w| &w.instance_id != instance_id);
            if widgets.len() != before {
                state.is_dirty = true;
            }
        }
        DashboardAction::UpdateWidgetConfig {
            instance_id,
            config,
        } => {
            let Some(widget) = state.current_layout.widget_mut(instance_id) else {
                return;
            };
            widget.config = merge_config(&widget.config, config);
            widget.last_updated = ctx.now;
            state.is_dirty = true;
        }
        DashboardAction::ToggleWidgetVisibility { instance_id } => {
            let Some(widget) = state.current_layout.widget_mut(instance_id) else {
                return;
            };
            widget.visible = !widget.visible;
            widget.last_updated = ctx.now;
            state.is_dirty = true;
        }
        DashboardAction::ResetWidget { instance_id } => {
            let Some(widget) = state.current_layout.widget_mut(instance_id) else {
                return;
            };
            let Some(defaults) = ctx.registry.default_config(&widget.widget_id) else {
                return;
            };
            widget.config = defaults;
            widget.last_updated = ctx.now;
            state.is_dirty = true;
        }
        DashboardAction::ResetLayout => {
            state.current_layout =
                DashboardLayout::starter(&ctx.grid, ctx.registry, ctx.ids, ctx.now);
            state.is_dirty = true;
        }
        DashboardAction::SaveCurrentAsView { name, description } => {
            let view = DashboardView::snapshot(
                ctx.ids.next_id(),
                name,
                description.clone(),
                &state.current_layout,
                ctx.now,
            );
            state.active_view_id = Some(view.id.clone());
            state.views.push(view);
            state.is_dirty = false;
        }
        DashboardAction::LoadView { view_id } => {
            let Some(view) = state.view(view_id) else {
                return;
            };
            state.current_layout = view.layout.clone();
            state.active_view_id = Some(view_id.clone());
            state.is_dirty = false;
        }
        DashboardAction::UpdateView { view_id, update } => {
            if let Some(view) = state.view_mut(view_id) {
                view.apply(update, ctx.now);
            }
        }
        DashboardAction::DeleteView { view_id } => {
            state.views.retain(|v| &v.id != view_id);
            if state.active_view_id.as_ref() == Some(view_id) {
                state.active_view_id = None;
            }
        }
        DashboardAction::SetDefaultView { view_id } => {
            if state.view(view_id).is_none() {
                return;
            }
            for view in &mut state.views {
                view.is_default = &view.id == view_id;
            }
        }
        DashboardAction::SetRoleDefaultView { view_id, role } => {
            if state.view(view_id).is_none() {
                return;
            }
            for view in &mut state.views {
                if &view.id == view_id {
                    view.is_role_default = true;
                    view.role_id = Some(*role);
                    view.updated_at = ctx.now;
                } else if view.role_id == Some(*role) && view.is_role_default {
                    view.is_role_default = false;
                    view.updated_at = ctx.now;
                }
            }
        }
        DashboardAction::SetDraggedWidget { instance_id } => {
            state.dragged_widget_id = instance_id.clone();
        }
        DashboardAction::SetSyncing { syncing } => {
            state.is_syncing = *syncing;
        }
        DashboardAction::MarkSynced => {
            state.is_syncing = false;
            state.is_dirty = false;
            state.last_synced_at = Some(ctx.now);
        }
    }
}
