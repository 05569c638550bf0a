//! Read-only views derived from [`DashboardState`].

use crate::dashboard::config::{DashboardView, GridConfig, UserWidgetInstance};
use crate::dashboard::layout::{sort_by_position, Bands};
use crate::dashboard::reducer::DashboardState;
use crate::dashboard::widgets::{Role, WidgetDefinition, WidgetRegistry};

/// All widgets in paint order.
pub fn sorted_widgets(state: &DashboardState) -> Vec<&UserWidgetInstance> {
    sort_by_position(&state.current_layout.widgets)
}

/// Visible widgets in paint order. This is the sequence the grid renders
/// and the drag controller indexes into.
pub fn visible_widgets(state: &DashboardState) -> Vec<&UserWidgetInstance> {
    sorted_widgets(state)
        .into_iter()
        .filter(|w| w.visible)
        .collect()
}

pub fn widget_bands<'a>(widgets: &'a [&'a UserWidgetInstance]) -> Bands<'a, &'a UserWidgetInstance> {
    Bands::split(widgets)
}

pub fn widget<'a>(state: &'a DashboardState, instance_id: &str) -> Option<&'a UserWidgetInstance> {
    state.current_layout.widget(instance_id)
}

/// Widgets `role` may place, in registry order.
pub fn available_widgets(registry: &WidgetRegistry, role: Role) -> Vec<&WidgetDefinition> {
    registry.get_for_role(role)
}

/// Widgets `role` may place that are not on the layout yet.
pub fn unplaced_widgets<'a>(
    state: &DashboardState,
    registry: &'a WidgetRegistry,
    role: Role,
) -> Vec<&'a WidgetDefinition> {
    registry
        .get_for_role(role)
        .into_iter()
        .filter(|d| state.current_layout.instance_of(&d.id).is_none())
        .collect()
}

pub fn grid_config(state: &DashboardState) -> GridConfig {
    state.current_layout.grid()
}

pub fn active_view(state: &DashboardState) -> Option<&DashboardView> {
    state
        .active_view_id
        .as_deref()
        .and_then(|id| state.view(id))
}

pub fn default_view(state: &DashboardState) -> Option<&DashboardView> {
    state.views.iter().find(|v| v.is_default)
}

pub fn role_default_view(state: &DashboardState, role: Role) -> Option<&DashboardView> {
    state
        .views
        .iter()
        .find(|v| v.is_role_default && v.role_id == Some(role))
}

/// Whether local changes have not reached storage or the server.
pub fn has_unsynced_changes(state: &DashboardState, storage_degraded: bool) -> bool {
    state.is_dirty || storage_degraded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::config::{DashboardLayout, WidgetPosition};
    use crate::ids::SequentialIds;
    use chrono::Utc;

    fn state() -> DashboardState {
        DashboardState::new(DashboardLayout::starter(
            &GridConfig::default(),
            &WidgetRegistry::with_defaults(),
            &SequentialIds::new("w"),
            Utc::now(),
        ))
    }

    #[test]
    fn sorted_by_row_then_column() {
        let mut state = state();
        state.current_layout.widgets[0].position = WidgetPosition::new(0, 9, 3, 1);
        let order: Vec<&str> = sorted_widgets(&state)
            .iter()
            .map(|w| w.widget_id.as_str())
            .collect();
        assert_eq!(order[0], "total-orders");
        assert_eq!(order[7], "total-revenue");
    }

    #[test]
    fn hidden_widgets_are_not_visible() {
        let mut state = state();
        state.current_layout.widgets[2].visible = false;
        assert_eq!(visible_widgets(&state).len(), 7);
        assert_eq!(sorted_widgets(&state).len(), 8);
    }

    #[test]
    fn starter_bands() {
        let state = state();
        let widgets = visible_widgets(&state);
        let bands = widget_bands(&widgets);
        assert_eq!(bands.stats.len(), 4);
        assert_eq!(bands.charts[0].widget_id, "revenue-trend");
        assert_eq!(bands.bottom[1].widget_id, "store-performance");
    }

    #[test]
    fn unplaced_excludes_layout_widgets() {
        let state = state();
        let registry = WidgetRegistry::with_defaults();
        let ids: Vec<&str> = unplaced_widgets(&state, &registry, Role::Staff)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert!(!ids.contains(&"total-orders"));
        assert!(ids.contains(&"top-products"));
        assert!(!ids.contains(&"activity-feed"));
    }

    #[test]
    fn unsynced_when_dirty_or_degraded() {
        let mut state = state();
        assert!(!has_unsynced_changes(&state, false));
        assert!(has_unsynced_changes(&state, true));
        state.is_dirty = true;
        assert!(has_unsynced_changes(&state, false));
    }
}
