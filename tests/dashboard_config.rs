use dashboard_layout::dashboard::config::{DashboardLayout, GridConfig, PositionUpdate, GRID_COLUMNS};
use dashboard_layout::dashboard::render::resolve_all;
use dashboard_layout::dashboard::selectors::{self, visible_widgets, widget_bands};
use dashboard_layout::dashboard::widgets::{typed_config, Period, TableSettings};
use dashboard_layout::dashboard::{
    DashboardStore, Role, StoreOptions, WidgetDefinition, WidgetRegistry, WidgetType,
};
use dashboard_layout::i18n::{KeyEcho, MapTranslator};
use dashboard_layout::ids::SequentialIds;
use dashboard_layout::settings::Settings;
use dashboard_layout::storage::MemoryStorage;
use serde_json::json;
use std::sync::Arc;

fn store_with(registry: WidgetRegistry) -> DashboardStore {
    DashboardStore::open(
        Box::new(MemoryStorage::new()),
        Arc::new(registry),
        StoreOptions::default().with_ids(SequentialIds::new("c")),
    )
    .expect("open store")
}

#[test]
fn registry_defaults_present() {
    let registry = WidgetRegistry::with_defaults();
    assert_eq!(registry.len(), 14);
    assert_eq!(registry.ids()[0], "total-revenue");
    let def = registry.get_definition("revenue-trend").expect("trend");
    assert_eq!(def.widget_type, WidgetType::ChartLine);
    assert_eq!(def.title_key, "dashboard.widgets.revenue-trend.title");
    assert!(registry.get_definition("nope").is_none());
}

#[test]
fn role_filtering_keeps_registry_order() {
    let registry = WidgetRegistry::with_defaults();
    let staff: Vec<&str> = registry
        .get_for_role(Role::Staff)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(
        staff,
        vec!["total-orders", "recent-orders", "top-products", "upcoming-shifts", "quick-actions"]
    );
    assert_eq!(registry.get_for_role(Role::SuperAdmin).len(), 14);
}

#[test]
fn custom_definitions_can_replace_builtins() {
    let mut registry = WidgetRegistry::with_defaults();
    registry.register(
        WidgetDefinition::new(
            "recent-orders",
            WidgetType::Table,
            "receipt",
            registry.get_definition("recent-orders").unwrap().size_config,
        )
        .with_roles(&[Role::Admin]),
    );
    assert_eq!(registry.len(), 14);
    assert!(!registry.get_definition("recent-orders").unwrap().allows(Role::Staff));
}

#[test]
fn starter_layout_rows() {
    let layout = DashboardLayout::starter(
        &GridConfig::default(),
        &WidgetRegistry::with_defaults(),
        &SequentialIds::new("s"),
        chrono::Utc::now(),
    );
    let rows: Vec<u32> = layout.widgets.iter().map(|w| w.position.y).collect();
    assert_eq!(rows, vec![0, 0, 0, 0, 1, 1, 4, 4]);
    for w in &layout.widgets {
        assert!(w.position.x + w.position.width <= GRID_COLUMNS);
    }
}

#[test]
fn grid_follows_settings() {
    let settings = Settings {
        row_height: 120,
        gap: 8,
        ..Settings::default()
    };
    let store = DashboardStore::open(
        Box::new(MemoryStorage::new()),
        Arc::new(WidgetRegistry::with_defaults()),
        StoreOptions::from_settings(&settings),
    )
    .expect("open store");
    let grid = selectors::grid_config(store.state());
    assert_eq!(grid.columns, 12);
    assert_eq!(grid.row_height, 120);
    assert_eq!(grid.gap, 8);
}

#[test]
fn added_widgets_fit_and_stack() {
    let mut store = store_with(WidgetRegistry::with_defaults());
    store.add_widget("top-products", None);
    let added = store.current_layout().widgets.last().unwrap().position;
    assert_eq!(added.y, 7);
    assert_eq!(added.x, 0);
    assert!(added.x + added.width <= GRID_COLUMNS);

    store.add_widget(
        "upcoming-shifts",
        Some(PositionUpdate {
            x: Some(11),
            width: Some(4),
            ..PositionUpdate::default()
        }),
    );
    let placed = store.current_layout().widgets.last().unwrap().position;
    assert_eq!((placed.x, placed.width), (8, 4));
}

#[test]
fn unknown_widgets_render_as_placeholders() {
    let mut store = store_with(WidgetRegistry::with_defaults());
    store.add_widget("quick-actions", None);

    // A newer build dropped the widget; the instance must survive.
    let mut trimmed = WidgetRegistry::default();
    for def in store.registry().definitions() {
        if def.id != "quick-actions" {
            trimmed.register(def.clone());
        }
    }
    let widgets = visible_widgets(store.state());
    let views = resolve_all(&widgets, &trimmed, &KeyEcho);
    assert_eq!(views.len(), 9);
    assert!(views[0].is_resolved());
    assert!(!views.last().unwrap().is_resolved());
    assert_eq!(views.last().unwrap().title(), "dashboard.widgetNotFound");
}

#[test]
fn bands_follow_visible_order() {
    let mut store = store_with(WidgetRegistry::with_defaults());
    let revenue = store
        .current_layout()
        .instance_of("total-revenue")
        .unwrap()
        .instance_id
        .clone();
    store.toggle_widget_visibility(&revenue);
    let widgets = visible_widgets(store.state());
    let bands = widget_bands(&widgets);
    assert_eq!(bands.stats.len(), 4);
    assert_eq!(bands.stats[3].widget_id, "revenue-trend");
    assert_eq!(bands.charts[0].widget_id, "orders-by-store");
    assert_eq!(bands.bottom.len(), 1);
}

#[test]
fn typed_settings_merge_defaults_and_overrides() {
    let mut store = store_with(WidgetRegistry::with_defaults());
    let recent = store
        .current_layout()
        .instance_of("recent-orders")
        .unwrap()
        .instance_id
        .clone();
    let mut update = serde_json::Map::new();
    update.insert("pageSize".into(), json!(15));
    update.insert("highlight".into(), json!("late"));
    store.update_widget_config(&recent, update);

    let instance = store.current_layout().widget(&recent).unwrap();
    let settings: TableSettings = typed_config(&instance.config);
    assert_eq!(settings.page_size, 15);
    assert_eq!(instance.config["highlight"], json!("late"));

    let trend = store.current_layout().instance_of("revenue-trend").unwrap();
    let chart: dashboard_layout::dashboard::widgets::ChartSettings = typed_config(&trend.config);
    assert_eq!(chart.period, Period::Week);
}

#[test]
fn translations_load_from_nested_json() {
    let t = MapTranslator::from_json(
        r#"{"dashboard": {"widgets": {"top-products": {"title": "Top Products"}}}}"#,
    )
    .expect("parse");
    let mut store = store_with(WidgetRegistry::with_defaults());
    store.add_widget("top-products", None);
    let widgets = visible_widgets(store.state());
    let views = resolve_all(&widgets, store.registry(), &t);
    assert_eq!(views.last().unwrap().title(), "Top Products");
}
