use super::{
    ChartSettings, FeedSettings, Role, SizeConfig, StatsSettings, TableSettings,
    WidgetDefinition, WidgetType,
};

const STAT_SIZE: SizeConfig = SizeConfig::new(1, 2, 1, 120);
const CHART_SIZE: SizeConfig = SizeConfig::new(2, 4, 2, 300);
const TABLE_SIZE: SizeConfig = SizeConfig::new(2, 4, 2, 300);
const PANEL_SIZE: SizeConfig = SizeConfig::new(1, 2, 1, 240);

const OFFICE: &[Role] = &[Role::SuperAdmin, Role::Admin];
const MANAGEMENT: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::Manager];

pub(super) fn definitions() -> Vec<WidgetDefinition> {
    vec![
        WidgetDefinition::new("total-revenue", WidgetType::Stats, "dollar-sign", STAT_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<StatsSettings>(),
        WidgetDefinition::new("total-orders", WidgetType::Stats, "shopping-cart", STAT_SIZE)
            .with_settings::<StatsSettings>(),
        WidgetDefinition::new(
            "average-order-value",
            WidgetType::Stats,
            "trending-up",
            STAT_SIZE,
        )
        .with_roles(MANAGEMENT)
        .with_settings::<StatsSettings>(),
        WidgetDefinition::new("active-stores", WidgetType::Stats, "store", STAT_SIZE)
            .with_roles(OFFICE)
            .with_settings::<StatsSettings>(),
        WidgetDefinition::new("revenue-trend", WidgetType::ChartLine, "line-chart", CHART_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<ChartSettings>(),
        WidgetDefinition::new("orders-by-store", WidgetType::ChartBar, "bar-chart", CHART_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<ChartSettings>(),
        WidgetDefinition::new("recent-orders", WidgetType::Table, "receipt", TABLE_SIZE)
            .with_settings::<TableSettings>(),
        WidgetDefinition::new("store-performance", WidgetType::Table, "award", TABLE_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<TableSettings>(),
        WidgetDefinition::new("sales-by-category", WidgetType::ChartPie, "pie-chart", CHART_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<ChartSettings>(),
        WidgetDefinition::new("dspr-summary", WidgetType::Stats, "clipboard-list", STAT_SIZE)
            .with_roles(MANAGEMENT)
            .with_settings::<StatsSettings>(),
        WidgetDefinition::new("top-products", WidgetType::List, "pizza", PANEL_SIZE)
            .with_settings::<FeedSettings>(),
        WidgetDefinition::new("upcoming-shifts", WidgetType::Calendar, "calendar", PANEL_SIZE)
            .with_settings::<FeedSettings>(),
        WidgetDefinition::new("activity-feed", WidgetType::ActivityFeed, "activity", PANEL_SIZE)
            .with_roles(OFFICE)
            .with_settings::<FeedSettings>(),
        WidgetDefinition::new("quick-actions", WidgetType::QuickActions, "zap", PANEL_SIZE),
    ]
}
