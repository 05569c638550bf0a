pub mod config;
pub mod drag;
pub mod layout;
pub mod persist;
pub mod reducer;
pub mod render;
pub mod selectors;
pub mod store;
pub mod widgets;

pub use config::{DashboardLayout, DashboardView, GridConfig, UserWidgetInstance, WidgetPosition};
pub use drag::{DragController, DragEvent, DragKey, Point};
pub use reducer::{DashboardAction, DashboardState};
pub use render::{resolve_widget, WidgetView};
pub use store::{DashboardStore, StoreOptions};
pub use widgets::{Role, WidgetDefinition, WidgetRegistry, WidgetType};
