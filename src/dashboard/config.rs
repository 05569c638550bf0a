use crate::dashboard::layout::clamp_to_grid;
use crate::dashboard::widgets::{Role, WidgetConfig, WidgetRegistry};
use crate::ids::IdGenerator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of columns in the dashboard grid. Not configurable.
pub const GRID_COLUMNS: u32 = 12;

/// Schema version written with every persisted layout.
pub const LAYOUT_VERSION: u32 = 1;

fn default_version() -> u32 {
    LAYOUT_VERSION
}

fn default_columns() -> u32 {
    GRID_COLUMNS
}

fn default_row_height() -> u32 {
    80
}

fn default_gap() -> u32 {
    16
}

fn default_visible() -> bool {
    true
}

/// Pixel parameters of the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_gap")]
    pub gap: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            row_height: default_row_height(),
            gap: default_gap(),
        }
    }
}

/// Placement of a widget on the grid, in columns and rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WidgetPosition {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WidgetPosition {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn merged(&self, update: &PositionUpdate) -> Self {
        Self {
            x: update.x.unwrap_or(self.x),
            y: update.y.unwrap_or(self.y),
            width: update.width.unwrap_or(self.width),
            height: update.height.unwrap_or(self.height),
        }
    }
}

/// Partial position; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PositionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PositionUpdate {
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

/// A user's placement of a widget definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserWidgetInstance {
    pub instance_id: String,
    pub widget_id: String,
    pub position: WidgetPosition,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub config: WidgetConfig,
    pub last_updated: DateTime<Utc>,
}

impl UserWidgetInstance {
    pub fn new(
        instance_id: String,
        widget_id: &str,
        position: WidgetPosition,
        config: WidgetConfig,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            instance_id,
            widget_id: widget_id.to_string(),
            position,
            visible: true,
            config,
            last_updated: now,
        }
    }
}

/// A working arrangement of widget instances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub widgets: Vec<UserWidgetInstance>,
    #[serde(default = "default_columns")]
    pub grid_columns: u32,
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    #[serde(default = "default_gap")]
    pub gap: u32,
}

/// Widgets of the starter layout and where they go: four stat cards, two
/// charts, two tables.
const STARTER_WIDGETS: [(&str, WidgetPosition); 8] = [
    ("total-revenue", WidgetPosition::new(0, 0, 3, 1)),
    ("total-orders", WidgetPosition::new(3, 0, 3, 1)),
    ("average-order-value", WidgetPosition::new(6, 0, 3, 1)),
    ("active-stores", WidgetPosition::new(9, 0, 3, 1)),
    ("revenue-trend", WidgetPosition::new(0, 1, 6, 3)),
    ("orders-by-store", WidgetPosition::new(6, 1, 6, 3)),
    ("recent-orders", WidgetPosition::new(0, 4, 6, 3)),
    ("store-performance", WidgetPosition::new(6, 4, 6, 3)),
];

impl DashboardLayout {
    pub fn empty(grid: &GridConfig) -> Self {
        Self {
            version: LAYOUT_VERSION,
            widgets: Vec::new(),
            grid_columns: GRID_COLUMNS,
            row_height: grid.row_height,
            gap: grid.gap,
        }
    }

    /// Default starter layout. Every call mints fresh instance ids.
    pub fn starter(
        grid: &GridConfig,
        registry: &WidgetRegistry,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Self {
        let mut layout = Self::empty(grid);
        layout.widgets = STARTER_WIDGETS
            .iter()
            .map(|(widget_id, position)| {
                UserWidgetInstance::new(
                    ids.next_id(),
                    widget_id,
                    *position,
                    registry.default_config(widget_id).unwrap_or_default(),
                    now,
                )
            })
            .collect();
        layout
    }

    pub fn grid(&self) -> GridConfig {
        GridConfig {
            columns: self.grid_columns,
            row_height: self.row_height,
            gap: self.gap,
        }
    }

    pub fn index_of(&self, instance_id: &str) -> Option<usize> {
        self.widgets
            .iter()
            .position(|w| w.instance_id == instance_id)
    }

    pub fn widget(&self, instance_id: &str) -> Option<&UserWidgetInstance> {
        self.widgets.iter().find(|w| w.instance_id == instance_id)
    }

    pub fn widget_mut(&mut self, instance_id: &str) -> Option<&mut UserWidgetInstance> {
        self.widgets
            .iter_mut()
            .find(|w| w.instance_id == instance_id)
    }

    pub fn instance_of(&self, widget_id: &str) -> Option<&UserWidgetInstance> {
        self.widgets.iter().find(|w| w.widget_id == widget_id)
    }

    /// Repair a layout read from storage. Duplicate instance ids are dropped
    /// (first one wins) and positions are pulled back inside the grid.
    /// Instances pointing at unknown widgets are kept.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.version != LAYOUT_VERSION {
            warnings.push(format!(
                "layout version {} restamped as {}",
                self.version, LAYOUT_VERSION
            ));
            self.version = LAYOUT_VERSION;
        }
        if self.grid_columns != GRID_COLUMNS {
            warnings.push(format!(
                "layout grid had {} columns; forced to {}",
                self.grid_columns, GRID_COLUMNS
            ));
            self.grid_columns = GRID_COLUMNS;
        }
        let mut seen = HashSet::new();
        self.widgets.retain(|w| {
            if seen.insert(w.instance_id.clone()) {
                true
            } else {
                warnings.push(format!(
                    "duplicate widget instance '{}' dropped",
                    w.instance_id
                ));
                false
            }
        });
        for widget in &mut self.widgets {
            let clamped = clamp_to_grid(widget.position);
            if clamped != widget.position {
                warnings.push(format!(
                    "widget instance '{}' moved back inside the grid",
                    widget.instance_id
                ));
                widget.position = clamped;
            }
        }
        warnings
    }
}

/// A named snapshot of a layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: DashboardLayout,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_role_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn snapshot(
        id: String,
        name: &str,
        description: Option<String>,
        layout: &DashboardLayout,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description,
            layout: layout.clone(),
            is_default: false,
            is_role_default: false,
            role_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: &ViewUpdate, now: DateTime<Utc>) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(layout) = &update.layout {
            self.layout = layout.clone();
        }
        if let Some(is_role_default) = update.is_role_default {
            self.is_role_default = is_role_default;
        }
        if let Some(role_id) = update.role_id {
            self.role_id = role_id;
        }
        self.updated_at = now;
    }
}

/// Partial view update. `isDefault` is not here; use the default-view operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub layout: Option<DashboardLayout>,
    pub is_role_default: Option<bool>,
    pub role_id: Option<Option<Role>>,
}

impl ViewUpdate {
    pub fn rename(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}
