use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

mod catalog;
mod settings;

pub use settings::{ChartSettings, FeedSettings, Period, StatsSettings, TableSettings};

/// Opaque per-widget configuration map.
pub type WidgetConfig = Map<String, Value>;

/// Kind of content a widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    Stats,
    ChartLine,
    ChartBar,
    ChartPie,
    Table,
    List,
    Calendar,
    ActivityFeed,
    QuickActions,
}

impl WidgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Stats => "stats",
            WidgetType::ChartLine => "chart-line",
            WidgetType::ChartBar => "chart-bar",
            WidgetType::ChartPie => "chart-pie",
            WidgetType::Table => "table",
            WidgetType::List => "list",
            WidgetType::Calendar => "calendar",
            WidgetType::ActivityFeed => "activity-feed",
            WidgetType::QuickActions => "quick-actions",
        }
    }
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role tags used to gate which widgets a user may place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Manager, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width and height constraints on the 1-4 registry scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeConfig {
    pub min_width: u8,
    pub max_width: u8,
    pub default_width: u8,
    pub min_height_px: u32,
}

impl SizeConfig {
    pub const fn new(min_width: u8, max_width: u8, default_width: u8, min_height_px: u32) -> Self {
        Self {
            min_width,
            max_width,
            default_width,
            min_height_px,
        }
    }

    /// Default width mapped onto the 12 column grid.
    pub fn default_grid_width(&self) -> u32 {
        u32::from(self.default_width.clamp(1, 4)) * 3
    }
}

/// Static catalog entry describing a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    pub title_key: String,
    pub description_key: String,
    pub icon: String,
    pub allowed_roles: Vec<Role>,
    pub size_config: SizeConfig,
    #[serde(default)]
    pub default_config: WidgetConfig,
}

impl WidgetDefinition {
    pub fn new(id: &str, widget_type: WidgetType, icon: &str, size_config: SizeConfig) -> Self {
        Self {
            id: id.to_string(),
            widget_type,
            title_key: format!("dashboard.widgets.{id}.title"),
            description_key: format!("dashboard.widgets.{id}.description"),
            icon: icon.to_string(),
            allowed_roles: Role::ALL.to_vec(),
            size_config,
            default_config: WidgetConfig::new(),
        }
    }

    pub fn with_roles(mut self, roles: &[Role]) -> Self {
        self.allowed_roles = roles.to_vec();
        self
    }

    /// Use the serialized `Default` of a typed settings struct as the default config.
    pub fn with_settings<C: Serialize + Default>(mut self) -> Self {
        self.default_config = match serde_json::to_value(C::default()) {
            Ok(Value::Object(map)) => map,
            _ => WidgetConfig::new(),
        };
        self
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// Read-only widget catalog. Build it once and hand out references.
#[derive(Clone, Debug, Default)]
pub struct WidgetRegistry {
    definitions: Vec<WidgetDefinition>,
    index: HashMap<String, usize>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        for def in catalog::definitions() {
            reg.register(def);
        }
        reg
    }

    /// Add a definition. Re-registering an id replaces it in place.
    pub fn register(&mut self, definition: WidgetDefinition) {
        if let Some(&idx) = self.index.get(&definition.id) {
            self.definitions[idx] = definition;
        } else {
            self.index
                .insert(definition.id.clone(), self.definitions.len());
            self.definitions.push(definition);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get_definition(&self, id: &str) -> Option<&WidgetDefinition> {
        self.index.get(id).map(|&idx| &self.definitions[idx])
    }

    /// Definitions a role may use, in registration order.
    pub fn get_for_role(&self, role: Role) -> Vec<&WidgetDefinition> {
        self.definitions.iter().filter(|d| d.allows(role)).collect()
    }

    pub fn definitions(&self) -> &[WidgetDefinition] {
        &self.definitions
    }

    pub fn ids(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.id.clone()).collect()
    }

    pub fn default_config(&self, id: &str) -> Option<WidgetConfig> {
        self.get_definition(id).map(|d| d.default_config.clone())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Shallow merge: keys in `updates` replace keys in `base`, unknown keys survive.
pub fn merge_config(base: &WidgetConfig, updates: &WidgetConfig) -> WidgetConfig {
    let mut merged = base.clone();
    for (k, v) in updates {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

/// Parse a config map into a typed settings struct, falling back to its default.
pub fn typed_config<C: DeserializeOwned + Default>(config: &WidgetConfig) -> C {
    serde_json::from_value(Value::Object(config.clone())).unwrap_or_default()
}
