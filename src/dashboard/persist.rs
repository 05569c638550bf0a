use crate::dashboard::config::{DashboardLayout, DashboardView, LAYOUT_VERSION};
use crate::dashboard::reducer::DashboardState;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage slot the dashboard lives in.
pub const STORAGE_KEY: &str = "dashboard-config";

/// The part of [`DashboardState`] that survives a reload. Edit mode, drag
/// and sync-in-progress state never get here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDashboard {
    pub version: u32,
    pub current_layout: DashboardLayout,
    #[serde(default)]
    pub views: Vec<DashboardView>,
    #[serde(default)]
    pub active_view_id: Option<String>,
    #[serde(default)]
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl PersistedDashboard {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            version: LAYOUT_VERSION,
            current_layout: state.current_layout.clone(),
            views: state.views.clone(),
            active_view_id: state.active_view_id.clone(),
            last_synced_at: state.last_synced_at,
        }
    }

    pub fn into_state(self) -> DashboardState {
        let mut state = DashboardState::new(self.current_layout);
        state.views = self.views;
        state.active_view_id = self.active_view_id;
        state.last_synced_at = self.last_synced_at;
        state
    }

    /// Repair layouts and dangling references. Returns what was changed.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = self.current_layout.sanitize();
        for view in &mut self.views {
            for w in view.layout.sanitize() {
                warnings.push(format!("view '{}': {w}", view.name));
            }
        }
        if let Some(active) = &self.active_view_id {
            if !self.views.iter().any(|v| &v.id == active) {
                warnings.push(format!("active view '{active}' no longer exists"));
                self.active_view_id = None;
            }
        }
        let defaults = self.views.iter().filter(|v| v.is_default).count();
        if defaults > 1 {
            warnings.push(format!("{defaults} default views; keeping the first"));
            let mut seen = false;
            for view in &mut self.views {
                if view.is_default {
                    view.is_default = !seen;
                    seen = true;
                }
            }
        }
        warnings
    }
}

pub fn encode(state: &DashboardState) -> Result<String> {
    serde_json::to_string(&PersistedDashboard::from_state(state))
        .context("serialize dashboard state")
}

/// Parse a stored blob, bring it to [`LAYOUT_VERSION`] and sanitize it.
pub fn decode(blob: &str) -> Result<(PersistedDashboard, Vec<String>)> {
    let value: Value = serde_json::from_str(blob).context("parse persisted dashboard")?;
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| anyhow!("persisted dashboard has no version tag"))?;
    let version = u32::try_from(version)
        .map_err(|_| anyhow!("persisted dashboard version {version} is out of range"))?;
    let value = migrate(version, value)?;
    let mut persisted: PersistedDashboard =
        serde_json::from_value(value).context("deserialize persisted dashboard")?;
    let warnings = persisted.sanitize();
    Ok((persisted, warnings))
}

/// Walk a blob forward one version at a time until it reaches
/// [`LAYOUT_VERSION`]. Blobs from a newer build are refused.
pub fn migrate(from: u32, mut value: Value) -> Result<Value> {
    if from > LAYOUT_VERSION {
        bail!("persisted dashboard version {from} is newer than supported version {LAYOUT_VERSION}");
    }
    if from == LAYOUT_VERSION {
        return Ok(value);
    }
    let mut version = from;
    while version < LAYOUT_VERSION {
        value = upgrade(version, value)?;
        version += 1;
        tracing::info!(from = version - 1, to = version, "migrated persisted dashboard");
    }
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".into(), Value::from(LAYOUT_VERSION));
    }
    Ok(value)
}

/// One migration step from `version` to `version + 1`.
fn upgrade(version: u32, value: Value) -> Result<Value> {
    match version {
        // Pre-release blobs carried no schema changes, only a missing tag.
        0 => Ok(value),
        other => bail!("no migration registered for dashboard version {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::config::GridConfig;
    use crate::dashboard::widgets::WidgetRegistry;
    use crate::ids::SequentialIds;
    use serde_json::json;

    fn state() -> DashboardState {
        DashboardState::new(DashboardLayout::starter(
            &GridConfig::default(),
            &WidgetRegistry::with_defaults(),
            &SequentialIds::new("w"),
            Utc::now(),
        ))
    }

    #[test]
    fn encode_decode_keeps_persisted_fields_only() {
        let mut state = state();
        state.is_edit_mode = true;
        state.dragged_widget_id = Some("w-1".into());
        state.layout_backup = Some(state.current_layout.clone());
        state.last_synced_at = Some(Utc::now());

        let blob = encode(&state).expect("encode");
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert!(value.get("isEditMode").is_none());
        assert!(value.get("layoutBackup").is_none());
        assert_eq!(value["version"], json!(LAYOUT_VERSION));

        let (persisted, warnings) = decode(&blob).expect("decode");
        assert!(warnings.is_empty());
        let restored = persisted.into_state();
        assert_eq!(restored.current_layout, state.current_layout);
        assert_eq!(restored.last_synced_at, state.last_synced_at);
        assert!(!restored.is_edit_mode);
        assert!(restored.dragged_widget_id.is_none());
        assert!(restored.layout_backup.is_none());
    }

    #[test]
    fn version_zero_is_upgraded_in_place() {
        let blob = encode(&state()).unwrap();
        let mut value: Value = serde_json::from_str(&blob).unwrap();
        value["version"] = json!(0);
        let migrated = migrate(0, value).expect("migrate");
        assert_eq!(migrated["version"], json!(LAYOUT_VERSION));
    }

    #[test]
    fn newer_version_is_rejected() {
        assert!(migrate(LAYOUT_VERSION + 1, json!({})).is_err());
    }

    #[test]
    fn missing_version_is_rejected() {
        assert!(decode(r#"{"currentLayout": {"widgets": []}}"#).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"version": 1, "currentLayout": 5}"#).is_err());
    }

    #[test]
    fn dangling_active_view_is_cleared() {
        let mut persisted = PersistedDashboard::from_state(&state());
        persisted.active_view_id = Some("gone".into());
        let warnings = persisted.sanitize();
        assert_eq!(persisted.active_view_id, None);
        assert_eq!(warnings.len(), 1);
    }
}
