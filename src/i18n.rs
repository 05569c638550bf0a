use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Resolves translation keys. A missing key renders as the key itself.
pub trait Translator: Send + Sync {
    fn t(&self, key: &str) -> String;
}

/// Translator with no catalog; every key echoes back.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyEcho;

impl Translator for KeyEcho {
    fn t(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Flat `dotted.key -> text` catalog.
#[derive(Debug, Default, Clone)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, text: &str) {
        self.entries.insert(key.to_string(), text.to_string());
    }

    /// Load a nested JSON resource file, flattening objects into dotted keys.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("parse translation catalog")?;
        let mut translator = Self::default();
        flatten(&value, String::new(), &mut translator.entries);
        Ok(translator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(value: &Value, prefix: String, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(v, key, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix, other.to_string());
        }
    }
}

impl Translator for MapTranslator {
    fn t(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, "missing translation");
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_echoes() {
        let t = MapTranslator::new();
        assert_eq!(t.t("dashboard.unknown"), "dashboard.unknown");
        assert_eq!(KeyEcho.t("x.y"), "x.y");
    }

    #[test]
    fn nested_catalog_is_flattened() {
        let t = MapTranslator::from_json(
            r#"{"dashboard": {"widgets": {"total-revenue": {"title": "Total Revenue"}}, "count": 3}}"#,
        )
        .expect("catalog");
        assert_eq!(t.len(), 2);
        assert_eq!(t.t("dashboard.widgets.total-revenue.title"), "Total Revenue");
        assert_eq!(t.t("dashboard.count"), "3");
    }
}
