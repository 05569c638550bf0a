use crate::dashboard::config::UserWidgetInstance;
use crate::dashboard::widgets::{merge_config, WidgetConfig, WidgetDefinition, WidgetRegistry};
use crate::i18n::Translator;

/// Translation key of the placeholder shown for unknown widgets.
pub const NOT_FOUND_KEY: &str = "dashboard.widgetNotFound";

/// What the grid should paint for one instance.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView<'a> {
    Resolved {
        instance: &'a UserWidgetInstance,
        definition: &'a WidgetDefinition,
        title: String,
        description: String,
        /// Definition defaults with the instance overrides on top.
        config: WidgetConfig,
    },
    NotFound {
        instance: &'a UserWidgetInstance,
        message: String,
    },
}

impl<'a> WidgetView<'a> {
    pub fn instance(&self) -> &'a UserWidgetInstance {
        match self {
            WidgetView::Resolved { instance, .. } | WidgetView::NotFound { instance, .. } => {
                instance
            }
        }
    }

    pub fn title(&self) -> &str {
        match self {
            WidgetView::Resolved { title, .. } => title,
            WidgetView::NotFound { message, .. } => message,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WidgetView::Resolved { .. })
    }
}

/// Resolve an instance against the registry. Never fails: a dangling
/// `widget_id` yields [`WidgetView::NotFound`].
pub fn resolve_widget<'a>(
    instance: &'a UserWidgetInstance,
    registry: &'a WidgetRegistry,
    translator: &dyn Translator,
) -> WidgetView<'a> {
    match registry.get_definition(&instance.widget_id) {
        Some(definition) => WidgetView::Resolved {
            instance,
            definition,
            title: translator.t(&definition.title_key),
            description: translator.t(&definition.description_key),
            config: merge_config(&definition.default_config, &instance.config),
        },
        None => {
            tracing::debug!(
                widget_id = %instance.widget_id,
                instance_id = %instance.instance_id,
                "widget definition not found"
            );
            WidgetView::NotFound {
                instance,
                message: translator.t(NOT_FOUND_KEY),
            }
        }
    }
}

pub fn resolve_all<'a>(
    instances: &[&'a UserWidgetInstance],
    registry: &'a WidgetRegistry,
    translator: &dyn Translator,
) -> Vec<WidgetView<'a>> {
    instances
        .iter()
        .map(|instance| resolve_widget(instance, registry, translator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::config::WidgetPosition;
    use crate::i18n::{KeyEcho, MapTranslator};
    use chrono::Utc;
    use serde_json::json;

    fn instance(widget_id: &str) -> UserWidgetInstance {
        let mut config = WidgetConfig::new();
        config.insert("pageSize".into(), json!(20));
        UserWidgetInstance::new(
            "i-1".into(),
            widget_id,
            WidgetPosition::new(0, 0, 6, 2),
            config,
            Utc::now(),
        )
    }

    #[test]
    fn resolves_known_widget_with_merged_config() {
        let registry = WidgetRegistry::with_defaults();
        let mut t = MapTranslator::new();
        t.insert("dashboard.widgets.recent-orders.title", "Recent Orders");
        let inst = instance("recent-orders");
        let view = resolve_widget(&inst, &registry, &t);
        assert!(view.is_resolved());
        assert_eq!(view.title(), "Recent Orders");
        match view {
            WidgetView::Resolved {
                config,
                description,
                ..
            } => {
                assert_eq!(config["pageSize"], json!(20));
                assert_eq!(description, "dashboard.widgets.recent-orders.description");
            }
            WidgetView::NotFound { .. } => panic!("expected resolved"),
        }
    }

    #[test]
    fn unknown_widget_renders_placeholder() {
        let registry = WidgetRegistry::with_defaults();
        let inst = instance("removed-widget");
        let view = resolve_widget(&inst, &registry, &KeyEcho);
        assert!(!view.is_resolved());
        assert_eq!(view.title(), NOT_FOUND_KEY);
        assert_eq!(view.instance().instance_id, "i-1");
    }
}
