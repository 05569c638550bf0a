//! Turns pointer and keyboard gestures into widget reorders.
//!
//! A gesture is a sequence of discrete events (press, move, release, key).
//! While it runs the only store field touched is the dragged-widget mirror;
//! the layout changes once, on a drop over another widget.

use crate::dashboard::render::resolve_widget;
use crate::dashboard::selectors::visible_widgets;
use crate::dashboard::store::DashboardStore;
use crate::i18n::Translator;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKey {
    Space,
    Enter,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Pressed {
        instance_id: String,
        origin: Point,
    },
    Dragging {
        active_id: String,
        over_id: Option<String>,
        source: DragSource,
    },
}

/// Something screen readers should hear, plus what happened.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Started {
        active_id: String,
        announcement: String,
    },
    Over {
        active_id: String,
        over_id: Option<String>,
        announcement: String,
    },
    Dropped {
        active_id: String,
        over_id: Option<String>,
        moved: bool,
        announcement: String,
    },
    Cancelled {
        active_id: String,
        announcement: String,
    },
}

impl DragEvent {
    pub fn announcement(&self) -> &str {
        match self {
            DragEvent::Started { announcement, .. }
            | DragEvent::Over { announcement, .. }
            | DragEvent::Dropped { announcement, .. }
            | DragEvent::Cancelled { announcement, .. } => announcement,
        }
    }
}

pub struct DragController {
    activation_distance: f32,
    translator: Box<dyn Translator>,
    gesture: Gesture,
}

impl DragController {
    pub fn new(activation_distance: f32, translator: Box<dyn Translator>) -> Self {
        Self {
            activation_distance,
            translator,
            gesture: Gesture::Idle,
        }
    }

    pub fn from_settings(settings: &Settings, translator: Box<dyn Translator>) -> Self {
        Self::new(settings.drag_activation_distance(), translator)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.gesture {
            Gesture::Dragging { active_id, .. } => Some(active_id),
            _ => None,
        }
    }

    pub fn over_id(&self) -> Option<&str> {
        match &self.gesture {
            Gesture::Dragging { over_id, .. } => over_id.as_deref(),
            _ => None,
        }
    }

    /// Press on a widget. Nothing moves until the pointer travels far enough.
    pub fn pointer_down(&mut self, store: &DashboardStore, instance_id: &str, at: Point) {
        if self.gesture != Gesture::Idle {
            return;
        }
        if position_of(store, instance_id).is_none() {
            return;
        }
        self.gesture = Gesture::Pressed {
            instance_id: instance_id.to_string(),
            origin: at,
        };
    }

    pub fn pointer_move(
        &mut self,
        store: &mut DashboardStore,
        at: Point,
        over: Option<&str>,
    ) -> Option<DragEvent> {
        let over = valid_target(store, over);
        match &mut self.gesture {
            Gesture::Idle => None,
            Gesture::Pressed {
                instance_id,
                origin,
            } => {
                if origin.distance(at) < self.activation_distance {
                    return None;
                }
                let active_id = instance_id.clone();
                Some(self.start(store, active_id, over, DragSource::Pointer))
            }
            Gesture::Dragging {
                active_id, over_id, ..
            } => {
                if *over_id == over {
                    return None;
                }
                *over_id = over.clone();
                let active_id = active_id.clone();
                Some(self.over_event(store, active_id, over))
            }
        }
    }

    /// Release. A press that never became a drag is a click and changes nothing.
    pub fn pointer_up(&mut self, store: &mut DashboardStore, over: Option<&str>) -> Option<DragEvent> {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Pressed { .. } => None,
            Gesture::Dragging { active_id, .. } => {
                let over = valid_target(store, over);
                Some(self.drop(store, active_id, over))
            }
        }
    }

    pub fn key_down(
        &mut self,
        store: &mut DashboardStore,
        focused_id: &str,
        key: DragKey,
    ) -> Option<DragEvent> {
        match (&self.gesture, key) {
            (Gesture::Idle, DragKey::Space | DragKey::Enter) => {
                position_of(store, focused_id)?;
                let active_id = focused_id.to_string();
                let over = Some(active_id.clone());
                Some(self.start(store, active_id, over, DragSource::Keyboard))
            }
            (Gesture::Idle, _) => None,
            (_, DragKey::Escape) => self.cancel(store),
            (Gesture::Pressed { .. }, _) => None,
            (
                Gesture::Dragging {
                    source: DragSource::Keyboard,
                    ..
                },
                DragKey::Space | DragKey::Enter,
            ) => match std::mem::replace(&mut self.gesture, Gesture::Idle) {
                Gesture::Dragging {
                    active_id, over_id, ..
                } => Some(self.drop(store, active_id, over_id)),
                _ => None,
            },
            (
                Gesture::Dragging {
                    source: DragSource::Keyboard,
                    active_id,
                    over_id,
                },
                arrow,
            ) => {
                let step: isize = match arrow {
                    DragKey::ArrowUp | DragKey::ArrowLeft => -1,
                    DragKey::ArrowDown | DragKey::ArrowRight => 1,
                    _ => return None,
                };
                let order = visible_ids(store);
                let current = over_id
                    .as_deref()
                    .and_then(|id| order.iter().position(|o| o == id))
                    .or_else(|| order.iter().position(|o| o == active_id))?;
                let target = current
                    .checked_add_signed(step)
                    .filter(|&idx| idx < order.len())?;
                let next_over = Some(order[target].clone());
                let active_id = active_id.clone();
                if let Gesture::Dragging { over_id, .. } = &mut self.gesture {
                    *over_id = next_over.clone();
                }
                Some(self.over_event(store, active_id, next_over))
            }
            (Gesture::Dragging { .. }, _) => None,
        }
    }

    /// Abort any gesture. The layout is never touched.
    pub fn cancel(&mut self, store: &mut DashboardStore) -> Option<DragEvent> {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Pressed { .. } => None,
            Gesture::Dragging { active_id, .. } => {
                store.set_dragged_widget(None);
                let title = self.title(store, &active_id);
                let announcement = format!(
                    "Dragging was cancelled. {title} was returned to {}.",
                    position_text(position_of(store, &active_id))
                );
                tracing::debug!(active_id = %active_id, "widget drag cancelled");
                Some(DragEvent::Cancelled {
                    active_id,
                    announcement,
                })
            }
        }
    }

    fn start(
        &mut self,
        store: &mut DashboardStore,
        active_id: String,
        over_id: Option<String>,
        source: DragSource,
    ) -> DragEvent {
        store.set_dragged_widget(Some(&active_id));
        let title = self.title(store, &active_id);
        let announcement = format!(
            "Picked up {title}. It is in {}.",
            position_text(position_of(store, &active_id))
        );
        self.gesture = Gesture::Dragging {
            active_id: active_id.clone(),
            over_id,
            source,
        };
        DragEvent::Started {
            active_id,
            announcement,
        }
    }

    fn over_event(
        &self,
        store: &DashboardStore,
        active_id: String,
        over_id: Option<String>,
    ) -> DragEvent {
        let title = self.title(store, &active_id);
        let announcement = match &over_id {
            Some(over) => format!(
                "{title} was moved into {}.",
                position_text(position_of(store, over))
            ),
            None => format!("{title} is no longer over a drop target."),
        };
        DragEvent::Over {
            active_id,
            over_id,
            announcement,
        }
    }

    fn drop(
        &self,
        store: &mut DashboardStore,
        active_id: String,
        over_id: Option<String>,
    ) -> DragEvent {
        let moved = match over_id.as_deref() {
            Some(over) if over != active_id => {
                store.reorder_widgets(&active_id, over);
                true
            }
            _ => false,
        };
        store.set_dragged_widget(None);
        let title = self.title(store, &active_id);
        let position = position_text(position_of(store, &active_id));
        let announcement = if moved {
            format!("{title} was dropped. It is now in {position}.")
        } else {
            format!("{title} was dropped. It stayed in {position}.")
        };
        tracing::debug!(active_id = %active_id, over_id = ?over_id, moved, "widget dropped");
        DragEvent::Dropped {
            active_id,
            over_id,
            moved,
            announcement,
        }
    }

    fn title(&self, store: &DashboardStore, instance_id: &str) -> String {
        match store.current_layout().widget(instance_id) {
            Some(instance) => resolve_widget(instance, store.registry(), self.translator.as_ref())
                .title()
                .to_string(),
            None => instance_id.to_string(),
        }
    }
}

fn visible_ids(store: &DashboardStore) -> Vec<String> {
    visible_widgets(store.state())
        .iter()
        .map(|w| w.instance_id.clone())
        .collect()
}

/// 1-based position and total within the visible sequence.
fn position_of(store: &DashboardStore, instance_id: &str) -> Option<(usize, usize)> {
    let order = visible_ids(store);
    order
        .iter()
        .position(|id| id == instance_id)
        .map(|idx| (idx + 1, order.len()))
}

fn valid_target(store: &DashboardStore, over: Option<&str>) -> Option<String> {
    over.filter(|id| position_of(store, id).is_some())
        .map(str::to_string)
}

fn position_text(position: Option<(usize, usize)>) -> String {
    match position {
        Some((n, m)) => format!("position {n} of {m}"),
        None => "an unknown position".to_string(),
    }
}
