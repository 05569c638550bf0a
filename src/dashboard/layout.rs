use crate::dashboard::config::{UserWidgetInstance, WidgetPosition, GRID_COLUMNS};
use chrono::{DateTime, Utc};

/// Last row a widget may start on.
pub const MAX_ROW: u32 = 10_000;
/// Tallest a single widget may be, in rows.
pub const MAX_HEIGHT: u32 = 100;

/// Pull a position back inside the 12 column grid. Width is clamped to
/// `1..=12` first, then `x` is shifted left until `x + width <= 12`.
/// `y` is capped at [`MAX_ROW`] and height kept within `1..=MAX_HEIGHT`.
pub fn clamp_to_grid(position: WidgetPosition) -> WidgetPosition {
    let width = position.width.clamp(1, GRID_COLUMNS);
    WidgetPosition {
        x: position.x.min(GRID_COLUMNS - width),
        y: position.y.min(MAX_ROW),
        width,
        height: position.height.clamp(1, MAX_HEIGHT),
    }
}

/// First row below every widget, i.e. where a new widget gets stacked.
pub fn next_free_row(widgets: &[UserWidgetInstance]) -> u32 {
    widgets
        .iter()
        .map(|w| w.position.bottom())
        .max()
        .unwrap_or(0)
}

/// Move the item at `from` so it ends up at index `to`, shifting the rest.
pub fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Stack visible widgets top to bottom in list order. Hidden widgets and
/// every `x` are left alone.
pub fn restack_visible(widgets: &mut [UserWidgetInstance], now: DateTime<Utc>) {
    let mut y = 0;
    for widget in widgets.iter_mut().filter(|w| w.visible) {
        if widget.position.y != y {
            widget.position.y = y;
            widget.last_updated = now;
        }
        y = y.saturating_add(widget.position.height);
    }
}

/// Widgets in paint order: by row, then column. Ties keep list order.
pub fn sort_by_position(widgets: &[UserWidgetInstance]) -> Vec<&UserWidgetInstance> {
    let mut sorted: Vec<&UserWidgetInstance> = widgets.iter().collect();
    sorted.sort_by_key(|w| (w.position.y, w.position.x));
    sorted
}

/// Number of widgets in the stats band.
pub const STATS_BAND: usize = 4;
/// Number of widgets in the charts band.
pub const CHARTS_BAND: usize = 2;

/// The three visual rows the grid paints. This is purely a rendering split
/// of the sorted sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands<'a, T> {
    pub stats: &'a [T],
    pub charts: &'a [T],
    pub bottom: &'a [T],
}

impl<'a, T> Bands<'a, T> {
    pub fn split(sorted: &'a [T]) -> Self {
        let stats_end = sorted.len().min(STATS_BAND);
        let charts_end = sorted.len().min(STATS_BAND + CHARTS_BAND);
        Self {
            stats: &sorted[..stats_end],
            charts: &sorted[stats_end..charts_end],
            bottom: &sorted[charts_end..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::widgets::WidgetConfig;

    fn widget(id: &str, y: u32, height: u32) -> UserWidgetInstance {
        UserWidgetInstance::new(
            id.into(),
            "total-orders",
            WidgetPosition::new(0, y, 3, height),
            WidgetConfig::new(),
            Utc::now(),
        )
    }

    #[test]
    fn clamps_out_of_bounds() {
        let pos = clamp_to_grid(WidgetPosition::new(9, 2, 6, 0));
        assert_eq!(pos, WidgetPosition::new(6, 2, 6, 1));
        let pos = clamp_to_grid(WidgetPosition::new(0, 0, 40, 2));
        assert_eq!(pos, WidgetPosition::new(0, 0, 12, 2));
        let pos = clamp_to_grid(WidgetPosition::new(11, 0, 0, 2));
        assert_eq!(pos, WidgetPosition::new(11, 0, 1, 2));
    }

    #[test]
    fn clamps_runaway_rows() {
        let pos = clamp_to_grid(WidgetPosition::new(0, u32::MAX, 3, u32::MAX));
        assert_eq!(pos, WidgetPosition::new(0, MAX_ROW, 3, MAX_HEIGHT));
    }

    #[test]
    fn row_sums_saturate() {
        let mut widgets = vec![
            widget("a", 0, u32::MAX),
            widget("b", 0, u32::MAX),
            widget("c", 0, 1),
        ];
        restack_visible(&mut widgets, Utc::now());
        assert_eq!(widgets[1].position.y, u32::MAX);
        assert_eq!(widgets[2].position.y, u32::MAX);
        assert_eq!(next_free_row(&widgets), u32::MAX);
    }

    #[test]
    fn splice_moves_not_swaps() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        splice_move(&mut items, 3, 0);
        assert_eq!(items, vec!['d', 'a', 'b', 'c', 'e']);
        splice_move(&mut items, 0, 4);
        assert_eq!(items, vec!['a', 'b', 'c', 'e', 'd']);
    }

    #[test]
    fn splice_ignores_out_of_range() {
        let mut items = vec![1, 2, 3];
        splice_move(&mut items, 5, 0);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn restack_skips_hidden() {
        let mut widgets = vec![widget("a", 5, 2), widget("b", 0, 3), widget("c", 9, 1)];
        widgets[1].visible = false;
        restack_visible(&mut widgets, Utc::now());
        assert_eq!(widgets[0].position.y, 0);
        assert_eq!(widgets[1].position.y, 0);
        assert_eq!(widgets[2].position.y, 2);
    }

    #[test]
    fn next_free_row_is_max_bottom() {
        assert_eq!(next_free_row(&[]), 0);
        let widgets = vec![widget("a", 0, 2), widget("b", 4, 3), widget("c", 1, 1)];
        assert_eq!(next_free_row(&widgets), 7);
    }

    #[test]
    fn bands_split_sorted_sequence() {
        let items: Vec<u8> = (0..9).collect();
        let bands = Bands::split(&items);
        assert_eq!(bands.stats, &[0, 1, 2, 3]);
        assert_eq!(bands.charts, &[4, 5]);
        assert_eq!(bands.bottom, &[6, 7, 8]);

        let few = [1u8, 2, 3];
        let bands = Bands::split(&few);
        assert_eq!(bands.stats.len(), 3);
        assert!(bands.charts.is_empty());
        assert!(bands.bottom.is_empty());
    }
}
