use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};
use dashboard_layout::dashboard::config::{DashboardLayout, GridConfig, PositionUpdate};
use dashboard_layout::dashboard::reducer::{reduce, DashboardAction, DashboardState, ReduceContext};
use dashboard_layout::dashboard::WidgetRegistry;
use dashboard_layout::ids::SequentialIds;

fn bench_reorder(c: &mut Criterion) {
    let registry = WidgetRegistry::with_defaults();
    let ids = SequentialIds::new("b");
    let grid = GridConfig::default();
    let ctx = ReduceContext {
        registry: &registry,
        ids: &ids,
        grid,
        now: Utc::now(),
    };
    let mut state = DashboardState::new(DashboardLayout::starter(&grid, &registry, &ids, Utc::now()));
    let widget_ids = registry.ids();
    for i in 0..200 {
        let action = DashboardAction::AddWidget {
            widget_id: widget_ids[i % widget_ids.len()].clone(),
            position: Some(PositionUpdate::sized(3, 2)),
        };
        state = reduce(&state, &action, &ctx);
    }
    let first = state.current_layout.widgets[0].instance_id.clone();
    let last = state
        .current_layout
        .widgets
        .last()
        .map(|w| w.instance_id.clone())
        .unwrap_or_default();
    let action = DashboardAction::ReorderWidgets {
        active_id: last,
        over_id: first,
    };
    c.bench_function("reorder_208_widgets", |b| {
        b.iter(|| reduce(&state, &action, &ctx))
    });
}

criterion_group!(benches, bench_reorder);
criterion_main!(benches);
