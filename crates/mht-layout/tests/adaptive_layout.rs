// crates/mht-layout/tests/adaptive_layout.rs
use mht_layout::{
    classify, effective_multi_pane, grid_columns, pack_into_rows, should_use_multi_pane, DeviceClass,
    LayoutController, MetricsWatcher, PaneConfig, PaneLayoutEngine, PaneMode, ScreenMetrics,
};

fn sample_metrics() -> Vec<ScreenMetrics> {
    let sides = [320.0, 599.0, 600.0, 768.0, 899.0, 900.0, 1024.0, 1366.0];
    let mut metrics = Vec::new();
    for &width in &sides {
        for &height in &sides {
            metrics.push(ScreenMetrics::new(width, height));
        }
    }
    metrics
}

#[test]
fn test_phone_is_never_multi_pane() {
    for metrics in sample_metrics() {
        if classify(metrics) == DeviceClass::Phone {
            assert!(!should_use_multi_pane(DeviceClass::Phone, metrics.is_landscape()));
            assert!(!effective_multi_pane(true, metrics));
        }
    }
}

#[test]
fn test_pane_engine_agrees_with_decision() {
    let mut engine = PaneLayoutEngine::new();
    let config = PaneConfig {
        has_right: true,
        ..PaneConfig::default()
    };

    for metrics in sample_metrics() {
        let layout = engine.compute(metrics, &config).unwrap();
        let expected = if effective_multi_pane(true, metrics) { PaneMode::Multi } else { PaneMode::Single };
        assert_eq!(layout.mode, expected, "{metrics:?}");

        let total: f32 = layout.left.map_or(0.0, |frame| frame.size.x)
            + layout.main.size.x
            + layout.right.map_or(0.0, |frame| frame.size.x);
        if layout.mode == PaneMode::Single {
            assert_eq!(total, metrics.width, "{metrics:?}");
        }
    }
}

#[test]
fn test_controller_drives_grid_columns() {
    let watcher = MetricsWatcher::new(ScreenMetrics::new(390.0, 844.0));
    let controller = LayoutController::attach(&watcher, true);
    let items = ["a", "b", "c", "d", "e"];

    assert_eq!(pack_into_rows(items, controller.state().columns).len(), 5);

    watcher.update(ScreenMetrics::new(1366.0, 1024.0));
    let columns = controller.state().columns;
    assert_eq!(columns, grid_columns(DeviceClass::LargeTablet));
    let rows = pack_into_rows(items, columns);
    assert_eq!(rows.len(), 2);
    assert!(rows[1].cells[2].is_placeholder());
}
