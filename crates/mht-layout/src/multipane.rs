// crates/mht-layout/src/multipane.rs
use crate::device::{device_info, DeviceClass, ScreenMetrics};

/// Side-by-side panes only on tablets held in landscape.
pub fn should_use_multi_pane(class: DeviceClass, is_landscape: bool) -> bool {
    class != DeviceClass::Phone && is_landscape
}

/// Policy combined with a per-call-site override.
pub fn effective_multi_pane(enabled: bool, metrics: ScreenMetrics) -> bool {
    let info = device_info(metrics);
    enabled && should_use_multi_pane(info.class, info.is_landscape())
}
