// crates/mht-layout/src/controller.rs
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::device::{device_info, DeviceInfo, ScreenMetrics};
use crate::metrics::{MetricsWatcher, Subscription};
use crate::multipane::should_use_multi_pane;
use crate::responsive;

/// Layout decisions derived from the current screen metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub device: DeviceInfo,
    pub show_multi_pane: bool,
    pub spacing: f32,
    pub touch_target: f32,
    pub columns: usize,
}

impl LayoutState {
    pub fn compute(metrics: ScreenMetrics, enable_multi_pane: bool) -> Self {
        let device = device_info(metrics);
        Self {
            device,
            show_multi_pane: enable_multi_pane
                && should_use_multi_pane(device.class, device.is_landscape()),
            spacing: responsive::spacing(device.class, 16.0),
            touch_target: responsive::touch_target_size(device.class),
            columns: responsive::grid_columns(device.class),
        }
    }
}

/// Keeps a [`LayoutState`] in sync with a [`MetricsWatcher`] for as long as
/// the controller is alive. Dropping it releases the subscription.
pub struct LayoutController {
    enable_multi_pane: bool,
    state: Arc<Mutex<LayoutState>>,
    _subscription: Subscription,
}

impl LayoutController {
    pub fn attach(watcher: &MetricsWatcher, enable_multi_pane: bool) -> Self {
        let state = Arc::new(Mutex::new(LayoutState::compute(watcher.current(), enable_multi_pane)));

        let shared = Arc::clone(&state);
        let subscription = watcher.subscribe(move |metrics| {
            let next = LayoutState::compute(metrics, enable_multi_pane);
            debug!(
                "Layout recomputed: {} multi_pane={} columns={}",
                next.device.class.name(),
                next.show_multi_pane,
                next.columns
            );
            *shared.lock().unwrap_or_else(PoisonError::into_inner) = next;
        });

        Self {
            enable_multi_pane,
            state,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> LayoutState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn multi_pane_enabled(&self) -> bool {
        self.enable_multi_pane
    }
}
