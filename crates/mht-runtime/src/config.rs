// crates/mht-runtime/src/config.rs
use std::path::PathBuf;

use mht_layout::{LayoutState, PaneConfig, ScreenMetrics};

use crate::bookmarks::BookmarkScope;

pub const DEFAULT_STORE_PATH: &str = "mht-guide-store.json";

/// Settings a host passes to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub store_path: PathBuf,
    pub scope: BookmarkScope,
    pub metrics: ScreenMetrics,
    pub enable_multi_pane: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            scope: BookmarkScope::Combined,
            metrics: ScreenMetrics::new(390.0, 844.0),
            enable_multi_pane: true,
        }
    }
}

impl RuntimeConfig {
    pub fn layout_state(&self) -> LayoutState {
        LayoutState::compute(self.metrics, self.enable_multi_pane)
    }

    /// Pane setup for the guidelines screen: list on the left, detail on
    /// the right.
    pub fn pane_config(&self) -> PaneConfig {
        PaneConfig {
            has_right: true,
            enable_multi_pane: self.enable_multi_pane,
            ..PaneConfig::default()
        }
    }
}
