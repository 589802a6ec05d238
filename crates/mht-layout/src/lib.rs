// crates/mht-layout/src/lib.rs

pub mod device;
pub mod responsive;
pub mod multipane;
pub mod grid;
pub mod metrics;
pub mod controller;
pub mod pane_engine;

pub use device::*;
pub use responsive::{
    content_max_width, font_size, grid_columns, resolve, spacing, touch_target_size, ContentWidth,
    ResponsiveValues, TextVariant,
};
pub use multipane::*;
pub use grid::*;
pub use metrics::{MetricsWatcher, Subscription};
pub use controller::{LayoutController, LayoutState};
pub use pane_engine::{PaneConfig, PaneFrame, PaneLayout, PaneLayoutEngine, PaneMode};
