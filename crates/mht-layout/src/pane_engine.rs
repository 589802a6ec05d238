// crates/mht-layout/src/pane_engine.rs

//! Taffy-based pane layout for guideline screens
//!
//! Places an optional list pane, the main content pane and an optional detail
//! pane in a single flex row. On phones, portrait tablets or when a call site
//! disables it, only the main pane is laid out.

use glam::Vec2;
use taffy::prelude::*;
use tracing::debug;

use crate::device::{device_info, DeviceClass, ScreenMetrics};
use crate::multipane::should_use_multi_pane;
use crate::responsive;

/// Base spacing unit before device scaling.
pub const BASE_SPACING: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneFrame {
    pub position: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneMode {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneConfig {
    pub left_width: f32,
    pub right_width: f32,
    pub has_left: bool,
    pub has_right: bool,
    pub enable_multi_pane: bool,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            left_width: 300.0,
            right_width: 300.0,
            has_left: true,
            has_right: false,
            enable_multi_pane: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneLayout {
    pub class: DeviceClass,
    pub mode: PaneMode,
    pub left: Option<PaneFrame>,
    pub main: PaneFrame,
    pub right: Option<PaneFrame>,
    /// Horizontal padding applied inside the main pane.
    pub main_padding: f32,
    /// Usable width inside the main pane after padding and the readable cap.
    pub content_width: f32,
}

pub struct PaneLayoutEngine {
    taffy: TaffyTree<()>,
}

impl PaneLayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
        }
    }

    pub fn compute(
        &mut self,
        metrics: ScreenMetrics,
        config: &PaneConfig,
    ) -> Result<PaneLayout, taffy::TaffyError> {
        // Fresh tree per pass; pane trees are tiny.
        self.taffy = TaffyTree::new();

        let device = device_info(metrics);
        let spacing = responsive::spacing(device.class, BASE_SPACING);
        let multi = config.enable_multi_pane
            && should_use_multi_pane(device.class, device.is_landscape())
            && (config.has_left || config.has_right);

        let mut children = Vec::with_capacity(3);
        let left = if multi && config.has_left {
            let node = self.taffy.new_leaf(side_pane_style(config.left_width))?;
            children.push(node);
            Some(node)
        } else {
            None
        };

        let main = self.taffy.new_leaf(Style {
            flex_grow: 1.0,
            padding: Rect {
                left: LengthPercentage::Length(spacing),
                right: LengthPercentage::Length(spacing),
                top: LengthPercentage::Length(0.0),
                bottom: LengthPercentage::Length(0.0),
            },
            ..Default::default()
        })?;
        children.push(main);

        let right = if multi && config.has_right {
            let node = self.taffy.new_leaf(side_pane_style(config.right_width))?;
            children.push(node);
            Some(node)
        } else {
            None
        };

        let root = self.taffy.new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                size: Size {
                    width: Dimension::Length(metrics.width),
                    height: Dimension::Length(metrics.height),
                },
                ..Default::default()
            },
            &children,
        )?;

        self.taffy.compute_layout(
            root,
            Size {
                width: AvailableSpace::Definite(metrics.width),
                height: AvailableSpace::Definite(metrics.height),
            },
        )?;

        let main_frame = self.frame(main)?;
        let inner_width = (main_frame.size.x - 2.0 * spacing).max(0.0);
        let layout = PaneLayout {
            class: device.class,
            mode: if multi { PaneMode::Multi } else { PaneMode::Single },
            left: left.map(|node| self.frame(node)).transpose()?,
            main: main_frame,
            right: right.map(|node| self.frame(node)).transpose()?,
            main_padding: spacing,
            content_width: responsive::content_max_width(device.class).apply(inner_width),
        };

        debug!(
            "Pane layout for {}x{}: {:?} main={:?}",
            metrics.width, metrics.height, layout.mode, layout.main
        );
        Ok(layout)
    }

    fn frame(&self, node: NodeId) -> Result<PaneFrame, taffy::TaffyError> {
        let layout = self.taffy.layout(node)?;
        Ok(PaneFrame {
            position: Vec2::new(layout.location.x, layout.location.y),
            size: Vec2::new(layout.size.width, layout.size.height),
        })
    }
}

impl Default for PaneLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn side_pane_style(width: f32) -> Style {
    Style {
        flex_shrink: 0.0,
        size: Size {
            width: Dimension::Length(width),
            height: Dimension::Auto,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_single_pane() {
        let mut engine = PaneLayoutEngine::new();
        let layout = engine.compute(ScreenMetrics::new(390.0, 844.0), &PaneConfig::default()).unwrap();

        assert_eq!(layout.mode, PaneMode::Single);
        assert!(layout.left.is_none());
        assert_eq!(layout.main.position, Vec2::ZERO);
        assert_eq!(layout.main.size, Vec2::new(390.0, 844.0));
        assert_eq!(layout.main_padding, 16.0);
        assert_eq!(layout.content_width, 358.0);
    }

    #[test]
    fn test_landscape_tablet_three_panes() {
        let mut engine = PaneLayoutEngine::new();
        let config = PaneConfig {
            has_right: true,
            ..PaneConfig::default()
        };
        let layout = engine.compute(ScreenMetrics::new(1280.0, 800.0), &config).unwrap();

        assert_eq!(layout.mode, PaneMode::Multi);
        let left = layout.left.unwrap();
        let right = layout.right.unwrap();
        assert_eq!(left.position, Vec2::ZERO);
        assert_eq!(left.size, Vec2::new(300.0, 800.0));
        assert_eq!(layout.main.position, Vec2::new(300.0, 0.0));
        assert_eq!(layout.main.size, Vec2::new(680.0, 800.0));
        assert_eq!(right.position, Vec2::new(980.0, 0.0));
        assert_eq!(right.size.x, 300.0);
    }

    #[test]
    fn test_portrait_tablet_single_pane() {
        let mut engine = PaneLayoutEngine::new();
        let layout = engine.compute(ScreenMetrics::new(834.0, 1194.0), &PaneConfig::default()).unwrap();
        assert_eq!(layout.mode, PaneMode::Single);
        assert_eq!(layout.class, DeviceClass::SmallTablet);
        assert_eq!(layout.main.size.x, 834.0);
    }

    #[test]
    fn test_override_and_missing_panes() {
        let mut engine = PaneLayoutEngine::new();
        let metrics = ScreenMetrics::new(1366.0, 1024.0);

        let disabled = PaneConfig {
            enable_multi_pane: false,
            ..PaneConfig::default()
        };
        assert_eq!(engine.compute(metrics, &disabled).unwrap().mode, PaneMode::Single);

        let no_panes = PaneConfig {
            has_left: false,
            has_right: false,
            ..PaneConfig::default()
        };
        let layout = engine.compute(metrics, &no_panes).unwrap();
        assert_eq!(layout.mode, PaneMode::Single);
        assert_eq!(layout.main.size.x, 1366.0);
        // large tablets cap the readable width
        assert_eq!(layout.content_width, 900.0);
    }
}
