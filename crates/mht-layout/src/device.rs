// crates/mht-layout/src/device.rs
use glam::Vec2;

/// Short side at or above which a screen counts as a tablet.
pub const SMALL_TABLET_MIN: f32 = 600.0;
/// Short side at or above which a tablet counts as large.
pub const LARGE_TABLET_MIN: f32 = 900.0;

/// Window dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
}

impl ScreenMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn short_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_landscape() {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceClass {
    Phone,
    SmallTablet,
    LargeTablet,
}

impl DeviceClass {
    pub fn is_tablet(&self) -> bool {
        !matches!(self, DeviceClass::Phone)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeviceClass::Phone => "phone",
            DeviceClass::SmallTablet => "small-tablet",
            DeviceClass::LargeTablet => "large-tablet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Classify by the smaller of width and height, so rotating a device never
/// changes its class.
pub fn classify(metrics: ScreenMetrics) -> DeviceClass {
    let short_side = metrics.short_side();
    if short_side >= LARGE_TABLET_MIN {
        DeviceClass::LargeTablet
    } else if short_side >= SMALL_TABLET_MIN {
        DeviceClass::SmallTablet
    } else {
        DeviceClass::Phone
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceInfo {
    pub class: DeviceClass,
    pub orientation: Orientation,
    pub metrics: ScreenMetrics,
}

impl DeviceInfo {
    pub fn is_tablet(&self) -> bool {
        self.class.is_tablet()
    }

    pub fn is_large_tablet(&self) -> bool {
        self.class == DeviceClass::LargeTablet
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

pub fn device_info(metrics: ScreenMetrics) -> DeviceInfo {
    DeviceInfo {
        class: classify(metrics),
        orientation: metrics.orientation(),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(classify(ScreenMetrics::new(390.0, 844.0)), DeviceClass::Phone);
        assert_eq!(classify(ScreenMetrics::new(599.9, 1000.0)), DeviceClass::Phone);
        assert_eq!(classify(ScreenMetrics::new(600.0, 1000.0)), DeviceClass::SmallTablet);
        assert_eq!(classify(ScreenMetrics::new(1180.0, 820.0)), DeviceClass::SmallTablet);
        assert_eq!(classify(ScreenMetrics::new(900.0, 1200.0)), DeviceClass::LargeTablet);
        assert_eq!(classify(ScreenMetrics::new(1366.0, 1024.0)), DeviceClass::LargeTablet);
    }

    #[test]
    fn test_rotation_keeps_class() {
        let portrait = ScreenMetrics::new(820.0, 1180.0);
        let landscape = ScreenMetrics::new(1180.0, 820.0);
        assert_eq!(classify(portrait), classify(landscape));
        assert_eq!(portrait.orientation(), Orientation::Portrait);
        assert_eq!(landscape.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_square_is_portrait() {
        assert!(!ScreenMetrics::new(700.0, 700.0).is_landscape());
    }

    #[test]
    fn test_classification_is_monotonic_in_short_side() {
        let mut previous = DeviceClass::Phone;
        let mut short_side = 0.0;
        while short_side <= 1400.0 {
            let class = classify(ScreenMetrics::new(short_side, 2000.0));
            assert!(class >= previous, "{} moved back to {:?}", short_side, class);
            previous = class;
            short_side += 12.5;
        }
        assert_eq!(previous, DeviceClass::LargeTablet);
    }

    #[test]
    fn test_device_info() {
        let info = device_info(ScreenMetrics::new(1024.0, 768.0));
        assert!(info.is_tablet());
        assert!(!info.is_large_tablet());
        assert!(info.is_landscape());
    }
}
