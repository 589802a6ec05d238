// crates/mht-layout/src/responsive.rs
use crate::device::DeviceClass;

/// One value per device class. All three branches are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveValues<T> {
    pub phone: T,
    pub small_tablet: T,
    pub large_tablet: T,
}

impl<T> ResponsiveValues<T> {
    pub const fn new(phone: T, small_tablet: T, large_tablet: T) -> Self {
        Self {
            phone,
            small_tablet,
            large_tablet,
        }
    }

    pub fn resolve(self, class: DeviceClass) -> T {
        match class {
            DeviceClass::Phone => self.phone,
            DeviceClass::SmallTablet => self.small_tablet,
            DeviceClass::LargeTablet => self.large_tablet,
        }
    }
}

pub fn resolve<T>(class: DeviceClass, values: ResponsiveValues<T>) -> T {
    values.resolve(class)
}

const SPACING_SCALE: ResponsiveValues<f32> = ResponsiveValues::new(1.0, 1.2, 1.4);
const FONT_SCALE: ResponsiveValues<f32> = ResponsiveValues::new(1.0, 1.1, 1.2);
// Platform accessibility minimums for touchable controls.
const TOUCH_TARGET: ResponsiveValues<f32> = ResponsiveValues::new(44.0, 48.0, 52.0);
const GRID_COLUMNS: ResponsiveValues<usize> = ResponsiveValues::new(1, 2, 3);

pub fn spacing(class: DeviceClass, base: f32) -> f32 {
    base * resolve(class, SPACING_SCALE)
}

pub fn font_size(class: DeviceClass, base: f32) -> f32 {
    base * resolve(class, FONT_SCALE)
}

pub fn touch_target_size(class: DeviceClass) -> f32 {
    resolve(class, TOUCH_TARGET)
}

pub fn grid_columns(class: DeviceClass) -> usize {
    resolve(class, GRID_COLUMNS)
}

/// Readable width cap for body content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentWidth {
    Full,
    Max(f32),
}

impl ContentWidth {
    pub fn apply(&self, available: f32) -> f32 {
        match self {
            ContentWidth::Full => available,
            ContentWidth::Max(max) => available.min(*max),
        }
    }
}

pub fn content_max_width(class: DeviceClass) -> ContentWidth {
    resolve(
        class,
        ResponsiveValues::new(ContentWidth::Full, ContentWidth::Max(720.0), ContentWidth::Max(900.0)),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    H1,
    H2,
    H3,
    H4,
    Body,
    Caption,
}

impl TextVariant {
    pub fn base_size(&self) -> f32 {
        match self {
            TextVariant::H1 => 32.0,
            TextVariant::H2 => 24.0,
            TextVariant::H3 => 20.0,
            TextVariant::H4 => 18.0,
            TextVariant::Body => 16.0,
            TextVariant::Caption => 14.0,
        }
    }

    pub fn size_for(&self, class: DeviceClass) -> f32 {
        font_size(class, self.base_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [DeviceClass; 3] = [DeviceClass::Phone, DeviceClass::SmallTablet, DeviceClass::LargeTablet];

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_resolve_picks_branch() {
        let values = ResponsiveValues::new("p", "s", "l");
        let resolved: Vec<_> = CLASSES.iter().map(|class| resolve(*class, values)).collect();
        assert_eq!(resolved, vec!["p", "s", "l"]);
    }

    #[test]
    fn test_spacing_and_font_scales() {
        let spacings: Vec<f32> = CLASSES.iter().map(|class| spacing(*class, 16.0)).collect();
        assert!(approx(spacings[0], 16.0));
        assert!(approx(spacings[1], 19.2));
        assert!(approx(spacings[2], 22.4));

        let fonts: Vec<f32> = CLASSES.iter().map(|class| font_size(*class, 20.0)).collect();
        assert!(approx(fonts[0], 20.0));
        assert!(approx(fonts[1], 22.0));
        assert!(approx(fonts[2], 24.0));
    }

    #[test]
    fn test_touch_targets_and_columns() {
        let targets: Vec<f32> = CLASSES.iter().map(|class| touch_target_size(*class)).collect();
        assert_eq!(targets, vec![44.0, 48.0, 52.0]);

        let columns: Vec<usize> = CLASSES.iter().map(|class| grid_columns(*class)).collect();
        assert_eq!(columns, vec![1, 2, 3]);
    }

    #[test]
    fn test_content_width() {
        assert_eq!(content_max_width(DeviceClass::Phone).apply(390.0), 390.0);
        assert_eq!(content_max_width(DeviceClass::SmallTablet).apply(1000.0), 720.0);
        assert_eq!(content_max_width(DeviceClass::LargeTablet).apply(600.0), 600.0);
    }

    #[test]
    fn test_text_variants() {
        assert!(approx(TextVariant::Caption.size_for(DeviceClass::LargeTablet), 16.8));
        assert!(approx(TextVariant::H1.size_for(DeviceClass::Phone), 32.0));
    }
}
