use crate::pose::Point;

/// Smallest side the viewport is ever given, in pixels
pub const MIN_SIZE: u32 = 320;

/// Horizontal room left around the viewport
pub const MARGIN: u32 = 40;

/// Rod length as a fraction of the viewport's shorter side
pub const ROD_SCALE: f64 = 0.15;

/// Side of the square viewport that fits the available area.
///
/// Never smaller than `MIN_SIZE`, even if that means overflowing the area.
pub fn compute_size(available_width: u32, available_height: u32) -> (u32, u32) {
    let size = available_width
        .saturating_sub(MARGIN)
        .min(available_height)
        .max(MIN_SIZE);
    (size, size)
}

/// Dimensions of the drawing area and the geometry scaled to them
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub center: Point,
    /// Length of each rod
    pub rod_length: f64,
}

impl Viewport {
    pub fn from_available(available_width: u32, available_height: u32) -> Self {
        let (width, height) = compute_size(available_width, available_height);
        Viewport {
            width,
            height,
            center: Point::new(width as f64 / 2.0, height as f64 / 2.0),
            rod_length: width.min(height) as f64 * ROD_SCALE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_applies_to_narrow_areas() {
        assert_eq!(compute_size(50, 1000), (320, 320));
        assert_eq!(compute_size(0, 0), (320, 320));
        assert_eq!(compute_size(1000, 10), (320, 320));
    }

    #[test]
    fn square_fits_shorter_side() {
        // width - margin = 760, height = 500
        assert_eq!(compute_size(800, 500), (500, 500));
        // width - margin = 460, height = 900
        assert_eq!(compute_size(500, 900), (460, 460));
        assert_eq!(compute_size(1040, 1000), (1000, 1000));
    }

    #[test]
    fn derived_fields_follow_size() {
        let v = Viewport::from_available(800, 500);
        assert_eq!(v.width, 500);
        assert_eq!(v.height, 500);
        assert_eq!(v.center, Point::new(250.0, 250.0));
        assert!((v.rod_length - 75.0).abs() < 1e-9);

        let v = Viewport::from_available(10, 10);
        assert_eq!(v.center, Point::new(160.0, 160.0));
        assert!((v.rod_length - 48.0).abs() < 1e-9);
    }

    #[test]
    fn same_area_same_viewport() {
        assert_eq!(
            Viewport::from_available(1280, 640),
            Viewport::from_available(1280, 640)
        );
    }
}
