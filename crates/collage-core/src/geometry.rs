//! Geometry utilities shared by the interactive preview and the exporter.
//!
//! All collage placement math is derived from three pure functions:
//! canvas sizing from an aspect ratio, "cover" scaling of an image into a
//! rectangular slot, and the maximum pan allowed by the resulting overscan.
//! Keeping these in one place guarantees the preview and the export raster
//! compute identical placement for the same inputs.
//!
//! # Coordinate System
//!
//! - Origin is top-left, y grows downward
//! - Slot rectangles are normalized (0.0 to 1.0) relative to the canvas
//! - Pan offsets are in device pixels, relative to the slot center

use serde::{Deserialize, Serialize};

/// Integer pixel dimensions of a canvas or image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Floating-point dimensions, used for measured slot sizes and display sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size is usable for clamping only when both edges are positive.
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A slot's pixel-space rectangle within a concrete canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }
}

/// A slot's fractional rectangle within the unit canvas.
///
/// All coordinates are in the range 0.0 to 1.0; the rectangle is fully
/// contained within the unit square. Slots in a layout need not tile the
/// canvas exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SlotRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Resolve this fractional rectangle against a concrete canvas size.
    ///
    /// Both the preview renderer and the exporter go through this
    /// conversion, so a slot's proportional placement is identical at any
    /// resolution.
    pub fn to_pixel_rect(&self, canvas: PixelSize) -> PixelRect {
        let w = canvas.width as f64;
        let h = canvas.height as f64;
        PixelRect {
            x: self.x * w,
            y: self.y * h,
            width: self.width * w,
            height: self.height * h,
        }
    }

    /// True when the rectangle lies entirely within the unit square.
    pub fn is_within_unit_square(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.x + self.width <= 1.0 + f64::EPSILON
            && self.y + self.height <= 1.0 + f64::EPSILON
    }
}

/// Compute canvas pixel dimensions from an aspect ratio and a long-edge length.
///
/// For landscape or square ratios (ratio >= 1) the width takes the long
/// edge and the height is derived; for portrait ratios the height takes the
/// long edge. The derived edge is rounded to the nearest pixel.
///
/// # Arguments
///
/// * `ratio` - Width divided by height (e.g. 16/9 for widescreen)
/// * `long_edge` - Length of the canvas's longest edge in pixels
///
/// # Example
///
/// ```ignore
/// let size = canvas_size(16.0 / 9.0, 1600);
/// assert_eq!(size, PixelSize::new(1600, 900));
/// ```
pub fn canvas_size(ratio: f64, long_edge: u32) -> PixelSize {
    if ratio >= 1.0 {
        PixelSize {
            width: long_edge,
            height: (long_edge as f64 / ratio).round() as u32,
        }
    } else {
        PixelSize {
            width: (long_edge as f64 * ratio).round() as u32,
            height: long_edge,
        }
    }
}

/// Compute the "cover" scale for fitting content into a box.
///
/// The returned scale is the smallest factor at which the scaled content
/// fully covers the box on both axes; the overflowing axis is cropped by
/// the slot. Degenerate when either box edge is zero — callers guard by
/// checking [`SizeF::is_positive`] (e.g. a slot measurement that has not
/// arrived yet).
pub fn cover_scale(content: SizeF, boxed: SizeF) -> f64 {
    (boxed.width / content.width).max(boxed.height / content.height)
}

/// Maximum pan offset along one axis given a display edge and a slot edge.
///
/// Zero when the display does not overflow the slot on that axis.
pub fn max_pan(display_edge: f64, slot_edge: f64) -> f64 {
    ((display_edge - slot_edge) / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_square() {
        let size = canvas_size(1.0, 1080);
        assert_eq!(size, PixelSize::new(1080, 1080));
    }

    #[test]
    fn test_canvas_size_landscape() {
        let size = canvas_size(16.0 / 9.0, 1600);
        assert_eq!(size, PixelSize::new(1600, 900));
    }

    #[test]
    fn test_canvas_size_portrait() {
        let size = canvas_size(4.0 / 5.0, 2048);
        // Portrait: height takes the long edge
        assert_eq!(size.height, 2048);
        assert_eq!(size.width, (2048.0 * 0.8_f64).round() as u32);
    }

    #[test]
    fn test_canvas_size_tall() {
        let size = canvas_size(9.0 / 16.0, 1600);
        assert_eq!(size, PixelSize::new(900, 1600));
    }

    #[test]
    fn test_cover_scale_wide_image_square_box() {
        // 800x600 into 400x400: height is the constraining axis
        let scale = cover_scale(SizeF::new(800.0, 600.0), SizeF::new(400.0, 400.0));
        assert!((scale - 400.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn test_cover_scale_covers_both_axes() {
        let content = SizeF::new(800.0, 600.0);
        let boxed = SizeF::new(400.0, 400.0);
        let scale = cover_scale(content, boxed);
        assert!(content.width * scale >= boxed.width);
        assert!(content.height * scale >= boxed.height);
    }

    #[test]
    fn test_cover_scale_exact_fit() {
        let scale = cover_scale(SizeF::new(200.0, 100.0), SizeF::new(200.0, 100.0));
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_pan_with_overflow() {
        // 800x600 at scale 2/3 -> display 533.33x400 in a 400x400 slot
        let display_w = 800.0 * (400.0 / 600.0);
        assert!((max_pan(display_w, 400.0) - 66.6666).abs() < 0.001);
        assert_eq!(max_pan(400.0, 400.0), 0.0);
    }

    #[test]
    fn test_max_pan_never_negative() {
        assert_eq!(max_pan(100.0, 400.0), 0.0);
    }

    #[test]
    fn test_slot_rect_to_pixel_rect() {
        let slot = SlotRect::new(0.5, 0.0, 0.5, 1.0);
        let rect = slot.to_pixel_rect(PixelSize::new(1080, 1080));
        assert_eq!(rect.x, 540.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 540.0);
        assert_eq!(rect.height, 1080.0);
    }

    #[test]
    fn test_pixel_rect_center() {
        let rect = PixelRect {
            x: 100.0,
            y: 50.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(rect.center(), (200.0, 100.0));
    }

    #[test]
    fn test_size_f_positive() {
        assert!(SizeF::new(1.0, 1.0).is_positive());
        assert!(!SizeF::new(0.0, 1.0).is_positive());
        assert!(!SizeF::new(1.0, 0.0).is_positive());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the long edge always lands on the correct axis.
        #[test]
        fn prop_canvas_size_long_edge_axis(
            ratio in 0.1f64..=10.0,
            long_edge in 16u32..=4096,
        ) {
            let size = canvas_size(ratio, long_edge);
            if ratio >= 1.0 {
                prop_assert_eq!(size.width, long_edge);
                prop_assert!(size.height <= long_edge);
            } else {
                prop_assert_eq!(size.height, long_edge);
                prop_assert!(size.width <= long_edge);
            }
        }

        /// Property: canvas_size is deterministic.
        #[test]
        fn prop_canvas_size_deterministic(
            ratio in 0.1f64..=10.0,
            long_edge in 16u32..=4096,
        ) {
            prop_assert_eq!(canvas_size(ratio, long_edge), canvas_size(ratio, long_edge));
        }

        /// Property: cover scale always covers the box on both axes.
        #[test]
        fn prop_cover_scale_covers(
            (cw, ch) in (1.0f64..=8000.0, 1.0f64..=8000.0),
            (bw, bh) in (1.0f64..=4000.0, 1.0f64..=4000.0),
        ) {
            let scale = cover_scale(SizeF::new(cw, ch), SizeF::new(bw, bh));
            // Allow for floating point slack
            prop_assert!(cw * scale >= bw - 1e-9);
            prop_assert!(ch * scale >= bh - 1e-9);
        }

        /// Property: max_pan is never negative.
        #[test]
        fn prop_max_pan_non_negative(
            display in 0.0f64..=10000.0,
            slot in 0.0f64..=10000.0,
        ) {
            prop_assert!(max_pan(display, slot) >= 0.0);
        }
    }
}
