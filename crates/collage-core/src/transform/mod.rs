//! Per-slot crop/zoom/pan transforms and their clamping rules.
//!
//! Every photo in a collage is auto-fitted to its slot with a "cover"
//! scale; on top of that the user controls a zoom multiplier and a pan
//! offset. This module defines the transform record, the pure clamping
//! function that keeps a transform within the overscan bounds implied by
//! the current zoom, and the [`TransformModel`] that owns one transform
//! per slot index.
//!
//! # Transform Order
//!
//! When placing a photo in a slot:
//! 1. Cover-fit scale (automatic, from image and slot dimensions)
//! 2. Zoom multiplier (user controlled, 1.0 to 3.0)
//! 3. Pan offset from the slot center (user controlled, device pixels)

mod model;

pub use model::TransformModel;

use serde::{Deserialize, Serialize};

use crate::geometry::{cover_scale, max_pan, SizeF};

/// Minimum zoom: exactly cover-fit, no extra magnification.
pub const MIN_ZOOM: f64 = 1.0;

/// Maximum permitted magnification on top of cover-fit.
pub const MAX_ZOOM: f64 = 3.0;

/// Editable placement state for one slot.
///
/// `zoom` is a dimensionless multiplier applied on top of the automatic
/// cover-fit scale. `pan_x`/`pan_y` offset the image center from the slot
/// center, in device pixels of whatever surface the slot is being rendered
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotTransform {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for SlotTransform {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl SlotTransform {
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Check if the transform is at its default (cover-fit, centered).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Clamp a candidate transform against concrete slot and image dimensions.
///
/// Total function: always returns an in-range transform. The zoom is
/// clamped into `[MIN_ZOOM, MAX_ZOOM]`, then the pan is clamped into the
/// overscan allowed by the clamped zoom:
///
/// ```text
/// base    = cover_scale(image, slot)
/// display = image * base * zoom
/// |pan_x| <= max(0, (display.width  - slot.width)  / 2)
/// |pan_y| <= max(0, (display.height - slot.height) / 2)
/// ```
///
/// Callers must guard degenerate inputs ([`SizeF::is_positive`]); the
/// deferred-clamping path for missing measurements lives in
/// [`TransformModel::clamp`].
pub fn clamp_transform(candidate: SlotTransform, slot: SizeF, image: SizeF) -> SlotTransform {
    let zoom = candidate.zoom.clamp(MIN_ZOOM, MAX_ZOOM);

    let scale = cover_scale(image, slot) * zoom;
    let display_w = image.width * scale;
    let display_h = image.height * scale;

    let max_x = max_pan(display_w, slot.width);
    let max_y = max_pan(display_h, slot.height);

    SlotTransform {
        zoom,
        pan_x: candidate.pan_x.clamp(-max_x, max_x),
        pan_y: candidate.pan_y.clamp(-max_y, max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let t = SlotTransform::default();
        assert_eq!(t.zoom, 1.0);
        assert_eq!(t.pan_x, 0.0);
        assert_eq!(t.pan_y, 0.0);
        assert!(t.is_default());
    }

    #[test]
    fn test_clamp_zoom_range() {
        let slot = SizeF::new(400.0, 400.0);
        let image = SizeF::new(800.0, 600.0);

        let low = clamp_transform(SlotTransform::new(0.2, 0.0, 0.0), slot, image);
        assert_eq!(low.zoom, MIN_ZOOM);

        let high = clamp_transform(SlotTransform::new(9.0, 0.0, 0.0), slot, image);
        assert_eq!(high.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_clamp_pan_wide_image_in_square_slot() {
        // 800x600 into 400x400: base scale 2/3, display 533.33x400 at zoom 1.
        // Horizontal overscan allows ~66.67px of pan, vertical allows none.
        let slot = SizeF::new(400.0, 400.0);
        let image = SizeF::new(800.0, 600.0);

        let t = clamp_transform(SlotTransform::new(1.0, 500.0, 50.0), slot, image);
        assert!((t.pan_x - 66.6666).abs() < 0.001);
        assert_eq!(t.pan_y, 0.0);
    }

    #[test]
    fn test_clamp_pan_negative_side() {
        let slot = SizeF::new(400.0, 400.0);
        let image = SizeF::new(800.0, 600.0);

        let t = clamp_transform(SlotTransform::new(1.0, -500.0, 0.0), slot, image);
        assert!((t.pan_x + 66.6666).abs() < 0.001);
    }

    #[test]
    fn test_clamp_zoom_widens_pan_bounds() {
        let slot = SizeF::new(400.0, 400.0);
        let image = SizeF::new(800.0, 600.0);

        // At zoom 2 the display is 1066.67x800, so vertical pan opens up too.
        let t = clamp_transform(SlotTransform::new(2.0, 0.0, 300.0), slot, image);
        assert!((t.pan_y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_in_range_passes_through() {
        let slot = SizeF::new(400.0, 400.0);
        let image = SizeF::new(800.0, 600.0);

        let candidate = SlotTransform::new(1.5, 20.0, -10.0);
        let t = clamp_transform(candidate, slot, image);
        assert_eq!(t, candidate);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{cover_scale, max_pan};
    use proptest::prelude::*;

    fn sizes_strategy() -> impl Strategy<Value = (SizeF, SizeF)> {
        (
            (1.0f64..=8000.0, 1.0f64..=8000.0),
            (1.0f64..=2000.0, 1.0f64..=2000.0),
        )
            .prop_map(|((iw, ih), (sw, sh))| (SizeF::new(iw, ih), SizeF::new(sw, sh)))
    }

    fn candidate_strategy() -> impl Strategy<Value = SlotTransform> {
        (-2.0f64..=10.0, -5000.0f64..=5000.0, -5000.0f64..=5000.0)
            .prop_map(|(zoom, pan_x, pan_y)| SlotTransform { zoom, pan_x, pan_y })
    }

    proptest! {
        /// Property: zoom always lands in [1, 3] after clamping.
        #[test]
        fn prop_zoom_in_range(
            (image, slot) in sizes_strategy(),
            candidate in candidate_strategy(),
        ) {
            let t = clamp_transform(candidate, slot, image);
            prop_assert!(t.zoom >= MIN_ZOOM && t.zoom <= MAX_ZOOM);
        }

        /// Property: pan never exceeds the overscan bound on either axis.
        #[test]
        fn prop_pan_within_overscan(
            (image, slot) in sizes_strategy(),
            candidate in candidate_strategy(),
        ) {
            let t = clamp_transform(candidate, slot, image);
            let scale = cover_scale(image, slot) * t.zoom;
            let max_x = max_pan(image.width * scale, slot.width);
            let max_y = max_pan(image.height * scale, slot.height);
            prop_assert!(t.pan_x.abs() <= max_x + 1e-9);
            prop_assert!(t.pan_y.abs() <= max_y + 1e-9);
        }

        /// Property: clamping is idempotent.
        #[test]
        fn prop_clamp_idempotent(
            (image, slot) in sizes_strategy(),
            candidate in candidate_strategy(),
        ) {
            let once = clamp_transform(candidate, slot, image);
            let twice = clamp_transform(once, slot, image);
            prop_assert_eq!(once, twice);
        }
    }
}
