//! Collage Core - collage composition library
//!
//! This crate provides the core logic for the Collage editor: slot
//! layouts, per-slot crop/zoom/pan transforms with clamping, the gesture
//! state machine, image decoding, and the deterministic rasterization
//! pipeline that reproduces the interactive preview at export resolution.

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod render;
pub mod session;
pub mod transform;

pub use geometry::{canvas_size, cover_scale, max_pan, PixelSize, SizeF, SlotRect};
pub use layout::LayoutKind;
pub use render::{render_collage, Background};
pub use session::EditorSession;
pub use transform::{clamp_transform, SlotTransform, TransformModel, MAX_ZOOM, MIN_ZOOM};

use serde::{Deserialize, Serialize};

/// Selectable output aspect ratios (width to height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1
    #[default]
    Square,
    /// 4:5
    Portrait45,
    /// 3:4
    Portrait34,
    /// 16:9
    Wide169,
    /// 9:16
    Tall916,
}

impl AspectRatio {
    /// Every selectable ratio, in presentation order.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait45,
        AspectRatio::Portrait34,
        AspectRatio::Wide169,
        AspectRatio::Tall916,
    ];

    /// Width divided by height.
    pub fn value(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait45 => 4.0 / 5.0,
            AspectRatio::Portrait34 => 3.0 / 4.0,
            AspectRatio::Wide169 => 16.0 / 9.0,
            AspectRatio::Tall916 => 9.0 / 16.0,
        }
    }

    /// Label for pickers, e.g. "16:9".
    pub fn display_name(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait45 => "4:5",
            AspectRatio::Portrait34 => "3:4",
            AspectRatio::Wide169 => "16:9",
            AspectRatio::Tall916 => "9:16",
        }
    }
}

/// Selectable export long-edge lengths, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LongEdge {
    /// 1080 px
    #[default]
    Social1080,
    /// 1600 px
    Screen1600,
    /// 2048 px
    Print2048,
    /// 3072 px
    Large3072,
}

impl LongEdge {
    /// Every selectable length, in presentation order.
    pub const ALL: [LongEdge; 4] = [
        LongEdge::Social1080,
        LongEdge::Screen1600,
        LongEdge::Print2048,
        LongEdge::Large3072,
    ];

    /// The long-edge length in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            LongEdge::Social1080 => 1080,
            LongEdge::Screen1600 => 1600,
            LongEdge::Print2048 => 2048,
            LongEdge::Large3072 => 3072,
        }
    }
}

/// The selected export shape: aspect ratio plus long-edge length.
///
/// The concrete canvas pixel dimensions are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputSpec {
    pub ratio: AspectRatio,
    pub long_edge: LongEdge,
}

impl OutputSpec {
    pub fn new(ratio: AspectRatio, long_edge: LongEdge) -> Self {
        Self { ratio, long_edge }
    }

    /// The export canvas dimensions for this spec.
    pub fn canvas_size(self) -> PixelSize {
        canvas_size(self.ratio.value(), self.long_edge.pixels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_1080() {
        let spec = OutputSpec::new(AspectRatio::Square, LongEdge::Social1080);
        assert_eq!(spec.canvas_size(), PixelSize::new(1080, 1080));
    }

    #[test]
    fn test_wide_1600() {
        let spec = OutputSpec::new(AspectRatio::Wide169, LongEdge::Screen1600);
        assert_eq!(spec.canvas_size(), PixelSize::new(1600, 900));
    }

    #[test]
    fn test_portrait_long_edge_is_height() {
        for ratio in [
            AspectRatio::Portrait45,
            AspectRatio::Portrait34,
            AspectRatio::Tall916,
        ] {
            for edge in LongEdge::ALL {
                let size = OutputSpec::new(ratio, edge).canvas_size();
                assert_eq!(size.height, edge.pixels());
                assert!(size.width < size.height);
            }
        }
    }

    #[test]
    fn test_ratio_values_match_names() {
        assert_eq!(AspectRatio::Square.value(), 1.0);
        assert!((AspectRatio::Wide169.value() - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!(AspectRatio::Wide169.display_name(), "16:9");
    }

    #[test]
    fn test_default_spec() {
        let spec = OutputSpec::default();
        assert_eq!(spec.canvas_size(), PixelSize::new(1080, 1080));
    }
}
