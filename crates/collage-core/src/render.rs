//! Deterministic rasterization of a collage to a flat RGB image.
//!
//! The exporter recomputes every placement from first principles at the
//! target resolution: fractional slot rectangles are resolved against the
//! export canvas, cover scales are re-derived from the true slot pixel
//! sizes, and stored pans are re-clamped against the export-resolution
//! overscan bounds rather than the on-screen ones. The same geometry
//! functions drive the interactive preview, so the export reproduces the
//! preview's composition.
//!
//! # Algorithm
//!
//! The compositor uses inverse mapping: for each canvas pixel inside a
//! slot's rectangle, the source coordinate is found by undoing the
//! draw-position offset and the total scale, then sampled bilinearly.
//! Drawing is restricted to the slot rectangle, so a zoomed photo never
//! bleeds into a neighboring slot.

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::geometry::cover_scale;
use crate::layout::LayoutKind;
use crate::transform::{clamp_transform, SlotTransform};
use crate::OutputSpec;

/// Solid background color painted before any slot drawing.
///
/// Guarantees there are no transparent gaps where a slot has no assigned
/// photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background(pub [u8; 3]);

impl Default for Background {
    fn default() -> Self {
        Background([255, 255, 255])
    }
}

/// Errors that can occur while rasterizing a collage.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The computed canvas has a zero edge, so no drawing surface exists.
    #[error("Cannot render to an empty canvas ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
}

/// Render a collage to a flattened RGB image at the export resolution.
///
/// # Arguments
///
/// * `output` - Selected aspect ratio and long edge; determines the canvas
/// * `layout` - Slot arrangement; slots are drawn in layout order
/// * `images` - Photos assigned to slots by index; slots beyond the end
///   are left showing the background
/// * `transforms` - Transform snapshot by slot index; missing entries use
///   the default cover-fit transform
/// * `background` - Fill color for the canvas
///
/// # Errors
///
/// Returns `RenderError::EmptyCanvas` when the output spec resolves to a
/// zero-sized canvas. No partial output is produced on failure.
pub fn render_collage(
    output: OutputSpec,
    layout: LayoutKind,
    images: &[&DecodedImage],
    transforms: &[SlotTransform],
    background: Background,
) -> Result<DecodedImage, RenderError> {
    let canvas = output.canvas_size();
    if canvas.width == 0 || canvas.height == 0 {
        return Err(RenderError::EmptyCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }

    let mut pixels = Vec::with_capacity((canvas.width * canvas.height * 3) as usize);
    for _ in 0..canvas.width * canvas.height {
        pixels.extend_from_slice(&background.0);
    }
    let mut out = DecodedImage::new(canvas.width, canvas.height, pixels);

    for (index, slot) in layout.slots().iter().enumerate() {
        let Some(image) = images.get(index).copied() else {
            continue;
        };
        if image.is_empty() {
            continue;
        }
        let stored = transforms.get(index).copied().unwrap_or_default();
        draw_slot(&mut out, slot.to_pixel_rect(canvas), image, stored);
    }

    Ok(out)
}

/// Composite one photo into its slot rectangle.
fn draw_slot(
    out: &mut DecodedImage,
    rect: crate::geometry::PixelRect,
    image: &DecodedImage,
    stored: SlotTransform,
) {
    // Pan bounds depend on the slot's pixel size, which differs between
    // the on-screen preview and the export canvas. Re-clamp here.
    let transform = clamp_transform(stored, rect.size(), image.size());

    let scale = cover_scale(image.size(), rect.size()) * transform.zoom;
    let display_w = image.width as f64 * scale;
    let display_h = image.height as f64 * scale;

    let (cx, cy) = rect.center();
    let origin_x = cx - display_w / 2.0 + transform.pan_x;
    let origin_y = cy - display_h / 2.0 + transform.pan_y;

    // Slot bounds in whole canvas pixels. Adjacent slots share rounded
    // edges, so the canvas tiles without gaps or double-drawn seams.
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = ((rect.x + rect.width).round() as u32).min(out.width);
    let y1 = ((rect.y + rect.height).round() as u32).min(out.height);

    for dst_y in y0..y1 {
        for dst_x in x0..x1 {
            // Invert the placement to find the source coordinate.
            let src_x = (dst_x as f64 - origin_x) / scale;
            let src_y = (dst_y as f64 - origin_y) / scale;

            let pixel = sample_bilinear(image, src_x, src_y);
            let dst_idx = ((dst_y * out.width + dst_x) * 3) as usize;
            out.pixels[dst_idx] = pixel[0];
            out.pixels[dst_idx + 1] = pixel[1];
            out.pixels[dst_idx + 2] = pixel[2];
        }
    }
}

/// Sample a pixel using bilinear interpolation.
///
/// Cover-fit guarantees the slot maps inside the source image up to
/// rounding at the edges, so coordinates are clamped into bounds rather
/// than treated as misses.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = pixel_at(image, x0, y0);
    let p10 = pixel_at(image, x1, y0);
    let p01 = pixel_at(image, x0, y1);
    let p11 = pixel_at(image, x1, y1);

    let mut result = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        result[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    result
}

#[inline]
fn pixel_at(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}
