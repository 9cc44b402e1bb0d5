//! WASM-compatible wrapper types and enum conversions.
//!
//! This module provides JavaScript-friendly types that wrap the core Collage
//! types, handling the conversion between Rust and JavaScript data
//! representations. Configuration enums cross the boundary as small integer
//! codes; the catalogs in [`crate::layout`] tell the UI what each code means.

use collage_core::decode::DecodedImage;
use collage_core::{AspectRatio, LayoutKind, LongEdge};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An imported photo exposed to JavaScript.
///
/// Pixel data is delivered as RGBA so it can be uploaded straight into an
/// `ImageData`/canvas without reshuffling on the JS side.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory; `pixels()` copies it out to a
/// `Uint8Array`. wasm-bindgen's finalizer releases the WASM-side buffer
/// automatically.
#[wasm_bindgen]
pub struct JsImageAsset {
    id: u64,
    name: String,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

#[wasm_bindgen]
impl JsImageAsset {
    /// Stable id the host keys preview resources (object URLs) on.
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Original file name.
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Intrinsic width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA pixel data (4 bytes per pixel, row-major), copied out of WASM
    /// memory.
    pub fn pixels(&self) -> Vec<u8> {
        self.rgba.clone()
    }
}

impl JsImageAsset {
    /// Build the JS view of a working-set asset.
    pub(crate) fn from_asset(id: u64, name: &str, image: &DecodedImage) -> Self {
        Self {
            id,
            name: name.to_string(),
            width: image.width,
            height: image.height,
            rgba: image.to_rgba_pixels(),
        }
    }
}

/// One failed file in an import batch, serialized to JS.
#[derive(Debug, Serialize)]
pub(crate) struct JsDecodeFailure {
    pub name: String,
    pub error: String,
}

/// Import batch result, serialized to JS.
#[derive(Debug, Serialize, Default)]
pub(crate) struct JsImportReport {
    /// Ids of the assets added by this batch.
    pub added: Vec<u64>,
    pub failures: Vec<JsDecodeFailure>,
}

/// Convert a u8 layout code to a [`LayoutKind`].
///
/// Codes follow the catalog order (0 = Solo ... 5 = Hero); unknown values
/// fall back to Solo.
pub(crate) fn layout_from_u8(value: u8) -> LayoutKind {
    LayoutKind::ALL
        .get(value as usize)
        .copied()
        .unwrap_or_default()
}

/// Convert a u8 ratio code to an [`AspectRatio`] (0 = 1:1 ... 4 = 9:16).
/// Unknown values fall back to square.
pub(crate) fn ratio_from_u8(value: u8) -> AspectRatio {
    AspectRatio::ALL
        .get(value as usize)
        .copied()
        .unwrap_or_default()
}

/// Convert a u8 long-edge code to a [`LongEdge`] (0 = 1080 ... 3 = 3072).
/// Unknown values fall back to 1080.
pub(crate) fn long_edge_from_u8(value: u8) -> LongEdge {
    LongEdge::ALL
        .get(value as usize)
        .copied()
        .unwrap_or_default()
}
