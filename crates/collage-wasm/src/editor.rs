//! The `CollageEditor` binding: one editing session per instance.
//!
//! The JavaScript shell feeds this class normalized pointer/wheel events
//! and measured slot sizes, renders previews from the transform state it
//! exposes, and asks it for the final PNG bytes on export. All collage
//! semantics live in `collage-core`; this file only translates data across
//! the boundary.

use collage_core::encode::export_file_name;
use collage_core::session::EditorSession;
use wasm_bindgen::prelude::*;

use crate::types::{
    layout_from_u8, long_edge_from_u8, ratio_from_u8, JsDecodeFailure, JsImageAsset,
    JsImportReport,
};

/// A collage editing session.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new CollageEditor();
/// const report = editor.import_batch(names, buffers);
/// editor.set_layout(3); // Grid
/// editor.set_slot_size(0, rect.width * devicePixelRatio, rect.height * devicePixelRatio);
/// editor.pointer_down(0, ev.pointerId, ev.offsetX, ev.offsetY);
/// const png = editor.export_png();
/// ```
#[wasm_bindgen]
pub struct CollageEditor {
    session: EditorSession,
}

impl Default for CollageEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CollageEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CollageEditor {
        CollageEditor {
            session: EditorSession::new(),
        }
    }

    // ----- importing ----------------------------------------------------

    /// Import one already-read file. Returns the new asset id, or
    /// `undefined` when the file was filtered or failed to decode.
    pub fn add_image(&mut self, name: &str, bytes: &[u8]) -> Option<u64> {
        let report = self.session.import([(name, bytes.to_vec())]);
        for failure in &report.failures {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "collage: failed to decode {}: {}",
                failure.name, failure.error
            )));
        }
        report.added.first().copied()
    }

    /// Import a batch of files: parallel arrays of names and
    /// `Uint8Array` buffers (the host joins its reads before calling).
    ///
    /// Returns `{added: number[], failures: {name, error}[]}`. Decode
    /// failures are also logged to the console, one line per file.
    pub fn import_batch(
        &mut self,
        names: js_sys::Array,
        buffers: js_sys::Array,
    ) -> Result<JsValue, JsValue> {
        let files: Vec<(String, Vec<u8>)> = names
            .iter()
            .zip(buffers.iter())
            .map(|(name, buffer)| {
                let name = name.as_string().unwrap_or_default();
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                (name, bytes)
            })
            .collect();

        let report = self.session.import(files);
        for failure in &report.failures {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "collage: failed to decode {}: {}",
                failure.name, failure.error
            )));
        }

        let js_report = JsImportReport {
            added: report.added,
            failures: report
                .failures
                .iter()
                .map(|f| JsDecodeFailure {
                    name: f.name.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        };
        serde_wasm_bindgen::to_value(&js_report).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of photos in the working set.
    pub fn image_count(&self) -> usize {
        self.session.asset_count()
    }

    /// The photo at a working-set position, for preview upload.
    pub fn image(&self, index: usize) -> Option<JsImageAsset> {
        self.session
            .assets()
            .get(index)
            .map(|asset| JsImageAsset::from_asset(asset.id, &asset.name, &asset.image))
    }

    /// Remove a photo. Returns its id so the host can revoke any preview
    /// resource keyed on it.
    pub fn remove_image(&mut self, index: usize) -> Option<u64> {
        self.session.remove_asset(index).map(|asset| asset.id)
    }

    /// Drag-reorder: move a photo (and its crop) to a new position.
    pub fn move_image(&mut self, from: usize, to: usize) {
        self.session.move_asset(from, to);
    }

    /// Swap two photos (and their crops).
    pub fn swap_images(&mut self, a: usize, b: usize) {
        self.session.swap_assets(a, b);
    }

    // ----- configuration ------------------------------------------------

    /// Select a layout by catalog code (see `layout_catalog`).
    pub fn set_layout(&mut self, code: u8) {
        self.session.set_layout(layout_from_u8(code));
    }

    /// Select an aspect ratio by catalog code (see `aspect_ratio_catalog`).
    pub fn set_aspect_ratio(&mut self, code: u8) {
        self.session.set_aspect_ratio(ratio_from_u8(code));
    }

    /// Select an export long edge by catalog code (see `long_edge_catalog`).
    pub fn set_long_edge(&mut self, code: u8) {
        self.session.set_long_edge(long_edge_from_u8(code));
    }

    /// Export canvas width for the current selection.
    pub fn canvas_width(&self) -> u32 {
        self.session.output().canvas_size().width
    }

    /// Export canvas height for the current selection.
    pub fn canvas_height(&self) -> u32 {
        self.session.output().canvas_size().height
    }

    // ----- interaction --------------------------------------------------

    /// Report a slot's rendered size in device pixels, as observed by the
    /// host's resize observer.
    pub fn set_slot_size(&mut self, slot: usize, width: f64, height: f64) {
        self.session.set_measured_slot_size(slot, width, height);
    }

    pub fn pointer_down(&mut self, slot: usize, pointer_id: u32, x: f64, y: f64) {
        self.session.pointer_down(slot, pointer_id as u64, x, y);
    }

    pub fn pointer_move(&mut self, pointer_id: u32, x: f64, y: f64) {
        self.session.pointer_move(pointer_id as u64, x, y);
    }

    pub fn pointer_up(&mut self, pointer_id: u32) {
        self.session.pointer_up(pointer_id as u64);
    }

    pub fn pointer_cancel(&mut self, pointer_id: u32) {
        self.session.pointer_cancel(pointer_id as u64);
    }

    /// Wheel zoom over a slot; `delta` is the raw wheel delta, only its
    /// sign matters.
    pub fn wheel(&mut self, slot: usize, delta: f64) {
        self.session.wheel(slot, delta);
    }

    /// The current transform for a slot as `{zoom, pan_x, pan_y}`.
    pub fn slot_transform(&self, slot: usize) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.transform(slot))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore one slot to cover-fit with no pan.
    pub fn reset_slot(&mut self, slot: usize) {
        self.session.reset_slot(slot);
    }

    /// Restore every slot to cover-fit with no pan.
    pub fn reset_all(&mut self) {
        self.session.reset_all();
    }

    // ----- export -------------------------------------------------------

    /// Render the collage at export resolution and return the PNG bytes.
    ///
    /// All-or-nothing: on failure no bytes are produced and the host can
    /// clear its exporting flag and retry.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.session
            .export()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Download file name for an export started now, e.g.
    /// `collage-2026-08-25T123456.png`.
    pub fn export_name(&self) -> String {
        let iso = js_sys::Date::new_0().to_iso_string();
        export_file_name(&iso.as_string().unwrap_or_default())
    }
}


/// WASM-specific tests that require JsValue.
///
/// These exercise the serialized boundary (`import_batch`, `slot_transform`,
/// `export_name`) and can only run on wasm32 targets. Use `wasm-pack test`
/// to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        use image::codecs::png::PngEncoder;
        use image::{ExtendedColorType, ImageEncoder, RgbImage};

        let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
        buf
    }

    fn js_field(value: &JsValue, key: &str) -> JsValue {
        js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_import_batch_reports_added_and_failures() {
        let mut editor = CollageEditor::new();
        let mut corrupt = png_bytes(8, 8, [0, 0, 0]);
        corrupt.truncate(20);

        let names = js_sys::Array::new();
        names.push(&JsValue::from_str("ok.png"));
        names.push(&JsValue::from_str("broken.png"));
        let buffers = js_sys::Array::new();
        buffers.push(&js_sys::Uint8Array::from(png_bytes(4, 4, [1, 2, 3]).as_slice()));
        buffers.push(&js_sys::Uint8Array::from(corrupt.as_slice()));

        let report = editor.import_batch(names, buffers).unwrap();

        let added = js_sys::Array::from(&js_field(&report, "added"));
        assert_eq!(added.length(), 1);
        let failures = js_sys::Array::from(&js_field(&report, "failures"));
        assert_eq!(failures.length(), 1);
        assert_eq!(
            js_field(&failures.get(0), "name").as_string().unwrap(),
            "broken.png"
        );
        assert_eq!(editor.image_count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_slot_transform_serializes_as_object() {
        let mut editor = CollageEditor::new();
        editor.add_image("a.png", &png_bytes(80, 60, [1, 1, 1]));
        editor.set_slot_size(0, 300.0, 300.0);
        editor.wheel(0, 1.0);

        let t = editor.slot_transform(0).unwrap();
        let zoom = js_field(&t, "zoom").as_f64().unwrap();
        assert!((zoom - 1.08).abs() < 1e-9);
        assert_eq!(js_field(&t, "pan_x").as_f64(), Some(0.0));
        assert_eq!(js_field(&t, "pan_y").as_f64(), Some(0.0));
    }

    #[wasm_bindgen_test]
    fn test_export_png_produces_png_bytes() {
        let mut editor = CollageEditor::new();
        editor.add_image("a.png", &png_bytes(8, 8, [9, 9, 9]));

        let png = editor.export_png().unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[wasm_bindgen_test]
    fn test_export_name_from_current_time() {
        let editor = CollageEditor::new();
        let name = editor.export_name();

        assert!(name.starts_with("collage-"));
        assert!(name.ends_with(".png"));
        // Colons and fractional seconds are stripped for file-system safety.
        assert!(!name.contains(':'));
        assert_eq!(name.matches('.').count(), 1);
    }
}
