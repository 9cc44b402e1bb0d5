//! Configuration catalogs for the UI.
//!
//! The pickers in the step wizard enumerate layouts, aspect ratios, and
//! long-edge lengths from these catalogs; the index of an entry is the u8
//! code accepted by the corresponding `CollageEditor` setter.

use collage_core::geometry::SlotRect;
use collage_core::{AspectRatio, LayoutKind, LongEdge};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
struct LayoutEntry {
    name: &'static str,
    slots: Vec<SlotRect>,
}

/// The layout catalog as a JS array of `{name, slots: [{x, y, width,
/// height}]}` entries, in code order.
#[wasm_bindgen]
pub fn layout_catalog() -> Result<JsValue, JsValue> {
    let entries: Vec<LayoutEntry> = LayoutKind::ALL
        .iter()
        .map(|layout| LayoutEntry {
            name: layout.display_name(),
            slots: layout.slots().to_vec(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(Debug, Serialize)]
struct RatioEntry {
    name: &'static str,
    value: f64,
}

/// The aspect-ratio catalog as a JS array of `{name, value}` entries.
#[wasm_bindgen]
pub fn aspect_ratio_catalog() -> Result<JsValue, JsValue> {
    let entries: Vec<RatioEntry> = AspectRatio::ALL
        .iter()
        .map(|ratio| RatioEntry {
            name: ratio.display_name(),
            value: ratio.value(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The long-edge catalog as a JS array of pixel lengths.
#[wasm_bindgen]
pub fn long_edge_catalog() -> Vec<u32> {
    LongEdge::ALL.iter().map(|edge| edge.pixels()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_edge_catalog_order() {
        assert_eq!(long_edge_catalog(), vec![1080, 1600, 2048, 3072]);
    }
}

/// WASM-specific tests that require JsValue.
///
/// The catalogs cross the boundary through serde; these can only run on
/// wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn js_field(value: &JsValue, key: &str) -> JsValue {
        js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_layout_catalog_entries() {
        let catalog = js_sys::Array::from(&layout_catalog().unwrap());
        assert_eq!(catalog.length(), 6);

        let solo = catalog.get(0);
        assert_eq!(js_field(&solo, "name").as_string().unwrap(), "Solo");
        let slots = js_sys::Array::from(&js_field(&solo, "slots"));
        assert_eq!(slots.length(), 1);
        assert_eq!(js_field(&slots.get(0), "width").as_f64(), Some(1.0));
    }

    #[wasm_bindgen_test]
    fn test_aspect_ratio_catalog_entries() {
        let catalog = js_sys::Array::from(&aspect_ratio_catalog().unwrap());
        assert_eq!(catalog.length(), 5);

        let wide = catalog.get(3);
        assert_eq!(js_field(&wide, "name").as_string().unwrap(), "16:9");
        let value = js_field(&wide, "value").as_f64().unwrap();
        assert!((value - 16.0 / 9.0).abs() < 1e-12);
    }
}
