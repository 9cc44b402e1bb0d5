//! Collage WASM - WebAssembly bindings for Collage
//!
//! This crate exposes the collage-core composition engine to the
//! JavaScript/TypeScript shell of the editor.
//!
//! # Module Structure
//!
//! - `editor` - The `CollageEditor` session class (import, gestures, export)
//! - `layout` - Configuration catalogs for the UI pickers
//! - `types` - WASM-compatible wrapper types and enum codes
//!
//! # Usage
//!
//! ```typescript
//! import init, { CollageEditor, layout_catalog } from '@collage/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new CollageEditor();
//! const buffers = await Promise.all(files.map(f => f.arrayBuffer()));
//! editor.import_batch(files.map(f => f.name), buffers.map(b => new Uint8Array(b)));
//! const png = editor.export_png();
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod layout;
mod types;

// Re-export public types
pub use editor::CollageEditor;
pub use layout::{aspect_ratio_catalog, layout_catalog, long_edge_catalog};
pub use types::JsImageAsset;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
