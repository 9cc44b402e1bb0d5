//! Image decoding for the import pipeline.
//!
//! Imported files arrive as raw bytes from the host's file picker or
//! drag-and-drop. Decoding sniffs the format from the bytes, applies EXIF
//! orientation so a phone photo lands upright in its slot, and produces
//! RGB pixel buffers for the compositor. Batches decode per-file: one bad
//! file is reported and skipped without touching its siblings.

mod import;
mod types;

pub use import::{decode_batch, decode_image, is_supported_image, BatchOutcome, DecodeFailure};
pub use types::{DecodeError, DecodedImage, Orientation};
