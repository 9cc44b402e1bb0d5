//! PNG encoding for export.

mod png;

pub use png::{encode_png, export_file_name, EncodeError};
