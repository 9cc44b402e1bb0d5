//! Decoding of imported files, with EXIF orientation and batch semantics.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Check whether the bytes look like a supported image file.
///
/// Mirrors the host-side `image/*` MIME filter: files that fail this check
/// are silently dropped from a batch rather than reported as errors.
pub fn is_supported_image(bytes: &[u8]) -> bool {
    image::guess_format(bytes).is_ok()
}

/// Decode an imported image from bytes, applying EXIF orientation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as delivered by the file picker
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image format, `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` if the decoded image has a zero dimension.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if !is_supported_image(bytes) {
        return Err(DecodeError::InvalidFormat);
    }

    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    let rgb = oriented.into_rgb8();

    let decoded = DecodedImage::from_rgb_image(rgb);
    if decoded.is_empty() {
        return Err(DecodeError::EmptyImage);
    }
    Ok(decoded)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY) {
            Some(field) => field
                .value
                .get_uint(0)
                .map(Orientation::from)
                .unwrap_or_default(),
            None => Orientation::Normal,
        },
        Err(_) => Orientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to a decoded image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// One file that failed to decode within a batch.
#[derive(Debug)]
pub struct DecodeFailure {
    /// Display name of the offending file.
    pub name: String,
    pub error: DecodeError,
}

/// Result of decoding a batch of imported files.
///
/// Successes and failures are kept separate so the caller can merge the
/// decoded images into the working set as one unit while reporting each
/// failed file individually.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully decoded files, in input order: (display name, image).
    pub decoded: Vec<(String, DecodedImage)>,
    /// Files that were recognized as images but failed to decode.
    pub failures: Vec<DecodeFailure>,
}

/// Decode a batch of imported files.
///
/// Files that do not look like images at all are silently filtered out,
/// matching the host's `image/*` MIME filter. Files that look like images
/// but fail to decode are reported in [`BatchOutcome::failures`] without
/// affecting the rest of the batch.
pub fn decode_batch<I, N>(files: I) -> BatchOutcome
where
    I: IntoIterator<Item = (N, Vec<u8>)>,
    N: Into<String>,
{
    let mut outcome = BatchOutcome::default();

    for (name, bytes) in files {
        let name = name.into();
        if !is_supported_image(&bytes) {
            continue;
        }
        match decode_image(&bytes) {
            Ok(image) => outcome.decoded.push((name, image)),
            Err(error) => outcome.failures.push(DecodeFailure { name, error }),
        }
    }

    outcome
}
