//! The top-level editor session owning the working set.
//!
//! An [`EditorSession`] holds the imported photos, the selected layout and
//! output spec, the per-slot transforms, and the gesture interpreter, and
//! wires them together: photos are assigned to slots by their order in the
//! working set, pointer events are routed to the transform of the slot
//! they target, and export renders everything through the same geometry
//! the preview uses.
//!
//! Ownership rules: the session exclusively owns the photos and the
//! transforms. Transforms are indexed by slot position, so every reorder
//! of the photo list moves the matching transform along with the photo —
//! an edit stays attached to its photo, not to the slot it happened in.

use thiserror::Error;

use crate::decode::{decode_batch, DecodeFailure, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::geometry::SizeF;
use crate::gesture::{GestureInterpreter, PointerPos};
use crate::layout::LayoutKind;
use crate::render::{render_collage, Background, RenderError};
use crate::transform::{SlotTransform, TransformModel};
use crate::{AspectRatio, LongEdge, OutputSpec};

/// One imported photo in the working set.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Stable identifier, unique within the session. The host keys any
    /// external resources (e.g. a preview object URL) on this id and
    /// revokes them when the asset leaves the working set.
    pub id: u64,
    /// Display name, usually the original file name.
    pub name: String,
    pub image: DecodedImage,
}

impl ImageAsset {
    /// Intrinsic dimensions, for placement math.
    pub fn size(&self) -> SizeF {
        self.image.size()
    }
}

/// Outcome of importing one batch of files.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Ids of the assets added by this batch, in input order.
    pub added: Vec<u64>,
    /// Files that looked like images but failed to decode.
    pub failures: Vec<DecodeFailure>,
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The interactive editing session.
#[derive(Debug, Default)]
pub struct EditorSession {
    assets: Vec<ImageAsset>,
    next_asset_id: u64,
    layout: LayoutKind,
    output: OutputSpec,
    transforms: TransformModel,
    gestures: GestureInterpreter,
    background: Background,
}

impl EditorSession {
    pub fn new() -> Self {
        let layout = LayoutKind::default();
        Self {
            transforms: TransformModel::new(layout.slot_count()),
            layout,
            ..Self::default()
        }
    }

    // ----- working set -------------------------------------------------

    /// Import a batch of files.
    ///
    /// Non-image files are silently filtered; files that fail to decode
    /// are reported per-file in the returned report. The successfully
    /// decoded files are appended to the working set as one unit.
    pub fn import<I, N>(&mut self, files: I) -> ImportReport
    where
        I: IntoIterator<Item = (N, Vec<u8>)>,
        N: Into<String>,
    {
        let outcome = decode_batch(files);

        let mut report = ImportReport {
            failures: outcome.failures,
            ..ImportReport::default()
        };
        for (name, image) in outcome.decoded {
            let id = self.next_asset_id;
            self.next_asset_id += 1;
            self.assets.push(ImageAsset { id, name, image });
            report.added.push(id);
        }

        self.reseed();
        report
    }

    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Remove a photo from the working set by position.
    ///
    /// Returns the removed asset so the host can release any external
    /// resource keyed on its id. Transforms of the photos after it shift
    /// up with them.
    pub fn remove_asset(&mut self, index: usize) -> Option<ImageAsset> {
        if index >= self.assets.len() {
            return None;
        }
        let removed = self.assets.remove(index);
        // Clear the removed photo's crop before shifting the survivors up,
        // so it cannot attach to whichever photo occupies the slot next.
        self.transforms.reset(index);
        if !self.assets.is_empty() {
            self.transforms.shift(index, self.transforms.len() - 1);
        }
        self.reseed();
        Some(removed)
    }

    /// Drag-reorder: move the photo at `from` to position `to`. The
    /// photo's transform travels with it.
    pub fn move_asset(&mut self, from: usize, to: usize) {
        if from >= self.assets.len() || to >= self.assets.len() || from == to {
            return;
        }
        let asset = self.assets.remove(from);
        self.assets.insert(to, asset);
        self.transforms.shift(from, to);
    }

    /// Swap two photos and their transforms.
    pub fn swap_assets(&mut self, a: usize, b: usize) {
        if a >= self.assets.len() || b >= self.assets.len() || a == b {
            return;
        }
        self.assets.swap(a, b);
        self.transforms.swap(a, b);
    }

    // ----- configuration -----------------------------------------------

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Switch layouts, re-seeding the transform store for the new slot
    /// count.
    pub fn set_layout(&mut self, layout: LayoutKind) {
        self.layout = layout;
        self.reseed();
    }

    pub fn output(&self) -> OutputSpec {
        self.output
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.output.ratio = ratio;
    }

    pub fn set_long_edge(&mut self, long_edge: LongEdge) {
        self.output.long_edge = long_edge;
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    // ----- transforms & measurements ------------------------------------

    /// Record the on-screen pixel size of a slot, as observed by the
    /// host's layout observer. Arrives asynchronously; until it does,
    /// transforms for the slot pass through unclamped.
    pub fn set_measured_slot_size(&mut self, index: usize, width: f64, height: f64) {
        self.transforms.set_measured(index, SizeF::new(width, height));
    }

    /// The current transform for a slot.
    pub fn transform(&self, index: usize) -> SlotTransform {
        self.transforms.get(index)
    }

    pub fn reset_slot(&mut self, index: usize) {
        self.transforms.reset(index);
    }

    pub fn reset_all(&mut self) {
        self.transforms.reset_all();
    }

    // ----- gesture routing ----------------------------------------------

    pub fn pointer_down(&mut self, slot: usize, pointer_id: u64, x: f64, y: f64) {
        self.gestures
            .pointer_down(slot, pointer_id, PointerPos::new(x, y), &self.transforms);
    }

    pub fn pointer_move(&mut self, pointer_id: u64, x: f64, y: f64) {
        let image = self.active_slot_image_size();
        self.gestures
            .pointer_move(pointer_id, PointerPos::new(x, y), &mut self.transforms, image);
    }

    pub fn pointer_up(&mut self, pointer_id: u64) {
        self.gestures.pointer_up(pointer_id, &self.transforms);
    }

    pub fn pointer_cancel(&mut self, pointer_id: u64) {
        self.gestures.pointer_cancel(pointer_id, &self.transforms);
    }

    pub fn wheel(&mut self, slot: usize, delta: f64) {
        let image = self.slot_image_size(slot);
        self.gestures.wheel(slot, delta, &mut self.transforms, image);
    }

    // ----- export -------------------------------------------------------

    /// Render the collage at export resolution and encode it as PNG.
    ///
    /// All-or-nothing: any failure aborts without partial output.
    pub fn export(&self) -> Result<Vec<u8>, ExportError> {
        let images: Vec<&DecodedImage> = self.assets.iter().map(|a| &a.image).collect();
        let rendered = render_collage(
            self.output,
            self.layout,
            &images,
            &self.transforms.snapshot(),
            self.background,
        )?;
        let png = encode_png(&rendered.pixels, rendered.width, rendered.height)?;
        Ok(png)
    }

    // ----- internals ----------------------------------------------------

    fn reseed(&mut self) {
        self.transforms
            .reseed(self.layout.slot_count(), self.assets.len());
    }

    fn slot_image_size(&self, slot: usize) -> Option<SizeF> {
        self.assets.get(slot).map(|a| a.size())
    }

    fn active_slot_image_size(&self) -> Option<SizeF> {
        self.gestures
            .active_slot()
            .and_then(|slot| self.slot_image_size(slot))
    }
}
