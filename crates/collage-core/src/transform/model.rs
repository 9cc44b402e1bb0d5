//! The mutable store of per-slot transforms.
//!
//! All gesture and wheel handlers mutate transforms exclusively through
//! [`TransformModel::update`], which re-derives the clamp from the current
//! measurement and image dimensions on every call. A transform is never
//! stored unclamped once its slot has a known size.

use crate::geometry::SizeF;
use crate::transform::{clamp_transform, SlotTransform, MAX_ZOOM, MIN_ZOOM};

/// Owns one [`SlotTransform`] per slot index, plus the asynchronously
/// delivered on-screen slot measurements used for clamping.
///
/// Transforms are keyed by slot position, not image identity; when the
/// ordering layer moves an image between slots it calls [`swap`] so the
/// edits travel with the photo.
///
/// [`swap`]: TransformModel::swap
#[derive(Debug, Clone, Default)]
pub struct TransformModel {
    transforms: Vec<SlotTransform>,
    /// Measured on-screen slot sizes, keyed by slot index. `None` until the
    /// layout observer reports a measurement.
    measured: Vec<Option<SizeF>>,
}

impl TransformModel {
    /// Create a model with default transforms for `slot_count` slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            transforms: vec![SlotTransform::default(); slot_count],
            measured: vec![None; slot_count],
        }
    }

    /// Number of transforms currently held.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// The current transform for a slot, default if the index is unknown.
    pub fn get(&self, index: usize) -> SlotTransform {
        self.transforms
            .get(index)
            .copied()
            .unwrap_or_default()
    }

    /// Record an on-screen measurement for a slot. Zero-area measurements
    /// are ignored (the slot has not actually laid out yet).
    pub fn set_measured(&mut self, index: usize, size: SizeF) {
        if !size.is_positive() {
            return;
        }
        if index >= self.measured.len() {
            self.measured.resize(index + 1, None);
            self.transforms.resize(index + 1, SlotTransform::default());
        }
        self.measured[index] = Some(size);
    }

    /// The last reported on-screen size for a slot, if any.
    pub fn measured(&self, index: usize) -> Option<SizeF> {
        self.measured.get(index).copied().flatten()
    }

    /// Clamp a candidate transform for a slot.
    ///
    /// When the slot has a measurement and the image dimensions are known,
    /// this delegates to [`clamp_transform`]. Otherwise clamping is
    /// deferred: the candidate passes through with only its zoom forced
    /// into range, and the pan is re-checked on the next update once a
    /// measurement arrives.
    pub fn clamp(
        &self,
        index: usize,
        candidate: SlotTransform,
        image: Option<SizeF>,
    ) -> SlotTransform {
        match (self.measured(index), image) {
            (Some(slot), Some(image)) if image.is_positive() => {
                clamp_transform(candidate, slot, image)
            }
            _ => SlotTransform {
                zoom: candidate.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
                ..candidate
            },
        }
    }

    /// Apply a mutation to a slot's transform, clamp the result, commit it.
    ///
    /// This is the sole mutation path for gesture, pinch, and wheel input.
    /// `image` is the intrinsic size of the photo occupying the slot, when
    /// known.
    pub fn update<F>(&mut self, index: usize, image: Option<SizeF>, mutate: F)
    where
        F: FnOnce(&mut SlotTransform),
    {
        if index >= self.transforms.len() {
            self.transforms.resize(index + 1, SlotTransform::default());
            self.measured.resize(index + 1, None);
        }
        let mut candidate = self.transforms[index];
        mutate(&mut candidate);
        self.transforms[index] = self.clamp(index, candidate, image);
    }

    /// Restore one slot to cover-fit with no pan.
    pub fn reset(&mut self, index: usize) {
        if let Some(t) = self.transforms.get_mut(index) {
            *t = SlotTransform::default();
        }
    }

    /// Restore every slot to cover-fit with no pan.
    pub fn reset_all(&mut self) {
        for t in &mut self.transforms {
            *t = SlotTransform::default();
        }
    }

    /// Exchange the transforms of two slots.
    ///
    /// Called by the ordering layer when two photos are swapped so each
    /// photo keeps its own crop.
    pub fn swap(&mut self, a: usize, b: usize) {
        let needed = a.max(b) + 1;
        if needed > self.transforms.len() {
            self.transforms.resize(needed, SlotTransform::default());
        }
        self.transforms.swap(a, b);
    }

    /// Move a transform from one slot index to another, shifting the ones
    /// in between. Mirrors a drag-reorder of the photo list.
    pub fn shift(&mut self, from: usize, to: usize) {
        let needed = from.max(to) + 1;
        if needed > self.transforms.len() {
            self.transforms.resize(needed, SlotTransform::default());
        }
        if from < to {
            self.transforms[from..=to].rotate_left(1);
        } else if to < from {
            self.transforms[to..=from].rotate_right(1);
        }
    }

    /// Re-seed after the slot count or image count changes.
    ///
    /// The model keeps `max(slot_count, image_count)` entries: missing
    /// indices are filled with the default transform, and entries beyond
    /// that bound are discarded. Measurements are keyed to the layout, so
    /// they are kept only up to `slot_count`.
    pub fn reseed(&mut self, slot_count: usize, image_count: usize) {
        let keep = slot_count.max(image_count);
        self.transforms.resize(keep, SlotTransform::default());
        self.measured.resize(keep, None);
        // Measurements are tied to the layout's slots; drop any beyond it.
        for m in self.measured.iter_mut().skip(slot_count) {
            *m = None;
        }
    }

    /// Snapshot of all transforms, in slot order.
    pub fn snapshot(&self) -> Vec<SlotTransform> {
        self.transforms.clone()
    }
}
