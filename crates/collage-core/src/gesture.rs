//! Translation of raw pointer and wheel input into transform updates.
//!
//! The interpreter is a small state machine driven by normalized pointer
//! events delivered by the host:
//!
//! ```text
//! Idle --down--> SingleDrag --down--> PinchZoom
//!                    ^                    |
//!                    +----up (1 left)-----+
//!                    |
//!                  up (0 left) --> Idle
//! ```
//!
//! At most one [`GestureSession`] exists system-wide, bound to a single
//! slot. A pointer-down on a different slot starts a fresh session there;
//! pointers still held on the previous slot become untracked and their
//! later moves and releases are ignored.
//!
//! All resulting transform changes go through [`TransformModel::update`],
//! so nothing the interpreter produces can escape the clamp.

use crate::geometry::SizeF;
use crate::transform::{TransformModel, MAX_ZOOM, MIN_ZOOM};

/// Zoom change applied per wheel event, signed by the scroll direction.
pub const WHEEL_ZOOM_STEP: f64 = 0.08;

/// A pointer position in the slot's device-pixel coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another pointer position.
    fn distance_to(self, other: PointerPos) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Which interaction the active session is currently performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Exactly one pointer down: dragging pans the photo.
    SingleDrag,
    /// Two or more pointers down: the first two drive pinch zoom.
    PinchZoom,
}

/// Ephemeral tracking state for one active interaction on one slot.
///
/// Owned exclusively by the interpreter; created on the first pointer-down
/// over a slot and destroyed when the last tracked pointer lifts.
#[derive(Debug, Clone)]
struct GestureSession {
    slot: usize,
    /// Currently-down pointers with their last known positions, in the
    /// order they went down.
    pointers: Vec<(u64, PointerPos)>,
    /// Pointer distance at pinch start. `None` while the baseline is
    /// unestablished (fewer than two pointers, or the two pointers were
    /// coincident when the pinch began).
    pinch_baseline: Option<f64>,
    /// Zoom at drag/pinch start, the reference for relative pinch scaling.
    baseline_zoom: f64,
}

impl GestureSession {
    fn phase(&self) -> GesturePhase {
        if self.pointers.len() >= 2 {
            GesturePhase::PinchZoom
        } else {
            GesturePhase::SingleDrag
        }
    }

    fn position_of(&self, pointer_id: u64) -> Option<PointerPos> {
        self.pointers
            .iter()
            .find(|(id, _)| *id == pointer_id)
            .map(|(_, pos)| *pos)
    }

    fn record_position(&mut self, pointer_id: u64, pos: PointerPos) {
        if let Some(entry) = self.pointers.iter_mut().find(|(id, _)| *id == pointer_id) {
            entry.1 = pos;
        }
    }

    /// Distance between the two pinch-driving pointers.
    fn pinch_distance(&self) -> Option<f64> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance_to(*b)),
            _ => None,
        }
    }
}

/// Stateful translator of pointer/wheel input into transform updates.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    session: Option<GestureSession>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot the active session is bound to, if any.
    pub fn active_slot(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.slot)
    }

    /// The current phase of the active session, if any.
    pub fn phase(&self) -> Option<GesturePhase> {
        self.session.as_ref().map(|s| s.phase())
    }

    /// Handle a pointer press over a slot.
    ///
    /// Starts a new session when idle or when the press targets a
    /// different slot than the active session; otherwise registers the
    /// pointer with the running session and, at two pointers, establishes
    /// the pinch baseline.
    pub fn pointer_down(
        &mut self,
        slot: usize,
        pointer_id: u64,
        pos: PointerPos,
        model: &TransformModel,
    ) {
        match self.session.as_mut() {
            Some(session) if session.slot == slot => {
                if session.position_of(pointer_id).is_some() {
                    // Duplicate down for a tracked pointer; refresh position.
                    session.record_position(pointer_id, pos);
                } else {
                    session.pointers.push((pointer_id, pos));
                }
                if session.pointers.len() >= 2 {
                    let distance = session.pinch_distance().unwrap_or(0.0);
                    // A zero baseline is invalid; leave it unset so pinch
                    // scaling stays inert until a real distance shows up.
                    session.pinch_baseline = (distance > 0.0).then_some(distance);
                    session.baseline_zoom = model.get(slot).zoom;
                }
            }
            _ => {
                // Idle, or focus switches to a different slot: previous
                // session's pointers become untracked.
                self.session = Some(GestureSession {
                    slot,
                    pointers: vec![(pointer_id, pos)],
                    pinch_baseline: None,
                    baseline_zoom: model.get(slot).zoom,
                });
            }
        }
    }

    /// Handle a pointer move.
    ///
    /// In `SingleDrag` the position delta pans the photo; in `PinchZoom`
    /// the change in pointer distance rescales the zoom relative to the
    /// pinch baseline. Moves for untracked pointers are ignored.
    pub fn pointer_move(
        &mut self,
        pointer_id: u64,
        pos: PointerPos,
        model: &mut TransformModel,
        image: Option<SizeF>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(last) = session.position_of(pointer_id) else {
            return;
        };

        match session.phase() {
            GesturePhase::SingleDrag => {
                let dx = pos.x - last.x;
                let dy = pos.y - last.y;
                session.record_position(pointer_id, pos);

                let slot = session.slot;
                model.update(slot, image, |t| {
                    t.pan_x += dx;
                    t.pan_y += dy;
                });
            }
            GesturePhase::PinchZoom => {
                session.record_position(pointer_id, pos);
                let Some(distance) = session.pinch_distance() else {
                    return;
                };

                let Some(baseline) = session.pinch_baseline else {
                    // Baseline was invalid at pinch start; establish it from
                    // the first non-zero separation.
                    if distance > 0.0 {
                        session.pinch_baseline = Some(distance);
                        session.baseline_zoom = model.get(session.slot).zoom;
                    }
                    return;
                };

                let new_zoom =
                    (session.baseline_zoom * distance / baseline).clamp(MIN_ZOOM, MAX_ZOOM);
                let slot = session.slot;
                // Zoom-only update; the pan is reclamped against the new
                // zoom inside the model.
                model.update(slot, image, |t| t.zoom = new_zoom);
            }
        }
    }

    /// Handle a pointer release.
    ///
    /// Dropping from two pointers to one re-enters `SingleDrag` with a
    /// fresh baseline zoom so a pinch restart has a correct reference;
    /// releasing the last pointer destroys the session.
    pub fn pointer_up(&mut self, pointer_id: u64, model: &TransformModel) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let before = session.pointers.len();
        session.pointers.retain(|(id, _)| *id != pointer_id);
        if session.pointers.len() == before {
            // Untracked pointer (e.g. left over from a previous slot's session).
            return;
        }

        if session.pointers.is_empty() {
            self.session = None;
        } else if session.pointers.len() == 1 {
            session.pinch_baseline = None;
            session.baseline_zoom = model.get(session.slot).zoom;
        }
    }

    /// Handle a pointer cancellation. Same bookkeeping as a release.
    pub fn pointer_cancel(&mut self, pointer_id: u64, model: &TransformModel) {
        self.pointer_up(pointer_id, model);
    }

    /// Handle a wheel event over a slot, independent of pointer gestures.
    ///
    /// Steps the zoom by [`WHEEL_ZOOM_STEP`] in the direction of the
    /// scroll delta. Zero deltas are no-ops.
    pub fn wheel(
        &mut self,
        slot: usize,
        delta: f64,
        model: &mut TransformModel,
        image: Option<SizeF>,
    ) {
        if delta == 0.0 {
            return;
        }
        let step = WHEEL_ZOOM_STEP * delta.signum();
        model.update(slot, image, |t| {
            t.zoom = (t.zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);
        });
    }
}
