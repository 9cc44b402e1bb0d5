//! The fixed catalog of collage layouts.
//!
//! Each layout is an ordered set of fractional slot rectangles within the
//! unit canvas. The transform model and the rasterizer both address slots
//! by index into this ordering, so the catalog is the single source of
//! truth for slot geometry at any resolution.

use serde::{Deserialize, Serialize};

use crate::geometry::SlotRect;

/// One of the available slot arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    /// A single full-canvas slot.
    #[default]
    Solo,
    /// Two side-by-side vertical halves.
    Split,
    /// Two stacked horizontal halves.
    Stack,
    /// Four equal quadrants.
    Grid,
    /// Three side-by-side vertical thirds.
    Strip,
    /// One large slot on the left, two stacked on the right.
    Hero,
}

const SOLO: [SlotRect; 1] = [SlotRect::new(0.0, 0.0, 1.0, 1.0)];

const SPLIT: [SlotRect; 2] = [
    SlotRect::new(0.0, 0.0, 0.5, 1.0),
    SlotRect::new(0.5, 0.0, 0.5, 1.0),
];

const STACK: [SlotRect; 2] = [
    SlotRect::new(0.0, 0.0, 1.0, 0.5),
    SlotRect::new(0.0, 0.5, 1.0, 0.5),
];

const GRID: [SlotRect; 4] = [
    SlotRect::new(0.0, 0.0, 0.5, 0.5),
    SlotRect::new(0.5, 0.0, 0.5, 0.5),
    SlotRect::new(0.0, 0.5, 0.5, 0.5),
    SlotRect::new(0.5, 0.5, 0.5, 0.5),
];

const THIRD: f64 = 1.0 / 3.0;

const STRIP: [SlotRect; 3] = [
    SlotRect::new(0.0, 0.0, THIRD, 1.0),
    SlotRect::new(THIRD, 0.0, THIRD, 1.0),
    SlotRect::new(2.0 * THIRD, 0.0, THIRD, 1.0),
];

const HERO: [SlotRect; 3] = [
    SlotRect::new(0.0, 0.0, 2.0 * THIRD, 1.0),
    SlotRect::new(2.0 * THIRD, 0.0, THIRD, 0.5),
    SlotRect::new(2.0 * THIRD, 0.5, THIRD, 0.5),
];

impl LayoutKind {
    /// Every available layout, in presentation order.
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Solo,
        LayoutKind::Split,
        LayoutKind::Stack,
        LayoutKind::Grid,
        LayoutKind::Strip,
        LayoutKind::Hero,
    ];

    /// The layout's ordered slot rectangles.
    pub fn slots(self) -> &'static [SlotRect] {
        match self {
            LayoutKind::Solo => &SOLO,
            LayoutKind::Split => &SPLIT,
            LayoutKind::Stack => &STACK,
            LayoutKind::Grid => &GRID,
            LayoutKind::Strip => &STRIP,
            LayoutKind::Hero => &HERO,
        }
    }

    /// Number of slots in this layout.
    pub fn slot_count(self) -> usize {
        self.slots().len()
    }

    /// Human-readable name for pickers.
    pub fn display_name(self) -> &'static str {
        match self {
            LayoutKind::Solo => "Solo",
            LayoutKind::Split => "Split",
            LayoutKind::Stack => "Stack",
            LayoutKind::Grid => "Grid",
            LayoutKind::Strip => "Strip",
            LayoutKind::Hero => "Hero",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_counts() {
        assert_eq!(LayoutKind::Solo.slot_count(), 1);
        assert_eq!(LayoutKind::Split.slot_count(), 2);
        assert_eq!(LayoutKind::Stack.slot_count(), 2);
        assert_eq!(LayoutKind::Grid.slot_count(), 4);
        assert_eq!(LayoutKind::Strip.slot_count(), 3);
        assert_eq!(LayoutKind::Hero.slot_count(), 3);
    }

    #[test]
    fn test_all_slots_within_unit_square() {
        for layout in LayoutKind::ALL {
            for slot in layout.slots() {
                assert!(
                    slot.is_within_unit_square(),
                    "{:?} has a slot outside the unit square: {:?}",
                    layout,
                    slot
                );
            }
        }
    }

    #[test]
    fn test_hero_left_slot_is_dominant() {
        let slots = LayoutKind::Hero.slots();
        let area = |s: &crate::geometry::SlotRect| s.width * s.height;
        assert!(area(&slots[0]) > area(&slots[1]));
        assert!(area(&slots[0]) > area(&slots[2]));
    }

    #[test]
    fn test_display_names_unique() {
        let mut names: Vec<&str> = LayoutKind::ALL
            .iter()
            .map(|l| l.display_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LayoutKind::ALL.len());
    }

    #[test]
    fn test_grid_tiles_exactly() {
        let total: f64 = LayoutKind::Grid
            .slots()
            .iter()
            .map(|s| s.width * s.height)
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
