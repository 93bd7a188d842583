//! Non-overlapping placement for cloud words
//!
//! Greedy randomized search: propose a random top-left corner, accept the
//! first box that clears the reserved target zone and every live word. Under
//! crowding this simply fails and the spawn is skipped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Axis-aligned box in play-area percentage units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner (left, top)
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict intersection test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no free spot found after {0} attempts")]
    Exhausted(u32),
}

/// Placement parameters for one play area
#[derive(Debug, Clone)]
pub struct PlacementSolver {
    pub area: Vec2,
    pub word_size: Vec2,
    /// Always kept clear for the target word display
    pub reserved: Rect,
    pub max_attempts: u32,
}

impl Default for PlacementSolver {
    fn default() -> Self {
        let area = Vec2::splat(PLAY_AREA);
        Self {
            area,
            word_size: Vec2::new(WORD_BOX_WIDTH, WORD_BOX_HEIGHT),
            reserved: Rect::centered(
                area / 2.0,
                Vec2::new(TARGET_ZONE_WIDTH, TARGET_ZONE_HEIGHT),
            ),
            max_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

impl PlacementSolver {
    /// Find a box for a new word that overlaps neither the reserved zone nor `existing`
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        existing: &[Rect],
    ) -> Result<Rect, PlacementError> {
        let free = self.area - self.word_size;
        // A box larger than the area can never be placed inside it
        if free.x < 0.0 || free.y < 0.0 {
            return Err(PlacementError::Exhausted(0));
        }

        for _ in 0..self.max_attempts {
            let left = rng.random::<f32>() * free.x;
            let top = rng.random::<f32>() * free.y;
            let candidate = Rect {
                min: Vec2::new(left, top),
                size: self.word_size,
            };

            if candidate.overlaps(&self.reserved) {
                continue;
            }
            if existing.iter().any(|r| candidate.overlaps(r)) {
                continue;
            }
            return Ok(candidate);
        }

        Err(PlacementError::Exhausted(self.max_attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching_right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let touching_below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let inside = Rect::new(2.0, 2.0, 2.0, 2.0);
        let apart = Rect::new(30.0, 30.0, 5.0, 5.0);

        assert!(!a.overlaps(&touching_right));
        assert!(!a.overlaps(&touching_below));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_reserved_zone_is_centered() {
        let solver = PlacementSolver::default();
        assert_eq!(solver.reserved.min, Vec2::new(30.0, 40.0));
        assert_eq!(solver.reserved.max(), Vec2::new(70.0, 60.0));
    }

    #[test]
    fn test_place_in_empty_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        let solver = PlacementSolver::default();
        let rect = solver.place(&mut rng, &[]).unwrap();
        assert!(!rect.overlaps(&solver.reserved));
        assert!(rect.min.x >= 0.0 && rect.max().x <= 100.0);
        assert!(rect.min.y >= 0.0 && rect.max().y <= 100.0);
    }

    #[test]
    fn test_oversized_box_fails() {
        let mut rng = Pcg32::seed_from_u64(1);
        let solver = PlacementSolver {
            word_size: Vec2::new(120.0, 8.0),
            ..Default::default()
        };
        assert!(solver.place(&mut rng, &[]).is_err());
    }

    #[test]
    fn test_full_area_box_fails() {
        // A box as big as the area always covers the reserved zone
        let mut rng = Pcg32::seed_from_u64(1);
        let solver = PlacementSolver {
            word_size: Vec2::splat(100.0),
            ..Default::default()
        };
        assert_eq!(
            solver.place(&mut rng, &[]),
            Err(PlacementError::Exhausted(PLACEMENT_ATTEMPTS))
        );
    }

    #[test]
    fn test_crowded_area_fails() {
        let mut rng = Pcg32::seed_from_u64(3);
        let solver = PlacementSolver::default();
        let everything = [Rect::new(0.0, 0.0, 100.0, 100.0)];
        assert!(solver.place(&mut rng, &everything).is_err());
    }

    proptest! {
        #[test]
        fn prop_never_overlaps(seed in any::<u64>(), boxes in prop::collection::vec((0.0f32..85.0, 0.0f32..92.0), 0..12)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let solver = PlacementSolver::default();
            let existing: Vec<Rect> = boxes
                .iter()
                .map(|&(l, t)| Rect::new(l, t, WORD_BOX_WIDTH, WORD_BOX_HEIGHT))
                .collect();

            if let Ok(rect) = solver.place(&mut rng, &existing) {
                prop_assert!(!rect.overlaps(&solver.reserved));
                for other in &existing {
                    prop_assert!(!rect.overlaps(other));
                }
                prop_assert!(rect.min.x >= 0.0 && rect.max().x <= 100.0 + f32::EPSILON * 100.0);
                prop_assert!(rect.min.y >= 0.0 && rect.max().y <= 100.0 + f32::EPSILON * 100.0);
            }
        }
    }
}
