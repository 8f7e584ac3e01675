//! Placement run results.

use nalgebra::{Point3, Unit, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A hole position that passed penetration and spacing validation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcceptedHole {
    /// Index into the originally requested even distribution.
    pub slot: usize,

    /// Hole center on the cut plane, in world coordinates.
    pub position: Point3<f64>,

    /// Drilling axis into the piece (opposite directions for the two
    /// pieces).
    pub axis: Unit<Vector3<f64>>,

    /// Clearance at which validation passed.
    pub clearance_used: f64,

    /// True when the hole was moved or its clearance reduced relative to
    /// the naive even-distribution placement.
    pub repositioned: bool,
}

/// Why a requested slot could not be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipReason {
    /// Every attempted position failed the penetration test.
    PenetratesSurface,
    /// Valid positions existed but all sat too close to accepted holes.
    InsufficientSpacing,
    /// No attempted position was valid (mixed or no failures recorded).
    NoValidPositionFound,
}

/// A requested slot that ended without an accepted hole.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedSlot {
    /// Index of the requested slot.
    pub slot: usize,
    /// Why the slot was skipped.
    pub reason: SkipReason,
}

/// Final output of a planning run.
///
/// The bottom and top sequences always have matching length and matching
/// positions; only the drilling axes are mirrored. A result with zero
/// accepted holes is a valid outcome, not an error — the caller decides
/// whether to proceed without holes.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementResult {
    /// Accepted holes for the bottom piece, in slot order.
    pub bottom: Vec<AcceptedHole>,

    /// Accepted holes for the top piece, in slot order.
    pub top: Vec<AcceptedHole>,

    /// Slots that could not be filled, with reasons.
    pub skipped: Vec<SkippedSlot>,

    /// Wall-clock planning time in milliseconds.
    pub computation_time_ms: u64,
}

impl PlacementResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted hole positions (per piece).
    pub fn accepted_count(&self) -> usize {
        self.bottom.len()
    }

    /// Number of slots that were requested.
    pub fn requested_count(&self) -> usize {
        self.bottom.len() + self.skipped.len()
    }

    /// True when every requested slot was filled.
    pub fn all_placed(&self) -> bool {
        self.skipped.is_empty()
    }

    /// True when not a single requested slot could be filled.
    pub fn no_valid_holes(&self) -> bool {
        self.bottom.is_empty() && !self.skipped.is_empty()
    }

    /// Number of holes that were moved or clearance-reduced.
    pub fn repositioned_count(&self) -> usize {
        self.bottom.iter().filter(|h| h.repositioned).count()
    }

    /// Human-readable summary of the run, in the host's terms.
    pub fn summary(&self, bottom_name: &str, top_name: &str) -> String {
        let mut lines = vec![
            "Cut operation complete:".to_string(),
            format!("  Created: {bottom_name} and {top_name}"),
            format!("  Holes: {} created", self.accepted_count()),
        ];

        let repositioned = self.repositioned_count();
        if repositioned > 0 {
            lines.push(format!(
                "  Repositioned: {repositioned} holes adjusted for clearance"
            ));
        }

        if !self.skipped.is_empty() {
            lines.push(format!(
                "  Skipped: {} holes couldn't be placed safely",
                self.skipped.len()
            ));
        }

        lines.join("\n")
    }
}
