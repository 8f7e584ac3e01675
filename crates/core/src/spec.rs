//! Hole specification and entry validation.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters describing the magnet holes to place on a cut face.
///
/// All lengths are in the same units as the face geometry (millimetres for
/// typical CAD input). The specification is validated once when a planning
/// run starts and is immutable for the duration of the run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HoleSpec {
    /// Hole diameter.
    pub diameter: f64,

    /// Hole depth, measured from the cut face into each piece.
    pub depth: f64,

    /// Clearance to aim for between a hole wall and the outer surface.
    pub preferred_clearance: f64,

    /// Smallest clearance that is still acceptable when the preferred value
    /// cannot be met.
    pub minimum_clearance: f64,

    /// Number of holes to distribute around the face perimeter.
    pub requested_count: usize,
}

impl HoleSpec {
    /// Creates a specification with the given diameter and depth and the
    /// default clearances and count.
    pub fn new(diameter: f64, depth: f64) -> Self {
        Self {
            diameter,
            depth,
            preferred_clearance: 2.0,
            minimum_clearance: 0.5,
            requested_count: 6,
        }
    }

    /// Sets the preferred clearance.
    pub fn with_preferred_clearance(mut self, clearance: f64) -> Self {
        self.preferred_clearance = clearance;
        self
    }

    /// Sets the minimum clearance.
    pub fn with_minimum_clearance(mut self, clearance: f64) -> Self {
        self.minimum_clearance = clearance;
        self
    }

    /// Sets the number of holes to place.
    pub fn with_requested_count(mut self, count: usize) -> Self {
        self.requested_count = count;
        self
    }

    /// Hole radius.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Distance candidates are inset from the perimeter: the hole edge sits
    /// at the given clearance from the face boundary.
    pub fn inset(&self, clearance: f64) -> f64 {
        clearance + self.radius()
    }

    /// Minimum allowed distance between two accepted hole centers.
    pub fn min_spacing(&self) -> f64 {
        crate::SPACING_FACTOR * self.diameter
    }

    /// Validates the specification, collecting every violation into a single
    /// [`Error::InvalidParameters`].
    ///
    /// Legal but suspicious values (sub-half-millimetre holes, very large
    /// counts) are logged as warnings rather than rejected.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.diameter <= 0.0 {
            errors.push("hole diameter must be positive");
        } else if self.diameter < 0.5 {
            log::warn!("hole diameter {} is very small (< 0.5mm)", self.diameter);
        }

        if self.depth <= 0.0 {
            errors.push("hole depth must be positive");
        } else if self.depth < 0.5 {
            log::warn!("hole depth {} is very small (< 0.5mm)", self.depth);
        }

        if self.requested_count == 0 {
            errors.push("hole count must be at least 1");
        } else if self.requested_count > 100 {
            log::warn!(
                "hole count {} is very large (> 100)",
                self.requested_count
            );
        }

        if self.minimum_clearance < 0.0 {
            errors.push("minimum clearance must not be negative");
        }

        if self.preferred_clearance < self.minimum_clearance {
            errors.push("preferred clearance must be >= minimum clearance");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidParameters(errors.join("; ")))
        }
    }
}
