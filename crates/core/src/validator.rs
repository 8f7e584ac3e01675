//! Dual-piece penetration validation.

use std::collections::HashMap;

use crate::adapter::{Piece, SolidAdapter};
use crate::frame::CutPlane;
use crate::spec::HoleSpec;
use crate::ACCEPTANCE_RATIO;

/// Memo key: exact bit patterns of the candidate position and clearance.
/// Candidates are derived deterministically, so repeated attempts at the
/// same position hit the same bits.
type CacheKey = (u64, u64, u64, Piece);

/// Validates candidate positions against the host solids.
///
/// For each queried piece a test cylinder of radius `hole_radius +
/// clearance` and height `depth + clearance` is checked via the adapter's
/// surface-intersection ratio; a ratio at or above [`ACCEPTANCE_RATIO`]
/// means the hole cannot break through that piece's outer surface.
///
/// Adapter answers are cached for the run: the solids are immutable while a
/// plan is computed, and the repositioning search revisits positions when
/// clearance ladders restart.
pub(crate) struct PlacementValidator<'a> {
    adapter: &'a dyn SolidAdapter,
    plane: &'a CutPlane,
    spec: &'a HoleSpec,
    cache: HashMap<CacheKey, bool>,
}

impl<'a> PlacementValidator<'a> {
    pub(crate) fn new(
        adapter: &'a dyn SolidAdapter,
        plane: &'a CutPlane,
        spec: &'a HoleSpec,
    ) -> Self {
        Self {
            adapter,
            plane,
            spec,
            cache: HashMap::new(),
        }
    }

    /// A candidate is acceptable only when both pieces independently pass at
    /// the same clearance: a hole position exists only if it is safe to
    /// drill on both resulting halves.
    pub(crate) fn passes_both(&mut self, point: (f64, f64), clearance: f64) -> bool {
        Piece::BOTH
            .into_iter()
            .all(|piece| self.passes(piece, point, clearance))
    }

    fn passes(&mut self, piece: Piece, point: (f64, f64), clearance: f64) -> bool {
        let key = (
            point.0.to_bits(),
            point.1.to_bits(),
            clearance.to_bits(),
            piece,
        );
        if let Some(&pass) = self.cache.get(&key) {
            return pass;
        }

        let center = self.plane.to_world(point);
        let axis = self.plane.hole_axis(piece);
        let ratio = self.adapter.surface_intersection_ratio(
            piece,
            &center,
            &axis,
            self.spec.radius() + clearance,
            self.spec.depth + clearance,
        );

        let pass = ratio >= ACCEPTANCE_RATIO;
        self.cache.insert(key, pass);
        pass
    }
}
