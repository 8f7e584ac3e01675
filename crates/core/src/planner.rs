//! Placement orchestration and public planning API.
//!
//! Drives the full pipeline for one planning run: parameter validation,
//! candidate generation, per-slot repositioning search, spacing
//! enforcement, and assembly of the dual-piece result.

use std::time::Instant;

use nalgebra::Point3;

use crate::adapter::{CutFacePair, Piece, SolidAdapter};
use crate::candidates;
use crate::clearance::clearance_steps;
use crate::error::Result;
use crate::frame::CutPlane;
use crate::result::{AcceptedHole, PlacementResult, SkippedSlot};
use crate::search::{resolve_slot, SlotOutcome};
use crate::spec::HoleSpec;
use crate::validator::PlacementValidator;
use crate::CLEARANCE_STEPS;

/// Plans magnet-hole positions on the cut face of a plane-split solid.
///
/// The planner is the single writer of a run's accumulated state; slots are
/// resolved strictly in request order because each acceptance constrains
/// the spacing check of every later slot. Given deterministic adapter
/// responses, planning is a pure function of its inputs.
pub struct HolePlanner<'a> {
    adapter: &'a dyn SolidAdapter,
    plane: CutPlane,
    reserved: Vec<Point3<f64>>,
}

impl<'a> HolePlanner<'a> {
    /// Creates a planner over the host's solid model and cut plane.
    pub fn new(adapter: &'a dyn SolidAdapter, plane: CutPlane) -> Self {
        Self {
            adapter,
            plane,
            reserved: Vec::new(),
        }
    }

    /// Seeds positions that take part in spacing enforcement without being
    /// planned, e.g. magnet holes detected in a previously cut body and
    /// projected onto the cut plane via
    /// [`CutPlane::project_axis`](crate::frame::CutPlane::project_axis).
    pub fn with_reserved_positions(mut self, positions: Vec<Point3<f64>>) -> Self {
        self.reserved = positions;
        self
    }

    /// Plans hole positions for both pieces.
    ///
    /// Fatal conditions (malformed [`HoleSpec`], degenerate face) abort with
    /// an error and no partial result. Slots that cannot be filled are
    /// recorded in the result's skip list; a result with zero accepted holes
    /// is returned as-is for the caller to act on.
    pub fn plan(&self, faces: &CutFacePair, spec: &HoleSpec) -> Result<PlacementResult> {
        let start = Instant::now();

        spec.validate()?;
        let ladder = clearance_steps(
            spec.preferred_clearance,
            spec.minimum_clearance,
            CLEARANCE_STEPS,
        )?;

        let face = faces.planning_face();
        let candidates = candidates::generate(face, spec)?;
        let segment_length = face.perimeter() / spec.requested_count as f64;

        log::debug!(
            "planning {} holes on a face with perimeter {:.2}, segment {:.2}",
            spec.requested_count,
            face.perimeter(),
            segment_length
        );

        let mut validator = PlacementValidator::new(self.adapter, &self.plane, spec);
        let mut result = PlacementResult::new();

        for candidate in &candidates {
            let outcome = resolve_slot(
                candidate,
                face,
                spec,
                &ladder,
                segment_length,
                &self.plane,
                &mut validator,
                &result.bottom,
                &self.reserved,
            );

            match outcome {
                SlotOutcome::Accepted {
                    point,
                    clearance,
                    repositioned,
                } => {
                    let position = self.plane.to_world(point);
                    log::debug!(
                        "slot {}: accepted at ({:.2}, {:.2}) with clearance {:.3}{}",
                        candidate.slot,
                        point.0,
                        point.1,
                        clearance,
                        if repositioned { " (repositioned)" } else { "" }
                    );
                    for piece in Piece::BOTH {
                        let hole = AcceptedHole {
                            slot: candidate.slot,
                            position,
                            axis: self.plane.hole_axis(piece),
                            clearance_used: clearance,
                            repositioned,
                        };
                        match piece {
                            Piece::Bottom => result.bottom.push(hole),
                            Piece::Top => result.top.push(hole),
                        }
                    }
                }
                SlotOutcome::Skipped(reason) => {
                    log::warn!("slot {}: skipped ({reason:?})", candidate.slot);
                    result.skipped.push(SkippedSlot {
                        slot: candidate.slot,
                        reason,
                    });
                }
            }
        }

        if result.no_valid_holes() {
            log::warn!(
                "no valid hole positions found for {} requested holes",
                spec.requested_count
            );
        }

        result.computation_time_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}
