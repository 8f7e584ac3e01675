//! Per-slot repositioning search.
//!
//! When a slot's naive candidate fails validation, the search walks a
//! bounded, deterministic sequence of retries: the clearance ladder at the
//! original position first, then nearby positions (perimeter displacements,
//! then deeper insets), each with its own ladder pass. Every branch is
//! bounded, so the machine always reaches a terminal state.

use nalgebra::Point3;

use crate::candidates::{self, CandidatePosition};
use crate::face::CutFaceGeometry;
use crate::frame::CutPlane;
use crate::result::{AcceptedHole, SkipReason};
use crate::spacing::satisfies_spacing;
use crate::spec::HoleSpec;
use crate::validator::PlacementValidator;

/// Perimeter displacement fractions of one slot segment, in attempt order.
/// Each fraction is tried forward along the loop before backward.
const PERIMETER_OFFSET_FRACTIONS: [f64; 4] = [0.05, 0.10, 0.15, 0.20];

/// Deeper-inset multipliers tried after the perimeter displacements.
const INSET_MULTIPLIERS: [f64; 2] = [1.5, 2.0];

/// Terminal outcome of resolving one slot.
#[derive(Debug)]
pub(crate) enum SlotOutcome {
    Accepted {
        point: (f64, f64),
        clearance: f64,
        repositioned: bool,
    },
    Skipped(SkipReason),
}

enum SearchPhase {
    TryOriginal,
    /// Next ladder index to try at the original position.
    TryClearanceFallback(usize),
    /// Next alternate position index.
    TryNearbyPositions(usize),
}

enum AttemptFailure {
    Penetration,
    Spacing,
}

struct SlotContext<'a, 'b> {
    spec: &'a HoleSpec,
    plane: &'a CutPlane,
    validator: &'a mut PlacementValidator<'b>,
    accepted: &'a [AcceptedHole],
    reserved: &'a [Point3<f64>],
    penetrations: usize,
    spacing_rejections: usize,
}

impl SlotContext<'_, '_> {
    /// One validation attempt: penetration on both pieces, then spacing
    /// against the accumulated state. Failures are tallied for the final
    /// skip reason.
    fn attempt(&mut self, point: (f64, f64), clearance: f64) -> Result<(), AttemptFailure> {
        if !self.validator.passes_both(point, clearance) {
            self.penetrations += 1;
            return Err(AttemptFailure::Penetration);
        }

        let position = self.plane.to_world(point);
        if !satisfies_spacing(
            &position,
            self.accepted,
            self.reserved,
            self.spec.min_spacing(),
        ) {
            self.spacing_rejections += 1;
            return Err(AttemptFailure::Spacing);
        }

        Ok(())
    }

    fn skip_reason(&self) -> SkipReason {
        match (self.penetrations, self.spacing_rejections) {
            (p, 0) if p > 0 => SkipReason::PenetratesSurface,
            (0, s) if s > 0 => SkipReason::InsufficientSpacing,
            _ => SkipReason::NoValidPositionFound,
        }
    }
}

/// Resolves one slot to an accepted position or a skip.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_slot(
    candidate: &CandidatePosition,
    face: &CutFaceGeometry,
    spec: &HoleSpec,
    ladder: &[f64],
    segment_length: f64,
    plane: &CutPlane,
    validator: &mut PlacementValidator<'_>,
    accepted: &[AcceptedHole],
    reserved: &[Point3<f64>],
) -> SlotOutcome {
    let mut ctx = SlotContext {
        spec,
        plane,
        validator,
        accepted,
        reserved,
        penetrations: 0,
        spacing_rejections: 0,
    };

    let base_inset = spec.inset(spec.preferred_clearance);
    let alternates = nearby_alternates(candidate, face, spec, segment_length);

    // Degenerate candidates never produced a usable inset point; they start
    // directly at the nearby-position phase.
    let mut phase = if candidate.degenerate {
        SearchPhase::TryNearbyPositions(0)
    } else {
        SearchPhase::TryOriginal
    };

    loop {
        match phase {
            SearchPhase::TryOriginal => match ctx.attempt(candidate.point, ladder[0]) {
                Ok(()) => {
                    return SlotOutcome::Accepted {
                        point: candidate.point,
                        clearance: ladder[0],
                        repositioned: candidate.inset > base_inset,
                    };
                }
                Err(_) => phase = SearchPhase::TryClearanceFallback(1),
            },

            SearchPhase::TryClearanceFallback(step) => {
                if step >= ladder.len() {
                    phase = SearchPhase::TryNearbyPositions(0);
                    continue;
                }
                match ctx.attempt(candidate.point, ladder[step]) {
                    Ok(()) => {
                        return SlotOutcome::Accepted {
                            point: candidate.point,
                            clearance: ladder[step],
                            repositioned: true,
                        };
                    }
                    Err(_) => phase = SearchPhase::TryClearanceFallback(step + 1),
                }
            }

            SearchPhase::TryNearbyPositions(index) => {
                let Some(alternate) = alternates.get(index) else {
                    return SlotOutcome::Skipped(ctx.skip_reason());
                };
                for &clearance in ladder {
                    if ctx.attempt(alternate.point, clearance).is_ok() {
                        return SlotOutcome::Accepted {
                            point: alternate.point,
                            clearance,
                            repositioned: true,
                        };
                    }
                }
                phase = SearchPhase::TryNearbyPositions(index + 1);
            }
        }
    }
}

/// Alternate positions near the original candidate, in increasing distance
/// from it: perimeter offsets (forward before backward at each magnitude),
/// then deeper insets at the original arc position. Alternates whose inset
/// cannot clear the face are dropped.
fn nearby_alternates(
    candidate: &CandidatePosition,
    face: &CutFaceGeometry,
    spec: &HoleSpec,
    segment_length: f64,
) -> Vec<CandidatePosition> {
    let base_inset = spec.inset(spec.preferred_clearance);
    let keepout = base_inset;
    let mut alternates = Vec::new();

    for fraction in PERIMETER_OFFSET_FRACTIONS {
        for sign in [1.0, -1.0] {
            let arc = candidate.arc_length + sign * fraction * segment_length;
            let alternate = candidates::resolve(face, candidate.slot, arc, base_inset, keepout);
            if !alternate.degenerate {
                alternates.push(alternate);
            }
        }
    }

    for multiplier in INSET_MULTIPLIERS {
        let alternate = candidates::resolve(
            face,
            candidate.slot,
            candidate.arc_length,
            base_inset * multiplier,
            keepout,
        );
        if !alternate.degenerate {
            alternates.push(alternate);
        }
    }

    alternates
}
