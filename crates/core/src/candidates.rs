//! Even perimeter distribution of candidate hole positions.

use crate::error::{Error, Result};
use crate::face::CutFaceGeometry;
use crate::spec::HoleSpec;

/// Upper bound on inset-growth attempts when the naive inset point lands in
/// or too close to an interior hole.
const MAX_INSET_GROWTH_STEPS: usize = 8;

/// A candidate hole position on the planning face.
///
/// Candidates carry their arc-length parameter and slot index so the
/// repositioning search can derive nearby alternatives deterministically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePosition {
    /// Index into the requested even distribution.
    pub slot: usize,

    /// Arc-length parameter of the perimeter sample this candidate was
    /// inset from.
    pub arc_length: f64,

    /// Candidate hole center in the cut plane's local frame.
    pub point: (f64, f64),

    /// Inward unit normal at the perimeter sample.
    pub inward: (f64, f64),

    /// Inset distance actually applied (grows past the base inset when an
    /// interior hole is in the way).
    pub inset: f64,

    /// True when no inset distance cleared the interior holes; such
    /// candidates go straight to the repositioning search.
    pub degenerate: bool,
}

/// Generates one candidate per requested slot, evenly spaced along the outer
/// loop.
///
/// Samples sit at `i * spacing + spacing / 2`: the half-spacing anchor
/// offset keeps the first sample off the loop's start vertex, which is
/// typically a corner. Each sample is inset inward by
/// `preferred_clearance + radius`.
pub fn generate(face: &CutFaceGeometry, spec: &HoleSpec) -> Result<Vec<CandidatePosition>> {
    let perimeter = face.perimeter();
    let count = spec.requested_count;
    let spacing = perimeter / count as f64;
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "cannot distribute {count} holes over perimeter {perimeter}"
        )));
    }

    let inset = spec.inset(spec.preferred_clearance);
    let keepout = inset;

    let candidates = (0..count)
        .map(|slot| {
            let mut s = slot as f64 * spacing + spacing / 2.0;
            if s >= perimeter {
                s -= perimeter;
            }
            resolve(face, slot, s, inset, keepout)
        })
        .collect();

    Ok(candidates)
}

/// Builds a candidate at a given arc length and inset, growing the inset in
/// bounded steps when the point conflicts with an interior hole (or falls
/// outside the face material).
pub(crate) fn resolve(
    face: &CutFaceGeometry,
    slot: usize,
    arc_length: f64,
    inset: f64,
    keepout: f64,
) -> CandidatePosition {
    let sample = face.sample_at(arc_length);

    let place = |distance: f64| {
        (
            sample.point.0 + sample.inward.0 * distance,
            sample.point.1 + sample.inward.1 * distance,
        )
    };

    let naive = place(inset);
    if is_clear(face, naive, keepout) {
        return CandidatePosition {
            slot,
            arc_length,
            point: naive,
            inward: sample.inward,
            inset,
            degenerate: false,
        };
    }

    for step in 1..=MAX_INSET_GROWTH_STEPS {
        let grown = inset + step as f64 * keepout * 0.5;
        let point = place(grown);
        if is_clear(face, point, keepout) {
            log::debug!(
                "slot {slot}: inset grown from {inset:.3} to {grown:.3} to clear interior hole"
            );
            return CandidatePosition {
                slot,
                arc_length,
                point,
                inward: sample.inward,
                inset: grown,
                degenerate: false,
            };
        }
    }

    CandidatePosition {
        slot,
        arc_length,
        point: naive,
        inward: sample.inward,
        inset,
        degenerate: true,
    }
}

/// A candidate point is clear when it sits in the face material and keeps
/// the full keepout distance to every interior hole.
fn is_clear(face: &CutFaceGeometry, point: (f64, f64), keepout: f64) -> bool {
    if !face.contains(point) {
        return false;
    }
    match face.hole_clearance(point) {
        Some(d) => d >= keepout,
        None => true,
    }
}
