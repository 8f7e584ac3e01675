//! Interface to the host CAD system's solid geometry.

use nalgebra::{Point3, Unit, Vector3};

use crate::face::CutFaceGeometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two pieces produced by the cut a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    /// The piece on the negative side of the cut-plane normal.
    Bottom,
    /// The piece on the positive side of the cut-plane normal.
    Top,
}

impl Piece {
    /// Both pieces, in validation order.
    pub const BOTH: [Piece; 2] = [Piece::Bottom, Piece::Top];
}

/// Read-only access to the host's solid model of each piece.
///
/// The host owns boolean operations and tessellation; the planner only ever
/// asks one question: how much of a candidate test cylinder lies inside the
/// solid. Implementations must be side-effect free and stable for the
/// duration of a planning run, which lets the planner cache answers per
/// (position, clearance, piece).
pub trait SolidAdapter {
    /// Fraction (0.0 - 1.0) of the test cylinder's volume contained in the
    /// piece's solid. The cylinder is centered at `center` and extends
    /// `height` along `axis` with the given `radius`.
    fn surface_intersection_ratio(
        &self,
        piece: Piece,
        center: &Point3<f64>,
        axis: &Unit<Vector3<f64>>,
        radius: f64,
        height: f64,
    ) -> f64;
}

/// The cut-face boundary of each piece, as extracted by the host.
///
/// Both faces live in the same cut-plane local frame. Candidate positions
/// are generated from the bottom face; by construction the top face shares
/// the same 2D layout, so accepted positions apply to both pieces with
/// mirrored axes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutFacePair {
    /// Cut face of the bottom piece.
    pub bottom: CutFaceGeometry,
    /// Cut face of the top piece.
    pub top: CutFaceGeometry,
}

impl CutFacePair {
    /// Pairs two independently extracted faces.
    pub fn new(bottom: CutFaceGeometry, top: CutFaceGeometry) -> Self {
        Self { bottom, top }
    }

    /// Uses one face for both pieces, for hosts that extract the shared cut
    /// cross-section once.
    pub fn from_shared(face: CutFaceGeometry) -> Self {
        Self {
            bottom: face.clone(),
            top: face,
        }
    }

    /// The face used for candidate generation.
    pub fn planning_face(&self) -> &CutFaceGeometry {
        &self.bottom
    }
}
