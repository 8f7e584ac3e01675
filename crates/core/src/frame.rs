//! Cut-plane coordinate frames and 2D/3D mapping.

use nalgebra::{Point3, Unit, Vector3};

use crate::adapter::Piece;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Existing-hole axes more oblique than this (|axis . normal|) are not
/// considered reusable on the cut plane.
const AXIS_ALIGNMENT_CUTOFF: f64 = 0.7;

/// A host-independent preset cutting plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PresetPlane {
    /// The XY plane, normal +Z.
    Xy,
    /// The XZ plane, normal +Y.
    Xz,
    /// The YZ plane, normal +X.
    Yz,
}

/// The cutting plane, with a deterministic in-plane basis used to map the
/// planner's 2D face frame back to world coordinates.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutPlane {
    origin: Point3<f64>,
    normal: Unit<Vector3<f64>>,
    u: Unit<Vector3<f64>>,
    v: Unit<Vector3<f64>>,
}

impl CutPlane {
    /// Builds a plane from a point and a (not necessarily unit) normal.
    ///
    /// The in-plane basis is derived from the world axis least aligned with
    /// the normal, so identical input always yields the identical frame.
    pub fn from_point_normal(origin: Point3<f64>, normal: Vector3<f64>) -> Result<Self> {
        let normal = Unit::try_new(normal, 1e-9).ok_or_else(|| {
            Error::InvalidParameters("cut plane normal must be non-zero".into())
        })?;

        let n = normal.as_ref();
        let reference = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
            Vector3::x()
        } else if n.y.abs() <= n.z.abs() {
            Vector3::y()
        } else {
            Vector3::z()
        };

        let u = Unit::new_normalize(reference.cross(n));
        let v = Unit::new_normalize(n.cross(u.as_ref()));

        Ok(Self {
            origin,
            normal,
            u,
            v,
        })
    }

    /// Builds one of the preset planes, offset along its normal.
    ///
    /// Preset frames use the natural world axes as the in-plane basis
    /// (`u x v = normal`), so local coordinates on the XY preset are world
    /// X/Y unchanged.
    pub fn preset(plane: PresetPlane, offset: f64) -> Self {
        let (origin, normal, u, v) = match plane {
            PresetPlane::Xy => (
                Point3::new(0.0, 0.0, offset),
                Vector3::z(),
                Vector3::x(),
                Vector3::y(),
            ),
            PresetPlane::Xz => (
                Point3::new(0.0, offset, 0.0),
                Vector3::y(),
                Vector3::z(),
                Vector3::x(),
            ),
            PresetPlane::Yz => (
                Point3::new(offset, 0.0, 0.0),
                Vector3::x(),
                Vector3::y(),
                Vector3::z(),
            ),
        };
        Self {
            origin,
            normal: Unit::new_unchecked(normal),
            u: Unit::new_unchecked(u),
            v: Unit::new_unchecked(v),
        }
    }

    /// A point on the plane.
    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    /// The plane's unit normal.
    pub fn normal(&self) -> &Unit<Vector3<f64>> {
        &self.normal
    }

    /// Maps a point in the plane's local 2D frame to world coordinates.
    pub fn to_world(&self, point: (f64, f64)) -> Point3<f64> {
        self.origin + self.u.as_ref() * point.0 + self.v.as_ref() * point.1
    }

    /// Maps a world point into the plane's local 2D frame (dropping the
    /// out-of-plane component).
    pub fn to_local(&self, point: &Point3<f64>) -> (f64, f64) {
        let d = point - self.origin;
        (d.dot(self.u.as_ref()), d.dot(self.v.as_ref()))
    }

    /// Drilling axis for a piece: into the bottom piece the axis opposes the
    /// plane normal, into the top piece it follows it.
    pub fn hole_axis(&self, piece: Piece) -> Unit<Vector3<f64>> {
        match piece {
            Piece::Bottom => Unit::new_unchecked(-self.normal.into_inner()),
            Piece::Top => self.normal,
        }
    }

    /// Intersects the axis line of an existing hole with this plane.
    ///
    /// Returns `None` when the axis is too oblique to the plane normal to be
    /// reused as a magnet-hole position.
    pub fn project_axis(
        &self,
        center: &Point3<f64>,
        axis: &Vector3<f64>,
    ) -> Option<Point3<f64>> {
        let axis = Unit::try_new(*axis, 1e-9)?;
        let n = self.normal.as_ref();

        if axis.dot(n).abs() < AXIS_ALIGNMENT_CUTOFF {
            return None;
        }

        let denom = axis.dot(n);
        if denom.abs() < 1e-3 {
            return None;
        }

        let t = (self.origin - center).dot(n) / denom;
        Some(center + axis.into_inner() * t)
    }
}
