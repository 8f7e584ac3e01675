//! Cut-face boundary geometry in the cut plane's local 2D frame.

use geo::{Area, Centroid, Contains, Coord, EuclideanDistance, LineString, Point, Polygon};

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point sampled on the outer loop, with the unit normal pointing into the
/// face material at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterSample {
    /// Position on the outer loop.
    pub point: (f64, f64),
    /// Unit inward normal of the loop at the sample.
    pub inward: (f64, f64),
}

/// The 2D boundary of a cut face: one outer loop plus optional interior
/// loops for ring/hollow cross-sections.
///
/// Coordinates live in the cut plane's local frame. The outer loop is stored
/// counter-clockwise so that the inward normal of an edge `(dx, dy)` is
/// `(-dy, dx)`. Geometry is immutable once constructed; construction rejects
/// degenerate input.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutFaceGeometry {
    /// Outer boundary vertices (counter-clockwise, not closed).
    exterior: Vec<(f64, f64)>,

    /// Interior hole loops.
    holes: Vec<Vec<(f64, f64)>>,

    /// Cached outer perimeter length.
    #[cfg_attr(feature = "serde", serde(skip))]
    cached_perimeter: Option<f64>,
}

impl CutFaceGeometry {
    /// Builds a face from a set of closed loops.
    ///
    /// The loop with the largest absolute signed area becomes the outer
    /// boundary; every other loop is treated as an interior hole. Loops with
    /// fewer than three vertices are dropped with a warning.
    pub fn from_loops(loops: Vec<Vec<(f64, f64)>>) -> Result<Self> {
        let mut rings: Vec<Vec<(f64, f64)>> = Vec::with_capacity(loops.len());
        for ring in loops {
            if ring.len() < 3 {
                log::warn!("dropping boundary loop with {} vertices", ring.len());
                continue;
            }
            rings.push(ring);
        }

        if rings.is_empty() {
            return Err(Error::DegenerateGeometry(
                "cut face has no usable boundary loop".into(),
            ));
        }

        let outer_idx = rings
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                ring_signed_area(a)
                    .abs()
                    .total_cmp(&ring_signed_area(b).abs())
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut exterior = rings.swap_remove(outer_idx);
        let area = ring_signed_area(&exterior);
        if area.abs() < f64::EPSILON {
            return Err(Error::DegenerateGeometry(
                "outer loop has zero area".into(),
            ));
        }
        // Normalize to counter-clockwise so inward normals are well-defined.
        if area < 0.0 {
            exterior.reverse();
        }

        let perimeter = ring_perimeter(&exterior);
        if perimeter <= f64::EPSILON {
            return Err(Error::DegenerateGeometry(
                "outer loop has zero perimeter".into(),
            ));
        }

        Ok(Self {
            exterior,
            holes: rings,
            cached_perimeter: Some(perimeter),
        })
    }

    /// Builds a circular face approximation with `n` vertices, centered at
    /// the local origin.
    pub fn circle(radius: f64, n: usize) -> Result<Self> {
        let n = n.max(8);
        let step = std::f64::consts::TAU / n as f64;
        let ring: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 * step;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::from_loops(vec![ring])
    }

    /// Returns the outer loop vertices (counter-clockwise).
    pub fn exterior(&self) -> &[(f64, f64)] {
        &self.exterior
    }

    /// Returns the interior hole loops.
    pub fn holes(&self) -> &[Vec<(f64, f64)>] {
        &self.holes
    }

    /// Outer perimeter length.
    pub fn perimeter(&self) -> f64 {
        self.cached_perimeter
            .unwrap_or_else(|| ring_perimeter(&self.exterior))
    }

    /// Material area (outer area minus holes).
    pub fn area(&self) -> f64 {
        self.to_geo_polygon().unsigned_area()
    }

    /// Centroid of the face material.
    pub fn centroid(&self) -> (f64, f64) {
        match self.to_geo_polygon().centroid() {
            Some(c) => (c.x(), c.y()),
            None => (0.0, 0.0),
        }
    }

    /// Returns true if the point lies in the face material (inside the outer
    /// loop and outside every hole).
    pub fn contains(&self, point: (f64, f64)) -> bool {
        self.to_geo_polygon()
            .contains(&Point::new(point.0, point.1))
    }

    /// Distance from a point to the nearest boundary (outer loop or any
    /// hole loop).
    pub fn boundary_clearance(&self, point: (f64, f64)) -> f64 {
        let p = Point::new(point.0, point.1);
        let mut best = p.euclidean_distance(&closed_line_string(&self.exterior));
        for hole in &self.holes {
            best = best.min(p.euclidean_distance(&closed_line_string(hole)));
        }
        best
    }

    /// Distance from a point to the nearest hole loop, or `None` for a face
    /// without holes.
    pub fn hole_clearance(&self, point: (f64, f64)) -> Option<f64> {
        let p = Point::new(point.0, point.1);
        self.holes
            .iter()
            .map(|hole| p.euclidean_distance(&closed_line_string(hole)))
            .min_by(f64::total_cmp)
    }

    /// Returns true if the point lies inside one of the hole loops.
    pub fn inside_hole(&self, point: (f64, f64)) -> bool {
        let p = Point::new(point.0, point.1);
        self.holes
            .iter()
            .any(|hole| ring_polygon(hole).contains(&p))
    }

    /// Samples the outer loop at the given arc length from the loop start.
    ///
    /// The parameter wraps around the perimeter, so any finite value is
    /// valid.
    pub fn sample_at(&self, arc_length: f64) -> PerimeterSample {
        let perimeter = self.perimeter();
        let mut s = arc_length.rem_euclid(perimeter);
        let n = self.exterior.len();

        for i in 0..n {
            let a = self.exterior[i];
            let b = self.exterior[(i + 1) % n];
            let (dx, dy) = (b.0 - a.0, b.1 - a.1);
            let len = (dx * dx + dy * dy).sqrt();
            if len <= f64::EPSILON {
                continue;
            }
            if s <= len {
                let t = s / len;
                return PerimeterSample {
                    point: (a.0 + t * dx, a.1 + t * dy),
                    inward: (-dy / len, dx / len),
                };
            }
            s -= len;
        }

        // Numeric remainder lands exactly on the loop start.
        let a = self.exterior[0];
        let b = self.exterior[1 % n];
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
        PerimeterSample {
            point: a,
            inward: (-dy / len, dx / len),
        }
    }

    /// Converts to a geo crate polygon (outer loop plus holes).
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let exterior = closed_line_string(&self.exterior);
        let holes: Vec<LineString<f64>> =
            self.holes.iter().map(|h| closed_line_string(h)).collect();
        Polygon::new(exterior, holes)
    }
}

fn ring_signed_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = ring[i];
        let (x1, y1) = ring[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    sum / 2.0
}

fn ring_perimeter(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (x0, y0) = ring[i];
            let (x1, y1) = ring[(i + 1) % n];
            ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
        })
        .sum()
}

fn closed_line_string(ring: &[(f64, f64)]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> =
        ring.iter().map(|&(x, y)| Coord { x, y }).collect();
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
    LineString::from(coords)
}

fn ring_polygon(ring: &[(f64, f64)]) -> Polygon<f64> {
    Polygon::new(closed_line_string(ring), Vec::new())
}
