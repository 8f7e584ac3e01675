//! Integration tests for magnet-cut-core.

use magnet_cut_core::{
    CutFaceGeometry, CutFacePair, CutPlane, HolePlanner, HoleSpec, Piece, PresetPlane,
    SkipReason, SolidAdapter, ACCEPTANCE_RATIO,
};
use nalgebra::{Point3, Unit, Vector3};

/// An angular region of the face where the outer wall only admits test
/// cylinders up to a radius cap.
struct Sector {
    start_deg: f64,
    end_deg: f64,
    max_radius: f64,
}

/// Analytic stand-in for the host solids: each piece is an extrusion of the
/// cut face, with a configurable thickness per piece and optional thin-wall
/// sectors. A test cylinder is fully contained when it fits within the
/// piece's thickness and its circle keeps its radius to every face
/// boundary.
struct WalledSolid {
    face: CutFaceGeometry,
    plane: CutPlane,
    bottom_thickness: f64,
    top_thickness: f64,
    sectors: Vec<Sector>,
}

impl WalledSolid {
    fn new(face: CutFaceGeometry, plane: CutPlane) -> Self {
        Self {
            face,
            plane,
            bottom_thickness: 100.0,
            top_thickness: 100.0,
            sectors: Vec::new(),
        }
    }
}

impl SolidAdapter for WalledSolid {
    fn surface_intersection_ratio(
        &self,
        piece: Piece,
        center: &Point3<f64>,
        _axis: &Unit<Vector3<f64>>,
        radius: f64,
        height: f64,
    ) -> f64 {
        let thickness = match piece {
            Piece::Bottom => self.bottom_thickness,
            Piece::Top => self.top_thickness,
        };
        if height > thickness {
            return (thickness / height).min(0.9);
        }

        let local = self.plane.to_local(center);
        let angle = local.1.atan2(local.0).to_degrees().rem_euclid(360.0);
        for sector in &self.sectors {
            if angle >= sector.start_deg && angle <= sector.end_deg && radius > sector.max_radius
            {
                return 0.5;
            }
        }

        if !self.face.contains(local) {
            return 0.0;
        }
        // Smooth ratio: grazing contact scores just under 1.0, the way a
        // volumetric intersection of a real solid would.
        let wall = self.face.boundary_clearance(local);
        (wall / radius).min(1.0)
    }
}

fn scenario_spec() -> HoleSpec {
    HoleSpec::new(6.2, 2.5)
        .with_preferred_clearance(2.0)
        .with_minimum_clearance(0.5)
        .with_requested_count(6)
}

fn circle_ring(center: (f64, f64), radius: f64, n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        })
        .collect()
}

mod disk_scenarios {
    use super::*;

    #[test]
    fn test_convex_face_places_all_requested() {
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &spec)
            .unwrap();

        assert_eq!(result.accepted_count(), 6);
        assert!(result.all_placed());

        for hole in &result.bottom {
            // Inset ~5.1mm from the 50mm boundary at the preferred
            // clearance, never repositioned on an open disk.
            let r = (hole.position.x.powi(2) + hole.position.y.powi(2)).sqrt();
            assert!((r - 44.9).abs() < 0.05, "hole radius {r}");
            assert!((hole.clearance_used - 2.0).abs() < 1e-12);
            assert!(!hole.repositioned);
        }

        // Pairwise spacing: adjacent holes are one 52.36mm arc segment
        // apart, a 44.9mm chord — comfortably over the 12.4mm minimum.
        for (i, a) in result.bottom.iter().enumerate() {
            for b in &result.bottom[i + 1..] {
                let d = nalgebra::distance(&a.position, &b.position);
                assert!(d >= spec.min_spacing(), "holes {} apart", d);
            }
        }
        let adjacent = nalgebra::distance(&result.bottom[0].position, &result.bottom[1].position);
        assert!((adjacent - 44.9).abs() < 0.1, "adjacent chord {adjacent}");
    }

    #[test]
    fn test_accepted_holes_reverify_against_adapter() {
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &spec)
            .unwrap();

        for (piece, holes) in [(Piece::Bottom, &result.bottom), (Piece::Top, &result.top)] {
            for hole in holes {
                let ratio = adapter.surface_intersection_ratio(
                    piece,
                    &hole.position,
                    &hole.axis,
                    spec.radius() + hole.clearance_used,
                    spec.depth + hole.clearance_used,
                );
                assert!(
                    ratio >= ACCEPTANCE_RATIO,
                    "accepted hole at slot {} fails re-verification: {ratio}",
                    hole.slot
                );
            }
        }
    }

    #[test]
    fn test_planning_is_deterministic() {
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let faces = CutFacePair::from_shared(face);
        let spec = scenario_spec();

        let planner = HolePlanner::new(&adapter, plane);
        let first = planner.plan(&faces, &spec).unwrap();
        let second = planner.plan(&faces, &spec).unwrap();

        assert_eq!(first.accepted_count(), second.accepted_count());
        assert_eq!(first.skipped.len(), second.skipped.len());
        for (a, b) in first.bottom.iter().zip(&second.bottom) {
            // Bit-for-bit identical positions, no hidden randomness.
            assert_eq!(a.position, b.position);
            assert_eq!(a.clearance_used, b.clearance_used);
        }
    }

    #[test]
    fn test_single_hole_on_minimal_face() {
        // A 5mm disk cannot hold the preferred clearance (test radius
        // 5.1mm) but admits a reduced one.
        let face = CutFaceGeometry::circle(5.0, 360).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let spec = scenario_spec().with_requested_count(1);

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &spec)
            .unwrap();

        assert_eq!(result.accepted_count(), 1);
        assert!(result.all_placed());
        let hole = &result.bottom[0];
        assert!(hole.clearance_used < spec.preferred_clearance);
        assert!(hole.clearance_used >= spec.minimum_clearance);
        assert!(hole.repositioned);
    }

    #[test]
    fn test_too_small_face_returns_empty_result() {
        // The inset overshoots a 2mm disk entirely; every slot is skipped
        // but the run itself succeeds.
        let face = CutFaceGeometry::circle(2.0, 90).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &scenario_spec())
            .unwrap();

        assert!(result.no_valid_holes());
        assert_eq!(result.accepted_count(), 0);
        assert_eq!(result.skipped.len(), 6);
    }
}

mod clearance_fallback {
    use super::*;

    #[test]
    fn test_thin_wall_sectors_fall_back_before_moving() {
        // Slots sit at 30/90/150/210/270/330 degrees. Thin walls around
        // three of them cap the test radius at 4.5mm: the preferred
        // clearance (radius 5.1) fails there, clearance 1.25 (radius 4.35)
        // passes.
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let mut adapter = WalledSolid::new(face.clone(), plane.clone());
        adapter.sectors = vec![
            Sector { start_deg: 80.0, end_deg: 100.0, max_radius: 4.5 },
            Sector { start_deg: 200.0, end_deg: 220.0, max_radius: 4.5 },
            Sector { start_deg: 320.0, end_deg: 340.0, max_radius: 4.5 },
        ];
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &spec)
            .unwrap();

        assert!(result.all_placed(), "skipped: {:?}", result.skipped);

        let mut reduced = 0;
        for hole in &result.bottom {
            let angle = hole
                .position
                .y
                .atan2(hole.position.x)
                .to_degrees()
                .rem_euclid(360.0);
            let in_thin_sector = [90.0, 210.0, 330.0]
                .iter()
                .any(|&s| (angle - s).abs() < 10.0);
            if in_thin_sector {
                // Clearance fallback, not displacement: the hole stayed in
                // its sector at a reduced clearance.
                assert!((hole.clearance_used - 1.25).abs() < 1e-12);
                assert!(hole.repositioned);
                reduced += 1;
            } else {
                assert!((hole.clearance_used - 2.0).abs() < 1e-12);
            }
        }
        assert_eq!(reduced, 3);
    }

    #[test]
    fn test_thin_top_piece_limits_clearance_for_both() {
        // The top piece is only 4mm thick; the test cylinder height
        // (depth + clearance) must fit it even though the bottom piece is
        // unconstrained — dual-piece validation is an AND.
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let mut adapter = WalledSolid::new(face.clone(), plane.clone());
        adapter.top_thickness = 4.0;
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &spec)
            .unwrap();

        assert!(result.all_placed());
        for hole in &result.bottom {
            // Largest ladder value with depth + clearance <= 4.0.
            assert!((hole.clearance_used - 1.25).abs() < 1e-12);
            assert!(spec.depth + hole.clearance_used <= 4.0);
        }
    }
}

mod ring_faces {
    use super::*;

    #[test]
    fn test_ring_face_keeps_cylinders_out_of_inner_hole() {
        let face = CutFaceGeometry::from_loops(vec![
            circle_ring((0.0, 0.0), 50.0, 720),
            circle_ring((0.0, 0.0), 30.0, 360),
        ])
        .unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face.clone()), &spec)
            .unwrap();

        assert_eq!(result.accepted_count(), 6);
        for hole in &result.bottom {
            let local = (hole.position.x, hole.position.y);
            assert!(face.contains(local));
            let test_radius = spec.radius() + hole.clearance_used;
            assert!(
                face.hole_clearance(local).unwrap() >= test_radius,
                "test cylinder reaches into the inner hole"
            );
        }
    }

    #[test]
    fn test_offset_interior_hole_forces_deeper_inset() {
        // An interior hole sits exactly where slot 0's naive inset point
        // would land (30 degrees, just inside the perimeter). Historically
        // this produced holes drilled into the void.
        let angle = std::f64::consts::PI / 6.0;
        let hole_center = (42.0 * angle.cos(), 42.0 * angle.sin());
        let face = CutFaceGeometry::from_loops(vec![
            circle_ring((0.0, 0.0), 50.0, 720),
            circle_ring(hole_center, 5.0, 72),
        ])
        .unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let spec = scenario_spec();

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face.clone()), &spec)
            .unwrap();

        assert_eq!(result.accepted_count(), 6);
        let slot0 = result.bottom.iter().find(|h| h.slot == 0).unwrap();
        assert!(slot0.repositioned);
        let local = (slot0.position.x, slot0.position.y);
        let test_radius = spec.radius() + slot0.clearance_used;
        assert!(face.hole_clearance(local).unwrap() >= test_radius);
    }

    #[test]
    fn test_narrow_annulus_yields_no_holes() {
        // An 8mm wide ring cannot keep 5.1mm to both loops anywhere.
        let face = CutFaceGeometry::from_loops(vec![
            circle_ring((0.0, 0.0), 50.0, 720),
            circle_ring((0.0, 0.0), 42.0, 720),
        ])
        .unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());

        let result = HolePlanner::new(&adapter, plane)
            .plan(&CutFacePair::from_shared(face), &scenario_spec())
            .unwrap();

        assert!(result.no_valid_holes());
    }
}

mod frames_and_reuse {
    use super::*;

    #[test]
    fn test_arbitrary_plane_holes_lie_on_plane_with_mirrored_axes() {
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane =
            CutPlane::from_point_normal(Point3::new(3.0, -1.0, 7.0), Vector3::new(1.0, 2.0, 2.0))
                .unwrap();
        let adapter = WalledSolid::new(face.clone(), plane.clone());

        let result = HolePlanner::new(&adapter, plane.clone())
            .plan(&CutFacePair::from_shared(face), &scenario_spec())
            .unwrap();

        assert_eq!(result.accepted_count(), 6);
        for (bottom, top) in result.bottom.iter().zip(&result.top) {
            assert_eq!(bottom.position, top.position);
            let off_plane =
                (bottom.position - plane.origin()).dot(plane.normal().as_ref());
            assert!(off_plane.abs() < 1e-9);
            assert!((bottom.axis.dot(top.axis.as_ref()) + 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_existing_hole_reserves_its_spot() {
        let face = CutFaceGeometry::circle(50.0, 720).unwrap();
        let plane = CutPlane::preset(PresetPlane::Xy, 0.0);
        let adapter = WalledSolid::new(face.clone(), plane.clone());
        let faces = CutFacePair::from_shared(face);
        let spec = scenario_spec();

        let baseline = HolePlanner::new(&adapter, plane.clone())
            .plan(&faces, &spec)
            .unwrap();
        let slot0 = baseline.bottom[0].position;

        // An existing magnet hole detected above the plane, drilled along
        // -Z through slot 0's location.
        let existing_center = Point3::new(slot0.x, slot0.y, 10.0);
        let reserved = plane
            .project_axis(&existing_center, &Vector3::new(0.0, 0.0, -1.0))
            .unwrap();
        assert!(nalgebra::distance(&reserved, &slot0) < 1e-9);

        let result = HolePlanner::new(&adapter, plane)
            .with_reserved_positions(vec![reserved])
            .plan(&faces, &spec)
            .unwrap();

        // Slot 0 cannot be filled near the reserved spot; every planned
        // hole keeps the minimum spacing to it.
        for hole in &result.bottom {
            assert!(nalgebra::distance(&hole.position, &reserved) >= spec.min_spacing() - 1e-9);
        }
        assert!(result
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::InsufficientSpacing));
    }
}
