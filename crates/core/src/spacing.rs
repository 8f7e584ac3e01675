//! Minimum inter-hole spacing enforcement.

use nalgebra::Point3;

use crate::result::AcceptedHole;

/// Returns true when the position keeps at least `min_distance` to every
/// already accepted hole and every reserved position.
///
/// One check covers both pieces: they share the same 2D layout on the cut
/// plane, only the drilling axes differ.
pub(crate) fn satisfies_spacing(
    position: &Point3<f64>,
    accepted: &[AcceptedHole],
    reserved: &[Point3<f64>],
    min_distance: f64,
) -> bool {
    accepted
        .iter()
        .map(|hole| &hole.position)
        .chain(reserved.iter())
        .all(|other| nalgebra::distance(position, other) >= min_distance)
}
