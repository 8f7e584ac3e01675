//! # Magnet-Cut Core
//!
//! Hole-placement planning for splitting a solid object into two pieces
//! with magnet-receiving holes on the shared cut face.
//!
//! The host CAD application performs the boolean cut and drills the holes;
//! this crate plans *where* the holes go. Given the cut-face boundary and a
//! hole specification, it computes an evenly distributed, collision-free
//! set of positions that is guaranteed safe on **both** resulting pieces:
//! no hole may break through the outer surface of either half.
//!
//! ## Components
//!
//! - [`CutFaceGeometry`]: the cut-face boundary loops in the cut plane's
//!   local 2D frame
//! - [`CutPlane`]: plane frame, preset planes, 2D/3D mapping
//! - [`SolidAdapter`]: the host-side penetration query (cylinder vs. solid
//!   intersection ratio)
//! - [`HoleSpec`]: hole diameter, depth, clearances and count
//! - [`HolePlanner`]: the planning entry point, producing a
//!   [`PlacementResult`]
//!
//! ## Placement strategy
//!
//! Candidates are distributed at equal arc-length intervals around the face
//! perimeter, inset by the preferred clearance plus the hole radius. A
//! candidate that fails the penetration test retries down a descending
//! clearance ladder, then at nearby perimeter and deeper-inset positions,
//! before its slot is skipped with a recorded reason. Accepted holes keep
//! at least [`SPACING_FACTOR`] diameters between centers.
//!
//! The whole pipeline is synchronous, single-threaded, and deterministic:
//! identical inputs and adapter responses reproduce identical results.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod adapter;
pub mod candidates;
pub mod clearance;
pub mod error;
pub mod face;
pub mod frame;
pub mod planner;
pub mod result;
pub mod spec;

mod search;
mod spacing;
mod validator;

// Re-exports
pub use adapter::{CutFacePair, Piece, SolidAdapter};
pub use candidates::CandidatePosition;
pub use clearance::clearance_steps;
pub use error::{Error, Result};
pub use face::{CutFaceGeometry, PerimeterSample};
pub use frame::{CutPlane, PresetPlane};
pub use planner::HolePlanner;
pub use result::{AcceptedHole, PlacementResult, SkipReason, SkippedSlot};
pub use spec::HoleSpec;

/// A test cylinder passes the penetration check when at least this fraction
/// of its volume lies inside the piece's solid.
pub const ACCEPTANCE_RATIO: f64 = 0.99;

/// Minimum distance between accepted hole centers, in hole diameters.
pub const SPACING_FACTOR: f64 = 2.0;

/// Number of values on the clearance fallback ladder, preferred to minimum
/// inclusive.
pub const CLEARANCE_STEPS: usize = 5;
