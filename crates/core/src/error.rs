//! Error types for hole placement planning.

use thiserror::Error;

/// Errors that abort a planning run before any holes are placed.
///
/// Per-slot placement failures are not errors; they are recorded as
/// [`SkippedSlot`](crate::result::SkippedSlot) entries in the result and the
/// run continues with the next slot.
#[derive(Debug, Error)]
pub enum Error {
    /// The hole specification or a derived parameter is malformed.
    #[error("invalid hole parameters: {0}")]
    InvalidParameters(String),

    /// The cut face cannot support placement at all (zero area, too few
    /// vertices, unsampleable perimeter).
    #[error("degenerate cut face geometry: {0}")]
    DegenerateGeometry(String),
}

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, Error>;
