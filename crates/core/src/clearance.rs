//! Clearance fallback ladder.

use crate::error::{Error, Result};

/// Computes the descending ladder of clearance values to attempt.
///
/// The ladder runs from `preferred` down to `minimum` inclusive in `steps`
/// linear increments and is strictly non-increasing; a single-step ladder
/// is just `preferred`. When a candidate fails the penetration test at one
/// clearance, the search retries at the next smaller value before moving
/// the candidate.
pub fn clearance_steps(preferred: f64, minimum: f64, steps: usize) -> Result<Vec<f64>> {
    if minimum > preferred {
        return Err(Error::InvalidParameters(
            "minimum clearance exceeds preferred clearance".into(),
        ));
    }
    if preferred == minimum || steps <= 1 {
        return Ok(vec![preferred]);
    }

    let step_size = (preferred - minimum) / (steps - 1) as f64;
    Ok((0..steps)
        .map(|i| preferred - i as f64 * step_size)
        .collect())
}
