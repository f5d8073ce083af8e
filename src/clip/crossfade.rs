//! Cross-fade between two poses, for handing the face from one producer to another.

use super::lerp_into;
use crate::error::{IdleError, Result};

/// Interpolate `steps` frames from `from` toward `to`, with `t = k / steps`.
///
/// The first frame equals `from`; `to` itself is not included, so the next
/// producer's first frame follows the ramp directly. A speech producer
/// typically passes the idle loop's current frame as `from`.
pub fn crossfade(from: &[f32], to: &[f32], steps: usize) -> Result<Vec<Vec<f32>>> {
    if from.len() != to.len() {
        return Err(IdleError::configuration(format!(
            "cannot cross-fade {} channels into {}",
            from.len(),
            to.len()
        )));
    }

    Ok((0..steps)
        .map(|k| {
            let mut frame = vec![0.0; from.len()];
            lerp_into(&mut frame, from, to, k as f32 / steps as f32);
            frame
        })
        .collect())
}
