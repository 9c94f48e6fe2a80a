//! Rejection threshold selection from the FDP curve

use crate::error::{PermFdrError, Result};

/// Convert the FDP curve into a concrete rejection threshold
///
/// Picks the highest rank whose estimated FDP stays at or below
/// `target` and returns a threshold separating the accepted ranks from
/// the rejected ones:
/// - no rank qualifies: half the smallest observed p-value, rejecting
///   nothing;
/// - every rank qualifies: the largest observed p-value plus 0.05 when
///   that stays within 1, otherwise halfway between it and 1 --
///   accepting everything;
/// - otherwise: the midpoint between the last accepted and first
///   rejected observed p-value, so exactly the qualifying prefix falls
///   at or below the returned threshold.
pub fn select_threshold(sorted_obs: &[f64], fdp: &[f64], target: f64) -> Result<f64> {
    if sorted_obs.is_empty() {
        return Err(PermFdrError::EmptyData {
            reason: "cannot select a threshold from an empty p-value list".to_string(),
        });
    }
    if fdp.len() != sorted_obs.len() {
        return Err(PermFdrError::ShapeMismatch {
            reason: format!(
                "FDP curve has {} entries for {} observed p-values",
                fdp.len(),
                sorted_obs.len()
            ),
        });
    }

    let best = fdp.iter().rposition(|&v| v <= target);

    match best {
        None => Ok(sorted_obs[0] / 2.0),
        Some(i) if i == sorted_obs.len() - 1 => {
            let worst = sorted_obs[i];
            if worst + 0.05 <= 1.0 {
                Ok(worst + 0.05)
            } else {
                Ok((worst + 1.0) / 2.0)
            }
        }
        Some(i) => Ok((sorted_obs[i] + sorted_obs[i + 1]) / 2.0),
    }
}
