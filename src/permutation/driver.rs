//! Permutation trials over the intensity table

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::data::{Design, IntensityMatrix};
use crate::error::{PermFdrError, Result};
use crate::permutation::balanced_design;
use crate::testing::TwoSampleTest;

/// Sort a p-value list ascending, returning a new vector
pub fn sorted_ascending(pvalues: &[f64]) -> Vec<f64> {
    let mut sorted = pvalues.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// One oracle call per feature over the given design
///
/// Returns p-values in feature order (unsorted).
pub fn observed_pvalues<T: TwoSampleTest>(
    test: &T,
    intensities: &IntensityMatrix,
    design: &Design,
) -> Result<Vec<f64>> {
    (0..intensities.n_features())
        .map(|feature| {
            let measurements: Vec<f64> = intensities.feature(feature).iter().copied().collect();
            let (control, treatment) = design.split(&measurements)?;
            test.p_value(&control, &treatment)
        })
        .collect()
}

/// Null p-value table: one ascending-sorted row per permutation trial
///
/// Each trial draws a fresh balanced design and re-runs the test
/// battery over every feature. Trials run on the rayon pool; each owns
/// a generator seeded from a value drawn off `master_rng` before the
/// fan-out, so results are independent across trials and reproducible
/// for a fixed master seed regardless of scheduling order.
pub fn null_pvalue_table<T, R>(
    test: &T,
    intensities: &IntensityMatrix,
    nc: usize,
    nt: usize,
    n_perms: usize,
    master_rng: &mut R,
) -> Result<Vec<Vec<f64>>>
where
    T: TwoSampleTest + Sync,
    R: Rng,
{
    if n_perms < 1 {
        return Err(PermFdrError::InvalidConfig {
            reason: "n_perms must be at least 1".to_string(),
        });
    }

    log::debug!(
        "running {} permutation trials over {} features ({} control, {} treatment units)",
        n_perms,
        intensities.n_features(),
        nc,
        nt
    );

    let trial_seeds: Vec<u64> = (0..n_perms).map(|_| master_rng.gen()).collect();

    trial_seeds
        .into_par_iter()
        .map(|seed| {
            let mut trial_rng = StdRng::seed_from_u64(seed);
            let design = balanced_design(nc, nt, &mut trial_rng)?;
            let pvalues = observed_pvalues(test, intensities, &design)?;
            Ok(sorted_ascending(&pvalues))
        })
        .collect()
}
