//! Permutation-based FDR threshold adjustment
//!
//! Like the Benjamini-Hochberg method, this corrects the rejection
//! threshold rather than the p-values themselves: the observed p-values
//! are ranked, the expected null hit count at each rank is estimated
//! from balanced design permutations, and the most permissive rank
//! whose estimated false discovery proportion stays within the target
//! is converted into a concrete threshold.

mod estimate;
mod threshold;

pub use estimate::{count_hits, fdp_curve};
pub use threshold::select_threshold;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::{Design, IntensityMatrix};
use crate::error::{PermFdrError, Result};
use crate::permutation::{null_pvalue_table, observed_pvalues, sorted_ascending};
use crate::testing::{StudentT, TwoSampleTest};

/// Tuning parameters for a permutation-FDR run
#[derive(Debug, Clone)]
pub struct FdrParams {
    /// Number of permutation trials
    pub n_perms: usize,
    /// Master seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
}

impl Default for FdrParams {
    fn default() -> Self {
        Self {
            n_perms: 1000,
            seed: None,
        }
    }
}

/// Adjusted p-value rejection threshold for the target FDR, using the
/// pooled two-sample t-test oracle
///
/// `exp_ps` may be empty, in which case the observed p-values are
/// computed from the intensity table and the real design (one test per
/// feature). Re-invocation produces a statistically similar but not
/// bit-identical threshold unless `params.seed` is set.
pub fn adjust_fdr_threshold(
    exp_ps: &[f64],
    target: f64,
    design: &Design,
    intensities: &IntensityMatrix,
    params: &FdrParams,
) -> Result<f64> {
    adjust_fdr_threshold_with(&StudentT, exp_ps, target, design, intensities, params)
}

/// Adjusted threshold with a caller-supplied test oracle
pub fn adjust_fdr_threshold_with<T: TwoSampleTest + Sync>(
    test: &T,
    exp_ps: &[f64],
    target: f64,
    design: &Design,
    intensities: &IntensityMatrix,
    params: &FdrParams,
) -> Result<f64> {
    validate_run(exp_ps, design, intensities, params)?;

    let observed = if exp_ps.is_empty() {
        observed_pvalues(test, intensities, design)?
    } else {
        if exp_ps.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
            log::warn!("supplied observed p-values fall outside [0, 1]");
        }
        exp_ps.to_vec()
    };
    let observed = sorted_ascending(&observed);

    let mut master_rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let nulls = null_pvalue_table(
        test,
        intensities,
        design.n_control(),
        design.n_treatment(),
        params.n_perms,
        &mut master_rng,
    )?;

    let fdp = fdp_curve(&observed, &nulls);
    log::debug!(
        "estimated FDP range [{:.4}, {:.4}] over {} ranks",
        fdp.iter().cloned().fold(f64::INFINITY, f64::min),
        fdp.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        fdp.len()
    );

    let selected = select_threshold(&observed, &fdp, target)?;
    log::info!(
        "adjusted rejection threshold {:.6} for target FDR {} ({} permutations)",
        selected,
        target,
        params.n_perms
    );
    Ok(selected)
}

/// Wire-form entry point: raw design codes (1 = control,
/// 2 = treatment) and row-major intensity rows, with `nc`/`nt`
/// supplied explicitly and checked against the design
pub fn adjust_fdr_threshold_from_codes(
    exp_ps: &[f64],
    target: f64,
    design_codes: &[u8],
    intensity_rows: &[Vec<f64>],
    n_perms: usize,
    nc: usize,
    nt: usize,
    seed: Option<u64>,
) -> Result<f64> {
    let design = Design::from_codes(design_codes)?;

    if design.len() != nc + nt {
        return Err(PermFdrError::ShapeMismatch {
            reason: format!(
                "design has {} labels but nc + nt = {}",
                design.len(),
                nc + nt
            ),
        });
    }
    if design.n_control() != nc || design.n_treatment() != nt {
        return Err(PermFdrError::ShapeMismatch {
            reason: format!(
                "design holds {} control and {} treatment labels, caller claimed {} and {}",
                design.n_control(),
                design.n_treatment(),
                nc,
                nt
            ),
        });
    }

    let intensities = IntensityMatrix::from_rows(intensity_rows)?;
    let params = FdrParams { n_perms, seed };
    adjust_fdr_threshold(exp_ps, target, &design, &intensities, &params)
}

fn validate_run(
    exp_ps: &[f64],
    design: &Design,
    intensities: &IntensityMatrix,
    params: &FdrParams,
) -> Result<()> {
    if params.n_perms < 1 {
        return Err(PermFdrError::InvalidConfig {
            reason: "n_perms must be at least 1".to_string(),
        });
    }
    if design.n_control() < 1 || design.n_treatment() < 1 {
        return Err(PermFdrError::InvalidConfig {
            reason: format!(
                "design needs at least one unit per condition (got {} control, {} treatment)",
                design.n_control(),
                design.n_treatment()
            ),
        });
    }
    if design.len() != intensities.n_units() {
        return Err(PermFdrError::ShapeMismatch {
            reason: format!(
                "design has {} labels but the intensity matrix has {} units",
                design.len(),
                intensities.n_units()
            ),
        });
    }
    if !exp_ps.is_empty() && exp_ps.len() != intensities.n_features() {
        return Err(PermFdrError::ShapeMismatch {
            reason: format!(
                "{} observed p-values supplied for {} features",
                exp_ps.len(),
                intensities.n_features()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_feature_matrix() -> IntensityMatrix {
        // Feature 0 cleanly separates conditions; feature 1 does not.
        IntensityMatrix::new(array![
            [10.0, 8.0],
            [10.5, 9.1],
            [9.8, 7.6],
            [15.2, 8.3],
            [15.8, 8.9],
            [14.9, 7.9],
        ])
        .unwrap()
    }

    fn two_group_design() -> Design {
        Design::from_codes(&[1, 1, 1, 2, 2, 2]).unwrap()
    }

    #[test]
    fn test_precomputed_pvalues_match_derived() {
        let intensities = two_feature_matrix();
        let design = two_group_design();
        let params = FdrParams {
            n_perms: 50,
            seed: Some(5),
        };

        let observed = observed_pvalues(&StudentT, &intensities, &design).unwrap();
        let from_supplied =
            adjust_fdr_threshold(&observed, 0.1, &design, &intensities, &params).unwrap();
        let from_derived = adjust_fdr_threshold(&[], 0.1, &design, &intensities, &params).unwrap();

        assert_eq!(from_supplied, from_derived);
    }

    #[test]
    fn test_permissive_target_accepts_all() {
        let intensities = two_feature_matrix();
        let design = two_group_design();
        let params = FdrParams {
            n_perms: 50,
            seed: Some(6),
        };

        let observed = observed_pvalues(&StudentT, &intensities, &design).unwrap();
        let max_obs = observed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let t = adjust_fdr_threshold(&[], 1.0, &design, &intensities, &params).unwrap();
        assert!(t >= max_obs);
    }

    #[test]
    fn test_from_codes_wrapper() {
        let rows = vec![
            vec![10.0, 8.0],
            vec![10.5, 9.1],
            vec![9.8, 7.6],
            vec![15.2, 8.3],
            vec![15.8, 8.9],
            vec![14.9, 7.9],
        ];
        let t = adjust_fdr_threshold_from_codes(
            &[],
            0.1,
            &[1, 1, 1, 2, 2, 2],
            &rows,
            100,
            3,
            3,
            Some(7),
        )
        .unwrap();
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn test_from_codes_group_count_mismatch() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let err = adjust_fdr_threshold_from_codes(
            &[],
            0.1,
            &[1, 1, 2, 2],
            &rows,
            10,
            3,
            1,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PermFdrError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_validation_errors() {
        let intensities = two_feature_matrix();
        let design = two_group_design();

        // n_perms < 1
        let err = adjust_fdr_threshold(
            &[],
            0.1,
            &design,
            &intensities,
            &FdrParams {
                n_perms: 0,
                seed: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PermFdrError::InvalidConfig { .. }));

        // single-condition design
        let all_control = Design::from_codes(&[1, 1, 1, 1, 1, 1]).unwrap();
        let err = adjust_fdr_threshold(
            &[],
            0.1,
            &all_control,
            &intensities,
            &FdrParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PermFdrError::InvalidConfig { .. }));

        // design shorter than the unit count
        let short = Design::from_codes(&[1, 1, 2, 2]).unwrap();
        let err =
            adjust_fdr_threshold(&[], 0.1, &short, &intensities, &FdrParams::default()).unwrap_err();
        assert!(matches!(err, PermFdrError::ShapeMismatch { .. }));

        // wrong number of supplied p-values
        let err = adjust_fdr_threshold(
            &[0.5],
            0.1,
            &design,
            &intensities,
            &FdrParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PermFdrError::ShapeMismatch { .. }));
    }
}
