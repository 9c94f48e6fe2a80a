//! permfdr: permutation-calibrated FDR thresholds in Rust
//!
//! Controls the false discovery rate of many simultaneous two-sample
//! tests (one t-test per measured feature across control/treatment
//! units) by adjusting the p-value *rejection threshold* rather than
//! the p-values themselves. The threshold is calibrated against a
//! permutation null built by re-running the test battery under
//! balanced random relabelings of the experimental design.
//!
//! # Example
//!
//! ```ignore
//! use permfdr::prelude::*;
//!
//! // Load data
//! let loaded = read_intensities("intensities.csv")?;
//! let design = read_design("design.csv", &loaded.unit_ids)?;
//!
//! // Calibrate the rejection threshold at 5% FDR
//! let params = FdrParams { n_perms: 1000, seed: Some(42) };
//! let threshold = adjust_fdr_threshold(&[], 0.05, &design, &loaded.matrix, &params)?;
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod fdr;
pub mod io;
pub mod permutation;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{Condition, Design, IntensityMatrix};
    pub use crate::error::{PermFdrError, Result};
    pub use crate::fdr::{
        adjust_fdr_threshold, adjust_fdr_threshold_from_codes, adjust_fdr_threshold_with,
        count_hits, fdp_curve, select_threshold, FdrParams,
    };
    pub use crate::io::{read_design, read_intensities, write_pvalues, AdjustSummary};
    pub use crate::permutation::{
        balanced_design, null_pvalue_table, observed_pvalues, sorted_ascending,
    };
    pub use crate::testing::{compute_p_value, StudentT, TwoSampleTest, WelchT};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use ndarray::array;

    #[test]
    fn test_full_pipeline() {
        // nc=3, nt=3, two features: the first with a large
        // control/treatment mean separation, the second with none.
        let intensities = IntensityMatrix::new(array![
            [10.0, 8.0],
            [10.5, 9.1],
            [9.8, 7.6],
            [15.2, 8.3],
            [15.8, 8.9],
            [14.9, 7.9],
        ])
        .unwrap();
        let design = Design::from_codes(&[1, 1, 1, 2, 2, 2]).unwrap();

        let observed = observed_pvalues(&StudentT, &intensities, &design).unwrap();
        let p_signal = observed[0];
        let p_null = observed[1];
        assert!(p_signal < 0.05, "separated feature, p = {}", p_signal);
        assert!(p_null > 0.3, "null feature, p = {}", p_null);

        let params = FdrParams {
            n_perms: 200,
            seed: Some(42),
        };
        let threshold =
            adjust_fdr_threshold(&[], 0.1, &design, &intensities, &params).unwrap();

        // The separated feature is rejected, the null feature is not.
        assert!(
            threshold > p_signal && threshold < p_null,
            "threshold {} not between {} and {}",
            threshold,
            p_signal,
            p_null
        );

        let sorted = sorted_ascending(&observed);
        assert_eq!(count_hits(&sorted, threshold), 1);
    }

    #[test]
    fn test_pipeline_reproducible_for_fixed_seed() {
        let intensities = IntensityMatrix::new(array![
            [1.0, 4.0, 2.0],
            [1.4, 4.4, 2.5],
            [0.8, 3.9, 1.7],
            [3.1, 4.1, 2.2],
            [3.4, 4.3, 2.0],
            [2.9, 3.8, 2.4],
        ])
        .unwrap();
        let design = Design::from_codes(&[1, 1, 1, 2, 2, 2]).unwrap();
        let params = FdrParams {
            n_perms: 100,
            seed: Some(7),
        };

        let a = adjust_fdr_threshold(&[], 0.05, &design, &intensities, &params).unwrap();
        let b = adjust_fdr_threshold(&[], 0.05, &design, &intensities, &params).unwrap();
        assert_eq!(a, b);
    }
}
