//! File input/output for the command-line front end

mod csv;

pub use self::csv::{read_design, read_intensities, write_pvalues, IntensityFile};

use serde::{Deserialize, Serialize};

/// Summary of one threshold-adjustment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustSummary {
    /// Adjusted p-value rejection threshold
    pub threshold: f64,
    /// Target false discovery rate the threshold was calibrated to
    pub target_fdr: f64,
    /// Number of permutation trials
    pub n_perms: usize,
    /// Number of tested features
    pub n_features: usize,
    /// Observed p-values at or below the adjusted threshold
    pub n_discoveries: usize,
}
