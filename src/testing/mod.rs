//! Hypothesis testing entry points

mod ttest;

pub use ttest::{StudentT, TwoSampleTest, WelchT};

use crate::data::Design;
use crate::error::Result;

/// Two-sided p-value for measurements grouped by raw design codes
///
/// Codes are 1 (control) and 2 (treatment); any other code is an
/// invalid-label error, and a code vector whose length differs from the
/// measurement vector is a length-mismatch error. Uses the pooled
/// two-sample t-test.
pub fn compute_p_value(measurements: &[f64], design_codes: &[u8]) -> Result<f64> {
    let design = Design::from_codes(design_codes)?;
    compute_p_value_with(&StudentT, measurements, &design)
}

/// Two-sided p-value for measurements grouped by a validated design,
/// using the given test oracle
pub fn compute_p_value_with<T: TwoSampleTest>(
    test: &T,
    measurements: &[f64],
    design: &Design,
) -> Result<f64> {
    let (control, treatment) = design.split(measurements)?;
    test.p_value(&control, &treatment)
}
