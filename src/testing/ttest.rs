//! Two-sample hypothesis test oracles

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{PermFdrError, Result};

/// A two-sided two-sample location test producing a p-value
///
/// Implementations must be symmetric in effect direction: swapping the
/// two samples does not change the returned p-value.
pub trait TwoSampleTest {
    fn p_value(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

/// Pooled-variance two-sample t-test (df = n1 + n2 - 2)
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentT;

impl TwoSampleTest for StudentT {
    fn p_value(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_group_sizes(a, b)?;

        let (n1, mean1, var1) = moments(a);
        let (n2, mean2, var2) = moments(b);

        let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / (n1 + n2 - 2.0);
        let se2 = pooled_var * (1.0 / n1 + 1.0 / n2);
        if !(se2 > 0.0) {
            return Err(PermFdrError::DegenerateInput {
                reason: "zero or undefined standard error: no variation in either group"
                    .to_string(),
            });
        }

        let t = (mean1 - mean2) / se2.sqrt();
        let df = n1 + n2 - 2.0;
        two_sided_p(t, df)
    }
}

/// Welch's unequal-variance two-sample t-test
/// (Welch-Satterthwaite degrees of freedom)
#[derive(Debug, Clone, Copy, Default)]
pub struct WelchT;

impl TwoSampleTest for WelchT {
    fn p_value(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_group_sizes(a, b)?;

        let (n1, mean1, var1) = moments(a);
        let (n2, mean2, var2) = moments(b);

        let se2 = var1 / n1 + var2 / n2;
        if !(se2 > 0.0) {
            return Err(PermFdrError::DegenerateInput {
                reason: "zero or undefined standard error: no variation in either group"
                    .to_string(),
            });
        }

        let t = (mean1 - mean2) / se2.sqrt();
        let df = se2 * se2
            / ((var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0));
        two_sided_p(t, df)
    }
}

/// Sample size, mean, and unbiased variance of one group
fn moments(xs: &[f64]) -> (f64, f64, f64) {
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let var = xs.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (n, mean, var)
}

fn check_group_sizes(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() < 2 || b.len() < 2 {
        return Err(PermFdrError::DegenerateInput {
            reason: format!(
                "each group needs at least 2 members (got {} and {})",
                a.len(),
                b.len()
            ),
        });
    }
    Ok(())
}

/// Two-sided p-value from a t-statistic
/// R equivalent: 2 * pt(abs(t), df=df, lower.tail=FALSE)
fn two_sided_p(t: f64, df: f64) -> Result<f64> {
    if !t.is_finite() || !(df > 0.0) {
        return Err(PermFdrError::DegenerateInput {
            reason: format!("undefined test statistic (t={}, df={})", t, df),
        });
    }

    let t_dist = StudentsT::new(0.0, 1.0, df).unwrap();
    Ok((2.0 * t_dist.cdf(-t.abs())).min(1.0))
}
