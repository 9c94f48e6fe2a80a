//! FDP curve estimation from permutation nulls

/// Number of values at or below `threshold` in an ascending-sorted list
///
/// Scans the prefix and stops at the first value exceeding the
/// threshold, so each row costs O(hits) rather than O(m).
pub fn count_hits(sorted_pvalues: &[f64], threshold: f64) -> usize {
    for (i, &p) in sorted_pvalues.iter().enumerate() {
        if p > threshold {
            return i;
        }
    }
    sorted_pvalues.len()
}

/// Estimated false discovery proportion at every rank of the sorted
/// observed p-values
///
/// `fdp[i]` is the null hit count at threshold `sorted_obs[i]`, averaged
/// over all permutation rows and divided by the 1-indexed rank `i + 1`:
/// the expected fraction of false positives among the discoveries made
/// by thresholding at the rank-`i` observed p-value. `null_table` must
/// hold at least one row of ascending-sorted p-values.
pub fn fdp_curve(sorted_obs: &[f64], null_table: &[Vec<f64>]) -> Vec<f64> {
    let n_perms = null_table.len() as f64;

    sorted_obs
        .iter()
        .enumerate()
        .map(|(i, &thresh)| {
            let total_hits: usize = null_table
                .iter()
                .map(|row| count_hits(row, thresh))
                .sum();
            let mean_hits = total_hits as f64 / n_perms;
            mean_hits / (i + 1) as f64
        })
        .collect()
}
