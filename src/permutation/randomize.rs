//! Balanced randomization of experimental designs

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::{Condition, Design};
use crate::error::{PermFdrError, Result};

/// Draw a random design with exactly `nc` control and `nt` treatment
/// labels, stratified so the relabeling stays balanced against the
/// original grouping
///
/// The output is built from two blocks mirroring the original group
/// sizes. The first block (`nc` slots, covering the original control
/// positions) receives `k` control labels; the second block (`nt`
/// slots) receives the remaining `nc - k` control labels. Each block is
/// shuffled on its own before concatenation. Under extreme imbalance a
/// plain global shuffle reproduces near-original designs too often;
/// the stratified form keeps both blocks mixed.
pub fn balanced_design<R: Rng + ?Sized>(nc: usize, nt: usize, rng: &mut R) -> Result<Design> {
    if nc < 1 || nt < 1 {
        return Err(PermFdrError::InvalidConfig {
            reason: format!(
                "both groups need at least one unit (nc={}, nt={})",
                nc, nt
            ),
        });
    }

    // Maximally balanced number of control labels kept in the
    // control-sized block. nc^2/(nc+nt) lies in [nc-nt, nc], so every
    // slot count below is non-negative without clamping.
    let k = ((nc * nc) as f64 / (nc + nt) as f64).round() as usize;

    let mut control_block: Vec<Condition> = Vec::with_capacity(nc);
    control_block.extend(std::iter::repeat(Condition::Control).take(k));
    control_block.extend(std::iter::repeat(Condition::Treatment).take(nc - k));

    let mut treatment_block: Vec<Condition> = Vec::with_capacity(nt);
    treatment_block.extend(std::iter::repeat(Condition::Control).take(nc - k));
    treatment_block.extend(std::iter::repeat(Condition::Treatment).take(nt - (nc - k)));

    control_block.shuffle(rng);
    treatment_block.shuffle(rng);

    control_block.extend(treatment_block);
    Ok(Design::new(control_block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_size_invariant_across_draws() {
        let mut rng = StdRng::seed_from_u64(7);
        for (nc, nt) in [(1, 1), (3, 3), (5, 2), (2, 9), (10, 4)] {
            for _ in 0..50 {
                let design = balanced_design(nc, nt, &mut rng).unwrap();
                assert_eq!(design.len(), nc + nt);
                assert_eq!(design.n_control(), nc, "nc={} nt={}", nc, nt);
                assert_eq!(design.n_treatment(), nt, "nc={} nt={}", nc, nt);
            }
        }
    }

    #[test]
    fn test_block_composition() {
        // nc=3, nt=3: k = round(9/6) = 2 controls in the first block.
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let design = balanced_design(3, 3, &mut rng).unwrap();
            let first_block_controls = design.labels()[..3]
                .iter()
                .filter(|&&c| c == Condition::Control)
                .count();
            assert_eq!(first_block_controls, 2);
        }
    }

    #[test]
    fn test_block_composition_uneven_division() {
        // nc=5, nt=2: k = round(25/7) = round(3.571) = 4.
        let mut rng = StdRng::seed_from_u64(13);
        let design = balanced_design(5, 2, &mut rng).unwrap();
        let first_block_controls = design.labels()[..5]
            .iter()
            .filter(|&&c| c == Condition::Control)
            .count();
        assert_eq!(first_block_controls, 4);

        // nc=2, nt=5: k = round(4/7) = round(0.571) = 1.
        let design = balanced_design(2, 5, &mut rng).unwrap();
        let first_block_controls = design.labels()[..2]
            .iter()
            .filter(|&&c| c == Condition::Control)
            .count();
        assert_eq!(first_block_controls, 1);
    }

    #[test]
    fn test_minimal_design() {
        // nc=1, nt=1: k = round(1/2) = 1, so the blocks keep the
        // original labels and only the trivial shuffles happen.
        let mut rng = StdRng::seed_from_u64(17);
        let design = balanced_design(1, 1, &mut rng).unwrap();
        assert_eq!(
            design.labels(),
            &[Condition::Control, Condition::Treatment]
        );
    }

    #[test]
    fn test_reproducible_with_seed() {
        let a = balanced_design(6, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = balanced_design(6, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(balanced_design(0, 3, &mut rng).is_err());
        assert!(balanced_design(3, 0, &mut rng).is_err());
    }
}
