//! Design randomization and permutation trials

mod driver;
mod randomize;

pub use driver::{null_pvalue_table, observed_pvalues, sorted_ascending};
pub use randomize::balanced_design;
