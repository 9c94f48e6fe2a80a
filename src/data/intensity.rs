//! Intensity table for measured features across experimental units

use ndarray::{Array2, ArrayView1};

use crate::error::{PermFdrError, Result};

/// A rectangular table of measurements, units x features
///
/// Rows are experimental units (replicates), columns are measured
/// features (e.g. proteins). Built once per analysis run and read-only
/// during the permutation procedure.
#[derive(Debug, Clone)]
pub struct IntensityMatrix {
    intensities: Array2<f64>,
}

impl IntensityMatrix {
    /// Create an intensity matrix, validating shape and values
    pub fn new(intensities: Array2<f64>) -> Result<Self> {
        let (n_units, n_features) = intensities.dim();

        if n_units == 0 || n_features == 0 {
            return Err(PermFdrError::EmptyData {
                reason: format!(
                    "intensity matrix must have at least one unit and one feature (got {} x {})",
                    n_units, n_features
                ),
            });
        }

        if intensities.iter().any(|v| !v.is_finite()) {
            return Err(PermFdrError::InvalidIntensityMatrix {
                reason: "intensities must be finite values".to_string(),
            });
        }

        Ok(Self { intensities })
    }

    /// Create from per-unit row vectors; ragged rows are rejected
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or_else(|| PermFdrError::EmptyData {
            reason: "intensity matrix has no units".to_string(),
        })?;

        let n_features = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_features {
                return Err(PermFdrError::ShapeMismatch {
                    reason: format!(
                        "unit {} has {} features, expected {}",
                        i,
                        row.len(),
                        n_features
                    ),
                });
            }
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let intensities = Array2::from_shape_vec((rows.len(), n_features), flat)
            .map_err(|e| PermFdrError::ShapeMismatch {
                reason: e.to_string(),
            })?;

        Self::new(intensities)
    }

    /// Number of experimental units (rows)
    pub fn n_units(&self) -> usize {
        self.intensities.nrows()
    }

    /// Number of measured features (columns)
    pub fn n_features(&self) -> usize {
        self.intensities.ncols()
    }

    /// Per-unit measurements of one feature
    pub fn feature(&self, feature_idx: usize) -> ArrayView1<'_, f64> {
        self.intensities.column(feature_idx)
    }

    /// All measurements of one unit
    pub fn unit(&self, unit_idx: usize) -> ArrayView1<'_, f64> {
        self.intensities.row(unit_idx)
    }
}
