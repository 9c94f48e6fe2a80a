//! CSV reading and writing for intensity tables and designs

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{Condition, Design, IntensityMatrix};
use crate::error::{PermFdrError, Result};

/// An intensity table together with its row and column names
#[derive(Debug, Clone)]
pub struct IntensityFile {
    pub unit_ids: Vec<String>,
    pub feature_names: Vec<String>,
    pub matrix: IntensityMatrix,
}

/// Strip surrounding quotes from a string
fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    if (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')) {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

fn detect_delimiter(line: &str) -> char {
    if line.contains('\t') {
        '\t'
    } else {
        ','
    }
}

/// Read an intensity table from a CSV/TSV file
///
/// Expected format: first column is unit IDs, first row is feature
/// names. One row per experimental unit.
pub fn read_intensities<P: AsRef<Path>>(path: P) -> Result<IntensityFile> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or_else(|| PermFdrError::EmptyData {
        reason: "empty intensity file".to_string(),
    })??;

    let delimiter = detect_delimiter(&header_line);
    let header: Vec<&str> = header_line.split(delimiter).collect();
    if header.len() < 2 {
        return Err(PermFdrError::InvalidIntensityMatrix {
            reason: "not enough columns in header".to_string(),
        });
    }

    let feature_names: Vec<String> = header[1..].iter().map(|s| strip_quotes(s)).collect();
    let n_features = feature_names.len();

    let mut unit_ids: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != n_features + 1 {
            return Err(PermFdrError::ShapeMismatch {
                reason: format!(
                    "row has {} columns, expected {}",
                    fields.len(),
                    n_features + 1
                ),
            });
        }

        unit_ids.push(strip_quotes(fields[0]));

        let row: Result<Vec<f64>> = fields[1..]
            .iter()
            .map(|s| {
                let val = strip_quotes(s);
                val.parse::<f64>()
                    .map_err(|_| PermFdrError::InvalidIntensityMatrix {
                        reason: format!("invalid intensity value: {}", val),
                    })
            })
            .collect();
        rows.push(row?);
    }

    if unit_ids.is_empty() {
        return Err(PermFdrError::EmptyData {
            reason: "no units found in intensity file".to_string(),
        });
    }

    let matrix = IntensityMatrix::from_rows(&rows)?;
    Ok(IntensityFile {
        unit_ids,
        feature_names,
        matrix,
    })
}

/// Read a design from a CSV/TSV file, ordered to match `unit_ids`
///
/// Expected format: two columns, unit ID and condition. Conditions may
/// be spelled 1/2 or control/treatment. Every unit in `unit_ids` must
/// appear exactly once.
pub fn read_design<P: AsRef<Path>>(path: P, unit_ids: &[String]) -> Result<Design> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines.next().ok_or_else(|| PermFdrError::EmptyData {
        reason: "empty design file".to_string(),
    })??;
    let delimiter = detect_delimiter(&header_line);

    let mut by_unit: HashMap<String, Condition> = HashMap::new();

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();
        if fields.len() != 2 {
            return Err(PermFdrError::ShapeMismatch {
                reason: format!("design row has {} columns, expected 2", fields.len()),
            });
        }

        let unit_id = strip_quotes(fields[0]);
        let condition: Condition =
            strip_quotes(fields[1])
                .parse()
                .map_err(|reason: String| PermFdrError::InvalidConfig { reason })?;

        if by_unit.insert(unit_id.clone(), condition).is_some() {
            return Err(PermFdrError::InvalidConfig {
                reason: format!("unit '{}' appears twice in the design file", unit_id),
            });
        }
    }

    let labels = unit_ids
        .iter()
        .map(|id| {
            by_unit
                .get(id)
                .copied()
                .ok_or_else(|| PermFdrError::InvalidConfig {
                    reason: format!("unit '{}' missing from the design file", id),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Design::new(labels))
}

/// Write per-feature p-values as CSV
pub fn write_pvalues<P: AsRef<Path>>(
    path: P,
    feature_names: &[String],
    pvalues: &[f64],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["feature", "pvalue"])?;
    for (name, p) in feature_names.iter().zip(pvalues) {
        let formatted = format!("{:.6e}", p);
        writer.write_record([name.as_str(), formatted.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
