//! Experimental design: unit labels and grouping

use std::str::FromStr;

use crate::error::{PermFdrError, Result};

/// Group assignment of one experimental unit
///
/// Wire codes: 1 = control, 2 = treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Control,
    Treatment,
}

impl Condition {
    /// Parse a wire code, reporting the offending position on failure
    pub fn from_code(code: u8, position: usize) -> Result<Self> {
        match code {
            1 => Ok(Condition::Control),
            2 => Ok(Condition::Treatment),
            _ => Err(PermFdrError::InvalidDesignLabel { code, position }),
        }
    }

    /// The wire code for this condition
    pub fn code(self) -> u8 {
        match self {
            Condition::Control => 1,
            Condition::Treatment => 2,
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "control" | "c" => Ok(Condition::Control),
            "2" | "treatment" | "t" | "treated" => Ok(Condition::Treatment),
            other => Err(format!(
                "unrecognized condition '{}': expected 1/2/control/treatment",
                other
            )),
        }
    }
}

/// A validated assignment of every unit to control or treatment
///
/// Labels are checked once at construction; a `Design` value can only
/// hold the two allowed conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Design {
    labels: Vec<Condition>,
}

impl Design {
    pub fn new(labels: Vec<Condition>) -> Self {
        Self { labels }
    }

    /// Build a design from raw wire codes (1 = control, 2 = treatment)
    pub fn from_codes(codes: &[u8]) -> Result<Self> {
        let labels = codes
            .iter()
            .enumerate()
            .map(|(position, &code)| Condition::from_code(code, position))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Condition] {
        &self.labels
    }

    /// Number of control-labeled units
    pub fn n_control(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&c| c == Condition::Control)
            .count()
    }

    /// Number of treatment-labeled units
    pub fn n_treatment(&self) -> usize {
        self.labels.len() - self.n_control()
    }

    /// Partition measurements into (control, treatment) by label
    ///
    /// Fails when the measurement vector and the design differ in length.
    pub fn split(&self, measurements: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if measurements.len() != self.labels.len() {
            return Err(PermFdrError::LengthMismatch {
                design_len: self.labels.len(),
                measurement_len: measurements.len(),
            });
        }

        let mut control = Vec::with_capacity(self.n_control());
        let mut treatment = Vec::with_capacity(self.labels.len());
        for (&value, &label) in measurements.iter().zip(&self.labels) {
            match label {
                Condition::Control => control.push(value),
                Condition::Treatment => treatment.push(value),
            }
        }

        Ok((control, treatment))
    }
}
