//! Utility calculator: floor-adjusted log utility for each choice.

use crate::{
    error::{SimError, SimResult},
    types::UtilityRow,
};

/// Per-agent deterministic utilities, one `[unemployed, work]` row per agent.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityMatrix {
    rows: Vec<UtilityRow>,
}

impl UtilityMatrix {
    /// Column-stack two index-aligned utility vectors.
    pub fn from_columns(unemployed: &[f64], work: &[f64]) -> SimResult<Self> {
        if unemployed.len() != work.len() {
            return Err(SimError::LengthMismatch {
                expected: unemployed.len(),
                actual:   work.len(),
            });
        }
        let rows = unemployed
            .iter()
            .zip(work)
            .map(|(&u, &w)| [u, w])
            .collect();
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<UtilityRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[UtilityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[col]).collect()
    }
}

/// Raise every value below `floor` to `floor`. Returns a new vector.
pub fn calc_floor_consumption(cons: &[f64], floor: f64) -> Vec<f64> {
    cons.iter()
        .map(|&c| if c < floor { floor } else { c })
        .collect()
}

/// Compute `(base_utility, work_utility)`, both index-aligned with `cons`.
///
/// `base_utility = ln(max(c, floor))`, `work_utility = base_utility - disutil`.
/// Fails with [`SimError::Domain`] on the first agent whose floored
/// consumption is not strictly positive.
pub fn calc_utilities(
    cons: &[f64],
    floor: f64,
    disutil: f64,
) -> SimResult<(Vec<f64>, Vec<f64>)> {
    let floored = calc_floor_consumption(cons, floor);

    let mut base_utility = Vec::with_capacity(floored.len());
    for (index, &value) in floored.iter().enumerate() {
        if value.is_nan() || value <= 0.0 {
            return Err(SimError::Domain { index, value });
        }
        base_utility.push(value.ln());
    }

    let work_utility = base_utility.iter().map(|u| u - disutil).collect();
    Ok((base_utility, work_utility))
}

/// Build the (N, 2) utility matrix in one step.
pub fn calc_utility_matrix(cons: &[f64], floor: f64, disutil: f64) -> SimResult<UtilityMatrix> {
    let (unemployed, work) = calc_utilities(cons, floor, disutil)?;
    let matrix = UtilityMatrix::from_columns(&unemployed, &work)?;
    log::debug!(
        "utility: {} rows, floor={floor} disutil={disutil}",
        matrix.len()
    );
    Ok(matrix)
}
