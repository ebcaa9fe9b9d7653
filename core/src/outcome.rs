//! Outcome extractor and run summary.

use crate::{
    choice::logit_work_probability,
    error::{SimError, SimResult},
    types::Choice,
    utility::UtilityMatrix,
};
use serde::{Deserialize, Serialize};

/// For each agent, the deterministic utility of the chosen alternative.
///
/// Gathers `utilities[i][choices[i]]` row by row; the shock is not included.
pub fn extract_chosen_utility(utilities: &UtilityMatrix, choices: &[Choice]) -> SimResult<Vec<f64>> {
    if choices.len() != utilities.len() {
        return Err(SimError::LengthMismatch {
            expected: utilities.len(),
            actual:   choices.len(),
        });
    }
    Ok(utilities
        .rows()
        .iter()
        .zip(choices)
        .map(|(row, choice)| row[choice.index()])
        .collect())
}

/// Aggregate view of one simulated population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceSummary {
    pub agents:              usize,
    pub work_count:          usize,
    pub unemployed_count:    usize,
    /// Simulated share choosing work.
    pub work_share:          f64,
    /// Mean closed-form logit probability of work; `work_share` converges to it.
    pub expected_work_share: f64,
    pub mean_chosen_utility: f64,
}

impl ChoiceSummary {
    pub fn compute(utilities: &UtilityMatrix, choices: &[Choice], chosen: &[f64]) -> SimResult<Self> {
        if choices.len() != utilities.len() {
            return Err(SimError::LengthMismatch {
                expected: utilities.len(),
                actual:   choices.len(),
            });
        }
        if chosen.len() != utilities.len() {
            return Err(SimError::LengthMismatch {
                expected: utilities.len(),
                actual:   chosen.len(),
            });
        }

        let agents = utilities.len();
        let work_count = choices.iter().filter(|c| **c == Choice::Work).count();

        // Empty populations report zeros rather than NaN.
        let mean = |total: f64| if agents == 0 { 0.0 } else { total / agents as f64 };

        let expected_total: f64 = utilities
            .rows()
            .iter()
            .map(|row| logit_work_probability(row[0], row[1]))
            .sum();

        Ok(Self {
            agents,
            work_count,
            unemployed_count:    agents - work_count,
            work_share:          mean(work_count as f64),
            expected_work_share: mean(expected_total),
            mean_chosen_utility: mean(chosen.iter().sum()),
        })
    }
}
