//! Choice simulator: additive random utility with Gumbel taste shocks.
//!
//! Each agent picks the alternative maximizing `utility + shock`, where the
//! shocks are i.i.d. standard Gumbel (location 0, scale 1). Under this model
//! the probability of choosing work has the closed logit form computed by
//! [`logit_work_probability`].
//!
//! Ties on the perturbed value go to the lowest column index, so
//! `Unemployed` wins an exact tie.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
    types::{Choice, UtilityRow, NUM_CHOICES},
    utility::UtilityMatrix,
};
use rand_distr::Gumbel;

/// Draw an (n, 2) matrix of standard Gumbel shocks, row-major.
///
/// Consumes exactly `2 * n` variates from `rng`.
pub fn draw_shocks(rng: &mut SimRng, n: usize) -> SimResult<Vec<UtilityRow>> {
    let dist = Gumbel::new(0.0, 1.0)
        .map_err(|e| anyhow::anyhow!("Gumbel(0, 1) rejected: {e:?}"))?;
    let mut shocks = Vec::with_capacity(n);
    for _ in 0..n {
        let unemployed = rng.sample(&dist);
        let work = rng.sample(&dist);
        shocks.push([unemployed, work]);
    }
    Ok(shocks)
}

/// Row-wise arg-max of `utilities + shocks`, first index on ties.
pub fn select_choices(utilities: &UtilityMatrix, shocks: &[UtilityRow]) -> SimResult<Vec<Choice>> {
    if shocks.len() != utilities.len() {
        return Err(SimError::LengthMismatch {
            expected: utilities.len(),
            actual:   shocks.len(),
        });
    }

    let choices = utilities
        .rows()
        .iter()
        .zip(shocks)
        .map(|(util, shock)| {
            let mut best = 0;
            let mut best_value = util[0] + shock[0];
            for col in 1..NUM_CHOICES {
                let value = util[col] + shock[col];
                if value > best_value {
                    best = col;
                    best_value = value;
                }
            }
            Choice::ALL[best]
        })
        .collect();
    Ok(choices)
}

/// Draw shocks from `rng` and return each agent's optimal choice.
pub fn simulate_choices(utilities: &UtilityMatrix, rng: &mut SimRng) -> SimResult<Vec<Choice>> {
    let shocks = draw_shocks(rng, utilities.len())?;
    let choices = select_choices(utilities, &shocks)?;
    log::debug!(
        "choice: {} agents simulated, stream '{}' at {} draws",
        choices.len(),
        rng.name,
        rng.draws()
    );
    Ok(choices)
}

/// Closed-form probability of choosing work under Gumbel shocks:
/// `1 / (1 + exp(u_unemployed - u_work))`.
pub fn logit_work_probability(u_unemployed: f64, u_work: f64) -> f64 {
    let gap = u_work - u_unemployed;
    if gap >= 0.0 {
        1.0 / (1.0 + (-gap).exp())
    } else {
        let e = gap.exp();
        e / (1.0 + e)
    }
}
