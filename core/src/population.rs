//! Population generator: per-agent consumption draws.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
};
use rand_distr::Uniform;

/// Lower (inclusive) bound of every consumption draw.
pub const MIN_CONSUMPTION: f64 = 1.0;

/// Draw `num_grid` consumption levels from Uniform[1, max_grid).
///
/// Consumes exactly `num_grid` variates from `rng`, in agent order.
pub fn generate_population(
    rng: &mut SimRng,
    max_grid: f64,
    num_grid: usize,
) -> SimResult<Vec<f64>> {
    if !max_grid.is_finite() || max_grid <= MIN_CONSUMPTION {
        return Err(SimError::InvalidParameter {
            name:   "max_grid",
            value:  max_grid,
            reason: "must be finite and greater than 1",
        });
    }

    let dist = Uniform::new(MIN_CONSUMPTION, max_grid);
    let consumption = rng.sample_n(&dist, num_grid);

    log::debug!(
        "population: {} agents drawn from [{MIN_CONSUMPTION}, {max_grid}) on stream '{}'",
        consumption.len(),
        rng.name
    );
    Ok(consumption)
}
