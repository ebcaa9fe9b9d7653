//! The pipeline engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Population generator  (draws num_grid uniforms)
//!   2. Utility calculator    (pure)
//!   3. Choice simulator      (draws 2 × num_grid Gumbel shocks)
//!   4. Outcome extractor     (pure)
//!   5. Persistence           (optional, see run_and_persist)
//!
//! RULES:
//!   - One SimRng per engine, seeded once from the config.
//!   - Stages receive the RNG explicitly; none holds it.
//!   - Every completed stage is recorded in the event log.
//!   - An engine runs once. Build a new one to run again.

use crate::{
    choice::simulate_choices,
    config::ModelConfig,
    error::SimResult,
    event::{EventLogEntry, RunEvent},
    outcome::{extract_chosen_utility, ChoiceSummary},
    population::generate_population,
    rng::SimRng,
    store,
    types::Choice,
    utility::{calc_utility_matrix, UtilityMatrix},
};
use std::path::Path;

/// Everything a single run produces, index-aligned per agent.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub consumption:    Vec<f64>,
    pub utilities:      UtilityMatrix,
    pub choices:        Vec<Choice>,
    pub chosen_utility: Vec<f64>,
    pub summary:        ChoiceSummary,
}

pub struct ChoiceEngine {
    pub config: ModelConfig,
    rng:        SimRng,
    log:        Vec<EventLogEntry>,
    completed:  bool,
}

impl ChoiceEngine {
    pub fn new(config: ModelConfig) -> SimResult<Self> {
        config.validate()?;
        let rng = SimRng::new(config.seed).with_name("labor_choice");
        Ok(Self {
            config,
            rng,
            log: Vec::new(),
            completed: false,
        })
    }

    /// Run stages 1–4 and return the in-memory outcome.
    pub fn run(&mut self) -> SimResult<RunOutcome> {
        if self.completed {
            return Err(anyhow::anyhow!("engine for seed {} already ran", self.config.seed).into());
        }
        self.completed = true;

        let ModelConfig { max_grid, num_grid, floor, disutility, seed, .. } = self.config;
        self.record("engine", RunEvent::RunInitialized { seed, num_grid })?;

        let consumption = generate_population(&mut self.rng, max_grid, num_grid)?;
        let mean_consumption = if consumption.is_empty() {
            0.0
        } else {
            consumption.iter().sum::<f64>() / consumption.len() as f64
        };
        self.record("population", RunEvent::PopulationDrawn {
            agents: consumption.len(),
            mean_consumption,
            rng_draws: self.rng.draws(),
        })?;

        let utilities = calc_utility_matrix(&consumption, floor, disutility)?;
        self.record("utility", RunEvent::UtilitiesComputed {
            agents: utilities.len(),
            floor,
            disutility,
        })?;

        let choices = simulate_choices(&utilities, &mut self.rng)?;
        let chosen_utility = extract_chosen_utility(&utilities, &choices)?;
        let summary = ChoiceSummary::compute(&utilities, &choices, &chosen_utility)?;
        self.record("choice", RunEvent::ChoicesSimulated {
            agents: choices.len(),
            work_count: summary.work_count,
            rng_draws: self.rng.draws(),
        })?;

        log::info!(
            "seed={seed} agents={} work_share={:.4} expected={:.4} mean_utility={:.4}",
            summary.agents,
            summary.work_share,
            summary.expected_work_share,
            summary.mean_chosen_utility
        );

        Ok(RunOutcome {
            consumption,
            utilities,
            choices,
            chosen_utility,
            summary,
        })
    }

    /// Run the pipeline and write the chosen utilities to `config.output_path`.
    pub fn run_and_persist(&mut self) -> SimResult<RunOutcome> {
        let outcome = self.run()?;
        let path = self.config.output_path.clone();
        self.persist(&outcome.chosen_utility, &path)?;
        Ok(outcome)
    }

    /// Write `values` to `path` and log the write.
    pub fn persist(&mut self, values: &[f64], path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        store::write_f64_array(path, values)?;
        self.record("store", RunEvent::OutputWritten {
            path:   path.display().to_string(),
            values: values.len(),
        })
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.log
    }

    fn record(&mut self, stage: &str, event: RunEvent) -> SimResult<()> {
        let entry = EventLogEntry {
            seq:        self.log.len() as u64,
            stage:      stage.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(&event)?,
        };
        log::debug!("event #{} {}: {}", entry.seq, entry.event_type, entry.payload);
        self.log.push(entry);
        Ok(())
    }
}

/// Stages 2–4 as one call: floor, log utility, simulated choice, gather.
///
/// Draws `2 * consumption.len()` shocks from `rng`.
pub fn calc_chosen_utility(
    consumption: &[f64],
    floor: f64,
    disutil: f64,
    rng: &mut SimRng,
) -> SimResult<Vec<f64>> {
    let utilities = calc_utility_matrix(consumption, floor, disutil)?;
    let choices = simulate_choices(&utilities, rng)?;
    extract_chosen_utility(&utilities, &choices)
}
