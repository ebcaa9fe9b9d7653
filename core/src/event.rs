//! The run event log.
//!
//! RULE: The engine records exactly one event per completed stage,
//! in execution order. Two runs with the same config must produce
//! identical logs; the determinism tests compare them payload by payload.

use serde::{Deserialize, Serialize};

/// Every event emitted during a run.
/// Variants may be added, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    RunInitialized {
        seed:     u64,
        num_grid: usize,
    },
    PopulationDrawn {
        agents:           usize,
        mean_consumption: f64,
        rng_draws:        u64,
    },
    UtilitiesComputed {
        agents:     usize,
        floor:      f64,
        disutility: f64,
    },
    ChoicesSimulated {
        agents:     usize,
        work_count: usize,
        rng_draws:  u64,
    },
    OutputWritten {
        path:   String,
        values: usize,
    },
}

impl RunEvent {
    /// Stable name for the `event_type` field of a log entry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. }    => "run_initialized",
            Self::PopulationDrawn { .. }   => "population_drawn",
            Self::UtilitiesComputed { .. } => "utilities_computed",
            Self::ChoicesSimulated { .. }  => "choices_simulated",
            Self::OutputWritten { .. }     => "output_written",
        }
    }
}

/// A logged event with its position and serialized payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub seq:        u64,
    pub stage:      String,
    pub event_type: String,
    pub payload:    String,
}
