//! Discrete labor-supply choice simulation.
//!
//! Agents draw a consumption level, value unemployment at
//! `ln(max(c, floor))` and work at that minus a fixed disutility,
//! receive i.i.d. Gumbel taste shocks and pick the higher total.
//! The deterministic utility of each pick is the run's output.

pub mod choice;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod outcome;
pub mod population;
pub mod rng;
pub mod store;
pub mod types;
pub mod utility;
