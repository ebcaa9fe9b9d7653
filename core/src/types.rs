//! Shared primitive types used across the entire pipeline.

use serde::{Deserialize, Serialize};

/// Positional index of an agent. Every per-agent array is aligned on it.
pub type AgentIndex = usize;

/// Number of mutually exclusive alternatives each agent chooses between.
pub const NUM_CHOICES: usize = 2;

/// One row of the utility matrix: `[unemployed, work]`.
pub type UtilityRow = [f64; NUM_CHOICES];

/// A discrete labor-supply choice.
///
/// The discriminant is the column index into a [`UtilityRow`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum Choice {
    Unemployed = 0,
    Work       = 1,
}

impl Choice {
    pub const ALL: [Choice; NUM_CHOICES] = [Choice::Unemployed, Choice::Work];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
