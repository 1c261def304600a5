//! Per-step statistics reported alongside each new generation.

use serde::{Deserialize, Serialize};
use crate::Classification;

/// Summary of one generation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation number of the grid produced by this step
    pub generation: u64,
    /// Termination classification of the step
    pub classification: Classification,
    /// Live cells in the new grid
    pub population: usize,
    /// Cells that were dead and became alive
    pub births: usize,
    /// Cells that were alive and died
    pub deaths: usize,
}

impl StepReport {
    pub fn is_terminal(&self) -> bool {
        self.classification.is_terminal()
    }

    /// Cells whose state changed during the step
    pub fn changed(&self) -> usize {
        self.births + self.deaths
    }
}
