use serde::{Deserialize, Serialize};

use super::phase::DEFAULT_NUM_YEARS;
use super::scenario::Scenario;
use crate::error::RequestError;

pub const DEFAULT_NUM_PATHS: usize = 200;

/// Number of raw trajectories handed to chart overlays
pub const SAMPLE_PATH_COUNT: usize = 6;

/// Parameters shared by every member of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub num_paths: usize,
    pub num_years: u32,
    pub seed: u32,
    pub scenario: Scenario,
}

impl SimulationRequest {
    pub fn new(num_paths: usize, num_years: u32, seed: u32, scenario: Scenario) -> Self {
        Self {
            num_paths,
            num_years,
            seed,
            scenario,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.num_paths == 0 {
            return Err(RequestError::ZeroPaths);
        }
        Ok(())
    }

    /// Same request with a different path count
    pub fn with_paths(self, num_paths: usize) -> Self {
        Self { num_paths, ..self }
    }
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            num_paths: DEFAULT_NUM_PATHS,
            num_years: DEFAULT_NUM_YEARS,
            seed: 42,
            scenario: Scenario::Base,
        }
    }
}
