//! AI disruption Monte Carlo simulation library
//!
//! This crate provides a seeded, reproducible Monte Carlo engine for
//! hypothetical economic, asset and skill trajectories under an AI
//! disruption narrative. It supports:
//! - A deterministic 32-bit PRNG with derived per-path seeds
//! - Euler-Maruyama style yearly paths with phase and scenario multipliers
//! - Policy interventions whose effects decay with a 5-year half-life
//! - Percentile bands (P10/P25/median/P75/P90 and mean) per simulated year
//! - A rule-based policy recommender and a checkpoint decision session
//!
//! # Example
//!
//! ```ignore
//! use disrupt_core::{registry, Scenario, SimulationRequest};
//! use disrupt_core::simulation::simulate;
//!
//! let config = registry::find("whiteCollarEmployment").unwrap();
//! let request = SimulationRequest::new(200, 16, 42, Scenario::Base);
//! let result = simulate(config, &request, &[])?;
//! println!("2040 median: {}", result.final_row().unwrap().median);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod catalog;
pub mod error;
pub mod path;
pub mod percentiles;
pub mod recommend;
pub mod registry;
pub mod rng;
pub mod session;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use catalog::{Effect, Intervention, InterventionId};
pub use error::{ConfigError, RequestError, SessionError, SimulationError};
pub use model::{
    Category, DecisionRecord, Ensemble, PathPoint, PercentileRow, PercentileSeries, Phase,
    Scenario, SimulationRequest, SimulationResult, Trajectory, VariableConfig,
};
pub use recommend::{DecisionSnapshot, recommend};
pub use session::{Checkpoint, CheckpointState, DecisionSession, SnapshotMode};
