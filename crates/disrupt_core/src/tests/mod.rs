//! Integration tests for the disruption simulation engine
//!
//! Tests are organized by topic:
//! - `reference` - Pinned trajectories for known seeds
//! - `batch` - Ensemble generation, ordering, validation and cancellation
//! - `decisions` - Intervention effects threaded through paths
//! - `recommend` - Rule table priority and defaults
//! - `session` - Decision checkpoint state machine
//! - `properties` - Property tests over arbitrary seeds

mod properties;
mod recommend;
