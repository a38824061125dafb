use std::fmt;

use crate::catalog::InterventionId;

/// Errors raised when a variable config violates its invariants
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NegativeVolatility { key: String, vol: f64 },
    NonFinite { key: String, field: &'static str },
    FloorAboveCap { key: String, floor: f64, cap: f64 },
    BaseOutOfBounds { key: String, base: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeVolatility { key, vol } => {
                write!(f, "variable {key}: volatility must be >= 0 (got {vol})")
            }
            ConfigError::NonFinite { key, field } => {
                write!(f, "variable {key}: {field} must be a finite number")
            }
            ConfigError::FloorAboveCap { key, floor, cap } => {
                write!(f, "variable {key}: floor {floor} is above cap {cap}")
            }
            ConfigError::BaseOutOfBounds { key, base } => {
                write!(f, "variable {key}: base {base} lies outside [floor, cap]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised before any simulation work begins
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    ZeroPaths,
    UnknownVariable(String),
    UnknownScenario(String),
    UnknownCategory(String),
    UnknownIntervention(String),
    RaggedEnsemble { expected: usize, found: usize },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::ZeroPaths => write!(f, "number of paths must be positive"),
            RequestError::UnknownVariable(key) => write!(f, "unknown variable {key:?}"),
            RequestError::UnknownScenario(name) => write!(f, "unknown scenario {name:?}"),
            RequestError::UnknownCategory(name) => write!(f, "unknown category {name:?}"),
            RequestError::UnknownIntervention(id) => write!(f, "unknown intervention {id:?}"),
            RequestError::RaggedEnsemble { expected, found } => write!(
                f,
                "ensemble trajectories differ in length (expected {expected}, found {found})"
            ),
        }
    }
}

impl std::error::Error for RequestError {}

/// Errors from misuse of the decision checkpoint state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    NoOpenCheckpoint,
    CheckpointPending { year: i32 },
    NotApplicable { id: InterventionId, phase_index: usize },
    Simulation(Box<SimulationError>),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoOpenCheckpoint => write!(f, "no decision checkpoint is open"),
            SessionError::CheckpointPending { year } => {
                write!(f, "checkpoint {year} must be resolved before advancing")
            }
            SessionError::NotApplicable { id, phase_index } => write!(
                f,
                "intervention {} is not applicable in phase {phase_index}",
                id.as_str()
            ),
            SessionError::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Simulation(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<SimulationError> for SessionError {
    fn from(err: SimulationError) -> Self {
        SessionError::Simulation(Box::new(err))
    }
}

/// Top-level error for a simulation request
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Request(RequestError),
    /// Batch was cancelled between trajectories
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "invalid config: {e}"),
            SimulationError::Request(e) => write!(f, "invalid request: {e}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::Request(e) => Some(e),
            SimulationError::Cancelled => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::Config(err)
    }
}

impl From<RequestError> for SimulationError {
    fn from(err: RequestError) -> Self {
        SimulationError::Request(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
