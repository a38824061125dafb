mod decision;
mod phase;
mod request;
mod results;
mod scenario;
mod variable;

pub use decision::DecisionRecord;
pub use phase::{
    CHECKPOINT_YEARS, DEFAULT_NUM_YEARS, PHASES, Phase, START_YEAR, checkpoint_phase_index,
    phase_index_for_year, phase_multipliers,
};
pub use request::{DEFAULT_NUM_PATHS, SAMPLE_PATH_COUNT, SimulationRequest};
pub use results::{
    Ensemble, FinalSummary, PathPoint, PercentileRow, PercentileSeries, SimulationResult,
    Trajectory,
};
pub use scenario::Scenario;
pub use variable::{Category, VariableConfig};
