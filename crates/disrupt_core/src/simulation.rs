use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::{Result, SimulationError};
use crate::model::{
    Category, DecisionRecord, Ensemble, FinalSummary, SAMPLE_PATH_COUNT, SimulationRequest,
    SimulationResult, Trajectory, VariableConfig,
};
use crate::path::{DecisionEffect, generate_path_with_effects, resolve_effects};
use crate::percentiles::compute_percentiles;
use crate::registry;
use crate::rng::derive_seed;

/// Paths per variable in a category comparison
pub const COMPARISON_PATHS: usize = 100;

/// Progress tracking and cooperative cancellation for a batch
#[derive(Debug, Clone)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SimulationProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Hooks a batch calls around each trajectory.
///
/// Cancellation is polled before a member starts, so a batch stops at the
/// next member boundary; members already running finish.
pub trait BatchObserver: Sync {
    fn is_cancelled(&self) -> bool;
    fn member_completed(&self);
}

impl BatchObserver for SimulationProgress {
    fn is_cancelled(&self) -> bool {
        SimulationProgress::is_cancelled(self)
    }

    fn member_completed(&self) {
        self.increment();
    }
}

fn prepare(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
) -> Result<Vec<DecisionEffect>> {
    config.validate()?;
    request.validate()?;
    Ok(resolve_effects(&config.key, history))
}

fn member(
    config: &VariableConfig,
    request: &SimulationRequest,
    effects: &[DecisionEffect],
    index: usize,
    observer: Option<&dyn BatchObserver>,
) -> Result<Trajectory> {
    if observer.is_some_and(|o| o.is_cancelled()) {
        return Err(SimulationError::Cancelled);
    }
    let path = generate_path_with_effects(
        config,
        request.num_years,
        derive_seed(request.seed, index),
        request.scenario,
        effects,
    );
    if let Some(o) = observer {
        o.member_completed();
    }
    Ok(path)
}

/// Run `request.num_paths` trajectories under `history`.
///
/// Member `i` is seeded with `seed + i * 7919`. Members share nothing but
/// the immutable inputs, so they run on the rayon pool when the `parallel`
/// feature is on; the ensemble is always returned in member order.
pub fn run_paths(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
) -> Result<Ensemble> {
    run_paths_with_progress(config, request, history, None)
}

pub fn run_paths_with_progress(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
    observer: Option<&dyn BatchObserver>,
) -> Result<Ensemble> {
    let effects = prepare(config, request, history)?;
    tracing::debug!(
        key = %config.key,
        paths = request.num_paths,
        years = request.num_years,
        seed = request.seed,
        scenario = %request.scenario,
        decisions = history.len(),
        "running batch"
    );

    #[cfg(feature = "parallel")]
    let paths = (0..request.num_paths)
        .into_par_iter()
        .map(|i| member(config, request, &effects, i, observer))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let paths = (0..request.num_paths)
        .map(|i| member(config, request, &effects, i, observer))
        .collect::<Result<Vec<_>>>()?;

    Ok(Ensemble { paths })
}

/// Single-threaded batch, regardless of features
pub fn run_paths_sequential(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
    observer: Option<&dyn BatchObserver>,
) -> Result<Ensemble> {
    let effects = prepare(config, request, history)?;
    let paths = (0..request.num_paths)
        .map(|i| member(config, request, &effects, i, observer))
        .collect::<Result<Vec<_>>>()?;
    Ok(Ensemble { paths })
}

/// Run a batch and reduce it to percentile bands plus the overlay sample
pub fn simulate(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
) -> Result<SimulationResult> {
    simulate_with_progress(config, request, history, None)
}

pub fn simulate_with_progress(
    config: &VariableConfig,
    request: &SimulationRequest,
    history: &[DecisionRecord],
    observer: Option<&dyn BatchObserver>,
) -> Result<SimulationResult> {
    let ensemble = run_paths_with_progress(config, request, history, observer)?;
    let percentiles = compute_percentiles(&ensemble)?;

    if let Some(last) = percentiles.final_row() {
        tracing::debug!(
            key = %config.key,
            year = last.year,
            median = last.median,
            p10 = last.p10,
            p90 = last.p90,
            "batch aggregated"
        );
    }

    Ok(SimulationResult {
        key: config.key.to_string(),
        label: config.label.to_string(),
        percentiles,
        sample_paths: ensemble.sample(SAMPLE_PATH_COUNT).to_vec(),
    })
}

/// [`simulate`] for a built-in variable looked up by key
pub fn simulate_key(
    key: &str,
    request: &SimulationRequest,
    history: &[DecisionRecord],
) -> Result<SimulationResult> {
    let config = registry::require(key)?;
    simulate(config, request, history)
}

/// Final-year median and P10/P90 of every variable in `category`, best first.
///
/// Each variable runs [`COMPARISON_PATHS`] paths with the request's seed,
/// horizon and scenario, without interventions.
pub fn compare_category(
    category: Category,
    request: &SimulationRequest,
) -> Result<Vec<FinalSummary>> {
    let request = request.with_paths(COMPARISON_PATHS);
    let mut summaries = registry::variables(category)
        .iter()
        .map(|config| {
            let result = simulate(config, &request, &[])?;
            let last = result.final_row().copied();
            Ok(FinalSummary {
                key: result.key,
                label: result.label,
                final_median: last.map_or(config.base, |r| r.median),
                final_p10: last.map_or(config.base, |r| r.p10),
                final_p90: last.map_or(config.base, |r| r.p90),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    summaries.sort_by(|a, b| b.final_median.total_cmp(&a.final_median));
    Ok(summaries)
}
