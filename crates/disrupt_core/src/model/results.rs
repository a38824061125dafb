//! Simulation outputs: trajectories, ensembles and percentile bands

use serde::{Deserialize, Serialize};

/// One `(year, value)` sample of a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub year: i32,
    pub value: f64,
}

/// One simulated time series, starting at the base value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    pub points: Vec<PathPoint>,
}

impl Trajectory {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            points: Vec::with_capacity(len),
        }
    }

    pub fn push(&mut self, year: i32, value: f64) {
        self.points.push(PathPoint { year, value });
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// All trajectories of one request, in generation order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ensemble {
    pub paths: Vec<Trajectory>,
}

impl Ensemble {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// First `n` members, for chart overlays
    pub fn sample(&self, n: usize) -> &[Trajectory] {
        &self.paths[..n.min(self.paths.len())]
    }
}

/// Per-year summary row. Invariant: `p10 <= p25 <= median <= p75 <= p90`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    pub year: i32,
    pub p10: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentileSeries {
    pub rows: Vec<PercentileRow>,
}

impl PercentileSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn final_row(&self) -> Option<&PercentileRow> {
        self.rows.last()
    }

    /// Median at `year`, or at the last simulated year when `year` lies past the horizon
    pub fn median_at_or_before(&self, year: i32) -> Option<f64> {
        self.rows
            .iter()
            .take_while(|r| r.year <= year)
            .last()
            .map(|r| r.median)
    }
}

/// Bands plus a capped sample of raw paths for one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub key: String,
    pub label: String,
    pub percentiles: PercentileSeries,
    pub sample_paths: Vec<Trajectory>,
}

impl SimulationResult {
    pub fn final_row(&self) -> Option<&PercentileRow> {
        self.percentiles.final_row()
    }
}

/// Final-year headline for one variable in a category comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub key: String,
    pub label: String,
    pub final_median: f64,
    pub final_p10: f64,
    pub final_p90: f64,
}
