//! Per-year order statistics over an ensemble.
//!
//! Quantiles are picked by rank, `sorted[floor(q * n)]`, with no
//! interpolation, so bands always coincide with simulated values.

use crate::error::RequestError;
use crate::model::{Ensemble, PercentileRow, PercentileSeries};
use crate::path::round2;

pub const P10: f64 = 0.10;
pub const P25: f64 = 0.25;
pub const P50: f64 = 0.50;
pub const P75: f64 = 0.75;
pub const P90: f64 = 0.90;

/// Rank-based quantile of an ascending slice, `None` when it is empty
#[inline]
pub fn rank_quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let idx = (q * sorted.len() as f64).floor() as usize;
    Some(sorted[idx.min(last)])
}

/// Bands and mean of one year's sorted values
fn summarise(year: i32, sorted: &[f64]) -> Option<PercentileRow> {
    let sum: f64 = sorted.iter().sum();
    Some(PercentileRow {
        year,
        p10: rank_quantile(sorted, P10)?,
        p25: rank_quantile(sorted, P25)?,
        median: rank_quantile(sorted, P50)?,
        p75: rank_quantile(sorted, P75)?,
        p90: rank_quantile(sorted, P90)?,
        mean: round2(sum / sorted.len() as f64),
    })
}

/// Summarise an ensemble year by year.
///
/// An empty ensemble yields an empty series. Trajectories of different
/// lengths are rejected.
pub fn compute_percentiles(ensemble: &Ensemble) -> Result<PercentileSeries, RequestError> {
    let Some(first) = ensemble.paths.first() else {
        return Ok(PercentileSeries::default());
    };
    let len = first.len();
    if let Some(bad) = ensemble.paths.iter().find(|p| p.len() != len) {
        return Err(RequestError::RaggedEnsemble {
            expected: len,
            found: bad.len(),
        });
    }

    let mut column = Vec::with_capacity(ensemble.len());
    let mut rows = Vec::with_capacity(len);

    for i in 0..len {
        column.clear();
        column.extend(ensemble.paths.iter().map(|p| p.points[i].value));
        column.sort_by(f64::total_cmp);
        // column holds one value per member, never empty here
        rows.extend(summarise(first.points[i].year, &column));
    }

    Ok(PercentileSeries { rows })
}
