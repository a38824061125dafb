//! Simulation calendar: phases, phase multipliers and decision checkpoints

use serde::Serialize;

/// Year of the initial trajectory point
pub const START_YEAR: i32 = 2024;

/// Default horizon (2024 through 2040)
pub const DEFAULT_NUM_YEARS: u32 = 16;

/// Years at which a policy decision may be taken
pub const CHECKPOINT_YEARS: [i32; 4] = [2026, 2028, 2031, 2035];

/// A named `[start, end)` window of the simulation horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub name: &'static str,
    pub start: i32,
    pub end: i32,
}

pub const PHASES: [Phase; 5] = [
    Phase {
        name: "AI Copilots",
        start: 2024,
        end: 2026,
    },
    Phase {
        name: "AI Agents",
        start: 2026,
        end: 2028,
    },
    Phase {
        name: "AI Workers",
        start: 2028,
        end: 2031,
    },
    Phase {
        name: "Physical Robots",
        start: 2031,
        end: 2035,
    },
    Phase {
        name: "AGI/Post-Labor",
        start: 2035,
        end: 2040,
    },
];

/// Index into [`PHASES`] of the window containing `year`.
///
/// Years before the first phase map to 0, years at or after the end of the
/// last phase map to the last index.
pub fn phase_index_for_year(year: i32) -> usize {
    PHASES
        .iter()
        .rposition(|p| year >= p.start)
        .unwrap_or(0)
}

/// Phase index used for the recommender and for intervention applicability
/// at a checkpoint year: the index of the phase the checkpoint opens.
pub fn checkpoint_phase_index(year: i32) -> usize {
    phase_index_for_year(year)
}

/// (drift, volatility) amplification tier for a simulated year
pub fn phase_multipliers(year: i32) -> (f64, f64) {
    match year {
        y if y >= 2035 => (2.0, 1.8),
        y if y >= 2031 => (1.6, 1.5),
        y if y >= 2028 => (1.3, 1.2),
        _ => (1.0, 1.0),
    }
}
