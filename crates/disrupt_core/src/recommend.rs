//! Rule-based policy recommender.
//!
//! [`recommend`] is a pure function of an aggregated snapshot, the phase
//! index and the scenario. Rules are evaluated top to bottom and the first
//! match wins.

use serde::{Deserialize, Serialize};

use crate::catalog::InterventionId;
use crate::error::Result;
use crate::model::{DecisionRecord, Scenario, SimulationRequest};
use crate::registry::{
    self, BLUE_COLLAR_EMPLOYMENT, INEQUALITY, SOCIAL_STABILITY, WHITE_COLLAR_EMPLOYMENT,
};
use crate::simulation::simulate;

/// Median assumed for any indicator the snapshot lacks
pub const DEFAULT_MEDIAN: f64 = 100.0;

/// Latest medians of the indicators the recommender reads
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionSnapshot {
    pub social_stability: Option<f64>,
    pub white_collar_employment: Option<f64>,
    pub blue_collar_employment: Option<f64>,
    pub inequality: Option<f64>,
}

impl DecisionSnapshot {
    pub fn new(stability: f64, white_collar: f64, blue_collar: f64, inequality: f64) -> Self {
        Self {
            social_stability: Some(stability),
            white_collar_employment: Some(white_collar),
            blue_collar_employment: Some(blue_collar),
            inequality: Some(inequality),
        }
    }

    /// Constant medians of 100 for every indicator, ignoring simulation state
    pub fn placeholder() -> Self {
        Self::new(
            DEFAULT_MEDIAN,
            DEFAULT_MEDIAN,
            DEFAULT_MEDIAN,
            DEFAULT_MEDIAN,
        )
    }

    /// Medians at `year` of the four macro indicators, each simulated under
    /// `request` and `history`.
    pub fn aggregate(
        request: &SimulationRequest,
        history: &[DecisionRecord],
        year: i32,
    ) -> Result<Self> {
        let median = |key: &str| -> Result<Option<f64>> {
            let config = registry::require(key)?;
            let result = simulate(config, request, history)?;
            Ok(result.percentiles.median_at_or_before(year))
        };
        Ok(Self {
            social_stability: median(SOCIAL_STABILITY)?,
            white_collar_employment: median(WHITE_COLLAR_EMPLOYMENT)?,
            blue_collar_employment: median(BLUE_COLLAR_EMPLOYMENT)?,
            inequality: median(INEQUALITY)?,
        })
    }

    pub fn stability(&self) -> f64 {
        self.social_stability.unwrap_or(DEFAULT_MEDIAN)
    }

    pub fn inequality(&self) -> f64 {
        self.inequality.unwrap_or(DEFAULT_MEDIAN)
    }

    /// Mean of white- and blue-collar employment
    pub fn employment(&self) -> f64 {
        (self.white_collar_employment.unwrap_or(DEFAULT_MEDIAN)
            + self.blue_collar_employment.unwrap_or(DEFAULT_MEDIAN))
            / 2.0
    }
}

/// Which row of the rule table produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    StabilityCrisis,
    PreCrisis,
    EmploymentCrisis,
    ExtremeInequality,
    CollapseScenario,
    AcceleratedStable,
    Default,
}

impl Rule {
    pub fn describe(self) -> &'static str {
        match self {
            Rule::StabilityCrisis => "stability crisis, immediate intervention",
            Rule::PreCrisis => "stability slipping, proactive measures",
            Rule::EmploymentCrisis => "employment crisis while retraining can still work",
            Rule::ExtremeInequality => "inequality extreme",
            Rule::CollapseScenario => "systemic shock scenario",
            Rule::AcceleratedStable => "acceleration handled well, do not interfere",
            Rule::Default => "stable, maintain course",
        }
    }
}

/// Recommended intervention together with the rule that fired
pub fn recommend_with_rule(
    snapshot: &DecisionSnapshot,
    phase_index: usize,
    scenario: Scenario,
) -> (InterventionId, Rule) {
    use InterventionId::*;

    let stability = snapshot.stability();
    let employment = snapshot.employment();
    let inequality = snapshot.inequality();

    if stability < 40.0 {
        let id = if inequality > 150.0 {
            WealthTax
        } else if employment < 50.0 {
            AggressiveUbi
        } else {
            RegulationSlowdown
        };
        return (id, Rule::StabilityCrisis);
    }

    if stability < 60.0 {
        let id = if employment < 60.0 && phase_index >= 2 {
            AggressiveUbi
        } else if inequality > 140.0 {
            WealthTax
        } else {
            RegulationSlowdown
        };
        return (id, Rule::PreCrisis);
    }

    if employment < 50.0 && phase_index <= 2 {
        return (RetrainingInitiative, Rule::EmploymentCrisis);
    }

    if inequality > 160.0 {
        return (WealthTax, Rule::ExtremeInequality);
    }

    match scenario {
        Scenario::Collapse => {
            let id = if phase_index >= 2 {
                AggressiveUbi
            } else {
                RegulationSlowdown
            };
            (id, Rule::CollapseScenario)
        }
        Scenario::Accelerated if stability > 70.0 => (DoNothing, Rule::AcceleratedStable),
        _ => (DoNothing, Rule::Default),
    }
}

/// Recommended intervention for a checkpoint
pub fn recommend(
    snapshot: &DecisionSnapshot,
    phase_index: usize,
    scenario: Scenario,
) -> InterventionId {
    recommend_with_rule(snapshot, phase_index, scenario).0
}
