//! Static registry of policy interventions.
//!
//! Entries are laid out in [`InterventionId`] order so lookup by id is a
//! direct index. Nothing here is mutable at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionId {
    AggressiveUbi,
    RegulationSlowdown,
    RetrainingInitiative,
    AccelerateAdoption,
    WealthTax,
    DoNothing,
}

impl InterventionId {
    pub const ALL: [InterventionId; 6] = [
        InterventionId::AggressiveUbi,
        InterventionId::RegulationSlowdown,
        InterventionId::RetrainingInitiative,
        InterventionId::AccelerateAdoption,
        InterventionId::WealthTax,
        InterventionId::DoNothing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InterventionId::AggressiveUbi => "aggressive_ubi",
            InterventionId::RegulationSlowdown => "regulation_slowdown",
            InterventionId::RetrainingInitiative => "retraining_initiative",
            InterventionId::AccelerateAdoption => "accelerate_adoption",
            InterventionId::WealthTax => "wealth_tax",
            InterventionId::DoNothing => "do_nothing",
        }
    }

    pub fn intervention(self) -> &'static Intervention {
        get(self)
    }
}

impl fmt::Display for InterventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionId {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterventionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RequestError::UnknownIntervention(s.to_string()))
    }
}

/// Additive (drift, volatility) adjustment before decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub drift: f64,
    pub vol: f64,
}

const fn effect(key: &'static str, drift: f64, vol: f64) -> (&'static str, Effect) {
    (key, Effect { drift, vol })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intervention {
    pub id: InterventionId,
    pub label: &'static str,
    pub description: &'static str,
    /// Variable key to effect
    pub effects: &'static [(&'static str, Effect)],
    /// Phase indices in which the intervention may be chosen
    pub applicable_phases: &'static [usize],
}

impl Intervention {
    pub fn effect_on(&self, key: &str) -> Option<Effect> {
        self.effects
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, e)| *e)
    }

    pub fn is_applicable(&self, phase_index: usize) -> bool {
        self.applicable_phases.contains(&phase_index)
    }
}

pub static CATALOG: [Intervention; 6] = [
    Intervention {
        id: InterventionId::AggressiveUbi,
        label: "Aggressive UBI Implementation",
        description: "Universal basic income for displaced workers",
        effects: &[
            effect("ubiProbability", 8.0, -2.0),
            effect("socialStability", 3.0, -2.0),
            effect("gdpGrowth", -1.0, 1.0),
            effect("inequality", -3.0, 0.0),
        ],
        applicable_phases: &[2, 3, 4],
    },
    Intervention {
        id: InterventionId::RegulationSlowdown,
        label: "Heavy AI Regulation",
        description: "Slow AI deployment to preserve employment",
        effects: &[
            effect("whiteCollarEmployment", 3.0, -1.0),
            effect("productivity", -3.0, -1.0),
            effect("socialStability", 2.0, -1.0),
            effect("equities_ai", -4.0, 2.0),
        ],
        applicable_phases: &[0, 1, 2, 3],
    },
    Intervention {
        id: InterventionId::RetrainingInitiative,
        label: "Massive Retraining Programs",
        description: "Invest in workforce transition and upskilling",
        effects: &[
            effect("ai_orchestration", 4.0, -1.0),
            effect("whiteCollarEmployment", 1.0, 0.0),
            effect("socialStability", 1.0, 0.0),
            effect("gdpGrowth", 0.5, 0.0),
        ],
        applicable_phases: &[0, 1, 2],
    },
    Intervention {
        id: InterventionId::AccelerateAdoption,
        label: "AI Acceleration Incentives",
        description: "Tax breaks and subsidies for AI adoption",
        effects: &[
            effect("productivity", 3.0, 2.0),
            effect("gdpGrowth", 2.0, 2.0),
            effect("whiteCollarEmployment", -2.0, 1.0),
            effect("socialStability", -2.0, 1.0),
            effect("equities_ai", 3.0, 1.0),
        ],
        applicable_phases: &[0, 1, 2, 3],
    },
    Intervention {
        id: InterventionId::WealthTax,
        label: "Progressive Wealth Taxation",
        description: "Tax AI winners to fund social programs",
        effects: &[
            effect("inequality", -4.0, -1.0),
            effect("socialStability", 2.0, -1.0),
            effect("equities_ai", -1.0, 1.0),
            effect("crypto", 2.0, 0.0),
        ],
        applicable_phases: &[1, 2, 3, 4],
    },
    Intervention {
        id: InterventionId::DoNothing,
        label: "Status Quo",
        description: "No government intervention",
        effects: &[],
        applicable_phases: &[0, 1, 2, 3, 4],
    },
];

#[inline]
pub fn get(id: InterventionId) -> &'static Intervention {
    &CATALOG[id as usize]
}

/// Resolve a wire id; `None` when the catalog has no such entry
pub fn lookup(id: &str) -> Option<&'static Intervention> {
    id.parse::<InterventionId>().ok().map(get)
}

/// Interventions selectable in `phase_index`, in catalog order
pub fn applicable_interventions(phase_index: usize) -> Vec<InterventionId> {
    CATALOG
        .iter()
        .filter(|i| i.is_applicable(phase_index))
        .map(|i| i.id)
        .collect()
}
