use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Global multiplier regime applied uniformly to every variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    Base,
    Accelerated,
    Regulated,
    Collapse,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Base,
        Scenario::Accelerated,
        Scenario::Regulated,
        Scenario::Collapse,
    ];

    /// (drift, volatility) multipliers
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            Scenario::Base => (1.0, 1.0),
            Scenario::Accelerated => (1.5, 1.3),
            Scenario::Regulated => (0.5, 0.7),
            Scenario::Collapse => (1.8, 2.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Base => "base",
            Scenario::Accelerated => "accelerated",
            Scenario::Regulated => "regulated",
            Scenario::Collapse => "collapse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Base => "Base Case",
            Scenario::Accelerated => "Accelerated",
            Scenario::Regulated => "Regulated Slowdown",
            Scenario::Collapse => "Systemic Shock",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scenario::Base => "Gradual AI adoption, mixed policy response",
            Scenario::Accelerated => "Faster-than-expected AI capability gains",
            Scenario::Regulated => "Heavy government intervention slows deployment",
            Scenario::Collapse => "Rapid displacement triggers social/economic crisis",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RequestError::UnknownScenario(s.to_string()))
    }
}
