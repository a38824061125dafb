//! Descriptors of simulated quantities

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RequestError};

/// Immutable descriptor of one simulated quantity.
///
/// Registry entries are `const` and borrow their strings; configs loaded from
/// a file own theirs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    /// Level at the start year
    pub base: f64,
    /// Mean increment per year
    pub drift: f64,
    /// Standard deviation of the yearly shock
    pub vol: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
}

impl VariableConfig {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        base: f64,
        drift: f64,
        vol: f64,
    ) -> Self {
        Self {
            key: Cow::Borrowed(key),
            label: Cow::Borrowed(label),
            base,
            drift,
            vol,
            floor: None,
            cap: None,
        }
    }

    pub const fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub const fn with_cap(mut self, cap: f64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Check the config invariants: finite numbers, `vol >= 0`,
    /// `floor <= cap` and `floor <= base <= cap` for whichever bounds exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = || self.key.to_string();
        for (field, value) in [
            ("base", Some(self.base)),
            ("drift", Some(self.drift)),
            ("vol", Some(self.vol)),
            ("floor", self.floor),
            ("cap", self.cap),
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ConfigError::NonFinite { key: key(), field });
            }
        }
        if self.vol < 0.0 {
            return Err(ConfigError::NegativeVolatility {
                key: key(),
                vol: self.vol,
            });
        }
        if let (Some(floor), Some(cap)) = (self.floor, self.cap)
            && floor > cap
        {
            return Err(ConfigError::FloorAboveCap {
                key: key(),
                floor,
                cap,
            });
        }
        if self.floor.is_some_and(|f| self.base < f) || self.cap.is_some_and(|c| self.base > c) {
            return Err(ConfigError::BaseOutOfBounds {
                key: key(),
                base: self.base,
            });
        }
        Ok(())
    }

    /// Apply the floor, then the cap.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(floor) = self.floor {
            v = v.max(floor);
        }
        if let Some(cap) = self.cap {
            v = v.min(cap);
        }
        v
    }
}

/// Which registry a variable belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Macro,
    Assets,
    Skills,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Macro, Category::Assets, Category::Skills];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Macro => "macro",
            Category::Assets => "assets",
            Category::Skills => "skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Macro => "Macro Variables",
            Category::Assets => "Asset Classes",
            Category::Skills => "Skill Values",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RequestError::UnknownCategory(s.to_string()))
    }
}
