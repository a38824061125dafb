//! Built-in variable registries.
//!
//! The tables are read-only statics; a key index over all of them is built once on
//! first lookup.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::RequestError;
use crate::model::{Category, VariableConfig};

pub static MACRO_VARS: [VariableConfig; 8] = [
    VariableConfig::new(
        "whiteCollarEmployment",
        "White Collar Employment %",
        100.0,
        -2.8,
        4.0,
    )
    .with_floor(15.0),
    VariableConfig::new(
        "blueCollarEmployment",
        "Blue Collar Employment %",
        100.0,
        -0.8,
        3.0,
    )
    .with_floor(20.0),
    VariableConfig::new("gdpGrowth", "GDP Growth (indexed)", 100.0, 1.5, 8.0).with_floor(60.0),
    VariableConfig::new("inequality", "Inequality Index", 100.0, 3.5, 6.0)
        .with_floor(80.0)
        .with_cap(300.0),
    VariableConfig::new(
        "socialStability",
        "Social Stability Index",
        100.0,
        -1.5,
        7.0,
    )
    .with_floor(20.0),
    VariableConfig::new("ubiProbability", "UBI Probability %", 5.0, 5.0, 8.0)
        .with_floor(0.0)
        .with_cap(99.0),
    VariableConfig::new("productivity", "Productivity (indexed)", 100.0, 6.0, 10.0)
        .with_floor(80.0),
    VariableConfig::new("deflationPressure", "Deflation Pressure", 10.0, 3.0, 5.0)
        .with_floor(0.0)
        .with_cap(100.0),
];

pub static ASSET_CLASSES: [VariableConfig; 11] = [
    VariableConfig::new("equities_ai", "AI/Tech Equities", 100.0, 12.0, 25.0).with_floor(10.0),
    VariableConfig::new("equities_trad", "Traditional Equities", 100.0, -2.0, 18.0)
        .with_floor(10.0),
    VariableConfig::new("realEstate_comm", "Commercial RE", 100.0, -4.0, 12.0).with_floor(15.0),
    VariableConfig::new("realEstate_res", "Residential RE", 100.0, 0.5, 8.0).with_floor(40.0),
    VariableConfig::new("crypto", "Crypto/BTC", 100.0, 15.0, 45.0).with_floor(5.0),
    VariableConfig::new("gold", "Gold/Precious Metals", 100.0, 6.0, 15.0).with_floor(50.0),
    VariableConfig::new("bonds_govt", "Govt Bonds", 100.0, -1.0, 6.0).with_floor(40.0),
    VariableConfig::new("energy_infra", "Energy/Compute Infra", 100.0, 10.0, 20.0)
        .with_floor(20.0),
    VariableConfig::new("robotics_etf", "Robotics/Automation", 100.0, 14.0, 28.0)
        .with_floor(10.0),
    VariableConfig::new("defense_tech", "Defense Tech/Autonomy", 100.0, 11.0, 24.0)
        .with_floor(15.0),
    VariableConfig::new("farmland", "Farmland/Hard Assets", 100.0, 4.0, 8.0).with_floor(60.0),
];

pub static SKILL_CLASSES: [VariableConfig; 8] = [
    VariableConfig::new("coding", "Traditional Coding", 100.0, -8.0, 12.0).with_floor(5.0),
    VariableConfig::new("ai_orchestration", "AI Orchestration", 100.0, 12.0, 15.0)
        .with_floor(20.0),
    VariableConfig::new("human_judgment", "Human Judgment/Ethics", 100.0, 4.0, 8.0)
        .with_floor(40.0),
    VariableConfig::new("physical_trades", "Physical Trades", 100.0, -1.0, 6.0).with_floor(15.0),
    VariableConfig::new("creative", "Creative/Artistic", 100.0, -3.0, 15.0).with_floor(10.0),
    VariableConfig::new("capital_mgmt", "Capital Allocation", 100.0, 6.0, 10.0).with_floor(30.0),
    VariableConfig::new("political_power", "Political/Regulatory", 100.0, 8.0, 12.0)
        .with_floor(40.0),
    VariableConfig::new("systems_thinking", "Systems Thinking", 100.0, 5.0, 8.0)
        .with_floor(35.0),
];

/// Macro variables feeding the recommender snapshot
pub const SOCIAL_STABILITY: &str = "socialStability";
pub const WHITE_COLLAR_EMPLOYMENT: &str = "whiteCollarEmployment";
pub const BLUE_COLLAR_EMPLOYMENT: &str = "blueCollarEmployment";
pub const INEQUALITY: &str = "inequality";

pub fn variables(category: Category) -> &'static [VariableConfig] {
    match category {
        Category::Macro => &MACRO_VARS,
        Category::Assets => &ASSET_CLASSES,
        Category::Skills => &SKILL_CLASSES,
    }
}

static INDEX: LazyLock<FxHashMap<&'static str, (Category, &'static VariableConfig)>> =
    LazyLock::new(|| {
        let mut index = FxHashMap::default();
        for category in Category::ALL {
            for cfg in variables(category) {
                index.insert(cfg.key.as_ref(), (category, cfg));
            }
        }
        index
    });

/// Find a built-in variable by key across all registries
pub fn find(key: &str) -> Option<&'static VariableConfig> {
    INDEX.get(key).map(|(_, cfg)| *cfg)
}

/// Registry a built-in variable belongs to
pub fn category_of(key: &str) -> Option<Category> {
    INDEX.get(key).map(|(category, _)| *category)
}

pub fn require(key: &str) -> Result<&'static VariableConfig, RequestError> {
    find(key).ok_or_else(|| RequestError::UnknownVariable(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_configs_are_valid() {
        for category in Category::ALL {
            for cfg in variables(category) {
                assert_eq!(cfg.validate(), Ok(()), "{}", cfg.key);
            }
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let total: usize = Category::ALL.iter().map(|c| variables(*c).len()).sum();
        assert_eq!(INDEX.len(), total);
    }

    #[test]
    fn test_find() {
        let cfg = find("inequality").unwrap();
        assert_eq!(cfg.cap, Some(300.0));
        assert_eq!(category_of("crypto"), Some(Category::Assets));
        assert_eq!(category_of("coding"), Some(Category::Skills));
        assert!(find("unobtainium").is_none());
        assert_eq!(
            require("unobtainium"),
            Err(RequestError::UnknownVariable("unobtainium".into()))
        );
    }

    #[test]
    fn test_snapshot_keys_exist() {
        for key in [
            SOCIAL_STABILITY,
            WHITE_COLLAR_EMPLOYMENT,
            BLUE_COLLAR_EMPLOYMENT,
            INEQUALITY,
        ] {
            assert_eq!(category_of(key), Some(Category::Macro));
        }
    }
}
