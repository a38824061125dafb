//! Single-trajectory generator.
//!
//! Each year the level moves by `drift * dt + vol * sqrt(dt) * shock` with
//! `dt = 1`, after drift and volatility have been scaled by the phase tier,
//! the scenario, and any decayed intervention effects in force that year.

use rand_distr::Distribution;

use crate::catalog::Effect;
use crate::error::ConfigError;
use crate::model::{
    DecisionRecord, START_YEAR, Scenario, Trajectory, VariableConfig, phase_multipliers,
};
use crate::rng::{BoxMuller, Mulberry32};

/// Years for an intervention effect to lose half its strength
pub const EFFECT_HALF_LIFE_YEARS: f64 = 5.0;

/// Volatility never drops below this once an intervention touches it
pub const MIN_INTERVENTION_VOL: f64 = 1.0;

const DT: f64 = 1.0;

/// An intervention effect on one variable, applied from `year` onwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionEffect {
    pub year: i32,
    pub effect: Effect,
}

impl DecisionEffect {
    /// Decay weight `0.5^(elapsed / half_life)` at `year`
    #[inline]
    pub fn weight(&self, year: i32) -> f64 {
        0.5f64.powf(f64::from(year - self.year) / EFFECT_HALF_LIFE_YEARS)
    }
}

/// Effects of `history` on the variable `key`, in history order.
///
/// Records naming an intervention missing from the catalog are skipped and
/// logged; records whose intervention does not touch `key` are dropped.
pub fn resolve_effects(key: &str, history: &[DecisionRecord]) -> Vec<DecisionEffect> {
    history
        .iter()
        .filter_map(|record| {
            let Some(intervention) = record.intervention() else {
                tracing::warn!(
                    year = record.year,
                    intervention = %record.intervention_id,
                    "decision references unknown intervention; ignoring it"
                );
                return None;
            };
            intervention.effect_on(key).map(|effect| DecisionEffect {
                year: record.year,
                effect,
            })
        })
        .collect()
}

/// Drift and volatility in force for `year`.
///
/// Phase and scenario multipliers scale the config's base values only;
/// intervention effects are added afterwards at their own decayed strength.
pub fn step_parameters(
    config: &VariableConfig,
    year: i32,
    scenario: Scenario,
    effects: &[DecisionEffect],
) -> (f64, f64) {
    let (phase_drift, phase_vol) = phase_multipliers(year);
    let (scenario_drift, scenario_vol) = scenario.multipliers();

    let mut drift = config.drift * phase_drift * scenario_drift;
    let mut vol = config.vol * phase_vol * scenario_vol;

    for active in effects.iter().filter(|e| e.year <= year) {
        let weight = active.weight(year);
        drift += active.effect.drift * weight;
        vol = (vol + active.effect.vol * weight).max(MIN_INTERVENTION_VOL);
    }

    (drift, vol)
}

/// Round half up to cents
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// One trajectory with no interventions. Invalid configs are rejected.
pub fn generate_path(
    config: &VariableConfig,
    num_years: u32,
    seed: u32,
    scenario: Scenario,
) -> Result<Trajectory, ConfigError> {
    config.validate()?;
    Ok(generate_path_with_effects(config, num_years, seed, scenario, &[]))
}

/// One trajectory under a decision history
pub fn generate_path_with_decisions(
    config: &VariableConfig,
    num_years: u32,
    seed: u32,
    scenario: Scenario,
    history: &[DecisionRecord],
) -> Result<Trajectory, ConfigError> {
    config.validate()?;
    let effects = resolve_effects(&config.key, history);
    Ok(generate_path_with_effects(config, num_years, seed, scenario, &effects))
}

/// One trajectory under already-resolved effects.
///
/// The config must already be validated; the starting point is the unrounded base
/// and every later point is clamped to floor then cap before rounding.
pub fn generate_path_with_effects(
    config: &VariableConfig,
    num_years: u32,
    seed: u32,
    scenario: Scenario,
    effects: &[DecisionEffect],
) -> Trajectory {
    let mut rng = Mulberry32::new(seed);
    let mut path = Trajectory::with_capacity(num_years as usize + 1);
    path.push(START_YEAR, config.base);

    let mut value = config.base;
    for step in 1..=num_years {
        let year = START_YEAR + step as i32;
        let (drift, vol) = step_parameters(config, year, scenario, effects);
        let shock: f64 = BoxMuller.sample(&mut rng);

        value = value + drift * DT + vol * DT.sqrt() * shock;
        value = config.clamp(value);
        path.push(year, round2(value));
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InterventionId;

    fn flat() -> VariableConfig {
        VariableConfig::new("flat", "Flat", 50.0, 0.0, 0.0)
    }

    #[test]
    fn test_zero_years_is_single_point() {
        let cfg = VariableConfig::new("x", "X", 100.0, -2.8, 4.0).with_floor(15.0);
        let path = generate_path(&cfg, 0, 42, Scenario::Base).unwrap();
        assert_eq!(path.points.len(), 1);
        assert_eq!(path.points[0].year, START_YEAR);
        assert_eq!(path.points[0].value, 100.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let negative_vol = VariableConfig::new("x", "X", 50.0, 0.0, -4.0);
        assert!(matches!(
            generate_path(&negative_vol, 3, 42, Scenario::Base),
            Err(ConfigError::NegativeVolatility { .. })
        ));

        let below_floor = VariableConfig::new("x", "X", 5.0, 0.0, 4.0).with_floor(10.0);
        assert!(matches!(
            generate_path(&below_floor, 3, 42, Scenario::Base),
            Err(ConfigError::BaseOutOfBounds { .. })
        ));
        assert!(matches!(
            generate_path_with_decisions(&below_floor, 3, 42, Scenario::Base, &[]),
            Err(ConfigError::BaseOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_flat_config_stays_at_base() {
        let path = generate_path(&flat(), 16, 9, Scenario::Collapse).unwrap();
        assert_eq!(path.len(), 17);
        assert!(path.values().all(|v| v == 50.0));
    }

    #[test]
    fn test_years_are_consecutive() {
        let path = generate_path(&flat(), 16, 1, Scenario::Base).unwrap();
        for (i, p) in path.points.iter().enumerate() {
            assert_eq!(p.year, START_YEAR + i as i32);
        }
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(1.005 + 1e-9), 1.01);
        assert_eq!(round2(93.384), 93.38);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(15.0), 15.0);
    }

    #[test]
    fn test_step_parameters_multipliers() {
        let cfg = VariableConfig::new("x", "X", 100.0, 2.0, 10.0);
        assert_eq!(step_parameters(&cfg, 2025, Scenario::Base, &[]), (2.0, 10.0));
        let (drift, vol) = step_parameters(&cfg, 2036, Scenario::Collapse, &[]);
        assert_eq!(drift, 2.0 * 2.0 * 1.8);
        assert_eq!(vol, 10.0 * 1.8 * 2.0);
    }

    #[test]
    fn test_effect_decays_with_five_year_half_life() {
        let cfg = VariableConfig::new("x", "X", 100.0, 0.0, 10.0);
        let effects = [DecisionEffect {
            year: 2026,
            effect: Effect {
                drift: 8.0,
                vol: 0.0,
            },
        }];
        let (at_start, _) = step_parameters(&cfg, 2026, Scenario::Base, &effects);
        let (five_later, _) = step_parameters(&cfg, 2031, Scenario::Base, &effects);
        let (before, _) = step_parameters(&cfg, 2025, Scenario::Base, &effects);
        assert_eq!(at_start, 8.0);
        assert_eq!(five_later, 4.0);
        assert_eq!(before, 0.0);
    }

    #[test]
    fn test_negative_vol_effect_clamps_at_one() {
        let cfg = VariableConfig::new("x", "X", 100.0, 0.0, 2.0);
        let effects = [DecisionEffect {
            year: 2025,
            effect: Effect {
                drift: 0.0,
                vol: -5.0,
            },
        }];
        let (_, vol) = step_parameters(&cfg, 2025, Scenario::Base, &effects);
        assert_eq!(vol, MIN_INTERVENTION_VOL);
    }

    #[test]
    fn test_resolve_effects_skips_unknown_and_untouched() {
        let history = vec![
            DecisionRecord::new(2026, InterventionId::RegulationSlowdown),
            DecisionRecord {
                year: 2028,
                intervention_id: "moon_base".to_string(),
            },
            DecisionRecord::new(2031, InterventionId::AggressiveUbi),
        ];
        let effects = resolve_effects("whiteCollarEmployment", &history);
        assert_eq!(
            effects,
            vec![DecisionEffect {
                year: 2026,
                effect: Effect {
                    drift: 3.0,
                    vol: -1.0
                }
            }]
        );
    }
}
