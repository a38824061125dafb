//! Tests for the recommendation rule table

use crate::catalog::InterventionId::{self, *};
use crate::model::Scenario;
use crate::recommend::{DecisionSnapshot, Rule, recommend, recommend_with_rule};

fn snap(stability: f64, employment: f64, inequality: f64) -> DecisionSnapshot {
    DecisionSnapshot::new(stability, employment, employment, inequality)
}

fn rec(s: &DecisionSnapshot, phase: usize, scenario: Scenario) -> InterventionId {
    recommend(s, phase, scenario)
}

#[test]
fn test_crisis_wealth_tax_wins_over_low_employment() {
    let s = snap(30.0, 40.0, 160.0);
    assert_eq!(
        recommend_with_rule(&s, 0, Scenario::Base),
        (WealthTax, Rule::StabilityCrisis)
    );
}

#[test]
fn test_crisis_branches() {
    assert_eq!(rec(&snap(30.0, 40.0, 120.0), 3, Scenario::Base), AggressiveUbi);
    assert_eq!(
        rec(&snap(39.9, 80.0, 150.0), 3, Scenario::Base),
        RegulationSlowdown
    );
}

#[test]
fn test_pre_crisis_branches() {
    assert_eq!(rec(&snap(50.0, 55.0, 100.0), 2, Scenario::Base), AggressiveUbi);
    // same employment, too early for UBI
    assert_eq!(
        rec(&snap(50.0, 55.0, 100.0), 1, Scenario::Base),
        RegulationSlowdown
    );
    assert_eq!(rec(&snap(50.0, 55.0, 141.0), 1, Scenario::Base), WealthTax);
    assert_eq!(
        rec(&snap(59.0, 90.0, 120.0), 4, Scenario::Collapse),
        RegulationSlowdown
    );
}

#[test]
fn test_employment_crisis_only_in_early_phases() {
    assert_eq!(
        rec(&snap(80.0, 45.0, 100.0), 2, Scenario::Base),
        RetrainingInitiative
    );
    assert_eq!(rec(&snap(80.0, 45.0, 100.0), 3, Scenario::Base), DoNothing);
}

#[test]
fn test_employment_uses_mean_of_both_indices() {
    let s = DecisionSnapshot::new(80.0, 20.0, 90.0, 100.0);
    assert_eq!(s.employment(), 55.0);
    assert_eq!(rec(&s, 0, Scenario::Base), DoNothing);
}

#[test]
fn test_extreme_inequality() {
    assert_eq!(
        recommend_with_rule(&snap(80.0, 80.0, 161.0), 4, Scenario::Collapse),
        (WealthTax, Rule::ExtremeInequality)
    );
}

#[test]
fn test_collapse_scenario_defaults() {
    let calm = snap(100.0, 100.0, 100.0);
    assert_eq!(rec(&calm, 1, Scenario::Collapse), RegulationSlowdown);
    assert_eq!(rec(&calm, 2, Scenario::Collapse), AggressiveUbi);
}

#[test]
fn test_accelerated_stable() {
    assert_eq!(
        recommend_with_rule(&snap(71.0, 100.0, 100.0), 3, Scenario::Accelerated),
        (DoNothing, Rule::AcceleratedStable)
    );
    assert_eq!(
        recommend_with_rule(&snap(65.0, 100.0, 100.0), 3, Scenario::Accelerated),
        (DoNothing, Rule::Default)
    );
}

#[test]
fn test_default_is_do_nothing_for_any_phase() {
    let calm = snap(100.0, 100.0, 100.0);
    for phase in 0..5 {
        for scenario in [Scenario::Base, Scenario::Regulated, Scenario::Accelerated] {
            assert_eq!(rec(&calm, phase, scenario), DoNothing);
        }
    }
}

#[test]
fn test_missing_indicators_default_to_100() {
    let empty = DecisionSnapshot::default();
    assert_eq!(empty, DecisionSnapshot {
        social_stability: None,
        white_collar_employment: None,
        blue_collar_employment: None,
        inequality: None,
    });
    assert_eq!(empty.stability(), 100.0);
    assert_eq!(empty.employment(), 100.0);
    assert_eq!(rec(&empty, 2, Scenario::Base), DoNothing);
    assert_eq!(
        rec(&empty, 2, Scenario::Base),
        rec(&DecisionSnapshot::placeholder(), 2, Scenario::Base)
    );
}

#[test]
fn test_boundaries_are_strict() {
    // stability exactly 40 is pre-crisis, exactly 60 is stable
    assert_eq!(
        recommend_with_rule(&snap(40.0, 100.0, 100.0), 0, Scenario::Base).1,
        Rule::PreCrisis
    );
    assert_eq!(
        recommend_with_rule(&snap(60.0, 100.0, 160.0), 0, Scenario::Base).1,
        Rule::Default
    );
}
