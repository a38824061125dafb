//! Output shapes of the subcommands and their plain-text tables.
//!
//! Every report serializes to JSON/YAML through serde and implements
//! [`Table`] for the default human-readable form.

use std::fmt::Write;

use color_eyre::eyre::eyre;
use disrupt_core::model::{FinalSummary, PHASES};
use disrupt_core::recommend::Rule;
use disrupt_core::{
    Category, DecisionRecord, DecisionSnapshot, Intervention, InterventionId, Scenario,
    SimulationResult, VariableConfig,
};
use serde::Serialize;

use crate::config::OutputFormat;

pub trait Table {
    fn table(&self) -> String;
}

/// Render a report in the requested format
pub fn render<T: Serialize + Table>(report: &T, format: OutputFormat) -> color_eyre::Result<String> {
    Ok(match format {
        OutputFormat::Table => report.table(),
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Yaml => serde_saphyr::to_string(report).map_err(|e| eyre!("{e}"))?,
    })
}

fn bound(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

fn phase_name(phase_index: usize) -> &'static str {
    PHASES.get(phase_index).map_or("?", |p| p.name)
}

// ============================================================================
// variables
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VariableListing<'a> {
    /// `None` for user-defined variables from the config file
    pub category: Option<Category>,
    pub variables: &'a [VariableConfig],
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct VariablesReport<'a> {
    pub groups: Vec<VariableListing<'a>>,
}

impl Table for VariablesReport<'_> {
    fn table(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            let title = group.category.map_or("User Variables", Category::label);
            let _ = writeln!(out, "{title}");
            let _ = writeln!(
                out,
                "  {:<22} {:<34} {:>7} {:>7} {:>6} {:>6} {:>6}",
                "key", "label", "base", "drift", "vol", "floor", "cap"
            );
            for v in group.variables {
                let _ = writeln!(
                    out,
                    "  {:<22} {:<34} {:>7} {:>7} {:>6} {:>6} {:>6}",
                    v.key,
                    v.label,
                    v.base,
                    v.drift,
                    v.vol,
                    bound(v.floor),
                    bound(v.cap)
                );
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// catalog
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub phase_index: Option<usize>,
    pub interventions: Vec<&'static Intervention>,
}

impl Table for CatalogReport {
    fn table(&self) -> String {
        let mut out = String::new();
        if let Some(phase) = self.phase_index {
            let _ = writeln!(out, "Applicable in phase {phase} ({})\n", phase_name(phase));
        }
        for iv in &self.interventions {
            let phases: Vec<String> = iv.applicable_phases.iter().map(|p| p.to_string()).collect();
            let _ = writeln!(out, "{} [{}]", iv.label, iv.id);
            let _ = writeln!(out, "  {}", iv.description);
            let _ = writeln!(out, "  phases: {}", phases.join(", "));
            for (key, effect) in iv.effects {
                let _ = writeln!(
                    out,
                    "  {key:<24} drift {:>+6.1}  vol {:>+6.1}",
                    effect.drift, effect.vol
                );
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// simulate
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    /// `None` for user-defined variables
    pub category: Option<Category>,
    pub scenario: Scenario,
    pub num_paths: usize,
    pub seed: u32,
    pub decisions: Vec<DecisionRecord>,
    pub result: SimulationResult,
}

fn write_percentiles(out: &mut String, result: &SimulationResult) {
    let _ = writeln!(
        out,
        "{:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "year", "p10", "p25", "median", "p75", "p90", "mean"
    );
    for row in &result.percentiles.rows {
        let _ = writeln!(
            out,
            "{:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            row.year, row.p10, row.p25, row.median, row.p75, row.p90, row.mean
        );
    }
    if let Some(last) = result.final_row() {
        let _ = writeln!(
            out,
            "\n{} median {:.2} (P10 {:.2}, P90 {:.2})",
            last.year, last.median, last.p10, last.p90
        );
    }
}

impl Table for SimulationReport {
    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({}) | {} | {} | {} paths | seed {}",
            self.result.label,
            self.result.key,
            self.category.map_or("User Variables", Category::label),
            self.scenario.label(),
            self.num_paths,
            self.seed
        );
        for d in &self.decisions {
            let _ = writeln!(out, "  decision {}: {}", d.year, d.intervention_id);
        }
        out.push('\n');
        write_percentiles(&mut out, &self.result);

        if !self.result.sample_paths.is_empty() {
            out.push_str("\nsample paths\n");
            for (i, path) in self.result.sample_paths.iter().enumerate() {
                let values: Vec<String> = path.values().map(|v| format!("{v:.2}")).collect();
                let _ = writeln!(out, "  #{}: {}", i + 1, values.join(" "));
            }
        }
        out
    }
}

// ============================================================================
// compare
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub category: Category,
    pub scenario: Scenario,
    pub final_year: i32,
    pub ranking: Vec<FinalSummary>,
}

impl Table for ComparisonReport {
    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} | {} | final year {}\n",
            self.category.label(),
            self.scenario.label(),
            self.final_year
        );
        let _ = writeln!(
            out,
            "{:>3} {:<34} {:>9} {:>9} {:>9}",
            "#", "variable", "median", "p10", "p90"
        );
        for (rank, s) in self.ranking.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3} {:<34} {:>9.2} {:>9.2} {:>9.2}",
                rank + 1,
                s.label,
                s.final_median,
                s.final_p10,
                s.final_p90
            );
        }
        out
    }
}

// ============================================================================
// recommend / session
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecommendationReport {
    pub phase_index: usize,
    pub scenario: Scenario,
    pub snapshot: DecisionSnapshot,
    pub recommended: InterventionId,
    pub rule: Rule,
}

fn write_snapshot(out: &mut String, snapshot: &DecisionSnapshot) {
    let _ = writeln!(
        out,
        "  stability {:.2} | employment {:.2} | inequality {:.2}",
        snapshot.stability(),
        snapshot.employment(),
        snapshot.inequality()
    );
}

impl Table for RecommendationReport {
    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "phase {} ({}) | {}",
            self.phase_index,
            phase_name(self.phase_index),
            self.scenario.label()
        );
        write_snapshot(&mut out, &self.snapshot);
        let _ = writeln!(
            out,
            "recommended: {} [{}]\n  because: {}",
            self.recommended.intervention().label,
            self.recommended,
            self.rule.describe()
        );
        out
    }
}

/// One checkpoint passed on autopilot
#[derive(Debug, Serialize)]
pub struct CheckpointOutcome {
    pub year: i32,
    pub phase_index: usize,
    pub phase: &'static str,
    pub recommended: InterventionId,
    pub rule: Rule,
    pub snapshot: DecisionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub scenario: Scenario,
    pub num_paths: usize,
    pub seed: u32,
    pub checkpoints: Vec<CheckpointOutcome>,
    pub result: SimulationResult,
}

impl Table for SessionReport {
    fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} | {} paths | seed {}\n",
            self.scenario.label(),
            self.num_paths,
            self.seed
        );
        if self.checkpoints.is_empty() {
            out.push_str("no checkpoints reached\n");
        }
        for cp in &self.checkpoints {
            let _ = writeln!(
                out,
                "{} {:<16} -> {} ({})",
                cp.year,
                cp.phase,
                cp.recommended,
                cp.rule.describe()
            );
            write_snapshot(&mut out, &cp.snapshot);
        }
        let _ = writeln!(out, "\n{} ({})", self.result.label, self.result.key);
        write_percentiles(&mut out, &self.result);
        out
    }
}

impl CheckpointOutcome {
    pub fn new(checkpoint: &disrupt_core::Checkpoint) -> Self {
        Self {
            year: checkpoint.year,
            phase_index: checkpoint.phase_index,
            phase: phase_name(checkpoint.phase_index),
            recommended: checkpoint.recommended,
            rule: checkpoint.rule,
            snapshot: checkpoint.snapshot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disrupt_core::catalog;
    use disrupt_core::registry::MACRO_VARS;

    #[test]
    fn test_variables_table_lists_bounds() {
        let report = VariablesReport {
            groups: vec![VariableListing {
                category: Some(Category::Macro),
                variables: &MACRO_VARS,
            }],
        };
        let table = report.table();
        assert!(table.starts_with("Macro Variables"));
        assert!(table.contains("whiteCollarEmployment"));
        assert!(table.contains("socialStability"));
    }

    #[test]
    fn test_catalog_json_uses_wire_ids() {
        let report = CatalogReport {
            phase_index: None,
            interventions: vec![catalog::get(InterventionId::WealthTax)],
        };
        let json = render(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["interventions"][0]["id"], "wealth_tax");
    }

    #[test]
    fn test_recommendation_table_names_rule() {
        let report = RecommendationReport {
            phase_index: 2,
            scenario: Scenario::Collapse,
            snapshot: DecisionSnapshot::placeholder(),
            recommended: InterventionId::AggressiveUbi,
            rule: Rule::CollapseScenario,
        };
        let table = report.table();
        assert!(table.contains("AI Workers"));
        assert!(table.contains("aggressive_ubi"));
        assert!(table.contains(Rule::CollapseScenario.describe()));
    }

    #[test]
    fn test_yaml_output() {
        let report = RecommendationReport {
            phase_index: 1,
            scenario: Scenario::Base,
            snapshot: DecisionSnapshot::placeholder(),
            recommended: InterventionId::DoNothing,
            rule: Rule::Default,
        };
        let yaml = render(&report, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("recommended: do_nothing"));
    }
}
