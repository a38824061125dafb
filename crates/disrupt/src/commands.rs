use disrupt_core::catalog::{self, CATALOG, applicable_interventions};
use disrupt_core::model::START_YEAR;
use disrupt_core::simulation::{compare_category, simulate};
use disrupt_core::{
    Category, CheckpointState, DecisionSession, DecisionSnapshot, RequestError, registry,
};

use crate::cli::{Args, Command, RunOptions};
use crate::config::{AppConfig, OutputFormat};
use crate::render::{
    CatalogReport, CheckpointOutcome, ComparisonReport, RecommendationReport, SessionReport,
    SimulationReport, VariableListing, VariablesReport, render,
};

/// Load the config, run the subcommand and print its report to stdout
pub fn run(args: Args) -> color_eyre::Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let format = args.format.unwrap_or(config.format);
    let output = execute(&args.command, &config, format)?;
    print!("{output}");
    Ok(())
}

/// Run one subcommand and render its report
pub fn execute(
    command: &Command,
    config: &AppConfig,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    match command {
        Command::Variables { category } => {
            let categories = match category {
                Some(c) => vec![*c],
                None => Category::ALL.to_vec(),
            };
            let mut groups: Vec<_> = categories
                .into_iter()
                .map(|category| VariableListing {
                    category: Some(category),
                    variables: registry::variables(category),
                })
                .collect();
            if !config.extra_variables.is_empty() {
                groups.push(VariableListing {
                    category: None,
                    variables: &config.extra_variables,
                });
            }
            render(&VariablesReport { groups }, format)
        }

        Command::Catalog { phase } => {
            let interventions = match phase {
                Some(p) => applicable_interventions(*p)
                    .into_iter()
                    .map(catalog::get)
                    .collect(),
                None => CATALOG.iter().collect(),
            };
            render(
                &CatalogReport {
                    phase_index: *phase,
                    interventions,
                },
                format,
            )
        }

        Command::Simulate {
            key,
            run,
            decisions,
            samples,
        } => {
            let variable = config
                .find_variable(key)
                .ok_or_else(|| RequestError::UnknownVariable(key.clone()))?;
            let request = run.request(config);
            tracing::info!(
                key = %key,
                scenario = %request.scenario,
                num_paths = request.num_paths,
                decisions = decisions.len(),
                "simulating"
            );

            let mut result = simulate(variable, &request, decisions)?;
            if !samples {
                result.sample_paths.clear();
            }
            render(
                &SimulationReport {
                    category: registry::category_of(key),
                    scenario: request.scenario,
                    num_paths: request.num_paths,
                    seed: request.seed,
                    decisions: decisions.clone(),
                    result,
                },
                format,
            )
        }

        Command::Compare {
            category,
            scenario,
            years,
            seed,
        } => {
            let request = RunOptions {
                scenario: *scenario,
                years: *years,
                seed: *seed,
                paths: None,
            }
            .request(config);
            let ranking = compare_category(*category, &request)?;
            render(
                &ComparisonReport {
                    category: *category,
                    scenario: request.scenario,
                    final_year: START_YEAR + request.num_years as i32,
                    ranking,
                },
                format,
            )
        }

        Command::Recommend {
            stability,
            white_collar,
            blue_collar,
            inequality,
            phase,
            scenario,
        } => {
            let snapshot = DecisionSnapshot {
                social_stability: *stability,
                white_collar_employment: *white_collar,
                blue_collar_employment: *blue_collar,
                inequality: *inequality,
            };
            let scenario = scenario.unwrap_or(config.scenario);
            let (recommended, rule) =
                disrupt_core::recommend::recommend_with_rule(&snapshot, *phase, scenario);
            render(
                &RecommendationReport {
                    phase_index: *phase,
                    scenario,
                    snapshot,
                    recommended,
                    rule,
                },
                format,
            )
        }

        Command::Session {
            until,
            variable,
            snapshot,
            run,
        } => {
            let target = config
                .find_variable(variable)
                .ok_or_else(|| RequestError::UnknownVariable(variable.clone()))?;
            let request = run.request(config);
            let mut session = DecisionSession::new(request, snapshot.unwrap_or(config.snapshot));

            let mut checkpoints = Vec::new();
            while let CheckpointState::Open(cp) = session.advance_to(*until)? {
                checkpoints.push(CheckpointOutcome::new(cp));
                session.accept_recommendation()?;
            }

            let result = simulate(target, &request, session.history())?;
            render(
                &SessionReport {
                    scenario: request.scenario,
                    num_paths: request.num_paths,
                    seed: request.seed,
                    checkpoints,
                    result,
                },
                format,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use disrupt_core::VariableConfig;
    use serde_json::Value;

    fn json(argv: &[&str], config: &AppConfig) -> Value {
        let args = Args::try_parse_from(argv).unwrap();
        let output = execute(&args.command, config, OutputFormat::Json).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_simulate_bands() {
        let value = json(
            &["disrupt", "simulate", "whiteCollarEmployment", "--paths", "40"],
            &AppConfig::default(),
        );
        let rows = value["result"]["percentiles"].as_array().unwrap();
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[0]["year"], 2024);
        assert_eq!(rows[0]["median"], 100.0);
        assert_eq!(rows[16]["year"], 2040);
        assert!(value["result"]["sample_paths"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_simulate_reports_category() {
        let config = AppConfig {
            extra_variables: vec![VariableConfig::new("housing", "Housing", 100.0, 0.0, 1.0)],
            ..Default::default()
        };
        let builtin = json(&["disrupt", "simulate", "crypto", "--paths", "5"], &config);
        assert_eq!(builtin["category"], "assets");
        let extra = json(&["disrupt", "simulate", "housing", "--paths", "5"], &config);
        assert!(extra["category"].is_null());
    }

    #[test]
    fn test_simulate_samples_capped() {
        let value = json(
            &["disrupt", "simulate", "gold", "--paths", "20", "--samples"],
            &AppConfig::default(),
        );
        assert_eq!(value["result"]["sample_paths"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_simulate_extra_variable() {
        let config = AppConfig {
            extra_variables: vec![
                VariableConfig::new("housing", "Housing", 100.0, -1.0, 0.0).with_floor(90.0),
            ],
            ..Default::default()
        };
        let value = json(&["disrupt", "simulate", "housing", "--paths", "5"], &config);
        let rows = value["result"]["percentiles"].as_array().unwrap();
        assert_eq!(rows[16]["median"], 90.0);
    }

    #[test]
    fn test_unknown_variable() {
        let args = Args::try_parse_from(["disrupt", "simulate", "tulips"]).unwrap();
        let err = execute(&args.command, &AppConfig::default(), OutputFormat::Table).unwrap_err();
        assert!(err.to_string().contains("tulips"));
    }

    #[test]
    fn test_zero_paths_rejected() {
        let args = Args::try_parse_from(["disrupt", "simulate", "gold", "--paths", "0"]).unwrap();
        assert!(execute(&args.command, &AppConfig::default(), OutputFormat::Table).is_err());
    }

    #[test]
    fn test_compare_sorted_descending() {
        let value = json(&["disrupt", "compare", "skills"], &AppConfig::default());
        assert_eq!(value["final_year"], 2040);
        let medians: Vec<f64> = value["ranking"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["final_median"].as_f64().unwrap())
            .collect();
        assert_eq!(medians.len(), 8);
        assert!(medians.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_catalog_for_phase() {
        let value = json(&["disrupt", "catalog", "--phase", "0"], &AppConfig::default());
        let ids: Vec<&str> = value["interventions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|iv| iv["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["regulation_slowdown", "retraining_initiative", "accelerate_adoption", "do_nothing"]
        );
    }

    #[test]
    fn test_recommend_defaults_missing_indicators() {
        let value = json(
            &["disrupt", "recommend", "--stability", "35", "--inequality", "155"],
            &AppConfig::default(),
        );
        assert_eq!(value["recommended"], "wealth_tax");
        assert_eq!(value["rule"], "stability_crisis");
    }

    #[test]
    fn test_session_collapse_placeholder() {
        let value = json(
            &[
                "disrupt",
                "session",
                "--scenario",
                "collapse",
                "--snapshot",
                "placeholder",
                "--paths",
                "20",
            ],
            &AppConfig::default(),
        );
        let picks: Vec<(i64, &str)> = value["checkpoints"]
            .as_array()
            .unwrap()
            .iter()
            .map(|cp| (cp["year"].as_i64().unwrap(), cp["recommended"].as_str().unwrap()))
            .collect();
        assert_eq!(
            picks,
            vec![
                (2026, "regulation_slowdown"),
                (2028, "aggressive_ubi"),
                (2031, "aggressive_ubi"),
                (2035, "aggressive_ubi"),
            ]
        );
    }

    #[test]
    fn test_session_stops_at_until() {
        let value = json(
            &["disrupt", "session", "--until", "2029", "--snapshot", "placeholder"],
            &AppConfig::default(),
        );
        assert_eq!(value["checkpoints"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_table_output() {
        let args = Args::try_parse_from(["disrupt", "variables", "--category", "assets"]).unwrap();
        let table = execute(&args.command, &AppConfig::default(), OutputFormat::Table).unwrap();
        assert!(table.starts_with("Asset Classes"));
        assert!(table.contains("farmland"));
        assert!(!table.contains("Macro Variables"));
    }
}
