//! Property tests over arbitrary seeds and scenarios

use proptest::prelude::*;

use crate::model::{Ensemble, Scenario, SimulationRequest, VariableConfig};
use crate::path::generate_path;
use crate::percentiles::compute_percentiles;
use crate::simulation::run_paths;

fn any_scenario() -> impl Strategy<Value = Scenario> {
    prop::sample::select(Scenario::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_floor_is_never_breached(seed in any::<u32>(), scenario in any_scenario()) {
        let cfg = VariableConfig::new("s", "S", 100.0, -6.0, 12.0).with_floor(20.0);
        let path = generate_path(&cfg, 16, seed, scenario).unwrap();
        prop_assert!(path.values().all(|v| v >= 20.0));
    }

    #[test]
    fn prop_cap_is_never_breached(seed in any::<u32>(), scenario in any_scenario()) {
        let cfg = VariableConfig::new("p", "P", 5.0, 5.0, 8.0).with_floor(0.0).with_cap(99.0);
        let path = generate_path(&cfg, 16, seed, scenario).unwrap();
        prop_assert!(path.values().all(|v| (0.0..=99.0).contains(&v)));
    }

    #[test]
    fn prop_length_and_years(seed in any::<u32>(), years in 0u32..40) {
        let cfg = VariableConfig::new("c", "C", 100.0, 15.0, 45.0).with_floor(5.0);
        let path = generate_path(&cfg, years, seed, Scenario::Base).unwrap();
        prop_assert_eq!(path.len(), years as usize + 1);
        prop_assert_eq!(path.points[0].value, 100.0);
        for pair in path.points.windows(2) {
            prop_assert_eq!(pair[1].year, pair[0].year + 1);
        }
    }

    #[test]
    fn prop_percentile_rows_are_ordered(
        seed in any::<u32>(),
        paths in 1usize..60,
        scenario in any_scenario(),
    ) {
        let cfg = VariableConfig::new("e", "E", 100.0, 12.0, 25.0).with_floor(10.0);
        let request = SimulationRequest::new(paths, 16, seed, scenario);
        let ensemble: Ensemble = run_paths(&cfg, &request, &[]).unwrap();
        let series = compute_percentiles(&ensemble).unwrap();
        prop_assert_eq!(series.len(), 17);
        for row in &series.rows {
            prop_assert!(row.p10 <= row.p25);
            prop_assert!(row.p25 <= row.median);
            prop_assert!(row.median <= row.p75);
            prop_assert!(row.p75 <= row.p90);
        }
    }
}
