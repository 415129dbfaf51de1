//! Property-based tests for impact estimation using proptest.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{ImpactEstimator, ImpactParameters, LatitudeBand, Severity, estimate};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Larger asteroids carry strictly more energy at fixed density and speed.
    #[test]
    fn prop_energy_increases_with_diameter(
        diameter in 1.0f64..5000.0,
        growth in 1.001f64..10.0,
        density in 500.0f64..8000.0,
        speed in 1_000.0f64..70_000.0,
    ) {
        let small = ImpactParameters::new(diameter, speed, 6.371e6)
            .unwrap()
            .with_density(density)
            .unwrap();
        let large = small.with_diameter(diameter * growth).unwrap();

        prop_assert!(large.kinetic_energy_joules() > small.kinetic_energy_joules());
        prop_assert!(large.mass_kg() > small.mass_kg());
    }

    /// Severity never drops as energy grows.
    #[test]
    fn prop_severity_monotonic(
        e1 in 0.0f64..1e22,
        e2 in 0.0f64..1e22,
    ) {
        let (lo, hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
        prop_assert!(Severity::from_energy(lo) <= Severity::from_energy(hi));
    }

    /// Energy fields agree with each other.
    #[test]
    fn prop_result_units_consistent(
        diameter in 1.0f64..2000.0,
        speed in 1_000.0f64..70_000.0,
        y in -1.0f64..1.0,
    ) {
        let params = ImpactParameters::new(diameter, speed, 1.0).unwrap();
        let result = estimate(&params, DVec3::new(0.0, y, 0.0), &LatitudeBand::default());

        prop_assert!(result.energy_joules >= 0.0);
        prop_assert!(result.energy_tons_tnt >= 0.0);
        let rel = (result.energy_tons_tnt * 4.184e9 - result.energy_joules).abs() / result.energy_joules;
        prop_assert!(rel < 1e-12);
        prop_assert_eq!(result.severity, Severity::from_energy(result.energy_joules));
    }

    /// A monotone approach fires exactly once, at the first frame inside contact.
    #[test]
    fn prop_approach_fires_once(
        start in 100.0f64..10_000.0,
        step in 0.5f64..50.0,
        frames in 10usize..400,
    ) {
        let params = ImpactParameters::new(40.0, 20_000.0, 20.0).unwrap();
        let threshold = params.contact_threshold();
        let mut estimator: ImpactEstimator = ImpactEstimator::default();

        let mut fired_at = Vec::new();
        for i in 0..frames {
            let d = (start - step * i as f64).max(0.0);
            if estimator.evaluate(&params, d, DVec3::X * d).is_some() {
                fired_at.push(d);
            }
        }

        let min_d = (start - step * (frames - 1) as f64).max(0.0);
        if min_d <= threshold {
            prop_assert_eq!(fired_at.len(), 1);
            prop_assert!(fired_at[0] <= threshold);
            prop_assert!(fired_at[0] + step > threshold);
        } else {
            prop_assert!(fired_at.is_empty());
        }
    }
}
