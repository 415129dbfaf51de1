//! Property-based tests for orbit propagation using proptest.
//!
//! These tests verify that propagated positions keep the geometric
//! properties of the ellipse across a wide range of elements.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::{AnomalyModel, OrbitalElements};

fn any_model() -> impl Strategy<Value = AnomalyModel> {
    prop_oneof![Just(AnomalyModel::MeanAsTrue), Just(AnomalyModel::Kepler)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Before the tilt is applied the body stays in the y = 0 plane.
    #[test]
    fn prop_planar_position_has_zero_y(
        a in 1.0f64..1e6,
        e in 0.0f64..0.95,
        speed in -5.0f64..5.0,
        incl in -3.0f64..3.0,
        t in -1e4f64..1e4,
        model in any_model(),
    ) {
        let orbit = OrbitalElements::new(a, e, speed, incl).unwrap().with_anomaly_model(model);
        prop_assert_eq!(orbit.planar_position(t).y, 0.0);
    }

    /// Distance from the focus stays within [a(1-e), a(1+e)].
    #[test]
    fn prop_distance_within_apsides(
        a in 1.0f64..1e6,
        e in 0.0f64..0.95,
        speed in -5.0f64..5.0,
        incl in -3.0f64..3.0,
        t in -1e4f64..1e4,
        model in any_model(),
    ) {
        let orbit = OrbitalElements::new(a, e, speed, incl).unwrap().with_anomaly_model(model);
        let untilted = orbit.untilt(orbit.position(t));
        let r = untilted.length();
        let slack = a * 1e-9;

        prop_assert!(untilted.y.abs() <= slack, "untilted y = {}", untilted.y);
        prop_assert!(
            r >= orbit.periapsis() - slack && r <= orbit.apoapsis() + slack,
            "r={} outside [{}, {}]", r, orbit.periapsis(), orbit.apoapsis()
        );
    }

    /// Position repeats after one full period.
    #[test]
    fn prop_position_periodicity(
        a in 1.0f64..1e4,
        e in 0.0f64..0.9,
        speed in prop_oneof![-5.0f64..-0.05, 0.05f64..5.0],
        incl in -1.5f64..1.5,
        t in 0.0f64..100.0,
    ) {
        let orbit = OrbitalElements::new(a, e, speed, incl).unwrap();
        let period = TAU / speed;
        let p1 = orbit.position(t);
        let p2 = orbit.position(t + period);

        let diff = (p2 - p1).length();
        prop_assert!(
            diff <= a * 1e-8,
            "position should repeat after one period, diff = {}", diff
        );
    }

    /// Rotating the plane never changes the distance from the focus.
    #[test]
    fn prop_tilt_preserves_length(
        a in 1.0f64..1e4,
        e in 0.0f64..0.9,
        incl in -3.0f64..3.0,
        t in 0.0f64..100.0,
    ) {
        let flat = OrbitalElements::new(a, e, 1.0, 0.0).unwrap();
        let tilted = OrbitalElements::new(a, e, 1.0, incl).unwrap();
        let diff = (flat.position(t).length() - tilted.position(t).length()).abs();
        prop_assert!(diff <= a * 1e-12);
    }

    /// Kepler solver satisfies M = E - e*sin(E).
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.95,
    ) {
        let mean_anomaly = mean_anomaly_normalized * TAU;
        let e_anom = super::kepler::solve_eccentric_anomaly(mean_anomaly, eccentricity);
        let m_check = e_anom - eccentricity * e_anom.sin();
        let error = (m_check - mean_anomaly.rem_euclid(TAU)).abs();
        prop_assert!(
            error < 1e-8,
            "Kepler solver failed: M={}, e={}, E={}, error={}",
            mean_anomaly, eccentricity, e_anom, error
        );
    }
}
