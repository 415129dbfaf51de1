//! Kepler equation solver using Newton's method.

use std::f64::consts::{PI, TAU};

/// Iteration cap for the Newton solve.
const MAX_ITERATIONS: usize = 50;

/// Convergence threshold on the Newton step (radians).
const TOLERANCE: f64 = 1e-12;

/// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E.
///
/// # Arguments
/// * `mean_anomaly` - Mean anomaly M in radians (any range)
/// * `eccentricity` - Orbital eccentricity, 0 ≤ e < 1
///
/// # Returns
/// Eccentric anomaly E in radians, for M normalized to [0, 2π)
///
/// Newton converges well up to e ≈ 0.95. For higher values the result after
/// the iteration cap is returned as-is.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(TAU);

    // Initial guess: E = M for low eccentricity, π for high e
    let mut e_anomaly = if eccentricity < 0.8 { m } else { PI };

    for _ in 0..MAX_ITERATIONS {
        // f(E) = E - e*sin(E) - M
        let f = e_anomaly - eccentricity * e_anomaly.sin() - m;
        // f'(E) = 1 - e*cos(E)
        let f_prime = 1.0 - eccentricity * e_anomaly.cos();

        let delta = f / f_prime;
        e_anomaly -= delta;

        if delta.abs() < TOLERANCE {
            break;
        }
    }

    e_anomaly
}

/// Compute true anomaly from eccentric anomaly.
///
/// ν = 2 * atan2(sqrt(1+e) * sin(E/2), sqrt(1-e) * cos(E/2))
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half_e = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half_e.sin();
    let x = (1.0 - eccentricity).sqrt() * half_e.cos();
    2.0 * y.atan2(x)
}
