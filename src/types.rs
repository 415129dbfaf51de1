//! Physical constants and shared simulation state.

use bevy::prelude::*;

// Physical constants (SI units)

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Kilometers to meters
pub const KM_TO_METERS: f64 = 1000.0;

/// Energy released by one ton of TNT, in joules.
pub const JOULES_PER_TON_TNT: f64 = 4.184e9;

/// Energy released by one megaton of TNT, in joules.
pub const JOULES_PER_MEGATON_TNT: f64 = 4.184e15;

/// Assumed bulk density of a stony asteroid (kg/m³).
pub const DEFAULT_DENSITY: f64 = 3000.0;

/// Density of the target crust used by the crater scaling law (kg/m³).
pub const TARGET_ROCK_DENSITY: f64 = 2500.0;

/// Surface gravity of Earth (m/s²).
pub const EARTH_GRAVITY: f64 = 9.81;

/// Mean radius of Earth in meters.
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Mass of Earth (kg).
pub const EARTH_MASS_KG: f64 = 5.972e24;

/// Compressive strength a stony impactor fails at (Pa). Caps the peak force.
pub const DEFAULT_YIELD_STRENGTH_PA: f64 = 5e6;

/// Stopping distance as a fraction of the transient crater diameter.
pub const STOP_DISTANCE_CRATER_FRACTION: f64 = 0.3;

/// Peak-to-average ratio of the deceleration force pulse.
pub const PEAK_FORCE_SHAPE: f64 = 2.0;

/// Impacts below this energy are classified as minor (J).
pub const MINOR_ENERGY_LIMIT_J: f64 = 1e18;

/// Impacts below this energy (and above the minor limit) are major (J).
pub const MAJOR_ENERGY_LIMIT_J: f64 = 1e20;

/// Latitudes strictly inside ±this band count as ocean for the default
/// surface classifier.
pub const OCEAN_LATITUDE_LIMIT_DEG: f64 = 60.0;

/// Simulation clock resource.
///
/// Time is measured in abstract simulation units: the orbit presets treat
/// one unit as one second of tour time, the impact scene as one second of
/// approach.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Current simulation time
    pub current: f64,
    /// Time scale multiplier (1.0 = real time)
    pub scale: f64,
    /// Whether simulation is paused
    pub paused: bool,
    /// Initial time for reset functionality
    pub initial: f64,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::starting_at(0.0)
    }
}

impl SimulationTime {
    /// Create simulation time starting at a specific value, running.
    pub fn starting_at(t: f64) -> Self {
        Self {
            current: t,
            scale: 1.0,
            paused: false,
            initial: t,
        }
    }

    /// Advance by a real-world delta, honoring pause and scale.
    pub fn advance(&mut self, real_delta: f64) {
        if self.paused {
            return;
        }
        self.current += real_delta * self.scale;
    }

    /// Reset to initial time and pause.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.paused = true;
    }

    /// Time elapsed since the initial value.
    pub fn elapsed(&self) -> f64 {
        self.current - self.initial
    }
}

/// Which scene the app is showing.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Planets orbiting the Sun.
    #[default]
    Tour,
    /// An asteroid closing in on Earth.
    Impact,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Tour => "Solar system",
            ViewMode::Impact => "Impact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tnt_units_agree() {
        assert_relative_eq!(JOULES_PER_MEGATON_TNT / JOULES_PER_TON_TNT, 1e6);
    }

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(180.0 * DEG_TO_RAD, std::f64::consts::PI);
        assert_relative_eq!(std::f64::consts::PI * RAD_TO_DEG, 180.0);
    }

    #[test]
    fn test_simulation_time_advance_scaled() {
        let mut time = SimulationTime::starting_at(10.0);
        time.scale = 4.0;
        time.advance(0.5);
        assert_relative_eq!(time.current, 12.0);
        assert_relative_eq!(time.elapsed(), 2.0);
    }

    #[test]
    fn test_simulation_time_paused_does_not_advance() {
        let mut time = SimulationTime::default();
        time.paused = true;
        time.advance(1.0);
        assert_eq!(time.current, 0.0);
    }

    #[test]
    fn test_simulation_time_reset() {
        let mut time = SimulationTime::starting_at(3.0);
        time.advance(5.0);
        time.reset();
        assert_eq!(time.current, 3.0);
        assert!(time.paused);
    }
}
