//! Planet table for the solar-system tour.
//!
//! Distances are in scene units with Neptune's orbit at ~650 units. Speeds
//! are relative mean rates (Earth = 1) scaled by [`TOUR_SPEED_MULTIPLIER`].
//! Inclinations are exaggerated by [`TILT_EXAGGERATION`] so the tilts are
//! visible at tour scale.

use crate::error::ValidationError;
use crate::types::DEG_TO_RAD;

use super::OrbitalElements;

/// Scene units per astronomical unit.
pub const SCENE_UNITS_PER_AU: f64 = 650.0 / 30.069;

/// Factor applied to real inclinations for display.
pub const TILT_EXAGGERATION: f64 = 3.0;

/// Radians per time unit for a body with relative speed 1.0.
pub const TOUR_SPEED_MULTIPLIER: f64 = 0.2;

/// Radius of the Sun sphere in scene units.
pub const SUN_RADIUS: f32 = 3.5;

/// One planet of the tour.
#[derive(Clone, Copy, Debug)]
pub struct PlanetPreset {
    pub name: &'static str,
    /// Semi-major axis in AU.
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    /// Mean angular speed relative to Earth.
    pub relative_speed: f64,
    /// Real orbital inclination in degrees (before exaggeration).
    pub tilt_deg: f64,
    /// Display radius in scene units.
    pub radius: f32,
    /// sRGB color as 0xRRGGBB.
    pub color: u32,
    pub has_rings: bool,
}

impl PlanetPreset {
    /// Orbital elements in scene units.
    pub fn elements(&self) -> Result<OrbitalElements, ValidationError> {
        OrbitalElements::new(
            self.semi_major_axis_au * SCENE_UNITS_PER_AU,
            self.eccentricity,
            self.relative_speed * TOUR_SPEED_MULTIPLIER,
            self.tilt_deg * TILT_EXAGGERATION * DEG_TO_RAD,
        )
    }

    /// Color split into sRGB channels in [0, 1].
    pub fn rgb(&self) -> [f32; 3] {
        let r = ((self.color >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.color >> 8) & 0xff) as f32 / 255.0;
        let b = (self.color & 0xff) as f32 / 255.0;
        [r, g, b]
    }
}

/// Look up a planet by name (case-insensitive).
pub fn planet(name: &str) -> Option<&'static PlanetPreset> {
    PLANETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// All planets, ordered by distance from the Sun.
pub static PLANETS: &[PlanetPreset] = &[
    PlanetPreset {
        name: "Mercury",
        semi_major_axis_au: 0.387,
        eccentricity: 0.2056,
        relative_speed: 4.15,
        tilt_deg: 7.0,
        radius: 1.5,
        color: 0x888888,
        has_rings: false,
    },
    PlanetPreset {
        name: "Venus",
        semi_major_axis_au: 0.723,
        eccentricity: 0.0068,
        relative_speed: 1.62,
        tilt_deg: 3.4,
        radius: 2.5,
        color: 0xffff00,
        has_rings: false,
    },
    PlanetPreset {
        name: "Earth",
        semi_major_axis_au: 1.0,
        eccentricity: 0.0167,
        relative_speed: 1.0,
        tilt_deg: 0.0,
        radius: 3.0,
        color: 0x0000ff,
        has_rings: false,
    },
    PlanetPreset {
        name: "Mars",
        semi_major_axis_au: 1.524,
        eccentricity: 0.0934,
        relative_speed: 0.53,
        tilt_deg: 1.85,
        radius: 2.0,
        color: 0xff0000,
        has_rings: false,
    },
    PlanetPreset {
        name: "Jupiter",
        semi_major_axis_au: 5.203,
        eccentricity: 0.0484,
        relative_speed: 0.08,
        tilt_deg: 1.3,
        radius: 8.0,
        color: 0xffa500,
        has_rings: false,
    },
    PlanetPreset {
        name: "Saturn",
        semi_major_axis_au: 9.537,
        eccentricity: 0.0541,
        relative_speed: 0.03,
        tilt_deg: 2.49,
        radius: 7.0,
        color: 0xffd700,
        has_rings: true,
    },
    PlanetPreset {
        name: "Uranus",
        semi_major_axis_au: 19.191,
        eccentricity: 0.0472,
        relative_speed: 0.011,
        tilt_deg: 0.77,
        radius: 7.0,
        color: 0x00ffff,
        has_rings: false,
    },
    PlanetPreset {
        name: "Neptune",
        semi_major_axis_au: 30.069,
        eccentricity: 0.0086,
        relative_speed: 0.006,
        tilt_deg: 1.77,
        radius: 8.0,
        color: 0x00008b,
        has_rings: false,
    },
];
