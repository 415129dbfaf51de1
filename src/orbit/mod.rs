//! Orbit propagation from fixed elliptical elements.
//!
//! A body moves on an ellipse whose focus sits at the parent's origin. The
//! phase advances linearly with time and the orbital plane is tilted about
//! the reference x axis. Positions are pure functions of `(elements, t)`.

pub mod kepler;
pub mod presets;

#[cfg(test)]
mod proptest_orbit;

use std::f64::consts::TAU;

use bevy::math::{DQuat, DVec3};

use crate::error::{ValidationError, require_finite, require_positive};

/// How the linear phase angle is turned into a point on the ellipse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnomalyModel {
    /// Use the mean anomaly directly as the ellipse parameter.
    ///
    /// Bodies move at a uniform parametric rate, so eccentric orbits do not
    /// speed up at periapsis. This is the tour's intended visual behavior.
    #[default]
    MeanAsTrue,
    /// Solve Kepler's equation for the eccentric anomaly first.
    Kepler,
}

/// Elliptical orbit elements for positions relative to a parent body.
///
/// Units are whatever the caller uses consistently: the semi-major axis sets
/// the distance unit and `angular_speed` is radians per time unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    angular_speed: f64,
    inclination: f64,
    anomaly: AnomalyModel,
    /// Cached rotation of the orbital plane about +x.
    tilt: DQuat,
}

impl OrbitalElements {
    /// Build validated elements.
    ///
    /// # Arguments
    /// * `semi_major_axis` - Semi-major axis, must be > 0
    /// * `eccentricity` - Eccentricity in [0, 1)
    /// * `angular_speed` - Signed mean angular rate (rad per time unit)
    /// * `inclination` - Tilt of the orbital plane about x (radians)
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        angular_speed: f64,
        inclination: f64,
    ) -> Result<Self, ValidationError> {
        let semi_major_axis = require_positive("semi-major axis", semi_major_axis)?;
        let eccentricity = require_finite("eccentricity", eccentricity)?;
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ValidationError::new(
                "eccentricity",
                eccentricity,
                "must be in [0, 1) for a closed orbit",
            ));
        }
        let angular_speed = require_finite("angular speed", angular_speed)?;
        let inclination = require_finite("inclination", inclination)?;

        Ok(Self {
            semi_major_axis,
            eccentricity,
            angular_speed,
            inclination,
            anomaly: AnomalyModel::default(),
            tilt: DQuat::from_rotation_x(inclination),
        })
    }

    /// Same orbit, different anomaly model.
    pub fn with_anomaly_model(mut self, anomaly: AnomalyModel) -> Self {
        self.anomaly = anomaly;
        self
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn anomaly_model(&self) -> AnomalyModel {
        self.anomaly
    }

    /// Semi-minor axis b = a * sqrt(1 - e²).
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Closest distance to the focus.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus.
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Time for one full revolution, or `None` for a body that does not move.
    pub fn period(&self) -> Option<f64> {
        if self.angular_speed == 0.0 {
            None
        } else {
            Some(TAU / self.angular_speed.abs())
        }
    }

    /// Mean anomaly at time `t`, normalized to [0, 2π).
    pub fn mean_anomaly(&self, t: f64) -> f64 {
        (t * self.angular_speed).rem_euclid(TAU)
    }

    /// Ellipse parameter at time `t` under the configured anomaly model.
    fn ellipse_parameter(&self, t: f64) -> f64 {
        let m = self.mean_anomaly(t);
        match self.anomaly {
            AnomalyModel::MeanAsTrue => m,
            AnomalyModel::Kepler => kepler::solve_eccentric_anomaly(m, self.eccentricity),
        }
    }

    /// Angle of the body as seen from the focus, measured from periapsis.
    pub fn true_anomaly(&self, t: f64) -> f64 {
        kepler::eccentric_to_true_anomaly(self.ellipse_parameter(t), self.eccentricity)
    }

    /// Point on the untilted ellipse for parameter `theta`, focus at origin.
    fn ellipse_point(&self, theta: f64) -> DVec3 {
        let a = self.semi_major_axis;
        DVec3::new(
            a * theta.cos() - a * self.eccentricity,
            0.0,
            self.semi_minor_axis() * theta.sin(),
        )
    }

    /// Position in the orbital plane before the tilt is applied (y is 0).
    pub fn planar_position(&self, t: f64) -> DVec3 {
        self.ellipse_point(self.ellipse_parameter(t))
    }

    /// Position relative to the parent, in the parent's frame.
    pub fn position(&self, t: f64) -> DVec3 {
        self.tilt * self.planar_position(t)
    }

    /// Position in world space given the parent's world position.
    pub fn world_position(&self, parent: DVec3, t: f64) -> DVec3 {
        parent + self.position(t)
    }

    /// Undo the inclination on a parent-frame vector.
    pub fn untilt(&self, v: DVec3) -> DVec3 {
        self.tilt.inverse() * v
    }

    /// Fill `out` with a closed loop of `segments + 1` points tracing the orbit.
    ///
    /// The first and last points coincide so the buffer can be drawn as a
    /// line strip. `out` is cleared first and reused.
    pub fn trail_into(&self, segments: usize, out: &mut Vec<DVec3>) {
        out.clear();
        let segments = segments.max(3);
        out.reserve(segments + 1);
        for i in 0..=segments {
            let theta = if i == segments {
                0.0
            } else {
                i as f64 / segments as f64 * TAU
            };
            out.push(self.tilt * self.ellipse_point(theta));
        }
    }
}
