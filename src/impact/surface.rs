//! Ocean/land decision for an impact point.
//!
//! The estimator asks a [`SurfaceClassifier`] what lies under the contact
//! point. [`LatitudeBand`] is a coarse stand-in that calls everything
//! between two latitudes ocean. A geographic land/ocean mask can be plugged
//! in by implementing the trait, or by passing a closure.

use bevy::math::DVec3;

use crate::types::{OCEAN_LATITUDE_LIMIT_DEG, RAD_TO_DEG};

/// What the impactor hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Ocean,
    Land,
}

impl Surface {
    pub fn is_ocean(self) -> bool {
        self == Surface::Ocean
    }
}

/// Decides ocean vs. land for a contact point given relative to the target
/// center. `+y` is the target's north axis.
pub trait SurfaceClassifier: Send + Sync {
    fn classify(&self, contact_point: DVec3, target_radius: f64) -> Surface;
}

/// Geocentric latitude proxy `asin(y / R)` in degrees.
///
/// The ratio is clamped so contact points slightly outside the sphere still
/// map to a latitude.
pub fn latitude_deg(contact_point: DVec3, target_radius: f64) -> f64 {
    let ratio = (contact_point.y / target_radius).clamp(-1.0, 1.0);
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.asin() * RAD_TO_DEG
}

/// Ocean strictly inside `±max_abs_latitude_deg`, land at and beyond it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatitudeBand {
    pub max_abs_latitude_deg: f64,
}

impl Default for LatitudeBand {
    fn default() -> Self {
        Self {
            max_abs_latitude_deg: OCEAN_LATITUDE_LIMIT_DEG,
        }
    }
}

impl SurfaceClassifier for LatitudeBand {
    fn classify(&self, contact_point: DVec3, target_radius: f64) -> Surface {
        let lat = latitude_deg(contact_point, target_radius);
        if lat.abs() < self.max_abs_latitude_deg {
            Surface::Ocean
        } else {
            Surface::Land
        }
    }
}

/// A fixed answer, whatever the contact point.
impl SurfaceClassifier for Surface {
    fn classify(&self, _contact_point: DVec3, _target_radius: f64) -> Surface {
        *self
    }
}

impl<F> SurfaceClassifier for F
where
    F: Fn(DVec3, f64) -> Surface + Send + Sync,
{
    fn classify(&self, contact_point: DVec3, target_radius: f64) -> Surface {
        self(contact_point, target_radius)
    }
}
