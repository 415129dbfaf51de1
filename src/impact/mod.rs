//! Impact energy estimation.
//!
//! Turns an asteroid's size, density and closing speed into kinetic energy,
//! a TNT equivalent and a severity band. The energy always comes from the
//! physical diameter, never from how large the asteroid is drawn.

mod estimator;
pub mod surface;

#[cfg(test)]
mod proptest_impact;

use std::f64::consts::PI;

use bevy::math::DVec3;

use crate::error::{
    DegenerateInputError, ModelError, ValidationError, require_finite, require_positive,
};
use crate::types::{
    DEFAULT_DENSITY, DEFAULT_YIELD_STRENGTH_PA, EARTH_GRAVITY, EARTH_MASS_KG,
    JOULES_PER_MEGATON_TNT, JOULES_PER_TON_TNT, MAJOR_ENERGY_LIMIT_J, MINOR_ENERGY_LIMIT_J,
    PEAK_FORCE_SHAPE, RAD_TO_DEG, STOP_DISTANCE_CRATER_FRACTION, TARGET_ROCK_DENSITY,
};

pub use estimator::{ImpactEstimator, ImpactPhase};
pub use surface::{LatitudeBand, Surface, SurfaceClassifier, latitude_deg};

/// Energy band of an impact. Ocean and land impacts share the bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Below 1e18 J.
    Minor,
    /// From 1e18 J up to 1e20 J.
    Major,
    /// 1e20 J and above.
    Global,
}

impl Severity {
    pub fn from_energy(energy_joules: f64) -> Self {
        if energy_joules < MINOR_ENERGY_LIMIT_J {
            Severity::Minor
        } else if energy_joules < MAJOR_ENERGY_LIMIT_J {
            Severity::Major
        } else {
            Severity::Global
        }
    }
}

/// User-controlled asteroid and target parameters.
///
/// Built through [`ImpactParameters::new`] and the `with_*` methods, each of
/// which validates and returns a fresh value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactParameters {
    diameter_m: f64,
    density: f64,
    closing_speed_mps: f64,
    target_radius: f64,
    /// Radius used for the contact test, if different from diameter / 2.
    contact_radius: Option<f64>,
    yield_strength_pa: f64,
}

impl ImpactParameters {
    /// Parameters with the default stony density.
    ///
    /// # Arguments
    /// * `diameter_m` - Asteroid diameter in meters, > 0
    /// * `closing_speed_mps` - Speed relative to the target at contact (m/s), > 0
    /// * `target_radius` - Radius of the target body, in the distance unit the
    ///   caller will pass to the estimator
    pub fn new(
        diameter_m: f64,
        closing_speed_mps: f64,
        target_radius: f64,
    ) -> Result<Self, ModelError> {
        let diameter_m = require_positive("diameter", diameter_m)?;
        let closing_speed_mps = require_positive("closing speed", closing_speed_mps)?;
        let target_radius = require_finite("target radius", target_radius)?;
        if target_radius <= 0.0 {
            return Err(DegenerateInputError {
                what: "target radius",
                value: target_radius,
            }
            .into());
        }

        Ok(Self {
            diameter_m,
            density: DEFAULT_DENSITY,
            closing_speed_mps,
            target_radius,
            contact_radius: None,
            yield_strength_pa: DEFAULT_YIELD_STRENGTH_PA,
        })
    }

    pub fn with_density(self, density: f64) -> Result<Self, ModelError> {
        Ok(Self {
            density: require_positive("density", density)?,
            ..self
        })
    }

    pub fn with_diameter(self, diameter_m: f64) -> Result<Self, ModelError> {
        Ok(Self {
            diameter_m: require_positive("diameter", diameter_m)?,
            ..self
        })
    }

    pub fn with_closing_speed(self, closing_speed_mps: f64) -> Result<Self, ModelError> {
        Ok(Self {
            closing_speed_mps: require_positive("closing speed", closing_speed_mps)?,
            ..self
        })
    }

    /// Strength at which the impactor breaks up, capping the peak force.
    pub fn with_yield_strength(self, yield_strength_pa: f64) -> Result<Self, ModelError> {
        Ok(Self {
            yield_strength_pa: require_positive("yield strength", yield_strength_pa)?,
            ..self
        })
    }

    /// Override the radius used for the contact test.
    ///
    /// Scenes that shrink the target to a display size need the asteroid's
    /// contact radius in the same display units. Energy is unaffected.
    pub fn with_contact_radius(self, radius: f64) -> Result<Self, ModelError> {
        let radius = require_finite("contact radius", radius)?;
        if radius < 0.0 {
            return Err(ValidationError::new("contact radius", radius, "must not be negative").into());
        }
        Ok(Self {
            contact_radius: Some(radius),
            ..self
        })
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn yield_strength_pa(&self) -> f64 {
        self.yield_strength_pa
    }

    pub fn closing_speed_mps(&self) -> f64 {
        self.closing_speed_mps
    }

    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }

    /// Physical radius in meters.
    pub fn radius_m(&self) -> f64 {
        self.diameter_m / 2.0
    }

    /// Radius for the contact test: the override, or the physical radius.
    pub fn asteroid_radius(&self) -> f64 {
        self.contact_radius.unwrap_or_else(|| self.radius_m())
    }

    /// Impact happens once the center distance drops to this value.
    pub fn contact_threshold(&self) -> f64 {
        self.target_radius + self.asteroid_radius()
    }

    /// Mass of a uniform sphere: ρ * 4/3 π r³.
    pub fn mass_kg(&self) -> f64 {
        self.density * (4.0 / 3.0) * PI * self.radius_m().powi(3)
    }

    /// Kinetic energy at contact: ½ m v².
    pub fn kinetic_energy_joules(&self) -> f64 {
        0.5 * self.mass_kg() * self.closing_speed_mps * self.closing_speed_mps
    }
}

/// Outcome of one impact event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactResult {
    pub mass_kg: f64,
    pub closing_speed_mps: f64,
    pub energy_joules: f64,
    pub energy_tons_tnt: f64,
    pub is_ocean_impact: bool,
    pub severity: Severity,
    /// Latitude proxy of the contact point, degrees.
    pub latitude_deg: f64,
    /// Longitude of the contact point, degrees in (-180, 180].
    pub longitude_deg: f64,
    /// Order-of-magnitude transient crater diameter (m).
    pub transient_crater_diameter_m: f64,
    pub forces: ImpactForces,
    /// Angle between the incoming path and the local vertical, degrees.
    /// Set by [`ImpactResult::with_entry_velocity`].
    pub entry_angle_deg: Option<f64>,
}

impl ImpactResult {
    pub fn energy_megatons(&self) -> f64 {
        self.energy_joules / JOULES_PER_MEGATON_TNT
    }

    pub fn surface(&self) -> Surface {
        if self.is_ocean_impact {
            Surface::Ocean
        } else {
            Surface::Land
        }
    }

    /// Record the direction of travel at contact.
    ///
    /// `contact_point` is relative to the target center, so it doubles as
    /// the outward surface normal.
    pub fn with_entry_velocity(mut self, velocity: DVec3, contact_point: DVec3) -> Self {
        self.entry_angle_deg = entry_angle_deg(velocity, contact_point);
        self
    }
}

/// Deceleration of the impactor as it digs its crater.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactForces {
    /// Distance the impactor travels while stopping (m).
    pub stop_distance_m: f64,
    /// Duration of the deceleration (s).
    pub contact_time_s: f64,
    pub average_force_n: f64,
    /// Peak force, capped by what the impactor can transmit before it breaks.
    pub peak_force_n: f64,
    pub peak_force_uncapped_n: f64,
    /// Speed change given to Earth by the momentum transfer (m/s).
    pub earth_delta_v_mps: f64,
}

/// Forces from stopping the impactor over a fraction of its crater.
///
/// The average force is energy over stopping distance and the contact time
/// assumes a uniform deceleration. The peak is a fixed multiple of the
/// average, limited to `yield_strength × cross-section`.
pub fn impact_forces(
    mass_kg: f64,
    speed_mps: f64,
    crater_diameter_m: f64,
    diameter_m: f64,
    yield_strength_pa: f64,
) -> ImpactForces {
    const MIN_STOP_DISTANCE_M: f64 = 1e-6;
    const MIN_SPEED_MPS: f64 = 1e-6;

    let energy = 0.5 * mass_kg * speed_mps * speed_mps;
    let stop_distance_m = STOP_DISTANCE_CRATER_FRACTION * crater_diameter_m;
    let average_force_n = energy / stop_distance_m.max(MIN_STOP_DISTANCE_M);
    let peak_force_uncapped_n = PEAK_FORCE_SHAPE * average_force_n;
    let cross_section = PI * (diameter_m / 2.0).powi(2);

    ImpactForces {
        stop_distance_m,
        contact_time_s: 2.0 * stop_distance_m / speed_mps.max(MIN_SPEED_MPS),
        average_force_n,
        peak_force_n: peak_force_uncapped_n.min(yield_strength_pa * cross_section),
        peak_force_uncapped_n,
        earth_delta_v_mps: mass_kg / EARTH_MASS_KG * speed_mps,
    }
}

/// Longitude of a point given relative to the target center: +x is 0°,
/// +z is 90°. The north axis (+y) does not affect it.
pub fn longitude_deg(contact_point: DVec3) -> f64 {
    let lon = contact_point.z.atan2(contact_point.x) * RAD_TO_DEG;
    if lon <= -180.0 { lon + 360.0 } else { lon }
}

/// Angle between travel direction and the inward vertical at `normal`:
/// 0° is straight down, 90° grazing.
///
/// `None` when either vector has no direction.
pub fn entry_angle_deg(velocity: DVec3, normal: DVec3) -> Option<f64> {
    let v = velocity.try_normalize()?;
    let n = normal.try_normalize()?;
    Some((-v.dot(n)).clamp(-1.0, 1.0).acos() * RAD_TO_DEG)
}

/// Narrow down when a distance first drops to `threshold` between `t0` and
/// `t1` by bisection.
///
/// `distance(t0)` should be outside the threshold and `distance(t1)` inside.
/// Returns the earliest bracketed time found at which the distance is
/// within the threshold, so the result is always a contact. Without a sign
/// change it returns `t1`.
pub fn refine_contact_time(
    t0: f64,
    t1: f64,
    threshold: f64,
    mut distance: impl FnMut(f64) -> f64,
) -> f64 {
    const MAX_ITERATIONS: usize = 40;
    const TIME_TOLERANCE: f64 = 1e-9;

    if !(distance(t0) > threshold) || distance(t1) > threshold {
        return t1;
    }

    let (mut outside, mut inside) = (t0, t1);
    for _ in 0..MAX_ITERATIONS {
        if (inside - outside).abs() <= TIME_TOLERANCE {
            break;
        }
        let mid = 0.5 * (outside + inside);
        if distance(mid) > threshold {
            outside = mid;
        } else {
            inside = mid;
        }
    }
    inside
}

/// Simplified crater scaling law: D ≈ k (m/ρ_t)^(1/3) v^0.44 g^-0.22, k = 1.8.
pub fn transient_crater_diameter_m(mass_kg: f64, speed_mps: f64) -> f64 {
    const K: f64 = 1.8;
    K * (mass_kg / TARGET_ROCK_DENSITY).cbrt() * speed_mps.powf(0.44) * EARTH_GRAVITY.powf(-0.22)
}

/// Compute the impact result for a contact at `contact_point`, given
/// relative to the target center.
pub fn estimate<C: SurfaceClassifier + ?Sized>(
    params: &ImpactParameters,
    contact_point: DVec3,
    classifier: &C,
) -> ImpactResult {
    let mass_kg = params.mass_kg();
    let energy_joules = params.kinetic_energy_joules();
    let surface = classifier.classify(contact_point, params.target_radius());
    let crater = transient_crater_diameter_m(mass_kg, params.closing_speed_mps());

    ImpactResult {
        mass_kg,
        closing_speed_mps: params.closing_speed_mps(),
        energy_joules,
        energy_tons_tnt: energy_joules / JOULES_PER_TON_TNT,
        is_ocean_impact: surface.is_ocean(),
        severity: Severity::from_energy(energy_joules),
        latitude_deg: latitude_deg(contact_point, params.target_radius()),
        longitude_deg: longitude_deg(contact_point),
        transient_crater_diameter_m: crater,
        forces: impact_forces(
            mass_kg,
            params.closing_speed_mps(),
            crater,
            params.diameter_m(),
            params.yield_strength_pa(),
        ),
        entry_angle_deg: None,
    }
}

/// A historical airburst or impact for scale comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceEvent {
    pub name: &'static str,
    pub energy_tons_tnt: f64,
}

/// Approximate yields of well-known events, smallest first.
pub static REFERENCE_EVENTS: &[ReferenceEvent] = &[
    ReferenceEvent {
        name: "2008 TC3 (Almahata Sitta)",
        energy_tons_tnt: 1.5e3,
    },
    ReferenceEvent {
        name: "Chelyabinsk",
        energy_tons_tnt: 5.0e5,
    },
    ReferenceEvent {
        name: "Tunguska",
        energy_tons_tnt: 1.2e7,
    },
    ReferenceEvent {
        name: "Chicxulub",
        energy_tons_tnt: 1.0e14,
    },
];

/// Reference event with the yield closest to `energy_tons_tnt`.
pub fn closest_reference(energy_tons_tnt: f64) -> Option<&'static ReferenceEvent> {
    REFERENCE_EVENTS.iter().min_by(|a, b| {
        let da = (a.energy_tons_tnt - energy_tons_tnt).abs();
        let db = (b.energy_tons_tnt - energy_tons_tnt).abs();
        da.total_cmp(&db)
    })
}
