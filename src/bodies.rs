//! Bodies driven by orbital elements.
//!
//! Transforms are written from the propagated position every frame; nothing
//! integrates, so any simulation time maps to exactly one configuration.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::orbit::OrbitalElements;
use crate::time::advance_time;
use crate::types::SimulationTime;

/// Places its entity on an ellipse around `center`.
#[derive(Component, Clone, Debug)]
pub struct Orbiting {
    pub elements: OrbitalElements,
    /// Position of the focus in the parent frame.
    pub center: DVec3,
}

impl Orbiting {
    pub fn around_origin(elements: OrbitalElements) -> Self {
        Self {
            elements,
            center: DVec3::ZERO,
        }
    }
}

/// Rotation about the body's own y axis, in radians per time unit.
#[derive(Component, Clone, Copy, Debug)]
pub struct Spin(pub f64);

/// Display name for a body.
#[derive(Component, Clone, Debug)]
pub struct BodyName(pub &'static str);

pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (propagate_orbits, spin_bodies)
                .in_set(BodySystems)
                .after(advance_time),
        );
    }
}

/// Systems that move bodies for the current frame.
#[derive(SystemSet, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BodySystems;

/// Scene coordinates are small enough that f32 keeps sub-unit precision.
pub fn to_render(v: DVec3) -> Vec3 {
    v.as_vec3()
}

pub fn propagate_orbits(
    sim_time: Res<SimulationTime>,
    mut bodies: Query<(&Orbiting, &mut Transform)>,
) {
    let t = sim_time.current;
    for (orbit, mut transform) in bodies.iter_mut() {
        transform.translation = to_render(orbit.elements.world_position(orbit.center, t));
    }
}

pub fn spin_bodies(sim_time: Res<SimulationTime>, mut bodies: Query<(&Spin, &mut Transform)>) {
    let t = sim_time.current;
    for (spin, mut transform) in bodies.iter_mut() {
        let angle = (spin.0 * t).rem_euclid(std::f64::consts::TAU);
        transform.rotation = Quat::from_rotation_y(angle as f32);
    }
}
