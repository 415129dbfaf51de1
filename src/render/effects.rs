//! Visual feedback for an impact.
//!
//! - Flash: white sphere outline that expands and fades
//! - Shockwave: orange ring growing across the surface
//! - Ocean wave: blue ring, only for ocean impacts
//!
//! The simulation is paused on impact, so effects run on wall-clock time.

use bevy::prelude::*;

use crate::approach::{ApproachSystems, EARTH_SCENE_CENTER, ImpactEvent, ImpactTarget, RewindEvent};
use crate::types::ViewMode;

pub struct ImpactEffectsPlugin;

impl Plugin for ImpactEffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_impact_effects,
                clear_impact_effects,
                animate_impact_effects.run_if(|mode: Res<ViewMode>| *mode == ViewMode::Impact),
            )
                .chain()
                .after(ApproachSystems),
        );
    }
}

/// How long the flash and shockwave last, seconds.
const EFFECT_DURATION: f32 = 2.0;

/// An impact effect in progress.
#[derive(Component)]
pub struct ImpactEffect {
    /// Seconds since the effect started.
    pub age: f32,
    pub position: Vec3,
    /// Outward surface normal at the impact point.
    pub normal: Dir3,
    pub ocean: bool,
}

/// Color the target shows after being hit.
const HIT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

fn spawn_impact_effects(
    mut commands: Commands,
    mut events: MessageReader<ImpactEvent>,
    targets: Query<&MeshMaterial3d<StandardMaterial>, With<ImpactTarget>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        let position = event.position.as_vec3();
        let normal = Dir3::new(position - EARTH_SCENE_CENTER.as_vec3()).unwrap_or(Dir3::Y);

        commands.spawn(ImpactEffect {
            age: 0.0,
            position,
            normal,
            ocean: event.result.is_ocean_impact,
        });

        for handle in targets.iter() {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.base_color = HIT_COLOR;
            }
        }
    }
}

fn clear_impact_effects(
    mut commands: Commands,
    mut rewind_events: MessageReader<RewindEvent>,
    effects: Query<Entity, With<ImpactEffect>>,
    targets: Query<&MeshMaterial3d<StandardMaterial>, With<ImpactTarget>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if rewind_events.read().count() == 0 {
        return;
    }

    for entity in effects.iter() {
        commands.entity(entity).despawn();
    }
    for handle in targets.iter() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = Color::WHITE;
        }
    }
}

fn animate_impact_effects(
    time: Res<Time>,
    mut effects: Query<&mut ImpactEffect>,
    mut gizmos: Gizmos,
) {
    let dt = time.delta_secs();
    for mut effect in effects.iter_mut() {
        effect.age += dt;
        let progress = (effect.age / EFFECT_DURATION).clamp(0.0, 1.0);
        let facing = Quat::from_rotation_arc(Vec3::Z, *effect.normal);
        let isometry = Isometry3d::new(effect.position, facing);

        // Flash expands quickly and fades
        let flash_alpha = (0.8 - effect.age * 0.5).max(0.0);
        if flash_alpha > 0.0 {
            gizmos.sphere(
                Isometry3d::from_translation(effect.position),
                1.0 + effect.age * 5.0,
                Color::srgba(1.0, 1.0, 1.0, flash_alpha),
            );
        }

        if progress < 1.0 {
            let radius = 1.0 + effect.age * 10.0;
            let alpha = (1.0 - progress).powf(0.5);
            gizmos.circle(isometry, radius, Color::srgba(1.0, 0.6, 0.1, alpha));
        }

        // Ocean waves keep rolling after the shockwave fades
        if effect.ocean {
            let wave = (effect.age / (2.0 * EFFECT_DURATION)).min(1.0);
            if wave < 1.0 {
                gizmos.circle(
                    isometry,
                    5.0 + wave * 50.0,
                    Color::srgba(0.0, 0.6, 1.0, 0.6 * (1.0 - wave)),
                );
            }
        }
    }
}
