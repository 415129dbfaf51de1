//! Rendering for the tour and impact scenes.
//!
//! Each scene hangs under one root entity whose visibility follows
//! [`ViewMode`]; systems that only make sense in one scene are gated on it.

mod background;
pub mod bodies;
mod effects;
mod orbits;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::SceneBodiesPlugin;
use self::effects::ImpactEffectsPlugin;
use self::orbits::OrbitTrailPlugin;
use crate::types::ViewMode;

pub use self::bodies::SceneRoot;
pub use self::orbits::OrbitTrailSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            BackgroundPlugin,
            SceneBodiesPlugin,
            OrbitTrailPlugin,
            ImpactEffectsPlugin,
        ))
        .add_systems(Update, apply_view_visibility);
    }
}

/// Show the root of the active scene and hide the other.
fn apply_view_visibility(mode: Res<ViewMode>, mut roots: Query<(&SceneRoot, &mut Visibility)>) {
    if !mode.is_changed() {
        return;
    }
    for (root, mut visibility) in roots.iter_mut() {
        *visibility = if root.0 == *mode {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
