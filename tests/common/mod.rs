//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery::approach::{ApproachPlugin, Asteroid};
use orrery::bodies::BodiesPlugin;
use orrery::time::TimePlugin;
use orrery::types::ViewMode;

/// Headless app with every simulation plugin and a fixed frame step.
///
/// Uses MinimalPlugins: no window, no renderer, no egui.
pub fn simulation_app(mode: ViewMode, frame: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .insert_resource(mode)
        .add_plugins((TimePlugin, BodiesPlugin, ApproachPlugin));
    app
}

pub fn spawn_asteroid(app: &mut App) -> Entity {
    app.world_mut().spawn((Asteroid, Transform::default())).id()
}

/// Run frames until `done` holds or `max_frames` pass. Returns frames run.
pub fn run_until(app: &mut App, max_frames: usize, mut done: impl FnMut(&mut App) -> bool) -> usize {
    for frame in 0..max_frames {
        app.update();
        if done(app) {
            return frame + 1;
        }
    }
    max_frames
}

/// Positions along a straight descent into a sphere of radius `radius`
/// centred at the origin, sampled every `step` units from `start`.
pub fn straight_descent(start: DVec3, step: f64, radius: f64) -> Vec<DVec3> {
    let dir = -start.normalize();
    let mut points = Vec::new();
    let mut p = start;
    while p.length() > radius * 0.5 {
        points.push(p);
        p += dir * step;
    }
    points
}
