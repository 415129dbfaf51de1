//! Simulation clock advancement.

use bevy::prelude::*;

use crate::types::SimulationTime;

/// Plugin advancing [`SimulationTime`] once per frame.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .add_systems(Update, advance_time);
    }
}

/// Advance simulation time by the real frame delta times the scale.
///
/// Everything that reads the clock in `Update` is ordered after this.
pub fn advance_time(mut sim_time: ResMut<SimulationTime>, time: Res<Time>) {
    sim_time.advance(time.delta_secs_f64());
}
