//! Impact scene: an asteroid closing in on Earth.
//!
//! The asteroid's position is a function of elapsed simulation time, either
//! a straight line from [`APPROACH_START`] toward Earth or a streamed
//! trajectory. Each frame the distance to Earth is fed to the
//! [`ImpactEstimator`]; on contact:
//! - the contact time is narrowed down between the last two frames
//! - the simulation is paused
//! - an [`ImpactEvent`] is sent for the UI and effects
//! - the result is stored in [`ApproachState`] until the next rewind

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::error::ModelError;
use crate::impact::{
    ImpactEstimator, ImpactParameters, ImpactResult, estimate, refine_contact_time,
};
use crate::time::advance_time;
use crate::trajectory::feed::TrajectorySlot;
use crate::trajectory::stream::StreamUpdate;
use crate::trajectory::{SampledTrajectory, TrajectoryError, TrajectorySample};
use crate::types::{DEFAULT_DENSITY, EARTH_RADIUS_M, SimulationTime, ViewMode};

/// Earth's radius in scene units.
pub const EARTH_SCENE_RADIUS: f64 = 20.0;

/// Earth's center in the impact scene.
pub const EARTH_SCENE_CENTER: DVec3 = DVec3::new(0.0, -2.0, -10.0);

/// Where a straight-line approach begins.
pub const APPROACH_START: DVec3 = DVec3::new(200.0, 50.0, 600.0);

/// Scene units travelled per second for each km/s of closing speed.
pub const SCENE_UNITS_PER_KM_S: f64 = 1.0;

/// Asteroid diameter in metres per scene unit of displayed radius.
pub const METERS_PER_SCENE_RADIUS: f64 = 200.0;

/// Metres to scene units for streamed geocentric trajectories.
pub const STREAM_SCENE_SCALE: f64 = EARTH_SCENE_RADIUS / EARTH_RADIUS_M;

/// Trajectory seconds played back per unit of simulation time.
pub const STREAM_TIME_SCALE: f64 = 60.0;

pub const MIN_DIAMETER_M: f64 = 1.0;
pub const MAX_DIAMETER_M: f64 = 2000.0;
pub const MIN_SPEED_KM_S: f64 = 1.0;
pub const MAX_SPEED_KM_S: f64 = 70.0;

/// User-adjustable asteroid parameters.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ImpactControls {
    pub diameter_m: f64,
    pub closing_speed_km_s: f64,
    pub density: f64,
}

impl Default for ImpactControls {
    fn default() -> Self {
        Self {
            diameter_m: 40.0,
            closing_speed_km_s: 20.0,
            density: DEFAULT_DENSITY,
        }
    }
}

impl ImpactControls {
    /// Radius of the asteroid sphere in scene units.
    pub fn scene_radius(&self) -> f64 {
        self.diameter_m / METERS_PER_SCENE_RADIUS
    }

    /// How fast the asteroid moves across the scene.
    pub fn scene_speed(&self) -> f64 {
        self.closing_speed_km_s * SCENE_UNITS_PER_KM_S
    }

    /// Parameters for the estimator, with distances in scene units.
    pub fn parameters(&self) -> Result<ImpactParameters, ModelError> {
        ImpactParameters::new(
            self.diameter_m,
            self.closing_speed_km_s * 1000.0,
            EARTH_SCENE_RADIUS,
        )?
        .with_density(self.density)?
        .with_contact_radius(self.scene_radius())
    }
}

/// Path the asteroid follows.
#[derive(Resource, Clone, Debug)]
pub struct Approach {
    pub start: DVec3,
    pub target_center: DVec3,
    /// Streamed trajectory in geocentric metres; replaces the straight line.
    pub trajectory: Option<SampledTrajectory>,
}

impl Default for Approach {
    fn default() -> Self {
        Self {
            start: APPROACH_START,
            target_center: EARTH_SCENE_CENTER,
            trajectory: None,
        }
    }
}

impl Approach {
    /// Scene position after `elapsed` time units.
    pub fn position(&self, elapsed: f64, scene_speed: f64) -> DVec3 {
        match &self.trajectory {
            Some(trajectory) => {
                let t = trajectory.start_time() + elapsed * STREAM_TIME_SCALE;
                self.scene_point(trajectory.sample_clamped(t))
            }
            None => straight_line(self.start, self.target_center, scene_speed, elapsed),
        }
    }

    /// Velocity in m/s after `elapsed` time units.
    ///
    /// A streamed trajectory supplies its own velocity. The straight line
    /// moves at `closing_speed_mps`.
    pub fn velocity(&self, elapsed: f64, closing_speed_mps: f64) -> DVec3 {
        let direction = (self.target_center - self.start).normalize_or_zero();
        match &self.trajectory {
            Some(trajectory) => {
                let t = trajectory.start_time() + elapsed * STREAM_TIME_SCALE;
                trajectory
                    .velocity(t)
                    .unwrap_or(direction * closing_speed_mps)
            }
            None => direction * closing_speed_mps,
        }
    }

    /// Add live samples to the streamed trajectory, or start a new one when
    /// they do not continue it. Returns whether the approach restarted.
    pub fn apply_samples(
        &mut self,
        samples: Vec<TrajectorySample>,
    ) -> Result<bool, TrajectoryError> {
        if let Some(trajectory) = self.trajectory.as_mut()
            && trajectory.continues_with(&samples)
        {
            trajectory.extend(samples)?;
            return Ok(false);
        }
        self.trajectory = Some(SampledTrajectory::new(samples)?);
        Ok(true)
    }

    /// Map a geocentric position in metres into the scene.
    pub fn scene_point(&self, geocentric_m: DVec3) -> DVec3 {
        self.target_center + geocentric_m * STREAM_SCENE_SCALE
    }
}

/// Point `speed * elapsed` along the segment from `start` to `target`,
/// stopping at `target`.
pub fn straight_line(start: DVec3, target: DVec3, speed: f64, elapsed: f64) -> DVec3 {
    let to_target = target - start;
    let total = to_target.length();
    let travelled = (speed * elapsed.max(0.0)).min(total);
    start + to_target.normalize_or_zero() * travelled
}

/// Detector state and the most recent impact.
#[derive(Resource, Default)]
pub struct ApproachState {
    pub estimator: ImpactEstimator,
    pub last_impact: Option<ImpactEvent>,
    /// Elapsed time of the last evaluated frame.
    last_elapsed: Option<f64>,
}

impl ApproachState {
    pub fn clear(&mut self) {
        self.estimator.reset();
        self.last_impact = None;
        self.last_elapsed = None;
    }
}

/// The asteroid made contact.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ImpactEvent {
    pub result: ImpactResult,
    /// Scene position of the asteroid at contact.
    pub position: DVec3,
    /// Simulation time of contact.
    pub time: f64,
}

/// Put the asteroid back at the start of its path, paused.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RewindEvent;

/// Marker for the asteroid entity.
#[derive(Component)]
pub struct Asteroid;

/// Marker for the body the asteroid is aimed at.
#[derive(Component)]
pub struct ImpactTarget;

/// Systems that move and test the asteroid.
#[derive(SystemSet, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApproachSystems;

pub struct ApproachPlugin;

impl Plugin for ApproachPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ImpactEvent>()
            .add_message::<RewindEvent>()
            .init_resource::<ImpactControls>()
            .init_resource::<Approach>()
            .init_resource::<ApproachState>()
            .init_resource::<ViewMode>()
            .add_systems(
                Update,
                handle_rewind.after(advance_time).before(ApproachSystems),
            )
            .add_systems(
                Update,
                (swap_streamed_trajectory, move_asteroid, detect_impact)
                    .chain()
                    .in_set(ApproachSystems)
                    .after(advance_time)
                    .run_if(|mode: Res<ViewMode>| *mode == ViewMode::Impact),
            );
    }
}

/// Rewind the clock and re-arm the detector.
pub fn handle_rewind(
    mut rewind_events: MessageReader<RewindEvent>,
    mut sim_time: ResMut<SimulationTime>,
    mut state: ResMut<ApproachState>,
) {
    // Several rewinds in one frame are one rewind
    if rewind_events.read().count() == 0 {
        return;
    }

    info!("Rewinding simulation...");
    sim_time.reset();
    state.clear();
}

/// Apply the update published since the last frame.
///
/// A new trajectory restarts the approach on it. Live samples extend the
/// current trajectory while the clock keeps running, unless they start a
/// new one. Does nothing without a [`TrajectorySlot`] resource.
pub fn swap_streamed_trajectory(
    slot: Option<Res<TrajectorySlot>>,
    mut approach: ResMut<Approach>,
    mut sim_time: ResMut<SimulationTime>,
    mut state: ResMut<ApproachState>,
    mut rewind_events: MessageWriter<RewindEvent>,
) {
    let Some(update) = slot.and_then(|slot| slot.take()) else {
        return;
    };

    let restarted = match update {
        StreamUpdate::Replace(trajectory) => {
            approach.trajectory = Some(trajectory);
            true
        }
        StreamUpdate::Append(samples) => match approach.apply_samples(samples) {
            Ok(restarted) => restarted,
            Err(err) => {
                warn!("Dropping live samples: {err}");
                return;
            }
        },
    };
    if !restarted {
        return;
    }

    if let Some(trajectory) = &approach.trajectory {
        info!(
            "New trajectory: {} samples over {:.0} s",
            trajectory.len(),
            trajectory.end_time() - trajectory.start_time()
        );
    }
    sim_time.reset();
    state.clear();
    // Lets effects and the UI drop the previous impact
    rewind_events.write(RewindEvent);
}

pub fn move_asteroid(
    sim_time: Res<SimulationTime>,
    approach: Res<Approach>,
    controls: Res<ImpactControls>,
    mut asteroids: Query<&mut Transform, With<Asteroid>>,
) {
    let position = approach.position(sim_time.elapsed(), controls.scene_speed());
    let scale = controls.scene_radius() as f32;
    for mut transform in asteroids.iter_mut() {
        transform.translation = position.as_vec3();
        transform.scale = Vec3::splat(scale);
    }
}

/// Evaluate contact for this frame.
pub fn detect_impact(
    mut sim_time: ResMut<SimulationTime>,
    approach: Res<Approach>,
    controls: Res<ImpactControls>,
    mut state: ResMut<ApproachState>,
    mut impact_events: MessageWriter<ImpactEvent>,
) {
    // Skip if paused (avoid re-testing a frozen frame)
    if sim_time.paused {
        return;
    }

    let params = match controls.parameters() {
        Ok(params) => params,
        Err(err) => {
            warn!("Impact parameters rejected: {err}");
            return;
        }
    };

    let scene_speed = controls.scene_speed();
    let elapsed = sim_time.elapsed();
    let previous = state.last_elapsed.replace(elapsed);
    let distance = |t: f64| approach.position(t, scene_speed).distance(approach.target_center);

    let position = approach.position(elapsed, scene_speed);
    let contact_point = position - approach.target_center;
    if state
        .estimator
        .evaluate(&params, contact_point.length(), contact_point)
        .is_none()
    {
        return;
    }

    let contact_elapsed = match previous {
        Some(before) if before < elapsed => {
            refine_contact_time(before, elapsed, params.contact_threshold(), distance)
        }
        _ => elapsed,
    };
    let position = approach.position(contact_elapsed, scene_speed);
    let contact_point = position - approach.target_center;
    let velocity = approach.velocity(contact_elapsed, params.closing_speed_mps());

    let params = match contact_parameters(params, &approach, velocity) {
        Ok(params) => params,
        Err(err) => {
            warn!("Streamed closing speed rejected: {err}");
            return;
        }
    };
    let result = estimate(&params, contact_point, state.estimator.classifier())
        .with_entry_velocity(velocity, contact_point);

    info!(
        "IMPACT! {:.2e} J ({:.2e} t TNT), {:?} {}",
        result.energy_joules,
        result.energy_tons_tnt,
        result.severity,
        if result.is_ocean_impact { "ocean" } else { "land" },
    );

    let event = ImpactEvent {
        result,
        position,
        time: sim_time.current - (elapsed - contact_elapsed),
    };
    impact_events.write(event);
    state.last_impact = Some(event);
    sim_time.paused = true;
}

/// A streamed trajectory hits at its own speed, not the slider's.
fn contact_parameters(
    params: ImpactParameters,
    approach: &Approach,
    velocity: DVec3,
) -> Result<ImpactParameters, ModelError> {
    let speed = velocity.length();
    if approach.trajectory.is_some() && speed > 0.0 {
        params.with_closing_speed(speed)
    } else {
        Ok(params)
    }
}
