//! JSON messages exchanged with a trajectory service.
//!
//! The service answers each [`TrajectoryRequest`] with a batch of frames in
//! kilometres; some deployments instead push one live sample at a time.
//! Both shapes decode into a [`StreamMessage`]. A batch replaces the
//! trajectory being flown and live samples extend it ([`StreamUpdate`]).

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};

use super::{SampledTrajectory, TrajectoryError, TrajectorySample};
use crate::types::KM_TO_METERS;

/// Initial geocentric position the service propagates from by default.
pub const DEFAULT_REQUEST_R_KM: [f64; 3] = [7000.0, -2000.0, 1200.0];
/// Initial geocentric velocity the service propagates from by default.
pub const DEFAULT_REQUEST_V_KM_S: [f64; 3] = [-6.5, -2.0, -1.0];
pub const DEFAULT_REQUEST_DIAMETER_M: f64 = 40.0;

/// One propagated frame of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamFrame {
    pub pos_km: [f64; 3],
    pub vel_km_s: [f64; 3],
    pub time_s: f64,
}

/// The only reference frame positions are accepted in.
pub const GEOCENTRIC_FRAME: &str = "geocentric";

/// A single state pushed by a live feed, one per message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiveSample {
    pub t_s: f64,
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vx_km_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vy_km_s: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vz_km_s: Option<f64>,
    pub speed_km_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_km: Option<f64>,
    pub frame: String,
}

impl LiveSample {
    /// Convert to metres, rejecting positions that are not geocentric.
    pub fn to_sample(&self) -> Result<TrajectorySample, TrajectoryError> {
        if self.frame != GEOCENTRIC_FRAME {
            return Err(TrajectoryError::UnsupportedFrame(self.frame.clone()));
        }
        let sample = TrajectorySample::new(self.t_s, km_to_m([self.x_km, self.y_km, self.z_km]));
        Ok(match (self.vx_km_s, self.vy_km_s, self.vz_km_s) {
            (Some(vx), Some(vy), Some(vz)) => sample.with_velocity(km_to_m([vx, vy, vz])),
            _ => sample,
        })
    }
}

/// What a decoded message does to the trajectory being flown.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamUpdate {
    /// Fly this trajectory from its start.
    Replace(SampledTrajectory),
    /// Continue the current trajectory with these samples, oldest first.
    /// If they do not come after it, they start a new one.
    Append(Vec<TrajectorySample>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamMessage {
    Batch { frames: Vec<StreamFrame> },
    Live(LiveSample),
}

impl StreamMessage {
    /// Convert to a validated trajectory in metres and metres per second.
    pub fn into_trajectory(self) -> Result<SampledTrajectory, TrajectoryError> {
        let samples = match self {
            StreamMessage::Batch { frames } => frames
                .into_iter()
                .map(|f| {
                    TrajectorySample::new(f.time_s, km_to_m(f.pos_km))
                        .with_velocity(km_to_m(f.vel_km_s))
                })
                .collect(),
            StreamMessage::Live(s) => vec![s.to_sample()?],
        };
        SampledTrajectory::new(samples)
    }

    /// A batch replaces the trajectory; a live sample appends to it.
    pub fn into_update(self) -> Result<StreamUpdate, TrajectoryError> {
        match self {
            StreamMessage::Live(s) => Ok(StreamUpdate::Append(vec![s.to_sample()?])),
            batch => Ok(StreamUpdate::Replace(batch.into_trajectory()?)),
        }
    }
}

fn km_to_m(v: [f64; 3]) -> DVec3 {
    DVec3::from_array(v) * KM_TO_METERS
}

pub fn decode(text: &str) -> Result<StreamMessage, TrajectoryError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode and validate in one step.
pub fn decode_trajectory(text: &str) -> Result<SampledTrajectory, TrajectoryError> {
    decode(text)?.into_trajectory()
}

/// Initial state sent to the service. Missing fields fall back to the
/// service defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryRequest {
    pub r_km: [f64; 3],
    pub v_km_s: [f64; 3],
    pub diameter_m: f64,
}

impl Default for TrajectoryRequest {
    fn default() -> Self {
        Self {
            r_km: DEFAULT_REQUEST_R_KM,
            v_km_s: DEFAULT_REQUEST_V_KM_S,
            diameter_m: DEFAULT_REQUEST_DIAMETER_M,
        }
    }
}

impl TrajectoryRequest {
    pub fn to_json(&self) -> Result<String, TrajectoryError> {
        Ok(serde_json::to_string(self)?)
    }
}
