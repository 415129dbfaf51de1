//! Precomputed trajectories supplied as time-stamped samples.
//!
//! When an external service streams a trajectory, the per-frame position
//! comes from interpolating its samples instead of propagating elements.

pub mod feed;
pub mod stream;

use bevy::math::DVec3;
use wide::f64x4;

#[derive(thiserror::Error, Debug)]
pub enum TrajectoryError {
    #[error("trajectory has no samples")]
    Empty,

    #[error("sample {index} has a non-finite time or position")]
    NonFinite { index: usize },

    #[error("sample {index} at t={time} does not come after t={previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        time: f64,
    },

    #[error("requested time {time} outside trajectory range [{start}, {end}]")]
    OutOfRange { time: f64, start: f64, end: f64 },

    #[error("positions in frame {0:?} are not supported, expected geocentric")]
    UnsupportedFrame(String),

    #[error("malformed stream message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One point of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectorySample {
    pub t: f64,
    pub position: DVec3,
    /// Velocity at `t`, when the source provides one.
    pub velocity: Option<DVec3>,
}

impl TrajectorySample {
    pub fn new(t: f64, position: DVec3) -> Self {
        Self {
            t,
            position,
            velocity: None,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    fn is_finite(&self) -> bool {
        self.t.is_finite()
            && self.position.is_finite()
            && self.velocity.is_none_or(|v| v.is_finite())
    }
}

/// Validated, time-ordered samples with interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledTrajectory {
    samples: Vec<TrajectorySample>,
}

impl SampledTrajectory {
    /// Validate and wrap samples: non-empty, finite, strictly increasing `t`.
    pub fn new(samples: Vec<TrajectorySample>) -> Result<Self, TrajectoryError> {
        if samples.is_empty() {
            return Err(TrajectoryError::Empty);
        }
        check_samples(None, 0, &samples)?;
        Ok(Self { samples })
    }

    /// Whether `samples` start after the last sample, so [`extend`] can
    /// continue this trajectory instead of starting a new one.
    ///
    /// [`extend`]: SampledTrajectory::extend
    pub fn continues_with(&self, samples: &[TrajectorySample]) -> bool {
        samples.first().is_some_and(|s| s.t > self.end_time())
    }

    /// Append later samples. On error the trajectory is left unchanged.
    pub fn extend(&mut self, samples: Vec<TrajectorySample>) -> Result<(), TrajectoryError> {
        check_samples(Some(self.end_time()), self.samples.len(), &samples)?;
        self.samples.extend(samples);
        Ok(())
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start_time(&self) -> f64 {
        self.samples[0].t
    }

    pub fn end_time(&self) -> f64 {
        self.samples[self.samples.len() - 1].t
    }

    pub fn first(&self) -> &TrajectorySample {
        &self.samples[0]
    }

    pub fn last(&self) -> &TrajectorySample {
        &self.samples[self.samples.len() - 1]
    }

    /// Index of the segment [i, i+1] containing `t`. Requires len >= 2 and
    /// `t` inside the range.
    fn segment_index(&self, t: f64) -> usize {
        // First sample strictly after t, minus one
        let upper = self.samples.partition_point(|s| s.t <= t);
        upper.saturating_sub(1).min(self.samples.len() - 2)
    }

    /// Position at `t`, interpolated between the bracketing samples.
    ///
    /// Uses cubic Hermite interpolation when both samples carry a velocity,
    /// linear interpolation otherwise.
    pub fn sample(&self, t: f64) -> Result<DVec3, TrajectoryError> {
        let start = self.start_time();
        let end = self.end_time();
        if !(start..=end).contains(&t) {
            return Err(TrajectoryError::OutOfRange {
                time: t,
                start,
                end,
            });
        }
        if self.samples.len() == 1 {
            return Ok(self.samples[0].position);
        }

        let i0 = self.segment_index(t);
        Ok(interpolate(&self.samples[i0], &self.samples[i0 + 1], t))
    }

    /// Position at `t`, holding the end samples outside the range.
    ///
    /// Total for any finite or non-finite `t`; NaN maps to the last sample.
    pub fn sample_clamped(&self, t: f64) -> DVec3 {
        if t <= self.start_time() {
            return self.first().position;
        }
        match self.sample(t) {
            Ok(pos) => pos,
            Err(_) => self.last().position,
        }
    }

    /// Distance from the clamped position at `t` to `target`.
    pub fn distance_to(&self, t: f64, target: DVec3) -> f64 {
        self.sample_clamped(t).distance(target)
    }

    /// Velocity at `t`: the derivative of the interpolant inside the range,
    /// the end segment's velocity outside it.
    ///
    /// `None` only for a single sample without a velocity.
    pub fn velocity(&self, t: f64) -> Option<DVec3> {
        if self.samples.len() == 1 {
            return self.samples[0].velocity;
        }
        let t = if t.is_nan() {
            self.end_time()
        } else {
            t.clamp(self.start_time(), self.end_time())
        };
        let i0 = self.segment_index(t);
        Some(derivative(&self.samples[i0], &self.samples[i0 + 1], t))
    }
}

/// Validate `samples` as the continuation of a trajectory whose last time
/// is `previous` and which already holds `offset` samples.
fn check_samples(
    mut previous: Option<f64>,
    offset: usize,
    samples: &[TrajectorySample],
) -> Result<(), TrajectoryError> {
    for (i, sample) in samples.iter().enumerate() {
        let index = offset + i;
        if !sample.is_finite() {
            return Err(TrajectoryError::NonFinite { index });
        }
        if let Some(previous) = previous {
            if sample.t <= previous {
                return Err(TrajectoryError::NotIncreasing {
                    index,
                    previous,
                    time: sample.t,
                });
            }
        }
        previous = Some(sample.t);
    }
    Ok(())
}

fn lanes(v: DVec3) -> f64x4 {
    f64x4::new([v.x, v.y, v.z, 0.0])
}

/// Interpolate between two samples with `s0.t <= t <= s1.t`.
fn interpolate(s0: &TrajectorySample, s1: &TrajectorySample, t: f64) -> DVec3 {
    let dt = s1.t - s0.t;
    let s = (t - s0.t) / dt;

    let p0 = lanes(s0.position);
    let p1 = lanes(s1.position);

    let r = match (s0.velocity, s1.velocity) {
        (Some(v0), Some(v1)) => {
            // Tangents scaled by the segment length
            let m0 = lanes(v0) * f64x4::splat(dt);
            let m1 = lanes(v1) * f64x4::splat(dt);

            let s2 = s * s;
            let s3 = s2 * s;
            let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
            let h10 = s3 - 2.0 * s2 + s;
            let h01 = -2.0 * s3 + 3.0 * s2;
            let h11 = s3 - s2;

            p0 * f64x4::splat(h00)
                + m0 * f64x4::splat(h10)
                + p1 * f64x4::splat(h01)
                + m1 * f64x4::splat(h11)
        }
        _ => p0 + (p1 - p0) * f64x4::splat(s),
    };

    from_lanes(r)
}

fn from_lanes(r: f64x4) -> DVec3 {
    let r = r.to_array();
    DVec3::new(r[0], r[1], r[2])
}

/// Time derivative of [`interpolate`] at `t`.
fn derivative(s0: &TrajectorySample, s1: &TrajectorySample, t: f64) -> DVec3 {
    let dt = s1.t - s0.t;
    let s = (t - s0.t) / dt;

    let p0 = lanes(s0.position);
    let p1 = lanes(s1.position);

    let r = match (s0.velocity, s1.velocity) {
        (Some(v0), Some(v1)) => {
            let m0 = lanes(v0) * f64x4::splat(dt);
            let m1 = lanes(v1) * f64x4::splat(dt);

            let s2 = s * s;
            let d00 = 6.0 * s2 - 6.0 * s;
            let d10 = 3.0 * s2 - 4.0 * s + 1.0;
            let d01 = -6.0 * s2 + 6.0 * s;
            let d11 = 3.0 * s2 - 2.0 * s;

            (p0 * f64x4::splat(d00)
                + m0 * f64x4::splat(d10)
                + p1 * f64x4::splat(d01)
                + m1 * f64x4::splat(d11))
                / f64x4::splat(dt)
        }
        _ => (p1 - p0) / f64x4::splat(dt),
    };

    from_lanes(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_line() -> SampledTrajectory {
        SampledTrajectory::new(vec![
            TrajectorySample::new(0.0, DVec3::new(0.0, 0.0, 0.0)),
            TrajectorySample::new(10.0, DVec3::new(100.0, 0.0, 0.0)),
            TrajectorySample::new(30.0, DVec3::new(100.0, 40.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_linear_interpolation() {
        let traj = straight_line();
        let p = traj.sample(5.0).unwrap();
        assert_relative_eq!(p.x, 50.0, epsilon = 1e-12);

        // Second segment is twice as long in time
        let p = traj.sample(20.0).unwrap();
        assert_relative_eq!(p.x, 100.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hits_samples_exactly() {
        let traj = straight_line();
        for s in traj.samples() {
            let p = traj.sample(s.t).unwrap();
            assert!((p - s.position).length() < 1e-12, "t={}", s.t);
        }
    }

    #[test]
    fn test_hermite_reproduces_uniform_motion() {
        // Constant velocity: Hermite must match the straight line exactly
        let v = DVec3::new(3.0, -1.0, 2.0);
        let traj = SampledTrajectory::new(
            (0..5)
                .map(|i| {
                    let t = i as f64 * 2.0;
                    TrajectorySample::new(t, v * t).with_velocity(v)
                })
                .collect(),
        )
        .unwrap();

        for t in [0.3, 1.7, 4.5, 7.9] {
            let p = traj.sample(t).unwrap();
            assert!((p - v * t).length() < 1e-9, "t={t}");
        }
    }

    #[test]
    fn test_hermite_follows_parabola() {
        // x = t², v = 2t: cubic Hermite is exact for quadratics
        let traj = SampledTrajectory::new(
            [0.0, 1.0, 3.0]
                .iter()
                .map(|&t| {
                    TrajectorySample::new(t, DVec3::new(t * t, 0.0, 0.0))
                        .with_velocity(DVec3::new(2.0 * t, 0.0, 0.0))
                })
                .collect(),
        )
        .unwrap();

        assert_relative_eq!(traj.sample(0.5).unwrap().x, 0.25, epsilon = 1e-12);
        assert_relative_eq!(traj.sample(2.0).unwrap().x, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range() {
        let traj = straight_line();
        assert!(matches!(
            traj.sample(-1.0),
            Err(TrajectoryError::OutOfRange { .. })
        ));
        assert!(matches!(
            traj.sample(31.0),
            Err(TrajectoryError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_clamped_holds_ends() {
        let traj = straight_line();
        assert_eq!(traj.sample_clamped(-5.0), DVec3::ZERO);
        assert_eq!(traj.sample_clamped(100.0), DVec3::new(100.0, 40.0, 0.0));
        assert_eq!(traj.sample_clamped(f64::NAN), DVec3::new(100.0, 40.0, 0.0));
        assert_relative_eq!(traj.distance_to(100.0, DVec3::new(100.0, 0.0, 0.0)), 40.0);
    }

    #[test]
    fn test_single_sample() {
        let traj = SampledTrajectory::new(vec![TrajectorySample::new(2.0, DVec3::ONE)]).unwrap();
        assert_eq!(traj.sample(2.0).unwrap(), DVec3::ONE);
        assert_eq!(traj.sample_clamped(50.0), DVec3::ONE);
        assert!(traj.sample(2.5).is_err());
    }

    #[test]
    fn test_velocity_from_samples() {
        // x = t², v = 2t: the Hermite derivative is exact
        let traj = SampledTrajectory::new(
            [0.0, 1.0, 3.0]
                .iter()
                .map(|&t| {
                    TrajectorySample::new(t, DVec3::new(t * t, 0.0, 0.0))
                        .with_velocity(DVec3::new(2.0 * t, 0.0, 0.0))
                })
                .collect(),
        )
        .unwrap();
        assert_relative_eq!(traj.velocity(0.5).unwrap().x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(traj.velocity(2.0).unwrap().x, 4.0, epsilon = 1e-12);
        // Held at the ends
        assert_relative_eq!(traj.velocity(10.0).unwrap().x, 6.0, epsilon = 1e-12);

        // Without velocities: slope of the segment
        let v = straight_line().velocity(20.0).unwrap();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);

        let single = SampledTrajectory::new(vec![TrajectorySample::new(0.0, DVec3::ONE)]).unwrap();
        assert!(single.velocity(0.0).is_none());
    }

    #[test]
    fn test_extend_continues_trajectory() {
        let mut traj = straight_line();
        let later = vec![
            TrajectorySample::new(40.0, DVec3::new(100.0, 60.0, 0.0)),
            TrajectorySample::new(50.0, DVec3::new(100.0, 80.0, 0.0)),
        ];
        assert!(traj.continues_with(&later));
        traj.extend(later).unwrap();
        assert_eq!(traj.len(), 5);
        assert_relative_eq!(traj.sample(45.0).unwrap().y, 70.0, epsilon = 1e-12);

        // Going back in time is a restart, not a continuation
        let earlier = vec![TrajectorySample::new(50.0, DVec3::ZERO)];
        assert!(!traj.continues_with(&earlier));
        assert!(matches!(
            traj.extend(earlier),
            Err(TrajectoryError::NotIncreasing { index: 5, .. })
        ));
        assert_eq!(traj.len(), 5);
        assert!(!traj.continues_with(&[]));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            SampledTrajectory::new(Vec::new()),
            Err(TrajectoryError::Empty)
        ));
        assert!(matches!(
            SampledTrajectory::new(vec![
                TrajectorySample::new(0.0, DVec3::ZERO),
                TrajectorySample::new(0.0, DVec3::ONE),
            ]),
            Err(TrajectoryError::NotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            SampledTrajectory::new(vec![TrajectorySample::new(0.0, DVec3::splat(f64::NAN))]),
            Err(TrajectoryError::NonFinite { index: 0 })
        ));
        assert!(matches!(
            SampledTrajectory::new(vec![
                TrajectorySample::new(0.0, DVec3::ZERO).with_velocity(DVec3::splat(f64::INFINITY))
            ]),
            Err(TrajectoryError::NonFinite { index: 0 })
        ));
    }
}
