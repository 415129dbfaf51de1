//! One-shot impact detection along an approach.

use bevy::math::DVec3;

use super::surface::{LatitudeBand, SurfaceClassifier};
use super::{ImpactParameters, ImpactResult, estimate};

/// Where an approach currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImpactPhase {
    /// Nothing evaluated since construction or the last reset.
    #[default]
    Idle,
    /// Evaluated at least once, still outside contact distance.
    Approaching,
    /// Contact happened; stays here until [`ImpactEstimator::reset`].
    Impacted,
}

/// Per-frame impact detector.
///
/// Emits exactly one [`ImpactResult`] per approach: on the first evaluation
/// at or inside contact distance. Further evaluations return `None` until
/// the caller resets.
#[derive(Clone, Debug, Default)]
pub struct ImpactEstimator<C = LatitudeBand> {
    phase: ImpactPhase,
    classifier: C,
}

impl<C: SurfaceClassifier> ImpactEstimator<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            phase: ImpactPhase::Idle,
            classifier,
        }
    }

    pub fn phase(&self) -> ImpactPhase {
        self.phase
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Check one frame of an approach.
    ///
    /// # Arguments
    /// * `params` - Current asteroid/target parameters
    /// * `distance_to_target` - Center-to-center distance this frame
    /// * `contact_point` - Asteroid position relative to the target center
    ///
    /// Non-finite distances count as "not in contact".
    pub fn evaluate(
        &mut self,
        params: &ImpactParameters,
        distance_to_target: f64,
        contact_point: DVec3,
    ) -> Option<ImpactResult> {
        if self.phase == ImpactPhase::Impacted {
            return None;
        }

        if distance_to_target <= params.contact_threshold() {
            self.phase = ImpactPhase::Impacted;
            Some(estimate(params, contact_point, &self.classifier))
        } else {
            self.phase = ImpactPhase::Approaching;
            None
        }
    }

    /// Rewind to [`ImpactPhase::Idle`] so the next approach can fire again.
    pub fn reset(&mut self) {
        self.phase = ImpactPhase::Idle;
    }
}
