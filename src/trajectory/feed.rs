//! Hand-off point between a trajectory source and the frame loop.

use std::sync::{Arc, Mutex, MutexGuard};

use bevy::prelude::*;

use super::stream::{self, StreamUpdate};
use super::{SampledTrajectory, TrajectorySample};

/// Holds at most one update waiting to be applied by the frame loop.
///
/// Clones share the same slot. The source thread calls [`publish`] or
/// [`publish_sample`]; the frame loop calls [`take`] once at frame start.
/// A published trajectory supersedes anything pending. Live samples
/// published between two takes are merged so none is lost.
///
/// [`publish`]: TrajectorySlot::publish
/// [`publish_sample`]: TrajectorySlot::publish_sample
/// [`take`]: TrajectorySlot::take
#[derive(Resource, Clone, Default, Debug)]
pub struct TrajectorySlot {
    pending: Arc<Mutex<Option<StreamUpdate>>>,
}

impl TrajectorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<StreamUpdate>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Drop whatever a panicking publisher left and keep the feed alive
                let mut guard = poisoned.into_inner();
                *guard = None;
                self.pending.clear_poison();
                guard
            }
        }
    }

    /// Replace the trajectory being flown.
    pub fn publish(&self, trajectory: SampledTrajectory) {
        *self.lock() = Some(StreamUpdate::Replace(trajectory));
    }

    /// Queue one live sample.
    ///
    /// A sample that does not come after the pending ones means the source
    /// restarted: it replaces them as the start of a new trajectory.
    pub fn publish_sample(&self, sample: TrajectorySample) {
        let mut slot = self.lock();
        let update = match slot.take() {
            None => StreamUpdate::Append(vec![sample]),
            Some(StreamUpdate::Append(mut samples)) => {
                if samples.last().is_some_and(|last| sample.t > last.t) {
                    samples.push(sample);
                    StreamUpdate::Append(samples)
                } else {
                    restart(sample)
                }
            }
            Some(StreamUpdate::Replace(mut trajectory)) => {
                if trajectory.extend(vec![sample]).is_ok() {
                    StreamUpdate::Replace(trajectory)
                } else {
                    restart(sample)
                }
            }
        };
        *slot = Some(update);
    }

    /// Decode a raw stream message and publish it.
    ///
    /// Malformed messages are logged and dropped. Returns whether anything
    /// was published.
    pub fn publish_message(&self, text: &str) -> bool {
        match stream::decode(text).and_then(|msg| msg.into_update()) {
            Ok(StreamUpdate::Replace(trajectory)) => {
                self.publish(trajectory);
                true
            }
            Ok(StreamUpdate::Append(samples)) => {
                for sample in samples {
                    self.publish_sample(sample);
                }
                true
            }
            Err(err) => {
                warn!("Ignoring trajectory message: {err}");
                false
            }
        }
    }

    /// Take the pending update, if any. `None` means "no new data".
    pub fn take(&self) -> Option<StreamUpdate> {
        self.lock().take()
    }

    pub fn has_pending(&self) -> bool {
        self.lock().is_some()
    }
}

fn restart(sample: TrajectorySample) -> StreamUpdate {
    match SampledTrajectory::new(vec![sample]) {
        Ok(trajectory) => StreamUpdate::Replace(trajectory),
        // Non-finite samples are caught again when applied
        Err(_) => StreamUpdate::Append(vec![sample]),
    }
}
