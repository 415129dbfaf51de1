//! Streamed trajectories: decoding, hand-off and sampling.

use std::sync::{Arc, Barrier};
use std::thread;

use approx::assert_relative_eq;
use bevy::math::DVec3;
use orrery::trajectory::feed::TrajectorySlot;
use orrery::trajectory::stream::{self, StreamMessage, StreamUpdate, TrajectoryRequest};
use orrery::trajectory::{SampledTrajectory, TrajectoryError, TrajectorySample};
use orrery::types::{EARTH_RADIUS_M, KM_TO_METERS};

const DEMO: &str = include_str!("../demos/straight_descent.json");

#[test]
fn test_demo_descent_decodes() {
    let trajectory = stream::decode_trajectory(DEMO).unwrap();

    assert_eq!(trajectory.len(), 52);
    assert_relative_eq!(trajectory.start_time(), 0.0);
    assert_relative_eq!(trajectory.end_time(), 3060.0);
    assert_relative_eq!(
        trajectory.first().position.x,
        30_000.0 * KM_TO_METERS,
        max_relative = 1e-9
    );
    // Ends below the surface, so any approach along it makes contact
    assert!(trajectory.last().position.length() < EARTH_RADIUS_M);
    assert!(trajectory.first().position.length() > 5.0 * EARTH_RADIUS_M);
}

#[test]
fn test_demo_descent_is_smooth_between_frames() {
    let trajectory = stream::decode_trajectory(DEMO).unwrap();
    let velocity = trajectory.first().velocity.unwrap();

    // Constant velocity: Hermite reproduces the line between frames
    for t in [30.0, 615.5, 1999.0, 3059.0] {
        let expected = trajectory.first().position + velocity * t;
        let p = trajectory.sample(t).unwrap();
        assert!(
            p.distance(expected) < 5.0,
            "t = {t}: off by {} m",
            p.distance(expected)
        );
    }
}

#[test]
fn test_distance_to_earth_decreases() {
    let trajectory = stream::decode_trajectory(DEMO).unwrap();
    let mut last = f64::INFINITY;
    for i in 0..=100 {
        let t = i as f64 * 30.6;
        let d = trajectory.distance_to(t, DVec3::ZERO);
        assert!(d < last, "distance grew at t = {t}");
        last = d;
    }
}

#[test]
fn test_sampling_outside_range() {
    let trajectory = stream::decode_trajectory(DEMO).unwrap();

    assert!(matches!(
        trajectory.sample(-1.0),
        Err(TrajectoryError::OutOfRange { .. })
    ));
    assert!(trajectory.sample(3061.0).is_err());
    assert_eq!(trajectory.sample_clamped(-1.0), trajectory.first().position);
    assert_eq!(trajectory.sample_clamped(1e9), trajectory.last().position);
    assert_eq!(trajectory.sample_clamped(f64::NAN), trajectory.last().position);
}

#[test]
fn test_live_sample_decodes_as_single_point() {
    let text = r#"{"t_s": 12.0, "x_km": 7000.0, "y_km": 0.0, "z_km": 0.0,
                   "speed_km_s": 7.5, "frame": "GCRS"}"#;
    let msg = stream::decode(text).unwrap();
    assert!(matches!(&msg, StreamMessage::Live(s) if s.altitude_km.is_none()));

    let trajectory = msg.into_trajectory().unwrap();
    assert_eq!(trajectory.len(), 1);
    assert_eq!(trajectory.sample(12.0).unwrap(), DVec3::new(7.0e6, 0.0, 0.0));
    assert!(trajectory.sample(12.5).is_err());
}

#[test]
fn test_malformed_messages_are_rejected() {
    assert!(matches!(
        stream::decode_trajectory("{\"frames\": [}"),
        Err(TrajectoryError::Decode(_))
    ));
    assert!(matches!(
        stream::decode_trajectory(r#"{"frames": []}"#),
        Err(TrajectoryError::Empty)
    ));
    assert!(stream::decode_trajectory(r#"{"status": "ok"}"#).is_err());
}

#[test]
fn test_request_round_trips_service_fields() {
    let request: TrajectoryRequest = serde_json::from_str(r#"{"diameter_m": 120.0}"#).unwrap();
    assert_eq!(request.diameter_m, 120.0);
    assert_eq!(request.r_km, stream::DEFAULT_REQUEST_R_KM);

    let json: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
    assert_eq!(json["v_km_s"][0], -6.5);
    assert_eq!(json["diameter_m"], 120.0);
}

#[test]
fn test_slot_hands_off_across_threads() {
    let slot = TrajectorySlot::new();
    let barrier = Arc::new(Barrier::new(2));

    let publisher = {
        let slot = slot.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            assert!(!slot.publish_message("not json"));
            assert!(slot.publish_message(DEMO));
            barrier.wait();
        })
    };

    barrier.wait();
    publisher.join().unwrap();

    let Some(StreamUpdate::Replace(trajectory)) = slot.take() else {
        panic!("published trajectory");
    };
    assert_eq!(trajectory.len(), 52);
    assert!(slot.take().is_none(), "take empties the slot");
}

#[test]
fn test_slot_keeps_newest_of_several() {
    let slot = TrajectorySlot::new();

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let slot = slot.clone();
            thread::spawn(move || {
                let samples = (0..=n)
                    .map(|i| TrajectorySample::new(i as f64, DVec3::X * i as f64))
                    .collect();
                slot.publish(SampledTrajectory::new(samples).unwrap());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Exactly one of the four survives
    let Some(StreamUpdate::Replace(trajectory)) = slot.take() else {
        panic!("one trajectory should survive");
    };
    assert!((2..=5).contains(&trajectory.len()));
    assert!(!slot.has_pending());
}

#[test]
fn test_live_samples_survive_concurrent_takes() {
    let slot = TrajectorySlot::new();

    let publisher = {
        let slot = slot.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let text = format!(
                    r#"{{"t_s":{i},"x_km":{},"y_km":0,"z_km":0,"speed_km_s":1,"frame":"geocentric"}}"#,
                    1000 - i
                );
                assert!(slot.publish_message(&text));
            }
        })
    };

    let mut received = Vec::new();
    let mut drain = |update: Option<StreamUpdate>| match update {
        Some(StreamUpdate::Append(samples)) => received.extend(samples),
        Some(StreamUpdate::Replace(_)) => panic!("increasing samples never restart"),
        None => {}
    };
    while !publisher.is_finished() {
        drain(slot.take());
    }
    publisher.join().unwrap();
    drain(slot.take());

    assert_eq!(received.len(), 200);
    assert!(received.windows(2).all(|w| w[0].t < w[1].t));
    assert_eq!(received[0].position, DVec3::new(1000.0 * KM_TO_METERS, 0.0, 0.0));
}
