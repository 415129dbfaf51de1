//! Orrery - orbit propagation and asteroid impact estimation
//!
//! The library core (`orbit`, `impact`, `trajectory`) is plain data and pure
//! functions. The Bevy plugins on top drive it once per frame for the
//! desktop app and for headless tests.

pub mod approach;
pub mod bodies;
pub mod camera;
pub mod error;
pub mod impact;
pub mod orbit;
pub mod render;
pub mod time;
pub mod trajectory;
pub mod types;
pub mod ui;
