//! Joint trajectory generation
//!
//! A cubic ramp for a single joint angle, plus a frame-driven player for
//! callers that cannot block inside an event loop.

pub mod cubic;
pub mod player;

pub use cubic::{CubicTrajectory, Samples, TrajectoryError};
pub use player::TrajectoryPlayer;
