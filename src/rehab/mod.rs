//! Rehab sequencing
//!
//! Chains single-joint cubic ramps into the canned exercises, either run to
//! completion with a per-step hook or played back frame by frame.

pub mod motion;
pub mod player;
pub mod sequence;

pub use motion::RehabMotion;
pub use player::RehabPlayer;
pub use sequence::{RehabSequence, Segment, StepEvent, ZERO_TOLERANCE};
