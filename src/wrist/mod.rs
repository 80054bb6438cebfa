//! Wrist exoskeleton state
//!
//! Joint angles, keyboard nudging and the hierarchical frames used to draw
//! the three links and the hand brace.

pub mod joint;
pub mod model;
pub mod pose;

pub use joint::WristJoint;
pub use model::{JointPivot, LinkBox, LinkKind, WristFrames, WristModel};
pub use pose::{KeyCommand, WristPose, FULL_TURN};
