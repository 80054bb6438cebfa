//! # wrist-exo
//!
//! A three-joint wrist exoskeleton model driven by cubic joint trajectories.
//!
//! ## Features
//! - Cubic ease-in/ease-out ramps for a single joint angle
//! - Rehab sequences (flexion/extension, supination/pronation, radial/ulnar)
//!   run either to completion with a per-step hook or frame by frame
//! - Hierarchical wireframe model of the links and hand brace
//! - WebGPU viewer with keyboard and spinner control
//!
//! ## Example
//! ```rust
//! use wrist_exo::{ExoConfig, RehabMotion, RehabSequence, WristJoint, WristPose};
//!
//! let config = ExoConfig::builder().steps_per_segment(30).build();
//! let mut pose = WristPose::ZERO;
//!
//! let sequence = RehabSequence::plan(RehabMotion::FlexionExtension, &pose, &config)?;
//! let mut frames = 0;
//! sequence.run(&mut pose, |_pose| frames += 1);
//!
//! assert_eq!(frames, 4 * 31);
//! assert_eq!(pose.get(WristJoint::Flexion), 0.0);
//! # Ok::<(), wrist_exo::TrajectoryError>(())
//! ```

pub mod config;
pub mod error;
pub mod rehab;
pub mod render;
pub mod trajectory;
pub mod wrist;

pub use config::{ExoConfig, ExoConfigBuilder, RangeOfMotion};
pub use error::{ExoError, Result};
pub use rehab::{RehabMotion, RehabPlayer, RehabSequence, Segment, StepEvent};
pub use trajectory::{CubicTrajectory, TrajectoryError, TrajectoryPlayer};
pub use wrist::{KeyCommand, WristFrames, WristJoint, WristModel, WristPose};
