use super::motion::RehabMotion;
use crate::config::ExoConfig;
use crate::trajectory::{CubicTrajectory, TrajectoryError};
use crate::wrist::{WristJoint, WristPose};

/// Angles within this distance of zero count as already at rest.
pub const ZERO_TOLERANCE: f32 = 1e-3;

/// One cubic ramp bound to the joint it drives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub joint: WristJoint,
    pub trajectory: CubicTrajectory,
}

/// Where a blocking run currently is, handed to the per-step hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    pub segment: usize,
    pub joint: WristJoint,
    pub step: u32,
    pub steps: u32,
    pub angle: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RehabSequence {
    segments: Vec<Segment>,
}

impl RehabSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ramp the motion's joint to zero if needed, then out to the positive
    /// excursion, back, out to the negative excursion and back.
    pub fn plan(
        motion: RehabMotion,
        pose: &WristPose,
        config: &ExoConfig,
    ) -> Result<Self, TrajectoryError> {
        let joint = motion.joint();
        let steps = config.steps_per_segment();
        let mut sequence = Self::new();

        let mut from = pose.get(joint);
        if !pose.is_zero(joint, ZERO_TOLERANCE) {
            sequence.push_ramp(joint, from, 0.0, steps)?;
        }
        from = 0.0;

        for to in motion.waypoints(config.range_of(motion)) {
            sequence.push_ramp(joint, from, to, steps)?;
            from = to;
        }

        log::debug!(
            "planned {} with {} segments of {} steps",
            motion.name(),
            sequence.len(),
            steps
        );
        Ok(sequence)
    }

    /// Ramp every displaced joint back to zero, one joint at a time.
    pub fn home(pose: &WristPose, config: &ExoConfig) -> Result<Self, TrajectoryError> {
        let mut sequence = Self::new();
        for joint in WristJoint::ALL {
            if !pose.is_zero(joint, ZERO_TOLERANCE) {
                sequence.push_ramp(joint, pose.get(joint), 0.0, config.steps_per_segment())?;
            }
        }
        Ok(sequence)
    }

    /// Appends a ramp; ramps that would not move the joint are dropped.
    pub fn push_ramp(
        &mut self,
        joint: WristJoint,
        from: f32,
        to: f32,
        steps: u32,
    ) -> Result<(), TrajectoryError> {
        let trajectory = CubicTrajectory::new(from, to, steps)?;
        if from != to {
            self.segments.push(Segment { joint, trajectory });
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total hook calls a blocking run makes.
    pub fn total_steps(&self) -> u64 {
        self.segments
            .iter()
            .map(|s| s.trajectory.steps() as u64 + 1)
            .sum()
    }

    pub fn final_pose(&self, start: &WristPose) -> WristPose {
        let mut pose = *start;
        for segment in &self.segments {
            pose.set(segment.joint, segment.trajectory.target());
        }
        pose
    }

    /// Drives every segment in order, writing into `pose` and calling `hook`
    /// after each write.
    pub fn run<F>(&self, pose: &mut WristPose, mut hook: F)
    where
        F: FnMut(&WristPose),
    {
        self.run_traced(pose, |_, pose| hook(pose));
    }

    pub fn run_traced<F>(&self, pose: &mut WristPose, mut hook: F)
    where
        F: FnMut(StepEvent, &WristPose),
    {
        for (index, segment) in self.segments.iter().enumerate() {
            let steps = segment.trajectory.steps();
            for (step, angle) in segment.trajectory.samples().enumerate() {
                pose.set(segment.joint, angle);
                let event = StepEvent {
                    segment: index,
                    joint: segment.joint,
                    step: step as u32,
                    steps,
                    angle,
                };
                hook(event, pose);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExoConfig {
        ExoConfig::builder().steps_per_segment(10).build()
    }

    fn endpoints(sequence: &RehabSequence) -> Vec<(f32, f32)> {
        sequence
            .segments()
            .iter()
            .map(|s| (s.trajectory.initial(), s.trajectory.target()))
            .collect()
    }

    #[test]
    fn test_plan_from_rest() {
        let sequence =
            RehabSequence::plan(RehabMotion::FlexionExtension, &WristPose::ZERO, &config()).unwrap();
        assert_eq!(
            endpoints(&sequence),
            vec![(0.0, 60.0), (60.0, 0.0), (0.0, -60.0), (-60.0, 0.0)]
        );
        assert!(sequence.segments().iter().all(|s| s.joint == WristJoint::Flexion));
    }

    #[test]
    fn test_plan_ramps_to_zero_first() {
        let pose = WristPose::new(0.0, -12.0, 0.0);
        let sequence = RehabSequence::plan(RehabMotion::RadialUlnar, &pose, &config()).unwrap();
        let ends = endpoints(&sequence);
        assert_eq!(ends.len(), 5);
        assert_eq!(ends[0], (-12.0, 0.0));
        assert_eq!(ends[1], (0.0, 20.0));
        assert_eq!(ends[3], (0.0, -30.0));
    }

    #[test]
    fn test_plan_ignores_other_joints() {
        let pose = WristPose::new(0.0, 0.0, 33.0);
        let sequence =
            RehabSequence::plan(RehabMotion::SupinationPronation, &pose, &config()).unwrap();
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.final_pose(&pose), pose);
    }

    #[test]
    fn test_home_moves_one_joint_at_a_time() {
        let pose = WristPose::new(10.0, 0.0, -40.0);
        let sequence = RehabSequence::home(&pose, &config()).unwrap();
        let joints: Vec<WristJoint> = sequence.segments().iter().map(|s| s.joint).collect();
        assert_eq!(joints, vec![WristJoint::Pronation, WristJoint::Flexion]);
        assert_eq!(sequence.final_pose(&pose), WristPose::ZERO);
        assert!(RehabSequence::home(&WristPose::ZERO, &config()).unwrap().is_empty());
    }

    #[test]
    fn test_run_calls_hook_every_step() {
        let sequence =
            RehabSequence::plan(RehabMotion::FlexionExtension, &WristPose::ZERO, &config()).unwrap();
        let mut pose = WristPose::ZERO;
        let mut frames = 0u64;
        let mut peak = 0.0f32;
        sequence.run(&mut pose, |p| {
            frames += 1;
            peak = peak.max(p.get(WristJoint::Flexion));
        });

        assert_eq!(frames, sequence.total_steps());
        assert_eq!(frames, 44);
        assert_eq!(peak, 60.0);
        assert_eq!(pose, WristPose::ZERO);
    }

    #[test]
    fn test_run_traced_reports_segment_boundaries() {
        let sequence = RehabSequence::plan(
            RehabMotion::RadialUlnar,
            &WristPose::new(0.0, 5.0, 0.0),
            &config(),
        )
        .unwrap();
        let mut pose = WristPose::new(0.0, 5.0, 0.0);
        let mut events = Vec::new();
        sequence.run_traced(&mut pose, |event, _| events.push(event));

        let first = events[0];
        assert_eq!((first.segment, first.step, first.angle), (0, 0, 5.0));
        let last = *events.last().unwrap();
        assert_eq!((last.segment, last.step, last.angle), (4, 10, 0.0));
        assert!(events.iter().all(|e| e.joint == WristJoint::Deviation));
    }

    #[test]
    fn test_zero_range_drops_flat_segments() {
        let config = ExoConfig::builder()
            .steps_per_segment(5)
            .range_of_motion(
                RehabMotion::RadialUlnar,
                crate::config::RangeOfMotion::new(0.0, 15.0),
            )
            .build();
        let sequence =
            RehabSequence::plan(RehabMotion::RadialUlnar, &WristPose::ZERO, &config).unwrap();
        assert_eq!(endpoints(&sequence), vec![(0.0, -15.0), (-15.0, 0.0)]);
    }

    #[test]
    fn test_nan_pose_is_rejected() {
        let pose = WristPose::new(f32::NAN, 0.0, 0.0);
        assert!(RehabSequence::plan(RehabMotion::SupinationPronation, &pose, &config()).is_err());
    }
}
