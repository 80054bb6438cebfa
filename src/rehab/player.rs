use super::sequence::RehabSequence;
use crate::trajectory::TrajectoryPlayer;
use crate::wrist::{WristJoint, WristPose};

/// Plays a [`RehabSequence`] one frame at a time.
#[derive(Debug, Clone)]
pub struct RehabPlayer {
    label: String,
    sequence: RehabSequence,
    step_rate: f32,
    index: usize,
    current: Option<TrajectoryPlayer>,
    completed_steps: u64,
}

impl RehabPlayer {
    pub fn new(label: impl Into<String>, sequence: RehabSequence, step_rate: f32) -> Self {
        let current = sequence
            .segments()
            .first()
            .map(|s| TrajectoryPlayer::new(s.trajectory, step_rate));

        Self {
            label: label.into(),
            sequence,
            step_rate,
            index: 0,
            current,
            completed_steps: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_step_rate(&mut self, step_rate: f32) {
        self.step_rate = step_rate;
        if let Some(player) = &mut self.current {
            player.set_step_rate(step_rate);
        }
    }

    /// Moves playback forward by `dt` seconds and writes the newest angle
    /// into `pose`. Returns `true` while there is still motion left.
    pub fn advance(&mut self, pose: &mut WristPose, dt: f32) -> bool {
        let Some(player) = &mut self.current else {
            return false;
        };
        let joint = self.sequence.segments()[self.index].joint;

        if let Some(angle) = player.advance(dt) {
            pose.set(joint, angle);
        }

        if player.is_finished() {
            self.completed_steps += player.trajectory().steps() as u64 + 1;
            self.index += 1;
            self.current = self
                .sequence
                .segments()
                .get(self.index)
                .map(|s| TrajectoryPlayer::new(s.trajectory, self.step_rate));

            if self.current.is_none() {
                log::info!("{} finished", self.label);
            }
        }

        self.current.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    pub fn stop(&mut self) {
        if self.current.take().is_some() {
            log::info!(
                "{} stopped at segment {}/{}",
                self.label,
                self.index + 1,
                self.sequence.len()
            );
        }
    }

    pub fn current_joint(&self) -> Option<WristJoint> {
        self.current
            .as_ref()
            .map(|_| self.sequence.segments()[self.index].joint)
    }

    pub fn segment_index(&self) -> usize {
        self.index
    }

    pub fn progress(&self) -> f32 {
        let total = self.sequence.total_steps();
        if total == 0 || self.is_finished() {
            return 1.0;
        }
        let in_segment = self.current.as_ref().map_or(0.0, |p| {
            p.progress() * (p.trajectory().steps() as f32 + 1.0)
        });
        ((self.completed_steps as f32 + in_segment) / total as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExoConfig;
    use crate::rehab::RehabMotion;

    fn flexion_player(steps: u32, rate: f32) -> RehabPlayer {
        let config = ExoConfig::builder().steps_per_segment(steps).build();
        let sequence =
            RehabSequence::plan(RehabMotion::FlexionExtension, &WristPose::ZERO, &config).unwrap();
        RehabPlayer::new("flexion", sequence, rate)
    }

    #[test]
    fn test_plays_to_completion_and_returns_home() {
        let mut player = flexion_player(5, 10.0);
        let mut pose = WristPose::ZERO;
        let mut peak = 0.0f32;
        let mut trough = 0.0f32;
        let mut frames = 0;

        while player.advance(&mut pose, 0.1) {
            let angle = pose.get(WristJoint::Flexion);
            peak = peak.max(angle);
            trough = trough.min(angle);
            frames += 1;
            assert!(frames < 1000);
        }

        assert!(player.is_finished());
        assert_eq!(peak, 60.0);
        assert_eq!(trough, -60.0);
        assert_eq!(pose.get(WristJoint::Flexion), 0.0);
        assert_eq!(player.progress(), 1.0);
    }

    #[test]
    fn test_progress_is_monotone() {
        let mut player = flexion_player(8, 30.0);
        let mut pose = WristPose::ZERO;
        let mut last = player.progress();
        while player.advance(&mut pose, 1.0 / 60.0) {
            let now = player.progress();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_stop_freezes_pose() {
        let mut player = flexion_player(10, 10.0);
        let mut pose = WristPose::ZERO;
        player.advance(&mut pose, 0.0);
        player.advance(&mut pose, 0.3);
        let frozen = pose;
        assert_eq!(player.current_joint(), Some(WristJoint::Flexion));

        player.stop();
        assert!(!player.advance(&mut pose, 1.0));
        assert_eq!(pose, frozen);
        assert_eq!(player.current_joint(), None);
    }

    #[test]
    fn test_empty_sequence_is_finished() {
        let mut player = RehabPlayer::new("home", RehabSequence::new(), 60.0);
        let mut pose = WristPose::ZERO;
        assert!(player.is_finished());
        assert!(!player.advance(&mut pose, 0.1));
    }
}
