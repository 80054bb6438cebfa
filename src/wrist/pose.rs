use super::joint::WristJoint;

/// One full turn; keyboard nudges wrap at this magnitude.
pub const FULL_TURN: f32 = 360.0;

/// Joint angles in degrees, indexed by [`WristJoint`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WristPose {
    angles: [f32; 3],
}

impl WristPose {
    pub const ZERO: Self = Self { angles: [0.0; 3] };

    pub fn new(pronation: f32, deviation: f32, flexion: f32) -> Self {
        Self {
            angles: [pronation, deviation, flexion],
        }
    }

    pub fn get(&self, joint: WristJoint) -> f32 {
        self.angles[joint.index()]
    }

    pub fn set(&mut self, joint: WristJoint, degrees: f32) {
        self.angles[joint.index()] = degrees;
    }

    pub fn angle_mut(&mut self, joint: WristJoint) -> &mut f32 {
        &mut self.angles[joint.index()]
    }

    pub fn angles(&self) -> [f32; 3] {
        self.angles
    }

    /// Adds `delta` and wraps into (-360, 360), keeping the sign of the result
    /// the way an integer remainder does.
    pub fn nudge(&mut self, joint: WristJoint, delta: f32) {
        let angle = self.angle_mut(joint);
        *angle = (*angle + delta) % FULL_TURN;
    }

    pub fn is_zero(&self, joint: WristJoint, tolerance: f32) -> bool {
        self.get(joint).abs() <= tolerance
    }
}

/// Arrow/page keys the viewer maps onto joint nudges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
}

impl KeyCommand {
    /// Joint and direction (+1 or -1) driven by the key.
    pub fn target(self) -> (WristJoint, f32) {
        match self {
            KeyCommand::Left => (WristJoint::Deviation, 1.0),
            KeyCommand::Right => (WristJoint::Deviation, -1.0),
            KeyCommand::Up => (WristJoint::Pronation, 1.0),
            KeyCommand::Down => (WristJoint::Pronation, -1.0),
            KeyCommand::PageUp => (WristJoint::Flexion, 1.0),
            KeyCommand::PageDown => (WristJoint::Flexion, -1.0),
        }
    }

    pub fn apply(self, pose: &mut WristPose, increment: f32) -> WristJoint {
        let (joint, sign) = self.target();
        pose.nudge(joint, sign * increment);
        joint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_drive_first_two_joints() {
        let mut pose = WristPose::ZERO;
        KeyCommand::Left.apply(&mut pose, 5.0);
        KeyCommand::Left.apply(&mut pose, 5.0);
        KeyCommand::Up.apply(&mut pose, 5.0);
        KeyCommand::Down.apply(&mut pose, 5.0);
        KeyCommand::Down.apply(&mut pose, 5.0);

        assert_eq!(pose.get(WristJoint::Deviation), 10.0);
        assert_eq!(pose.get(WristJoint::Pronation), -5.0);
        assert_eq!(pose.get(WristJoint::Flexion), 0.0);
    }

    #[test]
    fn test_page_keys_drive_flexion() {
        let mut pose = WristPose::ZERO;
        assert_eq!(KeyCommand::PageDown.apply(&mut pose, 5.0), WristJoint::Flexion);
        assert_eq!(pose.get(WristJoint::Flexion), -5.0);
    }

    #[test]
    fn test_nudge_wraps_keeping_sign() {
        let mut pose = WristPose::new(355.0, -355.0, 0.0);
        pose.nudge(WristJoint::Pronation, 5.0);
        pose.nudge(WristJoint::Deviation, -5.0);
        assert_eq!(pose.get(WristJoint::Pronation), 0.0);
        assert_eq!(pose.get(WristJoint::Deviation), 0.0);

        let mut pose = WristPose::new(0.0, 0.0, -350.0);
        pose.nudge(WristJoint::Flexion, -15.0);
        assert_eq!(pose.get(WristJoint::Flexion), -5.0);
    }

    #[test]
    fn test_set_and_get_are_per_joint() {
        let mut pose = WristPose::ZERO;
        pose.set(WristJoint::Flexion, 42.0);
        assert_eq!(pose.angles(), [0.0, 0.0, 42.0]);
        assert!(pose.is_zero(WristJoint::Pronation, 1e-3));
        assert!(!pose.is_zero(WristJoint::Flexion, 1e-3));
    }
}
