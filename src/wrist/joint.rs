use glam::Vec3;

/// The three simulated degrees of freedom, in kinematic order from the forearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WristJoint {
    /// theta1: pronation/supination about X, at the brace diameter.
    Pronation,
    /// theta2: radial/ulnar deviation about Y.
    Deviation,
    /// theta3: flexion/extension about Z.
    Flexion,
}

impl WristJoint {
    pub const ALL: [WristJoint; 3] = [
        WristJoint::Pronation,
        WristJoint::Deviation,
        WristJoint::Flexion,
    ];

    pub fn index(self) -> usize {
        match self {
            WristJoint::Pronation => 0,
            WristJoint::Deviation => 1,
            WristJoint::Flexion => 2,
        }
    }

    pub fn axis(self) -> Vec3 {
        match self {
            WristJoint::Pronation => Vec3::X,
            WristJoint::Deviation => Vec3::Y,
            WristJoint::Flexion => Vec3::Z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WristJoint::Pronation => "Pronation / Supination",
            WristJoint::Deviation => "Radial / Ulnar",
            WristJoint::Flexion => "Flexion / Extension",
        }
    }
}
