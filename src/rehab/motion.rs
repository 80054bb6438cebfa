use crate::config::RangeOfMotion;
use crate::wrist::WristJoint;

/// Canned rehab exercises. Each one exercises a single joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RehabMotion {
    FlexionExtension,
    SupinationPronation,
    RadialUlnar,
}

impl RehabMotion {
    pub const ALL: [RehabMotion; 3] = [
        RehabMotion::FlexionExtension,
        RehabMotion::SupinationPronation,
        RehabMotion::RadialUlnar,
    ];

    pub fn joint(self) -> WristJoint {
        match self {
            RehabMotion::FlexionExtension => WristJoint::Flexion,
            RehabMotion::SupinationPronation => WristJoint::Pronation,
            RehabMotion::RadialUlnar => WristJoint::Deviation,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RehabMotion::FlexionExtension => "Flexion / Extension",
            RehabMotion::SupinationPronation => "Supination / Pronation",
            RehabMotion::RadialUlnar => "Radial / Ulnar",
        }
    }

    /// Targets visited after the joint is at zero: out, back, the other way, back.
    pub fn waypoints(self, range: RangeOfMotion) -> [f32; 4] {
        [range.positive, 0.0, -range.negative, 0.0]
    }
}
