use super::joint::WristJoint;
use super::pose::WristPose;
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    ForearmCuff,
    DeviationLink,
    FlexionLink,
    BraceTop,
    BraceBottom,
    BraceSide,
}

impl LinkKind {
    /// The joint whose rotation the part rides on directly.
    pub fn driven_by(self) -> WristJoint {
        match self {
            LinkKind::ForearmCuff => WristJoint::Pronation,
            LinkKind::DeviationLink => WristJoint::Deviation,
            LinkKind::FlexionLink
            | LinkKind::BraceTop
            | LinkKind::BraceBottom
            | LinkKind::BraceSide => WristJoint::Flexion,
        }
    }

    pub fn is_brace(self) -> bool {
        matches!(
            self,
            LinkKind::BraceTop | LinkKind::BraceBottom | LinkKind::BraceSide
        )
    }
}

/// A box-shaped part of the exoskeleton: its frame (centre and orientation)
/// and its full extents along the local axes.
#[derive(Debug, Clone, Copy)]
pub struct LinkBox {
    pub kind: LinkKind,
    pub frame: Mat4,
    pub size: Vec3,
}

impl LinkBox {
    pub fn center(&self) -> Vec3 {
        self.frame.transform_point3(Vec3::ZERO)
    }

    /// Frame scaled to the box extents, for drawing a unit cube.
    pub fn model_matrix(&self) -> Mat4 {
        self.frame * Mat4::from_scale(self.size)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JointPivot {
    pub joint: WristJoint,
    pub position: Vec3,
    pub axis: Vec3,
}

/// Frames of all parts for a pose.
#[derive(Debug, Clone)]
pub struct WristFrames {
    pub links: Vec<LinkBox>,
    pub pivots: [JointPivot; 3],
}

/// Dimensions of the wireframe exoskeleton. Each link is `link_length` long
/// and hinges at its far end.
#[derive(Debug, Clone, Copy)]
pub struct WristModel {
    pub link_length: f32,
    pub link_size: Vec3,
    pub cuff_offset: f32,
    pub brace_plate: Vec3,
    pub brace_side: Vec3,
    pub brace_gap: f32,
}

impl Default for WristModel {
    fn default() -> Self {
        Self {
            link_length: 2.0,
            link_size: Vec3::new(2.0, 0.4, 1.0),
            cuff_offset: 1.0,
            brace_plate: Vec3::new(2.0, 0.4, 4.0),
            brace_side: Vec3::new(2.0, 2.4, 0.4),
            brace_gap: 2.0,
        }
    }
}

impl WristModel {
    pub fn frames(&self, pose: &WristPose) -> WristFrames {
        let half = self.link_length * 0.5;
        let mut links = Vec::with_capacity(6);
        let mut pivots = Vec::with_capacity(3);

        let rotation = |joint: WristJoint| {
            Mat4::from_axis_angle(joint.axis(), pose.get(joint).to_radians())
        };

        let mut m = Mat4::IDENTITY;
        pivots.push(self.pivot(WristJoint::Pronation, m));
        m *= rotation(WristJoint::Pronation);
        m *= Mat4::from_translation(Vec3::new(half, self.cuff_offset, 0.0));
        links.push(self.link(LinkKind::ForearmCuff, m, self.link_size));

        m *= Mat4::from_translation(Vec3::new(half, 0.0, 0.0));
        pivots.push(self.pivot(WristJoint::Deviation, m));
        m *= rotation(WristJoint::Deviation);
        m *= Mat4::from_translation(Vec3::new(half, 0.0, 0.0));
        links.push(self.link(LinkKind::DeviationLink, m, self.link_size));

        m *= Mat4::from_translation(Vec3::new(half, 0.0, 0.0));
        pivots.push(self.pivot(WristJoint::Flexion, m));
        m *= rotation(WristJoint::Flexion);
        m *= Mat4::from_translation(Vec3::new(half, 0.0, 0.0));
        links.push(self.link(LinkKind::FlexionLink, m, self.link_size));

        // Hand brace hangs off the last link: top plate, bottom plate, side wall.
        let plate_drop = self.link_size.y;
        m *= Mat4::from_translation(Vec3::new(0.0, -plate_drop, 0.0));
        links.push(self.link(LinkKind::BraceTop, m, self.brace_plate));

        m *= Mat4::from_translation(Vec3::new(0.0, -self.brace_gap, 0.0));
        links.push(self.link(LinkKind::BraceBottom, m, self.brace_plate));

        let side_rise = (self.brace_side.y + plate_drop - self.brace_plate.y) * 0.5;
        m *= Mat4::from_translation(Vec3::new(0.0, side_rise, -self.brace_plate.z * 0.5));
        links.push(self.link(LinkKind::BraceSide, m, self.brace_side));

        WristFrames {
            links,
            pivots: [pivots[0], pivots[1], pivots[2]],
        }
    }

    fn link(&self, kind: LinkKind, frame: Mat4, size: Vec3) -> LinkBox {
        LinkBox { kind, frame, size }
    }

    fn pivot(&self, joint: WristJoint, frame: Mat4) -> JointPivot {
        JointPivot {
            joint,
            position: frame.transform_point3(Vec3::ZERO),
            axis: frame.transform_vector3(joint.axis()).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_rest_pose_layout() {
        let frames = WristModel::default().frames(&WristPose::ZERO);
        let centers: Vec<Vec3> = frames.links.iter().map(|l| l.center()).collect();

        assert!(close(centers[0], Vec3::new(1.0, 1.0, 0.0)));
        assert!(close(centers[1], Vec3::new(3.0, 1.0, 0.0)));
        assert!(close(centers[2], Vec3::new(5.0, 1.0, 0.0)));
        assert!(close(centers[3], Vec3::new(5.0, 0.6, 0.0)));
        assert!(close(centers[4], Vec3::new(5.0, -1.4, 0.0)));
        assert!(close(centers[5], Vec3::new(5.0, -0.2, -2.0)));

        assert!(close(frames.pivots[0].position, Vec3::ZERO));
        assert!(close(frames.pivots[1].position, Vec3::new(2.0, 1.0, 0.0)));
        assert!(close(frames.pivots[2].position, Vec3::new(4.0, 1.0, 0.0)));
    }

    #[test]
    fn test_pronation_rotates_whole_chain_about_x() {
        let pose = WristPose::new(90.0, 0.0, 0.0);
        let frames = WristModel::default().frames(&pose);
        assert!(close(frames.links[0].center(), Vec3::new(1.0, 0.0, 1.0)));
        assert!(close(frames.pivots[2].position, Vec3::new(4.0, 0.0, 1.0)));
    }

    #[test]
    fn test_deviation_swings_distal_links_about_y() {
        let pose = WristPose::new(0.0, 90.0, 0.0);
        let frames = WristModel::default().frames(&pose);
        assert!(close(frames.links[0].center(), Vec3::new(1.0, 1.0, 0.0)));
        assert!(close(frames.links[1].center(), Vec3::new(2.0, 1.0, -1.0)));
        assert!(close(frames.pivots[2].position, Vec3::new(2.0, 1.0, -2.0)));
    }

    #[test]
    fn test_flexion_only_moves_hand_side() {
        let pose = WristPose::new(0.0, 0.0, 90.0);
        let frames = WristModel::default().frames(&pose);
        assert!(close(frames.links[1].center(), Vec3::new(3.0, 1.0, 0.0)));
        assert!(close(frames.links[2].center(), Vec3::new(4.0, 2.0, 0.0)));
        assert!(close(frames.pivots[2].axis, Vec3::Z));
    }

    #[test]
    fn test_model_matrix_scales_unit_cube() {
        let frames = WristModel::default().frames(&WristPose::ZERO);
        let corner = frames.links[0].model_matrix().transform_point3(Vec3::splat(0.5));
        assert!(close(corner, Vec3::new(2.0, 1.2, 0.5)));
    }
}
