use wrist_exo::{
    CubicTrajectory, ExoConfig, KeyCommand, RehabMotion, RehabPlayer, RehabSequence, WristJoint,
    WristModel, WristPose,
};

const FRAME: f32 = 1.0 / 60.0;

fn play_to_end(player: &mut RehabPlayer, pose: &mut WristPose) -> usize {
    let mut frames = 0;
    while player.advance(pose, FRAME) {
        frames += 1;
        assert!(frames < 100_000, "playback never finished");
    }
    frames
}

#[test]
fn keyboard_offset_then_rehab_returns_joint_to_rest() {
    let config = ExoConfig::builder().steps_per_segment(20).step_rate(120.0).build();
    let mut pose = WristPose::ZERO;
    for _ in 0..3 {
        KeyCommand::Up.apply(&mut pose, config.key_increment());
    }
    KeyCommand::Left.apply(&mut pose, config.key_increment());
    assert_eq!(pose.get(WristJoint::Pronation), 15.0);

    let sequence = RehabSequence::plan(RehabMotion::SupinationPronation, &pose, &config).unwrap();
    assert_eq!(sequence.len(), 5);

    let mut player = RehabPlayer::new("supination", sequence, config.step_rate());
    play_to_end(&mut player, &mut pose);

    assert_eq!(pose.get(WristJoint::Pronation), 0.0);
    // Only one angle is driven; the deviation offset stays put.
    assert_eq!(pose.get(WristJoint::Deviation), 5.0);
}

#[test]
fn frame_playback_and_blocking_run_agree_on_extremes() {
    let config = ExoConfig::default();
    let start = WristPose::new(0.0, 0.0, -10.0);
    let sequence = RehabSequence::plan(RehabMotion::FlexionExtension, &start, &config).unwrap();

    let mut blocking_pose = start;
    let mut blocking_max = f32::MIN;
    let mut blocking_min = f32::MAX;
    sequence.run(&mut blocking_pose, |pose| {
        let angle = pose.get(WristJoint::Flexion);
        blocking_max = blocking_max.max(angle);
        blocking_min = blocking_min.min(angle);
    });

    let mut frame_pose = start;
    let mut frame_max = f32::MIN;
    let mut frame_min = f32::MAX;
    let mut player = RehabPlayer::new("flexion", sequence.clone(), config.step_rate());
    while player.advance(&mut frame_pose, FRAME) {
        let angle = frame_pose.get(WristJoint::Flexion);
        frame_max = frame_max.max(angle);
        frame_min = frame_min.min(angle);
    }

    assert_eq!(blocking_max, 60.0);
    assert_eq!(blocking_min, -60.0);
    assert_eq!(frame_max, blocking_max);
    assert_eq!(frame_min, blocking_min);
    assert_eq!(frame_pose, blocking_pose);
}

#[test]
fn home_sequence_clears_every_joint() {
    let config = ExoConfig::builder().steps_per_segment(12).build();
    let mut pose = WristPose::new(-45.0, 20.0, 70.0);
    let sequence = RehabSequence::home(&pose, &config).unwrap();

    let mut moving = Vec::new();
    let mut previous = pose;
    sequence.run(&mut pose, |now| {
        let changed: Vec<WristJoint> = WristJoint::ALL
            .into_iter()
            .filter(|&j| now.get(j) != previous.get(j))
            .collect();
        assert!(changed.len() <= 1, "more than one joint moved in a step");
        moving.extend(changed);
        previous = *now;
    });

    assert_eq!(pose, WristPose::ZERO);
    moving.dedup();
    assert_eq!(
        moving,
        vec![WristJoint::Pronation, WristJoint::Deviation, WristJoint::Flexion]
    );
}

#[test]
fn driven_angle_feeds_the_model_each_step() {
    let model = WristModel::default();
    let trajectory = CubicTrajectory::new(0.0, 90.0, 30).unwrap();
    let mut pose = WristPose::ZERO;
    let mut tip_heights = Vec::new();

    let mut angle = pose.get(WristJoint::Flexion);
    trajectory.drive(&mut angle, |_, value| {
        pose.set(WristJoint::Flexion, value);
        tip_heights.push(model.frames(&pose).links[2].center().y);
    });

    assert_eq!(tip_heights.len(), 31);
    assert!((tip_heights[0] - 1.0).abs() < 1e-4);
    assert!((tip_heights[30] - 2.0).abs() < 1e-4);
    assert!(tip_heights.windows(2).all(|w| w[1] >= w[0] - 1e-5));
}
