//! Runs a rehab motion headless and prints one CSV row per trajectory step.

use clap::{Parser, ValueEnum};
use wrist_exo::{ExoConfig, RangeOfMotion, RehabMotion, RehabSequence, WristJoint, WristPose};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MotionArg {
    FlexionExtension,
    SupinationPronation,
    RadialUlnar,
    Home,
}

/// Trace a wrist rehab sequence step by step
#[derive(Parser, Debug)]
#[command(name = "rehab-trace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Motion to run
    #[arg(value_enum)]
    motion: MotionArg,

    /// Steps in each cubic ramp
    #[arg(short, long, default_value = "60")]
    steps: u32,

    /// Starting pronation/supination angle (degrees)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pronation: f32,

    /// Starting radial/ulnar angle (degrees)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    deviation: f32,

    /// Starting flexion/extension angle (degrees)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    flexion: f32,

    /// Override the positive excursion of the motion (degrees)
    #[arg(long)]
    positive: Option<f32>,

    /// Override the negative excursion of the motion (degrees)
    #[arg(long)]
    negative: Option<f32>,

    /// Also print velocity and acceleration (degrees per step)
    #[arg(long)]
    derivatives: bool,
}

impl MotionArg {
    fn motion(self) -> Option<RehabMotion> {
        match self {
            MotionArg::FlexionExtension => Some(RehabMotion::FlexionExtension),
            MotionArg::SupinationPronation => Some(RehabMotion::SupinationPronation),
            MotionArg::RadialUlnar => Some(RehabMotion::RadialUlnar),
            MotionArg::Home => None,
        }
    }
}

fn build_config(cli: &Cli) -> ExoConfig {
    let mut builder = ExoConfig::builder().steps_per_segment(cli.steps);
    if let Some(motion) = cli.motion.motion() {
        let defaults = ExoConfig::default().range_of(motion);
        let range = RangeOfMotion::new(
            cli.positive.unwrap_or(defaults.positive),
            cli.negative.unwrap_or(defaults.negative),
        );
        builder = builder.range_of_motion(motion, range);
    }
    builder.build()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let mut pose = WristPose::new(cli.pronation, cli.deviation, cli.flexion);

    let sequence = match cli.motion.motion() {
        Some(motion) => RehabSequence::plan(motion, &pose, &config)?,
        None => RehabSequence::home(&pose, &config)?,
    };
    log::info!(
        "{} segments, {} rows",
        sequence.len(),
        sequence.total_steps()
    );

    if cli.derivatives {
        println!("segment,joint,step,pronation,deviation,flexion,velocity,acceleration");
    } else {
        println!("segment,joint,step,pronation,deviation,flexion");
    }

    let segments = sequence.segments();
    sequence.run_traced(&mut pose, |event, pose| {
        let [p, d, f] = pose.angles();
        let joint = match event.joint {
            WristJoint::Pronation => "pronation",
            WristJoint::Deviation => "deviation",
            WristJoint::Flexion => "flexion",
        };
        if cli.derivatives {
            let trajectory = &segments[event.segment].trajectory;
            let t = event.step as f32;
            println!(
                "{},{},{},{:.4},{:.4},{:.4},{:.4},{:.4}",
                event.segment,
                joint,
                event.step,
                p,
                d,
                f,
                trajectory.velocity_at(t),
                trajectory.acceleration_at(t)
            );
        } else {
            println!(
                "{},{},{},{:.4},{:.4},{:.4}",
                event.segment, joint, event.step, p, d, f
            );
        }
    });

    Ok(())
}
