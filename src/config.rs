use crate::rehab::RehabMotion;

/// Excursion on either side of zero, in degrees. Both values are magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOfMotion {
    pub positive: f32,
    pub negative: f32,
}

impl RangeOfMotion {
    pub fn new(positive: f32, negative: f32) -> Self {
        Self {
            positive: positive.abs(),
            negative: negative.abs(),
        }
    }

    pub fn symmetric(amplitude: f32) -> Self {
        Self::new(amplitude, amplitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExoConfig {
    pub(crate) steps_per_segment: u32,
    pub(crate) step_rate: f32,
    pub(crate) key_increment: f32,
    pub(crate) flexion_extension: RangeOfMotion,
    pub(crate) supination_pronation: RangeOfMotion,
    pub(crate) radial_ulnar: RangeOfMotion,
}

impl Default for ExoConfig {
    fn default() -> Self {
        ExoConfigBuilder::new().build()
    }
}

impl ExoConfig {
    pub fn builder() -> ExoConfigBuilder {
        ExoConfigBuilder::new()
    }

    /// Number of discrete steps (tf) in each cubic ramp.
    pub fn steps_per_segment(&self) -> u32 {
        self.steps_per_segment
    }

    /// Playback speed in steps per second.
    pub fn step_rate(&self) -> f32 {
        self.step_rate
    }

    pub fn key_increment(&self) -> f32 {
        self.key_increment
    }

    pub fn range_of(&self, motion: RehabMotion) -> RangeOfMotion {
        match motion {
            RehabMotion::FlexionExtension => self.flexion_extension,
            RehabMotion::SupinationPronation => self.supination_pronation,
            RehabMotion::RadialUlnar => self.radial_ulnar,
        }
    }

    pub fn set_steps_per_segment(&mut self, steps: u32) {
        self.steps_per_segment = steps.max(1);
    }

    pub fn set_step_rate(&mut self, rate: f32) {
        self.step_rate = rate.max(1.0);
    }
}

pub struct ExoConfigBuilder {
    steps_per_segment: u32,
    step_rate: f32,
    key_increment: f32,
    flexion_extension: RangeOfMotion,
    supination_pronation: RangeOfMotion,
    radial_ulnar: RangeOfMotion,
}

impl ExoConfigBuilder {
    pub fn new() -> Self {
        Self {
            steps_per_segment: 60,
            step_rate: 60.0,
            key_increment: 5.0,
            flexion_extension: RangeOfMotion::new(60.0, 60.0),
            supination_pronation: RangeOfMotion::new(80.0, 75.0),
            radial_ulnar: RangeOfMotion::new(20.0, 30.0),
        }
    }

    pub fn steps_per_segment(mut self, steps: u32) -> Self {
        self.steps_per_segment = steps.max(1);
        self
    }

    pub fn step_rate(mut self, rate: f32) -> Self {
        self.step_rate = rate.max(1.0);
        self
    }

    pub fn key_increment(mut self, degrees: f32) -> Self {
        self.key_increment = degrees;
        self
    }

    pub fn range_of_motion(mut self, motion: RehabMotion, range: RangeOfMotion) -> Self {
        match motion {
            RehabMotion::FlexionExtension => self.flexion_extension = range,
            RehabMotion::SupinationPronation => self.supination_pronation = range,
            RehabMotion::RadialUlnar => self.radial_ulnar = range,
        }
        self
    }

    pub fn build(self) -> ExoConfig {
        ExoConfig {
            steps_per_segment: self.steps_per_segment,
            step_rate: self.step_rate,
            key_increment: self.key_increment,
            flexion_extension: self.flexion_extension,
            supination_pronation: self.supination_pronation,
            radial_ulnar: self.radial_ulnar,
        }
    }
}

impl Default for ExoConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
