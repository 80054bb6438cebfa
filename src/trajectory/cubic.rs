use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("trajectory needs at least one step")]
    ZeroSteps,
    #[error("trajectory endpoint is not finite: {0}")]
    NonFinite(f32),
}

/// Cubic ease-in/ease-out ramp of one joint angle over `steps` discrete steps.
///
/// theta(t) = a0 + a2*t² + a3*t³ with zero velocity at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTrajectory {
    initial: f32,
    target: f32,
    steps: u32,
    a0: f32,
    a2: f32,
    a3: f32,
}

impl CubicTrajectory {
    pub fn new(initial: f32, target: f32, steps: u32) -> Result<Self, TrajectoryError> {
        if steps == 0 {
            return Err(TrajectoryError::ZeroSteps);
        }
        for value in [initial, target] {
            if !value.is_finite() {
                return Err(TrajectoryError::NonFinite(value));
            }
        }

        let tf = steps as f32;
        let delta = target - initial;

        Ok(Self {
            initial,
            target,
            steps,
            a0: initial,
            a2: 3.0 / (tf * tf) * delta,
            a3: -2.0 / (tf * tf * tf) * delta,
        })
    }

    pub fn initial(&self) -> f32 {
        self.initial
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn clamp_time(&self, t: f32) -> f32 {
        t.clamp(0.0, self.steps as f32)
    }

    pub fn angle_at(&self, t: f32) -> f32 {
        let t = self.clamp_time(t);
        let t2 = t * t;
        self.a0 + self.a2 * t2 + self.a3 * t2 * t
    }

    /// Degrees per step.
    pub fn velocity_at(&self, t: f32) -> f32 {
        let t = self.clamp_time(t);
        2.0 * self.a2 * t + 3.0 * self.a3 * t * t
    }

    /// Degrees per step squared.
    pub fn acceleration_at(&self, t: f32) -> f32 {
        let t = self.clamp_time(t);
        2.0 * self.a2 + 6.0 * self.a3 * t
    }

    /// The last step lands exactly on the target so repeated ramps never drift.
    pub fn sample(&self, step: u32) -> f32 {
        if step >= self.steps {
            self.target
        } else {
            self.angle_at(step as f32)
        }
    }

    pub fn samples(&self) -> Samples<'_> {
        Samples {
            trajectory: self,
            next: 0,
        }
    }

    /// Writes every sample into `angle` and hands control to `hook` after each write.
    pub fn drive<F>(&self, angle: &mut f32, mut hook: F)
    where
        F: FnMut(u32, f32),
    {
        for (step, value) in self.samples().enumerate() {
            *angle = value;
            log::trace!("step {}/{}: {:.3}", step, self.steps, value);
            hook(step as u32, *angle);
        }
    }
}

pub struct Samples<'a> {
    trajectory: &'a CubicTrajectory,
    next: u32,
}

impl Iterator for Samples<'_> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.next > self.trajectory.steps {
            return None;
        }
        let value = self.trajectory.sample(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.trajectory.steps + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let traj = CubicTrajectory::new(-30.0, 45.0, 50).unwrap();
        assert_eq!(traj.angle_at(0.0), -30.0);
        assert!((traj.angle_at(50.0) - 45.0).abs() < 1e-3);
        assert_eq!(traj.sample(50), 45.0);
    }

    #[test]
    fn test_rest_to_rest_velocity() {
        let traj = CubicTrajectory::new(0.0, 90.0, 40).unwrap();
        assert!(traj.velocity_at(0.0).abs() < 1e-4);
        assert!(traj.velocity_at(40.0).abs() < 1e-3);
        // Peak speed at the midpoint: 1.5 * delta / tf
        assert!((traj.velocity_at(20.0) - 1.5 * 90.0 / 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_acceleration_changes_sign_at_midpoint() {
        let traj = CubicTrajectory::new(0.0, 60.0, 30).unwrap();
        assert!(traj.acceleration_at(5.0) > 0.0);
        assert!(traj.acceleration_at(15.0).abs() < 1e-4);
        assert!(traj.acceleration_at(25.0) < 0.0);
    }

    #[test]
    fn test_monotone_without_overshoot() {
        let traj = CubicTrajectory::new(70.0, -20.0, 25).unwrap();
        let samples: Vec<f32> = traj.samples().collect();
        for pair in samples.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(samples.iter().all(|a| (-20.0..=70.0).contains(a)));
    }

    #[test]
    fn test_samples_count_includes_both_ends() {
        let traj = CubicTrajectory::new(0.0, 10.0, 12).unwrap();
        assert_eq!(traj.samples().len(), 13);
        assert_eq!(traj.samples().count(), 13);
    }

    #[test]
    fn test_constant_when_endpoints_match() {
        let traj = CubicTrajectory::new(15.0, 15.0, 8).unwrap();
        assert!(traj.samples().all(|a| a == 15.0));
    }

    #[test]
    fn test_time_is_clamped() {
        let traj = CubicTrajectory::new(0.0, 10.0, 10).unwrap();
        assert_eq!(traj.angle_at(-3.0), 0.0);
        assert!((traj.angle_at(99.0) - 10.0).abs() < 1e-4);
        assert_eq!(traj.sample(99), 10.0);
    }

    #[test]
    fn test_rejects_zero_steps_and_nan() {
        assert_eq!(CubicTrajectory::new(0.0, 1.0, 0), Err(TrajectoryError::ZeroSteps));
        assert!(matches!(
            CubicTrajectory::new(f32::NAN, 1.0, 5),
            Err(TrajectoryError::NonFinite(_))
        ));
        assert!(matches!(
            CubicTrajectory::new(0.0, f32::INFINITY, 5),
            Err(TrajectoryError::NonFinite(_))
        ));
    }

    #[test]
    fn test_drive_writes_before_each_hook_call() {
        let traj = CubicTrajectory::new(0.0, 30.0, 6).unwrap();
        let mut angle = 99.0;
        let mut seen = Vec::new();
        traj.drive(&mut angle, |step, value| seen.push((step, value)));

        assert_eq!(seen.len(), 7);
        assert_eq!(seen[0], (0, 0.0));
        assert_eq!(seen[6], (6, 30.0));
        assert_eq!(angle, 30.0);
    }
}
