use super::cubic::CubicTrajectory;

/// Steps through a [`CubicTrajectory`] at a fixed rate from inside a frame loop.
///
/// The first call to [`advance`](Self::advance) emits step 0; later calls emit
/// the newest step that has come due. Steps that fall between two frames are
/// skipped, the final step never is.
#[derive(Debug, Clone)]
pub struct TrajectoryPlayer {
    trajectory: CubicTrajectory,
    step_rate: f32,
    accumulator: f32,
    next_step: u32,
}

impl TrajectoryPlayer {
    pub fn new(trajectory: CubicTrajectory, step_rate: f32) -> Self {
        Self {
            trajectory,
            step_rate: step_rate.max(f32::EPSILON),
            accumulator: 0.0,
            next_step: 0,
        }
    }

    pub fn trajectory(&self) -> &CubicTrajectory {
        &self.trajectory
    }

    pub fn set_step_rate(&mut self, step_rate: f32) {
        self.step_rate = step_rate.max(f32::EPSILON);
    }

    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.is_finished() {
            return None;
        }

        if self.next_step == 0 {
            self.next_step = 1;
            return Some(self.trajectory.sample(0));
        }

        if dt <= 0.0 {
            return None;
        }

        self.accumulator += dt * self.step_rate;
        let due = self.accumulator.floor();
        if due < 1.0 {
            return None;
        }
        self.accumulator -= due;

        let last = self.trajectory.steps();
        let due = due.min(last as f32 + 1.0) as u32;
        let step = (self.next_step + due - 1).min(last);
        self.next_step = step + 1;
        Some(self.trajectory.sample(step))
    }

    pub fn is_finished(&self) -> bool {
        self.next_step > self.trajectory.steps()
    }

    /// Fraction of steps emitted so far, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let total = self.trajectory.steps() + 1;
        self.next_step.min(total) as f32 / total as f32
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.next_step = 0;
    }
}
