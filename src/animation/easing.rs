/// Displayed progress that trails the reported value by a bounded step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressEasing {
    current: f64,
    target: f64,
    step: f64,
}

impl ProgressEasing {
    pub const DEFAULT_STEP: f64 = 0.02;

    pub fn new(step: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            step: step.abs(),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Clamp into `[0, 1]`; non-finite input is ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target.clamp(0.0, 1.0);
        }
    }

    /// Move `current` toward `target` by at most one step, snapping when
    /// closer than a step so it never overshoots.
    pub fn step(&mut self) -> f64 {
        let diff = self.target - self.current;
        if diff.abs() < self.step {
            self.current = self.target;
        } else {
            self.current += self.step.copysign(diff);
        }
        self.current
    }
}

impl Default for ProgressEasing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/easing.rs"]
mod tests;
