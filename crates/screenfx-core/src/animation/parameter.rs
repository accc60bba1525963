//! Frame-stepped linear interpolation of a single scalar.

/// Value domain of an animated parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueRange {
    /// Plain scalar, no normalization
    #[default]
    Linear,
    /// Angle in degrees, single-wrapped into [0, 360) after every step
    Degrees,
}

/// Bring an angle back into [0, 360) with one conditional add or subtract.
///
/// This is a single wrap, not a modulo: inputs are expected to be at most one
/// turn outside the range, which holds as long as callers adjust angles by
/// less than 360 degrees at a time.
pub fn wrap_degrees(angle: f32) -> f32 {
    let angle = if angle >= 360.0 { angle - 360.0 } else { angle };
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// A scalar that moves toward its target by a fixed increment per frame.
///
/// The increment is `(target - current) / steps` and is recomputed whenever
/// the target or the step count changes. The final scheduled step always
/// lands exactly on the target, and a step that would cross the target snaps
/// onto it instead.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedParameter {
    current: f32,
    target: f32,
    increment: f32,
    /// Step count of the current animation
    steps: u32,
    /// Advances left until the target is reached
    remaining: u32,
    range: ValueRange,
}

impl AnimatedParameter {
    /// Create a parameter resting at `initial`.
    pub fn new(initial: f32) -> Self {
        Self::with_range(initial, ValueRange::Linear)
    }

    /// Create an angle parameter (degrees) resting at `initial`.
    pub fn angle(initial: f32) -> Self {
        Self::with_range(wrap_degrees(initial), ValueRange::Degrees)
    }

    fn with_range(initial: f32, range: ValueRange) -> Self {
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            steps: 1,
            remaining: 0,
            range,
        }
    }

    /// Start moving toward `target` over `steps` frames.
    ///
    /// A step count of zero applies the target immediately.
    pub fn set_target(&mut self, target: f32, steps: u32) {
        self.target = target;
        self.retime(steps);
    }

    /// Recompute the increment toward the existing target using a new step
    /// count. Overwrites any animation in flight.
    pub fn retime(&mut self, steps: u32) {
        self.steps = steps;

        if steps == 0 {
            self.current = self.target;
            self.increment = 0.0;
            self.remaining = 0;
            return;
        }

        self.increment = (self.target - self.current) / steps as f32;
        self.remaining = if self.current != self.target { steps } else { 0 };
    }

    /// Set the value immediately without animation.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.remaining = 0;
    }

    /// Single-wrap the target into [0, 360).
    ///
    /// The increment is left as computed from the unwrapped target, so the
    /// current value travels the short way and wraps on its own.
    pub fn wrap_target(&mut self) {
        self.target = wrap_degrees(self.target);
    }

    /// Advance one frame.
    pub fn advance(&mut self) {
        if self.current == self.target {
            self.remaining = 0;
            return;
        }

        if self.remaining <= 1 || (self.current - self.target).abs() < self.increment.abs() {
            self.current = self.target;
        } else {
            self.current += self.increment;
            if self.range == ValueRange::Degrees {
                self.current = wrap_degrees(self.current);
            }
        }

        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Check if the parameter has not yet reached its target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }

    /// Get the current value.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Get the per-frame increment.
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Get the step count of the most recent retargeting.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Get the number of advances left in the current animation.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }
}

impl Default for AnimatedParameter {
    fn default() -> Self {
        Self::new(0.0)
    }
}
