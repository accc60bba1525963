//! Animated camera/view state of the display surface.

use super::parameter::AnimatedParameter;
use super::preset::TransitionPreset;

/// Eye distance the zoom transition places the viewer at
pub const ZOOM_EYE_Z: f32 = 6.0;
/// Vertical eye offset the scroll transition starts from
pub const SCROLL_EYE_Y: f32 = -1.5;
/// Eye distance for the snap-to-front transition
pub const SNAP_EYE_Z: f32 = -0.05;

/// All animated view parameters of the render surface.
///
/// Owned by the surface and advanced once per displayed frame. Rotation
/// angles are in degrees; the eye position is in view units; `alpha` is the
/// display opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub pitch: AnimatedParameter,
    pub yaw: AnimatedParameter,
    pub roll: AnimatedParameter,
    pub eye_x: AnimatedParameter,
    pub eye_y: AnimatedParameter,
    pub eye_z: AnimatedParameter,
    pub alpha: AnimatedParameter,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            pitch: AnimatedParameter::angle(0.0),
            yaw: AnimatedParameter::angle(0.0),
            roll: AnimatedParameter::angle(0.0),
            eye_x: AnimatedParameter::new(0.0),
            eye_y: AnimatedParameter::new(0.0),
            eye_z: AnimatedParameter::new(0.0),
            alpha: AnimatedParameter::new(1.0),
        }
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    fn parameters_mut(&mut self) -> [&mut AnimatedParameter; 7] {
        [
            &mut self.pitch,
            &mut self.yaw,
            &mut self.roll,
            &mut self.eye_x,
            &mut self.eye_y,
            &mut self.eye_z,
            &mut self.alpha,
        ]
    }

    fn parameters(&self) -> [&AnimatedParameter; 7] {
        [
            &self.pitch,
            &self.yaw,
            &self.roll,
            &self.eye_x,
            &self.eye_y,
            &self.eye_z,
            &self.alpha,
        ]
    }

    /// Start a transition.
    ///
    /// Touched parameters get their new targets, then every parameter is
    /// retimed to the preset's duration. A transition already in flight is
    /// overwritten.
    pub fn apply(&mut self, preset: TransitionPreset) {
        let steps = preset.steps();
        log::debug!("Applying {} transition ({} frames)", preset, steps);

        match preset {
            TransitionPreset::Zoom => {
                self.eye_z.set_immediate(ZOOM_EYE_Z);
                self.face_front(steps);
            }
            TransitionPreset::Rotate => {
                self.level(steps);
                self.yaw.set_target(self.yaw.target() - 90.0, steps);
            }
            TransitionPreset::RotateBack => {
                self.level(steps);
                self.yaw.set_target(self.yaw.target() + 90.0, steps);
            }
            TransitionPreset::Scroll => {
                self.eye_y.set_immediate(SCROLL_EYE_Y);
                self.face_front(steps);
            }
            TransitionPreset::BlendIn => {
                self.face_front(steps);
                self.alpha.set_target(1.0, steps);
            }
            TransitionPreset::BlendOut => {
                self.face_front(steps);
                self.alpha.set_target(0.0, steps);
            }
            TransitionPreset::SnapToFront => {
                self.eye_z.set_immediate(SNAP_EYE_Z);
            }
        }

        for param in self.parameters_mut() {
            param.retime(steps);
        }

        if matches!(preset, TransitionPreset::Rotate | TransitionPreset::RotateBack) {
            self.yaw.wrap_target();
        }
    }

    /// Pitch and roll back to zero, yaw untouched.
    fn level(&mut self, steps: u32) {
        self.pitch.set_target(0.0, steps);
        self.roll.set_target(0.0, steps);
    }

    /// All rotation angles back to zero.
    fn face_front(&mut self, steps: u32) {
        self.level(steps);
        self.yaw.set_target(0.0, steps);
    }

    /// Advance every parameter by one frame.
    pub fn advance(&mut self) {
        for param in self.parameters_mut() {
            param.advance();
        }
    }

    /// Check if any parameter is still moving.
    pub fn is_animating(&self) -> bool {
        self.parameters().iter().any(|param| param.is_animating())
    }

    pub fn eye_x(&self) -> f32 {
        self.eye_x.current()
    }

    pub fn eye_y(&self) -> f32 {
        self.eye_y.current()
    }

    pub fn eye_z(&self) -> f32 {
        self.eye_z.current()
    }

    /// Move the eye horizontally without animation.
    pub fn set_eye_x(&mut self, x: f32) {
        self.eye_x.set_immediate(x);
    }

    /// Move the eye vertically without animation.
    pub fn set_eye_y(&mut self, y: f32) {
        self.eye_y.set_immediate(y);
    }

    /// Move the eye along the view axis without animation.
    pub fn set_eye_z(&mut self, z: f32) {
        self.eye_z.set_immediate(z);
    }
}
