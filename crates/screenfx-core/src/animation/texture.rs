//! Animated crop rectangle for zooming into the display texture.

use serde::{Deserialize, Serialize};

use super::parameter::AnimatedParameter;

/// Default duration of a texture zoom in frames
pub const TEXTURE_ZOOM_STEPS: u32 = 60;

/// Rectangle in normalized texture coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    /// The whole texture.
    pub const FULL_FRAME: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Visible display area without the right/bottom border of a PAL frame.
    pub const ZOOMED_IN: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 728.0 / 768.0,
        height: 286.0 / 288.0,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// As `[x, y, width, height]` (for GPU uniforms).
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::FULL_FRAME
    }
}

/// Crop rectangle whose four edges animate independently with the same
/// advance-and-snap stepping as the view parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureCrop {
    origin_x: AnimatedParameter,
    origin_y: AnimatedParameter,
    width: AnimatedParameter,
    height: AnimatedParameter,
}

impl Default for TextureCrop {
    fn default() -> Self {
        Self::new(CropRect::FULL_FRAME)
    }
}

impl TextureCrop {
    pub fn new(rect: CropRect) -> Self {
        Self {
            origin_x: AnimatedParameter::new(rect.x),
            origin_y: AnimatedParameter::new(rect.y),
            width: AnimatedParameter::new(rect.width),
            height: AnimatedParameter::new(rect.height),
        }
    }

    /// Animate toward `rect` over `steps` frames.
    pub fn animate_to(&mut self, rect: CropRect, steps: u32) {
        self.origin_x.set_target(rect.x, steps);
        self.origin_y.set_target(rect.y, steps);
        self.width.set_target(rect.width, steps);
        self.height.set_target(rect.height, steps);
    }

    /// Crop away the frame border.
    pub fn zoom_in(&mut self, steps: u32) {
        log::debug!("Zooming texture in ({} frames)", steps);
        self.animate_to(CropRect::ZOOMED_IN, steps);
    }

    /// Show the full texture again.
    pub fn zoom_out(&mut self, steps: u32) {
        log::debug!("Zooming texture out ({} frames)", steps);
        self.animate_to(CropRect::FULL_FRAME, steps);
    }

    pub fn advance(&mut self) {
        self.origin_x.advance();
        self.origin_y.advance();
        self.width.advance();
        self.height.advance();
    }

    pub fn is_animating(&self) -> bool {
        self.origin_x.is_animating()
            || self.origin_y.is_animating()
            || self.width.is_animating()
            || self.height.is_animating()
    }

    /// Current crop rectangle.
    pub fn rect(&self) -> CropRect {
        CropRect {
            x: self.origin_x.current(),
            y: self.origin_y.current(),
            width: self.width.current(),
            height: self.height.current(),
        }
    }

    /// Rectangle the crop is heading toward.
    pub fn target(&self) -> CropRect {
        CropRect {
            x: self.origin_x.target(),
            y: self.origin_y.target(),
            width: self.width.target(),
            height: self.height.target(),
        }
    }
}
