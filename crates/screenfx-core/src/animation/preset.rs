//! Named screen transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named bundle of target values and a duration, applied atomically to
/// the view parameters by [`AnimationState::apply`](super::AnimationState::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionPreset {
    /// Fly in from a distant eye position with the screen facing front
    Zoom,
    /// Turn the screen a quarter turn to the left
    Rotate,
    /// Turn the screen a quarter turn to the right
    RotateBack,
    /// Slide the screen in vertically
    Scroll,
    /// Fade to fully opaque
    BlendIn,
    /// Fade to fully transparent
    BlendOut,
    /// Jump the eye right in front of the screen
    SnapToFront,
}

impl TransitionPreset {
    pub const ALL: [TransitionPreset; 7] = [
        TransitionPreset::Zoom,
        TransitionPreset::Rotate,
        TransitionPreset::RotateBack,
        TransitionPreset::Scroll,
        TransitionPreset::BlendIn,
        TransitionPreset::BlendOut,
        TransitionPreset::SnapToFront,
    ];

    pub const NAMES: [&'static str; 7] = [
        "zoom",
        "rotate",
        "rotate-back",
        "scroll",
        "blend-in",
        "blend-out",
        "snap-to-front",
    ];

    /// Duration of the transition in frames (60 frames per second).
    pub fn steps(self) -> u32 {
        match self {
            TransitionPreset::Zoom => 120,
            TransitionPreset::Rotate => 60,
            TransitionPreset::RotateBack => 60,
            TransitionPreset::Scroll => 120,
            TransitionPreset::BlendIn => 10,
            TransitionPreset::BlendOut => 40,
            TransitionPreset::SnapToFront => 15,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TransitionPreset::Zoom => "zoom",
            TransitionPreset::Rotate => "rotate",
            TransitionPreset::RotateBack => "rotate-back",
            TransitionPreset::Scroll => "scroll",
            TransitionPreset::BlendIn => "blend-in",
            TransitionPreset::BlendOut => "blend-out",
            TransitionPreset::SnapToFront => "snap-to-front",
        }
    }
}

impl fmt::Display for TransitionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransitionPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}
