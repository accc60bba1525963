//! View animation for screen transitions.
//!
//! Provides `AnimatedParameter` for frame-stepped linear interpolation,
//! `AnimationState` bundling the camera/view parameters, the named
//! `TransitionPreset`s that retarget them, and `TextureCrop` for zooming
//! into the display texture.

mod parameter;
mod preset;
mod state;
mod texture;

pub use parameter::{wrap_degrees, AnimatedParameter, ValueRange};
pub use preset::TransitionPreset;
pub use state::{AnimationState, SCROLL_EYE_Y, SNAP_EYE_Z, ZOOM_EYE_Z};
pub use texture::{CropRect, TextureCrop, TEXTURE_ZOOM_STEPS};
