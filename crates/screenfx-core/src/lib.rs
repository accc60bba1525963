//! # screenfx-core - Screen transition animation
//!
//! Frame-stepped animation of the view parameters that place the emulator
//! display in 3D space (rotation, eye position, opacity, texture crop), the
//! named transition presets that retarget them, and the matrix builders the
//! render surface feeds with the animated values.
//!
//! Nothing in here touches a GPU: the crate is pure numeric stepping and can
//! be driven headless.

pub mod animation;
pub mod error;
pub mod math;

pub use animation::{
    AnimatedParameter, AnimationState, CropRect, TextureCrop, TransitionPreset, ValueRange,
    SCROLL_EYE_Y, SNAP_EYE_Z, TEXTURE_ZOOM_STEPS, ZOOM_EYE_Z,
};
pub use error::{Error, Result};
