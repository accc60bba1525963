//! # screenfx - Emulator display transitions
//!
//! Drives the 3D screen transitions of an emulator display: the render loop
//! ticks a [`render::ViewSurface`] once per frame, which steps the animated
//! view parameters and hands back the uniforms to draw the display quad with.

pub mod config;
pub mod image_toolbox;
pub mod render;

pub use render::{FrameUniforms, ViewSurface};

// Re-export core modules for convenience
pub use screenfx_core::animation;
pub use screenfx_core::math;
