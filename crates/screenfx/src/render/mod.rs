//! Display surface - per-frame animation stepping and view uniforms

mod surface;

pub use surface::{FrameUniforms, ViewSurface};
