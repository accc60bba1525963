//! Error types for the animation core

use thiserror::Error;

/// Errors reported by the animation core.
///
/// Stepping itself cannot fail; these cover caller input that has to be
/// validated before it reaches the animator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A preset name that does not match any known transition
    #[error("unknown transition preset '{0}' (expected one of: {names})", names = crate::animation::TransitionPreset::NAMES.join(", "))]
    UnknownPreset(String),

    /// A drawable size that cannot produce an aspect ratio
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Projection parameters that would yield an inf/NaN matrix
    #[error("invalid projection: fov {fov_degrees} deg, near {near_z}, far {far_z}")]
    InvalidProjection {
        fov_degrees: f32,
        near_z: f32,
        far_z: f32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
