//! Matrix builders for the view transform.
//!
//! All matrices are column-major `glam::Mat4` in the layout GPU APIs expect.
//! The projection maps depth into [0, 1] for a left-handed view space.

use glam::{Mat4, Vec3, Vec4};

use crate::error::{Error, Result};

/// Perspective projection from a vertical field of view (radians).
///
/// Keeps the aspect ratio independent of the drawable size: the horizontal
/// scale is derived from the vertical one.
pub fn matrix_from_perspective(fov_y: f32, aspect: f32, near_z: f32, far_z: f32) -> Mat4 {
    let yscale = 1.0 / (fov_y * 0.5).tan();
    let xscale = yscale / aspect;
    let q = far_z / (far_z - near_z);

    Mat4::from_cols(
        Vec4::new(xscale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, yscale, 0.0, 0.0),
        Vec4::new(0.0, 0.0, q, 1.0),
        Vec4::new(0.0, 0.0, q * -near_z, 0.0),
    )
}

pub fn matrix_from_translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::new(x, y, z, 1.0))
}

/// Rotation by `radians` around the axis `(x, y, z)` (Rodrigues' formula).
///
/// The axis is normalized first; a zero axis yields NaNs.
pub fn matrix_from_rotation(radians: f32, x: f32, y: f32, z: f32) -> Mat4 {
    let v = Vec3::new(x, y, z).normalize();
    let cos = radians.cos();
    let cosp = 1.0 - cos;
    let sin = radians.sin();

    Mat4::from_cols(
        Vec4::new(
            cos + cosp * v.x * v.x,
            cosp * v.x * v.y + v.z * sin,
            cosp * v.x * v.z - v.y * sin,
            0.0,
        ),
        Vec4::new(
            cosp * v.x * v.y - v.z * sin,
            cos + cosp * v.y * v.y,
            cosp * v.y * v.z + v.x * sin,
            0.0,
        ),
        Vec4::new(
            cosp * v.x * v.z + v.y * sin,
            cosp * v.y * v.z - v.x * sin,
            cos + cosp * v.z * v.z,
            0.0,
        ),
        Vec4::W,
    )
}

/// Width over height of a drawable.
pub fn aspect_ratio(width: u32, height: u32) -> Result<f32> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidSize { width, height });
    }
    Ok(width as f32 / height as f32)
}

/// Check that a field of view (degrees) and clip planes give a finite
/// projection: fov strictly between 0 and 180, `0 < near < far`.
pub fn check_projection(fov_degrees: f32, near_z: f32, far_z: f32) -> Result<()> {
    let fov_ok = fov_degrees.is_finite() && fov_degrees > 0.0 && fov_degrees < 180.0;
    let planes_ok = near_z.is_finite() && far_z.is_finite() && near_z > 0.0 && far_z > near_z;
    if fov_ok && planes_ok {
        Ok(())
    } else {
        Err(Error::InvalidProjection {
            fov_degrees,
            near_z,
            far_z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_translation_moves_origin() {
        let m = matrix_from_translation(1.0, 2.0, 3.0);
        assert_eq!(m * Vec4::W, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_rotation_around_z() {
        let m = matrix_from_rotation(FRAC_PI_2, 0.0, 0.0, 1.0);
        let p = m * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), EPSILON));
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let unit = matrix_from_rotation(0.7, 0.0, 1.0, 0.0);
        let scaled = matrix_from_rotation(0.7, 0.0, 5.0, 0.0);
        assert!(unit.abs_diff_eq(scaled, EPSILON));
    }

    #[test]
    fn test_rotation_matches_glam_axis_angle() {
        let axis = Vec3::new(1.0, 2.0, -0.5);
        let ours = matrix_from_rotation(1.1, axis.x, axis.y, axis.z);
        let glam = Mat4::from_axis_angle(axis.normalize(), 1.1);
        assert!(ours.abs_diff_eq(glam, 1e-5));
    }

    #[test]
    fn test_rotation_by_zero_is_identity() {
        let m = matrix_from_rotation(0.0, 1.0, 1.0, 1.0);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }

    #[test]
    fn test_perspective_layout() {
        let fov = 90f32.to_radians();
        let m = matrix_from_perspective(fov, 2.0, 1.0, 11.0);
        let yscale = 1.0 / (fov * 0.5).tan();

        assert_eq!(m.x_axis, Vec4::new(yscale / 2.0, 0.0, 0.0, 0.0));
        assert_eq!(m.y_axis, Vec4::new(0.0, yscale, 0.0, 0.0));
        assert_eq!(m.z_axis, Vec4::new(0.0, 0.0, 1.1, 1.0));
        assert_eq!(m.w_axis, Vec4::new(0.0, 0.0, -1.1, 0.0));
    }

    #[test]
    fn test_perspective_depth_range() {
        let m = matrix_from_perspective(1.0, 1.0, 0.5, 50.0);

        let near = m * Vec4::new(0.0, 0.0, 0.5, 1.0);
        let far = m * Vec4::new(0.0, 0.0, 50.0, 1.0);
        assert!((near.z / near.w).abs() < EPSILON);
        assert!((far.z / far.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_check_projection() {
        assert_eq!(check_projection(60.0, 0.1, 100.0), Ok(()));
        assert!(check_projection(0.0, 0.1, 100.0).is_err());
        assert!(check_projection(180.0, 0.1, 100.0).is_err());
        assert!(check_projection(60.0, 1.0, 1.0).is_err());
        assert!(check_projection(60.0, 0.0, 100.0).is_err());
        assert!(check_projection(f32::NAN, 0.1, 100.0).is_err());
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(800, 400), Ok(2.0));
        assert_eq!(
            aspect_ratio(800, 0),
            Err(Error::InvalidSize {
                width: 800,
                height: 0
            })
        );
    }
}
