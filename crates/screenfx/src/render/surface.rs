//! The emulator display surface as seen by the render loop.

use glam::Mat4;
use screenfx_core::math::{
    aspect_ratio, check_projection, matrix_from_perspective, matrix_from_rotation,
    matrix_from_translation,
};
use screenfx_core::{AnimationState, CropRect, TextureCrop, TransitionPreset};

use crate::config::{GeometryConfig, ViewConfig, ViewerConfig};

/// Per-frame uniform data for the display shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// Model-view-projection matrix, column-major
    pub mvp: [[f32; 4]; 4],
    /// Visible texture region `[x, y, width, height]`
    pub crop: [f32; 4],
    /// Display opacity
    pub alpha: f32,
    _padding: [f32; 3],
}

/// Owns the animated view state and turns it into matrices once per frame.
pub struct ViewSurface {
    animation: AnimationState,
    crop: TextureCrop,
    view: ViewConfig,
    texture_zoom_steps: u32,
    size: (u32, u32),
    aspect: f32,

    projection: Mat4,
    model_view: Mat4,
    frame: u64,
}

impl ViewSurface {
    /// Create a surface from the viewer configuration.
    ///
    /// Fails on a zero drawable size or projection settings that would not
    /// give a finite matrix. Applies the geometry preferences and starts the
    /// configured startup transition, if any.
    pub fn new(config: &ViewerConfig) -> screenfx_core::Result<Self> {
        let view = config.view.clone();
        let aspect = aspect_ratio(view.width, view.height)?;
        check_projection(view.fov_degrees, view.near_z, view.far_z)?;

        let mut surface = Self {
            animation: AnimationState::new(),
            crop: TextureCrop::default(),
            size: (view.width, view.height),
            view,
            texture_zoom_steps: config.animation.texture_zoom_steps,
            aspect,
            projection: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
            frame: 0,
        };

        surface.apply_geometry(&config.geometry);
        if let Some(preset) = config.animation.startup_preset {
            surface.apply(preset);
        }

        log::info!(
            "View surface {}x{} (fov {} deg)",
            surface.size.0,
            surface.size.1,
            surface.view.fov_degrees
        );
        Ok(surface)
    }

    /// Update the drawable size. Invalid sizes leave the surface unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> screenfx_core::Result<()> {
        self.aspect = aspect_ratio(width, height)?;
        self.size = (width, height);
        self.build_matrices();
        Ok(())
    }

    /// Advance all running animations by one frame and return the uniforms
    /// to draw it with.
    pub fn tick(&mut self) -> FrameUniforms {
        if self.animation.is_animating() {
            self.animation.advance();
            self.build_matrices();
        }
        if self.crop.is_animating() {
            self.crop.advance();
        }

        self.frame += 1;
        self.uniforms()
    }

    /// Uniforms for the current state without advancing.
    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            mvp: self.mvp().to_cols_array_2d(),
            crop: self.crop.rect().to_array(),
            alpha: self.animation.alpha.current(),
            _padding: [0.0; 3],
        }
    }

    fn build_matrices(&mut self) {
        let a = &self.animation;

        self.projection = matrix_from_perspective(
            self.view.fov_degrees.to_radians(),
            self.aspect,
            self.view.near_z,
            self.view.far_z,
        );

        let translation = matrix_from_translation(
            -a.eye_x(),
            -a.eye_y(),
            a.eye_z() + self.view.screen_distance,
        );
        let rotation = matrix_from_rotation(a.pitch.current().to_radians(), 1.0, 0.0, 0.0)
            * matrix_from_rotation(a.yaw.current().to_radians(), 0.0, 1.0, 0.0)
            * matrix_from_rotation(a.roll.current().to_radians(), 0.0, 0.0, 1.0);

        self.model_view = translation * rotation;
    }

    pub fn mvp(&self) -> Mat4 {
        self.projection * self.model_view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    /// Start a screen transition, replacing any in flight.
    pub fn apply(&mut self, preset: TransitionPreset) {
        self.animation.apply(preset);
        self.build_matrices();
    }

    pub fn zoom_texture_in(&mut self) {
        self.crop.zoom_in(self.texture_zoom_steps);
    }

    pub fn zoom_texture_out(&mut self) {
        self.crop.zoom_out(self.texture_zoom_steps);
    }

    /// Place the eye where the geometry preferences say.
    pub fn apply_geometry(&mut self, geometry: &GeometryConfig) {
        self.animation.set_eye_x(geometry.eye_x);
        self.animation.set_eye_y(geometry.eye_y);
        self.animation.set_eye_z(geometry.eye_z);
        self.build_matrices();
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn is_texture_animating(&self) -> bool {
        self.crop.is_animating()
    }

    pub fn eye_x(&self) -> f32 {
        self.animation.eye_x()
    }

    pub fn eye_y(&self) -> f32 {
        self.animation.eye_y()
    }

    pub fn eye_z(&self) -> f32 {
        self.animation.eye_z()
    }

    pub fn set_eye_x(&mut self, x: f32) {
        self.animation.set_eye_x(x);
        self.build_matrices();
    }

    pub fn set_eye_y(&mut self, y: f32) {
        self.animation.set_eye_y(y);
        self.build_matrices();
    }

    pub fn set_eye_z(&mut self, z: f32) {
        self.animation.set_eye_z(z);
        self.build_matrices();
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn crop_rect(&self) -> CropRect {
        self.crop.rect()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn surface() -> ViewSurface {
        ViewSurface::new(&ViewerConfig::default()).expect("surface")
    }

    #[test]
    fn test_new_surface_is_idle() {
        let surface = surface();
        assert!(!surface.is_animating());
        assert!(!surface.is_texture_animating());
        assert_eq!(surface.crop_rect(), CropRect::FULL_FRAME);
        assert_eq!(surface.uniforms().alpha, 1.0);
    }

    #[test]
    fn test_screen_center_projects_to_clip_center() {
        let surface = surface();
        let clip = surface.mvp() * Vec4::W;
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
        assert!((clip.w - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_startup_preset_from_config() {
        let mut config = ViewerConfig::default();
        config.animation.startup_preset = Some(TransitionPreset::BlendOut);

        let mut surface = ViewSurface::new(&config).expect("surface");
        assert!(surface.is_animating());

        let mut frames = 0;
        while surface.is_animating() {
            surface.tick();
            frames += 1;
        }
        assert_eq!(frames, 40);
        assert_eq!(surface.uniforms().alpha, 0.0);
        assert_eq!(surface.frame(), 40);
    }

    #[test]
    fn test_rotation_changes_mvp() {
        let mut surface = surface();
        let before = surface.uniforms().mvp;

        surface.apply(TransitionPreset::Rotate);
        let after = surface.tick().mvp;
        assert_ne!(before, after);
    }

    #[test]
    fn test_texture_zoom_feeds_uniforms() {
        let mut config = ViewerConfig::default();
        config.animation.texture_zoom_steps = 5;
        let mut surface = ViewSurface::new(&config).expect("surface");

        surface.zoom_texture_in();
        assert!(surface.is_texture_animating());
        let mut uniforms = surface.uniforms();
        for _ in 0..5 {
            uniforms = surface.tick();
        }
        assert_eq!(uniforms.crop, CropRect::ZOOMED_IN.to_array());

        surface.zoom_texture_out();
        for _ in 0..5 {
            uniforms = surface.tick();
        }
        assert_eq!(uniforms.crop, CropRect::FULL_FRAME.to_array());
    }

    #[test]
    fn test_geometry_sets_eye_immediately() {
        let mut config = ViewerConfig::default();
        config.geometry = GeometryConfig {
            eye_x: 0.1,
            eye_y: 0.2,
            eye_z: 0.3,
        };
        let mut surface = ViewSurface::new(&config).expect("surface");
        assert_eq!((surface.eye_x(), surface.eye_y(), surface.eye_z()), (0.1, 0.2, 0.3));
        assert!(!surface.is_animating());

        surface.set_eye_z(1.0);
        let clip = surface.model_view() * Vec4::W;
        assert!((clip.z - 2.4).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_resize_keeps_previous_size() {
        let mut surface = surface();
        let projection = surface.projection();

        assert!(surface.resize(0, 600).is_err());
        assert_eq!(surface.size(), (800, 600));
        assert_eq!(surface.projection(), projection);

        surface.resize(1600, 600).expect("resize");
        assert_ne!(surface.projection(), projection);
    }

    #[test]
    fn test_uniforms_are_gpu_sized() {
        let uniforms = surface().uniforms();
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 96);
    }

    #[test]
    fn test_degenerate_projection_is_rejected() {
        let mut config = ViewerConfig::default();
        config.view.fov_degrees = 0.0;
        assert!(matches!(
            ViewSurface::new(&config),
            Err(screenfx_core::Error::InvalidProjection { .. })
        ));

        let mut config = ViewerConfig::default();
        config.view.near_z = 5.0;
        config.view.far_z = 5.0;
        assert!(ViewSurface::new(&config).is_err());
    }

    #[test]
    fn test_uniform_field_offsets() {
        assert_eq!(std::mem::offset_of!(FrameUniforms, mvp), 0);
        assert_eq!(std::mem::offset_of!(FrameUniforms, crop), 64);
        assert_eq!(std::mem::offset_of!(FrameUniforms, alpha), 80);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
    }

    #[test]
    fn test_invalid_config_size() {
        let mut config = ViewerConfig::default();
        config.view.height = 0;
        assert!(ViewSurface::new(&config).is_err());
    }
}
