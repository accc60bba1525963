//! Bitmap ⇄ texture conversion and screenshots
//!
//! `Texture` is the CPU-side image of the display texture: tightly packed
//! RGBA8 rows, top row first. Conversions that cannot produce an image
//! return `None` after logging why; callers treat that as a skipped
//! operation.

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use screenfx_core::CropRect;

/// Wallpaper color behind the emulator display
pub const LIGHT_GRAY: [u8; 3] = [170, 170, 170];

/// Edge length of the background texture
pub const BACKGROUND_SIZE: u32 = 256;

const BYTES_PER_PIXEL: usize = 4;

/// Convert color components in 0.0..=1.0 to 8-bit channels (truncating).
pub fn rgb8(r: f64, g: f64, b: f64) -> [u8; 3] {
    let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

/// Like [`rgb8`], with an opaque alpha channel.
pub fn rgba8(r: f64, g: f64, b: f64) -> [u8; 4] {
    let [r, g, b] = rgb8(r, g, b);
    [r, g, b, u8::MAX]
}

/// RGBA8 pixel data of a display texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Texture {
    /// Wrap raw RGBA8 data; `None` if the size does not match.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            log::warn!("Refusing to create empty {}x{} texture", width, height);
            return None;
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            log::warn!(
                "Texture data has {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            );
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Upload an image. Rows are flipped so the first texture row is the
    /// bottom of the image.
    pub fn from_image(image: &RgbaImage) -> Option<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, to_data(image, true))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The texture contents as an image, row for row.
    pub fn to_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Copy out the region selected by a normalized rectangle.
    pub fn cutout(&self, rect: CropRect) -> Option<RgbaImage> {
        let x = (self.width as f32 * rect.x) as u32;
        let y = (self.height as f32 * rect.y) as u32;
        let w = (self.width as f32 * rect.width) as u32;
        let h = (self.height as f32 * rect.height) as u32;

        if w == 0 || h == 0 || x + w > self.width || y + h > self.height {
            log::warn!(
                "Cutout {}x{} at ({}, {}) does not fit {}x{} texture",
                w,
                h,
                x,
                y,
                self.width,
                self.height
            );
            return None;
        }

        let image = self.to_image()?;
        Some(imageops::crop_imm(&image, x, y, w, h).to_image())
    }
}

/// Build an image from 32-bit big-endian RGBX pixels. The fourth byte of
/// every pixel is ignored and the result is opaque.
pub fn image_from_raw(data: &[u8], width: u32, height: u32) -> Option<RgbaImage> {
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if width == 0 || height == 0 || data.len() != expected {
        log::warn!(
            "Failed to create image: {} bytes for {}x{} pixels",
            data.len(),
            width,
            height
        );
        return None;
    }

    let mut image = RgbaImage::from_raw(width, height, data.to_vec())?;
    for pixel in image.pixels_mut() {
        pixel[3] = u8::MAX;
    }
    Some(image)
}

/// Raw RGBA8 bytes of an image, optionally upside down. Alpha is forced opaque.
pub fn to_data(image: &RgbaImage, vflip: bool) -> Vec<u8> {
    let mut data = if vflip {
        imageops::flip_vertical(image).into_raw()
    } else {
        image.as_raw().clone()
    };
    for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel[3] = u8::MAX;
    }
    data
}

/// An image filled with a single color.
pub fn solid_color(rgb: [u8; 3], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], u8::MAX]))
}

/// Scale an image into a new size, flipping it vertically.
pub fn expand(image: &RgbaImage, width: u32, height: u32) -> Option<RgbaImage> {
    if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
        log::warn!(
            "Cannot expand {}x{} image to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );
        return None;
    }

    let scaled = imageops::resize(image, width, height, FilterType::Nearest);
    Some(imageops::flip_vertical(&scaled))
}

/// Texture shown behind the display while it is transitioning.
pub fn background_texture() -> Option<Texture> {
    Texture::from_image(&solid_color(LIGHT_GRAY, BACKGROUND_SIZE, BACKGROUND_SIZE))
}

/// Capture the visible part of a texture.
pub fn screenshot(texture: &Texture, rect: CropRect) -> Option<RgbaImage> {
    let image = texture.cutout(rect);
    if image.is_none() {
        log::warn!("Screenshot skipped");
    }
    image
}

/// Save an image as PNG.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;
    log::info!("Saved {}x{} screenshot to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn test_rgb8_truncates() {
        assert_eq!(rgb8(1.0, 0.0, 0.5), [255, 0, 127]);
        assert_eq!(rgb8(2.0, -1.0, 0.999), [255, 0, 254]);
    }

    #[test]
    fn test_rgba8_is_opaque() {
        assert_eq!(rgba8(1.0, 0.0, 0.5), [255, 0, 127, 255]);
        assert_eq!(rgba8(0.2, 0.4, 0.6)[3], 255);
    }

    #[test]
    fn test_image_from_raw_forces_opaque() {
        let data = [10, 20, 30, 0, 40, 50, 60, 99];
        let image = image_from_raw(&data, 2, 1).expect("image");
        assert_eq!(image.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([40, 50, 60, 255]));
    }

    #[test]
    fn test_image_from_raw_rejects_bad_sizes() {
        assert!(image_from_raw(&[0; 8], 3, 1).is_none());
        assert!(image_from_raw(&[], 0, 0).is_none());
    }

    #[test]
    fn test_texture_upload_flips_rows() {
        let image = gradient(4, 3);
        let texture = Texture::from_image(&image).expect("texture");
        let back = texture.to_image().expect("image");

        assert_eq!(back.get_pixel(1, 0), image.get_pixel(1, 2));
        assert_eq!(back.get_pixel(1, 2), image.get_pixel(1, 0));
    }

    #[test]
    fn test_texture_rejects_short_data() {
        assert!(Texture::new(2, 2, vec![0; 15]).is_none());
        assert!(Texture::new(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_cutout_uses_normalized_rect() {
        let mut data = Vec::new();
        for y in 0..4u8 {
            for x in 0..8u8 {
                data.extend_from_slice(&[x, y, 0, 255]);
            }
        }
        let texture = Texture::new(8, 4, data).expect("texture");

        let cut = texture
            .cutout(CropRect::new(0.25, 0.5, 0.5, 0.5))
            .expect("cutout");
        assert_eq!(cut.dimensions(), (4, 2));
        assert_eq!(cut.get_pixel(0, 0), &Rgba([2, 2, 0, 255]));
        assert_eq!(cut.get_pixel(3, 1), &Rgba([5, 3, 0, 255]));
    }

    #[test]
    fn test_cutout_out_of_bounds_is_skipped() {
        let texture = background_texture().expect("texture");
        assert!(texture.cutout(CropRect::new(0.5, 0.0, 1.0, 1.0)).is_none());
        assert!(screenshot(&texture, CropRect::new(0.0, 0.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_background_texture() {
        let texture = background_texture().expect("texture");
        assert_eq!((texture.width(), texture.height()), (256, 256));
        assert!(texture
            .data()
            .chunks_exact(4)
            .all(|p| p == [170, 170, 170, 255]));
    }

    #[test]
    fn test_expand_scales_and_flips() {
        let image = gradient(2, 2);
        let expanded = expand(&image, 4, 4).expect("expanded");
        assert_eq!(expanded.dimensions(), (4, 4));
        assert_eq!(expanded.get_pixel(0, 0), image.get_pixel(0, 1));
        assert_eq!(expanded.get_pixel(3, 3), image.get_pixel(1, 0));
        assert!(expand(&image, 0, 4).is_none());
    }

    #[test]
    fn test_screenshot_saves_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shot.png");
        let texture = background_texture().expect("texture");

        let shot = screenshot(&texture, CropRect::ZOOMED_IN).expect("screenshot");
        save_png(&shot, &path).expect("save");

        let loaded = image::open(&path).expect("open").to_rgba8();
        assert_eq!(loaded.dimensions(), shot.dimensions());
    }
}
