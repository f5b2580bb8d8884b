//! Color sources for materials.
//!
//! A texture maps 2D surface coordinates to a linear RGB color. Image
//! textures are decoded with the `image` crate and stored as linear floats.

use std::path::Path;
use std::sync::Arc;

use mallet_math::Vec2;

use crate::{Color, TextureError, TextureResult};

/// A coordinate -> color mapping.
#[derive(Clone)]
pub enum Texture {
    /// The same color everywhere.
    Solid(Color),
    /// Alternating squares of `scale` cells per unit of texcoord.
    Checker { even: Color, odd: Color, scale: f32 },
    /// A plain function of the surface coordinates.
    Procedural(fn(Vec2) -> Color),
    /// A shared, bilinearly filtered bitmap.
    Image(Arc<ImageTexture>),
}

impl Texture {
    /// Look up the color at `uv`.
    ///
    /// NaN coordinates (e.g. at sphere poles) yield NaN colors rather
    /// than a panic.
    pub fn sample(&self, uv: Vec2) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker { even, odd, scale } => {
                let cell = ((uv.x * scale).floor() as i64)
                    .wrapping_add((uv.y * scale).floor() as i64);
                if cell.rem_euclid(2) == 0 {
                    *even
                } else {
                    *odd
                }
            }
            Texture::Procedural(f) => f(uv),
            Texture::Image(image) => image.sample(uv.x, uv.y),
        }
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Texture::Solid(color) => f.debug_tuple("Solid").field(color).finish(),
            Texture::Checker { even, odd, scale } => f
                .debug_struct("Checker")
                .field("even", even)
                .field("odd", odd)
                .field("scale", scale)
                .finish(),
            Texture::Procedural(_) => f.write_str("Procedural"),
            Texture::Image(image) => f
                .debug_struct("Image")
                .field("width", &image.width)
                .field("height", &image.height)
                .finish(),
        }
    }
}

/// A loaded bitmap in linear RGB.
#[derive(Clone, Debug)]
pub struct ImageTexture {
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Row-major pixels, top row first
    pub pixels: Vec<Color>,
}

impl ImageTexture {
    /// Create a texture from linear pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> TextureResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load an sRGB image from disk.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);
        Self::from_pixels(width, height, pixels)
    }

    /// Sample with wrapped UVs and bilinear filtering. (0, 0) is bottom-left.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0);

        // Float-to-int casts saturate, so NaN lands on pixel 0
        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let top = self.pixel(x0, y0).lerp(self.pixel(x1, y0), fx);
        let bottom = self.pixel(x0, y1).lerp(self.pixel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::ZERO)
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
