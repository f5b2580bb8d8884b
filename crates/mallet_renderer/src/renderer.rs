//! Shading and per-pixel sampling.
//!
//! Implements:
//! - Lambertian shading against one directional light with hard shadows
//! - Recursive mirror reflection with a fixed depth limit
//! - Stratified N x N jittered supersampling
//! - Gamma correction

use std::path::Path;

use mallet_math::{ConfigError, ConfigResult, Ray, Vec2, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{gen_f32, Camera, Color, HitRecord, RenderResult, Scene, DEFAULT_BUCKET_SIZE};

/// Deepest `max_depth` a config may ask for.
pub const MAX_DEPTH_LIMIT: u32 = 16;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Sub-samples per pixel side; each pixel takes N x N samples
    pub samples_per_side: u32,
    /// Deepest reflection bounce that is still traced
    pub max_depth: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Sky color returned for misses and past the depth limit
    pub background: Color,
    /// Direction toward the light
    pub light_direction: Vec3,
    /// Offset along the normal for shadow and reflection rays
    pub shadow_epsilon: f32,
    /// Display gamma applied after averaging
    pub gamma: f32,
    /// Base seed for the per-tile jitter generators
    pub seed: u64,
    /// Worker threads; `None` lets rayon decide
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_side: 4,
            max_depth: 6,
            tile_size: DEFAULT_BUCKET_SIZE,
            background: Color::new(0.05, 0.05, 0.5),
            light_direction: Vec3::Y,
            shadow_epsilon: 1e-3,
            gamma: 2.2,
            seed: 0,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check the settings describe a renderable frame.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_side == 0 {
            return Err(ConfigError::Invalid("samples_per_side must be at least 1".into()));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_depth must be at most {MAX_DEPTH_LIMIT}, got {}",
                self.max_depth
            )));
        }
        if self.tile_size == 0 {
            return Err(ConfigError::Invalid("tile_size must be at least 1".into()));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Invalid("threads must be at least 1".into()));
        }
        ConfigError::check_positive("gamma", self.gamma)?;
        if !self.shadow_epsilon.is_finite() || self.shadow_epsilon < 0.0 {
            return Err(ConfigError::Invalid("shadow_epsilon must be finite and >= 0".into()));
        }
        if !self.background.is_finite() {
            return Err(ConfigError::NonFinite { what: "background" });
        }
        if !self.light_direction.is_finite() || self.light_direction.length_squared() == 0.0 {
            return Err(ConfigError::Invalid("light_direction must be a non-zero vector".into()));
        }
        Ok(())
    }

    /// Unit vector toward the light.
    pub fn light(&self) -> Vec3 {
        self.light_direction.normalize_or_zero()
    }
}

/// Mirror `direction` about `normal`.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// 1 if nothing lies between `origin` and the light, else 0.
pub fn shadow_factor(scene: &Scene, origin: Vec3, light: Vec3, time: f32) -> f32 {
    if scene.occluded(&Ray::new(origin, light, time)) {
        0.0
    } else {
        1.0
    }
}

/// Lambertian term: albedo * max(0, n.l) * shadow.
#[inline]
pub fn lambert(albedo: Color, normal: Vec3, light: Vec3, shadow: f32) -> Color {
    albedo * normal.dot(light).max(0.0) * shadow
}

/// Compute the color seen by a ray.
///
/// Past `config.max_depth` the background is returned without tracing.
/// Hits with no bound material also fall back to the background.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, config: &RenderConfig) -> Color {
    if depth > config.max_depth {
        return config.background;
    }

    let mut rec = HitRecord::new();
    if !scene.hit(ray, Some(&mut rec)) {
        return config.background;
    }
    let Some(material) = rec.material.and_then(|id| scene.material(id)) else {
        return config.background;
    };

    let light = config.light();
    let origin = rec.point(ray) + rec.normal * config.shadow_epsilon;
    let shadow = shadow_factor(scene, origin, light, ray.time());
    let mut color = lambert(material.albedo(rec.texcoord), rec.normal, light, shadow);

    if material.reflectivity > 0.0 {
        let reflected = Ray::new(origin, reflect(ray.direction(), rec.normal), ray.time());
        color += material.reflectivity * ray_color(&reflected, scene, depth + 1, config);
    }

    color
}

/// Apply the display gamma curve.
#[inline]
pub fn gamma_correct(color: Color, gamma: f32) -> Color {
    color.max(Color::ZERO).powf(1.0 / gamma)
}

/// Map a position inside the image to NDC, row 0 at the top.
#[inline]
fn pixel_to_ndc(x: u32, y: u32, offset: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + offset.x) / width as f32 * 2.0 - 1.0,
        1.0 - (y as f32 + offset.y) / height as f32 * 2.0,
    )
}

/// Render a single pixel with stratified jitter.
///
/// Sub-sample (sx, sy) lands at ((sx, sy) + uniform[0, 1)) / N inside the
/// pixel. The average is gamma-corrected before it is returned.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    time: f32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let n = config.samples_per_side;
    let mut pixel_color = Color::ZERO;

    for sy in 0..n {
        for sx in 0..n {
            let jitter = Vec2::new(gen_f32(rng), gen_f32(rng));
            let offset = (Vec2::new(sx as f32, sy as f32) + jitter) / n as f32;
            let ndc = pixel_to_ndc(x, y, offset, width, height);
            let ray = camera.generate_ray(ndc, time, rng);
            pixel_color += ray_color(&ray, scene, 0, config);
        }
    }

    // Average the samples
    gamma_correct(pixel_color / (n * n) as f32, config.gamma)
}
