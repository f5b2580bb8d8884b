//! Mallet renderer - tiled CPU ray tracing of animated scenes.
//!
//! Rays are intersected against a tree of primitives, the closest hit is
//! shaded with a Lambertian term under one directional light (with hard
//! shadows), and mirror reflections are traced recursively. Frames are
//! split into tiles and rendered on a fixed thread pool.

mod axis_box;
mod bucket;
mod camera;
mod cylinder;
mod disk;
mod error;
mod framebuffer;
mod group;
mod hittable;
mod material;
mod rasterizer;
mod renderer;
mod scene;
mod sphere;
mod surface;
mod texture;
mod transform;

pub use axis_box::AxisBox;
pub use bucket::{
    generate_buckets, render_bucket, tile_seed, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use cylinder::Cylinder;
pub use disk::Disk;
pub use error::{RenderError, RenderResult, TextureError, TextureResult};
pub use framebuffer::Framebuffer;
pub use group::Group;
pub use hittable::{HitRecord, Hittable, MaterialId, T_SENTINEL};
pub use material::{Color, Material, MaterialLibrary};
pub use rasterizer::{RenderStats, Renderer};
pub use renderer::{
    gamma_correct, lambert, ray_color, reflect, render_pixel, shadow_factor, RenderConfig,
    MAX_DEPTH_LIMIT,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use surface::Surface;
pub use texture::{ImageTexture, Texture};
pub use transform::Transform;

/// Re-export math types from mallet_math
pub use mallet_math::{
    AnimatedValue, ConfigError, ConfigResult, Curve, Interpolation, Key, KeyframeCurve, Mat4,
    Pose, Quat, Ray, Vec2, Vec3,
};

use rand::distributions::{Distribution, Standard};
use rand::RngCore;

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    Standard.sample(rng)
}
