//! Thin-lens camera for ray generation.

use crate::gen_f32;
use mallet_math::{Ray, Vec2, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Rays are requested in normalized device coordinates, (-1, -1) at the
/// bottom-left of the frame and (1, 1) at the top-right.
#[derive(Debug, Clone)]
pub struct Camera {
    look_from: Vec3,

    // Orthonormal basis: right, up, forward
    u: Vec3,
    v: Vec3,
    w: Vec3,

    // Lens settings
    vfov: f32,           // Vertical field of view in degrees
    aspect: f32,         // Width over height
    aperture: f32,       // Radius of the lens disk
    focus_dist: f32,     // Distance from camera to plane of perfect focus
}

impl Camera {
    /// Create a pinhole camera at `look_from` aimed at `look_at`.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        let w = (look_at - look_from).normalize();
        let u = w.cross(vup).normalize();
        let v = u.cross(w);
        Self {
            look_from,
            u,
            v,
            w,
            vfov: 40.0,
            aspect: 1.0,
            aperture: 0.0,
            focus_dist: (look_at - look_from).length(),
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the frame's width over height.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Set lens settings. An aperture of zero gives a pinhole camera.
    pub fn with_lens(mut self, aperture: f32, focus_dist: f32) -> Self {
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.look_from
    }

    /// Generate a ray through `ndc` at `time`.
    ///
    /// The returned direction is unit length. With a non-zero aperture the
    /// origin is jittered across the lens disk, keeping the focus plane sharp.
    pub fn generate_ray(&self, ndc: Vec2, time: f32, rng: &mut dyn RngCore) -> Ray {
        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = half_height * self.aspect;

        let direction =
            self.w + self.u * (ndc.x * half_width) + self.v * (ndc.y * half_height);
        let focus_point = self.look_from + direction * self.focus_dist;

        let origin = if self.aperture <= 0.0 {
            self.look_from
        } else {
            let p = random_in_unit_disk(rng) * self.aperture;
            self.look_from + self.u * p.x + self.v * p.y
        };

        Ray::new(origin, (focus_point - origin).normalize(), time)
    }
}

/// Sample a random point in the unit disk.
fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec2 {
    loop {
        let p = Vec2::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
