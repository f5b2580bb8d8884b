//! Math, animation and error types shared by the mallet crates.
//!
//! - **Vectors and matrices**: re-exported from `glam`
//! - **Rays**: `Ray` with a per-ray sample time
//! - **Animation**: `AnimatedValue`, `KeyframeCurve` and the `Interpolate` trait
//! - **Poses**: rigid `Pose` (translation + rotation)

// Re-export glam for convenience
pub use glam::*;

mod animated;
mod error;
mod interpolate;
mod interval;
mod keyframe;
mod pose;
mod ray;

pub use animated::{AnimatedValue, Curve};
pub use error::{ConfigError, ConfigResult};
pub use interpolate::Interpolate;
pub use interval::Interval;
pub use keyframe::{Interpolation, Key, KeyframeCurve};
pub use pose::Pose;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
    }
}
