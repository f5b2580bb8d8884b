//! Time-varying values.
//!
//! Every representation is immutable and `Send + Sync`, so the same value can
//! be sampled from any number of render threads at once.

use std::fmt;
use std::sync::Arc;

use crate::{Interpolate, KeyframeCurve};

/// A shared, thread-safe function of time.
pub trait Curve<T>: Send + Sync {
    fn evaluate(&self, time: f32) -> T;
}

/// A value that may depend on the sample time.
#[derive(Clone)]
pub enum AnimatedValue<T> {
    /// Same value at every time.
    Constant(T),
    /// Interpolated keyframe track.
    Keyframes(Arc<KeyframeCurve<T>>),
    /// A plain function pointer; cannot capture state.
    Function(fn(f32) -> T),
    /// Any other shared curve, such as a motion path.
    Curve(Arc<dyn Curve<T>>),
}

impl<T: Interpolate> AnimatedValue<T> {
    pub fn constant(value: T) -> Self {
        AnimatedValue::Constant(value)
    }

    pub fn keyframes(curve: KeyframeCurve<T>) -> Self {
        AnimatedValue::Keyframes(Arc::new(curve))
    }

    pub fn curve(curve: impl Curve<T> + 'static) -> Self {
        AnimatedValue::Curve(Arc::new(curve))
    }

    /// Sample the value at `time`.
    #[inline]
    pub fn evaluate(&self, time: f32) -> T {
        match self {
            AnimatedValue::Constant(value) => value.clone(),
            AnimatedValue::Keyframes(curve) => curve.evaluate(time),
            AnimatedValue::Function(f) => f(time),
            AnimatedValue::Curve(curve) => curve.evaluate(time),
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, AnimatedValue::Constant(_))
    }
}

impl<T> From<T> for AnimatedValue<T> {
    fn from(value: T) -> Self {
        AnimatedValue::Constant(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for AnimatedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatedValue::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            AnimatedValue::Keyframes(curve) => {
                f.debug_tuple("Keyframes").field(&curve.len()).finish()
            }
            AnimatedValue::Function(_) => f.write_str("Function"),
            AnimatedValue::Curve(_) => f.write_str("Curve"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Key, Vec3};

    struct Orbit {
        radius: f32,
    }

    impl Curve<Vec3> for Orbit {
        fn evaluate(&self, time: f32) -> Vec3 {
            Vec3::new(time.cos(), time.sin(), 0.0) * self.radius
        }
    }

    #[test]
    fn test_constant_ignores_time() {
        let a = AnimatedValue::from(4.0f32);
        assert_eq!(a.evaluate(0.0), 4.0);
        assert_eq!(a.evaluate(1.0), 4.0);
        assert!(a.is_constant());
    }

    #[test]
    fn test_function_pointer() {
        let b: AnimatedValue<f32> = AnimatedValue::Function(f32::sin);
        assert_eq!(b.evaluate(0.0), 0.0);
        assert!((b.evaluate(1.0) - 1.0f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_keyframes_and_curve_handles() {
        let track = KeyframeCurve::new(vec![Key::linear(0.0, 0.0f32), Key::linear(1.0, 2.0)]).unwrap();
        let a = AnimatedValue::keyframes(track);
        assert!((a.evaluate(0.5) - 1.0).abs() < 1e-6);

        let orbit = AnimatedValue::curve(Orbit { radius: 2.0 });
        assert!((orbit.evaluate(0.0) - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_concurrent_sampling() {
        let orbit = AnimatedValue::curve(Orbit { radius: 1.0 });
        std::thread::scope(|s| {
            for i in 0..4 {
                let orbit = &orbit;
                s.spawn(move || {
                    let p = orbit.evaluate(i as f32);
                    assert!((p.length() - 1.0).abs() < 1e-5);
                });
            }
        });
    }
}
