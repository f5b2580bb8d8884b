//! Keyframed animation tracks.

use crate::{ConfigError, ConfigResult, Interpolate};

/// How the blend factor between two keys is shaped.
///
/// The mode of the *earlier* key of a pair applies to the whole segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interpolation {
    /// Blend by the raw segment fraction `m`.
    #[default]
    Linear,
    /// Blend by `exp(k * m)`.
    Exponential(f32),
    /// Blend by `ln(k * m)`.
    Logarithmic(f32),
}

impl Interpolation {
    /// Shape a segment fraction into a blend factor.
    #[inline]
    pub fn shape(&self, m: f32) -> f32 {
        match *self {
            Interpolation::Linear => m,
            Interpolation::Exponential(k) => (k * m).exp(),
            Interpolation::Logarithmic(k) => (k * m).ln(),
        }
    }
}

/// A single time-stamped value.
#[derive(Debug, Clone, PartialEq)]
pub struct Key<T> {
    pub time: f32,
    pub value: T,
    pub mode: Interpolation,
}

impl<T> Key<T> {
    pub fn new(time: f32, value: T, mode: Interpolation) -> Self {
        Self { time, value, mode }
    }

    pub fn linear(time: f32, value: T) -> Self {
        Self::new(time, value, Interpolation::Linear)
    }
}

/// An ordered, interpolated animation track.
///
/// Keys are expected in ascending time order; the curve does not sort them.
/// Outside the keyed range, and in any gap where no pair of keys straddles
/// the sample time, the curve holds the **last** key's value.
#[derive(Debug, Clone)]
pub struct KeyframeCurve<T> {
    keys: Vec<Key<T>>,
}

impl<T: Interpolate> KeyframeCurve<T> {
    /// Create a curve from keys in ascending time order.
    pub fn new(keys: Vec<Key<T>>) -> ConfigResult<Self> {
        if keys.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        if keys.iter().any(|k| !k.time.is_finite()) {
            return Err(ConfigError::NonFinite { what: "key time" });
        }
        if keys.windows(2).any(|w| w[1].time < w[0].time) {
            log::warn!(
                "KeyframeCurve built from {} keys that are not in ascending time order",
                keys.len()
            );
        }
        Ok(Self { keys })
    }

    /// Sample the curve at `time`.
    pub fn evaluate(&self, time: f32) -> T {
        for pair in self.keys.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.time == time {
                return a.value.clone();
            }
            if a.time < time && time < b.time {
                let m = (time - a.time) / (b.time - a.time);
                return a.value.interpolate(&b.value, a.mode.shape(m));
            }
        }
        // Boundary policy: hold the last key on both sides
        self.last().clone()
    }

    fn last(&self) -> &T {
        // Non-empty by construction
        &self.keys[self.keys.len() - 1].value
    }
}

impl<T> KeyframeCurve<T> {
    pub fn keys(&self) -> &[Key<T>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; construction rejects empty curves.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quat, Vec3};

    fn ramp() -> KeyframeCurve<f32> {
        KeyframeCurve::new(vec![
            Key::linear(0.0, 1.0),
            Key::linear(2.0, 3.0),
            Key::linear(4.0, -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_curve_rejected() {
        let result = KeyframeCurve::<f32>::new(Vec::new());
        assert_eq!(result.unwrap_err(), ConfigError::EmptyCurve);
    }

    #[test]
    fn test_exact_key_times() {
        let curve = ramp();
        assert_eq!(curve.evaluate(0.0), 1.0);
        assert_eq!(curve.evaluate(2.0), 3.0);
        assert_eq!(curve.evaluate(4.0), -1.0);
    }

    #[test]
    fn test_linear_midpoint() {
        let curve = ramp();
        assert!((curve.evaluate(1.0) - 2.0).abs() < 1e-6);
        assert!((curve.evaluate(3.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_boundaries_hold_last_key() {
        let curve = ramp();
        assert_eq!(curve.evaluate(10.0), -1.0);
        // Before the first key also yields the last key, not the first
        assert_eq!(curve.evaluate(-5.0), -1.0);
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = KeyframeCurve::new(vec![Key::linear(1.0, Vec3::ONE)]).unwrap();
        assert_eq!(curve.evaluate(0.0), Vec3::ONE);
        assert_eq!(curve.evaluate(1.0), Vec3::ONE);
        assert_eq!(curve.evaluate(7.0), Vec3::ONE);
    }

    #[test]
    fn test_earlier_key_mode_applies() {
        let k = 0.5f32;
        let curve = KeyframeCurve::new(vec![
            Key::new(0.0, 0.0f32, Interpolation::Exponential(k)),
            Key::new(1.0, 10.0f32, Interpolation::Linear),
        ])
        .unwrap();

        let expected = 10.0 * (k * 0.25).exp();
        assert!((curve.evaluate(0.25) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_logarithmic_shape() {
        let shape = Interpolation::Logarithmic(std::f32::consts::E);
        assert!((shape.shape(1.0) - 1.0).abs() < 1e-6);
        assert!(Interpolation::Linear.shape(0.3) == 0.3);
    }

    #[test]
    fn test_quaternion_track() {
        let curve = KeyframeCurve::new(vec![
            Key::linear(0.0, Quat::IDENTITY),
            Key::linear(1.0, Quat::from_rotation_z(1.0)),
        ])
        .unwrap();

        let mid = curve.evaluate(0.5);
        assert!(mid.dot(Quat::from_rotation_z(0.5)).abs() > 0.9999);
    }
}
