//! Interpolation primitives
//!
//! Plain linear blends for scalars and RGB colours, plus the progress clamp
//! every animation runs its raw time fraction through.

use animora_core::Rgb;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t.
    ///
    /// `t` is not clamped: eased progress may leave `[0, 1]`.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp(*self, *other, t)
    }
}

impl Interpolate for Rgb {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp_color(*self, *other, t)
    }
}

/// `a + (b - a) * t`, exact at both ends
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    // a + (b - a) can round away from b
    if t == 1.0 {
        return b;
    }
    a + (b - a) * t
}

/// Clamp a raw progress value to `[0, 1]`.
///
/// NaN (a zero-length duration sampled at its start) maps to 1.0, so such an
/// animation completes on its first active frame instead of never.
#[inline]
pub fn clamp_progress(t: f64) -> f64 {
    0.0_f64.max(1.0_f64.min(t))
}

/// Per-channel rounded blend of two colours
pub fn lerp_color(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let a = from.channels();
    let b = to.channels();
    // `as u8` saturates, which keeps overshooting easings inside 0..=255.
    Rgb::from_channels(std::array::from_fn(|i| {
        lerp(a[i] as f32, b[i] as f32, t).round() as u8
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformState;

    #[test]
    fn test_lerp_is_exact_at_endpoints() {
        for (a, b) in [(0.0, 1.0), (-3.5, 12.25), (1e6, -1e-3), (0.1, 0.7)] {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_lerp_is_unclamped() {
        assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, -0.5) + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-0.25), 0.0);
        assert_eq!(clamp_progress(1.75), 1.0);
        assert_eq!(clamp_progress(0.4), 0.4);
        assert_eq!(clamp_progress(f64::INFINITY), 1.0);
        assert_eq!(clamp_progress(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_progress(f64::NAN), 1.0);
    }

    #[test]
    fn test_lerp_color_rounds_per_channel() {
        let c = lerp_color(Rgb::new(0, 0, 0), Rgb::new(255, 100, 1), 0.5);
        assert_eq!(c, Rgb::new(128, 50, 1));
    }

    #[test]
    fn test_lerp_color_stays_in_range() {
        let from = Rgb::new(10, 200, 255);
        let to = Rgb::new(250, 0, 128);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let c = lerp_color(from, to, t);
            for (ch, (lo, hi)) in c
                .channels()
                .iter()
                .zip(from.channels().iter().zip(to.channels().iter()))
            {
                assert!(*ch >= (*lo).min(*hi) && *ch <= (*lo).max(*hi));
            }
        }
    }

    #[test]
    fn test_lerp_color_saturates_on_overshoot() {
        let c = lerp_color(Rgb::new(0, 0, 0), Rgb::WHITE, 1.3);
        assert_eq!(c, Rgb::WHITE);
    }

    fn midpoint<T: Interpolate>(a: &T, b: &T) -> T {
        a.lerp(b, 0.5)
    }

    #[test]
    fn test_interpolate_trait() {
        assert!((2.0_f32.lerp(&4.0, 0.25) - 2.5).abs() < 1e-6);
        assert_eq!(Rgb::BLACK.lerp(&Rgb::WHITE, 1.0), Rgb::WHITE);

        let to = TransformState {
            x: 100.0,
            scale: 2.0,
            ..TransformState::IDENTITY
        };
        let mid = midpoint(&TransformState::IDENTITY, &to);
        assert_eq!(mid.x, 50.0);
        assert_eq!(mid.scale, 1.5);
        assert_eq!(mid.rotate, 0.0);
    }
}
