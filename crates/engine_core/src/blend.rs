//! Blend curves for smooth camera transitions.
//!
//! All timed navigation moves (fly-to, fly-home, deep zoom) run off one
//! double-exponential progress curve: slow start, fast middle, slow finish
//! that only completes asymptotically. The raw curve never quite reaches 1
//! in finite time, so it is renormalized against its value at t = 1 and
//! callers always pass time normalized by the move duration.

/// Smallest usable blend rate. Rates below this are clamped up so the
/// curve never divides by zero.
pub const MIN_RATE: f64 = 1e-6;

/// Raw double-exponential blend profile.
///
/// `fmix_raw(0) == 0` and the curve rises monotonically toward 1 as
/// `t → ∞`. `a` and `b` control the asymmetry between ease-in and
/// ease-out.
pub fn fmix_raw(t: f64, a: f64, b: f64) -> f64 {
    let a = a.max(MIN_RATE);
    let b = b.max(MIN_RATE);
    1.0 + (b / a) * (-t * (a + b)).exp() - ((a + b) / a) * (-t * b).exp()
}

/// Normalized blend progress in [0, 1].
///
/// `t` is elapsed time divided by the move duration; progress reaches
/// exactly 1 at `t = 1`.
pub fn fmix(t: f64, a: f64, b: f64) -> f64 {
    let max = fmix_raw(1.0, a, b).max(MIN_RATE);
    (fmix_raw(t, a, b) / max).clamp(0.0, 1.0)
}

/// Hermite smoothstep on a clamped ramp. Used on top of [`fmix`] for
/// target-position blending, which wants a more symmetric curve than
/// pitch/yaw/radius.
pub fn smoothstep(x: f64) -> f64 {
    let y = x.clamp(0.0, 1.0);
    y * y * (3.0 - 2.0 * y)
}

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, x: f64) -> f64 {
    a * (1.0 - x) + b * x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmix_starts_at_zero_and_ends_at_one() {
        for &(a, b) in &[(2.0, 6.0), (0.5, 0.5), (10.0, 1.0)] {
            assert!(fmix(0.0, a, b).abs() < 1e-12);
            assert!((fmix(1.0, a, b) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn fmix_is_monotone_on_unit_interval() {
        for &(a, b) in &[(2.0, 6.0), (1.0, 1.0), (8.0, 0.3)] {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let t = i as f64 / 1000.0;
                let v = fmix(t, a, b);
                assert!(v >= prev - 1e-12, "a={a} b={b} t={t}");
                prev = v;
            }
        }
    }

    #[test]
    fn fmix_clamps_past_nominal_duration() {
        assert!((fmix(3.0, 2.0, 6.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fmix_survives_zero_rates() {
        let v = fmix(0.5, 0.0, 0.0);
        assert!(v.is_finite());
        assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(2.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn lerp_blends_linearly() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert!((lerp(2.0, 10.0, 0.25) - 4.0).abs() < 1e-12);
    }
}
