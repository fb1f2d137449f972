//! Flight modes and the snapshot captured when a mode is entered.

use engine_core::blend;
use glam::DVec3;

/// Mutually exclusive camera flight modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    /// Momentum orbit with damped spin/pitch/zoom rates.
    Free,
    /// Active pointer drag: drag deltas drive spin and zoom directly.
    Control,
    /// Timed flight toward the selected star.
    Goto,
    /// Timed flight back to the level's default orbit.
    Home,
    /// Home leg first, then chained Goto to the selection.
    Jump,
    /// Deep-zoom sequence down to the finest level.
    Ultimate,
}

/// Blend curve parameters for one timed move.
#[derive(Debug, Clone, Copy)]
pub struct BlendParams {
    /// Nominal move duration in seconds.
    pub duration: f64,
    /// Ease-in rate of the double-exponential curve.
    pub mix_a: f64,
    /// Ease-out rate of the double-exponential curve.
    pub mix_b: f64,
}

/// Shortest flight duration in seconds.
const MIN_DURATION: f64 = 1.5;
/// Duration ceiling the saturating curve approaches for far targets.
const MAX_DURATION: f64 = 8.0;
/// Travel distance (current-level units) at which duration reaches ~63%
/// of its span.
const DISTANCE_SCALE: f64 = 2.0e3;

impl BlendParams {
    /// Compute parameters for a move covering `distance` current-level
    /// units. Duration grows with distance but saturates: `min +
    /// span * (1 - exp(-d/scale))`.
    pub fn for_distance(distance: f64, mode: FlightMode) -> Self {
        let d = distance.max(0.0);
        let duration = MIN_DURATION + (MAX_DURATION - MIN_DURATION) * (1.0 - (-d / DISTANCE_SCALE).exp());
        let (mix_a, mix_b) = match mode {
            // Goto leans into a long tail so arrival is gentle.
            FlightMode::Goto => (2.0, 6.0),
            FlightMode::Home | FlightMode::Jump => (3.0, 5.0),
            FlightMode::Ultimate => (2.5, 4.0),
            // Free/Control never consult the timed curve.
            FlightMode::Free | FlightMode::Control => (1.0, 1.0),
        };
        Self {
            duration,
            mix_a,
            mix_b,
        }
    }

    /// Normalized blend progress for `elapsed` seconds into the move.
    pub fn progress(&self, elapsed: f64) -> f64 {
        blend::fmix(elapsed / self.duration.max(1e-6), self.mix_a, self.mix_b)
    }
}

/// Everything a timed transition needs, captured once at mode entry.
///
/// Kept as one value object rather than loose fields mutated from many
/// call sites; per-step updates read it, level crossings rescale it.
#[derive(Debug, Clone, Copy)]
pub struct FlightSnapshot {
    pub origin_pitch: f64,
    pub origin_yaw: f64,
    pub terminal_pitch: f64,
    pub terminal_yaw: f64,
    pub radius_start: f64,
    pub radius_end: f64,
    pub origin_target: DVec3,
    pub terminal_target: DVec3,
    pub params: BlendParams,
    /// Mode-local clock, reset on entry.
    pub elapsed: f64,
}

impl FlightSnapshot {
    /// A snapshot that holds the camera where it is.
    pub fn hold(pitch: f64, yaw: f64, radius: f64, target: DVec3) -> Self {
        Self {
            origin_pitch: pitch,
            origin_yaw: yaw,
            terminal_pitch: pitch,
            terminal_yaw: yaw,
            radius_start: radius,
            radius_end: radius,
            origin_target: target,
            terminal_target: target,
            params: BlendParams::for_distance(0.0, FlightMode::Free),
            elapsed: 0.0,
        }
    }
}

/// Wrap an angle difference to (-PI, PI] so blends take the short way
/// around.
pub fn wrap_angle(delta: f64) -> f64 {
    let mut d = delta % std::f64::consts::TAU;
    if d > std::f64::consts::PI {
        d -= std::f64::consts::TAU;
    } else if d <= -std::f64::consts::PI {
        d += std::f64::consts::TAU;
    }
    d
}

/// Pitch and yaw of a view direction (z-up). None for a degenerate vector.
pub fn pitch_yaw_of(dir: DVec3) -> Option<(f64, f64)> {
    if dir.length_squared() < 1e-12 {
        return None;
    }
    let v = dir.normalize();
    let pitch = v.z.clamp(-1.0, 1.0).asin();
    let yaw = v.y.atan2(v.x);
    Some((pitch, yaw))
}

/// Unit view direction for a pitch/yaw pair (z-up).
pub fn direction_from(pitch: f64, yaw: f64) -> DVec3 {
    DVec3::new(
        pitch.cos() * yaw.cos(),
        pitch.cos() * yaw.sin(),
        pitch.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_monotone_and_saturating() {
        let mut prev = 0.0;
        for i in 0..60 {
            let d = 10.0_f64.powf(i as f64 * 0.2) - 1.0;
            let params = BlendParams::for_distance(d, FlightMode::Goto);
            assert!(params.duration >= prev);
            assert!(params.duration <= MAX_DURATION + 1e-9);
            prev = params.duration;
        }
        let near = BlendParams::for_distance(0.0, FlightMode::Goto);
        assert!((near.duration - MIN_DURATION).abs() < 1e-9);
        let far = BlendParams::for_distance(1e12, FlightMode::Goto);
        assert!((far.duration - MAX_DURATION).abs() < 1e-6);
    }

    #[test]
    fn progress_completes_at_duration() {
        let params = BlendParams::for_distance(500.0, FlightMode::Home);
        assert!(params.progress(0.0).abs() < 1e-12);
        assert!((params.progress(params.duration) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_angle_takes_short_way() {
        use std::f64::consts::PI;
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn pitch_yaw_round_trips_through_direction() {
        for &(pitch, yaw) in &[(0.3, 1.2), (-0.9, -2.5), (0.0, 0.0), (1.2, 3.0)] {
            let dir = direction_from(pitch, yaw);
            let (p, y) = pitch_yaw_of(dir).unwrap();
            assert!((p - pitch).abs() < 1e-9);
            assert!(wrap_angle(y - yaw).abs() < 1e-9);
        }
    }

    #[test]
    fn pitch_yaw_of_zero_vector_is_none() {
        assert!(pitch_yaw_of(DVec3::ZERO).is_none());
    }
}
