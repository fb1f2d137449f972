//! The camera manipulator: a per-step flight-mode state machine that owns
//! the pose, the orbit target, and the scale ladder.
//!
//! Called once per fixed simulation step. All motion is synchronous
//! arithmetic over current state and elapsed time; malformed transient
//! input degrades to a no-op, never a panic, because this runs inside the
//! render loop.

use engine_core::{blend, Transform};
use glam::{DMat4, DQuat, DVec3};

use crate::collab::RenderSurface;
use crate::flight::{direction_from, pitch_yaw_of, wrap_angle, BlendParams, FlightMode, FlightSnapshot};
use crate::ladder::{ScaleLadder, FINEST_LEVEL, GALAXY_LEVEL, MAX_RADIUS, MIN_RADIUS, UNIT_SCALE};
use crate::rescale;

/// Default orbit radius a level is viewed from.
pub const HOME_RADIUS: f64 = 200.0;

/// Orbit radius a Goto flight settles at.
pub const ARRIVAL_RADIUS: f64 = 2.0;

/// Radius the Ultimate deep zoom eases toward at the finest level.
pub const ULTIMATE_RADIUS: f64 = 5.0;

/// Maximum magnitude of the view direction's vertical component in
/// Free/Control. Keeps the look-at construction away from the pole.
pub const PITCH_LIMIT: f64 = 0.95;

/// Hard orbit radius bounds. Wider than the crossing thresholds so the
/// clamp only bites at the ladder boundaries where crossings fail.
const MIN_ORBIT_RADIUS: f64 = 0.1;
const MAX_ORBIT_DISTANCE: f64 = 5.0e5;

/// Exponential damping rate for spin/pitch/zoom speeds, applied as
/// `exp2(-dt * WEAK_RATIO)` each step.
const WEAK_RATIO: f64 = 4.0;

/// Per-second chase rate of the orbit target toward its latched terminal
/// in Free/Control.
const TARGET_CHASE_RATE: f64 = 3.0;

/// Per-second chase rate of yaw toward the drag bearing in Control.
const CONTROL_YAW_RATE: f64 = 2.0;

/// Downward view angle of the default home orbit.
const HOME_PITCH: f64 = -0.5;

/// View angle the Ultimate zoom settles into.
const ULTIMATE_PITCH: f64 = -0.3;

/// Radius shrink factor per step while Ultimate is still descending the
/// ladder.
const ULTIMATE_SHRINK: f64 = 0.85;

/// Geometric ease weight per step once Ultimate reaches the finest level.
const ULTIMATE_EASE: f64 = 0.02;

/// Near/far plane factors relative to the orbit radius.
const NEAR_FACTOR: f64 = 0.01;
const FAR_FACTOR: f64 = 2.0e3;

fn pitch_max() -> f64 {
    PITCH_LIMIT.asin()
}

/// Events emitted by the navigator, drained by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// The camera crossed to another hierarchy level.
    LevelChanged { from: usize, to: usize },
    /// The flight mode switched.
    ModeChanged { from: FlightMode, to: FlightMode },
}

/// The navigation state machine.
pub struct Navigator {
    pose: Transform,
    ladder: ScaleLadder,
    mode: FlightMode,
    snapshot: FlightSnapshot,
    /// Orbit target in current-level units.
    target: DVec3,
    pitch: f64,
    yaw: f64,
    /// Distance from eye to target in current-level units.
    radius: f64,
    /// Yaw rate in rad/s, damped every step.
    spin_speed: f64,
    /// Pitch rate in rad/s, damped every step.
    pitch_speed: f64,
    /// Zoom rate: radius is multiplied by `exp2(rate * dt)` each step.
    radius_speed: f64,
    /// Star-world position of the selected star, if any.
    selection: Option<DVec3>,
    events: Vec<NavEvent>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Create a navigator at the galaxy level's home orbit.
    pub fn new() -> Self {
        let mut nav = Self {
            pose: Transform::default(),
            ladder: ScaleLadder::new(),
            mode: FlightMode::Free,
            snapshot: FlightSnapshot::hold(HOME_PITCH, 0.0, HOME_RADIUS, DVec3::ZERO),
            target: DVec3::ZERO,
            pitch: HOME_PITCH,
            yaw: 0.0,
            radius: HOME_RADIUS,
            spin_speed: 0.0,
            pitch_speed: 0.0,
            radius_speed: 0.0,
            selection: None,
            events: Vec::new(),
        };
        nav.rebuild_pose();
        nav
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// Current camera pose in current-level units.
    pub fn pose(&self) -> &Transform {
        &self.pose
    }

    /// Current flight mode.
    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Active hierarchy level.
    pub fn level(&self) -> usize {
        self.ladder.level()
    }

    /// The scale ladder.
    pub fn ladder(&self) -> &ScaleLadder {
        &self.ladder
    }

    /// Orbit target in current-level units.
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Distance from eye to orbit target.
    pub fn target_distance(&self) -> f64 {
        self.radius
    }

    /// Star-world position of the current selection.
    pub fn selection(&self) -> Option<DVec3> {
        self.selection
    }

    /// Latch the selected star (star-world units). Goto/Jump fly here.
    pub fn set_selection(&mut self, world: DVec3) {
        self.selection = Some(world);
    }

    /// Convert a current-level position to star-world units.
    pub fn hierarchy_to_world(&self, pos: DVec3) -> DVec3 {
        rescale::hierarchy_to_world(&self.ladder, pos, self.ladder.level())
    }

    /// Convert a star-world position to current-level units.
    pub fn world_to_hierarchy(&self, pos: DVec3) -> DVec3 {
        rescale::world_to_hierarchy(&self.ladder, pos, self.ladder.level())
    }

    /// Eye position in star-world units.
    pub fn eye_world(&self) -> DVec3 {
        self.hierarchy_to_world(self.pose.position)
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Input-facing rate controls ─────────────────────────────────────

    /// Add yaw spin rate (rad/s).
    pub fn add_spin_rate(&mut self, dv: f64) {
        self.spin_speed += dv;
    }

    /// Add pitch rate (rad/s).
    pub fn add_pitch_rate(&mut self, dv: f64) {
        self.pitch_speed += dv;
    }

    /// Add zoom rate (log2 radius units per second; negative zooms in).
    pub fn add_zoom_rate(&mut self, dv: f64) {
        self.radius_speed += dv;
    }

    /// Aim the Control-mode drag at a hierarchy-local point: the target
    /// chases it and yaw eases toward its bearing.
    pub fn control_toward(&mut self, point: DVec3) {
        if self.mode != FlightMode::Control {
            return;
        }
        self.snapshot.terminal_target = point;
        if let Some((_, bearing_yaw)) = pitch_yaw_of(point - self.pose.position) {
            self.snapshot.terminal_yaw = bearing_yaw;
        }
    }

    // ── Mode transitions ───────────────────────────────────────────────

    /// Enter a flight mode. Captures an origin/terminal snapshot from the
    /// current pose and resets the mode clock; whatever the previous mode
    /// was mid-doing is abandoned.
    pub fn set_flight_mode(&mut self, mode: FlightMode) {
        // Read the origin angles back from the actual view direction so the
        // snapshot can never disagree with the pose.
        let look = self.target - self.pose.position;
        if let Some((p, y)) = pitch_yaw_of(look) {
            self.pitch = p;
            self.yaw = y;
        }

        let mut mode = mode;
        if matches!(mode, FlightMode::Goto | FlightMode::Jump) && self.selection.is_none() {
            if mode == FlightMode::Goto {
                log::debug!("goto requested without a selection; ignoring");
                return;
            }
            // Jump without a selection degrades to its home leg only.
            mode = FlightMode::Home;
        }

        let mut snap = FlightSnapshot::hold(self.pitch, self.yaw, self.radius, self.target);
        match mode {
            FlightMode::Free | FlightMode::Control => {}
            FlightMode::Home | FlightMode::Jump => {
                snap.terminal_pitch = HOME_PITCH;
                snap.radius_end = HOME_RADIUS;
                snap.terminal_target = DVec3::ZERO;
            }
            FlightMode::Goto => {
                // Checked above; defensive unwrap-free read.
                let Some(world) = self.selection else { return };
                let dest = self.world_to_hierarchy(world);
                snap.terminal_target = dest;
                snap.radius_end = ARRIVAL_RADIUS;
                if let Some((p, y)) = pitch_yaw_of(dest - self.pose.position) {
                    snap.terminal_pitch = p.clamp(-pitch_max(), pitch_max());
                    snap.terminal_yaw = y;
                }
            }
            FlightMode::Ultimate => {
                snap.terminal_pitch = ULTIMATE_PITCH;
            }
        }

        let distance = (snap.terminal_target - snap.origin_target).length()
            + (snap.radius_end - snap.radius_start).abs();
        snap.params = BlendParams::for_distance(distance, mode);

        if matches!(
            mode,
            FlightMode::Goto | FlightMode::Home | FlightMode::Jump | FlightMode::Ultimate
        ) {
            self.spin_speed = 0.0;
            self.pitch_speed = 0.0;
            self.radius_speed = 0.0;
        }

        self.events.push(NavEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
        self.snapshot = snap;
    }

    // ── Per-step update ────────────────────────────────────────────────

    /// Advance one fixed simulation step.
    pub fn step(&mut self, dt: f64, render: &mut dyn RenderSurface) {
        if dt <= 0.0 {
            return;
        }
        match self.mode {
            FlightMode::Free | FlightMode::Control => self.step_orbit(dt),
            FlightMode::Goto | FlightMode::Home | FlightMode::Jump => self.step_flight(dt),
            FlightMode::Ultimate => self.step_ultimate(dt),
        }
        // Radius crossings are evaluated exactly once per step, after the
        // mode update, so a single oversized dt can never skip levels.
        self.check_crossing(render);
        self.rebuild_pose();
    }

    fn step_orbit(&mut self, dt: f64) {
        self.yaw += self.spin_speed * dt;
        self.pitch += self.pitch_speed * dt;
        self.radius *= (self.radius_speed * dt).exp2();

        let damp = (-dt * WEAK_RATIO).exp2();
        self.spin_speed *= damp;
        self.pitch_speed *= damp;
        self.radius_speed *= damp;

        self.pitch = self.pitch.clamp(-pitch_max(), pitch_max());

        if self.mode == FlightMode::Control {
            let chase = (CONTROL_YAW_RATE * dt).min(1.0);
            self.yaw += wrap_angle(self.snapshot.terminal_yaw - self.yaw) * chase;
        }

        let t = (TARGET_CHASE_RATE * dt).min(1.0);
        self.target = self.target.lerp(self.snapshot.terminal_target, t);

        self.radius = self.radius.clamp(MIN_ORBIT_RADIUS, MAX_ORBIT_DISTANCE);
    }

    fn step_flight(&mut self, dt: f64) {
        self.snapshot.elapsed += dt;
        let snap = self.snapshot;
        let duration = snap.params.duration.max(1e-6);
        let u = snap.elapsed / duration;
        let m = snap.params.progress(snap.elapsed);

        self.radius = blend::lerp(snap.radius_start, snap.radius_end, m);
        self.pitch = blend::lerp(snap.origin_pitch, snap.terminal_pitch, m);
        self.yaw = snap.origin_yaw + wrap_angle(snap.terminal_yaw - snap.origin_yaw) * m;
        // Target position uses the symmetric ramp, not the fmix profile.
        self.target = snap
            .origin_target
            .lerp(snap.terminal_target, blend::smoothstep(u));

        // Radius arrival only makes sense when the flight is shrinking the
        // orbit; a Goto starting inside the arrival radius runs its clock.
        let arrived = self.mode == FlightMode::Goto
            && snap.radius_start > snap.radius_end
            && self.radius <= snap.radius_end * 1.01;
        if snap.elapsed >= duration || arrived {
            self.finish_flight();
        }
    }

    fn finish_flight(&mut self) {
        // Land exactly on the terminal values; an early radius-arrival can
        // otherwise leave a sliver of residual blend.
        let snap = self.snapshot;
        self.radius = snap.radius_end;
        self.pitch = snap.terminal_pitch;
        self.yaw = snap.origin_yaw + wrap_angle(snap.terminal_yaw - snap.origin_yaw);
        self.target = snap.terminal_target;
        match self.mode {
            FlightMode::Jump => {
                // Home leg done; chain straight into the Goto leg.
                self.set_flight_mode(FlightMode::Goto);
            }
            _ => self.set_flight_mode(FlightMode::Free),
        }
    }

    fn step_ultimate(&mut self, dt: f64) {
        self.snapshot.elapsed += dt;
        let snap = self.snapshot;
        let m = snap.params.progress(snap.elapsed);
        self.pitch = blend::lerp(snap.origin_pitch, snap.terminal_pitch, m);
        self.yaw = snap.origin_yaw + wrap_angle(snap.terminal_yaw - snap.origin_yaw) * m;

        if self.ladder.level() < FINEST_LEVEL {
            // Still descending: shrink the radius until the min-radius
            // crossing carries us down a level.
            self.radius = (self.radius * ULTIMATE_SHRINK).max(MIN_ORBIT_RADIUS);
        } else {
            self.radius =
                self.radius * (1.0 - ULTIMATE_EASE) + ULTIMATE_RADIUS * ULTIMATE_EASE;
            let settled = (self.radius - ULTIMATE_RADIUS).abs() < ULTIMATE_RADIUS * 0.01;
            if settled && snap.elapsed >= snap.params.duration {
                self.set_flight_mode(FlightMode::Free);
            }
        }
    }

    // ── Hierarchy crossing ─────────────────────────────────────────────

    fn check_crossing(&mut self, render: &mut dyn RenderSurface) {
        let from = self.ladder.level();
        if self.radius <= MIN_RADIUS {
            if self.ladder.go_finer(self.pose.position, self.target) {
                self.apply_crossing(from, from + 1, render);
            }
        } else if self.radius >= MAX_RADIUS {
            if self.ladder.go_coarser(self.pose.position, self.target) {
                self.apply_crossing(from, from - 1, render);
            }
        }
    }

    fn apply_crossing(&mut self, from: usize, to: usize, render: &mut dyn RenderSurface) {
        // Star-world positions are computed against the departing frame
        // before any origin re-anchoring.
        let world_target = rescale::hierarchy_to_world(&self.ladder, self.target, from);
        let world_origin =
            rescale::hierarchy_to_world(&self.ladder, self.snapshot.origin_target, from);
        let world_terminal =
            rescale::hierarchy_to_world(&self.ladder, self.snapshot.terminal_target, from);

        if to < from && to < GALAXY_LEVEL {
            // Zooming out into a free-origin frame: center it on the target
            // so cosmological coordinates stay small.
            self.ladder.set_origin_offset(to, world_target);
        }

        self.target = rescale::world_to_hierarchy(&self.ladder, world_target, to);
        self.snapshot.origin_target = rescale::world_to_hierarchy(&self.ladder, world_origin, to);
        self.snapshot.terminal_target =
            rescale::world_to_hierarchy(&self.ladder, world_terminal, to);

        let ratio = if to > from { UNIT_SCALE } else { 1.0 / UNIT_SCALE };
        self.radius *= ratio;
        self.snapshot.radius_start *= ratio;

        if to == GALAXY_LEVEL && to > from {
            // Arriving at the galaxy from cosmological scales: the terminal
            // orbit is the galaxy center.
            self.snapshot.terminal_target = DVec3::ZERO;
        }

        log::info!("hierarchy level {from} -> {to}");
        self.events.push(NavEvent::LevelChanged { from, to });
        self.push_near_far(render);
    }

    /// Recompute clip planes for the current orbit and push them to the
    /// renderer. Also called once at startup by the frame loop.
    pub fn push_near_far(&self, render: &mut dyn RenderSurface) {
        let near = (self.radius * NEAR_FACTOR).max(1e-4);
        let far = (self.radius * FAR_FACTOR).max(near * 1e4);
        render.set_near_far(near, far);
    }

    fn rebuild_pose(&mut self) {
        let dir = direction_from(self.pitch, self.yaw);
        let eye = self.target - dir * self.radius;
        self.pose.position = eye;
        // Pitch is clamped short of the pole, so the look-at basis is
        // always well formed with a Z up axis.
        self.pose.rotation =
            DQuat::from_mat4(&DMat4::look_at_rh(eye, self.target, DVec3::Z)).inverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    struct StubRender {
        near: f64,
        far: f64,
        set_calls: usize,
    }

    impl StubRender {
        fn new() -> Self {
            Self {
                near: 0.0,
                far: 0.0,
                set_calls: 0,
            }
        }
    }

    impl RenderSurface for StubRender {
        fn view_matrix(&self) -> DMat4 {
            DMat4::IDENTITY
        }
        fn projection_matrix(&self) -> DMat4 {
            DMat4::IDENTITY
        }
        fn viewport(&self) -> DVec2 {
            DVec2::new(1280.0, 720.0)
        }
        fn set_near_far(&mut self, near: f64, far: f64) {
            self.near = near;
            self.far = far;
            self.set_calls += 1;
        }
    }

    const DT: f64 = 0.05;

    fn level_changes(events: &[NavEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, NavEvent::LevelChanged { .. }))
            .count()
    }

    #[test]
    fn home_flight_settles_at_home_radius_and_returns_to_free() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.set_flight_mode(FlightMode::Home);
        let duration = nav.snapshot.params.duration;

        let steps = (duration / DT).ceil() as usize + 1;
        for _ in 0..steps {
            nav.step(DT, &mut render);
        }
        assert_eq!(nav.mode(), FlightMode::Free);
        assert!((nav.target_distance() - HOME_RADIUS).abs() < 1e-9);
        assert_eq!(nav.level(), GALAXY_LEVEL);
    }

    #[test]
    fn threshold_descent_scales_radius_by_unit_scale() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.radius = MIN_RADIUS * 10.0;
        nav.rebuild_pose();

        // One step at this rate drops the radius to ~0.44, through the
        // threshold.
        nav.add_zoom_rate(-70.0);
        nav.step(DT, &mut render);

        let events = nav.take_events();
        assert_eq!(level_changes(&events), 1);
        assert_eq!(nav.level(), GALAXY_LEVEL + 1);

        let crossed_radius = MIN_RADIUS * 10.0 * (-70.0 * DT).exp2();
        let expected = crossed_radius * UNIT_SCALE;
        assert!((nav.target_distance() / expected - 1.0).abs() < 1e-9);
    }

    #[test]
    fn goto_duration_saturates_with_distance() {
        let mut prev = 0.0;
        let mut durations = Vec::new();
        for exp in 0..10 {
            let d = 10.0_f64.powi(exp);
            let mut nav = Navigator::new();
            nav.set_selection(DVec3::new(d, 0.0, 0.0));
            nav.set_flight_mode(FlightMode::Goto);
            let duration = nav.snapshot.params.duration;
            assert!(duration >= prev);
            prev = duration;
            durations.push(duration);
        }
        // Near-minimum close in, bounded far out.
        assert!(durations[0] < 2.5);
        assert!(durations[9] <= 8.0 + 1e-9);
        assert!((durations[9] - durations[8]).abs() < 1e-6);
    }

    #[test]
    fn up_threshold_crossing_does_not_oscillate() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.radius = MAX_RADIUS;
        nav.rebuild_pose();

        nav.step(DT, &mut render);
        assert_eq!(level_changes(&nav.take_events()), 1);
        assert_eq!(nav.level(), GALAXY_LEVEL - 1);

        // No input: the following steps must not bounce back.
        for _ in 0..10 {
            nav.step(DT, &mut render);
            assert_eq!(level_changes(&nav.take_events()), 0);
            assert_eq!(nav.level(), GALAXY_LEVEL - 1);
        }
    }

    #[test]
    fn at_most_one_level_change_per_step() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.radius = MIN_RADIUS * 0.5;
        nav.rebuild_pose();

        // Even with an absurd dt the crossing check runs once.
        nav.step(10.0, &mut render);
        assert_eq!(level_changes(&nav.take_events()), 1);
    }

    #[test]
    fn pitch_clamp_bounds_view_vertical() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        for _ in 0..200 {
            nav.add_pitch_rate(50.0);
            nav.step(DT, &mut render);
            let dir = (nav.target() - nav.pose().position).normalize();
            assert!(dir.z.abs() <= PITCH_LIMIT + 1e-9);
        }
        for _ in 0..200 {
            nav.add_pitch_rate(-50.0);
            nav.step(DT, &mut render);
            let dir = (nav.target() - nav.pose().position).normalize();
            assert!(dir.z.abs() <= PITCH_LIMIT + 1e-9);
        }
    }

    #[test]
    fn crossing_down_and_back_restores_target_and_angles() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.target = DVec3::new(3.0, -2.0, 0.5);
        nav.snapshot.origin_target = nav.target;
        nav.snapshot.terminal_target = nav.target;
        let pitch = nav.pitch;
        let yaw = nav.yaw;

        nav.radius = MIN_RADIUS;
        nav.rebuild_pose();
        nav.step(DT, &mut render);
        assert_eq!(nav.level(), GALAXY_LEVEL + 1);

        nav.radius = MAX_RADIUS;
        nav.step(DT, &mut render);
        assert_eq!(nav.level(), GALAXY_LEVEL);

        assert!((nav.target() - DVec3::new(3.0, -2.0, 0.5)).length() < 1e-9);
        assert!((nav.pitch - pitch).abs() < 1e-9);
        assert!((nav.yaw - yaw).abs() < 1e-9);
    }

    #[test]
    fn goto_flies_to_selection_and_exits_free() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        let star = DVec3::new(800.0, 300.0, 10.0);
        nav.set_selection(star);
        nav.set_flight_mode(FlightMode::Goto);
        assert_eq!(nav.mode(), FlightMode::Goto);

        let duration = nav.snapshot.params.duration;
        let steps = (duration / DT).ceil() as usize + 1;
        for _ in 0..steps {
            nav.step(DT, &mut render);
        }
        assert_eq!(nav.mode(), FlightMode::Free);
        assert!((nav.target() - star).length() < 1e-6);
        assert!(nav.target_distance() <= ARRIVAL_RADIUS * 1.01 + 1e-9);
    }

    #[test]
    fn goto_without_selection_keeps_mode() {
        let mut nav = Navigator::new();
        nav.set_flight_mode(FlightMode::Goto);
        assert_eq!(nav.mode(), FlightMode::Free);
    }

    #[test]
    fn jump_chains_home_then_goto() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.set_selection(DVec3::new(500.0, 0.0, 0.0));
        nav.set_flight_mode(FlightMode::Jump);
        assert_eq!(nav.mode(), FlightMode::Jump);

        let home_leg = nav.snapshot.params.duration;
        let steps = (home_leg / DT).ceil() as usize + 1;
        for _ in 0..steps {
            nav.step(DT, &mut render);
        }
        assert_eq!(nav.mode(), FlightMode::Goto);

        for _ in 0..400 {
            nav.step(DT, &mut render);
        }
        assert_eq!(nav.mode(), FlightMode::Free);
    }

    #[test]
    fn ultimate_descends_to_finest_level_and_settles() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.set_flight_mode(FlightMode::Ultimate);

        for _ in 0..2000 {
            nav.step(DT, &mut render);
        }
        assert_eq!(nav.level(), FINEST_LEVEL);
        assert_eq!(nav.mode(), FlightMode::Free);
        assert!((nav.target_distance() - ULTIMATE_RADIUS).abs() < ULTIMATE_RADIUS * 0.02);
    }

    #[test]
    fn crossing_pushes_fresh_clip_planes() {
        let mut nav = Navigator::new();
        let mut render = StubRender::new();
        nav.radius = MIN_RADIUS;
        nav.rebuild_pose();
        nav.step(DT, &mut render);
        assert_eq!(render.set_calls, 1);
        assert!(render.near > 0.0);
        assert!(render.far > render.near);
    }

    #[test]
    fn mode_entry_emits_event_and_resets_clock() {
        let mut nav = Navigator::new();
        nav.set_flight_mode(FlightMode::Home);
        let events = nav.take_events();
        assert!(events.contains(&NavEvent::ModeChanged {
            from: FlightMode::Free,
            to: FlightMode::Home,
        }));
        assert_eq!(nav.snapshot.elapsed, 0.0);
    }
}
