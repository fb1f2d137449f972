//! Maps pointer and key events onto navigator mode transitions and rate
//! changes.

use glam::{DVec2, DVec3};
use navigation::collab::{ContentProvider, RenderSurface};
use navigation::{FlightMode, Navigator, GALAXY_LEVEL};

use crate::{pick, InputState, MouseButton};

/// Two presses inside this window count as a double-click.
pub const DOUBLE_CLICK_SECONDS: f64 = 0.35;
/// Maximum cursor travel between the two presses, in pixels.
const DOUBLE_CLICK_SLOP: f64 = 6.0;

/// Spin rate added per pixel of horizontal drag (rad/s).
const SPIN_PER_PIXEL: f64 = 0.01;
/// Pitch rate added per pixel of vertical secondary drag (rad/s).
const PITCH_PER_PIXEL: f64 = 0.008;
/// Zoom rate added per pixel of vertical primary drag (log2 units/s).
const ZOOM_PER_PIXEL: f64 = 0.04;
/// Zoom rate impulse per scroll notch.
const SCROLL_ZOOM_RATE: f64 = 1.2;

/// Translates per-frame [`InputState`] into navigator commands.
pub struct NavMapper {
    sensitivity: f64,
    last_click_at: Option<f64>,
    last_click_pos: DVec2,
}

impl NavMapper {
    /// Create a mapper with a pointer sensitivity multiplier (1.0 =
    /// default).
    pub fn new(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            last_click_at: None,
            last_click_pos: DVec2::ZERO,
        }
    }

    /// Apply one frame of input. `now` is wall-clock seconds since start,
    /// used only for double-click detection.
    pub fn apply(
        &mut self,
        input: &InputState,
        nav: &mut Navigator,
        render: &dyn RenderSurface,
        content: &mut dyn ContentProvider,
        now: f64,
    ) {
        if input.is_recenter_pressed() {
            nav.set_flight_mode(FlightMode::Home);
        }
        if input.is_goto_pressed() {
            nav.set_flight_mode(FlightMode::Goto);
        }
        if input.is_jump_pressed() {
            nav.set_flight_mode(FlightMode::Jump);
        }
        if input.is_ultimate_pressed() {
            nav.set_flight_mode(FlightMode::Ultimate);
        }

        if input.is_mouse_pressed(MouseButton::Left) {
            nav.set_flight_mode(FlightMode::Control);
            self.handle_click(input.mouse_position().as_dvec2(), nav, render, content, now);
        }
        if input.is_mouse_released(MouseButton::Left) && nav.mode() == FlightMode::Control {
            nav.set_flight_mode(FlightMode::Free);
        }

        let delta = input.mouse_delta().as_dvec2() * self.sensitivity;
        if input.is_mouse_held(MouseButton::Left) {
            // Controlled drag: horizontal spins, vertical zooms, and the
            // target chases the dragged galaxy-plane point.
            nav.add_spin_rate(-delta.x * SPIN_PER_PIXEL);
            nav.add_zoom_rate(delta.y * ZOOM_PER_PIXEL);
            if let Some(point) =
                self.pick_plane(input.mouse_position().as_dvec2(), render)
            {
                nav.control_toward(point);
            }
        } else if input.is_mouse_held(MouseButton::Right) {
            // Secondary drag: plain orbit look.
            nav.add_spin_rate(-delta.x * SPIN_PER_PIXEL);
            nav.add_pitch_rate(-delta.y * PITCH_PER_PIXEL);
        }

        if input.is_scroll_up() {
            nav.add_zoom_rate(-SCROLL_ZOOM_RATE);
        }
        if input.is_scroll_down() {
            nav.add_zoom_rate(SCROLL_ZOOM_RATE);
        }
    }

    fn handle_click(
        &mut self,
        pos: DVec2,
        nav: &mut Navigator,
        render: &dyn RenderSurface,
        content: &mut dyn ContentProvider,
        now: f64,
    ) {
        let double = self.last_click_at.is_some_and(|t0| {
            now - t0 <= DOUBLE_CLICK_SECONDS
                && (pos - self.last_click_pos).length() <= DOUBLE_CLICK_SLOP
        });
        if double && nav.level() == GALAXY_LEVEL {
            self.try_select(pos, nav, render, content);
            self.last_click_at = None;
        } else {
            self.last_click_at = Some(now);
            self.last_click_pos = pos;
        }
    }

    /// Double-click on the galaxy: pick the plane point, hand it to the
    /// content side, and latch the chosen star for Goto/Jump.
    fn try_select(
        &mut self,
        screen: DVec2,
        nav: &mut Navigator,
        render: &dyn RenderSurface,
        content: &mut dyn ContentProvider,
    ) {
        let Some(hit) = self.pick_plane(screen, render) else {
            return;
        };
        let world = nav.hierarchy_to_world(hit);
        if content.select_at(world.truncate()) {
            nav.set_selection(content.current_star_world_pos());
            log::debug!("selected star at {:?}", nav.selection());
        }
    }

    fn pick_plane(&self, screen: DVec2, render: &dyn RenderSurface) -> Option<DVec3> {
        let (origin, dir) = pick::screen_to_ray(
            screen,
            render.viewport(),
            render.view_matrix(),
            render.projection_matrix(),
        )?;
        pick::intersect_z_plane(origin, dir)
    }
}
