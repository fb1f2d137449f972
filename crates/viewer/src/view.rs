//! The render-collaborator view: camera matrices and clip planes.
//!
//! The actual drawing pipeline lives elsewhere; navigation only needs the
//! matrices for picking and a sink for its per-level clip planes.

use glam::{DMat4, DVec2, DVec3};
use navigation::collab::RenderSurface;
use navigation::Navigator;

/// Vertical field of view in degrees.
const FOV_DEGREES: f64 = 60.0;

/// Camera matrices and viewport state exposed to the navigation core.
#[derive(Debug)]
pub struct View {
    width: u32,
    height: u32,
    near: f64,
    far: f64,
    view: DMat4,
}

impl View {
    /// Create a view for a window of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            near: 0.1,
            far: 1.0e6,
            view: DMat4::IDENTITY,
        }
    }

    /// Update viewport size (call on window resize).
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Rebuild the view matrix from the navigator's pose (call each frame).
    pub fn update(&mut self, nav: &Navigator) {
        let eye = nav.pose().position;
        self.view = DMat4::look_at_rh(eye, nav.target(), DVec3::Z);
    }

    /// Aspect ratio (width / height).
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Current clip planes.
    pub fn near_far(&self) -> (f64, f64) {
        (self.near, self.far)
    }
}

impl RenderSurface for View {
    fn view_matrix(&self) -> DMat4 {
        self.view
    }

    fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(FOV_DEGREES.to_radians(), self.aspect(), self.near, self.far)
    }

    fn viewport(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    fn set_near_far(&mut self, near: f64, far: f64) {
        self.near = near;
        self.far = far;
        log::debug!("clip planes near={near:.6} far={far:.1}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_near_far_updates_projection_inputs() {
        let mut view = View::new(1280, 720);
        view.set_near_far(0.5, 2.0e5);
        assert_eq!(view.near_far(), (0.5, 2.0e5));
    }

    #[test]
    fn zero_size_window_is_clamped() {
        let view = View::new(0, 0);
        assert!(view.aspect().is_finite());
    }

    #[test]
    fn view_matrix_follows_the_navigator() {
        let nav = Navigator::new();
        let mut view = View::new(800, 600);
        view.update(&nav);
        // The navigator's eye maps to the view-space origin.
        let eye = nav.pose().position;
        let at_origin = view.view_matrix().transform_point3(eye);
        assert!(at_origin.length() < 1e-9);
    }
}
