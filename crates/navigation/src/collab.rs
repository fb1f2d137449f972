//! Collaborator traits the navigation core consumes.
//!
//! The core never touches a graphics or audio toolkit directly; it talks to
//! whatever sits behind these seams. Handles are injected, not found
//! through globals.

use glam::{DMat4, DVec2, DVec3};

/// The rendering side: camera matrices out, clip planes in.
pub trait RenderSurface {
    /// Current view matrix.
    fn view_matrix(&self) -> DMat4;
    /// Current projection matrix.
    fn projection_matrix(&self) -> DMat4;
    /// Viewport size in physical pixels (width, height).
    fn viewport(&self) -> DVec2;
    /// Update near/far clip planes. Called after every hierarchy change to
    /// keep depth precision across the scale range.
    fn set_near_far(&mut self, near: f64, far: f64);
}

/// The audio/content side: star selection and the currently playing star.
pub trait ContentProvider {
    /// Select the content nearest to a star-world galaxy-plane position.
    /// Returns false when nothing is close enough.
    fn select_at(&mut self, world: DVec2) -> bool;
    /// Star-world position of the currently selected star.
    fn current_star_world_pos(&self) -> DVec3;
}
