//! Transform component and utilities for spatial positioning.
//!
//! Everything is double precision: camera coordinates span roughly 30 orders
//! of magnitude across the hierarchy, far beyond what f32 can hold.

use glam::{DMat4, DQuat, DVec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: DVec3, rotation: DQuat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> DVec3 {
        self.rotation * -DVec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: DVec3) {
        self.position += delta;
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f64) {
        self.rotation = DQuat::from_rotation_y(angle) * self.rotation;
    }

    /// Rotate around the local X axis (pitch).
    pub fn rotate_x(&mut self, angle: f64) {
        self.rotation = self.rotation * DQuat::from_rotation_x(angle);
    }

    /// Look at a target position. No-op when the target coincides with the
    /// transform position (degenerate direction).
    pub fn look_at(&mut self, target: DVec3, up: DVec3) {
        let to_target = target - self.position;
        if to_target.length_squared() > 1e-12 {
            self.rotation =
                DQuat::from_mat4(&DMat4::look_at_rh(self.position, target, up)).inverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_is_negative_z_by_default() {
        let t = Transform::default();
        assert!((t.forward() - (-DVec3::Z)).length() < 1e-12);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(DVec3::new(0.0, 0.0, 10.0));
        t.look_at(DVec3::ZERO, DVec3::Y);
        let dir = t.forward();
        assert!((dir - (-DVec3::Z)).length() < 1e-9);
    }

    #[test]
    fn look_at_degenerate_target_is_noop() {
        let mut t = Transform::from_position(DVec3::new(1.0, 2.0, 3.0));
        let before = t.rotation;
        t.look_at(t.position, DVec3::Y);
        assert_eq!(t.rotation, before);
    }
}
