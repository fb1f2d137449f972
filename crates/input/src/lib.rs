//! Input handling for keyboard and mouse, and the mapping onto navigation.

pub mod mapper;
pub mod pick;

pub use mapper::NavMapper;

use glam::Vec2;
use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (drained into `mouse_delta` each frame).
    accumulated_delta: Vec2,

    /// Mouse scroll state
    scroll_up: bool,
    scroll_down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
        self.scroll_up = false;
        self.scroll_down = false;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    // Navigation bindings

    /// Check if the recenter key was pressed (H — fly home).
    pub fn is_recenter_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyH)
    }

    /// Check if the goto key was pressed (G — fly to the selected star).
    pub fn is_goto_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyG)
    }

    /// Check if the jump key was pressed (J — home, then fly to selection).
    pub fn is_jump_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyJ)
    }

    /// Check if the ultimate-zoom key was pressed (U).
    pub fn is_ultimate_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyU)
    }

    /// Set scroll up state.
    pub fn set_scroll_up(&mut self) {
        self.scroll_up = true;
    }

    /// Set scroll down state.
    pub fn set_scroll_down(&mut self) {
        self.scroll_down = true;
    }

    /// Check if scrolled up this frame.
    pub fn is_scroll_up(&self) -> bool {
        self.scroll_up
    }

    /// Check if scrolled down this frame.
    pub fn is_scroll_down(&self) -> bool {
        self.scroll_down
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_one_frame_only() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyH, ElementState::Pressed);
        assert!(input.is_recenter_pressed());
        assert!(input.is_key_held(KeyCode::KeyH));

        input.begin_frame();
        assert!(!input.is_recenter_pressed());
        assert!(input.is_key_held(KeyCode::KeyH));
    }

    #[test]
    fn mouse_delta_drains_accumulated_motion() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -2.0));
        input.process_mouse_motion((1.0, 1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(4.0, -1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }
}
