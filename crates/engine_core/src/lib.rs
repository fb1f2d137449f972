//! Core engine types and utilities for Musicverse.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Double-precision transform for the huge-scale camera
//! - Time management with fixed-step draining
//! - The mix/blend curves every smooth transition is built on

pub mod blend;
pub mod time;
pub mod transform;

pub use blend::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, Vec2, Vec3};
