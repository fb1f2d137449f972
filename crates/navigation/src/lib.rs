//! Hierarchical space-rescaling camera navigation.
//!
//! The camera in Musicverse crosses roughly 30 orders of magnitude, from a
//! street-level view of a single star's neighborhood out to cosmological
//! distances. No single coordinate frame survives that span, so the camera
//! lives on a ladder of seven nested scales and is rescaled whenever its
//! orbit radius leaves the current level's band. This crate owns that
//! machinery:
//!
//! - [`ladder`]: the scale ladder and its crossing thresholds
//! - [`rescale`]: drift-free conversion between levels and star-world space
//! - [`flight`]: flight modes and per-transition snapshots
//! - [`navigator`]: the per-step state machine driving the camera pose
//! - [`collab`]: the seams to the renderer and the audio/content side

pub mod collab;
pub mod flight;
pub mod ladder;
pub mod navigator;
pub mod rescale;

pub use collab::{ContentProvider, RenderSurface};
pub use flight::{BlendParams, FlightMode, FlightSnapshot};
pub use ladder::{ScaleLadder, FINEST_LEVEL, GALAXY_LEVEL, LEVEL_COUNT, MAX_RADIUS, MIN_RADIUS, UNIT_SCALE};
pub use navigator::{NavEvent, Navigator, ARRIVAL_RADIUS, HOME_RADIUS, PITCH_LIMIT, ULTIMATE_RADIUS};
