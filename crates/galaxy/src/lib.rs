//! Procedural music galaxy: star placement and the star-to-track mapping.
//!
//! Star-world coordinates: the galaxy disc lies in the x-y plane with z as
//! the thin axis, centered on the origin. Every star carries the index of
//! the library track it plays.

pub mod starfield;

pub use starfield::{MusicGalaxy, StarEntry};
