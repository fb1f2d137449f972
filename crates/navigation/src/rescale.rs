//! Position conversion between hierarchy levels and star-world space.
//!
//! Star-world coordinates are galaxy-level (level 4) units about the galaxy
//! center; every star keeps a fixed star-world position no matter which
//! scale the camera occupies. The conversions here are the load-bearing
//! pieces: if the round trip through star-world drifts, repeated level
//! crossings visibly smear the whole sky.

use glam::DVec3;

use crate::ladder::{ScaleLadder, UNIT_SCALE};

/// Convert a position to the next coarser level's units (pure scale).
pub fn to_coarser(pos: DVec3) -> DVec3 {
    pos / UNIT_SCALE
}

/// Convert a position to the next finer level's units (pure scale).
pub fn to_finer(pos: DVec3) -> DVec3 {
    pos * UNIT_SCALE
}

/// Convert a hierarchy-local position at `level` to star-world units.
pub fn hierarchy_to_world(ladder: &ScaleLadder, pos: DVec3, level: usize) -> DVec3 {
    ladder.origin_offset(level) + pos / ladder.rel_scale(level)
}

/// Convert a star-world position into `level`'s local units.
pub fn world_to_hierarchy(ladder: &ScaleLadder, pos: DVec3, level: usize) -> DVec3 {
    (pos - ladder.origin_offset(level)) * ladder.rel_scale(level)
}

/// Re-express a position at a different level via star-world space.
///
/// With equal frame origins this reduces to the pure per-crossing scale
/// (`pos / UNIT_SCALE` one level coarser, `pos * UNIT_SCALE` one finer).
pub fn cross_level(ladder: &ScaleLadder, pos: DVec3, from: usize, to: usize) -> DVec3 {
    world_to_hierarchy(ladder, hierarchy_to_world(ladder, pos, from), to)
}
