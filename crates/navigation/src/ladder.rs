//! The scale ladder: seven nested spatial scales the camera can occupy.
//!
//! Level 4 is the reference galaxy scale. Lower indices are coarser
//! (cosmological distances, one coordinate unit covers more space), higher
//! indices are finer (down to street view at level 6). Each level remembers
//! where the camera last was so returning to a scale feels continuous.

use glam::DVec3;

/// Number of hierarchy levels.
pub const LEVEL_COUNT: usize = 7;

/// The reference level: one unit here is one galaxy-map ("star-world") unit,
/// with the frame origin pinned to the galaxy center.
pub const GALAXY_LEVEL: usize = 4;

/// The finest level (street view).
pub const FINEST_LEVEL: usize = LEVEL_COUNT - 1;

/// Ratio between the units of two consecutive levels. Level scale factors
/// run from 1.0 at level 0 to 1e30 at level 6.
pub const UNIT_SCALE: f64 = 1e5;

/// Orbit radius at or below which the camera descends to the next finer
/// level.
pub const MIN_RADIUS: f64 = 0.5;

/// Orbit radius at or above which the camera ascends to the next coarser
/// level. `MAX_RADIUS / MIN_RADIUS` is 2e5: a crossing lands the radius
/// well inside the new level's band, so a transition can never bounce
/// straight back the following step. Do not narrow this ratio.
pub const MAX_RADIUS: f64 = 1e5;

/// Per-level bookkeeping.
#[derive(Debug, Clone, Copy)]
struct LevelSlot {
    /// Scale factor of this level: `UNIT_SCALE^index`.
    unit: f64,
    /// Camera eye position when this level was last left.
    last_eye: DVec3,
    /// Orbit target position when this level was last left.
    last_target: DVec3,
    /// Frame origin in star-world units. Always zero for levels >= 4
    /// (shared galaxy-center origin); coarser frames re-anchor freely.
    origin_offset: DVec3,
}

/// The fixed table of hierarchy levels plus the single active index.
///
/// Created once at startup and mutated only by level-change events.
#[derive(Debug, Clone)]
pub struct ScaleLadder {
    levels: [LevelSlot; LEVEL_COUNT],
    current: usize,
}

impl Default for ScaleLadder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleLadder {
    /// Create the ladder with seed units, starting at the galaxy level.
    pub fn new() -> Self {
        let mut levels = [LevelSlot {
            unit: 1.0,
            last_eye: DVec3::ZERO,
            last_target: DVec3::ZERO,
            origin_offset: DVec3::ZERO,
        }; LEVEL_COUNT];
        for (i, slot) in levels.iter_mut().enumerate() {
            slot.unit = UNIT_SCALE.powi(i as i32);
        }
        Self {
            levels,
            current: GALAXY_LEVEL,
        }
    }

    /// The single active level index.
    pub fn level(&self) -> usize {
        self.current
    }

    /// Scale factor of a level.
    pub fn unit(&self, level: usize) -> f64 {
        self.levels[level].unit
    }

    /// Units of `level` per star-world unit.
    pub fn rel_scale(&self, level: usize) -> f64 {
        UNIT_SCALE.powi(level as i32 - GALAXY_LEVEL as i32)
    }

    /// Eye position saved when `level` was last left.
    pub fn last_eye(&self, level: usize) -> DVec3 {
        self.levels[level].last_eye
    }

    /// Target position saved when `level` was last left.
    pub fn last_target(&self, level: usize) -> DVec3 {
        self.levels[level].last_target
    }

    /// Frame origin of `level` in star-world units.
    pub fn origin_offset(&self, level: usize) -> DVec3 {
        self.levels[level].origin_offset
    }

    /// Re-anchor a coarse frame. Ignored for levels >= 4, whose origin is
    /// pinned to the galaxy center.
    pub fn set_origin_offset(&mut self, level: usize, offset: DVec3) {
        if level < GALAXY_LEVEL {
            self.levels[level].origin_offset = offset;
        }
    }

    /// Move one level finer, saving the departing level's positions.
    /// Returns false at the bottom of the ladder; the caller stays put.
    pub fn go_finer(&mut self, eye: DVec3, target: DVec3) -> bool {
        if self.current >= FINEST_LEVEL {
            return false;
        }
        self.save_positions(eye, target);
        self.current += 1;
        true
    }

    /// Move one level coarser, saving the departing level's positions.
    /// Returns false at the top of the ladder; the caller stays put.
    pub fn go_coarser(&mut self, eye: DVec3, target: DVec3) -> bool {
        if self.current == 0 {
            return false;
        }
        self.save_positions(eye, target);
        self.current -= 1;
        true
    }

    fn save_positions(&mut self, eye: DVec3, target: DVec3) {
        self.levels[self.current].last_eye = eye;
        self.levels[self.current].last_target = target;
    }
}
