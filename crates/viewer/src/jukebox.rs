//! The content collaborator: star selection backed by the music library.

use audio::AudioSystem;
use galaxy::{MusicGalaxy, StarEntry};
use glam::{DVec2, DVec3, Vec3};
use navigation::collab::ContentProvider;

/// How close (star-world units) a galaxy-plane click must land to a star.
pub const SELECT_RADIUS: f64 = 50.0;

/// Binds the procedural star field to loaded music tracks. Audio is
/// optional so the viewer still flies on machines without an output
/// device.
pub struct StarJukebox {
    galaxy: MusicGalaxy,
    audio: Option<AudioSystem>,
    /// Track names registered with the audio system, indexed by
    /// `StarEntry::track` (modulo length).
    track_names: Vec<String>,
    current: Option<usize>,
}

impl StarJukebox {
    pub fn new(galaxy: MusicGalaxy, audio: Option<AudioSystem>, track_names: Vec<String>) -> Self {
        Self {
            galaxy,
            audio,
            track_names,
            current: None,
        }
    }

    /// The star field.
    pub fn galaxy(&self) -> &MusicGalaxy {
        &self.galaxy
    }

    /// The currently selected star, if any.
    pub fn current_star(&self) -> Option<&StarEntry> {
        self.current.and_then(|i| self.galaxy.star(i))
    }

    /// Keep the audio listener glued to the camera. Positions are
    /// hierarchy-local; callers skip the update when coordinates exceed
    /// f32 range at coarse levels.
    pub fn update_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        if let Some(audio) = &mut self.audio {
            audio.update_listener(position, forward, up);
        }
    }

    /// Reap finished sounds (call each frame).
    pub fn cleanup(&mut self) {
        if let Some(audio) = &mut self.audio {
            audio.cleanup();
        }
    }

    fn track_name_for(&self, star: &StarEntry) -> Option<&str> {
        if self.track_names.is_empty() {
            return None;
        }
        let idx = star.track % self.track_names.len();
        self.track_names.get(idx).map(String::as_str)
    }
}

impl ContentProvider for StarJukebox {
    fn select_at(&mut self, world: DVec2) -> bool {
        let probe = DVec3::new(world.x, world.y, 0.0);
        let Some((idx, dist)) = self.galaxy.nearest_star(probe) else {
            return false;
        };
        if dist > SELECT_RADIUS {
            return false;
        }
        self.current = Some(idx);
        let star = self.galaxy.stars[idx].clone();
        log::info!("Selected star {:?} at {:.1?}", star.name, star.position);

        if let Some(name) = self.track_name_for(&star).map(str::to_owned) {
            if let Some(audio) = &mut self.audio {
                if let Err(e) = audio.play_track_at(&name, star.position.as_vec3()) {
                    log::warn!("Could not play {:?}: {}", name, e);
                }
            }
        }
        true
    }

    fn current_star_world_pos(&self) -> DVec3 {
        self.current_star().map(|s| s.position).unwrap_or(DVec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jukebox() -> StarJukebox {
        let galaxy = MusicGalaxy::generate(11, 100, 5);
        StarJukebox::new(galaxy, None, Vec::new())
    }

    #[test]
    fn click_near_a_star_selects_it() {
        let mut jb = jukebox();
        let star_pos = jb.galaxy().stars[3].position;
        assert!(jb.select_at(star_pos.truncate()));
        let current = jb.current_star().unwrap().position;
        assert!((current.truncate() - star_pos.truncate()).length() <= SELECT_RADIUS);
        assert_eq!(jb.current_star_world_pos(), current);
    }

    #[test]
    fn click_far_from_any_star_fails() {
        let mut jb = jukebox();
        assert!(!jb.select_at(DVec2::new(1.0e5, -1.0e5)));
        assert!(jb.current_star().is_none());
        assert_eq!(jb.current_star_world_pos(), DVec3::ZERO);
    }
}
