//! Audio system using Kira: music track playback tied to stars.
//!
//! One track plays at a time (selecting a new star fades out the old one);
//! short UI sounds can overlap freely.

use anyhow::Result;
use engine_core::Vec3;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    spatial::{
        emitter::{EmitterHandle, EmitterSettings},
        listener::{ListenerHandle, ListenerSettings},
        scene::{SpatialSceneHandle, SpatialSceneSettings},
    },
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Fade-out applied to the previous track when a new star starts playing.
const TRACK_FADE_OUT: Duration = Duration::from_millis(600);

/// Main audio system managing music tracks and spatial sound.
pub struct AudioSystem {
    manager: AudioManager,
    spatial_scene: SpatialSceneHandle,
    listener: ListenerHandle,
    tracks: HashMap<String, StaticSoundData>,
    /// The currently playing star track, if any.
    current_track: Option<StaticSoundHandle>,
    /// Fire-and-forget sounds (UI blips etc.).
    active_sounds: Vec<StaticSoundHandle>,
}

impl AudioSystem {
    /// Create a new audio system.
    pub fn new() -> Result<Self> {
        let mut manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        let mut spatial_scene = manager.add_spatial_scene(SpatialSceneSettings::default())?;

        let listener = spatial_scene.add_listener(
            mint::Vector3 { x: 0.0, y: 0.0, z: 0.0 },
            mint::Quaternion { v: mint::Vector3 { x: 0.0, y: 0.0, z: 0.0 }, s: 1.0 },
            ListenerSettings::default(),
        )?;

        Ok(Self {
            manager,
            spatial_scene,
            listener,
            tracks: HashMap::new(),
            current_track: None,
            active_sounds: Vec::new(),
        })
    }

    /// Load a track from a file.
    pub fn load_track(&mut self, name: &str, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        self.tracks.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Load a track from bytes.
    pub fn load_track_from_bytes(&mut self, name: &str, data: &'static [u8]) -> Result<()> {
        let cursor = std::io::Cursor::new(data);
        let sound_data = StaticSoundData::from_cursor(cursor)?;
        self.tracks.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Whether a track with this name has been loaded.
    pub fn has_track(&self, name: &str) -> bool {
        self.tracks.contains_key(name)
    }

    /// Start a track as the current star's music, fading out whatever was
    /// playing before.
    pub fn play_track(&mut self, name: &str) -> Result<()> {
        let Some(sound_data) = self.tracks.get(name).cloned() else {
            log::warn!("Unknown track {:?}", name);
            return Ok(());
        };
        self.stop_current();
        let handle = self.manager.play(sound_data)?;
        self.current_track = Some(handle);
        Ok(())
    }

    /// Start a track positioned at a star, fading out the previous one.
    pub fn play_track_at(&mut self, name: &str, position: Vec3) -> Result<()> {
        let Some(sound_data) = self.tracks.get(name).cloned() else {
            log::warn!("Unknown track {:?}", name);
            return Ok(());
        };
        self.stop_current();
        let emitter = self.create_emitter(position)?;
        let settings = StaticSoundSettings::new().output_destination(&emitter);
        let handle = self.manager.play(sound_data.with_settings(settings))?;
        self.current_track = Some(handle);
        // The emitter handle is dropped but the sound keeps playing; a new
        // selection replaces the track anyway.
        Ok(())
    }

    /// Play a fire-and-forget sound with volume control.
    pub fn play_with_volume(&mut self, name: &str, volume: f64) -> Result<()> {
        if let Some(sound_data) = self.tracks.get(name) {
            let settings = StaticSoundSettings::new().volume(volume);
            let modified = sound_data.clone().with_settings(settings);
            let handle = self.manager.play(modified)?;
            self.active_sounds.push(handle);
        }
        Ok(())
    }

    /// Create a spatial emitter at a position.
    pub fn create_emitter(&mut self, position: Vec3) -> Result<EmitterHandle> {
        let emitter = self.spatial_scene.add_emitter(
            mint::Vector3 { x: position.x, y: position.y, z: position.z },
            EmitterSettings::default(),
        )?;
        Ok(emitter)
    }

    /// Whether a star track is currently audible.
    pub fn is_track_playing(&self) -> bool {
        self.current_track
            .as_ref()
            .is_some_and(|h| h.state() != kira::sound::PlaybackState::Stopped)
    }

    /// Update listener position and orientation (call each frame).
    pub fn update_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        // Compute orientation quaternion from forward and up vectors
        let right = forward.cross(up).normalize();
        let corrected_up = right.cross(forward).normalize();

        // Build rotation matrix and convert to quaternion
        let rotation = glam::Mat3::from_cols(right, corrected_up, -forward);
        let quat = glam::Quat::from_mat3(&rotation);

        self.listener.set_position(
            mint::Vector3 { x: position.x, y: position.y, z: position.z },
            Tween::default(),
        );
        self.listener.set_orientation(
            mint::Quaternion {
                v: mint::Vector3 { x: quat.x, y: quat.y, z: quat.z },
                s: quat.w,
            },
            Tween::default(),
        );
    }

    /// Clean up finished sounds.
    pub fn cleanup(&mut self) {
        self.active_sounds.retain(|handle| handle.state() != kira::sound::PlaybackState::Stopped);
        if let Some(handle) = &self.current_track {
            if handle.state() == kira::sound::PlaybackState::Stopped {
                self.current_track = None;
            }
        }
    }

    /// Stop everything, including the current track.
    pub fn stop_all(&mut self) {
        self.stop_current();
        for handle in &mut self.active_sounds {
            let _ = handle.stop(Tween::default());
        }
        self.active_sounds.clear();
    }

    /// Set master volume (0.0 to 1.0).
    pub fn set_master_volume(&mut self, volume: f64) {
        let _ = self.manager.main_track().set_volume(volume, Tween::default());
    }

    fn stop_current(&mut self) {
        if let Some(mut handle) = self.current_track.take() {
            let _ = handle.stop(Tween {
                duration: TRACK_FADE_OUT,
                ..Default::default()
            });
        }
    }
}

// Re-export for convenience
pub use kira;
