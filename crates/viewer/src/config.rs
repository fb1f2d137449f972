//! Viewer configuration (window, input, audio, galaxy). Loaded from
//! config.ron at startup.

use serde::{Deserialize, Serialize};

/// Persistent viewer settings. Loaded from `config.ron` in the current
/// directory (or next to the binary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Pointer sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// Master audio volume, 0.0 to 1.0.
    #[serde(default = "default_volume")]
    pub master_volume: f64,
    /// Seed for the procedural galaxy.
    #[serde(default = "default_galaxy_seed")]
    pub galaxy_seed: u64,
    /// Number of stars to place.
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Directory scanned for music tracks.
    #[serde(default = "default_music_dir")]
    pub music_dir: String,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_sensitivity() -> f64 {
    1.0
}
fn default_volume() -> f64 {
    0.8
}
fn default_galaxy_seed() -> u64 {
    20_977
}
fn default_star_count() -> usize {
    2000
}
fn default_music_dir() -> String {
    "music".to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            sensitivity: default_sensitivity(),
            master_volume: default_volume(),
            galaxy_seed: default_galaxy_seed(),
            star_count: default_star_count(),
            music_dir: default_music_dir(),
        }
    }
}

impl ViewerConfig {
    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ViewerConfig = ron::from_str("(star_count: 64)").unwrap();
        assert_eq!(config.star_count, 64);
        assert_eq!(config.window_width, default_window_width());
        assert!((config.master_volume - default_volume()).abs() < 1e-12);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = ViewerConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let back: ViewerConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.galaxy_seed, config.galaxy_seed);
        assert_eq!(back.music_dir, config.music_dir);
    }
}
