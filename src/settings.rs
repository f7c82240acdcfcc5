//! Player preferences
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to defaults so
//! older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Kill sound volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Intro/outro and background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "jeet_shredder_settings";

    /// Clamp volumes into range (hand-edited storage can hold anything)
    pub fn sanitized(mut self) -> Self {
        for vol in [
            &mut self.master_volume,
            &mut self.sfx_volume,
            &mut self.music_volume,
        ] {
            *vol = if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 1.0 };
        }
        self
    }

    /// Effective kill sound volume
    pub fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn effective_music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        match store.set_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
