//! Sitzungskonfiguration (TOML)
//!
//! ```toml
//! target = "dolphin"
//! rom = "/roms/wii/Zelda [sideways].wbfs"
//! locale = "fr-FR"
//! gamecontrollerdb = "/usr/share/padbind/gamecontrollerdb.txt"
//!
//! [[device]]
//! technology = "xinput"
//! player_index = 1
//! ```

use crate::controller::DeviceDescriptor;
use crate::mapping::engine::SessionOptions;
use crate::mapping::keyboard::KeyboardLayout;
use crate::mapping::mode::GameMode;
use crate::mapping::sdl::CommunityDatabase;
use crate::mapping::special::SpecialHardwareCatalog;
use crate::mapping::BindingError;
use crate::target::{PeripheralType, Target};
use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = ".config/padbind";
const SESSION_FILE: &str = "session.toml";

/// Maximale Anzahl gleichzeitiger Spieler
pub const MAX_PLAYERS: u8 = 8;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub target: Target,
    pub peripheral: Option<PeripheralType>,
    /// Expliziter Spielmodus; hat Vorrang vor dem Tag im ROM-Namen
    pub mode: Option<String>,
    pub rom: Option<String>,
    pub locale: Option<String>,
    pub nintendo_layout: bool,
    pub invert_mouse_buttons: bool,
    pub activated_profiles: Vec<String>,
    /// Plattformfilter für die Community-Datenbank
    pub platform: Option<String>,
    pub gamecontrollerdb: Option<PathBuf>,
    pub special_catalog: Option<PathBuf>,
    #[serde(rename = "device")]
    pub devices: Vec<DeviceDescriptor>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: Target::RetroArch,
            peripheral: None,
            mode: None,
            rom: None,
            locale: None,
            nintendo_layout: false,
            invert_mouse_buttons: false,
            activated_profiles: Vec::new(),
            platform: None,
            gamecontrollerdb: None,
            special_catalog: None,
            devices: Vec::new(),
        }
    }
}

fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}

impl SessionConfig {
    /// `~/.config/padbind/session.toml`
    pub fn default_path() -> PathBuf {
        let mut path = get_home_dir();
        path.push(CONFIG_DIR);
        path.push(SESSION_FILE);
        path
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| eyre!("Failed to parse session config: {}", e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid session config: {}", e))?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading session config from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read session config {}: {}", path.display(), e))?;
        let config = Self::from_toml(&content)?;
        info!(
            "Session for {} with {} devices loaded",
            config.target,
            config.devices.len()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize session config: {}", e))?;
        fs::write(path, content).map_err(|e| eyre!("Failed to write session config: {}", e))?;
        Ok(())
    }

    /// Legt eine Standardkonfiguration an, falls noch keine existiert
    pub fn ensure_default(path: &Path) -> Result<()> {
        if path.exists() {
            debug!("Session config {} already exists", path.display());
            return Ok(());
        }
        info!("Creating default session config at {}", path.display());
        Self::default().save(path)
    }

    /// Spielerplätze müssen 1..=8 und eindeutig sein
    pub fn validate(&self) -> Result<(), BindingError> {
        let mut seen = HashSet::new();
        for device in &self.devices {
            let player = device.player_index;
            if player == 0 || player > MAX_PLAYERS {
                return Err(BindingError::ConfigError(format!(
                    "player_index {} outside 1..={}",
                    player, MAX_PLAYERS
                )));
            }
            if !seen.insert(player) {
                return Err(BindingError::ConfigError(format!(
                    "player_index {} assigned twice",
                    player
                )));
            }
        }
        if let Some(mode) = &self.mode {
            if GameMode::from_option(mode).is_none() {
                return Err(BindingError::ConfigError(format!("unknown mode {}", mode)));
            }
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        let layout = self
            .locale
            .as_deref()
            .map(KeyboardLayout::from_locale)
            .unwrap_or_default();
        SessionOptions {
            target: self.target,
            peripheral: self.peripheral,
            mode: GameMode::select(self.mode.as_deref(), self.rom.as_deref()),
            layout,
            nintendo_layout: self.nintendo_layout,
            invert_mouse_buttons: self.invert_mouse_buttons,
            activated_profiles: self.activated_profiles.clone(),
        }
    }

    pub fn load_database(&self) -> CommunityDatabase {
        match &self.gamecontrollerdb {
            Some(path) => CommunityDatabase::load_or_empty(path, self.platform.as_deref()),
            None => {
                debug!("No community database configured");
                CommunityDatabase::default()
            }
        }
    }

    pub fn load_catalog(&self) -> SpecialHardwareCatalog {
        match &self.special_catalog {
            Some(path) => SpecialHardwareCatalog::load_or_empty(path),
            None => SpecialHardwareCatalog::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputTechnology;

    const SESSION: &str = r#"
        target = "dolphin"
        rom = "Zelda [sideways].wbfs"
        locale = "fr_FR"

        [[device]]
        technology = "xinput"
        player_index = 1

        [[device]]
        technology = "sdl"
        guid = "030000005e0400008e02000014010000"
        name = "Pad"
        player_index = 2
    "#;

    #[test]
    fn parses_devices_and_options() {
        let config = SessionConfig::from_toml(SESSION);
        let Ok(config) = config else {
            panic!("config should parse: {:?}", config.err());
        };
        assert_eq!(config.target, Target::Dolphin);
        assert_eq!(config.devices.len(), 2);
        assert_eq!(config.devices[1].technology, InputTechnology::Sdl);

        let options = config.session_options();
        assert_eq!(options.mode, Some(GameMode::Sideways));
        assert_eq!(options.layout, KeyboardLayout::Azerty);
    }

    #[test]
    fn duplicate_players_are_rejected() {
        let mut config = SessionConfig::default();
        config.devices = vec![
            DeviceDescriptor::new(InputTechnology::XInput, 1),
            DeviceDescriptor::new(InputTechnology::Keyboard, 1),
        ];
        assert!(matches!(config.validate(), Err(BindingError::ConfigError(_))));
    }

    #[test]
    fn player_nine_is_rejected() {
        let mut config = SessionConfig::default();
        config.devices = vec![DeviceDescriptor::new(InputTechnology::XInput, 9)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_tables_degrade_to_empty() {
        let mut config = SessionConfig::default();
        config.gamecontrollerdb = Some(PathBuf::from("/nonexistent/gamecontrollerdb.txt"));
        config.special_catalog = Some(PathBuf::from("/nonexistent/special.json"));
        assert!(config.load_database().is_empty());
        assert!(config.load_catalog().is_empty());
    }
}
