//! Katalog für Sonder-Hardware (Arcade-Sticks, Adapter, Nachbauten)
//!
//! JSON-Datei mit einem Eintrag pro Controller:
//!
//! ```json
//! { "profiles": [ {
//!     "name": "arcade-stick",
//!     "guid": "03000000790000000600000000000000",
//!     "targets": ["retroarch"],
//!     "needs_activation": true,
//!     "mapping": { "south": "y", "west": ["b", "l2"] },
//!     "hotkeys": { "pause": "north" }
//! } ] }
//! ```

use crate::controller::device::normalize_guid;
use crate::controller::{Fingerprint, LogicalInput};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::profile::NativeToken;
use crate::mapping::BindingError;
use crate::target::Target;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Ein oder mehrere Tokens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum TokenList {
    One(String),
    Many(Vec<String>),
}

impl TokenList {
    fn tokens(&self) -> Vec<NativeToken> {
        match self {
            TokenList::One(token) => vec![NativeToken::new(token.as_str())],
            TokenList::Many(tokens) => tokens.iter().map(|t| NativeToken::new(t.as_str())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecialHardwareProfile {
    pub name: String,
    pub guid: String,
    /// Leer heißt: gilt für alle Ziele
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub needs_activation: bool,
    #[serde(default)]
    mapping: BTreeMap<LogicalInput, TokenList>,
    #[serde(default)]
    pub hotkeys: HashMap<HotkeyAction, LogicalInput>,
}

impl SpecialHardwareProfile {
    pub fn applies_to(&self, target: Target) -> bool {
        self.targets.is_empty() || self.targets.contains(&target)
    }

    /// Vergleicht beide Seiten normalisiert, auch XInput-Pseudo-GUIDs
    pub fn matches(&self, fingerprint: &Fingerprint) -> bool {
        normalize_guid(&self.guid) == normalize_guid(fingerprint.guid())
    }

    /// Darf das Profil mit den freigeschalteten Namen verwendet werden?
    pub fn is_active(&self, activated: &[String]) -> bool {
        !self.needs_activation || activated.iter().any(|name| name == &self.name)
    }

    pub fn mapping_overrides(&self) -> HashMap<LogicalInput, Vec<NativeToken>> {
        self.mapping
            .iter()
            .map(|(input, tokens)| (*input, tokens.tokens()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecialHardwareCatalog {
    #[serde(default)]
    profiles: Vec<SpecialHardwareProfile>,
}

impl SpecialHardwareCatalog {
    pub fn parse(text: &str, origin: &str) -> Result<Self, BindingError> {
        serde_json::from_str(text).map_err(|e| BindingError::CatalogLoadFailure {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, BindingError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| BindingError::CatalogLoadFailure {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        let catalog = Self::parse(&text, &origin)?;
        info!("Loaded {} special hardware profiles from {}", catalog.len(), origin);
        Ok(catalog)
    }

    /// Fehlende oder kaputte Kataloge ergeben einen leeren Katalog
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{}; continuing without special hardware profiles", e);
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Erstes Profil für Gerät und Ziel, unabhängig von der Freischaltung
    pub fn find(&self, fingerprint: &Fingerprint, target: Target) -> Option<&SpecialHardwareProfile> {
        self.profiles
            .iter()
            .find(|p| p.applies_to(target) && p.matches(fingerprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{DeviceDescriptor, InputTechnology};

    const CATALOG: &str = r#"{
        "profiles": [{
            "name": "arcade-stick",
            "guid": "03000000790000000600000000000000",
            "targets": ["retroarch"],
            "needs_activation": true,
            "mapping": { "south": "y", "west": ["b", "l2"] },
            "hotkeys": { "pause": "north" }
        }]
    }"#;

    fn stick() -> DeviceDescriptor {
        let mut device = DeviceDescriptor::new(InputTechnology::Sdl, 1);
        device.guid = "03000000790000000600000000000000".to_string();
        device
    }

    #[test]
    fn parses_single_and_multiple_tokens() {
        let catalog = SpecialHardwareCatalog::parse(CATALOG, "inline");
        let Ok(catalog) = catalog else {
            panic!("catalog should parse: {:?}", catalog.err());
        };
        let profile = catalog.find(&stick().fingerprint(), Target::RetroArch);
        let Some(profile) = profile else {
            panic!("profile expected");
        };
        let overrides = profile.mapping_overrides();
        assert_eq!(overrides[&LogicalInput::West].len(), 2);
        assert_eq!(profile.hotkeys[&HotkeyAction::Pause], LogicalInput::North);
        assert!(catalog.find(&stick().fingerprint(), Target::Dolphin).is_none());
    }

    #[test]
    fn activation_list_unlocks_profile() {
        let Ok(catalog) = SpecialHardwareCatalog::parse(CATALOG, "inline") else {
            panic!("catalog should parse");
        };
        let Some(profile) = catalog.find(&stick().fingerprint(), Target::RetroArch) else {
            panic!("profile expected");
        };
        assert!(!profile.is_active(&[]));
        assert!(profile.is_active(&["arcade-stick".to_string()]));
    }

    #[test]
    fn xinput_pad_matches_its_pseudo_guid() {
        let json = r#"{ "profiles": [{
            "name": "xpad",
            "guid": "78696e70757401000000000000000000"
        }] }"#;
        let Ok(catalog) = SpecialHardwareCatalog::parse(json, "inline") else {
            panic!("catalog should parse");
        };
        let pad = DeviceDescriptor::new(InputTechnology::XInput, 1);
        let found = catalog.find(&pad.fingerprint(), Target::Dolphin);
        assert_eq!(found.map(|p| p.name.as_str()), Some("xpad"));

        let mut wheel = pad.clone();
        wheel.xinput_subtype = 2;
        assert!(catalog.find(&wheel.fingerprint(), Target::Dolphin).is_none());
    }

    #[test]
    fn malformed_json_is_a_load_failure() {
        assert!(matches!(
            SpecialHardwareCatalog::parse("{ not json", "inline"),
            Err(BindingError::CatalogLoadFailure { .. })
        ));
    }
}
