//! Spielmodi
//!
//! Ein Modus kommt entweder als Tag im ROM-Dateinamen (`Zelda [sideways].wbfs`)
//! oder als explizite Option. Beide landen im selben Enum; die Option gewinnt.

use crate::controller::LogicalInput;
use crate::mapping::profile::NativeToken;
use crate::target::{PeripheralType, Target};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, info};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Wiimote quer gehalten
    Sideways,
    #[serde(alias = "cc")]
    #[strum(to_string = "classic", serialize = "cc")]
    Classic,
    Nunchuk,
    #[serde(alias = "gc")]
    #[strum(to_string = "gamecube", serialize = "gc")]
    GameCube,
    Guitar,
    #[serde(alias = "lightgun")]
    #[strum(to_string = "gun", serialize = "lightgun")]
    Gun,
}

/// Quer gehaltene Wiimote: Steuerkreuz um 90° gedreht, 1 und 2 als Aktionstasten
const SIDEWAYS: &[(LogicalInput, &str)] = &[
    (LogicalInput::Up, "D-Pad/Left"),
    (LogicalInput::Down, "D-Pad/Right"),
    (LogicalInput::Left, "D-Pad/Down"),
    (LogicalInput::Right, "D-Pad/Up"),
    (LogicalInput::South, "Buttons/2"),
    (LogicalInput::West, "Buttons/1"),
    (LogicalInput::East, "Buttons/B"),
    (LogicalInput::North, "Buttons/A"),
];

impl GameMode {
    /// Sucht das erste bekannte `[tag]` im Dateinamen
    pub fn from_tag(rom: &str) -> Option<GameMode> {
        let name = Path::new(rom)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(rom);

        let mut rest = name;
        while let Some(start) = rest.find('[') {
            let after = &rest[start + 1..];
            let Some(end) = after.find(']') else {
                break;
            };
            if let Ok(mode) = GameMode::from_str(after[..end].trim()) {
                return Some(mode);
            }
            rest = &after[end + 1..];
        }
        None
    }

    pub fn from_option(option: &str) -> Option<GameMode> {
        GameMode::from_str(option.trim()).ok()
    }

    /// Wählt den Modus: explizite Option vor Dateinamen-Tag
    pub fn select(option: Option<&str>, rom: Option<&str>) -> Option<GameMode> {
        let explicit = option.and_then(GameMode::from_option);
        let tagged = rom.and_then(GameMode::from_tag);
        match (explicit, tagged) {
            (Some(mode), Some(tag)) if mode != tag => {
                info!("Mode option {} overrides filename tag {}", mode, tag);
                Some(mode)
            }
            (Some(mode), _) => Some(mode),
            (None, tag) => {
                if let Some(tag) = tag {
                    debug!("Mode {} taken from filename", tag);
                }
                tag
            }
        }
    }

    /// Peripherie, die der Modus verlangt
    pub fn peripheral(self) -> PeripheralType {
        match self {
            GameMode::Sideways => PeripheralType::Wiimote,
            GameMode::Classic => PeripheralType::Classic,
            GameMode::Nunchuk => PeripheralType::Nunchuk,
            GameMode::GameCube => PeripheralType::GameCube,
            GameMode::Guitar => PeripheralType::Guitar,
            GameMode::Gun => PeripheralType::LightGun,
        }
    }

    pub fn supports(self, target: Target) -> bool {
        match self {
            GameMode::Sideways | GameMode::Classic | GameMode::Nunchuk | GameMode::GameCube => {
                target == Target::Dolphin
            }
            GameMode::Guitar => target == Target::Pcsx2,
            GameMode::Gun => matches!(target, Target::Pcsx2 | Target::RetroArch),
        }
    }

    /// Einträge, die der Modus über das Profil legt
    pub fn overrides(self) -> HashMap<LogicalInput, Vec<NativeToken>> {
        let table: &[(LogicalInput, &str)] = match self {
            GameMode::Sideways => SIDEWAYS,
            _ => &[],
        };
        table
            .iter()
            .map(|(input, token)| (*input, vec![NativeToken::from(*token)]))
            .collect()
    }
}
