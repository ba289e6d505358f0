//! Zielplattformen (Emulatoren) und ihre Mapping-Tabellen
//!
//! Jedes Ziel ist ein Modul mit denselben Funktionen; [`Target`] verteilt per
//! `match`, sodass ein fehlender Fall beim Kompilieren auffällt.

pub mod dolphin;
pub mod model2;
pub mod pcsx2;
pub mod retroarch;

use crate::controller::DeviceDescriptor;
use crate::mapping::encoder::{Encoded, NativeBinding};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::identity::DeviceIdentity;
use crate::mapping::keyboard::{KeyNumbering, KeyToken};
use crate::mapping::mouse::GunButtonRoles;
use crate::mapping::profile::{MappingProfile, NativeToken, ReverseAxisTable};
use crate::mapping::sdl::HatMode;
use crate::mapping::BindingError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Unterstützte Ziele
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    Dolphin,
    RetroArch,
    Pcsx2,
    Model2,
}

/// Emulierte Peripherie
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PeripheralType {
    Gamepad,
    #[serde(rename = "gamecube", alias = "gc")]
    #[strum(to_string = "gamecube", serialize = "gc")]
    GameCube,
    #[serde(alias = "cc")]
    #[strum(to_string = "classic", serialize = "cc")]
    Classic,
    Wiimote,
    Nunchuk,
    Guitar,
    #[serde(rename = "lightgun", alias = "gun")]
    #[strum(to_string = "lightgun", serialize = "gun")]
    LightGun,
}

/// Syntax, in der ein Ziel Tastenkombinationen erwartet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordSyntax {
    /// Ein Ausdruck mit UND/ODER, z.B. `` `Back`&`Button Y`|`F2` ``
    Expression { and: &'static str, or: &'static str },
    /// Pad-Kombination und Tastatur als getrennte Werte desselben Pfads
    Listed { and: &'static str },
    /// Eigener Eintrag für die Hotkey-Freigabe, pro Aktion nur die zweite Taste
    Split { enable: &'static str },
}

/// Alles, was ein Ziel über ein Gerät wissen muss
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext<'a> {
    pub device: &'a DeviceDescriptor,
    pub identity: &'a DeviceIdentity,
    pub peripheral: PeripheralType,
}

impl DeviceContext<'_> {
    pub fn player(&self) -> u8 {
        self.device.player_index
    }
}

impl Target {
    /// Peripherie, die das Ziel ohne Angabe verwendet
    pub fn default_peripheral(self) -> PeripheralType {
        match self {
            Target::Dolphin => PeripheralType::GameCube,
            Target::RetroArch | Target::Pcsx2 | Target::Model2 => PeripheralType::Gamepad,
        }
    }

    /// Basisprofil für eine Peripherie
    pub fn profile(self, peripheral: PeripheralType) -> Result<MappingProfile, BindingError> {
        let profile = match self {
            Target::Dolphin => dolphin::profile(peripheral),
            Target::RetroArch => retroarch::profile(peripheral),
            Target::Pcsx2 => pcsx2::profile(peripheral),
            Target::Model2 => model2::profile(peripheral),
        };
        profile.ok_or_else(|| BindingError::UnsupportedPeripheral {
            target: self.to_string(),
            peripheral: peripheral.to_string(),
        })
    }

    pub fn reverse_axes(self, peripheral: PeripheralType) -> ReverseAxisTable {
        match self {
            Target::Dolphin => dolphin::reverse_axes(peripheral),
            Target::RetroArch => retroarch::reverse_axes(peripheral),
            Target::Pcsx2 => pcsx2::reverse_axes(peripheral),
            Target::Model2 => model2::reverse_axes(peripheral),
        }
    }

    pub fn key_numbering(self) -> KeyNumbering {
        match self {
            Target::Dolphin => KeyNumbering::DirectInputName,
            Target::RetroArch => KeyNumbering::RetroArchName,
            Target::Pcsx2 => KeyNumbering::QtName,
            Target::Model2 => KeyNumbering::DirectInput,
        }
    }

    pub fn hat_mode(self) -> HatMode {
        match self {
            Target::Model2 => HatMode::AsAxes,
            Target::Dolphin | Target::RetroArch | Target::Pcsx2 => HatMode::Native,
        }
    }

    /// Maustasten für die Lightgun-Rollen
    pub fn gun_roles(self) -> GunButtonRoles {
        match self {
            Target::Pcsx2 => pcsx2::GUNCON_ROLES,
            Target::Dolphin | Target::RetroArch | Target::Model2 => GunButtonRoles::default(),
        }
    }

    /// Wert für ungebundene Eingaben; `None` heißt weglassen
    pub fn unbound_token(self) -> Option<&'static str> {
        match self {
            Target::RetroArch => Some(retroarch::UNBOUND),
            Target::Model2 => Some(model2::UNBOUND),
            Target::Dolphin | Target::Pcsx2 => None,
        }
    }

    /// Kopfzeilen pro Gerät (Gerätename, Typ, Index)
    pub fn device_entries(self, ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
        match self {
            Target::Dolphin => dolphin::device_entries(ctx),
            Target::RetroArch => retroarch::device_entries(ctx),
            Target::Pcsx2 => pcsx2::device_entries(ctx),
            Target::Model2 => model2::device_entries(ctx),
        }
    }

    /// Voller Pfad und Wert für einen Profileintrag
    pub fn entry(
        self,
        ctx: &DeviceContext<'_>,
        token: &NativeToken,
        encoded: &Encoded,
    ) -> Option<(String, String)> {
        let path = self.path(ctx, token, encoded.bound());
        match encoded {
            Encoded::Bound(binding) => Some((path, self.format_binding(ctx, binding)?)),
            Encoded::Unbound => self.unbound_token().map(|t| (path, t.to_string())),
        }
    }

    pub fn path(
        self,
        ctx: &DeviceContext<'_>,
        token: &NativeToken,
        binding: Option<&NativeBinding>,
    ) -> String {
        match self {
            Target::Dolphin => dolphin::path(ctx, token),
            Target::RetroArch => retroarch::path(ctx.player(), token.as_str(), binding),
            Target::Pcsx2 => pcsx2::path(ctx, token),
            Target::Model2 => model2::path(ctx, token),
        }
    }

    /// Native Darstellung eines Bindings; `None`, wenn das Ziel es nicht ausdrücken kann
    pub fn format_binding(
        self,
        ctx: &DeviceContext<'_>,
        binding: &NativeBinding,
    ) -> Option<String> {
        match self {
            Target::Dolphin => dolphin::format_binding(binding),
            Target::RetroArch => retroarch::format_binding(binding),
            Target::Pcsx2 => pcsx2::format_binding(ctx, binding),
            Target::Model2 => model2::format_binding(ctx, binding),
        }
    }

    /// Tastatur-Fallback eines Hotkeys
    pub fn format_key(self, key: KeyToken) -> String {
        match self {
            Target::Dolphin => dolphin::format_keyboard_fallback(key),
            Target::RetroArch => key.to_string(),
            Target::Pcsx2 => format!("Keyboard/{}", key),
            Target::Model2 => format!("0x{:04X}", model2::key_code(key)),
        }
    }

    /// `None` für Ziele ohne Hotkeys
    pub fn chord_syntax(self) -> Option<ChordSyntax> {
        match self {
            Target::Dolphin => Some(ChordSyntax::Expression { and: "&", or: "|" }),
            Target::RetroArch => Some(ChordSyntax::Split {
                enable: "input_enable_hotkey",
            }),
            Target::Pcsx2 => Some(ChordSyntax::Listed { and: " & " }),
            Target::Model2 => None,
        }
    }

    /// Kopfzeilen des Hotkey-Blocks
    pub fn hotkey_entries(self, ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
        match self {
            Target::Dolphin => dolphin::hotkey_entries(ctx),
            Target::RetroArch | Target::Pcsx2 | Target::Model2 => Vec::new(),
        }
    }

    /// Pfad eines Hotkey-Eintrags, der vom gebundenen Eingabetyp abhängt
    pub fn hotkey_binding_path(self, base: &str, binding: Option<&NativeBinding>) -> String {
        match self {
            Target::RetroArch => retroarch::suffixed(base, binding),
            Target::Dolphin | Target::Pcsx2 | Target::Model2 => base.to_string(),
        }
    }

    /// Pfad einer Hotkey-Aktion; `None`, wenn das Ziel sie nicht kennt
    pub fn hotkey_path(self, action: HotkeyAction) -> Option<&'static str> {
        match self {
            Target::Dolphin => dolphin::hotkey_path(action),
            Target::RetroArch => retroarch::hotkey_path(action),
            Target::Pcsx2 => pcsx2::hotkey_path(action),
            Target::Model2 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn every_target_supports_its_default_peripheral() {
        for target in Target::iter() {
            let profile = target.profile(target.default_peripheral());
            assert!(profile.is_ok(), "{target} lacks its default profile");
        }
    }

    #[test]
    fn unsupported_combination_is_an_error() {
        assert!(matches!(
            Target::Model2.profile(PeripheralType::Guitar),
            Err(BindingError::UnsupportedPeripheral { .. })
        ));
    }

    #[test]
    fn peripheral_aliases_parse() {
        assert_eq!(PeripheralType::from_str("cc").ok(), Some(PeripheralType::Classic));
        assert_eq!(
            PeripheralType::from_str("classic").ok(),
            Some(PeripheralType::Classic)
        );
        assert_eq!(PeripheralType::from_str("gun").ok(), Some(PeripheralType::LightGun));
        assert_eq!(Target::from_str("retroarch").ok(), Some(Target::RetroArch));
    }

    #[test]
    fn hotkey_paths_exist_only_with_a_chord_syntax() {
        for target in Target::iter() {
            let paths = HotkeyAction::iter()
                .filter(|action| target.hotkey_path(*action).is_some())
                .count();
            assert_eq!(
                target.chord_syntax().is_some(),
                paths > 0,
                "{target}: {paths} hotkey paths"
            );
        }
        assert_eq!(Target::Model2.chord_syntax(), None);
    }

    #[test]
    fn every_reverse_pair_points_into_the_profile() {
        for target in Target::iter() {
            for peripheral in PeripheralType::iter() {
                let Ok(profile) = target.profile(peripheral) else {
                    continue;
                };
                let reverse = target.reverse_axes(peripheral);
                for (input, tokens) in profile.iter() {
                    for token in tokens {
                        if let Some(negative) = reverse.negative_of(token.as_str()) {
                            let paired = profile.input_for(negative);
                            assert_eq!(
                                paired,
                                input.opposite(),
                                "{target}/{peripheral}: {token} pairs with {negative}"
                            );
                        }
                    }
                }
            }
        }
    }
}
