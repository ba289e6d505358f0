//! Override-Kette für ein Geräteprofil
//!
//! Reihenfolge (höchste zuerst):
//!
//! ```text
//! Spielmodus ──► Sonder-Hardware ─┐
//!                                  ├─► Basisprofil
//!                Hersteller-Tausch ┘
//! ```
//!
//! Sonder-Hardware und Hersteller-Tausch schließen sich aus (der erste Treffer
//! gilt), der Spielmodus liegt immer obenauf. Jede Stufe erzeugt ein neues
//! Profil.

use crate::controller::{DeviceDescriptor, LogicalInput};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::mode::GameMode;
use crate::mapping::profile::MappingProfile;
use crate::mapping::special::{SpecialHardwareCatalog, SpecialHardwareProfile};
use crate::target::Target;
use std::collections::HashMap;
use tracing::{debug, info};

/// Alles, was die Override-Kette außer dem Gerät braucht
#[derive(Debug, Clone, Copy)]
pub struct OverrideContext<'a> {
    pub target: Target,
    pub mode: Option<GameMode>,
    pub catalog: &'a SpecialHardwareCatalog,
    pub activated_profiles: &'a [String],
    /// Nintendo-Layout für Spieler 1 (Ost/Süd getauscht)
    pub nintendo_layout: bool,
}

/// Angewendete Stufe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideLayer {
    GameMode(GameMode),
    SpecialHardware(String),
    VendorSwap,
    Base,
}

#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: MappingProfile,
    /// Angewendete Stufen, unterste zuerst
    pub layers: Vec<OverrideLayer>,
    /// Ersatz-Begleittasten für Hotkeys (nur Spieler 1)
    pub hotkey_overrides: HashMap<HotkeyAction, LogicalInput>,
}

fn usable_special<'a>(
    device: &DeviceDescriptor,
    ctx: &OverrideContext<'a>,
) -> Option<&'a SpecialHardwareProfile> {
    let special = ctx.catalog.find(&device.fingerprint(), ctx.target)?;
    if !special.is_active(ctx.activated_profiles) {
        info!(
            "Special profile {} for player {} requires activation; skipping",
            special.name, device.player_index
        );
        return None;
    }
    Some(special)
}

fn vendor_swap_applies(device: &DeviceDescriptor, ctx: &OverrideContext<'_>) -> bool {
    ctx.nintendo_layout && device.player_index == 1 && device.is_nintendo_vendor()
}

/// Löst die Override-Kette für ein Gerät auf
pub fn resolve(
    base: &MappingProfile,
    device: &DeviceDescriptor,
    ctx: &OverrideContext<'_>,
) -> ResolvedProfile {
    let mut layers = Vec::new();
    let mut hotkey_overrides = HashMap::new();

    let mut profile = if let Some(special) = usable_special(device, ctx) {
        info!("Player {} uses special profile {}", device.player_index, special.name);
        layers.push(OverrideLayer::SpecialHardware(special.name.clone()));
        if device.player_index == 1 {
            hotkey_overrides = special.hotkeys.clone();
        }
        base.with_overrides(&special.mapping_overrides())
            .renamed(format!("{}+{}", base.name(), special.name))
    } else if vendor_swap_applies(device, ctx) {
        debug!("Nintendo layout for player {}", device.player_index);
        layers.push(OverrideLayer::VendorSwap);
        base.with_swapped(LogicalInput::East, LogicalInput::South)
    } else {
        layers.push(OverrideLayer::Base);
        base.clone()
    };

    if let Some(mode) = ctx.mode {
        let overrides = mode.overrides();
        if !overrides.is_empty() {
            profile = profile
                .with_overrides(&overrides)
                .renamed(format!("{}[{}]", profile.name(), mode));
        }
        layers.push(OverrideLayer::GameMode(mode));
    }

    ResolvedProfile {
        profile,
        layers,
        hotkey_overrides,
    }
}
