//! Hotkeys: Select plus eine zweite Taste, dazu ein reiner Tastatur-Fallback
//!
//! Die Zuordnung Aktion → Begleittaste → Fallback-Taste ist eine Tabelle.
//! Das Format der Kombination bestimmt das Ziel ([`ChordSyntax`]).

use crate::controller::LogicalInput;
use crate::mapping::encoder::{Encoded, NativeBinding};
use crate::mapping::keyboard::{Key, KeyboardEncoder};
use crate::target::{ChordSyntax, DeviceContext, Target};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

/// Erste Taste jeder Kombination
pub const MODIFIER: LogicalInput = LogicalInput::Select;

/// Hotkey-Aktionen
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HotkeyAction {
    LoadState,
    SaveState,
    SlotUp,
    SlotDown,
    HelpToggle,
    DiskSelect,
    Screenshot,
    FastForward,
    Rewind,
    Pause,
    Exit,
}

struct HotkeyDefinition {
    action: HotkeyAction,
    companion: LogicalInput,
    fallback: Key,
}

macro_rules! hotkey_table {
    ($($action:ident => $companion:ident, $key:ident;)*) => {
        &[$(HotkeyDefinition {
            action: HotkeyAction::$action,
            companion: LogicalInput::$companion,
            fallback: Key::$key,
        },)*]
    };
}

const HOTKEYS: &[HotkeyDefinition] = hotkey_table! {
    LoadState => North, F4;
    SaveState => West, F2;
    SlotUp => Up, F7;
    SlotDown => Down, F6;
    HelpToggle => South, F1;
    DiskSelect => LeftShoulder, F8;
    Screenshot => RightShoulder, F12;
    FastForward => RightTrigger, Space;
    Rewind => LeftTrigger, R;
    Pause => East, P;
    Exit => Start, Escape;
};

fn definition(action: HotkeyAction) -> Option<&'static HotkeyDefinition> {
    HOTKEYS.iter().find(|d| d.action == action)
}

impl HotkeyAction {
    /// Standard-Begleittaste zu Select
    pub fn companion(self) -> LogicalInput {
        definition(self)
            .map(|d| d.companion)
            .unwrap_or(LogicalInput::Start)
    }

    /// Taste für den Tastatur-Fallback
    pub fn fallback_key(self) -> Key {
        definition(self).map(|d| d.fallback).unwrap_or(Key::Escape)
    }
}

/// Baut die Hotkey-Einträge für das Gerät von Spieler 1
pub struct HotkeyComposer<'a> {
    target: Target,
    overrides: &'a HashMap<HotkeyAction, LogicalInput>,
}

impl<'a> HotkeyComposer<'a> {
    pub fn new(target: Target, overrides: &'a HashMap<HotkeyAction, LogicalInput>) -> Self {
        Self { target, overrides }
    }

    /// Begleittaste nach Anwendung der Overrides
    pub fn companion(&self, action: HotkeyAction) -> LogicalInput {
        self.overrides
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.companion())
    }

    fn formatted(
        &self,
        ctx: &DeviceContext<'_>,
        encoded: Encoded,
    ) -> Option<(NativeBinding, String)> {
        let Encoded::Bound(binding) = encoded else {
            return None;
        };
        let value = self.target.format_binding(ctx, &binding)?;
        Some((binding, value))
    }

    /// Alle Hotkey-Einträge in Tabellenreihenfolge.
    ///
    /// `encode` liefert die Bindings des Geräts; Tastaturen bekommen nur den
    /// Fallback.
    pub fn compose(
        &self,
        ctx: &DeviceContext<'_>,
        encode: impl Fn(LogicalInput) -> Encoded,
        keyboard: &KeyboardEncoder,
    ) -> Vec<(String, String)> {
        let target = self.target;
        let Some(syntax) = target.chord_syntax() else {
            debug!("{} has no hotkeys", target);
            return Vec::new();
        };
        let mut entries = target.hotkey_entries(ctx);

        let modifier = if ctx.device.is_keyboard() {
            None
        } else {
            self.formatted(ctx, encode(MODIFIER))
        };
        if modifier.is_none() {
            debug!("Player {} gets keyboard-only hotkeys", ctx.player());
        }

        if let (ChordSyntax::Split { enable }, Some((binding, value))) = (syntax, &modifier) {
            entries.push((target.hotkey_binding_path(enable, Some(binding)), value.clone()));
        }

        for definition in HOTKEYS {
            let Some(path) = target.hotkey_path(definition.action) else {
                debug!("{} has no {} hotkey", target, definition.action);
                continue;
            };
            let key = target.format_key(keyboard.encode_key(definition.fallback));
            let companion = modifier
                .as_ref()
                .and_then(|_| self.formatted(ctx, encode(self.companion(definition.action))));

            match (syntax, &modifier, companion) {
                (ChordSyntax::Expression { and, or }, Some((_, m)), Some((_, c))) => {
                    entries.push((path.to_string(), format!("{}{}{}{}{}", m, and, c, or, key)));
                }
                (ChordSyntax::Listed { and }, Some((_, m)), Some((_, c))) => {
                    entries.push((path.to_string(), format!("{}{}{}", m, and, c)));
                    entries.push((path.to_string(), key));
                }
                (ChordSyntax::Split { .. }, Some(_), Some((binding, c))) => {
                    entries.push((target.hotkey_binding_path(path, Some(&binding)), c));
                    entries.push((path.to_string(), key));
                }
                _ => entries.push((path.to_string(), key)),
            }
        }
        entries
    }
}
