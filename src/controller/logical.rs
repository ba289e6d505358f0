//! Geräteunabhängiges Vokabular der Eingaben
//!
//! Jede Zielplattform bildet diese logischen Eingaben auf ihre eigenen Pfade ab,
//! jeder Encoder auf seine eigenen nativen Codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Abstrakte Eingabe, unabhängig vom physischen Gerät
///
/// Die Face-Buttons sind nach ihrer Position benannt (`South` ist der untere
/// Button, bei Xbox-Pads `A`), damit Hersteller-Layouts eindeutig bleiben.
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
pub enum LogicalInput {
    Up,
    Down,
    Left,
    Right,
    South,
    East,
    West,
    North,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftStickClick,
    RightStickClick,
    Start,
    Select,
    LeftStickUp,
    LeftStickDown,
    LeftStickLeft,
    LeftStickRight,
    RightStickUp,
    RightStickDown,
    RightStickLeft,
    RightStickRight,
    Guide,
    GunTrigger,
    GunReload,
    GunAuxA,
    GunAuxB,
}

/// Richtung einer Stick-Hälfte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl LogicalInput {
    /// Alle logischen Eingaben in Katalogreihenfolge
    pub fn all() -> impl Iterator<Item = LogicalInput> {
        LogicalInput::iter()
    }

    pub fn is_stick_direction(self) -> bool {
        self.stick_half().is_some()
    }

    pub fn is_gun_role(self) -> bool {
        matches!(
            self,
            LogicalInput::GunTrigger
                | LogicalInput::GunReload
                | LogicalInput::GunAuxA
                | LogicalInput::GunAuxB
        )
    }

    /// Liefert Achse und Vorzeichen einer Stick-Richtung.
    ///
    /// Oben und links sind negativ, unten und rechts positiv.
    pub fn stick_half(self) -> Option<(StickAxis, bool)> {
        use LogicalInput::*;
        match self {
            LeftStickUp => Some((StickAxis::LeftY, false)),
            LeftStickDown => Some((StickAxis::LeftY, true)),
            LeftStickLeft => Some((StickAxis::LeftX, false)),
            LeftStickRight => Some((StickAxis::LeftX, true)),
            RightStickUp => Some((StickAxis::RightY, false)),
            RightStickDown => Some((StickAxis::RightY, true)),
            RightStickLeft => Some((StickAxis::RightX, false)),
            RightStickRight => Some((StickAxis::RightX, true)),
            _ => None,
        }
    }

    /// Gegenrichtung einer Stick-Richtung (für Achsenpaare)
    pub fn opposite(self) -> Option<LogicalInput> {
        use LogicalInput::*;
        match self {
            LeftStickUp => Some(LeftStickDown),
            LeftStickDown => Some(LeftStickUp),
            LeftStickLeft => Some(LeftStickRight),
            LeftStickRight => Some(LeftStickLeft),
            RightStickUp => Some(RightStickDown),
            RightStickDown => Some(RightStickUp),
            RightStickLeft => Some(RightStickRight),
            RightStickRight => Some(RightStickLeft),
            _ => None,
        }
    }
}
