//! PCSX2
//!
//! Pads liegen unter `Pad<n>/`, die GunCon2 ist ein USB-Gerät unter `USB<n>/`.
//! Werte tragen das Quellgerät als Präfix (`SDL-0/FaceSouth`,
//! `Keyboard/Return`).

use super::{DeviceContext, PeripheralType};
use crate::controller::{InputTechnology, LogicalInput};
use crate::mapping::encoder::{HatDirection, NativeBinding};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::mouse::{GunButtonRoles, MouseAxis, MIDDLE_BUTTON, SECONDARY_BUTTON};
use crate::mapping::profile::{MappingProfile, NativeToken, ReverseAxisTable};
use crate::mapping::xinput::XControl;

use LogicalInput::*;

/// Bei der GunCon2 lädt die mittlere Taste nach, die rechte ist A
pub const GUNCON_ROLES: GunButtonRoles = GunButtonRoles {
    reload: MIDDLE_BUTTON,
    aux_a: SECONDARY_BUTTON,
    aux_b: 6,
    start: 4,
    select: 5,
};

const DUALSHOCK2: &[(LogicalInput, &[&str])] = &[
    (Up, &["Up"]),
    (Down, &["Down"]),
    (Left, &["Left"]),
    (Right, &["Right"]),
    (South, &["Cross"]),
    (East, &["Circle"]),
    (West, &["Square"]),
    (North, &["Triangle"]),
    (LeftShoulder, &["L1"]),
    (RightShoulder, &["R1"]),
    (LeftTrigger, &["L2"]),
    (RightTrigger, &["R2"]),
    (LeftStickClick, &["L3"]),
    (RightStickClick, &["R3"]),
    (Start, &["Start"]),
    (Select, &["Select"]),
    (Guide, &["Analog"]),
    (LeftStickUp, &["LUp"]),
    (LeftStickDown, &["LDown"]),
    (LeftStickLeft, &["LLeft"]),
    (LeftStickRight, &["LRight"]),
    (RightStickUp, &["RUp"]),
    (RightStickDown, &["RDown"]),
    (RightStickLeft, &["RLeft"]),
    (RightStickRight, &["RRight"]),
];

const GUITAR: &[(LogicalInput, &[&str])] = &[
    (South, &["Green"]),
    (East, &["Red"]),
    (North, &["Yellow"]),
    (West, &["Blue"]),
    (LeftShoulder, &["Orange"]),
    (Up, &["StrumUp"]),
    (Down, &["StrumDown"]),
    (RightTrigger, &["Whammy"]),
    (RightShoulder, &["Tilt"]),
    (Start, &["Start"]),
    (Select, &["Select"]),
];

const GUNCON2: &[(LogicalInput, &[&str])] = &[
    (GunTrigger, &["guncon2_Trigger"]),
    (GunReload, &["guncon2_ShootOffscreen"]),
    (GunAuxA, &["guncon2_A"]),
    (GunAuxB, &["guncon2_B"]),
    (Start, &["guncon2_Start"]),
    (Select, &["guncon2_Select"]),
    (Up, &["guncon2_DPadUp"]),
    (Down, &["guncon2_DPadDown"]),
    (Left, &["guncon2_DPadLeft"]),
    (Right, &["guncon2_DPadRight"]),
    (LeftStickUp, &["guncon2_RelativeUp"]),
    (LeftStickDown, &["guncon2_RelativeDown"]),
    (LeftStickLeft, &["guncon2_RelativeLeft"]),
    (LeftStickRight, &["guncon2_RelativeRight"]),
];

pub(super) fn profile(peripheral: PeripheralType) -> Option<MappingProfile> {
    match peripheral {
        PeripheralType::Gamepad => Some(MappingProfile::from_table("pcsx2/dualshock2", DUALSHOCK2)),
        PeripheralType::Guitar => Some(MappingProfile::from_table("pcsx2/guitar", GUITAR)),
        PeripheralType::LightGun => Some(MappingProfile::from_table("pcsx2/guncon2", GUNCON2)),
        _ => None,
    }
}

/// PCSX2 bindet jede Achsenhälfte einzeln
pub(super) fn reverse_axes(_peripheral: PeripheralType) -> ReverseAxisTable {
    ReverseAxisTable::default()
}

fn section(ctx: &DeviceContext<'_>) -> String {
    match ctx.peripheral {
        PeripheralType::LightGun => format!("USB{}", ctx.player()),
        _ => format!("Pad{}", ctx.player()),
    }
}

pub(super) fn path(ctx: &DeviceContext<'_>, token: &NativeToken) -> String {
    format!("{}/{}", section(ctx), token)
}

pub(super) fn device_entries(ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
    let kind = match ctx.peripheral {
        PeripheralType::Guitar => "Guitar",
        PeripheralType::LightGun => "guncon2",
        _ => "DualShock2",
    };
    vec![(format!("{}/Type", section(ctx)), kind.to_string())]
}

fn source(ctx: &DeviceContext<'_>) -> String {
    let device = ctx.device;
    match device.technology {
        InputTechnology::XInput => format!("XInput-{}", device.native_index),
        InputTechnology::Sdl | InputTechnology::DirectInput => {
            format!("SDL-{}", device.native_index)
        }
        InputTechnology::Keyboard => "Keyboard".to_string(),
        InputTechnology::Mouse => "Pointer-0".to_string(),
    }
}

fn xinput_name(control: XControl) -> &'static str {
    match control {
        XControl::A => "A",
        XControl::B => "B",
        XControl::X => "X",
        XControl::Y => "Y",
        XControl::LeftShoulder => "LeftShoulder",
        XControl::RightShoulder => "RightShoulder",
        XControl::Back => "Back",
        XControl::Start => "Start",
        XControl::LeftThumb => "LeftStick",
        XControl::RightThumb => "RightStick",
        XControl::Guide => "Guide",
        XControl::DPadUp => "DPadUp",
        XControl::DPadDown => "DPadDown",
        XControl::DPadLeft => "DPadLeft",
        XControl::DPadRight => "DPadRight",
        XControl::LeftX => "LeftX",
        XControl::LeftY => "LeftY",
        XControl::RightX => "RightX",
        XControl::RightY => "RightY",
        XControl::LeftTrigger => "LeftTrigger",
        XControl::RightTrigger => "RightTrigger",
    }
}

fn hat_name(direction: HatDirection) -> &'static str {
    match direction {
        HatDirection::Up => "Up",
        HatDirection::Right => "Right",
        HatDirection::Down => "Down",
        HatDirection::Left => "Left",
    }
}

fn mouse_button_name(button: u8) -> String {
    match button {
        1 => "LeftButton".to_string(),
        2 => "RightButton".to_string(),
        3 => "MiddleButton".to_string(),
        other => format!("Button{}", other.saturating_sub(1)),
    }
}

pub(super) fn format_binding(ctx: &DeviceContext<'_>, binding: &NativeBinding) -> Option<String> {
    let name = match binding {
        NativeBinding::XInput(slot) => match slot.sign {
            Some(sign) => format!("{}{}", sign.symbol(), xinput_name(slot.control)),
            None => xinput_name(slot.control).to_string(),
        },
        NativeBinding::Button(index) => format!("Button{}", index),
        NativeBinding::Hat { hat, direction } => format!("Hat{}{}", hat, hat_name(*direction)),
        NativeBinding::Axis { index, sign } => format!("{}Axis{}", sign.symbol(), index),
        NativeBinding::Key(key) => return Some(format!("Keyboard/{}", key)),
        NativeBinding::MouseButton(button) => {
            return Some(format!("Pointer-0/{}", mouse_button_name(*button)))
        }
        NativeBinding::MouseAxis { axis, sign } => {
            let axis = match axis {
                MouseAxis::X => 'X',
                MouseAxis::Y => 'Y',
            };
            return Some(format!("Pointer-0/{}{}", sign.symbol(), axis));
        }
    };
    Some(format!("{}/{}", source(ctx), name))
}

pub(super) fn hotkey_path(action: HotkeyAction) -> Option<&'static str> {
    let path = match action {
        HotkeyAction::LoadState => "Hotkeys/LoadStateFromSlot",
        HotkeyAction::SaveState => "Hotkeys/SaveStateToSlot",
        HotkeyAction::SlotUp => "Hotkeys/NextSaveStateSlot",
        HotkeyAction::SlotDown => "Hotkeys/PreviousSaveStateSlot",
        HotkeyAction::HelpToggle => "Hotkeys/OpenPauseMenu",
        HotkeyAction::Screenshot => "Hotkeys/Screenshot",
        HotkeyAction::FastForward => "Hotkeys/ToggleTurbo",
        HotkeyAction::Pause => "Hotkeys/TogglePause",
        HotkeyAction::Exit => "Hotkeys/ShutdownVM",
        HotkeyAction::DiskSelect | HotkeyAction::Rewind => return None,
    };
    Some(path)
}
