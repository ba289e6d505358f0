//! Dolphin (GameCube/Wii)
//!
//! Pfade sind `GCPad<n>/...` bzw. `Wiimote<n>/...`, Werte stehen in
//! Backticks (`` `Button A` ``).

use super::{DeviceContext, PeripheralType};
use crate::controller::{InputTechnology, LogicalInput};
use crate::mapping::encoder::{AxisSign, HatDirection, NativeBinding};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::keyboard::KeyToken;
use crate::mapping::mouse::MouseAxis;
use crate::mapping::profile::{MappingProfile, NativeToken, ReverseAxisTable};
use crate::mapping::xinput::XControl;

use LogicalInput::*;

const KEYBOARD_DEVICE: &str = "DInput/0/Keyboard Mouse";

/// SIDevice-Wert für einen Standard-Controller
const SI_STANDARD_CONTROLLER: &str = "6";

const GAMECUBE: &[(LogicalInput, &[&str])] = &[
    (Up, &["D-Pad/Up"]),
    (Down, &["D-Pad/Down"]),
    (Left, &["D-Pad/Left"]),
    (Right, &["D-Pad/Right"]),
    (South, &["Buttons/A"]),
    (West, &["Buttons/B"]),
    (East, &["Buttons/X"]),
    (North, &["Buttons/Y"]),
    (RightShoulder, &["Buttons/Z"]),
    (Start, &["Buttons/Start"]),
    (LeftTrigger, &["Triggers/L", "Triggers/L-Analog"]),
    (RightTrigger, &["Triggers/R", "Triggers/R-Analog"]),
    (LeftStickUp, &["Main Stick/Up"]),
    (LeftStickDown, &["Main Stick/Down"]),
    (LeftStickLeft, &["Main Stick/Left"]),
    (LeftStickRight, &["Main Stick/Right"]),
    (RightStickUp, &["C-Stick/Up"]),
    (RightStickDown, &["C-Stick/Down"]),
    (RightStickLeft, &["C-Stick/Left"]),
    (RightStickRight, &["C-Stick/Right"]),
];

const CLASSIC: &[(LogicalInput, &[&str])] = &[
    (Up, &["Classic/D-Pad/Up"]),
    (Down, &["Classic/D-Pad/Down"]),
    (Left, &["Classic/D-Pad/Left"]),
    (Right, &["Classic/D-Pad/Right"]),
    (South, &["Classic/Buttons/B"]),
    (East, &["Classic/Buttons/A"]),
    (West, &["Classic/Buttons/Y"]),
    (North, &["Classic/Buttons/X"]),
    (LeftShoulder, &["Classic/Buttons/ZL"]),
    (RightShoulder, &["Classic/Buttons/ZR"]),
    (LeftTrigger, &["Classic/Triggers/L", "Classic/Triggers/L-Analog"]),
    (RightTrigger, &["Classic/Triggers/R", "Classic/Triggers/R-Analog"]),
    (Start, &["Classic/Buttons/+"]),
    (Select, &["Classic/Buttons/-"]),
    (Guide, &["Classic/Buttons/Home"]),
    (LeftStickUp, &["Classic/Left Stick/Up"]),
    (LeftStickDown, &["Classic/Left Stick/Down"]),
    (LeftStickLeft, &["Classic/Left Stick/Left"]),
    (LeftStickRight, &["Classic/Left Stick/Right"]),
    (RightStickUp, &["Classic/Right Stick/Up"]),
    (RightStickDown, &["Classic/Right Stick/Down"]),
    (RightStickLeft, &["Classic/Right Stick/Left"]),
    (RightStickRight, &["Classic/Right Stick/Right"]),
];

const WIIMOTE: &[(LogicalInput, &[&str])] = &[
    (Up, &["D-Pad/Up"]),
    (Down, &["D-Pad/Down"]),
    (Left, &["D-Pad/Left"]),
    (Right, &["D-Pad/Right"]),
    (South, &["Buttons/A"]),
    (East, &["Buttons/B"]),
    (West, &["Buttons/1"]),
    (North, &["Buttons/2"]),
    (Start, &["Buttons/+"]),
    (Select, &["Buttons/-"]),
    (Guide, &["Buttons/Home"]),
    (RightShoulder, &["Shake/Z"]),
    (LeftStickUp, &["Tilt/Forward"]),
    (LeftStickDown, &["Tilt/Backward"]),
    (LeftStickLeft, &["Tilt/Left"]),
    (LeftStickRight, &["Tilt/Right"]),
    (RightStickUp, &["IR/Up"]),
    (RightStickDown, &["IR/Down"]),
    (RightStickLeft, &["IR/Left"]),
    (RightStickRight, &["IR/Right"]),
];

/// Nunchuk ersetzt Tilt durch den Nunchuk-Stick und belegt C/Z
const NUNCHUK: &[(LogicalInput, &[&str])] = &[
    (LeftShoulder, &["Nunchuk/Buttons/C"]),
    (LeftTrigger, &["Nunchuk/Buttons/Z"]),
    (RightShoulder, &["Nunchuk/Shake/Z"]),
    (LeftStickUp, &["Nunchuk/Stick/Up"]),
    (LeftStickDown, &["Nunchuk/Stick/Down"]),
    (LeftStickLeft, &["Nunchuk/Stick/Left"]),
    (LeftStickRight, &["Nunchuk/Stick/Right"]),
];

const GAMECUBE_AXES: &[(&str, &str)] = &[
    ("Main Stick/Down", "Main Stick/Up"),
    ("Main Stick/Right", "Main Stick/Left"),
    ("C-Stick/Down", "C-Stick/Up"),
    ("C-Stick/Right", "C-Stick/Left"),
];

const CLASSIC_AXES: &[(&str, &str)] = &[
    ("Classic/Left Stick/Down", "Classic/Left Stick/Up"),
    ("Classic/Left Stick/Right", "Classic/Left Stick/Left"),
    ("Classic/Right Stick/Down", "Classic/Right Stick/Up"),
    ("Classic/Right Stick/Right", "Classic/Right Stick/Left"),
];

const WIIMOTE_AXES: &[(&str, &str)] = &[
    ("Tilt/Backward", "Tilt/Forward"),
    ("Tilt/Right", "Tilt/Left"),
    ("IR/Down", "IR/Up"),
    ("IR/Right", "IR/Left"),
];

const NUNCHUK_AXES: &[(&str, &str)] = &[
    ("Nunchuk/Stick/Down", "Nunchuk/Stick/Up"),
    ("Nunchuk/Stick/Right", "Nunchuk/Stick/Left"),
    ("IR/Down", "IR/Up"),
    ("IR/Right", "IR/Left"),
];

pub(super) fn profile(peripheral: PeripheralType) -> Option<MappingProfile> {
    match peripheral {
        PeripheralType::GameCube => Some(MappingProfile::from_table("dolphin/gamecube", GAMECUBE)),
        PeripheralType::Classic => Some(MappingProfile::from_table("dolphin/classic", CLASSIC)),
        PeripheralType::Wiimote => Some(MappingProfile::from_table("dolphin/wiimote", WIIMOTE)),
        PeripheralType::Nunchuk => {
            let mut profile = MappingProfile::from_table("dolphin/nunchuk", WIIMOTE);
            for (input, tokens) in NUNCHUK {
                let tokens = tokens.iter().map(|t| NativeToken::from(*t)).collect();
                profile = profile.with_entry(*input, tokens);
            }
            Some(profile)
        }
        PeripheralType::Gamepad | PeripheralType::Guitar | PeripheralType::LightGun => None,
    }
}

pub(super) fn reverse_axes(peripheral: PeripheralType) -> ReverseAxisTable {
    match peripheral {
        PeripheralType::GameCube => ReverseAxisTable::from_pairs(GAMECUBE_AXES),
        PeripheralType::Classic => ReverseAxisTable::from_pairs(CLASSIC_AXES),
        PeripheralType::Wiimote => ReverseAxisTable::from_pairs(WIIMOTE_AXES),
        PeripheralType::Nunchuk => ReverseAxisTable::from_pairs(NUNCHUK_AXES),
        PeripheralType::Gamepad | PeripheralType::Guitar | PeripheralType::LightGun => {
            ReverseAxisTable::default()
        }
    }
}

fn section(ctx: &DeviceContext<'_>) -> String {
    match ctx.peripheral {
        PeripheralType::GameCube => format!("GCPad{}", ctx.player()),
        _ => format!("Wiimote{}", ctx.player()),
    }
}

pub(super) fn path(ctx: &DeviceContext<'_>, token: &NativeToken) -> String {
    format!("{}/{}", section(ctx), token)
}

/// Dolphin-Gerätestring, z.B. `SDL/1/USB Gamepad`
pub fn device_string(ctx: &DeviceContext<'_>) -> String {
    let device = ctx.device;
    match device.technology {
        InputTechnology::XInput => format!("XInput/{}/Gamepad", device.native_index),
        InputTechnology::Sdl => format!("SDL/{}/{}", ctx.identity.offset, device.name),
        InputTechnology::DirectInput => format!("DInput/{}/{}", ctx.identity.offset, device.name),
        InputTechnology::Keyboard | InputTechnology::Mouse => KEYBOARD_DEVICE.to_string(),
    }
}

pub(super) fn device_entries(ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
    let section = section(ctx);
    let mut entries = vec![(format!("{}/Device", section), device_string(ctx))];
    match ctx.peripheral {
        PeripheralType::GameCube => entries.push((
            format!("Core/SIDevice{}", ctx.player().saturating_sub(1)),
            SI_STANDARD_CONTROLLER.to_string(),
        )),
        peripheral => {
            let extension = match peripheral {
                PeripheralType::Classic => "Classic",
                PeripheralType::Nunchuk => "Nunchuk",
                _ => "None",
            };
            entries.push((format!("{}/Source", section), "1".to_string()));
            entries.push((format!("{}/Extension", section), extension.to_string()));
        }
    }
    entries
}

fn xinput_name(control: XControl, sign: Option<AxisSign>) -> String {
    let symbol = |s: Option<AxisSign>| s.map(AxisSign::symbol).unwrap_or('+');
    match control {
        XControl::A => "Button A".to_string(),
        XControl::B => "Button B".to_string(),
        XControl::X => "Button X".to_string(),
        XControl::Y => "Button Y".to_string(),
        XControl::LeftShoulder => "Shoulder L".to_string(),
        XControl::RightShoulder => "Shoulder R".to_string(),
        XControl::Back => "Back".to_string(),
        XControl::Start => "Start".to_string(),
        XControl::LeftThumb => "Thumb L".to_string(),
        XControl::RightThumb => "Thumb R".to_string(),
        XControl::Guide => "Guide".to_string(),
        XControl::DPadUp => "Pad N".to_string(),
        XControl::DPadDown => "Pad S".to_string(),
        XControl::DPadLeft => "Pad W".to_string(),
        XControl::DPadRight => "Pad E".to_string(),
        XControl::LeftX => format!("Left X{}", symbol(sign)),
        XControl::RightX => format!("Right X{}", symbol(sign)),
        // XInput meldet "oben" als positives Y
        XControl::LeftY => format!("Left Y{}", symbol(sign.map(AxisSign::flipped))),
        XControl::RightY => format!("Right Y{}", symbol(sign.map(AxisSign::flipped))),
        XControl::LeftTrigger => "Trigger L".to_string(),
        XControl::RightTrigger => "Trigger R".to_string(),
    }
}

fn hat_letter(direction: HatDirection) -> char {
    match direction {
        HatDirection::Up => 'N',
        HatDirection::Right => 'E',
        HatDirection::Down => 'S',
        HatDirection::Left => 'W',
    }
}

pub(super) fn format_binding(binding: &NativeBinding) -> Option<String> {
    let inner = match binding {
        NativeBinding::XInput(slot) => xinput_name(slot.control, slot.sign),
        NativeBinding::Button(index) => format!("Button {}", index),
        NativeBinding::Hat { hat, direction } => format!("Hat {} {}", hat, hat_letter(*direction)),
        NativeBinding::Axis { index, sign } => format!("Axis {}{}", index, sign.symbol()),
        NativeBinding::Key(key) => key.to_string(),
        NativeBinding::MouseButton(button) => format!("Click {}", button.saturating_sub(1)),
        NativeBinding::MouseAxis { axis, sign } => {
            let axis = match axis {
                MouseAxis::X => 'X',
                MouseAxis::Y => 'Y',
            };
            format!("Axis {}{}", axis, sign.symbol())
        }
    };
    Some(format!("`{}`", inner))
}

/// Vollqualifizierte Tastatur-Taste, damit sie auch am Pad-Gerät greift
pub(super) fn format_keyboard_fallback(key: KeyToken) -> String {
    format!("`{}:{}`", KEYBOARD_DEVICE, key)
}

pub(super) fn hotkey_path(action: HotkeyAction) -> Option<&'static str> {
    let path = match action {
        HotkeyAction::LoadState => "Hotkeys/Load State/Load from Selected Slot",
        HotkeyAction::SaveState => "Hotkeys/Save State/Save to Selected Slot",
        HotkeyAction::SlotUp => "Hotkeys/Other State Hotkeys/Increase Selected State Slot",
        HotkeyAction::SlotDown => "Hotkeys/Other State Hotkeys/Decrease Selected State Slot",
        HotkeyAction::DiskSelect => "Hotkeys/General/Change Disc",
        HotkeyAction::Screenshot => "Hotkeys/General/Take Screenshot",
        HotkeyAction::FastForward => "Hotkeys/Emulation Speed/Disable Emulation Speed Limit",
        HotkeyAction::Pause => "Hotkeys/General/Toggle Pause",
        HotkeyAction::Exit => "Hotkeys/General/Exit",
        HotkeyAction::HelpToggle | HotkeyAction::Rewind => return None,
    };
    Some(path)
}

pub(super) fn hotkey_entries(ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
    vec![("Hotkeys/Device".to_string(), device_string(ctx))]
}
