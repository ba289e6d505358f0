//! RetroArch
//!
//! Schlüssel folgen `input_player<n>_<name>[_btn|_axis|_mbtn]`; der Suffix
//! hängt davon ab, was am Ende gebunden ist.

use super::{DeviceContext, PeripheralType};
use crate::controller::{InputTechnology, LogicalInput};
use crate::mapping::encoder::{HatDirection, NativeBinding};
use crate::mapping::hotkey::HotkeyAction;
use crate::mapping::profile::{MappingProfile, ReverseAxisTable};
use crate::mapping::xinput::XControl;

use LogicalInput::*;

/// Wert für eine nicht belegte Eingabe
pub const UNBOUND: &str = "nul";

/// `RETRO_DEVICE_JOYPAD` bzw. `RETRO_DEVICE_LIGHTGUN`
const DEVICE_JOYPAD: &str = "1";
const DEVICE_LIGHTGUN: &str = "4";

const RETROPAD: &[(LogicalInput, &[&str])] = &[
    (Up, &["up"]),
    (Down, &["down"]),
    (Left, &["left"]),
    (Right, &["right"]),
    (South, &["b"]),
    (East, &["a"]),
    (West, &["y"]),
    (North, &["x"]),
    (LeftShoulder, &["l"]),
    (RightShoulder, &["r"]),
    (LeftTrigger, &["l2"]),
    (RightTrigger, &["r2"]),
    (LeftStickClick, &["l3"]),
    (RightStickClick, &["r3"]),
    (Start, &["start"]),
    (Select, &["select"]),
    (LeftStickUp, &["l_y_minus"]),
    (LeftStickDown, &["l_y_plus"]),
    (LeftStickLeft, &["l_x_minus"]),
    (LeftStickRight, &["l_x_plus"]),
    (RightStickUp, &["r_y_minus"]),
    (RightStickDown, &["r_y_plus"]),
    (RightStickLeft, &["r_x_minus"]),
    (RightStickRight, &["r_x_plus"]),
];

const LIGHTGUN: &[(LogicalInput, &[&str])] = &[
    (GunTrigger, &["gun_trigger"]),
    (GunReload, &["gun_offscreen_shot"]),
    (GunAuxA, &["gun_aux_a"]),
    (GunAuxB, &["gun_aux_b"]),
    (Start, &["gun_start"]),
    (Select, &["gun_select"]),
    (Up, &["gun_dpad_up"]),
    (Down, &["gun_dpad_down"]),
    (Left, &["gun_dpad_left"]),
    (Right, &["gun_dpad_right"]),
];

const ANALOG_PAIRS: &[(&str, &str)] = &[
    ("l_x_plus", "l_x_minus"),
    ("l_y_plus", "l_y_minus"),
    ("r_x_plus", "r_x_minus"),
    ("r_y_plus", "r_y_minus"),
];

pub(super) fn profile(peripheral: PeripheralType) -> Option<MappingProfile> {
    match peripheral {
        PeripheralType::Gamepad => Some(MappingProfile::from_table("retroarch/retropad", RETROPAD)),
        PeripheralType::LightGun => Some(MappingProfile::from_table("retroarch/lightgun", LIGHTGUN)),
        _ => None,
    }
}

pub(super) fn reverse_axes(peripheral: PeripheralType) -> ReverseAxisTable {
    match peripheral {
        PeripheralType::Gamepad => ReverseAxisTable::from_pairs(ANALOG_PAIRS),
        _ => ReverseAxisTable::default(),
    }
}

fn is_axis_binding(binding: &NativeBinding) -> bool {
    match binding {
        NativeBinding::XInput(slot) => slot.sign.is_some(),
        NativeBinding::Axis { .. } => true,
        _ => false,
    }
}

/// Hängt den Suffix an, der zum gebundenen Eingabetyp passt
pub fn suffixed(base: &str, binding: Option<&NativeBinding>) -> String {
    let suffix = match binding {
        Some(NativeBinding::Key(_)) => "",
        Some(NativeBinding::MouseButton(_)) => "_mbtn",
        Some(NativeBinding::MouseAxis { .. }) => "_axis",
        Some(binding) if is_axis_binding(binding) => "_axis",
        Some(_) => "_btn",
        None if base.ends_with("_plus") || base.ends_with("_minus") => "_axis",
        None => "_btn",
    };
    format!("{}{}", base, suffix)
}

pub(super) fn path(player: u8, token: &str, binding: Option<&NativeBinding>) -> String {
    suffixed(&format!("input_player{}_{}", player, token), binding)
}

pub(super) fn device_entries(ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
    let player = ctx.player();
    let device_type = match ctx.peripheral {
        PeripheralType::LightGun => DEVICE_LIGHTGUN,
        _ => DEVICE_JOYPAD,
    };
    let mut entries = vec![(
        format!("input_libretro_device_p{}", player),
        device_type.to_string(),
    )];
    match ctx.device.technology {
        InputTechnology::XInput | InputTechnology::Sdl | InputTechnology::DirectInput => {
            entries.push((
                format!("input_player{}_joypad_index", player),
                ctx.device.native_index.to_string(),
            ));
            entries.push((
                format!("input_player{}_analog_dpad_mode", player),
                "0".to_string(),
            ));
        }
        InputTechnology::Mouse => entries.push((
            format!("input_player{}_mouse_index", player),
            ctx.device.native_index.to_string(),
        )),
        InputTechnology::Keyboard => {}
    }
    entries
}

fn hat_name(direction: HatDirection) -> &'static str {
    match direction {
        HatDirection::Up => "up",
        HatDirection::Right => "right",
        HatDirection::Down => "down",
        HatDirection::Left => "left",
    }
}

pub(super) fn format_binding(binding: &NativeBinding) -> Option<String> {
    let value = match binding {
        NativeBinding::XInput(slot) => {
            if let Some(button) = slot.control.button_index() {
                button.to_string()
            } else if let Some(axis) = slot.control.axis_index() {
                format!("{}{}", slot.sign?.symbol(), axis)
            } else {
                let direction = match slot.control {
                    XControl::DPadUp => HatDirection::Up,
                    XControl::DPadDown => HatDirection::Down,
                    XControl::DPadLeft => HatDirection::Left,
                    XControl::DPadRight => HatDirection::Right,
                    _ => return None,
                };
                format!("h0{}", hat_name(direction))
            }
        }
        NativeBinding::Button(index) => index.to_string(),
        NativeBinding::Hat { hat, direction } => format!("h{}{}", hat, hat_name(*direction)),
        NativeBinding::Axis { index, sign } => format!("{}{}", sign.symbol(), index),
        NativeBinding::Key(key) => key.to_string(),
        NativeBinding::MouseButton(button) => button.to_string(),
        // Der Cursor ist bei RetroArch implizit
        NativeBinding::MouseAxis { .. } => return None,
    };
    Some(value)
}

pub(super) fn hotkey_path(action: HotkeyAction) -> Option<&'static str> {
    let path = match action {
        HotkeyAction::LoadState => "input_load_state",
        HotkeyAction::SaveState => "input_save_state",
        HotkeyAction::SlotUp => "input_state_slot_increase",
        HotkeyAction::SlotDown => "input_state_slot_decrease",
        HotkeyAction::HelpToggle => "input_menu_toggle",
        HotkeyAction::DiskSelect => "input_disk_next",
        HotkeyAction::Screenshot => "input_screenshot",
        HotkeyAction::FastForward => "input_toggle_fast_forward",
        HotkeyAction::Rewind => "input_rewind",
        HotkeyAction::Pause => "input_pause_toggle",
        HotkeyAction::Exit => "input_exit_emulator",
    };
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::encoder::AxisSign;
    use crate::mapping::keyboard::KeyToken;
    use crate::mapping::xinput::XInputSlot;

    #[test]
    fn suffix_follows_binding_kind() {
        assert_eq!(
            path(1, "b", Some(&NativeBinding::Button(0))),
            "input_player1_b_btn"
        );
        assert_eq!(
            path(
                2,
                "l_x_plus",
                Some(&NativeBinding::Axis {
                    index: 0,
                    sign: AxisSign::Positive
                })
            ),
            "input_player2_l_x_plus_axis"
        );
        assert_eq!(
            path(1, "start", Some(&NativeBinding::Key(KeyToken::Name("enter")))),
            "input_player1_start"
        );
        assert_eq!(path(1, "l_y_minus", None), "input_player1_l_y_minus_axis");
    }

    #[test]
    fn xinput_values() {
        let a = NativeBinding::XInput(XInputSlot::button(XControl::A));
        let up = NativeBinding::XInput(XInputSlot::button(XControl::DPadUp));
        let lt = NativeBinding::XInput(XInputSlot::axis(XControl::LeftTrigger, AxisSign::Positive));
        assert_eq!(format_binding(&a).as_deref(), Some("0"));
        assert_eq!(format_binding(&up).as_deref(), Some("h0up"));
        assert_eq!(format_binding(&lt).as_deref(), Some("+4"));
    }
}
