//! Model 2
//!
//! Jede Eingabe ist ein gepackter Zahlencode (siehe [`NativeCode`]), Hats
//! kommen als zusätzliche Achsen an.

use super::{DeviceContext, PeripheralType};
use crate::controller::{InputTechnology, LogicalInput};
use crate::mapping::code::NativeCode;
use crate::mapping::encoder::NativeBinding;
use crate::mapping::keyboard::KeyToken;
use crate::mapping::profile::{MappingProfile, NativeToken, ReverseAxisTable};

use LogicalInput::*;

/// Code für eine nicht belegte Eingabe
pub const UNBOUND: &str = "0x0000";

const GAMEPAD: &[(LogicalInput, &[&str])] = &[
    (Up, &["Up"]),
    (Down, &["Down"]),
    (Left, &["Left"]),
    (Right, &["Right"]),
    (South, &["Button1"]),
    (East, &["Button2"]),
    (West, &["Button3"]),
    (North, &["Button4"]),
    (LeftShoulder, &["Button5"]),
    (RightShoulder, &["Button6"]),
    (LeftTrigger, &["Brake"]),
    (RightTrigger, &["Accelerate"]),
    (Start, &["Start"]),
    (Select, &["Coin"]),
    (LeftStickUp, &["AnalogY-"]),
    (LeftStickDown, &["AnalogY+"]),
    (LeftStickLeft, &["AnalogX-"]),
    (LeftStickRight, &["AnalogX+"]),
];

const ANALOG_PAIRS: &[(&str, &str)] = &[("AnalogX+", "AnalogX-"), ("AnalogY+", "AnalogY-")];

pub(super) fn profile(peripheral: PeripheralType) -> Option<MappingProfile> {
    match peripheral {
        PeripheralType::Gamepad => Some(MappingProfile::from_table("model2/gamepad", GAMEPAD)),
        _ => None,
    }
}

pub(super) fn reverse_axes(peripheral: PeripheralType) -> ReverseAxisTable {
    match peripheral {
        PeripheralType::Gamepad => ReverseAxisTable::from_pairs(ANALOG_PAIRS),
        _ => ReverseAxisTable::default(),
    }
}

pub(super) fn path(ctx: &DeviceContext<'_>, token: &NativeToken) -> String {
    format!("Input{}/{}", ctx.player(), token)
}

pub(super) fn device_entries(ctx: &DeviceContext<'_>) -> Vec<(String, String)> {
    vec![(
        format!("Input{}/Device", ctx.player()),
        ctx.identity.identity.clone(),
    )]
}

/// Geräteindex im Codeblock der Technologie
fn device_index(ctx: &DeviceContext<'_>) -> u8 {
    match ctx.device.technology {
        InputTechnology::Keyboard => 0,
        _ => ctx.device.native_index,
    }
}

pub(super) fn format_binding(ctx: &DeviceContext<'_>, binding: &NativeBinding) -> Option<String> {
    let code = NativeCode::from_binding(binding, device_index(ctx))?;
    Some(format!("0x{:04X}", code.to_native_code()))
}

/// Scan-Code einer Taste; Namen gibt es bei Model 2 nicht
pub(super) fn key_code(key: KeyToken) -> u32 {
    match key {
        KeyToken::Code(code) => code,
        KeyToken::Name(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DeviceDescriptor;
    use crate::mapping::encoder::AxisSign;
    use crate::mapping::identity::resolve_identities;

    #[test]
    fn joystick_codes_are_packed_hex() {
        let mut stick = DeviceDescriptor::new(InputTechnology::DirectInput, 1);
        stick.native_index = 1;
        let identities = resolve_identities(std::slice::from_ref(&stick));
        let Some(Ok(identity)) = identities.first() else {
            panic!("identity expected");
        };
        let ctx = DeviceContext {
            device: &stick,
            identity,
            peripheral: PeripheralType::Gamepad,
        };
        assert_eq!(
            format_binding(&ctx, &NativeBinding::Button(2)).as_deref(),
            Some("0x1102")
        );
        assert_eq!(
            format_binding(
                &ctx,
                &NativeBinding::Axis {
                    index: 0,
                    sign: AxisSign::Positive
                }
            )
            .as_deref(),
            Some("0x1141")
        );
    }

    #[test]
    fn only_gamepad_is_supported() {
        assert!(profile(PeripheralType::Gamepad).is_some());
        assert!(profile(PeripheralType::LightGun).is_none());
    }
}
