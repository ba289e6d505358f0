//! Gepackte numerische Eingabecodes
//!
//! Ziele mit binären Eingabedateien erwarten einen einzelnen Zahlenwert pro
//! Eingabe: `Basis + Geräteindex * Schrittweite + Offset`. Die Formel lebt
//! ausschließlich hier.

use crate::mapping::encoder::{HatDirection, NativeBinding};
use crate::mapping::mouse::MouseAxis;
use crate::mapping::keyboard::KeyToken;

const JOYSTICK_BASE: u32 = 0x1000;
const XINPUT_BASE: u32 = 0x2000;
const MOUSE_BASE: u32 = 0x4000;
const DEVICE_STRIDE: u32 = 0x100;
const MOUSE_STRIDE: u32 = 0x40;

/// Offset der ersten Achse im Joystick-Block
const AXIS_OFFSET: u16 = 0x40;
/// Offset des ersten Hats im Joystick-Block
const HAT_OFFSET: u16 = 0x80;
/// Offset der ersten Mausachse im Maus-Block
const MOUSE_AXIS_OFFSET: u16 = 0x10;

/// Adressraum eines gepackten Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSpace {
    Keyboard,
    Joystick,
    XInput,
    Mouse,
}

/// Technologie, Geräteindex und Offset eines Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCode {
    pub space: CodeSpace,
    pub device_index: u8,
    pub offset: u16,
}

impl NativeCode {
    pub fn new(space: CodeSpace, device_index: u8, offset: u16) -> Self {
        Self {
            space,
            device_index,
            offset,
        }
    }

    /// Baut den Code für ein Binding. Tastennamen lassen sich nicht packen.
    pub fn from_binding(binding: &NativeBinding, device_index: u8) -> Option<Self> {
        let code = match binding {
            NativeBinding::Key(KeyToken::Code(scan)) => {
                Self::new(CodeSpace::Keyboard, 0, u16::try_from(*scan).ok()?)
            }
            NativeBinding::Key(KeyToken::Name(_)) => return None,
            NativeBinding::Button(index) => Self::new(CodeSpace::Joystick, device_index, *index),
            NativeBinding::Axis { index, sign } => Self::new(
                CodeSpace::Joystick,
                device_index,
                AXIS_OFFSET + *index as u16 * 2 + sign.is_positive() as u16,
            ),
            NativeBinding::Hat { hat, direction } => Self::new(
                CodeSpace::Joystick,
                device_index,
                HAT_OFFSET + *hat as u16 * 4 + hat_slot(*direction),
            ),
            NativeBinding::XInput(slot) => {
                let offset = match (slot.control.button_index(), slot.control.axis_index()) {
                    (Some(button), _) => button,
                    (None, Some(axis)) => {
                        AXIS_OFFSET
                            + axis as u16 * 2
                            + slot.sign.map(|s| s.is_positive() as u16).unwrap_or(1)
                    }
                    (None, None) => HAT_OFFSET + dpad_slot(slot.control)?,
                };
                Self::new(CodeSpace::XInput, device_index, offset)
            }
            NativeBinding::MouseButton(button) => {
                Self::new(CodeSpace::Mouse, device_index, *button as u16)
            }
            NativeBinding::MouseAxis { axis, sign } => {
                let axis = match axis {
                    MouseAxis::X => 0,
                    MouseAxis::Y => 1,
                };
                Self::new(
                    CodeSpace::Mouse,
                    device_index,
                    MOUSE_AXIS_OFFSET + axis * 2 + sign.is_positive() as u16,
                )
            }
        };
        Some(code)
    }

    pub fn to_native_code(self) -> u32 {
        let index = self.device_index as u32;
        let offset = self.offset as u32;
        match self.space {
            CodeSpace::Keyboard => offset,
            CodeSpace::Joystick => JOYSTICK_BASE + index * DEVICE_STRIDE + offset,
            CodeSpace::XInput => XINPUT_BASE + index * DEVICE_STRIDE + offset,
            CodeSpace::Mouse => MOUSE_BASE + index * MOUSE_STRIDE + offset,
        }
    }
}

fn hat_slot(direction: HatDirection) -> u16 {
    match direction {
        HatDirection::Up => 0,
        HatDirection::Right => 1,
        HatDirection::Down => 2,
        HatDirection::Left => 3,
    }
}

fn dpad_slot(control: crate::mapping::xinput::XControl) -> Option<u16> {
    use crate::mapping::xinput::XControl;
    match control {
        XControl::DPadUp => Some(0),
        XControl::DPadRight => Some(1),
        XControl::DPadDown => Some(2),
        XControl::DPadLeft => Some(3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::encoder::AxisSign;
    use crate::mapping::xinput::{XControl, XInputSlot};

    #[test]
    fn packing_formula() {
        assert_eq!(NativeCode::new(CodeSpace::Keyboard, 3, 0x1c).to_native_code(), 0x1c);
        assert_eq!(NativeCode::new(CodeSpace::Joystick, 0, 5).to_native_code(), 0x1005);
        assert_eq!(NativeCode::new(CodeSpace::Joystick, 2, 5).to_native_code(), 0x1205);
        assert_eq!(NativeCode::new(CodeSpace::Mouse, 1, 1).to_native_code(), 0x4041);
    }

    #[test]
    fn axis_halves_are_adjacent_codes() {
        let neg = NativeCode::from_binding(
            &NativeBinding::Axis {
                index: 1,
                sign: AxisSign::Negative,
            },
            0,
        );
        let pos = NativeCode::from_binding(
            &NativeBinding::Axis {
                index: 1,
                sign: AxisSign::Positive,
            },
            0,
        );
        assert_eq!(neg.map(NativeCode::to_native_code), Some(0x1042));
        assert_eq!(pos.map(NativeCode::to_native_code), Some(0x1043));
    }

    #[test]
    fn xinput_dpad_uses_hat_block() {
        let code = NativeCode::from_binding(
            &NativeBinding::XInput(XInputSlot::button(XControl::DPadLeft)),
            1,
        );
        assert_eq!(code.map(NativeCode::to_native_code), Some(0x2183));
    }

    #[test]
    fn key_names_cannot_be_packed() {
        assert_eq!(
            NativeCode::from_binding(&NativeBinding::Key(KeyToken::Name("enter")), 0),
            None
        );
    }
}
