//! XInput-Encoder: reine Tabellensuche über feste Slots

use crate::controller::{DeviceDescriptor, LogicalInput};
use crate::mapping::encoder::{AxisSign, Encoded, NativeBinding, NativeEncoder};

/// Feste Bedienelemente eines XInput-Pads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XControl {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    Back,
    Start,
    LeftThumb,
    RightThumb,
    Guide,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl XControl {
    /// Button-Nummer im Schema der XInput-Treiber (A = 0 ... Guide = 10)
    pub fn button_index(self) -> Option<u16> {
        let index = match self {
            XControl::A => 0,
            XControl::B => 1,
            XControl::X => 2,
            XControl::Y => 3,
            XControl::LeftShoulder => 4,
            XControl::RightShoulder => 5,
            XControl::Back => 6,
            XControl::Start => 7,
            XControl::LeftThumb => 8,
            XControl::RightThumb => 9,
            XControl::Guide => 10,
            _ => return None,
        };
        Some(index)
    }

    /// Achsen-Nummer (Sticks 0..3, Trigger 4 und 5)
    pub fn axis_index(self) -> Option<u8> {
        let index = match self {
            XControl::LeftX => 0,
            XControl::LeftY => 1,
            XControl::RightX => 2,
            XControl::RightY => 3,
            XControl::LeftTrigger => 4,
            XControl::RightTrigger => 5,
            _ => return None,
        };
        Some(index)
    }

    pub fn is_dpad(self) -> bool {
        matches!(
            self,
            XControl::DPadUp | XControl::DPadDown | XControl::DPadLeft | XControl::DPadRight
        )
    }
}

/// Ein Slot: Bedienelement plus Vorzeichen bei Achsen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XInputSlot {
    pub control: XControl,
    pub sign: Option<AxisSign>,
}

impl XInputSlot {
    pub const fn button(control: XControl) -> Self {
        Self {
            control,
            sign: None,
        }
    }

    pub const fn axis(control: XControl, sign: AxisSign) -> Self {
        Self {
            control,
            sign: Some(sign),
        }
    }

    pub fn opposite(&self) -> Option<Self> {
        self.sign.map(|sign| Self::axis(self.control, sign.flipped()))
    }
}

/// Feste Zuordnung logische Eingabe → XInput-Slot
pub fn slot_for(input: LogicalInput) -> Option<XInputSlot> {
    use LogicalInput::*;
    use XControl as X;

    let slot = match input {
        Up => XInputSlot::button(X::DPadUp),
        Down => XInputSlot::button(X::DPadDown),
        Left => XInputSlot::button(X::DPadLeft),
        Right => XInputSlot::button(X::DPadRight),
        South => XInputSlot::button(X::A),
        East => XInputSlot::button(X::B),
        West => XInputSlot::button(X::X),
        North => XInputSlot::button(X::Y),
        LeftShoulder => XInputSlot::button(X::LeftShoulder),
        RightShoulder => XInputSlot::button(X::RightShoulder),
        LeftTrigger => XInputSlot::axis(X::LeftTrigger, AxisSign::Positive),
        RightTrigger => XInputSlot::axis(X::RightTrigger, AxisSign::Positive),
        LeftStickClick => XInputSlot::button(X::LeftThumb),
        RightStickClick => XInputSlot::button(X::RightThumb),
        Start => XInputSlot::button(X::Start),
        Select => XInputSlot::button(X::Back),
        Guide => XInputSlot::button(X::Guide),
        LeftStickUp => XInputSlot::axis(X::LeftY, AxisSign::Negative),
        LeftStickDown => XInputSlot::axis(X::LeftY, AxisSign::Positive),
        LeftStickLeft => XInputSlot::axis(X::LeftX, AxisSign::Negative),
        LeftStickRight => XInputSlot::axis(X::LeftX, AxisSign::Positive),
        RightStickUp => XInputSlot::axis(X::RightY, AxisSign::Negative),
        RightStickDown => XInputSlot::axis(X::RightY, AxisSign::Positive),
        RightStickLeft => XInputSlot::axis(X::RightX, AxisSign::Negative),
        RightStickRight => XInputSlot::axis(X::RightX, AxisSign::Positive),
        GunTrigger | GunReload | GunAuxA | GunAuxB => return None,
    };
    Some(slot)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct XInputEncoder;

impl NativeEncoder for XInputEncoder {
    fn encode(&self, input: LogicalInput, _device: &DeviceDescriptor) -> Encoded {
        slot_for(input).map(NativeBinding::XInput).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputTechnology;

    #[test]
    fn every_pad_input_has_a_slot() {
        for input in LogicalInput::all().filter(|i| !i.is_gun_role()) {
            assert!(slot_for(input).is_some(), "{input} has no XInput slot");
        }
    }

    #[test]
    fn stick_halves_follow_sign_convention() {
        let up = slot_for(LogicalInput::LeftStickUp);
        let down = slot_for(LogicalInput::LeftStickDown);
        assert_eq!(up.and_then(|s| s.sign), Some(AxisSign::Negative));
        assert_eq!(down.and_then(|s| s.sign), Some(AxisSign::Positive));
        assert_eq!(up.and_then(|s| s.opposite()), down);
    }

    #[test]
    fn gun_roles_are_unbound() {
        let device = DeviceDescriptor::new(InputTechnology::XInput, 1);
        assert!(XInputEncoder
            .encode(LogicalInput::GunTrigger, &device)
            .is_unbound());
    }
}
