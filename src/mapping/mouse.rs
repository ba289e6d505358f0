//! Maus/Lightgun-Encoder
//!
//! Abzug, Nachladen (Schuss neben den Bildschirm), Zusatztasten sowie Start und
//! Select liegen auf Maustasten; der linke Stick steht für relative
//! Cursorbewegung.

use crate::controller::{DeviceDescriptor, LogicalInput};
use crate::mapping::encoder::{AxisSign, Encoded, NativeBinding, NativeEncoder};

pub const PRIMARY_BUTTON: u8 = 1;
pub const SECONDARY_BUTTON: u8 = 2;
pub const MIDDLE_BUTTON: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAxis {
    X,
    Y,
}

/// Welche Maustaste welche Lightgun-Rolle übernimmt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GunButtonRoles {
    pub reload: u8,
    pub aux_a: u8,
    pub aux_b: u8,
    pub start: u8,
    pub select: u8,
}

impl Default for GunButtonRoles {
    fn default() -> Self {
        Self {
            reload: SECONDARY_BUTTON,
            aux_a: MIDDLE_BUTTON,
            aux_b: 6,
            start: 4,
            select: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseEncoder {
    roles: GunButtonRoles,
    /// Primär- und Sekundärtaste tauschen (Linkshänder)
    invert_buttons: bool,
}

impl MouseEncoder {
    pub fn new(roles: GunButtonRoles, invert_buttons: bool) -> Self {
        Self {
            roles,
            invert_buttons,
        }
    }

    fn physical(&self, button: u8) -> u8 {
        match (self.invert_buttons, button) {
            (true, PRIMARY_BUTTON) => SECONDARY_BUTTON,
            (true, SECONDARY_BUTTON) => PRIMARY_BUTTON,
            _ => button,
        }
    }

    fn button_for(&self, input: LogicalInput) -> Option<u8> {
        use LogicalInput::*;
        let button = match input {
            GunTrigger | South => PRIMARY_BUTTON,
            GunReload | East => self.roles.reload,
            GunAuxA => self.roles.aux_a,
            GunAuxB => self.roles.aux_b,
            Start => self.roles.start,
            Select => self.roles.select,
            _ => return None,
        };
        Some(self.physical(button))
    }
}

impl NativeEncoder for MouseEncoder {
    fn encode(&self, input: LogicalInput, _device: &DeviceDescriptor) -> Encoded {
        use LogicalInput::*;
        let axis = match input {
            LeftStickLeft => Some((MouseAxis::X, AxisSign::Negative)),
            LeftStickRight => Some((MouseAxis::X, AxisSign::Positive)),
            LeftStickUp => Some((MouseAxis::Y, AxisSign::Negative)),
            LeftStickDown => Some((MouseAxis::Y, AxisSign::Positive)),
            _ => None,
        };
        if let Some((axis, sign)) = axis {
            return Encoded::Bound(NativeBinding::MouseAxis { axis, sign });
        }
        self.button_for(input).map(NativeBinding::MouseButton).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputTechnology;

    fn mouse() -> DeviceDescriptor {
        DeviceDescriptor::new(InputTechnology::Mouse, 1)
    }

    #[test]
    fn default_roles() {
        let encoder = MouseEncoder::default();
        assert_eq!(
            encoder.encode(LogicalInput::GunTrigger, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(1))
        );
        assert_eq!(
            encoder.encode(LogicalInput::GunReload, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(2))
        );
    }

    #[test]
    fn inverted_buttons_swap_primary_and_secondary() {
        let encoder = MouseEncoder::new(GunButtonRoles::default(), true);
        assert_eq!(
            encoder.encode(LogicalInput::GunTrigger, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(2))
        );
        assert_eq!(
            encoder.encode(LogicalInput::GunReload, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(1))
        );
        assert_eq!(
            encoder.encode(LogicalInput::GunAuxA, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(3))
        );
    }

    #[test]
    fn role_table_moves_reload() {
        let roles = GunButtonRoles {
            reload: MIDDLE_BUTTON,
            aux_a: SECONDARY_BUTTON,
            ..GunButtonRoles::default()
        };
        let encoder = MouseEncoder::new(roles, false);
        assert_eq!(
            encoder.encode(LogicalInput::GunReload, &mouse()),
            Encoded::Bound(NativeBinding::MouseButton(3))
        );
    }

    #[test]
    fn stick_becomes_relative_cursor() {
        let encoder = MouseEncoder::default();
        let left = encoder.encode(LogicalInput::LeftStickLeft, &mouse());
        let right = encoder.encode(LogicalInput::LeftStickRight, &mouse());
        assert_eq!(left.bound().and_then(NativeBinding::opposite).as_ref(), right.bound());
        assert!(encoder.encode(LogicalInput::North, &mouse()).is_unbound());
    }
}
