//! Gemeinsame Typen und Trait für die nativen Encoder
//!
//! Jeder Encoder übersetzt eine logische Eingabe für genau eine
//! Eingabetechnologie. Das Ergebnis ist ein typisiertes [`NativeBinding`],
//! das erst das Ziel in seinen String übersetzt.

use crate::controller::{DeviceDescriptor, InputTechnology, LogicalInput};
use crate::mapping::keyboard::{KeyToken, KeyboardEncoder};
use crate::mapping::mouse::{MouseAxis, MouseEncoder};
use crate::mapping::sdl::SdlEncoder;
use crate::mapping::xinput::{XInputEncoder, XInputSlot};

/// Vorzeichen einer Achsenhälfte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSign {
    Negative,
    Positive,
}

impl AxisSign {
    pub fn from_positive(positive: bool) -> Self {
        if positive {
            AxisSign::Positive
        } else {
            AxisSign::Negative
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            AxisSign::Negative => AxisSign::Positive,
            AxisSign::Positive => AxisSign::Negative,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            AxisSign::Negative => '-',
            AxisSign::Positive => '+',
        }
    }

    pub fn is_positive(self) -> bool {
        self == AxisSign::Positive
    }
}

/// Richtung eines Hat-Switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Up,
    Right,
    Down,
    Left,
}

impl HatDirection {
    /// SDL-Bitmaske: 1 oben, 2 rechts, 4 unten, 8 links
    pub fn from_mask(mask: u8) -> Option<Self> {
        match mask {
            1 => Some(HatDirection::Up),
            2 => Some(HatDirection::Right),
            4 => Some(HatDirection::Down),
            8 => Some(HatDirection::Left),
            _ => None,
        }
    }

    pub fn mask(self) -> u8 {
        match self {
            HatDirection::Up => 1,
            HatDirection::Right => 2,
            HatDirection::Down => 4,
            HatDirection::Left => 8,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, HatDirection::Up | HatDirection::Down)
    }

    /// Oben und links sind negativ
    pub fn sign(self) -> AxisSign {
        match self {
            HatDirection::Up | HatDirection::Left => AxisSign::Negative,
            HatDirection::Right | HatDirection::Down => AxisSign::Positive,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            HatDirection::Up => HatDirection::Down,
            HatDirection::Down => HatDirection::Up,
            HatDirection::Left => HatDirection::Right,
            HatDirection::Right => HatDirection::Left,
        }
    }
}

/// Konkrete native Eingabe eines Geräts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeBinding {
    XInput(XInputSlot),
    Button(u16),
    Hat { hat: u8, direction: HatDirection },
    Axis { index: u8, sign: AxisSign },
    Key(KeyToken),
    MouseButton(u8),
    MouseAxis { axis: MouseAxis, sign: AxisSign },
}

impl NativeBinding {
    /// Gegenstück einer Achsenhälfte; Buttons und Tasten haben keins
    pub fn opposite(&self) -> Option<NativeBinding> {
        match self {
            NativeBinding::XInput(slot) => slot.opposite().map(NativeBinding::XInput),
            NativeBinding::Hat { hat, direction } => Some(NativeBinding::Hat {
                hat: *hat,
                direction: direction.opposite(),
            }),
            NativeBinding::Axis { index, sign } => Some(NativeBinding::Axis {
                index: *index,
                sign: sign.flipped(),
            }),
            NativeBinding::MouseAxis { axis, sign } => Some(NativeBinding::MouseAxis {
                axis: *axis,
                sign: sign.flipped(),
            }),
            NativeBinding::Button(_) | NativeBinding::Key(_) | NativeBinding::MouseButton(_) => {
                None
            }
        }
    }
}

/// Ergebnis eines Encoders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Bound(NativeBinding),
    Unbound,
}

impl Encoded {
    pub fn bound(&self) -> Option<&NativeBinding> {
        match self {
            Encoded::Bound(binding) => Some(binding),
            Encoded::Unbound => None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, Encoded::Unbound)
    }
}

impl From<Option<NativeBinding>> for Encoded {
    fn from(binding: Option<NativeBinding>) -> Self {
        binding.map(Encoded::Bound).unwrap_or(Encoded::Unbound)
    }
}

/// Trait für die Encoder einer Eingabetechnologie
///
/// `encode` ist total: jede logische Eingabe ergibt ein Binding oder `Unbound`.
pub trait NativeEncoder {
    /// Übersetzt eine logische Eingabe für das gegebene Gerät
    fn encode(&self, input: LogicalInput, device: &DeviceDescriptor) -> Encoded;
}

/// Alle Encoder einer Sitzung, nach Technologie verteilt
pub struct EncoderSet<'a> {
    pub xinput: XInputEncoder,
    pub sdl: SdlEncoder<'a>,
    pub keyboard: KeyboardEncoder,
    pub mouse: MouseEncoder,
}

impl EncoderSet<'_> {
    pub fn for_technology(&self, technology: InputTechnology) -> &dyn NativeEncoder {
        match technology {
            InputTechnology::XInput => &self.xinput,
            InputTechnology::DirectInput | InputTechnology::Sdl => &self.sdl,
            InputTechnology::Keyboard => &self.keyboard,
            InputTechnology::Mouse => &self.mouse,
        }
    }

    pub fn encode(
        &self,
        technology: InputTechnology,
        input: LogicalInput,
        device: &DeviceDescriptor,
    ) -> Encoded {
        self.for_technology(technology).encode(input, device)
    }
}
