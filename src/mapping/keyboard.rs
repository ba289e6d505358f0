//! Implementierung des Keyboard-Encoders
//!
//! Logische Eingabe → physische Taste (Standardbelegung) → Ländervariante
//! (AZERTY-Tausch) → Tastencode im Schema des Ziels.

use crate::controller::{DeviceDescriptor, LogicalInput};
use crate::mapping::encoder::{Encoded, NativeBinding, NativeEncoder};
use std::fmt;
use tracing::debug;

macro_rules! key_table {
    ($($key:ident => $scan:expr, $hid:expr, $dik_name:expr, $ra_name:expr, $qt_name:expr;)*) => {
        /// Physische Taste, benannt nach der QWERTY-Beschriftung
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($key,)*
        }

        impl Key {
            /// Scan-Code (Set 1, entspricht den DirectInput-DIK-Codes)
            pub fn scan_code(self) -> u16 {
                match self {
                    $(Key::$key => $scan,)*
                }
            }

            /// USB-HID-Usage (entspricht SDL-Scancodes)
            pub fn hid_usage(self) -> u16 {
                match self {
                    $(Key::$key => $hid,)*
                }
            }

            fn dinput_name(self) -> &'static str {
                match self {
                    $(Key::$key => $dik_name,)*
                }
            }

            fn retroarch_name(self) -> &'static str {
                match self {
                    $(Key::$key => $ra_name,)*
                }
            }

            fn qt_name(self) -> &'static str {
                match self {
                    $(Key::$key => $qt_name,)*
                }
            }
        }
    };
}

key_table! {
    A => 0x1e, 4, "A", "a", "A";
    B => 0x30, 5, "B", "b", "B";
    C => 0x2e, 6, "C", "c", "C";
    D => 0x20, 7, "D", "d", "D";
    E => 0x12, 8, "E", "e", "E";
    F => 0x21, 9, "F", "f", "F";
    G => 0x22, 10, "G", "g", "G";
    H => 0x23, 11, "H", "h", "H";
    I => 0x17, 12, "I", "i", "I";
    J => 0x24, 13, "J", "j", "J";
    K => 0x25, 14, "K", "k", "K";
    L => 0x26, 15, "L", "l", "L";
    M => 0x32, 16, "M", "m", "M";
    N => 0x31, 17, "N", "n", "N";
    O => 0x18, 18, "O", "o", "O";
    P => 0x19, 19, "P", "p", "P";
    Q => 0x10, 20, "Q", "q", "Q";
    R => 0x13, 21, "R", "r", "R";
    S => 0x1f, 22, "S", "s", "S";
    T => 0x14, 23, "T", "t", "T";
    U => 0x16, 24, "U", "u", "U";
    V => 0x2f, 25, "V", "v", "V";
    W => 0x11, 26, "W", "w", "W";
    X => 0x2d, 27, "X", "x", "X";
    Y => 0x15, 28, "Y", "y", "Y";
    Z => 0x2c, 29, "Z", "z", "Z";
    Num1 => 0x02, 30, "1", "num1", "1";
    Num2 => 0x03, 31, "2", "num2", "2";
    Num3 => 0x04, 32, "3", "num3", "3";
    Num4 => 0x05, 33, "4", "num4", "4";
    Num5 => 0x06, 34, "5", "num5", "5";
    Num6 => 0x07, 35, "6", "num6", "6";
    Num7 => 0x08, 36, "7", "num7", "7";
    Num8 => 0x09, 37, "8", "num8", "8";
    Num9 => 0x0a, 38, "9", "num9", "9";
    Num0 => 0x0b, 39, "0", "num0", "0";
    Enter => 0x1c, 40, "RETURN", "enter", "Return";
    Escape => 0x01, 41, "ESCAPE", "escape", "Escape";
    Backspace => 0x0e, 42, "BACK", "backspace", "Backspace";
    Tab => 0x0f, 43, "TAB", "tab", "Tab";
    Space => 0x39, 44, "SPACE", "space", "Space";
    Minus => 0x0c, 45, "MINUS", "minus", "Minus";
    Equals => 0x0d, 46, "EQUALS", "equals", "Equal";
    Semicolon => 0x27, 51, "SEMICOLON", "semicolon", "Semicolon";
    Comma => 0x33, 54, "COMMA", "comma", "Comma";
    Period => 0x34, 55, "PERIOD", "period", "Period";
    Slash => 0x35, 56, "SLASH", "slash", "Slash";
    F1 => 0x3b, 58, "F1", "f1", "F1";
    F2 => 0x3c, 59, "F2", "f2", "F2";
    F3 => 0x3d, 60, "F3", "f3", "F3";
    F4 => 0x3e, 61, "F4", "f4", "F4";
    F5 => 0x3f, 62, "F5", "f5", "F5";
    F6 => 0x40, 63, "F6", "f6", "F6";
    F7 => 0x41, 64, "F7", "f7", "F7";
    F8 => 0x42, 65, "F8", "f8", "F8";
    F9 => 0x43, 66, "F9", "f9", "F9";
    F10 => 0x44, 67, "F10", "f10", "F10";
    F11 => 0x57, 68, "F11", "f11", "F11";
    F12 => 0x58, 69, "F12", "f12", "F12";
    Insert => 0xd2, 73, "INSERT", "insert", "Insert";
    Home => 0xc7, 74, "HOME", "home", "Home";
    PageUp => 0xc9, 75, "PRIOR", "pageup", "PageUp";
    Delete => 0xd3, 76, "DELETE", "del", "Delete";
    End => 0xcf, 77, "END", "end", "End";
    PageDown => 0xd1, 78, "NEXT", "pagedown", "PageDown";
    ArrowRight => 0xcd, 79, "RIGHT", "right", "Right";
    ArrowLeft => 0xcb, 80, "LEFT", "left", "Left";
    ArrowDown => 0xd0, 81, "DOWN", "down", "Down";
    ArrowUp => 0xc8, 82, "UP", "up", "Up";
    LeftCtrl => 0x1d, 224, "LCONTROL", "ctrl", "Control";
    LeftShift => 0x2a, 225, "LSHIFT", "shift", "Shift";
    LeftAlt => 0x38, 226, "LMENU", "alt", "Alt";
    RightShift => 0x36, 229, "RSHIFT", "rshift", "Shift";
}

/// Tastencode-Schema eines Ziels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNumbering {
    /// DIK-Codes (Scan-Code Set 1)
    DirectInput,
    /// USB-HID-Usage / SDL-Scancode
    Sdl,
    /// DirectInput-Namen ("RETURN", "LSHIFT")
    DirectInputName,
    /// RetroArch-Namen ("enter", "rshift")
    RetroArchName,
    /// Qt-Namen ("Return", "Shift")
    QtName,
}

/// Tastencode, wie ihn das Ziel erwartet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyToken {
    Code(u32),
    Name(&'static str),
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Code(code) => write!(f, "{}", code),
            KeyToken::Name(name) => f.write_str(name),
        }
    }
}

impl KeyNumbering {
    pub fn translate(self, key: Key) -> KeyToken {
        match self {
            KeyNumbering::DirectInput => KeyToken::Code(key.scan_code() as u32),
            KeyNumbering::Sdl => KeyToken::Code(key.hid_usage() as u32),
            KeyNumbering::DirectInputName => KeyToken::Name(key.dinput_name()),
            KeyNumbering::RetroArchName => KeyToken::Name(key.retroarch_name()),
            KeyNumbering::QtName => KeyToken::Name(key.qt_name()),
        }
    }
}

/// Tastaturlayout der Host-Sprache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Azerty,
}

/// Sprachkennungen mit AZERTY-Tastatur
pub const AZERTY_LOCALES: &[&str] = &[
    "fr-FR", "fr-BE", "fr-LU", "fr-MC", "br-FR", "co-FR", "oc-FR",
];

/// Tauschtabelle für AZERTY: gemeinte Taste → physische Taste
const AZERTY_SUBSTITUTIONS: &[(Key, Key)] = &[
    (Key::A, Key::Q),
    (Key::Q, Key::A),
    (Key::Z, Key::W),
    (Key::W, Key::Z),
    (Key::M, Key::Semicolon),
    (Key::Comma, Key::M),
];

impl KeyboardLayout {
    pub fn from_locale(locale: &str) -> Self {
        let normalized = locale.replace('_', "-");
        if AZERTY_LOCALES
            .iter()
            .any(|l| l.eq_ignore_ascii_case(&normalized))
        {
            KeyboardLayout::Azerty
        } else {
            KeyboardLayout::Qwerty
        }
    }

    /// Physische Taste für eine gemeinte Taste
    pub fn remap(self, key: Key) -> Key {
        match self {
            KeyboardLayout::Qwerty => key,
            KeyboardLayout::Azerty => AZERTY_SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == key)
                .map(|(_, to)| *to)
                .unwrap_or(key),
        }
    }
}

/// Standardbelegung der Tastatur für alle Ziele
pub fn default_key(input: LogicalInput) -> Option<Key> {
    use LogicalInput::*;
    let key = match input {
        Up => Key::ArrowUp,
        Down => Key::ArrowDown,
        Left => Key::ArrowLeft,
        Right => Key::ArrowRight,
        South => Key::Z,
        East => Key::X,
        West => Key::A,
        North => Key::S,
        LeftShoulder => Key::Q,
        RightShoulder => Key::W,
        LeftTrigger => Key::Num1,
        RightTrigger => Key::Num2,
        LeftStickClick => Key::Num3,
        RightStickClick => Key::Num4,
        Start => Key::Enter,
        Select => Key::RightShift,
        LeftStickUp => Key::I,
        LeftStickDown => Key::K,
        LeftStickLeft => Key::J,
        LeftStickRight => Key::L,
        RightStickUp => Key::T,
        RightStickDown => Key::G,
        RightStickLeft => Key::F,
        RightStickRight => Key::H,
        Guide => Key::Tab,
        GunTrigger | GunReload | GunAuxA | GunAuxB => return None,
    };
    Some(key)
}

/// Konfiguration des Keyboard-Encoders
#[derive(Debug, Clone)]
pub struct KeyboardEncoder {
    numbering: KeyNumbering,
    layout: KeyboardLayout,
}

impl KeyboardEncoder {
    pub fn new(numbering: KeyNumbering, layout: KeyboardLayout) -> Self {
        Self { numbering, layout }
    }

    /// Übersetzt eine feste Taste (z.B. Hotkey-Fallback) ohne Ländervariante
    pub fn encode_key(&self, key: Key) -> KeyToken {
        self.numbering.translate(key)
    }
}

impl NativeEncoder for KeyboardEncoder {
    fn encode(&self, input: LogicalInput, _device: &DeviceDescriptor) -> Encoded {
        let Some(key) = default_key(input) else {
            return Encoded::Unbound;
        };
        let physical = self.layout.remap(key);
        if physical != key {
            debug!("Layout {:?} moves {:?} to {:?}", self.layout, key, physical);
        }
        Encoded::Bound(NativeBinding::Key(self.numbering.translate(physical)))
    }
}
