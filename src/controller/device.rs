use serde::{Deserialize, Serialize};
use std::fmt;

/// Hersteller-ID von Nintendo (beeinflusst den Face-Button-Tausch)
pub const NINTENDO_VENDOR_ID: u16 = 0x057e;

/// Präfix der Pseudo-GUID für XInput-Geräte ("xinput" in ASCII)
const XINPUT_GUID_PREFIX: &str = "78696e707574";

/// Länge einer GUID im SDL-Format (Hex-Zeichen)
pub const GUID_LEN: usize = 32;

// Input technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputTechnology {
    Keyboard,
    #[serde(rename = "xinput")]
    XInput,
    #[serde(rename = "dinput", alias = "rawinput")]
    DirectInput,
    Sdl,
    Mouse,
}

impl InputTechnology {
    fn tag(self) -> u16 {
        match self {
            InputTechnology::Keyboard => 0x6b62,
            InputTechnology::XInput => 0x7869,
            InputTechnology::DirectInput => 0x6469,
            InputTechnology::Sdl => 0x7364,
            InputTechnology::Mouse => 0x6d73,
        }
    }
}

impl fmt::Display for InputTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputTechnology::Keyboard => write!(f, "Keyboard"),
            InputTechnology::XInput => write!(f, "XInput"),
            InputTechnology::DirectInput => write!(f, "DInput"),
            InputTechnology::Sdl => write!(f, "SDL"),
            InputTechnology::Mouse => write!(f, "Mouse"),
        }
    }
}

/// Fakten über ein angeschlossenes Gerät, einmal pro Sitzung erzeugt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub technology: InputTechnology,
    #[serde(default)]
    pub vendor_id: u16,
    #[serde(default)]
    pub product_id: u16,
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub axis_count: u8,
    #[serde(default)]
    pub hat_count: u8,
    /// Spielerplatz, 1-basiert und eindeutig pro Sitzung
    pub player_index: u8,
    /// Index in der Aufzählungsreihenfolge des Treibers
    #[serde(default)]
    pub native_index: u8,
    /// XInput-Capability-Subtyp (nur für XInput relevant)
    #[serde(default)]
    pub xinput_subtype: u8,
}

impl DeviceDescriptor {
    pub fn new(technology: InputTechnology, player_index: u8) -> Self {
        Self {
            technology,
            vendor_id: 0,
            product_id: 0,
            guid: String::new(),
            name: String::new(),
            axis_count: 0,
            hat_count: 0,
            player_index,
            native_index: player_index.saturating_sub(1),
            xinput_subtype: 1,
        }
    }

    pub fn is_nintendo_vendor(&self) -> bool {
        self.vendor_id == NINTENDO_VENDOR_ID
    }

    pub fn is_keyboard(&self) -> bool {
        self.technology == InputTechnology::Keyboard
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }
}

/// Technologie + Hersteller + Produkt + normalisierte GUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint {
    pub technology: InputTechnology,
    pub vendor_id: u16,
    pub product_id: u16,
    guid: String,
}

impl Fingerprint {
    pub fn of(device: &DeviceDescriptor) -> Self {
        let guid = match device.technology {
            // XInput liefert keine echte GUID
            InputTechnology::XInput => xinput_pseudo_guid(device.xinput_subtype),
            _ if is_hex_guid(&device.guid) => normalize_guid(&device.guid),
            _ => synthesize_guid(device.technology, device.vendor_id, device.product_id),
        };

        Self {
            technology: device.technology,
            vendor_id: device.vendor_id,
            product_id: device.product_id,
            guid,
        }
    }

    /// Normalisierte GUID (32 Hex-Zeichen, Kleinbuchstaben)
    pub fn guid(&self) -> &str {
        &self.guid
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:04x}:{:04x}:{}",
            self.technology, self.vendor_id, self.product_id, self.guid
        )
    }
}

/// XInput-GUID nach SDL-Schema aus dem Capability-Subtyp
pub fn xinput_pseudo_guid(subtype: u8) -> String {
    let mut guid = format!("{}{:02x}", XINPUT_GUID_PREFIX, subtype);
    while guid.len() < GUID_LEN {
        guid.push('0');
    }
    guid
}

pub fn is_hex_guid(guid: &str) -> bool {
    guid.len() == GUID_LEN && guid.chars().all(|c| c.is_ascii_hexdigit())
}

/// Setzt die CRC-Nibbles (Zeichen 4..8) einer SDL-GUID auf Null.
///
/// SDL trägt dort eine Prüfsumme des Gerätenamens ein, die sich zwischen
/// Treiberversionen ändert und für den Abgleich nicht taugt.
pub fn normalize_guid(guid: &str) -> String {
    let lower = guid.to_ascii_lowercase();
    if !is_hex_guid(&lower) {
        return lower;
    }
    format!("{}0000{}", &lower[..4], &lower[8..])
}

fn synthesize_guid(technology: InputTechnology, vendor_id: u16, product_id: u16) -> String {
    format!(
        "{:04x}0000{:04x}0000{:04x}000000000000",
        technology.tag(),
        vendor_id.swap_bytes(),
        product_id.swap_bytes()
    )
}

/// Liest Hersteller und Produkt aus einer SDL-GUID (Little Endian)
pub fn vendor_product_from_guid(guid: &str) -> Option<(u16, u16)> {
    if !is_hex_guid(guid) {
        return None;
    }
    let vendor = u16::from_str_radix(&guid[8..12], 16).ok()?.swap_bytes();
    let product = u16::from_str_radix(&guid[16..20], 16).ok()?.swap_bytes();
    Some((vendor, product))
}
