//! DirectInput/SDL-Encoder auf Basis der Community-Datenbank
//!
//! Die Datenbank folgt dem Format von `gamecontrollerdb.txt`:
//!
//! ```text
//! 03000000790000000600000000000000,Generic USB Joystick,a:b2,b:b1,dpup:h0.1,leftx:a0,lefty:a1,platform:Windows,
//! ```
//!
//! Rohe Bindings haben drei Formen: `bN` (Button), `hH.M` (Hat mit SDL-Maske)
//! und `aN` (Achse, optional `+`/`-` für Halbachsen und `~` für Invertierung).

use crate::controller::device::{normalize_guid, vendor_product_from_guid};
use crate::controller::{DeviceDescriptor, Fingerprint, LogicalInput};
use crate::mapping::encoder::{AxisSign, Encoded, HatDirection, NativeBinding, NativeEncoder};
use crate::mapping::BindingError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Produkt-IDs, deren Treiber zusätzliche Achsen melden, die keine sind.
///
/// Beim Umrechnen eines Hats in Achsen-Indizes wird der Offset vom naiven
/// Index abgezogen.
pub const HAT_FIX: &[(u16, u8)] = &[
    // DualShock 3 (Sixaxis-Treiber)
    (0x0268, 2),
    // DualShock 4 v1
    (0x05c4, 1),
    // DualShock 4 v2
    (0x09cc, 1),
    // 8BitDo SN30 Pro im D-Modus
    (0x6001, 2),
    // Mayflash GameCube-Adapter
    (0x1844, 1),
];

/// Generisches Layout für Geräte ohne Datenbankeintrag
const GENERIC_MAPPING: &str = "00000000000000000000000000000000,Generic Gamepad,\
a:b0,b:b1,x:b2,y:b3,leftshoulder:b4,rightshoulder:b5,back:b6,start:b7,\
leftstick:b8,rightstick:b9,guide:b10,dpup:h0.1,dpright:h0.2,dpdown:h0.4,dpleft:h0.8,\
leftx:a0,lefty:a1,rightx:a2,righty:a3,lefttrigger:a4,righttrigger:a5,";

pub fn hat_fix_offset(product_id: u16) -> u8 {
    HAT_FIX
        .iter()
        .find(|(product, _)| *product == product_id)
        .map(|(_, offset)| *offset)
        .unwrap_or(0)
}

/// Rohes Binding aus der Datenbank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawBinding {
    Button(u16),
    Hat {
        hat: u8,
        mask: u8,
    },
    Axis {
        index: u8,
        half: Option<AxisSign>,
        inverted: bool,
    },
}

impl RawBinding {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (half, rest) = match raw.as_bytes().first()? {
            b'+' => (Some(AxisSign::Positive), &raw[1..]),
            b'-' => (Some(AxisSign::Negative), &raw[1..]),
            _ => (None, raw),
        };
        let (inverted, rest) = match rest.strip_suffix('~') {
            Some(stripped) => (true, stripped),
            None => (false, rest),
        };

        if let Some(index) = rest.strip_prefix('b') {
            if half.is_some() || inverted {
                return None;
            }
            return index.parse().ok().map(RawBinding::Button);
        }
        if let Some(hat) = rest.strip_prefix('h') {
            let (hat, mask) = hat.split_once('.')?;
            return Some(RawBinding::Hat {
                hat: hat.parse().ok()?,
                mask: mask.parse().ok()?,
            });
        }
        if let Some(index) = rest.strip_prefix('a') {
            return Some(RawBinding::Axis {
                index: index.parse().ok()?,
                half,
                inverted,
            });
        }
        None
    }
}

/// Ein Datenbankeintrag für einen Fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbEntry {
    pub guid: String,
    pub name: String,
    pub platform: Option<String>,
    bindings: HashMap<String, RawBinding>,
}

impl DbEntry {
    /// Parst eine Zeile; Kommentare und Leerzeilen ergeben `None`
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let mut fields = line.split(',');
        let guid = normalize_guid(fields.next()?.trim());
        let name = fields.next()?.trim().to_string();

        let mut bindings = HashMap::new();
        let mut platform = None;
        for field in fields {
            let Some((role, raw)) = field.split_once(':') else {
                continue;
            };
            if role == "platform" {
                platform = Some(raw.trim().to_string());
                continue;
            }
            match RawBinding::parse(raw) {
                Some(binding) => {
                    bindings.insert(role.trim().to_string(), binding);
                }
                None => debug!("Skipping unparsable binding {}:{} for {}", role, raw, name),
            }
        }

        Some(Self {
            guid,
            name,
            platform,
            bindings,
        })
    }

    pub fn generic() -> Self {
        // Die Konstante ist eine gültige Zeile
        Self::parse_line(GENERIC_MAPPING).unwrap_or_else(|| Self {
            guid: String::new(),
            name: "Generic Gamepad".to_string(),
            platform: None,
            bindings: HashMap::new(),
        })
    }

    pub fn binding(&self, role: &str) -> Option<RawBinding> {
        self.bindings.get(role).copied()
    }
}

/// Community-Datenbank, einmal pro Sitzung geladen und danach unveränderlich
#[derive(Debug, Clone, Default)]
pub struct CommunityDatabase {
    entries: HashMap<String, DbEntry>,
}

impl CommunityDatabase {
    /// Parst den Dateiinhalt. Mit `platform` werden Einträge anderer
    /// Plattformen verworfen; Einträge ohne Plattform gelten überall.
    pub fn parse(text: &str, platform: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        for entry in text.lines().filter_map(DbEntry::parse_line) {
            let wanted = match (platform, entry.platform.as_deref()) {
                (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual),
                _ => true,
            };
            if wanted {
                entries.insert(entry.guid.clone(), entry);
            }
        }
        Self { entries }
    }

    pub fn load(path: &Path, platform: Option<&str>) -> Result<Self, BindingError> {
        let text = fs::read_to_string(path).map_err(|e| BindingError::CatalogLoadFailure {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let db = Self::parse(&text, platform);
        info!("Loaded {} community mappings from {}", db.len(), path.display());
        Ok(db)
    }

    /// Wie [`load`](Self::load), aber ein Fehler ergibt eine leere Datenbank
    pub fn load_or_empty(path: &Path, platform: Option<&str>) -> Self {
        Self::load(path, platform).unwrap_or_else(|e| {
            warn!("{}; continuing without community mappings", e);
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sucht erst nach GUID, dann nach Hersteller und Produkt
    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&DbEntry> {
        if let Some(entry) = self.entries.get(fingerprint.guid()) {
            return Some(entry);
        }
        if fingerprint.vendor_id == 0 && fingerprint.product_id == 0 {
            return None;
        }

        let mut candidates: Vec<&DbEntry> = self
            .entries
            .values()
            .filter(|entry| {
                vendor_product_from_guid(&entry.guid)
                    == Some((fingerprint.vendor_id, fingerprint.product_id))
            })
            .collect();
        candidates.sort_by(|a, b| a.guid.cmp(&b.guid));
        candidates.into_iter().next()
    }
}

/// Wie Hats an das Ziel weitergegeben werden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HatMode {
    #[default]
    Native,
    /// Hat-Richtungen als Achsen hinter den echten Achsen
    AsAxes,
}

/// Datenbank-Rolle für eine logische Eingabe
pub fn role_for(input: LogicalInput) -> Option<&'static str> {
    use LogicalInput::*;
    let role = match input {
        Up => "dpup",
        Down => "dpdown",
        Left => "dpleft",
        Right => "dpright",
        South => "a",
        East => "b",
        West => "x",
        North => "y",
        LeftShoulder => "leftshoulder",
        RightShoulder => "rightshoulder",
        LeftTrigger => "lefttrigger",
        RightTrigger => "righttrigger",
        LeftStickClick => "leftstick",
        RightStickClick => "rightstick",
        Start => "start",
        Select => "back",
        Guide => "guide",
        LeftStickUp | LeftStickDown => "lefty",
        LeftStickLeft | LeftStickRight => "leftx",
        RightStickUp | RightStickDown => "righty",
        RightStickLeft | RightStickRight => "rightx",
        GunTrigger | GunReload | GunAuxA | GunAuxB => return None,
    };
    Some(role)
}

/// Achsen-Index eines Hats, korrigiert um den Hat-Fix des Produkts
///
/// `None`, wenn das Gerät weniger Hats meldet. `hat_count == 0` heißt unbekannt.
pub fn hat_axis_index(device: &DeviceDescriptor, hat: u8, direction: HatDirection) -> Option<u8> {
    if device.hat_count > 0 && hat >= device.hat_count {
        return None;
    }
    let naive = device.axis_count as u16 + hat as u16 * 2 + direction.is_vertical() as u16;
    let fixed = naive.saturating_sub(hat_fix_offset(device.product_id) as u16);
    u8::try_from(fixed).ok()
}

pub struct SdlEncoder<'a> {
    database: &'a CommunityDatabase,
    hat_mode: HatMode,
}

impl<'a> SdlEncoder<'a> {
    pub fn new(database: &'a CommunityDatabase, hat_mode: HatMode) -> Self {
        Self { database, hat_mode }
    }

    pub fn database(&self) -> &'a CommunityDatabase {
        self.database
    }

    /// Übersetzt mit einem bereits gefundenen (oder generischen) Eintrag
    pub fn encode_entry(
        &self,
        entry: &DbEntry,
        input: LogicalInput,
        device: &DeviceDescriptor,
    ) -> Encoded {
        let Some(raw) = role_for(input).and_then(|role| entry.binding(role)) else {
            return Encoded::Unbound;
        };
        self.convert(raw, input, device).into()
    }

    fn convert(
        &self,
        raw: RawBinding,
        input: LogicalInput,
        device: &DeviceDescriptor,
    ) -> Option<NativeBinding> {
        match raw {
            RawBinding::Button(index) => Some(NativeBinding::Button(index)),
            RawBinding::Hat { hat, mask } => {
                let direction = HatDirection::from_mask(mask)?;
                match self.hat_mode {
                    HatMode::Native => Some(NativeBinding::Hat { hat, direction }),
                    HatMode::AsAxes => Some(NativeBinding::Axis {
                        index: hat_axis_index(device, hat, direction)?,
                        sign: direction.sign(),
                    }),
                }
            }
            RawBinding::Axis {
                index,
                half,
                inverted,
            } => {
                let wanted = input
                    .stick_half()
                    .map(|(_, positive)| AxisSign::from_positive(positive))
                    .unwrap_or(AxisSign::Positive);
                let sign = half.unwrap_or(wanted);
                let sign = if inverted { sign.flipped() } else { sign };
                Some(NativeBinding::Axis { index, sign })
            }
        }
    }
}

impl NativeEncoder for SdlEncoder<'_> {
    fn encode(&self, input: LogicalInput, device: &DeviceDescriptor) -> Encoded {
        match self.database.lookup(&device.fingerprint()) {
            Some(entry) => self.encode_entry(entry, input, device),
            None => Encoded::Unbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InputTechnology;

    const LINE: &str = "03000000790000000600000000000000,Generic USB Joystick,a:b2,b:b1,x:b3,y:b0,\
back:b8,start:b9,leftshoulder:b4,rightshoulder:b5,lefttrigger:b6,righttrigger:b7,\
dpup:h0.1,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,leftx:a0,lefty:a1,rightx:a3,righty:a2~,platform:Windows,";

    fn device() -> DeviceDescriptor {
        let mut device = DeviceDescriptor::new(InputTechnology::DirectInput, 1);
        device.vendor_id = 0x0079;
        device.product_id = 0x0006;
        device.guid = "03000000790000000600000000000000".to_string();
        device.axis_count = 4;
        device
    }

    #[test]
    fn parses_all_raw_shapes() {
        assert_eq!(RawBinding::parse("b12"), Some(RawBinding::Button(12)));
        assert_eq!(
            RawBinding::parse("h0.4"),
            Some(RawBinding::Hat { hat: 0, mask: 4 })
        );
        assert_eq!(
            RawBinding::parse("-a3~"),
            Some(RawBinding::Axis {
                index: 3,
                half: Some(AxisSign::Negative),
                inverted: true
            })
        );
        assert_eq!(RawBinding::parse("q1"), None);
        assert_eq!(RawBinding::parse(""), None);
    }

    #[test]
    fn platform_filter_drops_foreign_entries() {
        assert_eq!(CommunityDatabase::parse(LINE, Some("Windows")).len(), 1);
        assert!(CommunityDatabase::parse(LINE, Some("Linux")).is_empty());
        assert_eq!(CommunityDatabase::parse(LINE, None).len(), 1);
    }

    #[test]
    fn lookup_ignores_crc_nibbles() {
        let db = CommunityDatabase::parse(LINE, None);
        let mut dev = device();
        dev.guid = "0300beef790000000600000000000000".to_string();
        assert!(db.lookup(&dev.fingerprint()).is_some());
    }

    #[test]
    fn lookup_falls_back_to_vendor_and_product() {
        let db = CommunityDatabase::parse(LINE, None);
        let mut dev = device();
        dev.guid = "05000000790000000600000001000000".to_string();
        assert!(db.lookup(&dev.fingerprint()).is_some());
    }

    #[test]
    fn inverted_axis_flips_requested_sign() {
        let db = CommunityDatabase::parse(LINE, None);
        let encoder = SdlEncoder::new(&db, HatMode::Native);
        let up = encoder.encode(LogicalInput::RightStickUp, &device());
        assert_eq!(
            up,
            Encoded::Bound(NativeBinding::Axis {
                index: 2,
                sign: AxisSign::Positive
            })
        );
    }

    #[test]
    fn unknown_device_is_unbound() {
        let db = CommunityDatabase::default();
        let encoder = SdlEncoder::new(&db, HatMode::Native);
        assert!(encoder.encode(LogicalInput::South, &device()).is_unbound());
    }

    #[test]
    fn hats_as_axes_sit_behind_real_axes() {
        let db = CommunityDatabase::parse(LINE, None);
        let encoder = SdlEncoder::new(&db, HatMode::AsAxes);
        let left = encoder.encode(LogicalInput::Left, &device());
        let down = encoder.encode(LogicalInput::Down, &device());
        assert_eq!(
            left,
            Encoded::Bound(NativeBinding::Axis {
                index: 4,
                sign: AxisSign::Negative
            })
        );
        assert_eq!(
            down,
            Encoded::Bound(NativeBinding::Axis {
                index: 5,
                sign: AxisSign::Positive
            })
        );
    }

    #[test]
    fn hat_beyond_reported_count_is_unbound() {
        let line = LINE.replace("dpdown:h0.4", "dpdown:h1.4");
        let db = CommunityDatabase::parse(&line, None);
        let encoder = SdlEncoder::new(&db, HatMode::AsAxes);

        // Ohne Hat-Angabe wird nichts verworfen
        assert_eq!(hat_axis_index(&device(), 1, HatDirection::Down), Some(7));

        let mut dev = device();
        dev.hat_count = 1;
        assert_eq!(hat_axis_index(&dev, 1, HatDirection::Down), None);
        assert!(encoder.encode(LogicalInput::Down, &dev).is_unbound());
        assert_eq!(
            encoder.encode(LogicalInput::Left, &dev),
            Encoded::Bound(NativeBinding::Axis {
                index: 4,
                sign: AxisSign::Negative
            })
        );
    }

    #[test]
    fn generic_entry_covers_the_pad_vocabulary() {
        let entry = DbEntry::generic();
        for input in LogicalInput::all().filter(|i| !i.is_gun_role()) {
            let role = role_for(input).unwrap_or_default();
            assert!(entry.binding(role).is_some(), "{role} missing");
        }
    }
}
