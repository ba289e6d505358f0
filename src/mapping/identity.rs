//! Eindeutige Geräteidentitäten für baugleiche Controller
//!
//! Geräte mit gleichem Fingerprint werden nach ihrem nativen Index sortiert
//! und erhalten Offsets 0..n. Der Offset wird auf die letzte Hex-Stelle der
//! Basis-GUID addiert (mit Übertrag). Ab dem 17. baugleichen Gerät schlägt
//! die Auflösung für dieses Gerät fehl.

use crate::controller::{DeviceDescriptor, Fingerprint};
use crate::mapping::BindingError;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Maximale Anzahl baugleicher Geräte
pub const MAX_IDENTICAL_DEVICES: usize = 16;

/// Aufgelöste Identität eines Geräts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub player_index: u8,
    pub fingerprint: Fingerprint,
    /// Position innerhalb der Gruppe baugleicher Geräte
    pub offset: u8,
    /// Eindeutiger Identitätsstring
    pub identity: String,
}

/// Ergebnis pro Gerät, in der Reihenfolge der Eingabe
pub type IdentityResult = Result<DeviceIdentity, BindingError>;

/// Vergibt Identitäten für alle Geräte einer Sitzung.
///
/// Die Reihenfolge der Ergebnisse entspricht der Reihenfolge von `devices`.
pub fn resolve_identities(devices: &[DeviceDescriptor]) -> Vec<IdentityResult> {
    let mut groups: BTreeMap<Fingerprint, Vec<usize>> = BTreeMap::new();
    for (pos, device) in devices.iter().enumerate() {
        groups.entry(device.fingerprint()).or_default().push(pos);
    }

    let mut offsets = vec![0usize; devices.len()];
    for (fingerprint, mut members) in groups {
        members.sort_by_key(|&pos| (devices[pos].native_index, devices[pos].player_index));
        if members.len() > 1 {
            debug!("{} identical devices share {}", members.len(), fingerprint);
        }
        for (offset, pos) in members.into_iter().enumerate() {
            offsets[pos] = offset;
        }
    }

    devices
        .iter()
        .zip(offsets)
        .map(|(device, offset)| assign(device, offset))
        .collect()
}

fn assign(device: &DeviceDescriptor, offset: usize) -> IdentityResult {
    let fingerprint = device.fingerprint();

    if offset >= MAX_IDENTICAL_DEVICES {
        warn!(
            "Rejecting player {}: identical device #{} of {}",
            device.player_index,
            offset + 1,
            fingerprint
        );
        return Err(BindingError::DisambiguationOverflow {
            fingerprint: fingerprint.to_string(),
            offset,
            limit: MAX_IDENTICAL_DEVICES,
        });
    }

    let identity = add_to_hex_tail(fingerprint.guid(), offset).ok_or_else(|| {
        BindingError::DisambiguationOverflow {
            fingerprint: fingerprint.to_string(),
            offset,
            limit: MAX_IDENTICAL_DEVICES,
        }
    })?;

    Ok(DeviceIdentity {
        player_index: device.player_index,
        fingerprint,
        offset: offset as u8,
        identity,
    })
}

/// Addiert `offset` auf die Hex-Zahl am Ende von `base`.
///
/// Nur die Stellen, die der Übertrag erreicht, ändern sich. Läuft der
/// Übertrag über den Anfang hinaus, gibt es kein Ergebnis.
fn add_to_hex_tail(base: &str, offset: usize) -> Option<String> {
    let mut digits: Vec<u32> = base
        .chars()
        .map(|c| c.to_digit(16))
        .collect::<Option<Vec<_>>>()?;

    let mut carry = offset as u32;
    for digit in digits.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = *digit + carry;
        *digit = sum % 16;
        carry = sum / 16;
    }
    if carry != 0 {
        return None;
    }

    digits
        .into_iter()
        .map(|d| std::char::from_digit(d, 16))
        .collect()
}
