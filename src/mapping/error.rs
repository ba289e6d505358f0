//! Fehlerdefinitionen für die Binding-Engine

use crate::controller::LogicalInput;
use thiserror::Error;

/// Fehlertypen der Binding-Engine
///
/// Keiner dieser Fehler bricht die Sitzung ab; betroffene Geräte werden
/// übersprungen und die übrigen weiter verarbeitet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// Die Community-Datenbank kennt den Fingerprint nicht
    #[error("No binding data for device {0}")]
    MissingBindingData(String),

    /// Ein Encoder konnte keine native Eingabe erzeugen
    #[error("Unresolved logical input {input} on {device}")]
    UnresolvedLogicalInput { input: LogicalInput, device: String },

    /// Mehr identische Geräte, als das Identitätsschema ausdrücken kann
    #[error("Too many identical devices for {fingerprint}: offset {offset} exceeds {limit}")]
    DisambiguationOverflow {
        fingerprint: String,
        offset: usize,
        limit: usize,
    },

    /// Externe Datei fehlt oder ist fehlerhaft
    #[error("Failed to load catalog {path}: {reason}")]
    CatalogLoadFailure { path: String, reason: String },

    /// Das Ziel kennt den gewünschten Peripherietyp nicht
    #[error("Target {target} does not support peripheral {peripheral}")]
    UnsupportedPeripheral { target: String, peripheral: String },

    /// Fehlerhafte Sitzungskonfiguration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
