//! Mapping-Profile: logische Eingabe → Zielpfade
//!
//! Profile sind Daten. Overrides erzeugen immer eine neue Instanz, die
//! Basistabelle bleibt unverändert.

use crate::controller::LogicalInput;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Für das Ziel bedeutungsvoller Pfad oder Code, für die Engine opak
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeToken(String);

impl NativeToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NativeToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for NativeToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for NativeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geordnete Zuordnung von logischen Eingaben zu einem oder mehreren Tokens
///
/// Mehrere Tokens pro Eingabe sind gleichzeitig aktiv (ODER-Semantik).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingProfile {
    name: String,
    entries: BTreeMap<LogicalInput, Vec<NativeToken>>,
}

impl MappingProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Baut ein Profil aus einer statischen Tabelle
    pub fn from_table(name: impl Into<String>, table: &[(LogicalInput, &[&str])]) -> Self {
        let mut profile = Self::new(name);
        for (input, tokens) in table {
            let slot = profile.entries.entry(*input).or_default();
            slot.extend(tokens.iter().map(|t| NativeToken::from(*t)));
        }
        profile
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, input: LogicalInput) -> &[NativeToken] {
        self.entries.get(&input).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Steht `token` unter `input`?
    pub fn binds(&self, input: LogicalInput, token: &str) -> bool {
        self.get(input).iter().any(|t| t.as_str() == token)
    }

    pub fn contains(&self, input: LogicalInput) -> bool {
        self.entries.contains_key(&input)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Einträge in Katalogreihenfolge
    pub fn iter(&self) -> impl Iterator<Item = (LogicalInput, &[NativeToken])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Sucht die logische Eingabe, die auf `token` zeigt
    pub fn input_for(&self, token: &str) -> Option<LogicalInput> {
        self.entries
            .iter()
            .find(|(_, tokens)| tokens.iter().any(|t| t.as_str() == token))
            .map(|(input, _)| *input)
    }

    /// Neues Profil mit ersetztem Eintrag
    pub fn with_entry(&self, input: LogicalInput, tokens: Vec<NativeToken>) -> Self {
        let mut next = self.clone();
        next.entries.insert(input, tokens);
        next
    }

    /// Neues Profil, in dem die Einträge zweier Eingaben getauscht sind
    pub fn with_swapped(&self, a: LogicalInput, b: LogicalInput) -> Self {
        let mut next = self.clone();
        let first = next.entries.remove(&a);
        let second = next.entries.remove(&b);
        if let Some(tokens) = first {
            next.entries.insert(b, tokens);
        }
        if let Some(tokens) = second {
            next.entries.insert(a, tokens);
        }
        next
    }

    /// Neues Profil mit allen Overrides angewendet
    pub fn with_overrides(&self, overrides: &HashMap<LogicalInput, Vec<NativeToken>>) -> Self {
        let mut next = self.clone();
        for (input, tokens) in overrides {
            next.entries.insert(*input, tokens.clone());
        }
        next
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.name = name.into();
        next
    }
}

/// Positiver Zielpfad → negativer Gegenpfad für Achsenpaare
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseAxisTable {
    pairs: HashMap<String, String>,
}

impl ReverseAxisTable {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(pos, neg)| (pos.to_string(), neg.to_string()))
                .collect(),
        }
    }

    pub fn negative_of(&self, positive: &str) -> Option<&str> {
        self.pairs.get(positive).map(String::as_str)
    }

    pub fn positive_of(&self, negative: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(_, neg)| neg.as_str() == negative)
            .map(|(pos, _)| pos.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
