//! Ausgabe der Bindings als `(Pfad, Wert)`-Paare

use std::collections::BTreeMap;

/// Empfänger für aufgelöste Bindings. Das Dateiformat ist Sache des Empfängers.
pub trait BindingSink {
    fn put(&mut self, path: &str, value: &str);
}

/// Behält Reihenfolge und Duplikate
impl BindingSink for Vec<(String, String)> {
    fn put(&mut self, path: &str, value: &str) {
        self.push((path.to_string(), value.to_string()));
    }
}

/// Sammelt mehrere Werte pro Pfad
impl BindingSink for BTreeMap<String, Vec<String>> {
    fn put(&mut self, path: &str, value: &str) {
        self.entry(path.to_string())
            .or_default()
            .push(value.to_string());
    }
}

/// Ein Eintrag, optional mit der negativen Achsenhälfte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub path: String,
    pub value: String,
    pub reverse: Option<(String, String)>,
}

impl ResolvedBinding {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            reverse: None,
        }
    }

    pub fn with_reverse(mut self, reverse: Option<(String, String)>) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn write_to<S: BindingSink + ?Sized>(&self, sink: &mut S) {
        sink.put(&self.path, &self.value);
        if let Some((path, value)) = &self.reverse {
            sink.put(path, value);
        }
    }
}

impl From<(String, String)> for ResolvedBinding {
    fn from((path, value): (String, String)) -> Self {
        Self::new(path, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_half_follows_positive() {
        let binding = ResolvedBinding::new("Main Stick/Right", "`Left X+`").with_reverse(Some((
            "Main Stick/Left".to_string(),
            "`Left X-`".to_string(),
        )));
        let mut sink: Vec<(String, String)> = Vec::new();
        binding.write_to(&mut sink);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].0, "Main Stick/Left");
    }

    #[test]
    fn map_sink_collects_values_per_path() {
        let mut sink: BTreeMap<String, Vec<String>> = BTreeMap::new();
        sink.put("Hotkeys/TogglePause", "XInput-0/Back & XInput-0/B");
        sink.put("Hotkeys/TogglePause", "Keyboard/P");
        assert_eq!(sink["Hotkeys/TogglePause"].len(), 2);
    }
}
