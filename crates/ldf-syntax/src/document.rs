//! The top-level parsed document.

use crate::{Map, Value};
use serde::Serialize;
use std::fmt;

/// The section kinds a document can contain.
///
/// Keys keep the exact spelling downstream generators expect, mixed case
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Nodes,
    Signals,
    DiagSignals,
    Frames,
    DiagnosticFrames,
    NodeAttributes,
    ScheduleTables,
    SignalEncodingTypes,
    SignalRepresentation,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Nodes,
        Section::Signals,
        Section::DiagSignals,
        Section::Frames,
        Section::DiagnosticFrames,
        Section::NodeAttributes,
        Section::ScheduleTables,
        Section::SignalEncodingTypes,
        Section::SignalRepresentation,
    ];

    /// Document key under which the section is stored.
    pub fn key(self) -> &'static str {
        match self {
            Section::Nodes => "Nodes",
            Section::Signals => "signals",
            Section::DiagSignals => "diag_signals",
            Section::Frames => "frames",
            Section::DiagnosticFrames => "diagnostic_frames",
            Section::NodeAttributes => "node_attributes",
            Section::ScheduleTables => "schedule_tables",
            Section::SignalEncodingTypes => "Signal_encoding_types",
            Section::SignalRepresentation => "Signal_representation",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|section| section.key() == key)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A parsed LDF document: section name to section content, plus top-level
/// attributes such as `LIN_speed` merged in alongside the sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    entries: Map,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-with-overwrite at the top level.
    pub fn merge(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.merge_entry(key, value)
    }

    pub fn merge_section(&mut self, section: Section, content: impl Into<Value>) -> Option<Value> {
        self.merge(section.key(), content)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn section(&self, section: Section) -> Option<&Value> {
        self.get(section.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &Map {
        &self.entries
    }

    /// The document as a JSON tree, through the same `Serialize` impl as
    /// [`Document::to_json_string`].
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_key(section.key()), Some(section));
        }
        assert_eq!(Section::from_key("Frames"), None);
    }

    #[test]
    fn test_top_level_merge_last_wins() {
        let mut doc = Document::new();
        doc.merge("LIN_speed", 19200i64);
        doc.merge_section(Section::Frames, Map::new());
        doc.merge("LIN_speed", 9600i64);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["LIN_speed", "frames"]);
        assert_eq!(doc.get("LIN_speed"), Some(&Value::Int(9600)));
    }
}
