//! Label table: maps a model output index to a display phrase
//!
//! The table is a flat JSON object with string-encoded integer keys,
//! e.g. `{"0": "I am hungry", "1": "I want to play"}`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{LabelError, Result};

/// Phrase returned for any index the table does not contain
pub const UNKNOWN_SOUND: &str = "Unknown sound";

/// Immutable index-to-phrase mapping
#[derive(Debug, Clone)]
pub struct LabelTable {
    map: HashMap<String, String>,
}

impl LabelTable {
    /// Parse a table from a JSON object literal
    pub fn from_json(json: &str) -> Result<Self> {
        let map: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| LabelError::Parse(e.to_string()))?;
        Ok(Self { map })
    }

    /// Read and parse a table from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LabelError::Read(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&content)
    }

    /// Look up the phrase for a class index, falling back to [`UNKNOWN_SOUND`]
    pub fn resolve(&self, index: usize) -> &str {
        self.map
            .get(&index.to_string())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SOUND)
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_index() {
        let table = LabelTable::from_json(r#"{"0":"Meow","1":"Bark","2":"Purr"}"#).unwrap();
        assert_eq!(table.resolve(0), "Meow");
        assert_eq!(table.resolve(1), "Bark");
        assert_eq!(table.resolve(2), "Purr");
    }

    #[test]
    fn test_resolve_absent_index() {
        let table = LabelTable::from_json(r#"{"0":"Meow"}"#).unwrap();
        assert_eq!(table.resolve(7), UNKNOWN_SOUND);
    }

    #[test]
    fn test_empty_table_resolves_to_fallback() {
        let table = LabelTable::from_json("{}").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.resolve(0), UNKNOWN_SOUND);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(LabelTable::from_json("not json").is_err());
        assert!(LabelTable::from_json(r#"{"0": 42}"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(LabelTable::from_path("/nonexistent/labels.json").is_err());
    }
}
