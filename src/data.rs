use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A named piece of text from the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub key: String,
    pub text: String,
}

impl TextEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Entries whose text changed, in the order they were found.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OutputMapping {
    entries: IndexMap<String, String>,
}

impl OutputMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `swapped` only if it differs from the original text. Returns the
    /// stored text when it was kept.
    pub fn record(&mut self, original: &TextEntry, swapped: String) -> Option<&str> {
        if swapped == original.text {
            return None;
        }
        let slot = self.entries.entry(original.key.clone()).or_default();
        *slot = swapped;
        Some(slot.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strict JSON with four-space indentation.
    pub fn write_json_pretty<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.entries.serialize(&mut ser)
    }
}

/// Parse relaxed JSON (comments, trailing commas, unquoted keys) holding a
/// flat object of string values.
pub fn parse_entries(content: &str, path: &Path) -> Result<Vec<TextEntry>> {
    let value: Value = json5::from_str(content).map_err(|source| Error::DataParse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(map) = value else {
        return Err(Error::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    map.into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok(TextEntry::new(key, text)),
            _ => Err(Error::NonStringValue {
                path: path.to_path_buf(),
                key,
            }),
        })
        .collect()
}

pub fn load_entries(path: &Path) -> Result<Vec<TextEntry>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::DataRead {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(&content, path)?;
    debug!("loaded {} entries from {path:?}", entries.len());
    Ok(entries)
}

/// Write `output` to `path`, replacing any existing file.
pub fn save_output(path: &Path, output: &OutputMapping) -> Result<()> {
    let write_err = |source| Error::DataWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let file = std::fs::File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    output.write_json_pretty(&mut writer)?;
    writer.flush().map_err(write_err)?;
    debug!("wrote {} entries to {path:?}", output.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relaxed_json() {
        let content = r#"{
            // greeting line
            intro: "Hello there",
            "outro": 'See you',
            /* block */
            "empty": "",
        }"#;

        let entries = parse_entries(content, Path::new("test.json")).unwrap();
        assert_eq!(
            entries,
            vec![
                TextEntry::new("intro", "Hello there"),
                TextEntry::new("outro", "See you"),
                TextEntry::new("empty", ""),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let entries = parse_entries(r#"{"z": "1", "a": "2", "m": "3"}"#, Path::new("t")).unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_parse_rejects_non_string() {
        let err = parse_entries(r#"{"a": "ok", "b": 3}"#, Path::new("t")).unwrap_err();
        assert!(matches!(err, Error::NonStringValue { ref key, .. } if key == "b"));

        let err = parse_entries(r#"{"a": {"nested": "x"}}"#, Path::new("t")).unwrap_err();
        assert!(matches!(err, Error::NonStringValue { .. }));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_entries(r#"["a", "b"]"#, Path::new("t")),
            Err(Error::NotAnObject { .. })
        ));
        assert!(matches!(
            parse_entries("{ unterminated", Path::new("t")),
            Err(Error::DataParse { .. })
        ));
    }

    #[test]
    fn test_record_only_changes() {
        let mut output = OutputMapping::new();
        assert_eq!(
            output.record(&TextEntry::new("b", "no match"), "no match".to_string()),
            None
        );
        assert_eq!(
            output.record(&TextEntry::new("a", "hello"), "goodbye".to_string()),
            Some("goodbye")
        );

        assert_eq!(output.len(), 1);
        assert_eq!(output.get("a"), Some("goodbye"));
        assert_eq!(output.get("b"), None);
    }

    #[test]
    fn test_pretty_output_uses_four_spaces() {
        let mut output = OutputMapping::new();
        output.record(&TextEntry::new("a", "x"), "y".to_string());
        output.record(&TextEntry::new("b", "x"), "z \"q\"".to_string());

        let mut buf = Vec::new();
        output.write_json_pretty(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n    \"a\": \"y\",\n    \"b\": \"z \\\"q\\\"\"\n}"
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("output.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        let mut output = OutputMapping::new();
        output.record(&TextEntry::new("a", "hello"), "goodbye".to_string());
        save_output(&path, &output).unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries, vec![TextEntry::new("a", "goodbye")]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_entries(&dir.path().join("missing.json")),
            Err(Error::DataRead { .. })
        ));
    }
}
