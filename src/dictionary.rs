use crate::error::{Error, InvalidKey, Result};
use log::debug;
use std::path::Path;

/// Ordered source word -> replacement word mapping.
///
/// Keys keep the position of their first insertion. That order decides which
/// value wins when two keys differ only by case.
#[derive(Debug, Default, Clone)]
pub struct ReplacementDictionary {
    entries: Vec<(String, String)>,
}

impl ReplacementDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a mapping. Overwriting keeps the original position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> std::result::Result<(), InvalidKey> {
        let key = key.into();
        validate_key(&key)?;
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> TryFrom<Vec<(&'a str, &'a str)>> for ReplacementDictionary {
    type Error = InvalidKey;

    fn try_from(pairs: Vec<(&'a str, &'a str)>) -> std::result::Result<Self, Self::Error> {
        let mut dictionary = Self::new();
        for (key, value) in pairs {
            dictionary.insert(key, value)?;
        }
        Ok(dictionary)
    }
}

// A key has to sit between two word boundaries, so both ends must be word
// characters as the regex engine defines them for `\b`. Interior punctuation
// is fine; it is escaped before matching.
fn validate_key(key: &str) -> std::result::Result<(), InvalidKey> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.chars().any(char::is_whitespace) {
        Some("key must be a single word")
    } else if !key.starts_with(regex_syntax::is_word_character)
        || !key.ends_with(regex_syntax::is_word_character)
    {
        Some("key must start and end with a word character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Load a `|`-separated dictionary file with a header row. The first column is
/// the source word, the second its replacement.
pub fn load_dictionary(path: &Path) -> Result<ReplacementDictionary> {
    let read_err = |source| Error::DictionaryRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let columns = reader.headers().map_err(read_err)?.len();
    if columns < 2 {
        return Err(Error::DictionaryHeader {
            path: path.to_path_buf(),
            found: columns,
        });
    }

    let mut dictionary = ReplacementDictionary::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        if record.len() != columns {
            return Err(Error::DictionaryRow {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                expected: columns,
                found: record.len(),
            });
        }
        dictionary
            .insert(&record[0], &record[1])
            .map_err(|source| Error::DictionaryKey {
                path: path.to_path_buf(),
                source,
            })?;
    }

    debug!("loaded {} replacements from {path:?}", dictionary.len());
    Ok(dictionary)
}
