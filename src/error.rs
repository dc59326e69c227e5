use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A dictionary key that cannot be matched as a single whole word.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid key '{key}': {reason}")]
pub struct InvalidKey {
    pub key: String,
    pub reason: &'static str,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read dictionary {path}: {source}")]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dictionary {path} needs at least two columns, found {found}")]
    DictionaryHeader { path: PathBuf, found: usize },

    #[error("dictionary {path} line {line} has {found} columns, expected {expected}")]
    DictionaryRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("bad entry in dictionary {path}: {source}")]
    DictionaryKey {
        path: PathBuf,
        #[source]
        source: InvalidKey,
    },

    #[error("failed to read {path}: {source}")]
    DataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("{path} must contain a top-level object")]
    NotAnObject { path: PathBuf },

    #[error("value for '{key}' in {path} is not a string")]
    NonStringValue { path: PathBuf, key: String },

    #[error("failed to build replacement pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to read navigation input: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to write {path}: {source}")]
    DataWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
