use crate::case::apply_case;
use crate::dictionary::ReplacementDictionary;
use crate::error::Result;
use log::debug;
use regex::{Captures, Regex, RegexSet};

/// Whole-word, case-insensitive replacer over a borrowed dictionary.
///
/// Matching runs in two phases: a single alternation of every key finds the
/// words, then each match is mapped back to the first dictionary key (in
/// dictionary order) that equals it ignoring case. Both phases use the regex
/// engine's case folding, so every match resolves to a key.
pub struct Replacer<'d> {
    dictionary: &'d ReplacementDictionary,
    pattern: Option<Regex>,
    keys: RegexSet,
}

impl<'d> Replacer<'d> {
    pub fn new(dictionary: &'d ReplacementDictionary) -> Result<Self> {
        let pattern = if dictionary.is_empty() {
            None
        } else {
            let alternation = dictionary
                .iter()
                .map(|(key, _)| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?;
            debug!("pattern built from {} keys", dictionary.len());
            Some(regex)
        };

        let keys = RegexSet::new(
            dictionary
                .iter()
                .map(|(key, _)| format!("(?i)^(?:{})$", regex::escape(key))),
        )?;

        Ok(Self {
            dictionary,
            pattern,
            keys,
        })
    }

    /// The replacement for `matched` and the key it came from.
    pub fn resolve(&self, matched: &str) -> Option<(&'d str, &'d str)> {
        // Set matches come back in ascending pattern order.
        let index = self.keys.matches(matched).iter().next()?;
        self.dictionary.iter().nth(index)
    }

    /// Replace every whole-word occurrence of a dictionary key in `text`.
    pub fn replace(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                match self.resolve(matched) {
                    Some((_, value)) => apply_case(value, matched),
                    None => matched.to_string(),
                }
            })
            .into_owned()
    }
}
