//! Review of a previous run: which entries the output changed, word by word.
//! On a terminal the differences are browsed one at a time.

use crate::config::Config;
use crate::data::{TextEntry, load_entries};
use crate::error::Result;
use console::{Term, style};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub key: String,
    pub original: String,
    pub patched: String,
}

/// Every patched entry whose text differs from the original. A key missing
/// from the original counts as empty text.
pub fn find_differences(original: &[TextEntry], patched: &[TextEntry]) -> Vec<Difference> {
    let before: HashMap<&str, &str> = original
        .iter()
        .map(|o| (o.key.as_str(), o.text.as_str()))
        .collect();

    patched
        .iter()
        .filter_map(|entry| {
            let old = before.get(entry.key.as_str()).copied();
            if old == Some(entry.text.as_str()) {
                return None;
            }
            Some(Difference {
                key: entry.key.clone(),
                original: old.unwrap_or_default().to_string(),
                patched: entry.text.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordChange<'a> {
    Same(&'a str),
    Replaced(&'a str, &'a str),
    Removed(&'a str),
    Added(&'a str),
}

// Words are compared position by position, the way they line up after a
// same-length substitution.
fn word_changes<'a>(original: &'a str, patched: &'a str) -> Vec<WordChange<'a>> {
    let old: Vec<&str> = original.split_whitespace().collect();
    let new: Vec<&str> = patched.split_whitespace().collect();

    (0..old.len().max(new.len()))
        .filter_map(|i| match (old.get(i).copied(), new.get(i).copied()) {
            (Some(o), Some(n)) if o == n => Some(WordChange::Same(o)),
            (Some(o), Some(n)) => Some(WordChange::Replaced(o, n)),
            (Some(o), None) => Some(WordChange::Removed(o)),
            (None, Some(n)) => Some(WordChange::Added(n)),
            (None, None) => None,
        })
        .collect()
}

/// Word-level diff in `[-old-]{+new+}` notation, joined by single spaces.
pub fn highlight_words(original: &str, patched: &str) -> String {
    word_changes(original, patched)
        .into_iter()
        .map(|change| match change {
            WordChange::Same(w) => w.to_string(),
            WordChange::Replaced(o, n) => format!("[-{o}-]{{+{n}+}}"),
            WordChange::Removed(o) => format!("[-{o}-]"),
            WordChange::Added(n) => format!("{{+{n}+}}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Terminal rendering: removed words struck through in red, added words green.
pub fn highlight_styled(original: &str, patched: &str) -> String {
    word_changes(original, patched)
        .into_iter()
        .map(|change| match change {
            WordChange::Same(w) => w.to_string(),
            WordChange::Replaced(o, n) => {
                format!("{} {}", style(o).red().strikethrough(), style(n).green())
            }
            WordChange::Removed(o) => style(o).red().strikethrough().to_string(),
            WordChange::Added(n) => style(n).green().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A navigation command typed at the viewer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
    Quit,
    Stay,
}

impl Step {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "." => Step::Next,
            "," => Step::Previous,
            "q" => Step::Quit,
            _ => Step::Stay,
        }
    }
}

/// The index to show after `step`, wrapping at both ends. `None` ends the
/// session.
pub fn navigate(index: usize, total: usize, step: Step) -> Option<usize> {
    if total == 0 {
        return None;
    }
    match step {
        Step::Next => Some((index + 1) % total),
        Step::Previous => Some((index + total - 1) % total),
        Step::Stay => Some(index % total),
        Step::Quit => None,
    }
}

pub fn load_differences(config: &Config) -> Result<Vec<Difference>> {
    let original = load_entries(&config.input_path())?;
    let patched = load_entries(&config.output_path())?;
    Ok(find_differences(&original, &patched))
}

fn print_all(diffs: &[Difference]) {
    let total = diffs.len();
    for (i, diff) in diffs.iter().enumerate() {
        println!(
            "[{}/{total}] {}: {}",
            i + 1,
            diff.key,
            highlight_words(&diff.original, &diff.patched)
        );
    }
}

fn browse(term: &Term, diffs: &[Difference]) -> Result<()> {
    let theme = ColorfulTheme::default();
    let total = diffs.len();
    let mut index = 0;

    while let Some(diff) = diffs.get(index) {
        term.clear_screen()?;
        term.write_line(&format!(
            "{} {}",
            style(format!("{}:", diff.key)).bold().blue(),
            highlight_styled(&diff.original, &diff.patched)
        ))?;
        term.write_line(&format!(
            "{} {}",
            style("Diff Progress:").bold().blue(),
            style(format!("{}/{total}", index + 1)).blue()
        ))?;

        let input = Input::<String>::with_theme(&theme)
            .with_prompt("Navigate with '.', ',' or 'q' to quit")
            .allow_empty(true)
            .interact_text_on(term)?;

        match navigate(index, total, Step::parse(&input)) {
            Some(next) => index = next,
            None => break,
        }
    }
    Ok(())
}

pub fn show(config: &Config) -> Result<()> {
    let diffs = load_differences(config)?;

    if diffs.is_empty() {
        println!("No differences to display.");
        return Ok(());
    }

    let term = Term::stdout();
    if term.is_term() {
        browse(&term, &diffs)
    } else {
        print_all(&diffs);
        Ok(())
    }
}
