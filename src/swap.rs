use crate::config::Config;
use crate::data::{OutputMapping, TextEntry, load_entries, save_output};
use crate::dictionary::load_dictionary;
use crate::error::Result;
use crate::text::Replacer;
use log::debug;

/// Run every entry through `replacer` and keep the ones that changed.
/// `on_change` sees each changed key and its new text in input order.
pub fn swap_entries(
    entries: &[TextEntry],
    replacer: &Replacer<'_>,
    mut on_change: impl FnMut(&str, &str),
) -> OutputMapping {
    let mut output = OutputMapping::new();
    for entry in entries {
        let swapped = replacer.replace(&entry.text);
        match output.record(entry, swapped) {
            Some(text) => on_change(&entry.key, text),
            None => debug!("unchanged: {}", entry.key),
        }
    }
    output
}

pub fn run(config: &Config) -> Result<OutputMapping> {
    let total_start = std::time::Instant::now();

    let dictionary = load_dictionary(&config.dictionary_path())?;
    let entries = load_entries(&config.input_path())?;
    let replacer = Replacer::new(&dictionary)?;

    let swap_start = std::time::Instant::now();
    let output = swap_entries(&entries, &replacer, |key, text| {
        println!("Difference found for '{key}': {text}");
    });
    debug!("swap: {:?}", swap_start.elapsed());

    if output.is_empty() {
        println!("No differences found in {} entries", entries.len());
    } else {
        let path = config.output_path();
        save_output(&path, &output)?;
        println!(
            "Wrote {} of {} entries to {}",
            output.len(),
            entries.len(),
            path.display()
        );
    }

    debug!("total: {:?}", total_start.elapsed());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::ReplacementDictionary;
    use std::fs;
    use std::path::PathBuf;

    fn hello_dictionary() -> ReplacementDictionary {
        ReplacementDictionary::try_from(vec![("hello", "goodbye")]).unwrap()
    }

    #[test]
    fn test_only_changed_entries_kept() {
        let dictionary = hello_dictionary();
        let replacer = Replacer::new(&dictionary).unwrap();
        let entries = vec![
            TextEntry::new("a", "hello world"),
            TextEntry::new("b", "no match here"),
        ];

        let mut seen = Vec::new();
        let output = swap_entries(&entries, &replacer, |key, text| {
            seen.push((key.to_string(), text.to_string()));
        });

        assert_eq!(output.len(), 1);
        assert_eq!(output.get("a"), Some("goodbye world"));
        assert_eq!(output.get("b"), None);
        assert_eq!(seen, vec![("a".to_string(), "goodbye world".to_string())]);
    }

    #[test]
    fn test_entries_are_independent() {
        let dictionary = hello_dictionary();
        let replacer = Replacer::new(&dictionary).unwrap();
        let entries = vec![
            TextEntry::new("x", "HELLO"),
            TextEntry::new("y", "Hello, hello"),
            TextEntry::new("z", "hellos"),
        ];

        let output = swap_entries(&entries, &replacer, |_, _| {});
        assert_eq!(output.len(), 2);
        assert_eq!(output.get("x"), Some("GOODBYE"));
        assert_eq!(output.get("y"), Some("Goodbye, goodbye"));
        assert_eq!(output.get("z"), None);
    }

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn write_inputs(dir: &tempfile::TempDir, data: &str) -> PathBuf {
        fs::write(
            dir.path().join("replacements.csv"),
            "source|replacement\nhello|goodbye\n",
        )
        .unwrap();
        fs::write(dir.path().join("default.json"), data).unwrap();
        dir.path().join("output.json")
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = write_inputs(
            &dir,
            "{\n  // comment\n  a: 'hello world',\n  b: 'no match here',\n}\n",
        );

        let output = run(&config_in(&dir)).unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(
            fs::read_to_string(output_path).unwrap(),
            "{\n    \"a\": \"goodbye world\"\n}"
        );
    }

    #[test]
    fn test_run_without_changes_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = write_inputs(&dir, r#"{"b": "no match here"}"#);

        let output = run(&config_in(&dir)).unwrap();
        assert!(output.is_empty());
        assert!(!output_path.exists());
    }

    #[test]
    fn test_run_fails_before_transform_on_bad_data() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = write_inputs(&dir, r#"{"a": "hello", "b": 1}"#);

        assert!(run(&config_in(&dir)).is_err());
        assert!(!output_path.exists());
    }
}
