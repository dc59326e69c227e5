//! Casing detection for matched words and re-casing of their replacements.

/// The casing pattern observed on a matched word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Upper,
    Title,
    Mixed,
}

impl CaseStyle {
    /// Classify `example`. Checks run lowercase, uppercase, then title case and
    /// the first hit wins, so caseless text (digits, empty string) is `Lower`.
    pub fn detect(example: &str) -> Self {
        if example == example.to_lowercase() {
            CaseStyle::Lower
        } else if example == example.to_uppercase() {
            CaseStyle::Upper
        } else if example
            .chars()
            .next()
            .is_some_and(|first| first.to_uppercase().eq(std::iter::once(first)))
        {
            CaseStyle::Title
        } else {
            CaseStyle::Mixed
        }
    }

    /// Render `word` in this style. `Mixed` leaves the word untouched.
    pub fn apply(self, word: &str) -> String {
        match self {
            CaseStyle::Lower => word.to_lowercase(),
            CaseStyle::Upper => word.to_uppercase(),
            CaseStyle::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        let mut out: String = first.to_uppercase().collect();
                        out.push_str(&chars.as_str().to_lowercase());
                        out
                    }
                    None => String::new(),
                }
            }
            CaseStyle::Mixed => word.to_string(),
        }
    }
}

/// Re-case `word` so it follows the casing of `example`.
pub fn apply_case(word: &str, example: &str) -> String {
    CaseStyle::detect(example).apply(word)
}
