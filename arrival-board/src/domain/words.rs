//! Whole-word substitutions used to shorten names for a narrow panel.

use regex::Regex;

/// An ordered list of whole-word replacements.
///
/// Every rule is applied in turn to the output of the previous one. Keys are
/// matched literally, bounded by `\b` on both sides, so `" St"` strips the
/// street suffix in `"Harlem St"` but leaves `"Stony Island"` alone.
#[derive(Debug, Clone, Default)]
pub struct WordReplacer {
    rules: Vec<(Regex, String)>,
}

impl WordReplacer {
    /// Compile a replacer from `(word, replacement)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(word, replacement)| {
                let pattern = format!(r"\b{}\b", regex::escape(word.as_ref()));
                Ok((Regex::new(&pattern)?, replacement.into()))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Apply every rule, then collapse runs of whitespace left behind.
    pub fn apply(&self, input: &str) -> String {
        let mut out = input.to_string();
        for (pattern, replacement) in &self.rules {
            out = pattern
                .replace_all(&out, regex::NoExpand(replacement))
                .into_owned();
        }
        squeeze_whitespace(&out)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The abbreviations applied to Bus Tracker destinations.
pub fn bus_destination_abbreviations() -> WordReplacer {
    WordReplacer::new([
        (" St", ""),
        (" Rd", ""),
        (" Ave", ""),
        ("Town Center", "Twn Ctr"),
    ])
    .unwrap_or_default()
}

fn squeeze_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
