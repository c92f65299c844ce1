//! Repair of font-encoding artifacts left in extracted text.
//!
//! PDF extractors sometimes emit glyph names instead of characters
//! (`/three.pl`, `/comma.tnum`), raw glyph placeholders (`glyph<c=3,font=/F1>`)
//! and small-caps markers (`/A.cap`). The normalizer replaces them in three
//! passes, always in this order:
//!
//! 1. slash commands from [`SLASH_COMMANDS`] with a suffix from
//!    [`SLASH_COMMAND_SUFFIXES`]
//! 2. glyph placeholders (deleted)
//! 3. capitalization markers (replaced by the bare letter)

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Glyph names recognised after a slash, with the literal they stand for.
///
/// `wedge.1_E` is a decoration artifact and is removed.
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("period", "."),
    ("comma", ","),
    ("colon", ":"),
    ("hyphen", "-"),
    ("percent", "%"),
    ("dollar", "$"),
    ("space", " "),
    ("plus", "+"),
    ("minus", "-"),
    ("slash", "/"),
    ("asterisk", "*"),
    ("lparen", "("),
    ("rparen", ")"),
    ("parenright", ")"),
    ("parenleft", "("),
    ("wedge.1_E", ""),
];

/// Glyph variant suffixes; longer alternatives come first.
pub const SLASH_COMMAND_SUFFIXES: &[&str] = &[".pl.tnum", ".tnum.pl", ".pl", ".tnum", ".case", ".sups"];

/// A single substitution made by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Matched artifact
    pub matched: String,
    /// Text that replaced it
    pub replacement: String,
}

impl Correction {
    fn new(matched: &str, replacement: &str) -> Self {
        Self {
            matched: matched.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Output of [`TextNormalizer::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeResult {
    /// Cleaned text
    pub text: String,
    /// Artifacts found in the input across all passes
    pub count: usize,
    /// Substitutions in the order they were applied
    pub corrections: Vec<Correction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replacement {
    /// Literal from the slash-command table
    SlashCommand,
    /// Remove the match
    Delete,
    /// Keep the first capture group
    Capture,
}

#[derive(Debug)]
struct Rule {
    pattern: Regex,
    replacement: Replacement,
}

/// Artifact-repair pipeline.
#[derive(Debug)]
pub struct TextNormalizer {
    rules: Vec<Rule>,
}

impl TextNormalizer {
    /// Create a normalizer with the standard rule set.
    pub fn new() -> Self {
        let words = SLASH_COMMANDS
            .iter()
            .map(|(word, _)| regex::escape(word))
            .collect::<Vec<_>>()
            .join("|");
        let suffixes = SLASH_COMMAND_SUFFIXES
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            rules: vec![
                Rule {
                    pattern: Regex::new(&format!("/({})({})", words, suffixes)).unwrap(),
                    replacement: Replacement::SlashCommand,
                },
                Rule {
                    pattern: Regex::new(r"glyph<[^>]*>").unwrap(),
                    replacement: Replacement::Delete,
                },
                Rule {
                    pattern: Regex::new(r"/([A-Z])\.cap").unwrap(),
                    replacement: Replacement::Capture,
                },
            ],
        }
    }

    /// Repair artifacts in `text`.
    ///
    /// The returned count is taken from the input before any pass runs;
    /// the corrections list records what each pass actually replaced.
    pub fn normalize(&self, text: &str) -> NormalizeResult {
        let count = self
            .rules
            .iter()
            .map(|rule| rule.pattern.find_iter(text).count())
            .sum();

        let mut corrections = Vec::new();
        let mut result = text.to_string();

        for rule in &self.rules {
            let replaced = rule.pattern.replace_all(&result, |caps: &Captures| {
                let matched = &caps[0];
                let replacement = match rule.replacement {
                    Replacement::SlashCommand => match slash_command(&caps[1]) {
                        Some(literal) => literal,
                        None => return matched.to_string(),
                    },
                    Replacement::Delete => "",
                    Replacement::Capture => caps.get(1).map_or("", |m| m.as_str()),
                };
                corrections.push(Correction::new(matched, replacement));
                replacement.to_string()
            });
            result = replaced.into_owned();
        }

        NormalizeResult {
            text: result,
            count,
            corrections,
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Literal for a glyph name from [`SLASH_COMMANDS`].
pub fn slash_command(word: &str) -> Option<&'static str> {
    SLASH_COMMANDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, literal)| *literal)
}
