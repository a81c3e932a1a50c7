//! Language classification of band fragments.
//!
//! Meanings are written in the reader's native language, headwords and
//! example sentences in the target language. A fragment counts as native
//! when the identifier names the native language as dominant, or when it
//! carries at least a few native-script characters (short meanings such as
//! "川" are too short for a confident verdict). Study notes, decorative
//! glyphs and part-of-speech abbreviations never count.

mod script;

pub use script::ScriptLanguageIdentifier;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::LanguageConfig;
use crate::elements::RecognizedFragment;
use crate::layout::WordRow;

lazy_static! {
    static ref RE_TOKEN_SEPARATOR: Regex = Regex::new(r"[\s\p{P}\p{S}]+").unwrap();
}

/// Languages the classifier distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Japanese (kana and ideographs)
    #[default]
    Japanese,
    /// Chinese (ideographs)
    Chinese,
    /// Korean (Hangul)
    Korean,
    /// English (Latin letters)
    English,
}

/// Identifies the language of a short text.
///
/// Implementations must be usable from several threads at once.
pub trait LanguageIdentifier: Send + Sync {
    /// The language that dominates `text`, if any.
    fn dominant_language(&self, text: &str) -> Option<Language>;

    /// Number of characters in `text` written in `language`'s script.
    fn script_tally(&self, text: &str, language: Language) -> usize;
}

/// Decides which fragments of a band are written in the native language.
pub struct LanguageClassifier<'a> {
    identifier: &'a dyn LanguageIdentifier,
    config: &'a LanguageConfig,
}

impl<'a> LanguageClassifier<'a> {
    /// Create a classifier over an identifier and the language settings.
    pub fn new(identifier: &'a dyn LanguageIdentifier, config: &'a LanguageConfig) -> Self {
        Self { identifier, config }
    }

    /// Whether the fragment is a native-language text worth keeping.
    pub fn is_native(&self, fragment: &RecognizedFragment) -> bool {
        if self.is_ignorable(&fragment.text) {
            return false;
        }
        let target = self.config.native_language;
        self.identifier.dominant_language(&fragment.text) == Some(target)
            || self.identifier.script_tally(&fragment.text, target) >= self.config.min_script_chars
    }

    /// Whether the text is nothing but decorations, study notes and
    /// part-of-speech abbreviations.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::config::LanguageConfig;
    /// use wordlist_oxide::language::{LanguageClassifier, ScriptLanguageIdentifier};
    ///
    /// let identifier = ScriptLanguageIdentifier::new();
    /// let config = LanguageConfig::default();
    /// let classifier = LanguageClassifier::new(&identifier, &config);
    ///
    /// assert!(classifier.is_ignorable("⚠️ 発音注意"));
    /// assert!(classifier.is_ignorable("（名）"));
    /// assert!(!classifier.is_ignorable("名 りんご"));
    /// ```
    pub fn is_ignorable(&self, text: &str) -> bool {
        let mut stripped = text.to_string();
        for glyph in &self.config.decorative_glyphs {
            stripped = stripped.replace(glyph.as_str(), "");
            let bare = glyph.trim_end_matches(&['\u{FE0E}', '\u{FE0F}'][..]);
            if !bare.is_empty() {
                stripped = stripped.replace(bare, "");
            }
        }

        let mut tokens = RE_TOKEN_SEPARATOR
            .split(&stripped)
            .filter(|t| !t.is_empty())
            .peekable();
        if tokens.peek().is_none() {
            return true;
        }
        tokens.all(|token| {
            self.config.ignore_words.iter().any(|w| w == token)
                || self.config.part_of_speech.iter().any(|w| w == token)
        })
    }

    /// Fill `native_language_fragments` of every row from its band.
    pub fn classify_rows(&self, rows: Vec<WordRow>) -> Vec<WordRow> {
        rows.into_iter()
            .map(|mut row| {
                let native: Vec<RecognizedFragment> = row
                    .fragments_in_band
                    .iter()
                    .filter(|f| !row.is_word(f) && self.is_native(f))
                    .cloned()
                    .collect();
                log::debug!(
                    "Row '{}': {} of {} band fragments are native",
                    row.word.text,
                    native.len(),
                    row.fragments_in_band.len()
                );
                row.native_language_fragments = native;
                row
            })
            .collect()
    }
}
