//! Script-based language identification.
//!
//! Counts characters per Unicode block and names the language whose script
//! dominates. Good enough to tell Japanese meanings from English headwords,
//! which is all the pipeline asks of it.

use crate::language::{Language, LanguageIdentifier};

/// Per-script character counts of one string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScriptCounts {
    latin: usize,
    kana: usize,
    han: usize,
    hangul: usize,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = Self::default();
        for ch in text.chars() {
            let code = ch as u32;
            if is_kana(code) {
                counts.kana += 1;
            } else if is_han(code) {
                counts.han += 1;
            } else if is_hangul(code) {
                counts.hangul += 1;
            } else if ch.is_alphabetic() && (ch.is_ascii() || is_latin_extended(code)) {
                counts.latin += 1;
            }
        }
        counts
    }
}

fn is_kana(code: u32) -> bool {
    matches!(
        code,
        0x3040..=0x309F   // Hiragana
        | 0x30A0..=0x30FF // Katakana
        | 0x31F0..=0x31FF // Katakana Phonetic Extensions
        | 0xFF66..=0xFF9F // Halfwidth Katakana
    )
}

fn is_han(code: u32) -> bool {
    matches!(
        code,
        0x3400..=0x4DBF     // CJK Unified Ideographs Extension A
        | 0x4E00..=0x9FFF   // CJK Unified Ideographs
        | 0xF900..=0xFAFF   // CJK Compatibility Ideographs
        | 0x20000..=0x2A6DF // Extension B
        | 0x2A700..=0x2B73F // Extension C
        | 0x2B740..=0x2B81F // Extension D
        | 0x2B820..=0x2CEAF // Extension E
        | 0x2CEB0..=0x2EBEF // Extension F
    )
}

fn is_hangul(code: u32) -> bool {
    matches!(
        code,
        0x1100..=0x11FF   // Hangul Jamo
        | 0x3130..=0x318F // Hangul Compatibility Jamo
        | 0xAC00..=0xD7AF // Hangul Syllables
    )
}

fn is_latin_extended(code: u32) -> bool {
    matches!(code, 0x00C0..=0x024F)
}

/// Language identifier based on Unicode script tallies.
///
/// Text written only in ideographs is ambiguous between Japanese and
/// Chinese; it is attributed to the configured `han_language`.
///
/// # Examples
///
/// ```
/// use wordlist_oxide::language::{Language, LanguageIdentifier, ScriptLanguageIdentifier};
///
/// let identifier = ScriptLanguageIdentifier::new();
/// assert_eq!(identifier.dominant_language("りんご"), Some(Language::Japanese));
/// assert_eq!(identifier.dominant_language("apple"), Some(Language::English));
/// assert_eq!(identifier.dominant_language("123"), None);
/// assert_eq!(identifier.script_tally("赤いりんご", Language::Japanese), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLanguageIdentifier {
    han_language: Language,
}

impl ScriptLanguageIdentifier {
    /// Create an identifier that reads bare ideographs as Japanese.
    pub fn new() -> Self {
        Self {
            han_language: Language::Japanese,
        }
    }

    /// Create an identifier that reads bare ideographs as `language`.
    pub fn with_han_language(language: Language) -> Self {
        Self {
            han_language: language,
        }
    }
}

impl Default for ScriptLanguageIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageIdentifier for ScriptLanguageIdentifier {
    fn dominant_language(&self, text: &str) -> Option<Language> {
        let counts = ScriptCounts::of(text);
        let cjk = if counts.kana > 0 {
            (Language::Japanese, counts.kana + counts.han)
        } else {
            (self.han_language, counts.han)
        };
        let tallies = [
            cjk,
            (Language::Korean, counts.hangul),
            (Language::English, counts.latin),
        ];

        let mut best: Option<(Language, usize)> = None;
        for (language, count) in tallies {
            if count > 0 && best.map_or(true, |(_, n)| count > n) {
                best = Some((language, count));
            }
        }
        best.map(|(language, _)| language)
    }

    fn script_tally(&self, text: &str, language: Language) -> usize {
        let counts = ScriptCounts::of(text);
        match language {
            Language::Japanese => counts.kana + counts.han,
            Language::Chinese => counts.han,
            Language::Korean => counts.hangul,
            Language::English => counts.latin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_text_majority_wins() {
        let identifier = ScriptLanguageIdentifier::new();
        assert_eq!(identifier.dominant_language("apple パイ"), Some(Language::English));
        assert_eq!(identifier.dominant_language("りんごの pie"), Some(Language::Japanese));
    }

    #[test]
    fn test_bare_ideographs_follow_han_language() {
        let japanese = ScriptLanguageIdentifier::new();
        assert_eq!(japanese.dominant_language("河川"), Some(Language::Japanese));

        let chinese = ScriptLanguageIdentifier::with_han_language(Language::Chinese);
        assert_eq!(chinese.dominant_language("苹果"), Some(Language::Chinese));
        // Kana always means Japanese
        assert_eq!(chinese.dominant_language("りんご"), Some(Language::Japanese));
    }

    #[test]
    fn test_hangul() {
        let identifier = ScriptLanguageIdentifier::new();
        assert_eq!(identifier.dominant_language("사과"), Some(Language::Korean));
        assert_eq!(identifier.script_tally("사과", Language::Korean), 2);
    }

    #[test]
    fn test_tally_ignores_punctuation_and_digits() {
        let identifier = ScriptLanguageIdentifier::new();
        assert_eq!(identifier.script_tally("（名）1. 川、", Language::Japanese), 2);
        assert_eq!(identifier.script_tally("café!", Language::English), 4);
    }
}
