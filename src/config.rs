//! Configuration for the word-list pipeline.
//!
//! Every threshold the layout analysis relies on lives here. Several of them
//! (the Below vote ratio, the column containment rate) were tuned by hand on
//! photographed word lists and are expected to be re-tuned against a labeled
//! corpus, so none of them is hard-coded in the stages.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::language::Language;
use crate::meaning::MeaningPosition;

lazy_static! {
    static ref RE_SINGLE_WORD: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref RE_IDIOM: Regex = Regex::new(r"^[a-zA-Z\s-]+$").unwrap();
}

/// The single-word headword pattern, available without a fallible compile.
pub(crate) fn single_word_regex() -> Regex {
    RE_SINGLE_WORD.clone()
}

/// Which fragments may be headwords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadwordPattern {
    /// Letters only
    #[default]
    Word,
    /// Letters, whitespace and hyphens (multi-word idioms)
    Idiom,
    /// A caller-supplied regular expression matched against the whole text
    Custom(String),
}

impl HeadwordPattern {
    /// Compile the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::config::HeadwordPattern;
    ///
    /// let idiom = HeadwordPattern::Idiom.regex().unwrap();
    /// assert!(idiom.is_match("look forward to"));
    /// assert!(!HeadwordPattern::Word.regex().unwrap().is_match("look forward to"));
    /// ```
    pub fn regex(&self) -> Result<Regex> {
        match self {
            Self::Word => Ok(single_word_regex()),
            Self::Idiom => Ok(RE_IDIOM.clone()),
            Self::Custom(pattern) => Regex::new(pattern)
                .map_err(|e| Error::InvalidConfig(format!("headword pattern: {}", e))),
        }
    }
}

/// Candidate Selector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// Headword text pattern
    pub pattern: HeadwordPattern,
    /// Share of fragments kept after sorting by height (the rest is body text)
    pub tallest_fraction: f32,
    /// Half-width of the band around the first-quartile left edge
    pub column_band: f32,
    /// Keep exactly this many headwords nearest the word column instead of
    /// using the band filter
    pub words_per_page: Option<usize>,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            pattern: HeadwordPattern::Word,
            tallest_fraction: 0.8,
            column_band: 0.05,
            words_per_page: None,
        }
    }
}

/// Table Structure Resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// A gap between two columns becomes a column when it holds more
    /// fragment centers than this share of the headword candidates
    pub gap_fill_ratio: f32,
    /// Minimum vertical overlap, relative to the word column height, for
    /// another column to extend the word column
    pub column_extension_overlap: f32,
    /// Containment rate used when recovering missed headwords
    pub recovery_containment: f32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            gap_fill_ratio: 2.0 / 3.0,
            column_extension_overlap: 0.5,
            recovery_containment: 0.8,
        }
    }
}

/// Language Classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language the meanings are written in
    pub native_language: Language,
    /// Native-script characters that make a fragment native regardless of
    /// the identifier's verdict
    pub min_script_chars: usize,
    /// Glyphs stripped before the ignore check (check boxes, warning marks)
    pub decorative_glyphs: Vec<String>,
    /// Study notes that never constitute a meaning on their own
    pub ignore_words: Vec<String>,
    /// Part-of-speech abbreviations
    pub part_of_speech: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            native_language: Language::Japanese,
            min_script_chars: 3,
            decorative_glyphs: to_strings(&[
                "⚠️", "⚠︎", "⬜︎", "⬛︎", "■", "□", "◼︎", "◻︎", "◆", "◇", "○", "●", "△", "▲", "▽",
                "▼",
            ]),
            ignore_words: to_strings(&[
                "アクセント",
                "アク",
                "アクセント注意",
                "発音",
                "発音注意",
                "スペル",
                "スペル注意",
                "スペルミス",
                "多義語",
                "多義",
            ]),
            part_of_speech: to_strings(&[
                "動", "名", "形", "副", "前", "接", "代", "助", "助動", "接続",
            ]),
        }
    }
}

impl LanguageConfig {
    /// Words that bias the text recognizer toward the page's decorations and
    /// abbreviations.
    pub fn custom_words(&self) -> Vec<String> {
        self.decorative_glyphs
            .iter()
            .chain(self.part_of_speech.iter())
            .cloned()
            .collect()
    }
}

/// Meaning Position Classifier and Meaning Assigner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeaningConfig {
    /// Force the meaning position instead of voting
    pub position: Option<MeaningPosition>,
    /// Share of rows that must vote Below
    pub below_vote_ratio: f32,
    /// Required containment of a meaning inside the word column
    pub column_containment: f32,
    /// Minimum characters of a fragment that votes Below
    pub min_vote_chars: usize,
    /// Minimum characters of at least one strictly-below meaning
    pub min_below_chars: usize,
    /// Run the modal-offset verification
    pub verify: bool,
    /// Rows needed before the modal offset is trusted
    pub min_rows_for_verification: usize,
}

impl Default for MeaningConfig {
    fn default() -> Self {
        Self {
            position: None,
            below_vote_ratio: 0.6,
            column_containment: 0.8,
            min_vote_chars: 4,
            min_below_chars: 2,
            verify: true,
            min_rows_for_verification: 3,
        }
    }
}

/// Multi-line expansion settings, in multiples of the line's font height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Allowed gap to a line above: `(lower, upper)`
    pub top_gap: (f32, f32),
    /// Allowed gap to a line below: `(lower, upper)`
    pub bottom_gap: (f32, f32),
    /// Symmetric gap used when looking for a missing sense marker
    pub marker_gap: f32,
    /// Maximum difference of left edges for lines of one entry
    pub max_left_shift: f32,
    /// Slack when looking for a sibling line to the left or right
    pub horizontal_slack: f32,
    /// Maximum lines added in each direction
    pub max_steps: usize,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            top_gap: (-0.4, 0.25),
            bottom_gap: (-0.4, 0.4),
            marker_gap: 0.5,
            max_left_shift: 1.5,
            horizontal_slack: 0.5,
            max_steps: 5,
        }
    }
}

/// Word-list pipeline configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListConfig {
    /// Candidate Selector
    pub candidates: CandidateConfig,
    /// Table Structure Resolver
    pub structure: StructureConfig,
    /// Language Classifier
    pub language: LanguageConfig,
    /// Meaning position and assignment
    pub meaning: MeaningConfig,
    /// Multi-line expansion
    pub lines: LineConfig,
    /// Extract example sentences next to each entry
    pub scan_examples: bool,
}

impl WordListConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept multi-word idioms as headwords.
    pub fn with_idioms(mut self, enable: bool) -> Self {
        self.candidates.pattern = if enable {
            HeadwordPattern::Idiom
        } else {
            HeadwordPattern::Word
        };
        self
    }

    /// Use a custom headword pattern.
    pub fn with_headword_pattern(mut self, pattern: HeadwordPattern) -> Self {
        self.candidates.pattern = pattern;
        self
    }

    /// Keep a fixed number of headwords per page.
    pub fn with_words_per_page(mut self, words: Option<usize>) -> Self {
        self.candidates.words_per_page = words;
        self
    }

    /// Set the language meanings are written in.
    pub fn with_native_language(mut self, language: Language) -> Self {
        self.language.native_language = language;
        self
    }

    /// Force the meaning position instead of classifying it.
    pub fn with_meaning_position(mut self, position: Option<MeaningPosition>) -> Self {
        self.meaning.position = position;
        self
    }

    /// Set the share of rows that must vote Below.
    pub fn with_below_vote_ratio(mut self, ratio: f32) -> Self {
        self.meaning.below_vote_ratio = ratio;
        self
    }

    /// Set the containment rate for meanings inside the word column.
    pub fn with_column_containment(mut self, rate: f32) -> Self {
        self.meaning.column_containment = rate;
        self
    }

    /// Enable or disable the modal-offset verification.
    pub fn with_verification(mut self, enable: bool) -> Self {
        self.meaning.verify = enable;
        self
    }

    /// Enable example-sentence extraction.
    pub fn with_example_scanning(mut self, enable: bool) -> Self {
        self.scan_examples = enable;
        self
    }

    /// Check value ranges and compile the headword pattern.
    pub fn validate(&self) -> Result<()> {
        check_ratio("candidates.tallest_fraction", self.candidates.tallest_fraction)?;
        check_ratio("structure.gap_fill_ratio", self.structure.gap_fill_ratio)?;
        check_ratio(
            "structure.column_extension_overlap",
            self.structure.column_extension_overlap,
        )?;
        check_ratio("structure.recovery_containment", self.structure.recovery_containment)?;
        check_ratio("meaning.below_vote_ratio", self.meaning.below_vote_ratio)?;
        check_ratio("meaning.column_containment", self.meaning.column_containment)?;

        if !(self.candidates.column_band > 0.0) {
            return Err(Error::InvalidConfig("candidates.column_band must be positive".into()));
        }
        if self.candidates.words_per_page == Some(0) {
            return Err(Error::InvalidConfig("candidates.words_per_page must be at least 1".into()));
        }
        for (name, (lower, upper)) in
            [("lines.top_gap", self.lines.top_gap), ("lines.bottom_gap", self.lines.bottom_gap)]
        {
            if !(lower < upper) {
                return Err(Error::InvalidConfig(format!(
                    "{} lower bound {} must be below upper bound {}",
                    name, lower, upper
                )));
            }
        }
        if !(self.lines.max_left_shift > 0.0) || !(self.lines.marker_gap > 0.0) {
            return Err(Error::InvalidConfig("line tolerances must be positive".into()));
        }
        self.candidates.pattern.regex()?;
        Ok(())
    }

    /// Load configuration from JSON. Missing fields take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::config::WordListConfig;
    ///
    /// let config = WordListConfig::from_json_str(r#"{"scan_examples": true}"#).unwrap();
    /// assert!(config.scan_examples);
    /// assert_eq!(config.meaning.below_vote_ratio, 0.6);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_ratio(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be in (0, 1], got {}", name, value)))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(WordListConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = WordListConfig::new()
            .with_idioms(true)
            .with_words_per_page(Some(8))
            .with_meaning_position(Some(MeaningPosition::Below))
            .with_below_vote_ratio(2.0 / 3.0)
            .with_example_scanning(true);

        assert_eq!(config.candidates.pattern, HeadwordPattern::Idiom);
        assert_eq!(config.candidates.words_per_page, Some(8));
        assert_eq!(config.meaning.position, Some(MeaningPosition::Below));
        assert!(config.scan_examples);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_ratio() {
        let config = WordListConfig::new().with_below_vote_ratio(1.5);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = WordListConfig::new().with_column_containment(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_words_per_page() {
        let config = WordListConfig::new().with_words_per_page(Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_custom_pattern() {
        let config =
            WordListConfig::new().with_headword_pattern(HeadwordPattern::Custom("([a-z".into()));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_line_tolerance() {
        let mut config = WordListConfig::new();
        config.lines.top_gap = (0.5, -0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_overrides() {
        let config = WordListConfig::new()
            .with_native_language(Language::Korean)
            .with_meaning_position(Some(MeaningPosition::Right));
        let json = config.to_json_string().unwrap();
        let restored = WordListConfig::from_json_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_json_partial_document_uses_defaults() {
        let config =
            WordListConfig::from_json_str(r#"{"meaning": {"below_vote_ratio": 0.67}}"#).unwrap();
        assert!((config.meaning.below_vote_ratio - 0.67).abs() < 1e-6);
        assert_eq!(config.meaning.column_containment, 0.8);
        assert_eq!(config.candidates, CandidateConfig::default());
    }

    #[test]
    fn test_custom_words_include_glyphs_and_abbreviations() {
        let words = LanguageConfig::default().custom_words();
        assert!(words.iter().any(|w| w == "■"));
        assert!(words.iter().any(|w| w == "助動"));
    }
}
