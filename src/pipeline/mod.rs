//! Word-list extraction pipeline.
//!
//! ```text
//! Image
//!     ↓
//! [TextRecognizer] → RecognizedFragment[]      [StructureDetector] → StructureBox[]
//!     ↓                                              ↓
//! analyze(fragments, boxes)
//!     ↓
//! prefilter → select_candidates → resolve_structure → assemble_rows
//!     ↓
//! LanguageClassifier → classify_position → assign_meanings → verify_meanings
//!     ↓
//! RecordBuilder
//!     ↓
//! PageAnalysis { rows, structure, records, ... }
//! ```
//!
//! [`WordListPipeline::analyze`] is pure and deterministic; the collaborator
//! calls in [`WordListPipeline::extract`] are the only side effects.

pub mod builder;
pub mod collaborators;
pub mod lines;

pub use builder::RecordBuilder;
pub use collaborators::{StaticDetector, StaticRecognizer, StructureDetector, TextRecognizer};

use image::DynamicImage;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{single_word_regex, WordListConfig};
use crate::elements::{RecognizedFragment, Record, StructureBox};
use crate::error::{Error, Result};
use crate::language::{Language, LanguageClassifier, LanguageIdentifier, ScriptLanguageIdentifier};
use crate::layout::{
    assemble_rows, prefilter_fragments, resolve_structure, select_candidates, ResolvedStructure,
    WordRow,
};
use crate::meaning::{assign_meanings, classify_position, verify_meanings, MeaningPosition, ModalOffset};

/// Everything the pipeline learned about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// One row per headword, top to bottom
    pub rows: Vec<WordRow>,
    /// Reconciled table structure
    pub structure: ResolvedStructure,
    /// Where the page prints its meanings
    pub meaning_position: MeaningPosition,
    /// Typical word-to-meaning offset, when verification ran
    pub modal_offset: Option<ModalOffset>,
    /// Indices into `rows` whose meaning verification replaced
    pub corrected_rows: Vec<usize>,
    /// The extracted entries, top to bottom
    pub records: Vec<Record>,
}

/// The word-list extraction pipeline.
///
/// Holds only immutable configuration and thread-safe collaborators, so one
/// pipeline can serve several threads at once.
pub struct WordListPipeline {
    config: WordListConfig,
    pattern: Regex,
    identifier: Box<dyn LanguageIdentifier>,
    recognizer: Option<Box<dyn TextRecognizer>>,
    detector: Option<Box<dyn StructureDetector>>,
}

impl WordListPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        let config = WordListConfig::default();
        Self {
            identifier: default_identifier(&config),
            pattern: single_word_regex(),
            config,
            recognizer: None,
            detector: None,
        }
    }

    /// Create a pipeline with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the configuration does not
    /// validate.
    pub fn with_config(config: WordListConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            identifier: default_identifier(&config),
            pattern: config.candidates.pattern.regex()?,
            config,
            recognizer: None,
            detector: None,
        })
    }

    /// Use `recognizer` for [`extract`](Self::extract).
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Use `detector` for [`extract`](Self::extract).
    pub fn with_structure_detector(mut self, detector: Box<dyn StructureDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Replace the built-in script-based language identifier.
    pub fn with_language_identifier(mut self, identifier: Box<dyn LanguageIdentifier>) -> Self {
        self.identifier = identifier;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &WordListConfig {
        &self.config
    }

    /// Analyze one page from its recognized fragments and structure boxes.
    ///
    /// # Errors
    ///
    /// - [`Error::NoFragmentsRecognized`] when no fragment survives the
    ///   pre-filter
    /// - [`Error::NoWordCandidates`] when no headword is found
    pub fn analyze(
        &self,
        fragments: Vec<RecognizedFragment>,
        boxes: Vec<StructureBox>,
    ) -> Result<PageAnalysis> {
        let fragments = prefilter_fragments(fragments);
        if fragments.is_empty() {
            return Err(Error::NoFragmentsRecognized);
        }
        log::debug!(
            "Analyzing page: {} fragments, {} structure boxes",
            fragments.len(),
            boxes.len()
        );

        let candidates = select_candidates(&fragments, &self.config.candidates, &self.pattern)?;
        let (structure, rows) = resolve_structure(
            candidates,
            &fragments,
            boxes,
            &self.config.structure,
            &self.pattern,
        )?;
        let rows = assemble_rows(rows, &structure, &fragments);

        let classifier = LanguageClassifier::new(self.identifier.as_ref(), &self.config.language);
        let rows = classifier.classify_rows(rows);

        let meaning_position =
            classify_position(&rows, &structure.word_column.bbox, &self.config.meaning);
        let rows = assign_meanings(rows, meaning_position, &structure, &self.config.meaning);
        let (rows, modal_offset, corrected_rows) = verify_meanings(rows, &self.config.meaning);

        let (rows, records) = RecordBuilder::new(&self.config).build(rows);

        Ok(PageAnalysis {
            rows,
            structure,
            meaning_position,
            modal_offset,
            corrected_rows,
            records,
        })
    }

    /// Recognize, detect and analyze one page image.
    ///
    /// A failing structure detector is not fatal: the page is analyzed
    /// without structure boxes.
    ///
    /// # Errors
    ///
    /// - [`Error::Recognition`] when no recognizer is configured or it fails
    /// - every error of [`analyze`](Self::analyze)
    pub fn extract_analysis(&self, image: &DynamicImage) -> Result<PageAnalysis> {
        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or_else(|| Error::Recognition("no text recognizer configured".to_string()))?;
        let fragments = recognizer.recognize(image, &self.config.language.custom_words())?;
        if fragments.is_empty() {
            return Err(Error::NoFragmentsRecognized);
        }

        let boxes = match &self.detector {
            Some(detector) => match detector.detect(image) {
                Ok(boxes) => boxes,
                Err(e) => {
                    log::warn!("{}; continuing without table structure", e);
                    Vec::new()
                },
            },
            None => {
                log::warn!("No structure detector configured; continuing without table structure");
                Vec::new()
            },
        };

        self.analyze(fragments, boxes)
    }

    /// Recognize, detect and analyze one page image, returning its records.
    pub fn extract(&self, image: &DynamicImage) -> Result<Vec<Record>> {
        self.extract_analysis(image).map(|analysis| analysis.records)
    }

    /// Like [`extract`](Self::extract), but a failed page yields an empty
    /// list instead of an error. The error is logged.
    pub fn extract_or_empty(&self, image: &DynamicImage) -> Vec<Record> {
        match self.extract(image) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Word list extraction failed: {}", e);
                Vec::new()
            },
        }
    }
}

impl Default for WordListPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Ideograph-only text is read as the native language when that language
/// writes with ideographs.
fn default_identifier(config: &WordListConfig) -> Box<dyn LanguageIdentifier> {
    let han_language = match config.language.native_language {
        Language::Chinese => Language::Chinese,
        _ => Language::Japanese,
    };
    Box::new(ScriptLanguageIdentifier::with_han_language(han_language))
}
