//! External collaborators of the pipeline.
//!
//! Text recognition and table-structure detection are performed by engines
//! outside this crate (OCR services, object-detection models). The pipeline
//! only sees them through these traits; both must report boxes in the
//! normalized top-left frame (see [`Rect::from_bottom_left`] for engines
//! that use a bottom-left origin).
//!
//! [`Rect::from_bottom_left`]: crate::geometry::Rect::from_bottom_left

use image::DynamicImage;

use crate::elements::{RecognizedFragment, StructureBox};
use crate::error::Result;

/// Recognizes text fragments on a page image.
pub trait TextRecognizer: Send + Sync {
    /// Recognize every text fragment of `image`.
    ///
    /// `custom_words` lists glyphs and abbreviations the engine should be
    /// biased toward. Fragment order is irrelevant.
    fn recognize(&self, image: &DynamicImage, custom_words: &[String])
        -> Result<Vec<RecognizedFragment>>;
}

/// Detects table rows and columns on a page image.
pub trait StructureDetector: Send + Sync {
    /// Detect structure boxes. An empty result is valid; an error is
    /// downgraded by the pipeline to "no structure".
    fn detect(&self, image: &DynamicImage) -> Result<Vec<StructureBox>>;
}

/// A recognizer that returns a fixed set of fragments for every image.
///
/// Useful when the fragments were recognized ahead of time, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    fragments: Vec<RecognizedFragment>,
}

impl StaticRecognizer {
    /// Wrap precomputed fragments.
    pub fn new(fragments: Vec<RecognizedFragment>) -> Self {
        Self { fragments }
    }
}

impl TextRecognizer for StaticRecognizer {
    fn recognize(
        &self,
        _image: &DynamicImage,
        _custom_words: &[String],
    ) -> Result<Vec<RecognizedFragment>> {
        Ok(self.fragments.clone())
    }
}

/// A detector that returns a fixed set of boxes for every image.
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    boxes: Vec<StructureBox>,
}

impl StaticDetector {
    /// Wrap precomputed boxes.
    pub fn new(boxes: Vec<StructureBox>) -> Self {
        Self { boxes }
    }
}

impl StructureDetector for StaticDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<StructureBox>> {
        Ok(self.boxes.clone())
    }
}
