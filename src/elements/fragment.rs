//! Recognized text fragments.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// One text span recognized on the page, with its bounding box.
///
/// Fragments are created once per image by the text recognizer and never
/// mutated afterwards. Several fragments may share identical text, so the
/// pipeline compares them by value (text and box) rather than by text alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFragment {
    /// Recognized text
    pub text: String,
    /// Bounding box in the normalized page frame
    pub bbox: Rect,
}

impl RecognizedFragment {
    /// Create a new fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::elements::RecognizedFragment;
    /// use wordlist_oxide::geometry::Rect;
    ///
    /// let fragment = RecognizedFragment::new("apple", Rect::new(0.1, 0.2, 0.1, 0.02));
    /// assert_eq!(fragment.char_count(), 5);
    /// ```
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Number of Unicode scalar values in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Average width of one character, used as a font-width proxy.
    pub fn char_width(&self) -> f32 {
        let count = self.char_count();
        if count == 0 {
            return 0.0;
        }
        self.bbox.width / count as f32
    }

    /// Box height, used as a font-size proxy.
    pub fn font_size(&self) -> f32 {
        self.bbox.height
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Whether the text is nothing but an integer (page or row numbers).
    pub fn is_only_number(&self) -> bool {
        self.text.trim().parse::<i64>().is_ok()
    }
}
