//! Detected table-structure boxes.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Classification reported by the table-structure detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureLabel {
    /// A table row
    Row,
    /// A projected row header, treated as a row
    RowHeader,
    /// A table column
    Column,
    /// A column header, treated as a column
    ColumnHeader,
    /// Any other detector class
    Unknown,
}

impl StructureLabel {
    /// Map a detector class name onto a label.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordlist_oxide::elements::StructureLabel;
    ///
    /// assert_eq!(StructureLabel::from_detector_label("table row"), StructureLabel::Row);
    /// assert_eq!(
    ///     StructureLabel::from_detector_label("table projected row header"),
    ///     StructureLabel::RowHeader
    /// );
    /// assert_eq!(StructureLabel::from_detector_label("table"), StructureLabel::Unknown);
    /// ```
    pub fn from_detector_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "table row" | "row" => Self::Row,
            "table projected row header" | "row header" => Self::RowHeader,
            "table column" | "column" => Self::Column,
            "table column header" | "column header" => Self::ColumnHeader,
            _ => Self::Unknown,
        }
    }
}

/// One table region found by the structure detector.
///
/// Two boxes are equal iff their rectangles are equal. The label is not part
/// of the identity because rows and columns are de-duplicated by geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StructureBox {
    /// Region in the normalized page frame
    pub bbox: Rect,
    /// Detector confidence; zero for synthesized boxes
    pub confidence: f32,
    /// Detector classification
    pub label: StructureLabel,
}

impl PartialEq for StructureBox {
    fn eq(&self, other: &Self) -> bool {
        self.bbox == other.bbox
    }
}

impl StructureBox {
    /// Create a detected box.
    pub fn new(bbox: Rect, confidence: f32, label: StructureLabel) -> Self {
        Self {
            bbox,
            confidence,
            label,
        }
    }

    /// Create a row box with full confidence.
    pub fn row(bbox: Rect) -> Self {
        Self::new(bbox, 1.0, StructureLabel::Row)
    }

    /// Create a column box with full confidence.
    pub fn column(bbox: Rect) -> Self {
        Self::new(bbox, 1.0, StructureLabel::Column)
    }

    /// Create a column box the pipeline inferred itself.
    pub fn synthesized_column(bbox: Rect) -> Self {
        Self::new(bbox, 0.0, StructureLabel::Column)
    }

    /// Whether the box delimits a row.
    pub fn is_row(&self) -> bool {
        matches!(self.label, StructureLabel::Row | StructureLabel::RowHeader)
    }

    /// Whether the box delimits a column.
    pub fn is_column(&self) -> bool {
        matches!(self.label, StructureLabel::Column | StructureLabel::ColumnHeader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_label_and_confidence() {
        let rect = Rect::new(0.0, 0.25, 1.0, 0.125);
        let a = StructureBox::new(rect, 0.9, StructureLabel::Row);
        let b = StructureBox::new(rect, 0.3, StructureLabel::Column);
        assert_eq!(a, b);
        assert_ne!(a, StructureBox::row(Rect::new(0.0, 0.5, 1.0, 0.125)));
    }

    #[test]
    fn test_row_and_column_classes() {
        let rect = Rect::new(0.0, 0.0, 1.0, 0.1);
        assert!(StructureBox::new(rect, 1.0, StructureLabel::RowHeader).is_row());
        assert!(StructureBox::new(rect, 1.0, StructureLabel::ColumnHeader).is_column());
        let unknown = StructureBox::new(rect, 1.0, StructureLabel::Unknown);
        assert!(!unknown.is_row());
        assert!(!unknown.is_column());
    }

    #[test]
    fn test_detector_label_is_case_insensitive() {
        assert_eq!(StructureLabel::from_detector_label("Table Column"), StructureLabel::Column);
        assert_eq!(
            StructureLabel::from_detector_label(" table column header "),
            StructureLabel::ColumnHeader
        );
    }
}
