//! Debug visualization of page analyses.
//!
//! Useful when tuning thresholds against photographed pages: draws the
//! structure boxes, word column, ownership bands, headwords and meanings onto
//! a copy of the page image, or exports the analysis as JSON or SVG.
//!
//! ## Example
//!
//! ```
//! use image::DynamicImage;
//! use wordlist_oxide::debug::{DebugOptions, DebugVisualizer};
//! use wordlist_oxide::elements::RecognizedFragment;
//! use wordlist_oxide::geometry::Rect;
//! use wordlist_oxide::WordListPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fragments = vec![
//!     RecognizedFragment::new("apple", Rect::new(0.1, 0.1, 0.12, 0.04)),
//!     RecognizedFragment::new("river", Rect::new(0.1, 0.2, 0.12, 0.04)),
//!     RecognizedFragment::new("りんご", Rect::new(0.5, 0.1, 0.09, 0.03)),
//!     RecognizedFragment::new("かわ", Rect::new(0.5, 0.2, 0.06, 0.03)),
//! ];
//! let analysis = WordListPipeline::new().analyze(fragments, Vec::new())?;
//!
//! let page = DynamicImage::new_rgb8(200, 300);
//! let overlay = DebugVisualizer::new(DebugOptions::default()).render_overlay(&page, &analysis);
//! assert_eq!(overlay.dimensions(), (200, 300));
//! # Ok(())
//! # }
//! ```

mod visualizer;

pub use visualizer::{draw_overlay, DebugOptions, DebugVisualizer, OverlayColors};
