//! Debug visualizer for page analyses.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as PixelRect;

use crate::error::Result;
use crate::geometry::Rect;
use crate::pipeline::PageAnalysis;

/// Colors for the overlay layers.
#[derive(Debug, Clone)]
pub struct OverlayColors {
    /// Detected row boxes (RGBA)
    pub row: [u8; 4],
    /// Detected and gap-filled columns (RGBA)
    pub column: [u8; 4],
    /// The resolved word column (RGBA)
    pub word_column: [u8; 4],
    /// Ownership bands (RGBA)
    pub band: [u8; 4],
    /// Headwords (RGBA)
    pub word: [u8; 4],
    /// Meaning fragments (RGBA)
    pub meaning: [u8; 4],
    /// Example fragments (RGBA)
    pub example: [u8; 4],
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            row: [255, 200, 0, 255],         // Amber
            column: [0, 160, 255, 255],      // Sky blue
            word_column: [0, 0, 255, 255],   // Blue
            band: [160, 160, 160, 255],      // Gray
            word: [255, 0, 0, 255],          // Red
            meaning: [0, 180, 0, 255],       // Green
            example: [255, 0, 255, 255],     // Magenta
        }
    }
}

/// Options for debug visualization.
#[derive(Debug, Clone)]
pub struct DebugOptions {
    /// Whether to draw detector rows and columns
    pub show_structure: bool,
    /// Whether to draw ownership bands
    pub show_bands: bool,
    /// Whether to draw headwords, meanings and examples
    pub show_fragments: bool,
    /// Line width in pixels
    pub line_width: u32,
    /// Colors for the layers
    pub colors: OverlayColors,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            show_structure: true,
            show_bands: true,
            show_fragments: true,
            line_width: 2,
            colors: OverlayColors::default(),
        }
    }
}

impl DebugOptions {
    /// Draw only headwords, meanings and examples.
    pub fn fragments_only() -> Self {
        Self {
            show_structure: false,
            show_bands: false,
            ..Default::default()
        }
    }
}

/// Renders page analyses for inspection.
pub struct DebugVisualizer {
    options: DebugOptions,
}

impl DebugVisualizer {
    /// Create a new debug visualizer with the given options.
    pub fn new(options: DebugOptions) -> Self {
        Self { options }
    }

    /// Draw the analysis onto an RGBA copy of `image`.
    pub fn render_overlay(&self, image: &DynamicImage, analysis: &PageAnalysis) -> RgbaImage {
        let mut canvas = image.to_rgba8();
        let colors = &self.options.colors;

        if self.options.show_bands {
            for row in &analysis.rows {
                self.draw_rect(&mut canvas, &row.ownership_band, colors.band);
            }
        }

        if self.options.show_structure {
            for b in &analysis.structure.row_boxes {
                self.draw_rect(&mut canvas, &b.bbox, colors.row);
            }
            for b in &analysis.structure.column_boxes {
                self.draw_rect(&mut canvas, &b.bbox, colors.column);
            }
            self.draw_rect(&mut canvas, &analysis.structure.word_column.bbox, colors.word_column);
        }

        if self.options.show_fragments {
            for row in &analysis.rows {
                self.draw_rect(&mut canvas, &row.word.bbox, colors.word);
                for f in &row.meaning_fragments {
                    self.draw_rect(&mut canvas, &f.bbox, colors.meaning);
                }
                for f in &row.example_fragments {
                    self.draw_rect(&mut canvas, &f.bbox, colors.example);
                }
            }
        }

        canvas
    }

    /// Draw a normalized rectangle outline `line_width` pixels thick, growing
    /// inward. Parts outside the canvas are clipped by `imageproc`.
    fn draw_rect(&self, canvas: &mut RgbaImage, rect: &Rect, color: [u8; 4]) {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let to_px = |v: f32, size: u32| -> i32 { (v * size as f32).round() as i32 };
        let x0 = to_px(rect.left(), width);
        let x1 = to_px(rect.right(), width);
        let y0 = to_px(rect.top(), height);
        let y1 = to_px(rect.bottom(), height);
        let paint = Rgba(color);

        for inset in 0..self.options.line_width.max(1) as i32 {
            let (w, h) = (x1 - x0 - 2 * inset, y1 - y0 - 2 * inset);
            if w < 0 || h < 0 {
                break;
            }
            let outline = PixelRect::at(x0 + inset, y0 + inset).of_size(w as u32 + 1, h as u32 + 1);
            draw_hollow_rect_mut(canvas, outline, paint);
        }
    }

    /// Export the analysis as pretty-printed JSON.
    pub fn export_analysis_json(&self, analysis: &PageAnalysis) -> Result<String> {
        let rows: Vec<serde_json::Value> = analysis
            .rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "word": row.word.text,
                    "bbox": self.rect_to_json(&row.word.bbox),
                    "band": self.rect_to_json(&row.ownership_band),
                    "meanings": row.meaning_fragments.iter().map(|f| f.text.as_str()).collect::<Vec<_>>(),
                    "rejected": row.rejected_candidates.iter().map(|f| f.text.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();

        let value = serde_json::json!({
            "meaning_position": analysis.meaning_position,
            "word_column": self.rect_to_json(&analysis.structure.word_column.bbox),
            "word_column_synthesized": analysis.structure.word_column_synthesized,
            "modal_offset": analysis.modal_offset,
            "corrected_rows": analysis.corrected_rows,
            "rows": rows,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Convert a Rect to JSON format.
    fn rect_to_json(&self, rect: &Rect) -> serde_json::Value {
        serde_json::json!({
            "x": rect.x,
            "y": rect.y,
            "width": rect.width,
            "height": rect.height,
        })
    }

    /// Export the analysis as an SVG sized `width` x `height`.
    pub fn export_analysis_svg(&self, analysis: &PageAnalysis, width: f32, height: f32) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        );
        let colors = &self.options.colors;
        let mut push = |rect: &Rect, color: [u8; 4]| {
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}"/>"#,
                rect.x * width,
                rect.y * height,
                rect.width * width,
                rect.height * height,
                color_to_svg(color)
            ));
        };

        if self.options.show_bands {
            for row in &analysis.rows {
                push(&row.ownership_band, colors.band);
            }
        }
        if self.options.show_structure {
            push(&analysis.structure.word_column.bbox, colors.word_column);
        }
        if self.options.show_fragments {
            for row in &analysis.rows {
                push(&row.word.bbox, colors.word);
                for f in &row.meaning_fragments {
                    push(&f.bbox, colors.meaning);
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

impl Default for DebugVisualizer {
    fn default() -> Self {
        Self::new(DebugOptions::default())
    }
}

/// Draw the analysis onto an RGBA copy of `image` with default options.
pub fn draw_overlay(image: &DynamicImage, analysis: &PageAnalysis) -> RgbaImage {
    let (width, height) = image.dimensions();
    log::debug!("Drawing debug overlay on {}x{} image", width, height);
    DebugVisualizer::default().render_overlay(image, analysis)
}

fn color_to_svg(color: [u8; 4]) -> String {
    format!("rgb({},{},{})", color[0], color[1], color[2])
}
