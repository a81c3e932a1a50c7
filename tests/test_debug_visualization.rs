//! Tests for the debug overlay of a full page analysis.

use image::{DynamicImage, Rgba};
use wordlist_oxide::debug::{draw_overlay, DebugOptions, DebugVisualizer};
use wordlist_oxide::{RecognizedFragment, Rect, WordListPipeline};

fn analysis() -> wordlist_oxide::PageAnalysis {
    let page = vec![
        RecognizedFragment::new("apple", Rect::new(0.10, 0.10, 0.12, 0.04)),
        RecognizedFragment::new("りんご", Rect::new(0.45, 0.105, 0.09, 0.03)),
        RecognizedFragment::new("river", Rect::new(0.10, 0.30, 0.12, 0.04)),
        RecognizedFragment::new("かわ", Rect::new(0.45, 0.305, 0.06, 0.03)),
    ];
    WordListPipeline::new().analyze(page, Vec::new()).unwrap()
}

#[test]
fn test_overlay_keeps_image_size() {
    let image = DynamicImage::new_rgb8(100, 50);
    let overlay = draw_overlay(&image, &analysis());
    assert_eq!(overlay.dimensions(), (100, 50));
}

#[test]
fn test_overlay_draws_meaning_box() {
    let image = DynamicImage::new_rgb8(100, 100);
    let overlay = DebugVisualizer::new(DebugOptions::fragments_only())
        .render_overlay(&image, &analysis());
    // Top edge of "りんご", two pixels thick from y = 10.5.
    assert_eq!(overlay.get_pixel(50, 11), &Rgba([0, 180, 0, 255]));
    assert_eq!(overlay.get_pixel(99, 99), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_json_export_lists_rows() {
    let json = DebugVisualizer::default()
        .export_analysis_json(&analysis())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 2);
    assert_eq!(value["rows"][1]["word"], "river");
    assert_eq!(value["word_column_synthesized"], true);
}

#[test]
fn test_svg_export_is_well_formed() {
    let svg = DebugVisualizer::default().export_analysis_svg(&analysis(), 200.0, 300.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.matches("<rect").count() >= 4);
}
