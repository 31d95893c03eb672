//! Presentation of a [`LabelResult`](crate::LabelResult): colors, filters and
//! pixel geometry.
//!
//! Everything here is a pure function of the boxes, so the browser client and
//! the command line overlays agree on what is drawn and in which color.

use crate::types::DetectedBox;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Number of distinct box colors.
pub const PALETTE_SIZE: usize = 8;

/// Stroke colors, indexed by color index.
pub const PALETTE: [&str; PALETTE_SIZE] = [
    "#ff3b30", "#34c759", "#007aff", "#ff9500", "#af52de", "#00c7be", "#ffcc00", "#ff2d55",
];

/// Color assignment for one result: each unique label gets its first-seen
/// rank modulo [`PALETTE_SIZE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelPalette {
    labels: Vec<(String, usize)>,
}

impl LabelPalette {
    pub fn from_boxes(boxes: &[DetectedBox]) -> Self {
        let mut labels: Vec<(String, usize)> = Vec::new();
        for b in boxes {
            if !labels.iter().any(|(label, _)| *label == b.label) {
                let rank = labels.len();
                labels.push((b.label.clone(), rank % PALETTE_SIZE));
            }
        }
        Self { labels }
    }

    /// Unique labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|(label, _)| label.as_str())
    }

    pub fn color_of(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, color)| *color)
    }

    /// Color index for `b`, falling back to its `original_index` for labels
    /// this palette has not seen.
    pub fn color_for(&self, b: &DetectedBox) -> usize {
        self.color_of(&b.label)
            .unwrap_or(b.original_index % PALETTE_SIZE)
    }
}

/// The active filter control of one result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Label(String),
}

impl Filter {
    /// The control value for this filter (`"all"` or the label).
    pub fn value(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Label(label) => label,
        }
    }

    pub fn admits(&self, b: &DetectedBox) -> bool {
        match self {
            Filter::All => true,
            Filter::Label(label) => b.label == *label,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        if value == "all" {
            Filter::All
        } else {
            Filter::Label(value.to_string())
        }
    }
}

/// Boxes of `boxes` shown under `filter`, in their original order.
pub fn visible_boxes<'a>(boxes: &'a [DetectedBox], filter: &Filter) -> Vec<&'a DetectedBox> {
    boxes.iter().filter(|b| filter.admits(b)).collect()
}

static ALL: Filter = Filter::All;

/// Independent filter selection per result, keyed by result index.
#[derive(Debug, Default)]
pub struct FilterState {
    active: HashMap<usize, Filter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, result: usize, filter: Filter) {
        self.active.insert(result, filter);
    }

    pub fn active(&self, result: usize) -> &Filter {
        self.active.get(&result).unwrap_or(&ALL)
    }

    pub fn visible<'a>(&self, result: usize, boxes: &'a [DetectedBox]) -> Vec<&'a DetectedBox> {
        visible_boxes(boxes, self.active(result))
    }
}

/// A box in pixel coordinates of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    /// Scale a normalized box to an image of `width` x `height` pixels.
    pub fn from_normalized(b: &DetectedBox, width: f64, height: f64) -> Self {
        let x = b.x_min * width;
        let y = b.y_min * height;
        Self {
            x,
            y,
            width: b.x_max * width - x,
            height: b.y_max * height - y,
        }
    }
}

/// Render the boxes of one result visible under `filter` as an SVG drawn over
/// the image at `image_url`, sized `width` x `height` pixels.
///
/// Colors come from the full box list so they stay stable across filters.
pub fn render_overlay_svg(
    image_url: &str,
    width: u32,
    height: u32,
    boxes: &[DetectedBox],
    filter: &Filter,
) -> String {
    let palette = LabelPalette::from_boxes(boxes);
    let stroke = (width.max(height) as f64 / 250.0).max(2.0);
    let font = (height as f64 / 30.0).max(12.0);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <image href="{}" x="0" y="0" width="{width}" height="{height}"/>"#,
        escape(image_url)
    );
    for b in visible_boxes(boxes, filter) {
        let rect = PixelRect::from_normalized(b, width as f64, height as f64);
        let color = PALETTE[palette.color_for(b)];
        let _ = writeln!(
            svg,
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="none" stroke="{color}" stroke-width="{stroke:.1}"/>"#,
            rect.x, rect.y, rect.width, rect.height
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" fill="{color}" font-family="sans-serif" font-size="{font:.0}">{}</text>"#,
            rect.x,
            (rect.y - stroke).max(font),
            escape(&b.label)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
