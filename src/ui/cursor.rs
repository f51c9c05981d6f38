//! Simulated cursor geometry
//!
//! The prompt mirrors the text field into a paragraph and draws its own
//! cursor block over it. Text is treated as reflowing at a fixed
//! monospace character width, so the block position follows directly from
//! the selection offsets and the paragraph width.

use crate::config::PromptConfig;

/// Measures the surface the mirrored text is drawn on
pub trait TextLayout {
    /// Current width of the text paragraph, in pixels
    fn paragraph_width(&self) -> f32;

    /// Zoom factor applied to the character metrics
    fn zoom(&self) -> f32 {
        1.0
    }
}

/// Layout with a fixed paragraph width and zoom, for headless use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLayout {
    pub width: f32,
    pub zoom: f32,
}

impl FixedLayout {
    pub fn new(width: f32) -> Self {
        Self { width, zoom: 1.0 }
    }

    pub fn with_zoom(width: f32, zoom: f32) -> Self {
        Self { width, zoom }
    }
}

impl TextLayout for FixedLayout {
    fn paragraph_width(&self) -> f32 {
        self.width
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}

/// Selected character range, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty selection at `offset`
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// What the cursor shows when nothing is reported: the last character
    pub fn caret_at_end(len: usize) -> Self {
        Self::new(len.saturating_sub(1), len)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-character pixel metrics at zoom 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharMetrics {
    pub char_width: f32,
    pub row_height: f32,
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self::from(&PromptConfig::default())
    }
}

impl From<&PromptConfig> for CharMetrics {
    fn from(config: &PromptConfig) -> Self {
        Self {
            char_width: config.char_width_px,
            row_height: config.row_height_px,
        }
    }
}

/// Rectangle covered by the cursor block, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorRect {
    pub width: f32,
    pub left: f32,
    pub top: f32,
}

impl CursorRect {
    /// Inline style for the cursor element
    pub fn css(&self) -> String {
        format!(
            "width: {}px; left: {}px; top: {}px",
            self.width, self.left, self.top
        )
    }
}

/// Compute the cursor block for text of `len` characters.
///
/// A missing selection means the caret sits at the end of the text.
pub fn cursor_geometry(
    len: usize,
    selection: Option<Selection>,
    paragraph_width: f32,
    metrics: CharMetrics,
    zoom: f32,
) -> CursorRect {
    let selection = selection.unwrap_or_else(|| Selection::caret_at_end(len));

    let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
    let width_per_char = metrics.char_width * zoom;
    let height_per_row = metrics.row_height * zoom;

    // Never less than one character per line, even for a collapsed paragraph
    let chars_per_line = if paragraph_width.is_finite() && width_per_char > 0.0 {
        (paragraph_width / width_per_char).max(1.0)
    } else {
        1.0
    };

    let chars_selected = (selection.len().max(1) as f32).min(chars_per_line);
    let start = selection.start as f32;

    CursorRect {
        width: chars_selected * width_per_char,
        left: width_per_char * (start % chars_per_line),
        top: (start / chars_per_line).floor() * height_per_row,
    }
}

/// Mirror field text into paragraph markup
///
/// Escapes markup characters, turns spaces into non-breaking spaces so
/// runs of blanks keep their width, and drops newlines.
pub fn html_mirror(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            ' ' => out.push_str("&nbsp;"),
            '\n' => {}
            ch => out.push(ch),
        }
    }
    out
}
