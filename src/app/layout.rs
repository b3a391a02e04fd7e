//! Estimated geometry of the chapter column.
//!
//! The reader never reads pixel positions back from the widget tree. Chapter
//! and verse offsets are estimated from glyph counts and font sizes, then
//! scaled so the estimated total matches the content height reported by the
//! scrollable.

use chouraqui_core::model::ChapterData;
use chouraqui_core::scroll::ChapterGeometry;

pub(crate) const LINE_SPACING: f32 = 1.35;
pub(crate) const VERSE_SPACING_PX: f32 = 10.0;
pub(crate) const VERSE_PADDING_PX: f32 = 6.0;
/// Separator drawn above every chapter but the first one shown.
pub(crate) const CHAPTER_SEPARATOR_PX: f32 = 48.0;
pub(crate) const CHAPTER_SPACING_PX: f32 = 16.0;
pub(crate) const STATUS_ROW_PX: f32 = 32.0;
pub(crate) const COLUMN_PADDING_PX: f32 = 24.0;
pub(crate) const COLUMN_GAP_PX: f32 = 24.0;
/// A verse brought into view lands this far below the viewport top.
pub(crate) const VERSE_SCROLL_MARGIN_PX: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutMetrics {
    pub font_size: f32,
    pub hebrew_font_size: f32,
    pub viewport_width: f32,
    /// The book has a Hebrew column at all.
    pub has_secondary: bool,
    pub two_columns: bool,
}

impl LayoutMetrics {
    fn column_width(&self) -> f32 {
        let usable = (self.viewport_width - COLUMN_PADDING_PX * 2.0 - VERSE_PADDING_PX * 2.0).max(1.0);
        if self.has_secondary && self.two_columns {
            ((usable - COLUMN_GAP_PX) / 2.0).max(1.0)
        } else {
            usable
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChapterLayout {
    pub chapter: u32,
    pub top: f32,
    pub height: f32,
    /// `(verse, offset from the chapter top)`
    pub verse_offsets: Vec<(u32, f32)>,
}

/// Wrapped line count for `text` in a column `width` pixels wide.
pub(crate) fn estimate_lines(text: &str, width: f32, font_size: f32) -> f32 {
    let glyph_width = (font_size * 0.5).max(1.0);
    let max_units_per_line = (width / glyph_width).max(8.0);

    let mut lines = 1.0f32;
    let mut line_units = 0.0f32;
    for ch in text.chars() {
        let units = if ch.is_whitespace() {
            0.45
        } else if ch.is_ascii_punctuation() {
            0.55
        } else if ch.is_ascii() {
            1.0
        } else if ('\u{0591}'..='\u{05C7}').contains(&ch) {
            // Hebrew points and cantillation marks stack on their letter.
            0.0
        } else {
            1.1
        };
        if line_units + units > max_units_per_line {
            lines += 1.0;
            line_units = units;
        } else {
            line_units += units;
        }
    }
    lines
}

fn verse_height(metrics: &LayoutMetrics, french: &str, hebrew: Option<&str>) -> f32 {
    let width = metrics.column_width();
    let french_px = estimate_lines(french, width, metrics.font_size) * metrics.font_size * LINE_SPACING;
    let text_px = if metrics.has_secondary {
        // A missing Hebrew verse still takes one placeholder line.
        let hebrew_px = hebrew
            .map(|text| estimate_lines(text, width, metrics.hebrew_font_size))
            .unwrap_or(1.0)
            * metrics.hebrew_font_size
            * LINE_SPACING;
        if metrics.two_columns {
            french_px.max(hebrew_px)
        } else {
            french_px + hebrew_px
        }
    } else {
        french_px
    };
    text_px + VERSE_PADDING_PX * 2.0 + VERSE_SPACING_PX
}

fn chapter_layout(
    metrics: &LayoutMetrics,
    chapter: &ChapterData,
    top: f32,
    with_separator: bool,
) -> ChapterLayout {
    let mut offset = if with_separator { CHAPTER_SEPARATOR_PX } else { 0.0 };
    let mut verse_offsets = Vec::with_capacity(chapter.primary_verses.len());
    for verse in &chapter.primary_verses {
        verse_offsets.push((verse.verse, offset));
        offset += verse_height(metrics, &verse.text, chapter.secondary_text(verse.verse));
    }
    ChapterLayout {
        chapter: chapter.chapter,
        top,
        height: offset + CHAPTER_SPACING_PX,
        verse_offsets,
    }
}

/// Stack the loaded chapters below the leading status row.
pub(crate) fn estimate_layout<'a>(
    metrics: &LayoutMetrics,
    chapters: impl Iterator<Item = &'a ChapterData>,
) -> Vec<ChapterLayout> {
    let mut top = STATUS_ROW_PX;
    chapters
        .enumerate()
        .map(|(idx, chapter)| {
            let layout = chapter_layout(metrics, chapter, top, idx > 0);
            top += layout.height;
            layout
        })
        .collect()
}

/// Estimated content height: status rows above and below the chapters.
pub(crate) fn estimated_content_height(layouts: &[ChapterLayout]) -> f32 {
    layouts
        .last()
        .map(|last| last.top + last.height)
        .unwrap_or(STATUS_ROW_PX)
        + STATUS_ROW_PX
}

/// Factor mapping estimated pixels onto measured ones.
pub(crate) fn scale_factor(layouts: &[ChapterLayout], measured_content_height: Option<f32>) -> f32 {
    let estimated = estimated_content_height(layouts);
    match measured_content_height {
        Some(measured) if measured.is_finite() && measured > 0.0 && estimated > 0.0 => {
            measured / estimated
        }
        _ => 1.0,
    }
}

pub(crate) fn geometry(layouts: &[ChapterLayout], scale: f32) -> Vec<ChapterGeometry> {
    layouts
        .iter()
        .map(|layout| ChapterGeometry {
            chapter: layout.chapter,
            top: layout.top * scale,
            height: layout.height * scale,
        })
        .collect()
}

pub(crate) fn verse_offset(layouts: &[ChapterLayout], chapter: u32, verse: u32, scale: f32) -> Option<f32> {
    let layout = layouts.iter().find(|layout| layout.chapter == chapter)?;
    let (_, offset) = layout.verse_offsets.iter().find(|(v, _)| *v == verse)?;
    Some((layout.top + offset) * scale)
}
