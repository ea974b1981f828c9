//! Layout computation — sizes measures and breaks them into lines.
//!
//! This is the pen/line-width state machine of the engraver, run as a
//! pure pass so the emission pass and any caller sizing an output surface
//! see the same numbers. All offsets are relative to the engraving origin.

use std::ops::Range;

use crate::font::GlyphResolver;
use crate::model::{Measure, Score};
use crate::units::Units;

use super::config::{EngraverConfig, SpacingConfig};
use super::constants::*;
use super::key_signature::key_signature_width;

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreLayout {
    pub lines: Vec<LineLayout>,
    /// One entry per measure index, shared by every staff
    pub measures: Vec<MeasureLayout>,
    pub staff_count: usize,
    pub staff_spacing: f64,
    /// Room needed above the first staff's top line for the header
    pub header_height: f64,
    /// Widest line
    pub width: f64,
    /// Offset of the last staff's bottom line below the origin
    pub height: f64,
}

/// One line (system) of music.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub index: usize,
    /// Measure indices on this line
    pub measures: Range<usize>,
    /// Offset of the top staff's bottom line below the origin
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureLayout {
    pub measure_idx: usize,
    pub line: usize,
    /// Left edge, relative to the origin
    pub x: f64,
    /// Full box: prefix + content + trailing spacing
    pub width: f64,
    /// Clef + key signature, zero unless first on its line
    pub prefix_width: f64,
    pub content_width: f64,
    pub spacing: f64,
    pub is_first_of_line: bool,
}

impl MeasureLayout {
    /// Left edge of the region elements are spread over.
    pub fn element_area_x(&self) -> f64 {
        self.x + self.prefix_width
    }

    pub fn element_area_width(&self) -> f64 {
        self.width - self.prefix_width
    }
}

impl ScoreLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Offset of a staff's bottom line below the origin.
    pub fn staff_y(&self, line: &LineLayout, staff: usize) -> f64 {
        line.y + staff as f64 * self.staff_spacing
    }

    pub fn measures_on(&self, line: &LineLayout) -> &[MeasureLayout] {
        &self.measures[line.measures.clone()]
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Sizing
// ═══════════════════════════════════════════════════════════════════════

/// Pixel width of a measure's elements: each element's glyph width (or
/// the missing-glyph fallback) plus the inter-element spacing.
pub fn measure_content_width(
    measure: &Measure,
    glyphs: &dyn GlyphResolver,
    units: &Units,
    spacing: &SpacingConfig,
) -> f64 {
    let gap = units.staff_spaces_to_pixels(spacing.element_spacing);
    let fallback = units.staff_spaces_to_pixels(spacing.missing_glyph_width);
    measure
        .elements
        .iter()
        .map(|e| glyphs.glyph_width_px(e.glyph_name(), units).unwrap_or(fallback) + gap)
        .sum()
}

/// Clef + key signature width placed before the first measure of a line.
pub fn prefix_width(score: &Score, config: &EngraverConfig) -> f64 {
    let units = config.units();
    units.staff_spaces_to_pixels(config.spacing.clef_width)
        + key_signature_width(&score.key_signature, &units, &config.spacing)
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

/// Greedy single-pass line breaking over the score's measure indices.
///
/// A measure starts a new line when the current line already holds
/// something and `line width + content + measure spacing` would exceed
/// `max_line_width`. The first measure of every line carries the prefix.
/// Stacked staves share breaks; a measure index is as wide as its widest
/// staff.
pub fn compute_layout(score: &Score, glyphs: &dyn GlyphResolver, config: &EngraverConfig) -> ScoreLayout {
    let units = config.units();
    let staff_count = score.staff_count();
    let prefix = prefix_width(score, config);
    let measure_spacing = units.staff_spaces_to_pixels(config.spacing.measure_spacing);
    let line_stride = config.line_height + staff_count.saturating_sub(1) as f64 * config.staff_spacing;

    let measure_count = score.measure_count();
    let mut measures = Vec::with_capacity(measure_count);
    let mut lines = Vec::new();

    let mut pen_x = 0.0;
    let mut line_width = 0.0;
    let mut line = 0;
    let mut line_start = 0;

    for idx in 0..measure_count {
        let content_width = score
            .staves
            .iter()
            .filter_map(|staff| staff.measures.get(idx))
            .map(|m| measure_content_width(m, glyphs, &units, &config.spacing))
            .fold(0.0, f64::max);

        if idx > line_start && line_width + content_width + measure_spacing > config.max_line_width {
            lines.push(LineLayout {
                index: line,
                measures: line_start..idx,
                y: line as f64 * line_stride,
                width: line_width,
            });
            line += 1;
            line_start = idx;
            pen_x = 0.0;
            line_width = 0.0;
            log::debug!("line {line} starts at measure {}", idx + 1);
        }

        let is_first_of_line = idx == line_start;
        let prefix_width = if is_first_of_line { prefix } else { 0.0 };
        let width = prefix_width + content_width + measure_spacing;

        measures.push(MeasureLayout {
            measure_idx: idx,
            line,
            x: pen_x,
            width,
            prefix_width,
            content_width,
            spacing: measure_spacing,
            is_first_of_line,
        });

        pen_x += width;
        line_width += width;
    }

    if measure_count > 0 {
        lines.push(LineLayout {
            index: line,
            measures: line_start..measure_count,
            y: line as f64 * line_stride,
            width: line_width,
        });
    }

    let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
    let height = match lines.last() {
        Some(last) => last.y + staff_count.saturating_sub(1) as f64 * config.staff_spacing,
        None => 0.0,
    };
    let header_height = if config.show_header {
        units.staff_spaces_to_pixels(HEADER_HEIGHT)
    } else {
        0.0
    };

    ScoreLayout {
        lines,
        measures,
        staff_count,
        staff_spacing: config.staff_spacing,
        header_height,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::font::{BoundingBox, Glyph, StaffPoint};
    use crate::model::{Duration, KeySignature, TimeSignature};
    use pretty_assertions::assert_eq;

    /// Resolver whose only notehead is a 1-staff-space-wide whole note.
    fn whole_only() -> HashMap<String, Glyph> {
        let bbox = BoundingBox::new(StaffPoint::new(0.0, -0.5), StaffPoint::new(1.0, 0.5));
        let mut map = HashMap::new();
        map.insert("noteheadWhole".to_string(), Glyph::new("noteheadWhole", '\u{E0A2}', bbox));
        map
    }

    /// `count` measures of one whole note each: 30 px content, 20 px spacing.
    fn score_of(count: usize, staves: usize, key: &str) -> Score {
        let mut score = Score::new("t", "c", KeySignature::new(key, "major"), TimeSignature::default(), 90);
        for _ in 0..staves {
            let staff = score.add_staff("gClef");
            for _ in 0..count {
                staff.add_measure(TimeSignature::default()).add_rest(Duration::Whole);
            }
        }
        // rests resolve to "restWhole", which is missing: 20 px fallback
        score
    }

    fn whole_notes(count: usize) -> Score {
        let mut score = Score::new("t", "c", KeySignature::new("C", "major"), TimeSignature::default(), 90);
        let staff = score.add_staff("gClef");
        for _ in 0..count {
            staff
                .add_measure(TimeSignature::default())
                .add_note(64, Duration::Whole, 0, Default::default());
        }
        score
    }

    #[test]
    fn content_width_uses_glyph_or_fallback() {
        let glyphs = whole_only();
        let units = Units::default();
        let spacing = SpacingConfig::default();
        let notes = whole_notes(1);
        assert_eq!(measure_content_width(&notes.staves[0].measures[0], &glyphs, &units, &spacing), 30.0);
        let rests = score_of(1, 1, "C");
        assert_eq!(measure_content_width(&rests.staves[0].measures[0], &glyphs, &units, &spacing), 40.0);
    }

    #[test]
    fn breaks_at_first_overflowing_measure() {
        let glyphs = whole_only();
        let config = EngraverConfig::with_max_line_width(200.0);
        let layout = compute_layout(&whole_notes(5), &glyphs, &config);

        // 80 (prefix 30 + 30 + 20), then 50 each: 80, 130, 180, 230 > 200
        let lines: Vec<usize> = layout.measures.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![0, 0, 0, 1, 1]);
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.lines[0].measures, 0..3);
        assert_eq!(layout.lines[0].width, 180.0);

        let fourth = &layout.measures[3];
        assert!(fourth.is_first_of_line);
        assert_eq!(fourth.x, 0.0);
        assert_eq!(fourth.prefix_width, 30.0);
        assert_eq!(fourth.width, 80.0);
        assert_eq!(layout.lines[1].y, 150.0);
    }

    #[test]
    fn exactly_full_line_does_not_break() {
        let glyphs = whole_only();
        let config = EngraverConfig::with_max_line_width(180.0);
        let layout = compute_layout(&whole_notes(3), &glyphs, &config);
        assert_eq!(layout.line_count(), 1);
    }

    #[test]
    fn oversized_first_measure_stays_on_its_line() {
        let glyphs = whole_only();
        let config = EngraverConfig::with_max_line_width(10.0);
        let layout = compute_layout(&whole_notes(2), &glyphs, &config);
        assert_eq!(layout.line_count(), 2);
        assert!(layout.measures.iter().all(|m| m.is_first_of_line));
    }

    #[test]
    fn pen_advances_by_measure_width() {
        let glyphs = whole_only();
        let layout = compute_layout(&whole_notes(3), &glyphs, &EngraverConfig::default());
        let xs: Vec<f64> = layout.measures.iter().map(|m| m.x).collect();
        assert_eq!(xs, vec![0.0, 80.0, 130.0]);
        assert_eq!(layout.measures[1].element_area_x(), 80.0);
        assert_eq!(layout.measures[0].element_area_width(), 50.0);
        assert_eq!(layout.width, 180.0);
    }

    #[test]
    fn key_signature_widens_prefix() {
        let glyphs = whole_only();
        // two sharps: 2 * 0.75 ss = 15 px
        let layout = compute_layout(&score_of(1, 1, "D"), &glyphs, &EngraverConfig::default());
        assert_eq!(layout.measures[0].prefix_width, 45.0);
    }

    #[test]
    fn staves_share_breaks_and_stack() {
        let glyphs = whole_only();
        let mut score = whole_notes(4);
        let bass = score.add_staff("fClef");
        for _ in 0..4 {
            let m = bass.add_measure(TimeSignature::default());
            m.add_note(48, Duration::Whole, 4, Default::default());
            m.add_note(50, Duration::Whole, 5, Default::default());
        }

        let config = EngraverConfig::with_max_line_width(200.0);
        let layout = compute_layout(&score, &glyphs, &config);
        // the bass staff holds two notes per measure, so it sets the width
        assert_eq!(layout.measures[0].content_width, 60.0);
        assert_eq!(layout.measures[1].line, 0);
        assert_eq!(layout.measures[2].line, 1);

        let second = &layout.lines[1];
        assert_eq!(second.y, 250.0);
        assert_eq!(layout.staff_y(second, 1), 350.0);
        assert_eq!(layout.height, 350.0);
    }

    #[test]
    fn empty_score_has_no_lines() {
        let score = Score::new("t", "c", KeySignature::new("C", "major"), TimeSignature::default(), 90);
        let layout = compute_layout(&score, &whole_only(), &EngraverConfig::default());
        assert!(layout.lines.is_empty());
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.height, 0.0);
    }
}
