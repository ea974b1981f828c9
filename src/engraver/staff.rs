//! Staff lines, barlines, clefs, header and measure numbers.

use crate::commands::{CommandBuffer, DrawCommand, Point};
use crate::model::Clef;

use super::constants::*;
use super::Engraver;

// ═══════════════════════════════════════════════════════════════════════
// Staff
// ═══════════════════════════════════════════════════════════════════════

impl Engraver<'_> {
    /// Five staff lines from `x` over `length` pixels and a barline at the
    /// right edge. `y` is the bottom line.
    pub(super) fn draw_staff_segment(&self, x: f64, y: f64, length: f64, buffer: &mut CommandBuffer) {
        let thickness = self.ss(self.defaults.staff_line_thickness);
        for i in 0..STAFF_LINE_COUNT {
            let line_y = y - self.ss(i as f64);
            buffer.push(DrawCommand::line(
                Point::new(x, line_y),
                Point::new(x + length, line_y),
                thickness,
                self.config.color,
            ));
        }

        let barline_thickness = self.ss(self.defaults.thin_barline_thickness);
        let barline_x = x + length - barline_thickness / 2.0;
        buffer.push(DrawCommand::line(
            Point::new(barline_x, y - self.ss(STAFF_HEIGHT)),
            Point::new(barline_x, y),
            barline_thickness,
            self.config.color,
        ));
    }

    // ── Clef ────────────────────────────────────────────────────────

    /// Clef glyph relative to the middle line, shifted by the glyph's own
    /// vertical center since clef baselines are not visually centered.
    pub(super) fn draw_clef(&self, clef: &Clef, x: f64, y: f64, buffer: &mut CommandBuffer) {
        let Some(glyph) = self.lookup(clef.glyph_name()) else {
            return;
        };
        let clef_x = x + self.ss(self.config.spacing.clef_inset);
        let middle_y = y - self.ss(MIDDLE_LINE);
        let clef_y = middle_y + self.ss(glyph.vertical_center());
        self.push_glyph(glyph, clef_x, clef_y, self.config.color, buffer);
    }

    // ── Text ────────────────────────────────────────────────────────

    /// Title centered over `width`, composer right-aligned, both above the
    /// top line of the staff whose bottom line is at `y`.
    pub(super) fn draw_header(&self, x: f64, y: f64, width: f64, buffer: &mut CommandBuffer) {
        let top = y - self.ss(STAFF_HEIGHT);
        let score = self.score;

        if !score.title.is_empty() {
            let size = self.ss(TITLE_SIZE);
            let title_x = x + (width - text_width(&score.title, size)) / 2.0;
            buffer.push(DrawCommand::text(
                score.title.as_str(),
                Point::new(title_x, top - self.ss(TITLE_RISE)),
                size,
                self.config.color,
            ));
        }

        if !score.composer.is_empty() {
            let size = self.ss(COMPOSER_SIZE);
            let composer_x = x + width - text_width(&score.composer, size);
            buffer.push(DrawCommand::text(
                score.composer.as_str(),
                Point::new(composer_x, top - self.ss(COMPOSER_RISE)),
                size,
                self.config.color,
            ));
        }
    }

    pub(super) fn draw_measure_number(&self, number: u32, x: f64, y: f64, buffer: &mut CommandBuffer) {
        let top = y - self.ss(STAFF_HEIGHT);
        buffer.push(DrawCommand::text(
            number.to_string(),
            Point::new(x, top - self.ss(MEASURE_NUMBER_RISE)),
            self.ss(MEASURE_NUMBER_SIZE),
            self.config.color,
        ));
    }
}

/// Rough advance of a string; draw-text has no alignment, so centering
/// and right alignment are done here.
fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * TEXT_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engraver::EngraverConfig;
    use crate::font::{EngravingDefaults, MusicFont};
    use crate::model::{KeySignature, Score, TimeSignature};
    use pretty_assertions::assert_eq;

    fn score() -> Score {
        Score::new(
            "Lisa gikk til skolen",
            "Folk",
            KeySignature::new("C", "major"),
            TimeSignature::default(),
            100,
        )
    }

    #[test]
    fn staff_segment_is_five_lines_and_barline() {
        let font = MusicFont::bundled().unwrap();
        let score = score();
        let engraver = Engraver::new(&score, &font, EngravingDefaults::default(), EngraverConfig::default());
        let mut buffer = CommandBuffer::new();
        engraver.draw_staff_segment(10.0, 100.0, 200.0, &mut buffer);

        assert_eq!(buffer.len(), 6);
        let ys: Vec<f64> = buffer
            .iter()
            .take(5)
            .map(|c| match c {
                DrawCommand::Line { start, .. } => start.y,
                other => panic!("expected line, got {other:?}"),
            })
            .collect();
        assert_eq!(ys, vec![100.0, 90.0, 80.0, 70.0, 60.0]);

        match &buffer.commands()[5] {
            DrawCommand::Line { start, end, thickness, .. } => {
                assert!((start.x - (210.0 - thickness / 2.0)).abs() < 1e-9);
                assert_eq!(start.x, end.x);
                assert_eq!((start.y, end.y), (60.0, 100.0));
            }
            other => panic!("expected barline, got {other:?}"),
        }
    }

    #[test]
    fn clef_offset_by_glyph_center() {
        let font = MusicFont::bundled().unwrap();
        let score = score();
        let engraver = Engraver::new(&score, &font, EngravingDefaults::default(), EngraverConfig::default());
        let mut buffer = CommandBuffer::new();
        engraver.draw_clef(&Clef("gClef".into()), 0.0, 100.0, &mut buffer);

        match &buffer.commands()[0] {
            DrawCommand::Glyph { codepoint, position, .. } => {
                assert_eq!(*codepoint, '\u{E050}');
                assert!((position.x - 5.0).abs() < 1e-9);
                // middle line 80, gClef center (-2.632 + 4.392) / 2 = 0.88
                assert!((position.y - 88.8).abs() < 1e-9);
            }
            other => panic!("expected clef glyph, got {other:?}"),
        }
    }

    #[test]
    fn unknown_clef_is_skipped() {
        let font = MusicFont::bundled().unwrap();
        let score = score();
        let engraver = Engraver::new(&score, &font, EngravingDefaults::default(), EngraverConfig::default());
        let mut buffer = CommandBuffer::new();
        engraver.draw_clef(&Clef("sopranino".into()), 0.0, 100.0, &mut buffer);
        assert!(buffer.is_empty());
    }

    #[test]
    fn header_places_title_and_composer() {
        let font = MusicFont::bundled().unwrap();
        let score = score();
        let engraver = Engraver::new(&score, &font, EngravingDefaults::default(), EngraverConfig::default());
        let mut buffer = CommandBuffer::new();
        engraver.draw_header(0.0, 100.0, 600.0, &mut buffer);

        let texts: Vec<(&str, Point)> = buffer
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "Lisa gikk til skolen");
        assert!(texts[0].1.y < texts[1].1.y);
        // composer ends at the right edge
        assert!((texts[1].1.x + text_width("Folk", 12.0) - 600.0).abs() < 1e-9);
    }
}
