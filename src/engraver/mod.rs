//! Engraver — turns a score into draw commands.
//!
//! The engraver lays the score out (see [`compute_layout`]) and then walks
//! staves × measures in order, appending staff lines, barlines, the
//! clef/key-signature prefix at the start of every line, and each
//! element's glyphs to a [`CommandBuffer`]. It holds its score, glyph
//! resolver and engraving defaults for one pass and never mutates them.
//! A missing glyph skips only the drawing that needed it.

mod config;
mod constants;
mod glyph;
mod key_signature;
mod layout;
mod notes;
mod staff;

use crate::commands::{Color, CommandBuffer};
use crate::font::{EngravingDefaults, GlyphResolver};
use crate::model::{MusicElement, Score};
use crate::units::Units;

pub use config::{ElementRef, EngraverConfig, SpacingConfig};
pub use key_signature::key_signature_accidentals;
pub use layout::{compute_layout, measure_content_width, prefix_width, LineLayout, MeasureLayout, ScoreLayout};
pub use notes::{ledger_positions, stem_up};

/// One layout pass over a score.
pub struct Engraver<'a> {
    score: &'a Score,
    glyphs: &'a dyn GlyphResolver,
    defaults: EngravingDefaults,
    config: EngraverConfig,
    units: Units,
}

impl<'a> Engraver<'a> {
    pub fn new(
        score: &'a Score,
        glyphs: &'a dyn GlyphResolver,
        defaults: EngravingDefaults,
        config: EngraverConfig,
    ) -> Self {
        let units = config.units();
        Self {
            score,
            glyphs,
            defaults,
            config,
            units,
        }
    }

    /// Line breaks and measure boxes for this score.
    pub fn layout(&self) -> ScoreLayout {
        compute_layout(self.score, self.glyphs, &self.config)
    }

    /// Append the whole score to `buffer`. `(origin_x, origin_y)` is the
    /// left end of the first staff's bottom line.
    ///
    /// Commands come out in (staff, measure) order; the buffer is only
    /// appended to, so callers clear it between passes.
    pub fn generate_draw_commands(&self, origin_x: f64, origin_y: f64, buffer: &mut CommandBuffer) -> ScoreLayout {
        let layout = self.layout();

        if self.config.show_header {
            self.draw_header(origin_x, origin_y, layout.width, buffer);
        }

        for (staff_idx, staff) in self.score.staves.iter().enumerate() {
            for line in &layout.lines {
                let y = origin_y + layout.staff_y(line, staff_idx);

                for m in layout.measures_on(line) {
                    let x = origin_x + m.x;
                    self.draw_staff_segment(x, y, m.width, buffer);

                    if m.is_first_of_line {
                        self.draw_clef(&staff.clef, x, y, buffer);
                        let key_x = x + self.ss(self.config.spacing.clef_width);
                        self.draw_key_signature(key_x, y, buffer);

                        if self.config.show_measure_numbers && staff_idx == 0 && line.index > 0 {
                            let number = staff
                                .measures
                                .get(m.measure_idx)
                                .map_or(m.measure_idx as u32 + 1, |measure| measure.number);
                            self.draw_measure_number(number, x, y, buffer);
                        }
                    }

                    let Some(measure) = staff.measures.get(m.measure_idx) else {
                        continue;
                    };

                    let area_x = origin_x + m.element_area_x();
                    let positions = measure.element_positions(
                        m.element_area_width(),
                        self.ss(self.config.spacing.element_left_padding),
                        self.ss(self.config.spacing.element_right_padding),
                    );
                    for (element_idx, (element, offset)) in measure.elements.iter().zip(positions).enumerate() {
                        let element_x = area_x + offset;
                        let color = self.element_color(ElementRef {
                            staff: staff_idx,
                            measure: m.measure_idx,
                            element: element_idx,
                        });
                        match element {
                            MusicElement::Note(note) => self.draw_note(note, element_x, y, color, buffer),
                            MusicElement::Rest(rest) => self.draw_rest(rest, element_x, y, color, buffer),
                        }
                    }
                }
            }
        }

        layout
    }

    fn element_color(&self, element: ElementRef) -> Color {
        if self.config.highlight == Some(element) {
            self.config.highlight_color
        } else {
            self.config.color
        }
    }

    /// Staff spaces to pixels at this pass's font size.
    fn ss(&self, staff_spaces: f64) -> f64 {
        self.units.staff_spaces_to_pixels(staff_spaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DrawCommand;
    use crate::font::MusicFont;
    use crate::model::{Accidental, Duration, KeySignature, TimeSignature};
    use pretty_assertions::assert_eq;

    fn engrave(score: &Score, config: EngraverConfig) -> CommandBuffer {
        let font = MusicFont::bundled().unwrap();
        let engraver = Engraver::new(score, &font, *font.engraving_defaults(), config);
        let mut buffer = CommandBuffer::new();
        engraver.generate_draw_commands(0.0, 0.0, &mut buffer);
        buffer
    }

    fn two_line_score() -> Score {
        let mut score = Score::new("Etude", "Anon", KeySignature::new("G", "major"), TimeSignature::default(), 80);
        let staff = score.add_staff("treble");
        for _ in 0..6 {
            let m = staff.add_measure(TimeSignature::default());
            for line in [0, 2, 4, 6] {
                m.add_note(64, Duration::Quarter, line, Accidental::None);
            }
        }
        score
    }

    fn count_texts(buffer: &CommandBuffer) -> usize {
        buffer.iter().filter(|c| matches!(c, DrawCommand::Text { .. })).count()
    }

    #[test]
    fn prefix_is_drawn_once_per_line() {
        let score = two_line_score();
        let buffer = engrave(&score, EngraverConfig::with_max_line_width(400.0));
        let clefs = buffer
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { codepoint: '\u{E050}', .. }))
            .count();
        let sharps = buffer
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { codepoint: '\u{E262}', .. }))
            .count();
        let layout = compute_layout(&score, &MusicFont::bundled().unwrap(), &EngraverConfig::with_max_line_width(400.0));
        assert!(layout.line_count() > 1);
        assert_eq!(clefs, layout.line_count());
        assert_eq!(sharps, layout.line_count());
    }

    #[test]
    fn header_and_measure_numbers_are_opt_in() {
        let score = two_line_score();
        assert_eq!(count_texts(&engrave(&score, EngraverConfig::with_max_line_width(400.0))), 0);

        let config = EngraverConfig {
            show_header: true,
            show_measure_numbers: true,
            ..EngraverConfig::with_max_line_width(400.0)
        };
        let layout = compute_layout(&score, &MusicFont::bundled().unwrap(), &config);
        let buffer = engrave(&score, config);
        // title + composer + one number per line after the first
        assert_eq!(count_texts(&buffer), 2 + layout.line_count() - 1);
        assert!(layout.header_height > 0.0);
    }

    #[test]
    fn debug_boxes_follow_every_glyph() {
        let score = two_line_score();
        let config = EngraverConfig {
            debug_glyph_boxes: true,
            ..EngraverConfig::default()
        };
        let buffer = engrave(&score, config);
        let glyphs = buffer.iter().filter(|c| matches!(c, DrawCommand::Glyph { .. })).count();
        let boxes = buffer
            .iter()
            .filter(|c| matches!(c, DrawCommand::RectangleOutline { .. }))
            .count();
        assert!(glyphs > 0);
        assert_eq!(glyphs, boxes);
    }

    #[test]
    fn highlight_recolors_one_element() {
        let mut score = Score::new("t", "c", KeySignature::new("C", "major"), TimeSignature::default(), 120);
        let staff = score.add_staff("treble");
        staff
            .add_measure(TimeSignature::default())
            .add_note(60, Duration::Eighth, -2, Accidental::Sharp)
            .add_note(62, Duration::Quarter, 0, Accidental::None)
            .add_rest(Duration::Half);
        staff
            .add_measure(TimeSignature::default())
            .add_note(64, Duration::Whole, 0, Accidental::None);

        let config = EngraverConfig {
            highlight: Some(ElementRef {
                staff: 0,
                measure: 0,
                element: 0,
            }),
            ..EngraverConfig::default()
        };
        let buffer = engrave(&score, config);
        let red: Vec<&DrawCommand> = buffer.iter().filter(|c| command_color(c) == Color::RED).collect();
        // notehead, stem, flag, accidental, ledger
        assert_eq!(red.len(), 5);
        assert!(red
            .iter()
            .any(|c| matches!(c, DrawCommand::Glyph { codepoint: '\u{E0A4}', .. })));

        let rest = EngraverConfig {
            highlight: Some(ElementRef {
                staff: 0,
                measure: 0,
                element: 2,
            }),
            ..EngraverConfig::default()
        };
        let buffer = engrave(&score, rest);
        let red: Vec<&DrawCommand> = buffer.iter().filter(|c| command_color(c) == Color::RED).collect();
        assert_eq!(red.len(), 1);
        assert!(matches!(red[0], DrawCommand::Glyph { codepoint: '\u{E4E4}', .. }));
    }

    #[test]
    fn highlight_outside_the_score_changes_nothing() {
        let score = two_line_score();
        let config = EngraverConfig {
            highlight: Some(ElementRef {
                staff: 3,
                measure: 0,
                element: 0,
            }),
            ..EngraverConfig::default()
        };
        assert_eq!(engrave(&score, config), engrave(&score, EngraverConfig::default()));
    }

    fn command_color(command: &DrawCommand) -> Color {
        match command {
            DrawCommand::Line { color, .. }
            | DrawCommand::Text { color, .. }
            | DrawCommand::Glyph { color, .. }
            | DrawCommand::RectangleOutline { color, .. } => *color,
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let score = two_line_score();
        let a = engrave(&score, EngraverConfig::default());
        let b = engrave(&score, EngraverConfig::default());
        assert_eq!(a, b);
    }
}
