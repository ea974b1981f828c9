//! Note and rest geometry: noteheads, stems, flags, accidentals and
//! ledger lines.
//!
//! Every piece resolves its own glyph; a missing one skips only that
//! piece, except a missing notehead, which skips the whole note.

use crate::commands::{Color, CommandBuffer, DrawCommand, Point};
use crate::model::{Note, Rest};

use super::constants::*;
use super::Engraver;

/// Stem direction rule: notes below the middle of the staff point up.
///
/// A fixed StaffLine threshold, not the per-clef middle-line convention.
pub fn stem_up(staff_line: i32) -> bool {
    staff_line < STEM_UP_BELOW
}

/// StaffLine values of the ledger lines a note needs, nearest the staff
/// first.
///
/// Ledger lines sit on even positions outside the staff (-2, -4, ... and
/// 10, 12, ...). A note in the space just outside a ledger position gets
/// that ledger as well, so -1 and -2 both get one line below. The count
/// is capped at [`MAX_LEDGER_LINES`] for notes built far off the staff.
pub fn ledger_positions(staff_line: i32) -> Vec<i32> {
    let line = i64::from(staff_line);
    let cap = i64::from(MAX_LEDGER_LINES);
    if line < i64::from(BOTTOM_LINE) {
        let count = ((i64::from(BOTTOM_LINE) - line + 1) / 2).min(cap) as i32;
        (1..=count).map(|k| BOTTOM_LINE - 2 * k).collect()
    } else if line > i64::from(TOP_LINE) {
        let count = ((line - i64::from(TOP_LINE) + 1) / 2).min(cap) as i32;
        (1..=count).map(|k| TOP_LINE + 2 * k).collect()
    } else {
        Vec::new()
    }
}

impl Engraver<'_> {
    /// Draw a note whose notehead origin column is `x`; `y` is the staff's
    /// bottom line. Every piece of the note is drawn in `color`.
    pub(super) fn draw_note(&self, note: &Note, x: f64, y: f64, color: Color, buffer: &mut CommandBuffer) {
        let notehead_name = note.duration.notehead_glyph();
        let Some(notehead) = self.lookup(notehead_name) else {
            return;
        };

        let notehead_x = x;
        let notehead_y = y - self.ss(note.staff_line as f64 * 0.5);
        self.push_glyph(notehead, notehead_x, notehead_y, color, buffer);

        if note.duration.has_stem() {
            let up = stem_up(note.staff_line);
            let thickness = self.ss(self.defaults.stem_thickness);
            let length = self.ss(STEM_LENGTH);

            let anchor_name = if up { "stemUpSE" } else { "stemDownNW" };
            let (stem_x, stem_start_y) = match notehead.anchor(anchor_name) {
                Some(a) => (notehead_x + self.ss(a.x), notehead_y - self.ss(a.y)),
                None if up => (notehead_x + self.ss(STEM_FALLBACK_OFFSET), notehead_y),
                None => (notehead_x - self.ss(STEM_FALLBACK_OFFSET), notehead_y),
            };
            let stem_end_y = if up {
                stem_start_y - length
            } else {
                stem_start_y + length
            };

            // outer edge flush with the notehead
            let stem_draw_x = if up {
                stem_x - thickness / 2.0
            } else {
                stem_x + thickness / 2.0
            };
            buffer.push(DrawCommand::line(
                Point::new(stem_draw_x, stem_start_y),
                Point::new(stem_draw_x, stem_end_y),
                thickness,
                color,
            ));

            if let Some(flag_name) = note.duration.flag_glyph(up) {
                let nudge = self.ss(FLAG_NUDGE);
                let flag_x = if up { stem_draw_x + nudge } else { stem_draw_x - nudge };
                self.draw_named_glyph(flag_name, flag_x, stem_end_y, color, buffer);
            }
        }

        if let Some(acc_name) = note.accidental.glyph_name() {
            let acc_x = x - self.ss(ACCIDENTAL_OFFSET);
            self.draw_named_glyph(acc_name, acc_x, notehead_y, color, buffer);
        }

        let ledgers = ledger_positions(note.staff_line);
        if !ledgers.is_empty() {
            let thickness = self.ss(self.defaults.leger_line_thickness);
            let center_x = x + self.ss(notehead.horizontal_center());
            let half = self.ss(LEDGER_HALF_LENGTH);
            for line in ledgers {
                let line_y = y - self.ss(line as f64 * 0.5);
                buffer.push(DrawCommand::line(
                    Point::new(center_x - half, line_y),
                    Point::new(center_x + half, line_y),
                    thickness,
                    color,
                ));
            }
        }
    }

    /// Rests sit at a fixed height above the bottom line.
    pub(super) fn draw_rest(&self, rest: &Rest, x: f64, y: f64, color: Color, buffer: &mut CommandBuffer) {
        let rest_y = y - self.ss(self.config.spacing.rest_offset);
        self.draw_named_glyph(rest.duration.rest_glyph(), x, rest_y, color, buffer);
    }
}
