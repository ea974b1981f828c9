//! Glyph lookup and glyph draw commands.

use crate::commands::{Color, CommandBuffer, DrawCommand, FontHandle, Point};
use crate::font::Glyph;

use super::constants::*;
use super::Engraver;

impl<'a> Engraver<'a> {
    /// Resolve a glyph, logging a miss. The caller skips whatever needed it.
    pub(super) fn lookup(&self, name: &str) -> Option<&'a Glyph> {
        let glyph = self.glyphs.glyph(name);
        if glyph.is_none() {
            log::debug!("glyph '{name}' not in font, skipping");
        }
        glyph
    }

    /// Append a glyph at its SMuFL origin, plus its bounding box when the
    /// debug overlay is on.
    pub(super) fn push_glyph(&self, glyph: &Glyph, x: f64, y: f64, color: Color, buffer: &mut CommandBuffer) {
        buffer.push(DrawCommand::glyph(
            FontHandle::MUSIC,
            glyph.codepoint,
            Point::new(x, y),
            self.units.em_px(),
            color,
        ));
        if self.config.debug_glyph_boxes {
            self.push_glyph_box(glyph, x, y, buffer);
        }
    }

    /// Resolve and draw in one step. Returns false when the glyph is missing.
    pub(super) fn draw_named_glyph(
        &self,
        name: &str,
        x: f64,
        y: f64,
        color: Color,
        buffer: &mut CommandBuffer,
    ) -> bool {
        match self.lookup(name) {
            Some(glyph) => {
                self.push_glyph(glyph, x, y, color, buffer);
                true
            }
            None => false,
        }
    }

    fn push_glyph_box(&self, glyph: &Glyph, x: f64, y: f64, buffer: &mut CommandBuffer) {
        let bbox = &glyph.bbox;
        // font y grows upward, pixel y downward
        buffer.push(DrawCommand::rectangle_outline(
            x + self.ss(bbox.sw.x),
            y - self.ss(bbox.ne.y),
            self.ss(bbox.width()),
            self.ss(bbox.height()),
            DEBUG_BOX_THICKNESS_PX,
            DEBUG_BOX_COLOR,
        ));
    }
}
