//! Key signature lookup and placement.
//!
//! Only major keys are engraved. Any other tonic/mode pair resolves to no
//! accidentals, which is a known limitation rather than an error.

use crate::commands::CommandBuffer;
use crate::model::KeySignature;
use crate::units::Units;

use super::config::SpacingConfig;
use super::Engraver;

/// Staff-space height above the bottom line of each sharp, in order
/// F C G D A E B.
const SHARP_OFFSETS: [f64; 7] = [2.5, 3.5, 2.0, 3.0, 1.5, 2.5, 1.0];

/// Staff-space height above the bottom line of each flat, in order
/// B E A D G C F.
const FLAT_OFFSETS: [f64; 7] = [3.0, 1.5, 3.5, 2.0, 4.0, 2.5, 4.5];

/// `(sharps, flats)` for a key. Unsupported keys give `(0, 0)`.
pub fn key_signature_accidentals(tonic: &str, mode: &str) -> (u32, u32) {
    if mode != "major" && mode != "dur" {
        return (0, 0);
    }
    match tonic {
        "C" => (0, 0),
        "G" => (1, 0),
        "D" => (2, 0),
        "A" => (3, 0),
        "E" => (4, 0),
        "B" => (5, 0),
        "F#" => (6, 0),
        "C#" => (7, 0),
        "F" => (0, 1),
        "Bb" => (0, 2),
        "Eb" => (0, 3),
        "Ab" => (0, 4),
        "Db" => (0, 5),
        "Gb" => (0, 6),
        "Cb" => (0, 7),
        _ => (0, 0),
    }
}

/// Pixel width of the key signature, zero for a key without accidentals.
pub(super) fn key_signature_width(key: &KeySignature, units: &Units, spacing: &SpacingConfig) -> f64 {
    let (sharps, flats) = key_signature_accidentals(&key.tonic, &key.mode);
    let count = (sharps + flats) as f64;
    units.staff_spaces_to_pixels(count * spacing.key_accidental_advance)
}

impl Engraver<'_> {
    /// Draw the score's key signature starting at `x`; `y` is the staff's
    /// bottom line.
    pub(super) fn draw_key_signature(&self, x: f64, y: f64, buffer: &mut CommandBuffer) {
        let key = &self.score.key_signature;
        let (sharps, flats) = key_signature_accidentals(&key.tonic, &key.mode);

        let (glyph_name, offsets, count) = if sharps > 0 {
            ("accidentalSharp", &SHARP_OFFSETS, sharps)
        } else if flats > 0 {
            ("accidentalFlat", &FLAT_OFFSETS, flats)
        } else {
            return;
        };

        let Some(glyph) = self.lookup(glyph_name) else {
            return;
        };
        let advance = self.config.spacing.key_accidental_advance;
        for (i, offset) in offsets.iter().take(count as usize).enumerate() {
            let acc_x = x + self.ss(i as f64 * advance);
            let acc_y = y - self.ss(*offset);
            self.push_glyph(glyph, acc_x, acc_y, self.config.color, buffer);
        }
    }
}
