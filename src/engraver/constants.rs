//! Fixed engraving geometry (staff spaces unless noted).

use crate::commands::Color;

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_LINE_COUNT: usize = 5;
pub(super) const STAFF_HEIGHT: f64 = 4.0;
pub(super) const MIDDLE_LINE: f64 = 2.0;
/// StaffLine values (half staff spaces) of the outer staff lines.
pub(super) const BOTTOM_LINE: i32 = 0;
pub(super) const TOP_LINE: i32 = 8;

// ── Notes ───────────────────────────────────────────────────────────
/// Notes below this StaffLine get an up stem.
pub(super) const STEM_UP_BELOW: i32 = 3;
pub(super) const STEM_LENGTH: f64 = 3.5;
pub(super) const STEM_FALLBACK_OFFSET: f64 = 0.5;
pub(super) const FLAG_NUDGE: f64 = 0.1;
pub(super) const ACCIDENTAL_OFFSET: f64 = 1.5;
pub(super) const LEDGER_HALF_LENGTH: f64 = 0.75;
/// Ledger lines drawn for one note at most, on either side. Enough for
/// any note the loader accepts.
pub(super) const MAX_LEDGER_LINES: i32 = 32;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const TITLE_SIZE: f64 = 2.2;
pub(super) const COMPOSER_SIZE: f64 = 1.2;
pub(super) const MEASURE_NUMBER_SIZE: f64 = 1.0;
/// Title baseline above the first staff's top line.
pub(super) const TITLE_RISE: f64 = 5.0;
/// Composer baseline above the first staff's top line.
pub(super) const COMPOSER_RISE: f64 = 2.0;
/// Room reserved above the first staff when the header is shown.
pub(super) const HEADER_HEIGHT: f64 = 8.0;
pub(super) const MEASURE_NUMBER_RISE: f64 = 1.5;
/// Average advance of a text character, as a fraction of font size.
pub(super) const TEXT_ADVANCE: f64 = 0.5;

// ── Debug overlay ───────────────────────────────────────────────────
pub(super) const DEBUG_BOX_COLOR: Color = Color::RED;
pub(super) const DEBUG_BOX_THICKNESS_PX: f64 = 0.5;
