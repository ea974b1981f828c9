//! Tunables of the layout pass.
//!
//! Everything here deserializes with defaults for absent keys, so a host
//! can ship a partial JSON config and override only what it cares about.

use serde::{Deserialize, Serialize};

use crate::commands::Color;
use crate::units::{Units, DEFAULT_EM_PX};

/// Layout configuration. Pixel values unless the field says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngraverConfig {
    /// Pixels per em; rescales the whole score
    pub em_px: f64,
    /// Line-break threshold
    pub max_line_width: f64,
    /// Vertical advance from one line of music to the next
    pub line_height: f64,
    /// Distance between stacked staves within one line
    pub staff_spacing: f64,
    pub spacing: SpacingConfig,
    pub color: Color,
    /// Title and composer above the first line
    pub show_header: bool,
    /// Measure number at the start of every line after the first
    pub show_measure_numbers: bool,
    /// Outline every glyph's bounding box
    pub debug_glyph_boxes: bool,
    /// Element drawn in `highlight_color` instead of `color`
    pub highlight: Option<ElementRef>,
    pub highlight_color: Color,
}

/// One element of a score by zero-based staff, measure and element index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub staff: usize,
    pub measure: usize,
    pub element: usize,
}

impl Default for EngraverConfig {
    fn default() -> Self {
        Self {
            em_px: DEFAULT_EM_PX,
            max_line_width: 1000.0,
            line_height: 150.0,
            staff_spacing: 100.0,
            spacing: SpacingConfig::default(),
            color: Color::BLACK,
            show_header: false,
            show_measure_numbers: false,
            debug_glyph_boxes: false,
            highlight: None,
            highlight_color: Color::RED,
        }
    }
}

impl EngraverConfig {
    /// Config with a different line-break threshold.
    pub fn with_max_line_width(max_line_width: f64) -> Self {
        Self {
            max_line_width,
            ..Self::default()
        }
    }

    pub fn units(&self) -> Units {
        Units::new(self.em_px)
    }
}

/// Horizontal spacing rules, all in staff spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Room reserved for the clef at the start of a line
    pub clef_width: f64,
    /// Clef glyph offset from the line start
    pub clef_inset: f64,
    /// Advance per key-signature accidental
    pub key_accidental_advance: f64,
    /// Gap added after every element when sizing a measure
    pub element_spacing: f64,
    /// Width assumed for an element whose glyph is missing
    pub missing_glyph_width: f64,
    /// Trailing space at the end of every measure
    pub measure_spacing: f64,
    pub element_left_padding: f64,
    pub element_right_padding: f64,
    /// Rest baseline above the bottom staff line
    pub rest_offset: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            clef_width: 3.0,
            clef_inset: 0.5,
            key_accidental_advance: 0.75,
            element_spacing: 2.0,
            missing_glyph_width: 2.0,
            measure_spacing: 2.0,
            element_left_padding: 1.0,
            element_right_padding: 1.0,
            rest_offset: 1.0,
        }
    }
}
