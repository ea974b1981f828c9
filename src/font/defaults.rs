//! Font engraving defaults (line thicknesses etc.), in staff spaces.

use serde::{Deserialize, Serialize};

/// The `engravingDefaults` block of a SMuFL font metadata file.
///
/// Absent keys fall back to Bravura's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngravingDefaults {
    pub stem_thickness: f64,
    pub staff_line_thickness: f64,
    pub leger_line_thickness: f64,
    pub leger_line_extension: f64,
    #[serde(alias = "barlineThickness")]
    pub thin_barline_thickness: f64,
    pub thick_barline_thickness: f64,
}

impl Default for EngravingDefaults {
    fn default() -> Self {
        Self {
            stem_thickness: 0.12,
            staff_line_thickness: 0.13,
            leger_line_thickness: 0.16,
            leger_line_extension: 0.4,
            thin_barline_thickness: 0.16,
            thick_barline_thickness: 0.5,
        }
    }
}
