//! Resolved glyph metadata in staff-space units.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::units::Units;

/// A point in staff spaces, y up, relative to a glyph origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct StaffPoint {
    pub x: f64,
    pub y: f64,
}

impl StaffPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for StaffPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<StaffPoint> for [f64; 2] {
    fn from(p: StaffPoint) -> Self {
        [p.x, p.y]
    }
}

/// Glyph bounding box as given by the font metadata (`bBoxSW`/`bBoxNE`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "bBoxSW")]
    pub sw: StaffPoint,
    #[serde(rename = "bBoxNE")]
    pub ne: StaffPoint,
}

impl BoundingBox {
    pub fn new(sw: StaffPoint, ne: StaffPoint) -> Self {
        Self { sw, ne }
    }

    pub fn width(&self) -> f64 {
        self.ne.x - self.sw.x
    }

    pub fn height(&self) -> f64 {
        self.ne.y - self.sw.y
    }

    pub fn center_x(&self) -> f64 {
        (self.sw.x + self.ne.x) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.sw.y + self.ne.y) / 2.0
    }
}

/// A named glyph with its codepoint, metrics and anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub name: String,
    pub codepoint: char,
    pub description: String,
    pub bbox: BoundingBox,
    /// Named attachment points, e.g. "stemUpSE"
    pub anchors: HashMap<String, StaffPoint>,
}

impl Glyph {
    pub fn new(name: impl Into<String>, codepoint: char, bbox: BoundingBox) -> Self {
        Self {
            name: name.into(),
            codepoint,
            description: String::new(),
            bbox,
            anchors: HashMap::new(),
        }
    }

    pub fn with_anchor(mut self, name: impl Into<String>, at: StaffPoint) -> Self {
        self.anchors.insert(name.into(), at);
        self
    }

    pub fn anchor(&self, name: &str) -> Option<StaffPoint> {
        self.anchors.get(name).copied()
    }

    /// Bounding-box width in pixels.
    pub fn width_px(&self, units: &Units) -> f64 {
        units.staff_spaces_to_pixels(self.bbox.width())
    }

    /// Vertical middle of the bounding box in staff spaces. Glyph baselines
    /// are not visually centered, so placement code offsets by this.
    pub fn vertical_center(&self) -> f64 {
        self.bbox.center_y()
    }

    pub fn horizontal_center(&self) -> f64 {
        self.bbox.center_x()
    }
}
