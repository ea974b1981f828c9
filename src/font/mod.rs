//! Glyph metadata resolver.
//!
//! Combines the SMuFL glyph-name table (name → codepoint) with a font's
//! own metadata (bounding boxes, anchors, engraving defaults) into one
//! name → [`Glyph`] lookup. A name that isn't there resolves to `None`;
//! callers skip the drawing that needed it.

mod defaults;
mod glyph;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::units::Units;

pub use defaults::EngravingDefaults;
pub use glyph::{BoundingBox, Glyph, StaffPoint};

const BUNDLED_GLYPHNAMES: &str = include_str!("../../assets/smufl/glyphnames.json");
const BUNDLED_METADATA: &str = include_str!("../../assets/fonts/bravura_metadata.json");

/// Name → glyph lookup used by the engraver.
pub trait GlyphResolver {
    fn glyph(&self, name: &str) -> Option<&Glyph>;

    /// Bounding-box width of `name` in pixels, if the glyph exists.
    fn glyph_width_px(&self, name: &str, units: &Units) -> Option<f64> {
        self.glyph(name).map(|g| g.width_px(units))
    }
}

impl GlyphResolver for HashMap<String, Glyph> {
    fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.get(name)
    }
}

/// One entry of SMuFL `glyphnames.json`.
#[derive(Debug, Deserialize)]
struct GlyphNameEntry {
    codepoint: String,
    #[serde(default)]
    description: String,
}

/// The parts of a font metadata file the engine uses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FontMetadata {
    font_name: Option<String>,
    engraving_defaults: EngravingDefaults,
    glyph_b_boxes: HashMap<String, BoundingBox>,
    glyphs_with_anchors: HashMap<String, HashMap<String, StaffPoint>>,
}

/// A music font's glyph table plus engraving defaults.
#[derive(Debug, Clone, Default)]
pub struct MusicFont {
    name: Option<String>,
    glyphs: HashMap<String, Glyph>,
    defaults: EngravingDefaults,
}

impl MusicFont {
    /// Build from the text of `glyphnames.json` and a font metadata file.
    pub fn from_json(glyphnames: &str, font_metadata: &str) -> Result<Self> {
        let names: HashMap<String, GlyphNameEntry> = serde_json::from_str(glyphnames)?;
        let mut meta: FontMetadata = serde_json::from_str(font_metadata)?;

        let mut glyphs = HashMap::with_capacity(names.len());
        for (name, entry) in names {
            let codepoint = parse_codepoint(&entry.codepoint).ok_or_else(|| Error::InvalidCodepoint {
                glyph: name.clone(),
                value: entry.codepoint.clone(),
            })?;
            let bbox = meta.glyph_b_boxes.remove(&name).unwrap_or_default();
            let anchors = meta.glyphs_with_anchors.remove(&name).unwrap_or_default();
            glyphs.insert(
                name.clone(),
                Glyph {
                    name,
                    codepoint,
                    description: entry.description,
                    bbox,
                    anchors,
                },
            );
        }

        Ok(Self {
            name: meta.font_name,
            glyphs,
            defaults: meta.engraving_defaults,
        })
    }

    /// Load `glyphnames.json` and a font metadata file from disk.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(glyphnames: P, font_metadata: Q) -> Result<Self> {
        let names = read_to_string(glyphnames.as_ref())?;
        let meta = read_to_string(font_metadata.as_ref())?;
        Self::from_json(&names, &meta)
    }

    /// Compiled-in Bravura subset: clefs, noteheads, flags, accidentals
    /// and rests.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_GLYPHNAMES, BUNDLED_METADATA)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn engraving_defaults(&self) -> &EngravingDefaults {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    pub fn insert_glyph(&mut self, glyph: Glyph) {
        self.glyphs.insert(glyph.name.clone(), glyph);
    }

    /// Drop a glyph, e.g. to model a font subset.
    pub fn remove_glyph(&mut self, name: &str) -> Option<Glyph> {
        self.glyphs.remove(name)
    }
}

impl GlyphResolver for MusicFont {
    fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }
}

/// Parse "U+E050" (or bare "E050") into a char.
pub fn parse_codepoint(value: &str) -> Option<char> {
    let hex = value
        .strip_prefix("U+")
        .or_else(|| value.strip_prefix("u+"))
        .unwrap_or(value);
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
