//! Data model for a score ready for engraving.
//!
//! A score owns its staves, a staff owns its measures and a measure owns
//! its elements. Nothing in the engraving engine mutates these values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Title of the piece
    pub title: String,
    /// Composer name
    pub composer: String,
    /// Key signature (only major keys are engraved with accidentals)
    pub key_signature: KeySignature,
    /// Default time signature for measures that don't override it
    pub time_signature: TimeSignature,
    /// Tempo in BPM (informational, not used by layout)
    pub tempo: u32,
    /// Staves, top to bottom
    pub staves: Vec<Staff>,
}

/// Key signature as tonic name plus mode, e.g. ("Bb", "major").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub tonic: String,
    pub mode: String,
}

/// Time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Numerator (e.g., 3 in 3/4)
    pub numerator: u32,
    /// Denominator (e.g., 4 in 3/4)
    pub denominator: u32,
}

/// One staff: a clef and its own sequence of measures (one voice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub clef: Clef,
    pub measures: Vec<Measure>,
}

/// Clef tag as found in the score source ("gClef", "fClef", "bass", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clef(pub String);

/// A single measure (bar) of music.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Measure number (1-based, informational)
    pub number: u32,
    /// Time signature in effect for this measure
    pub time_signature: TimeSignature,
    /// Notes and rests, left to right
    pub elements: Vec<MusicElement>,
}

/// Anything that occupies rhythmic space in a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MusicElement {
    Note(Note),
    Rest(Rest),
}

/// A pitched note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (informational; 60 = middle C)
    pub pitch: i32,
    pub duration: Duration,
    /// Vertical position in half staff spaces: 0 = bottom line, 8 = top line
    pub staff_line: i32,
    #[serde(default)]
    pub accidental: Accidental,
}

/// Largest `|staff_line|` a loaded note may have. Far past any playable
/// range; anything beyond it is a corrupt score.
pub const STAFF_LINE_LIMIT: i32 = 64;

/// A rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rest {
    pub duration: Duration,
}

/// Written note value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Duration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

/// Accidental printed in front of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    #[serde(rename = "")]
    None,
    Sharp,
    Flat,
    Natural,
}

// ═══════════════════════════════════════════════════════════════════════
// Score / staff construction
// ═══════════════════════════════════════════════════════════════════════

impl Score {
    /// Create a score with no staves.
    pub fn new(
        title: impl Into<String>,
        composer: impl Into<String>,
        key_signature: KeySignature,
        time_signature: TimeSignature,
        tempo: u32,
    ) -> Self {
        Self {
            title: title.into(),
            composer: composer.into(),
            key_signature,
            time_signature,
            tempo,
            staves: Vec::new(),
        }
    }

    /// Append an empty staff and return it for filling.
    pub fn add_staff(&mut self, clef: impl Into<String>) -> &mut Staff {
        self.staves.push(Staff {
            clef: Clef(clef.into()),
            measures: Vec::new(),
        });
        let idx = self.staves.len() - 1;
        &mut self.staves[idx]
    }

    /// Number of measures in the longest staff.
    pub fn measure_count(&self) -> usize {
        self.staves.iter().map(|s| s.measures.len()).max().unwrap_or(0)
    }

    pub fn staff_count(&self) -> usize {
        self.staves.len()
    }
}

impl Staff {
    /// Append a measure numbered after the last one.
    pub fn add_measure(&mut self, time_signature: TimeSignature) -> &mut Measure {
        let number = self.measures.len() as u32 + 1;
        self.measures.push(Measure::new(number, time_signature));
        let idx = self.measures.len() - 1;
        &mut self.measures[idx]
    }
}

impl Clef {
    /// SMuFL glyph for this clef tag. Unknown tags are passed through so a
    /// font that has them can still draw them.
    pub fn glyph_name(&self) -> &str {
        match self.0.as_str() {
            "treble" | "G" | "g" => "gClef",
            "bass" | "F" | "f" => "fClef",
            "alto" | "tenor" | "C" | "c" => "cClef",
            other => other,
        }
    }
}

impl Default for Clef {
    fn default() -> Self {
        Clef("gClef".into())
    }
}

impl KeySignature {
    pub fn new(tonic: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            tonic: tonic.into(),
            mode: mode.into(),
        }
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Measure: rhythm and proportional positioning
// ═══════════════════════════════════════════════════════════════════════

impl Measure {
    pub fn new(number: u32, time_signature: TimeSignature) -> Self {
        Self {
            number,
            time_signature,
            elements: Vec::new(),
        }
    }

    /// Append a note.
    pub fn add_note(
        &mut self,
        pitch: i32,
        duration: Duration,
        staff_line: i32,
        accidental: Accidental,
    ) -> &mut Self {
        self.elements.push(MusicElement::Note(Note {
            pitch,
            duration,
            staff_line,
            accidental,
        }));
        self
    }

    /// Append a rest.
    pub fn add_rest(&mut self, duration: Duration) -> &mut Self {
        self.elements.push(MusicElement::Rest(Rest { duration }));
        self
    }

    /// Each element's duration in beats of this measure's denominator.
    pub fn element_beats(&self) -> Vec<f64> {
        self.elements
            .iter()
            .map(|e| e.duration().beats(self.time_signature.denominator))
            .collect()
    }

    pub fn total_beats(&self) -> f64 {
        self.element_beats().iter().sum()
    }

    /// Beats the time signature allows.
    pub fn capacity_beats(&self) -> f64 {
        self.time_signature.numerator as f64
    }

    /// Whether the elements fill the time signature. Informational only:
    /// incomplete and overfull measures are engraved as they are.
    pub fn is_full(&self) -> bool {
        self.total_beats() + 1e-9 >= self.capacity_beats()
    }

    /// Horizontal offset of each element, proportional to its rhythmic
    /// start within the measure.
    ///
    /// Element `i` sits at `left + (beats before i / total beats) * usable`
    /// where `usable = width - left - right`. A measure with no beats
    /// (no elements) yields an empty list.
    pub fn element_positions(&self, width: f64, left_margin: f64, right_margin: f64) -> Vec<f64> {
        let beats = self.element_beats();
        let total: f64 = beats.iter().sum();
        if total <= 0.0 {
            return Vec::new();
        }

        let usable = width - left_margin - right_margin;
        let mut acc = 0.0;
        beats
            .iter()
            .map(|&b| {
                let x = left_margin + (acc / total) * usable;
                acc += b;
                x
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Elements
// ═══════════════════════════════════════════════════════════════════════

impl MusicElement {
    pub fn duration(&self) -> Duration {
        match self {
            MusicElement::Note(n) => n.duration,
            MusicElement::Rest(r) => r.duration,
        }
    }

    /// Main glyph of the element: the notehead for notes, the rest symbol
    /// for rests. Used for width estimates.
    pub fn glyph_name(&self) -> &'static str {
        match self {
            MusicElement::Note(n) => n.duration.notehead_glyph(),
            MusicElement::Rest(r) => r.duration.rest_glyph(),
        }
    }
}

impl Duration {
    /// Length in quarter notes.
    pub fn quarter_units(self) -> f64 {
        match self {
            Duration::Whole => 4.0,
            Duration::Half => 2.0,
            Duration::Quarter => 1.0,
            Duration::Eighth => 0.5,
            Duration::Sixteenth => 0.25,
            Duration::ThirtySecond => 0.125,
            Duration::SixtyFourth => 0.0625,
        }
    }

    /// Length in beats when `denominator` gets the beat.
    pub fn beats(self, denominator: u32) -> f64 {
        self.quarter_units() * denominator as f64 / 4.0
    }

    /// Parse a score-source duration name. Accepts the spelled-out names
    /// and the short forms "8th", "16th", "32nd", "64th".
    pub fn from_name(name: &str) -> Option<Duration> {
        match name {
            "whole" => Some(Duration::Whole),
            "half" => Some(Duration::Half),
            "quarter" => Some(Duration::Quarter),
            "eighth" | "8th" => Some(Duration::Eighth),
            "sixteenth" | "16th" => Some(Duration::Sixteenth),
            "thirty-second" | "32nd" => Some(Duration::ThirtySecond),
            "sixty-fourth" | "64th" => Some(Duration::SixtyFourth),
            _ => None,
        }
    }

    pub fn notehead_glyph(self) -> &'static str {
        match self {
            Duration::Whole => "noteheadWhole",
            Duration::Half => "noteheadHalf",
            _ => "noteheadBlack",
        }
    }

    pub fn rest_glyph(self) -> &'static str {
        match self {
            Duration::Whole => "restWhole",
            Duration::Half => "restHalf",
            Duration::Quarter => "restQuarter",
            Duration::Eighth => "rest8th",
            Duration::Sixteenth => "rest16th",
            Duration::ThirtySecond => "rest32nd",
            Duration::SixtyFourth => "rest64th",
        }
    }

    pub fn has_stem(self) -> bool {
        self != Duration::Whole
    }

    pub fn has_flag(self) -> bool {
        self.flag_glyph(true).is_some()
    }

    /// Flag glyph for this value and stem direction, if it takes a flag.
    pub fn flag_glyph(self, stem_up: bool) -> Option<&'static str> {
        let name = match (self, stem_up) {
            (Duration::Eighth, true) => "flag8thUp",
            (Duration::Eighth, false) => "flag8thDown",
            (Duration::Sixteenth, true) => "flag16thUp",
            (Duration::Sixteenth, false) => "flag16thDown",
            (Duration::ThirtySecond, true) => "flag32ndUp",
            (Duration::ThirtySecond, false) => "flag32ndDown",
            (Duration::SixtyFourth, true) => "flag64thUp",
            (Duration::SixtyFourth, false) => "flag64thDown",
            _ => return None,
        };
        Some(name)
    }
}

impl Accidental {
    /// Parse a score-source accidental name ("" means none).
    pub fn from_name(name: &str) -> Option<Accidental> {
        match name {
            "" => Some(Accidental::None),
            "sharp" => Some(Accidental::Sharp),
            "flat" => Some(Accidental::Flat),
            "natural" => Some(Accidental::Natural),
            _ => None,
        }
    }

    pub fn glyph_name(self) -> Option<&'static str> {
        match self {
            Accidental::None => None,
            Accidental::Sharp => Some("accidentalSharp"),
            Accidental::Flat => Some("accidentalFlat"),
            Accidental::Natural => Some("accidentalNatural"),
        }
    }
}
