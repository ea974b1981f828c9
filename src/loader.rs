//! Score source loader — JSON into the [`Score`] model.
//!
//! Two shapes are accepted: the legacy single-staff form with a top-level
//! `measures` array (treble clef implied), and the `staves` form where
//! every staff carries its own `clef` and `measures`. Odd but harmless
//! values (unknown duration or accidental names, unknown element types)
//! are tolerated with a warning; a score that cannot be laid out is an
//! error.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::*;

const DEFAULT_TEMPO: u32 = 120;

// ═══════════════════════════════════════════════════════════════════════
// Source shapes
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawScore {
    #[serde(default)]
    title: String,
    #[serde(default)]
    composer: String,
    key_signature: Option<KeySignature>,
    time_signature: Option<TimeSignature>,
    tempo: Option<u32>,
    measures: Option<Vec<RawMeasure>>,
    staves: Option<Vec<RawStaff>>,
}

#[derive(Debug, Deserialize)]
struct RawStaff {
    clef: Option<String>,
    #[serde(default)]
    measures: Vec<RawMeasure>,
}

#[derive(Debug, Deserialize)]
struct RawMeasure {
    number: Option<u32>,
    time_signature: Option<TimeSignature>,
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    pitch: i32,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    staff_line: i32,
    #[serde(default)]
    accidental: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Parse a score from JSON text.
pub fn parse_score_json(json: &str) -> Result<Score> {
    let raw: RawScore = serde_json::from_str(json)?;
    build_score(raw)
}

/// Read and parse a score file.
pub fn load_score_file<P: AsRef<Path>>(path: P) -> Result<Score> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_score_json(&json)
}

/// Serialize a score in the `staves` shape. The output parses back with
/// [`parse_score_json`].
pub fn score_to_json(score: &Score) -> Result<String> {
    Ok(serde_json::to_string_pretty(score)?)
}

// ═══════════════════════════════════════════════════════════════════════
// Conversion
// ═══════════════════════════════════════════════════════════════════════

fn build_score(raw: RawScore) -> Result<Score> {
    let key = raw
        .key_signature
        .unwrap_or_else(|| KeySignature::new("C", "major"));
    let time = raw.time_signature.unwrap_or_default();
    validate_time_signature(&time, "score")?;

    let mut score = Score::new(raw.title, raw.composer, key, time, raw.tempo.unwrap_or(DEFAULT_TEMPO));

    let staves = match (raw.staves, raw.measures) {
        (Some(staves), legacy) => {
            if legacy.is_some() {
                log::warn!("score has both 'staves' and 'measures'; ignoring 'measures'");
            }
            staves
        }
        (None, Some(measures)) => vec![RawStaff {
            clef: None,
            measures,
        }],
        (None, None) => {
            return Err(Error::InvalidScore("no 'measures' or 'staves' in score".into()));
        }
    };

    for (staff_idx, raw_staff) in staves.into_iter().enumerate() {
        let clef = raw_staff.clef.unwrap_or_else(|| Clef::default().0);
        let staff = score.add_staff(clef);

        for (measure_idx, raw_measure) in raw_staff.measures.into_iter().enumerate() {
            let ts = raw_measure.time_signature.unwrap_or(time);
            let label = format!("staff {} measure {}", staff_idx + 1, measure_idx + 1);
            validate_time_signature(&ts, &label)?;

            let number = raw_measure.number.unwrap_or(measure_idx as u32 + 1);
            let mut measure = Measure::new(number, ts);
            for element in raw_measure.elements {
                if let Some(e) = convert_element(element, &label)? {
                    measure.elements.push(e);
                }
            }
            staff.measures.push(measure);
        }
    }

    Ok(score)
}

fn validate_time_signature(ts: &TimeSignature, context: &str) -> Result<()> {
    if ts.numerator == 0 || ts.denominator == 0 {
        return Err(Error::InvalidScore(format!("{context}: time signature {ts} has a zero term")));
    }
    Ok(())
}

fn convert_element(raw: RawElement, context: &str) -> Result<Option<MusicElement>> {
    let duration = Duration::from_name(&raw.duration).unwrap_or_else(|| {
        log::warn!("{context}: unknown duration '{}', using quarter", raw.duration);
        Duration::Quarter
    });

    let element = match raw.kind.as_str() {
        "note" => {
            if !(-STAFF_LINE_LIMIT..=STAFF_LINE_LIMIT).contains(&raw.staff_line) {
                return Err(Error::InvalidScore(format!(
                    "{context}: staff_line {} is outside -{STAFF_LINE_LIMIT}..={STAFF_LINE_LIMIT}",
                    raw.staff_line
                )));
            }
            let accidental = Accidental::from_name(&raw.accidental).unwrap_or_else(|| {
                log::warn!("{context}: unknown accidental '{}', ignoring", raw.accidental);
                Accidental::None
            });
            Some(MusicElement::Note(Note {
                pitch: raw.pitch,
                duration,
                staff_line: raw.staff_line,
                accidental,
            }))
        }
        "rest" => Some(MusicElement::Rest(Rest { duration })),
        other => {
            log::warn!("{context}: skipping element of unknown type '{other}'");
            None
        }
    };
    Ok(element)
}
