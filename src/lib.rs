//! engravelib — music engraving engine built on SMuFL font metadata.
//!
//! A [`Score`] plus a glyph resolver goes in; an ordered [`CommandBuffer`]
//! of lines, glyphs, text and rectangles comes out, ready to be replayed
//! on any [`Renderer`]. An SVG backend is included.
//!
//! # Example
//! ```no_run
//! use engravelib::{engrave_score, load_score_file, EngraverConfig, MusicFont};
//!
//! let score = load_score_file("score.json").unwrap();
//! let font = MusicFont::bundled().unwrap();
//! let commands = engrave_score(&score, &font, font.engraving_defaults(), &EngraverConfig::default());
//! println!("{} draw commands", commands.len());
//! ```

pub mod commands;
pub mod engraver;
pub mod error;
pub mod font;
pub mod loader;
pub mod model;
pub mod svg;
pub mod units;

use std::path::Path;

pub use commands::{Color, CommandBuffer, DrawCommand, FontHandle, Point, Renderer};
pub use engraver::{key_signature_accidentals, ElementRef, Engraver, EngraverConfig, ScoreLayout, SpacingConfig};
pub use error::{Error, Result};
pub use font::{EngravingDefaults, Glyph, GlyphResolver, MusicFont};
pub use loader::{load_score_file, parse_score_json, score_to_json};
pub use model::*;
pub use svg::{render_score_to_svg, SvgRenderer};
pub use units::Units;

/// Engrave a score at the origin into a fresh command buffer.
///
/// The origin is the left end of the first staff's bottom line, so staff
/// content extends to negative y.
pub fn engrave_score(
    score: &Score,
    glyphs: &dyn GlyphResolver,
    defaults: &EngravingDefaults,
    config: &EngraverConfig,
) -> CommandBuffer {
    let engraver = Engraver::new(score, glyphs, *defaults, config.clone());
    let mut buffer = CommandBuffer::new();
    engraver.generate_draw_commands(0.0, 0.0, &mut buffer);
    buffer
}

/// Parse a JSON score and render it to SVG with the bundled font.
///
/// `max_line_width` is the line-break threshold in pixels; pass 0.0 or
/// less for the default.
pub fn render_json_to_svg(json: &str, max_line_width: f64) -> Result<String> {
    let score = parse_score_json(json)?;
    let font = MusicFont::bundled()?;
    Ok(render_score_to_svg(&score, &font, &config_for(max_line_width)))
}

/// Load a JSON score file and render it to SVG with the bundled font.
pub fn render_file_to_svg<P: AsRef<Path>>(path: P, max_line_width: f64) -> Result<String> {
    let score = load_score_file(path)?;
    let font = MusicFont::bundled()?;
    Ok(render_score_to_svg(&score, &font, &config_for(max_line_width)))
}

fn config_for(max_line_width: f64) -> EngraverConfig {
    if max_line_width > 0.0 {
        EngraverConfig::with_max_line_width(max_line_width)
    } else {
        EngraverConfig::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for host applications linking the static or dynamic library
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Render a JSON score to SVG and return it as a C string.
/// The caller must free the returned string with `engravelib_free_string`.
/// Returns null on any failure.
///
/// `max_line_width` is in pixels. Pass 0.0 to use the default.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn engravelib_render_json(json: *const c_char, max_line_width: f64) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_json_to_svg(json_str, max_line_width) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("engravelib_render_json failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a JSON score file to SVG and return it as a C string.
/// The caller must free the returned string with `engravelib_free_string`.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn engravelib_render_file(path: *const c_char, max_line_width: f64) -> *mut c_char {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(path) };
    let path_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    match render_file_to_svg(path_str, max_line_width) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("engravelib_render_file failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by engravelib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by an engravelib function, or null.
#[no_mangle]
pub unsafe extern "C" fn engravelib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
