//! SVG backend — realizes a command buffer as a standalone SVG document.
//!
//! Glyphs become `<text>` elements set in the music font, so the document
//! renders wherever that font is installed or web-loaded.

use crate::commands::{Color, CommandBuffer, FontHandle, Point, Renderer};
use crate::engraver::{Engraver, EngraverConfig};
use crate::font::MusicFont;
use crate::model::Score;

// ── Page ────────────────────────────────────────────────────────────
/// Margin on every side, in staff spaces.
const PAGE_MARGIN: f64 = 3.0;
/// Space kept above the top line and below the bottom line for ledger
/// lines and stems, in staff spaces.
const LEDGER_ROOM: f64 = 4.0;
const STAFF_HEIGHT: f64 = 4.0;
const DEFAULT_MUSIC_FAMILY: &str = "Bravura";
const DEFAULT_TEXT_FAMILY: &str = "Georgia, 'Times New Roman', serif";

// ═══════════════════════════════════════════════════════════════════════
// SvgRenderer
// ═══════════════════════════════════════════════════════════════════════

/// A [`Renderer`] that accumulates SVG elements.
pub struct SvgRenderer {
    elements: Vec<String>,
    width: f64,
    height: f64,
    music_family: String,
    text_family: String,
}

impl SvgRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            music_family: DEFAULT_MUSIC_FAMILY.to_string(),
            text_family: DEFAULT_TEXT_FAMILY.to_string(),
        }
    }

    /// Font families for [`FontHandle::MUSIC`] and [`FontHandle::TEXT`].
    pub fn with_fonts(mut self, music_family: impl Into<String>, text_family: impl Into<String>) -> Self {
        self.music_family = music_family.into();
        self.text_family = text_family.into();
        self
    }

    /// Fill the whole page.
    pub fn background(&mut self, color: Color) {
        self.elements.push(format!(
            r#"<rect x="0" y="0" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            self.width,
            self.height,
            color.to_hex()
        ));
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.1} {:.1}" width="{:.1}" height="{:.1}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn family(&self, font: FontHandle) -> &str {
        if font == FontHandle::TEXT {
            &self.text_family
        } else {
            &self.music_family
        }
    }
}

impl Renderer for SvgRenderer {
    fn draw_line(&mut self, start: Point, end: Point, thickness: f64, color: Color) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.2}"{} stroke-linecap="butt"/>"#,
            start.x,
            start.y,
            end.x,
            end.y,
            color.to_hex(),
            thickness,
            opacity_attr("stroke-opacity", color)
        ));
    }

    fn draw_text(&mut self, text: &str, position: Point, size: f64, color: Color) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" fill="{}"{}>{}</text>"#,
            position.x,
            position.y,
            self.text_family,
            size,
            color.to_hex(),
            opacity_attr("fill-opacity", color),
            escape(text)
        ));
    }

    fn draw_glyph(&mut self, font: FontHandle, codepoint: char, position: Point, size: f64, color: Color) {
        let element = format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" fill="{}"{}>&#x{:X};</text>"#,
            position.x,
            position.y,
            self.family(font),
            size,
            color.to_hex(),
            opacity_attr("fill-opacity", color),
            codepoint as u32
        );
        self.elements.push(element);
    }

    fn draw_rectangle_outline(&mut self, x: f64, y: f64, width: f64, height: f64, thickness: f64, color: Color) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-width="{:.2}"{}/>"#,
            x,
            y,
            width,
            height,
            color.to_hex(),
            thickness,
            opacity_attr("stroke-opacity", color)
        ));
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{:.2}""#, color.opacity())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ═══════════════════════════════════════════════════════════════════════
// Whole-score rendering
// ═══════════════════════════════════════════════════════════════════════

/// Engrave `score` with `font` and return a complete SVG document sized
/// to the laid-out score.
pub fn render_score_to_svg(score: &Score, font: &MusicFont, config: &EngraverConfig) -> String {
    if score.staves.is_empty() {
        return empty_svg("No staves in score");
    }

    let units = config.units();
    let engraver = Engraver::new(score, font, *font.engraving_defaults(), config.clone());
    let layout = engraver.layout();

    let margin = units.staff_spaces_to_pixels(PAGE_MARGIN);
    let room = units.staff_spaces_to_pixels(LEDGER_ROOM);
    let origin_x = margin;
    let origin_y = margin + layout.header_height + room + units.staff_spaces_to_pixels(STAFF_HEIGHT);
    let width = layout.width + 2.0 * margin;
    let height = origin_y + layout.height + room + margin;

    let mut buffer = CommandBuffer::new();
    engraver.generate_draw_commands(origin_x, origin_y, &mut buffer);

    let music_family = font.name().unwrap_or(DEFAULT_MUSIC_FAMILY);
    let mut svg = SvgRenderer::new(width, height).with_fonts(music_family, DEFAULT_TEXT_FAMILY);
    svg.background(Color::WHITE);
    buffer.execute(&mut svg);
    svg.build()
}

/// Placeholder document carrying a message.
pub fn empty_svg(message: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 100\">\
         <text x=\"200\" y=\"50\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">{}</text>\
         </svg>",
        escape(message)
    )
}
