use std::path::PathBuf;

use engravelib::*;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn render_legacy_fixture() {
    let svg = render_file_to_svg(fixture("lisa_gikk_til_skolen.json"), 0.0).unwrap();
    assert!(svg.starts_with("<svg"), "SVG should start with <svg");
    assert!(svg.ends_with("</svg>\n"), "SVG should end with </svg>");
    assert!(svg.contains("&#xE050;"), "SVG should contain a treble clef");
    assert!(svg.contains("&#xE0A2;"), "SVG should contain whole noteheads");
    assert!(svg.contains("&#xE0A3;"), "SVG should contain half noteheads");
    assert!(svg.contains(r#"font-family="Bravura""#), "glyphs should use the music font");
}

#[test]
fn render_two_staves_fixture() {
    let json = std::fs::read_to_string(fixture("two_staves.json")).unwrap();
    let svg = render_json_to_svg(&json, 500.0).unwrap();
    assert!(svg.contains("&#xE062;"), "SVG should contain a bass clef");
    assert!(svg.contains("&#xE262;"), "SVG should contain sharps");
    assert!(svg.contains("&#xE243;"), "SVG should contain a 16th flag on a down stem");
}

#[test]
fn narrower_lines_make_taller_pages() {
    let json = std::fs::read_to_string(fixture("lisa_gikk_til_skolen.json")).unwrap();
    let wide = render_json_to_svg(&json, 2000.0).unwrap();
    let narrow = render_json_to_svg(&json, 300.0).unwrap();
    assert!(svg_height(&narrow) > svg_height(&wide));
    assert!(svg_width(&narrow) < svg_width(&wide));
}

#[test]
fn header_text_is_escaped() {
    let mut score = load_score_file(fixture("lisa_gikk_til_skolen.json")).unwrap();
    score.title = "Salt & Pepper <live>".into();
    let config = EngraverConfig {
        show_header: true,
        ..EngraverConfig::default()
    };
    let svg = render_score_to_svg(&score, &MusicFont::bundled().unwrap(), &config);
    assert!(svg.contains("Salt &amp; Pepper &lt;live&gt;"));
}

#[test]
fn invalid_score_is_an_error() {
    let err = render_json_to_svg(r#"{"title": "nothing"}"#, 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidScore(_)));
}

#[test]
fn far_off_staff_notes_are_rejected() {
    for line in ["-2147483648", "2147483647", "-20000000"] {
        let json = format!(
            r#"{{"measures": [{{"elements": [{{"type": "note", "pitch": 60, "duration": "whole", "staff_line": {line}}}]}}]}}"#
        );
        let err = render_json_to_svg(&json, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidScore(_)), "{line}: {err}");
    }
}

#[test]
fn commands_replay_on_any_renderer() {
    struct Counter(usize);
    impl Renderer for Counter {
        fn draw_line(&mut self, _: Point, _: Point, _: f64, _: Color) {
            self.0 += 1;
        }
        fn draw_text(&mut self, _: &str, _: Point, _: f64, _: Color) {
            self.0 += 1;
        }
        fn draw_glyph(&mut self, _: FontHandle, _: char, _: Point, _: f64, _: Color) {
            self.0 += 1;
        }
        fn draw_rectangle_outline(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color) {
            self.0 += 1;
        }
    }

    let score = load_score_file(fixture("two_staves.json")).unwrap();
    let font = MusicFont::bundled().unwrap();
    let buffer = engrave_score(&score, &font, font.engraving_defaults(), &EngraverConfig::default());
    let mut counter = Counter(0);
    buffer.execute(&mut counter);
    assert_eq!(counter.0, buffer.len());
}

fn svg_attr(svg: &str, name: &str) -> f64 {
    let key = format!(" {name}=\"");
    let start = svg.find(&key).expect("attribute present") + key.len();
    let end = start + svg[start..].find('"').expect("attribute closed");
    svg[start..end].parse().expect("numeric attribute")
}

fn svg_width(svg: &str) -> f64 {
    svg_attr(svg, "width")
}

fn svg_height(svg: &str) -> f64 {
    svg_attr(svg, "height")
}
