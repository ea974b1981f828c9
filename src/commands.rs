//! Backend-independent drawing primitives.
//!
//! The engraver appends [`DrawCommand`]s to a [`CommandBuffer`]; a
//! [`Renderer`] later replays them in insertion order. Positions are in
//! pixels, y grows downward.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Opaque handle to a font loaded by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontHandle(pub u32);

impl FontHandle {
    /// The music (SMuFL) font.
    pub const MUSIC: FontHandle = FontHandle(0);
    /// The text font used for titles and measure numbers.
    pub const TEXT: FontHandle = FontHandle(1);
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        start: Point,
        end: Point,
        thickness: f64,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        size: f64,
        color: Color,
    },
    /// `position` is the glyph's SMuFL origin.
    Glyph {
        font: FontHandle,
        codepoint: char,
        position: Point,
        size: f64,
        color: Color,
    },
    RectangleOutline {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        thickness: f64,
        color: Color,
    },
}

impl DrawCommand {
    pub fn line(start: Point, end: Point, thickness: f64, color: Color) -> Self {
        DrawCommand::Line {
            start,
            end,
            thickness,
            color,
        }
    }

    pub fn text(text: impl Into<String>, position: Point, size: f64, color: Color) -> Self {
        DrawCommand::Text {
            text: text.into(),
            position,
            size,
            color,
        }
    }

    pub fn glyph(font: FontHandle, codepoint: char, position: Point, size: f64, color: Color) -> Self {
        DrawCommand::Glyph {
            font,
            codepoint,
            position,
            size,
            color,
        }
    }

    pub fn rectangle_outline(x: f64, y: f64, width: f64, height: f64, thickness: f64, color: Color) -> Self {
        DrawCommand::RectangleOutline {
            x,
            y,
            width,
            height,
            thickness,
            color,
        }
    }

    /// Dispatch this command to a renderer.
    pub fn execute<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        match self {
            DrawCommand::Line {
                start,
                end,
                thickness,
                color,
            } => renderer.draw_line(*start, *end, *thickness, *color),
            DrawCommand::Text {
                text,
                position,
                size,
                color,
            } => renderer.draw_text(text, *position, *size, *color),
            DrawCommand::Glyph {
                font,
                codepoint,
                position,
                size,
                color,
            } => renderer.draw_glyph(*font, *codepoint, *position, *size, *color),
            DrawCommand::RectangleOutline {
                x,
                y,
                width,
                height,
                thickness,
                color,
            } => renderer.draw_rectangle_outline(*x, *y, *width, *height, *thickness, *color),
        }
    }
}

/// A backend that can realize draw commands.
pub trait Renderer {
    fn draw_line(&mut self, start: Point, end: Point, thickness: f64, color: Color);
    fn draw_text(&mut self, text: &str, position: Point, size: f64, color: Color);
    fn draw_glyph(&mut self, font: FontHandle, codepoint: char, position: Point, size: f64, color: Color);
    fn draw_rectangle_outline(&mut self, x: f64, y: f64, width: f64, height: f64, thickness: f64, color: Color);
}

/// Ordered, replayable list of draw commands.
///
/// Cleared and refilled on every layout pass. Order is significant: later
/// commands draw on top of earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append another buffer's commands after this one's, keeping order.
    pub fn extend(&mut self, other: CommandBuffer) {
        self.commands.extend(other.commands);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay every command, in order, on `renderer`.
    pub fn execute<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for cmd in &self.commands {
            cmd.execute(renderer);
        }
    }
}

impl<'a> IntoIterator for &'a CommandBuffer {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl Renderer for Recorder {
        fn draw_line(&mut self, _: Point, _: Point, _: f64, _: Color) {
            self.calls.push("line");
        }
        fn draw_text(&mut self, _: &str, _: Point, _: f64, _: Color) {
            self.calls.push("text");
        }
        fn draw_glyph(&mut self, _: FontHandle, _: char, _: Point, _: f64, _: Color) {
            self.calls.push("glyph");
        }
        fn draw_rectangle_outline(&mut self, _: f64, _: f64, _: f64, _: f64, _: f64, _: Color) {
            self.calls.push("rect");
        }
    }

    #[test]
    fn execute_replays_in_order() {
        let mut buf = CommandBuffer::new();
        buf.push(DrawCommand::rectangle_outline(0.0, 0.0, 1.0, 1.0, 1.0, Color::RED));
        buf.push(DrawCommand::line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 1.0, Color::BLACK));
        buf.push(DrawCommand::glyph(FontHandle::MUSIC, '\u{E0A4}', Point::default(), 40.0, Color::BLACK));
        buf.push(DrawCommand::text("x", Point::default(), 12.0, Color::BLACK));

        let mut rec = Recorder::default();
        buf.execute(&mut rec);
        assert_eq!(rec.calls, vec!["rect", "line", "glyph", "text"]);

        // replaying again draws the same frame
        buf.execute(&mut rec);
        assert_eq!(rec.calls.len(), 8);
    }

    #[test]
    fn clear_and_extend() {
        let mut a = CommandBuffer::new();
        a.push(DrawCommand::text("a", Point::default(), 10.0, Color::BLACK));
        let mut b = CommandBuffer::new();
        b.push(DrawCommand::text("b", Point::default(), 10.0, Color::BLACK));
        a.extend(b);
        assert_eq!(a.len(), 2);
        assert!(matches!(&a.commands()[1], DrawCommand::Text { text, .. } if text == "b"));
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn color_hex() {
        assert_eq!(Color::rgb(26, 26, 26).to_hex(), "#1a1a1a");
        assert_eq!(Color::BLACK.opacity(), 1.0);
    }
}
