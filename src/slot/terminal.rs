use super::{Glyph, OutputSlot, RenderedFrame, hsl_to_rgb};
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// A slot drawn on one row of a terminal.
///
/// Placeholders get a tinted, dimmed foreground so they read as transient.
pub struct TerminalSlot<W: Write> {
    writer: W,
    row: u16,
    column: u16,
    placeholder_color: Color,
    current: RenderedFrame,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSlot<W> {
    pub fn new(writer: W, row: u16, column: u16, placeholder_hue: f32) -> Self {
        Self {
            writer,
            row,
            column,
            placeholder_color: hsl_to_rgb(placeholder_hue, 85.0, 60.0),
            current: RenderedFrame::default(),
            error: None,
        }
    }

    /// Seed the slot with resting text without drawing it.
    pub fn with_text(mut self, text: &str) -> Self {
        self.current = RenderedFrame::plain(text);
        self
    }

    /// Draw the current frame again, e.g. after a resize.
    pub fn redraw(&mut self) -> io::Result<()> {
        let frame = self.current.clone();
        self.draw(&frame)
    }

    /// The first I/O error hit while writing, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    fn draw(&mut self, frame: &RenderedFrame) -> io::Result<()> {
        self.writer.queue(MoveTo(self.column, self.row))?;
        self.writer.queue(Clear(ClearType::CurrentLine))?;
        for glyph in frame.glyphs() {
            match glyph {
                Glyph::Plain(ch) => {
                    self.writer.queue(Print(ch))?;
                }
                Glyph::Placeholder(ch) => {
                    self.writer
                        .queue(SetForegroundColor(self.placeholder_color))?
                        .queue(SetAttribute(Attribute::Dim))?
                        .queue(Print(ch))?
                        .queue(SetAttribute(Attribute::Reset))?
                        .queue(ResetColor)?;
                }
            }
        }
        self.writer.flush()
    }
}

impl<W: Write> OutputSlot for TerminalSlot<W> {
    fn current_text(&self) -> String {
        self.current.plain_text()
    }

    fn write(&mut self, frame: &RenderedFrame) {
        self.current = frame.clone();
        if let Err(e) = self.draw(frame) {
            tracing::warn!(error = %e, "failed to draw frame");
            self.error.get_or_insert(e);
        }
    }
}
