//! Output slots: where an animator writes its frames.

mod color;
mod memory;
mod terminal;

pub use color::hsl_to_rgb;
pub use memory::MemorySlot;
pub use terminal::TerminalSlot;

use std::fmt::Write;

/// A text-rendering target bound to exactly one animator.
pub trait OutputSlot {
    /// The plain text a reader of the slot currently sees.
    fn current_text(&self) -> String;

    /// Replace the slot's content with `frame` in one update.
    fn write(&mut self, frame: &RenderedFrame);
}

/// A single rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A source or target character.
    Plain(char),
    /// A transient character shown while a cell is scrambling.
    Placeholder(char),
}

impl Glyph {
    pub fn char(self) -> char {
        match self {
            Self::Plain(ch) | Self::Placeholder(ch) => ch,
        }
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// One frame of a transition, in position order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    glyphs: Vec<Glyph>,
}

impl RenderedFrame {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    pub fn plain(text: &str) -> Self {
        Self { glyphs: text.chars().map(Glyph::Plain).collect() }
    }

    pub(crate) fn push(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.glyphs.iter().filter(|glyph| glyph.is_placeholder()).count()
    }

    /// The text as a reader would see it, placeholders included.
    pub fn plain_text(&self) -> String {
        self.glyphs.iter().map(|glyph| glyph.char()).collect()
    }

    /// Markup where each placeholder is wrapped in `<span class="{class}">`.
    pub fn to_markup(&self, class: &str) -> String {
        let mut output = String::with_capacity(self.glyphs.len());
        for glyph in &self.glyphs {
            match glyph {
                Glyph::Plain(ch) => push_escaped(&mut output, *ch),
                Glyph::Placeholder(ch) => {
                    let _ = write!(output, "<span class=\"{}\">", escape(class));
                    push_escaped(&mut output, *ch);
                    output.push_str("</span>");
                }
            }
        }
        output
    }
}

fn escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    text.chars().for_each(|ch| push_escaped(&mut output, ch));
    output
}

fn push_escaped(output: &mut String, ch: char) {
    match ch {
        '<' => output.push_str("&lt;"),
        '>' => output.push_str("&gt;"),
        '&' => output.push_str("&amp;"),
        '"' => output.push_str("&quot;"),
        _ => output.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn plain_text_includes_placeholders() {
        let frame = RenderedFrame::new(vec![Glyph::Plain('a'), Glyph::Placeholder('#'), Glyph::Plain('c')]);
        assert_eq!(frame.plain_text(), "a#c");
        assert_eq!(frame.placeholder_count(), 1);
    }

    #[rstest]
    #[case::plain_only(vec![Glyph::Plain('o'), Glyph::Plain('k')], "ok")]
    #[case::placeholder(vec![Glyph::Plain('a'), Glyph::Placeholder('#')], "a<span class=\"dud\">#</span>")]
    #[case::escaped_placeholder(vec![Glyph::Placeholder('<')], "<span class=\"dud\">&lt;</span>")]
    #[case::escaped_plain(vec![Glyph::Plain('&'), Glyph::Plain('>')], "&amp;&gt;")]
    #[case::empty(vec![], "")]
    fn markup(#[case] glyphs: Vec<Glyph>, #[case] expected: &str) {
        assert_eq!(RenderedFrame::new(glyphs).to_markup("dud"), expected);
    }

    #[test]
    fn markup_escapes_class() {
        let frame = RenderedFrame::new(vec![Glyph::Placeholder('x')]);
        assert_eq!(frame.to_markup("a\"b"), "<span class=\"a&quot;b\">x</span>");
    }
}
