use super::{OutputSlot, RenderedFrame};

/// An in-memory slot that keeps the latest frame.
///
/// With history enabled every written frame is kept too, which is what
/// headless dumps and tests use to inspect a whole transition.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    current: RenderedFrame,
    writes: usize,
    history: Option<Vec<RenderedFrame>>,
}

impl MemorySlot {
    pub fn new(initial: &str) -> Self {
        Self { current: RenderedFrame::plain(initial), writes: 0, history: None }
    }

    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    pub fn frame(&self) -> &RenderedFrame {
        &self.current
    }

    /// How many frames have been written.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Every written frame, oldest first. Empty unless history is enabled.
    pub fn history(&self) -> &[RenderedFrame] {
        self.history.as_deref().unwrap_or_default()
    }

    /// Drain the captured history, keeping capture enabled.
    pub fn take_history(&mut self) -> Vec<RenderedFrame> {
        self.history.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl OutputSlot for MemorySlot {
    fn current_text(&self) -> String {
        self.current.plain_text()
    }

    fn write(&mut self, frame: &RenderedFrame) {
        self.current = frame.clone();
        self.writes += 1;
        if let Some(history) = &mut self.history {
            history.push(frame.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Glyph;

    #[test]
    fn reads_back_initial_text() {
        let slot = MemorySlot::new("hello");
        assert_eq!(slot.current_text(), "hello");
        assert_eq!(slot.writes(), 0);
    }

    #[test]
    fn history_is_opt_in() {
        let mut plain = MemorySlot::new("");
        plain.write(&RenderedFrame::plain("a"));
        assert!(plain.history().is_empty());

        let mut recording = MemorySlot::new("").with_history();
        recording.write(&RenderedFrame::plain("a"));
        recording.write(&RenderedFrame::new(vec![Glyph::Placeholder('#')]));
        assert_eq!(recording.history().len(), 2);
        assert_eq!(recording.current_text(), "#");
        assert_eq!(recording.take_history().len(), 2);
        assert!(recording.history().is_empty());
    }
}
