use super::{alphabet::ScrambleAlphabet, random::RandomSource};
use crate::slot::Glyph;

/// Where a cell is in its reveal window at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPhase {
    /// Before `reveal_start`: shows the source character.
    Waiting,
    /// In `[reveal_start, reveal_end)`: shows a placeholder.
    Scrambling,
    /// From `reveal_end` on: shows the target character.
    Settled,
}

/// Per-position state for one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub source: Option<char>,
    pub target: Option<char>,
    pub reveal_start: u32,
    pub reveal_end: u32,
    pub scramble: Option<char>,
}

impl Cell {
    /// Draw a reveal window in `[0, range)` plus an offset in `[0, range)`.
    pub(crate) fn random<R: RandomSource>(source: Option<char>, target: Option<char>, range: u32, rng: &mut R) -> Self {
        let reveal_start = rng.below(range);
        let reveal_end = reveal_start.saturating_add(rng.below(range));
        Self { source, target, reveal_start, reveal_end, scramble: None }
    }

    pub fn phase(&self, frame: u32) -> CellPhase {
        if frame >= self.reveal_end {
            CellPhase::Settled
        } else if frame >= self.reveal_start {
            CellPhase::Scrambling
        } else {
            CellPhase::Waiting
        }
    }

    /// Advance to `frame` and return what to draw, if anything.
    ///
    /// Scrambling cells pick a first placeholder, then re-roll it with
    /// probability `mutation_probability` per frame.
    pub(crate) fn step<R: RandomSource>(
        &mut self,
        frame: u32,
        alphabet: &ScrambleAlphabet,
        mutation_probability: f64,
        rng: &mut R,
    ) -> (CellPhase, Option<Glyph>) {
        let phase = self.phase(frame);
        let glyph = match phase {
            CellPhase::Settled => self.target.map(Glyph::Plain),
            CellPhase::Scrambling => {
                let ch = match self.scramble {
                    Some(ch) if rng.unit() >= mutation_probability => ch,
                    _ => alphabet.pick(rng),
                };
                self.scramble = Some(ch);
                Some(Glyph::Placeholder(ch))
            }
            CellPhase::Waiting => self.source.map(Glyph::Plain),
        };
        (phase, glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::random::scripted::ScriptedRandom;
    use rstest::rstest;

    fn cell(start: u32, end: u32) -> Cell {
        Cell { source: Some('x'), target: Some('y'), reveal_start: start, reveal_end: end, scramble: None }
    }

    #[rstest]
    #[case(0, CellPhase::Waiting)]
    #[case(1, CellPhase::Waiting)]
    #[case(2, CellPhase::Scrambling)]
    #[case(4, CellPhase::Scrambling)]
    #[case(5, CellPhase::Settled)]
    #[case(100, CellPhase::Settled)]
    fn phase_boundaries(#[case] frame: u32, #[case] expected: CellPhase) {
        assert_eq!(cell(2, 5).phase(frame), expected);
    }

    #[test]
    fn empty_window_never_scrambles() {
        let c = cell(3, 3);
        assert_eq!(c.phase(2), CellPhase::Waiting);
        assert_eq!(c.phase(3), CellPhase::Settled);
    }

    #[test]
    fn random_window_is_ordered() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..500 {
            let c = Cell::random(None, Some('a'), 40, &mut rng);
            assert!(c.reveal_start < 40);
            assert!(c.reveal_end >= c.reveal_start);
            assert!(c.reveal_end - c.reveal_start < 40);
        }
    }

    #[test]
    fn first_scramble_frame_skips_mutation_roll() {
        let alphabet = ScrambleAlphabet::new("ab").expect("non-empty");
        let mut rng = ScriptedRandom::new(&[1], &[0.99]);
        let mut c = cell(0, 2);
        let (phase, glyph) = c.step(0, &alphabet, 0.5, &mut rng);
        assert_eq!(phase, CellPhase::Scrambling);
        assert_eq!(glyph, Some(Glyph::Placeholder('b')));
        // 0.99 was not consumed by the first frame and keeps the placeholder
        let (_, glyph) = c.step(1, &alphabet, 0.5, &mut rng);
        assert_eq!(glyph, Some(Glyph::Placeholder('b')));
    }

    #[test]
    fn low_roll_rerolls_placeholder() {
        let alphabet = ScrambleAlphabet::new("ab").expect("non-empty");
        let mut rng = ScriptedRandom::new(&[0, 1], &[0.1]);
        let mut c = cell(0, 2);
        assert_eq!(c.step(0, &alphabet, 0.28, &mut rng).1, Some(Glyph::Placeholder('a')));
        assert_eq!(c.step(1, &alphabet, 0.28, &mut rng).1, Some(Glyph::Placeholder('b')));
    }

    #[test]
    fn missing_characters_render_nothing() {
        let alphabet = ScrambleAlphabet::default();
        let mut rng = ScriptedRandom::default();
        let mut c = Cell { source: None, target: None, reveal_start: 1, reveal_end: 2, scramble: None };
        assert_eq!(c.step(0, &alphabet, 0.5, &mut rng), (CellPhase::Waiting, None));
        assert_eq!(c.step(2, &alphabet, 0.5, &mut rng), (CellPhase::Settled, None));
    }
}
