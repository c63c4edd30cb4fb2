use super::{
    alphabet::ScrambleAlphabet,
    cell::{Cell, CellPhase},
    completion::Completion,
    random::RandomSource,
};
use crate::{
    config::{ConfigError, ScrambleConfig},
    slot::{OutputSlot, RenderedFrame},
};

/// The outcome of running one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// A frame was written and another one is scheduled.
    Running,
    /// A frame was written and the transition settled.
    Done,
    /// Nothing to do: no transition in flight, or a superseded request.
    Idle,
}

/// A scheduled continuation of a transition.
///
/// Requests carry the generation they were issued for; running a request
/// from an older generation does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    generation: u64,
}

impl FrameRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct Transition {
    cells: Vec<Cell>,
    frame: u32,
    completion: Completion,
}

/// Drives scramble transitions on one output slot.
///
/// The animator never schedules anything on its own: the host calls
/// [`ScrambleAnimator::tick`] once per refresh while a transition is in
/// flight.
#[derive(Debug)]
pub struct ScrambleAnimator<S, R = fastrand::Rng> {
    slot: S,
    rng: R,
    alphabet: ScrambleAlphabet,
    randomization_range: u32,
    mutation_probability: f64,
    transition: Option<Transition>,
    generation: u64,
    pending: Option<FrameRequest>,
}

impl<S: OutputSlot> ScrambleAnimator<S> {
    /// Bind an animator to `slot` using an entropy-seeded generator.
    pub fn bind(slot: S, config: &ScrambleConfig) -> Result<Self, ConfigError> {
        Self::bind_with_rng(slot, config, fastrand::Rng::new())
    }
}

impl<S: OutputSlot, R: RandomSource> ScrambleAnimator<S, R> {
    /// Bind an animator to `slot` drawing all randomness from `rng`.
    pub fn bind_with_rng(slot: S, config: &ScrambleConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            slot,
            rng,
            alphabet: config.parsed_alphabet()?,
            randomization_range: config.randomization_range,
            mutation_probability: config.mutation_probability,
            transition: None,
            generation: 0,
            pending: None,
        })
    }

    /// Start a transition from the slot's current text to `target`.
    ///
    /// Frame 0 is rendered before this returns. Any transition still in
    /// flight is dropped and its completion never resolves.
    pub fn set_text(&mut self, target: &str) -> Completion {
        let source: Vec<char> = self.slot.current_text().chars().collect();
        let target: Vec<char> = target.chars().collect();
        let length = source.len().max(target.len());
        let cells = (0..length)
            .map(|i| {
                Cell::random(source.get(i).copied(), target.get(i).copied(), self.randomization_range, &mut self.rng)
            })
            .collect();

        if let Some(previous) = self.pending.take() {
            tracing::debug!(generation = previous.generation, "superseding in-flight transition");
        }
        self.generation = self.generation.wrapping_add(1);
        let completion = Completion::new();
        self.transition = Some(Transition { cells, frame: 0, completion: completion.clone() });
        tracing::debug!(generation = self.generation, cells = length, "starting transition");

        let request = FrameRequest { generation: self.generation };
        self.pending = Some(request);
        self.run_frame(request);
        completion
    }

    /// Run the scheduled frame, if there is one.
    pub fn tick(&mut self) -> FrameState {
        match self.pending {
            Some(request) => self.run_frame(request),
            None => FrameState::Idle,
        }
    }

    /// Run `request` if it is still the scheduled continuation.
    pub fn run_frame(&mut self, request: FrameRequest) -> FrameState {
        if self.pending != Some(request) {
            tracing::trace!(generation = request.generation, current = self.generation, "dropping stale frame");
            return FrameState::Idle;
        }
        self.pending = None;
        let Some(transition) = self.transition.as_mut() else {
            return FrameState::Idle;
        };

        let mut rendered = RenderedFrame::default();
        let mut settled = 0;
        for cell in &mut transition.cells {
            let (phase, glyph) =
                cell.step(transition.frame, &self.alphabet, self.mutation_probability, &mut self.rng);
            if phase == CellPhase::Settled {
                settled += 1;
            }
            if let Some(glyph) = glyph {
                rendered.push(glyph);
            }
        }
        self.slot.write(&rendered);
        tracing::trace!(frame = transition.frame, settled, total = transition.cells.len(), "rendered frame");

        if settled == transition.cells.len() {
            transition.completion.resolve();
            tracing::debug!(generation = request.generation, frames = transition.frame + 1, "transition settled");
            self.transition = None;
            FrameState::Done
        } else {
            transition.frame += 1;
            self.pending = Some(request);
            FrameState::Running
        }
    }

    /// Tick until the current transition settles. Returns the number of frames run.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.tick() != FrameState::Idle {
            frames += 1;
        }
        frames
    }

    /// The continuation the host should run next.
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// The frame the in-flight transition renders next.
    pub fn frame(&self) -> Option<u32> {
        self.transition.as_ref().map(|transition| transition.frame)
    }

    /// Cells of the in-flight transition.
    pub fn cells(&self) -> &[Cell] {
        self.transition.as_ref().map(|transition| transition.cells.as_slice()).unwrap_or_default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alphabet(&self) -> &ScrambleAlphabet {
        &self.alphabet
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scramble::random::scripted::ScriptedRandom,
        slot::{Glyph, MemorySlot},
    };
    use rstest::rstest;

    fn config(alphabet: &str, range: u32) -> ScrambleConfig {
        ScrambleConfig { alphabet: alphabet.to_string(), randomization_range: range, ..Default::default() }
    }

    fn seeded(initial: &str, range: u32, seed: u64) -> ScrambleAnimator<MemorySlot> {
        let slot = MemorySlot::new(initial).with_history();
        ScrambleAnimator::bind_with_rng(slot, &config("#", range), fastrand::Rng::with_seed(seed)).expect("bind failed")
    }

    #[test]
    fn grows_text_in_one_frame_with_unit_range() {
        let slot = MemorySlot::new("AB").with_history();
        let mut animator = ScrambleAnimator::bind_with_rng(slot, &config("#", 1), fastrand::Rng::with_seed(1))
            .expect("bind failed");
        let completion = animator.set_text("ABCD");

        assert!(completion.is_resolved());
        assert!(!animator.is_animating());
        assert_eq!(animator.slot().history(), &[RenderedFrame::plain("ABCD")]);
        assert_eq!(animator.tick(), FrameState::Idle);
    }

    #[test]
    fn forced_window_scrambles_then_settles() {
        let slot = MemorySlot::new("X").with_history();
        // start = 2, offset = 3, then placeholder picks; rolls keep or re-roll
        let rng = ScriptedRandom::new(&[2, 3, 0, 1], &[0.9, 0.1]);
        let mut animator = ScrambleAnimator::bind_with_rng(slot, &config("ab", 10), rng).expect("bind failed");
        let completion = animator.set_text("Y");
        assert_eq!(animator.cells()[0].reveal_start, 2);
        assert_eq!(animator.cells()[0].reveal_end, 5);

        for _ in 0..4 {
            assert_eq!(animator.tick(), FrameState::Running);
            assert!(!completion.is_resolved());
        }
        assert_eq!(animator.tick(), FrameState::Done);
        assert!(completion.is_resolved());

        let frames: Vec<_> = animator.slot().history().iter().map(|f| f.glyphs().to_vec()).collect();
        assert_eq!(
            frames,
            vec![
                vec![Glyph::Plain('X')],
                vec![Glyph::Plain('X')],
                vec![Glyph::Placeholder('a')],
                vec![Glyph::Placeholder('a')],
                vec![Glyph::Placeholder('b')],
                vec![Glyph::Plain('Y')],
            ]
        );
    }

    #[test]
    fn empty_to_empty_resolves_immediately() {
        let mut animator = seeded("", 40, 9);
        let completion = animator.set_text("");
        assert!(completion.is_resolved());
        assert_eq!(animator.slot().writes(), 1);
        assert!(animator.slot().frame().is_empty());
    }

    #[rstest]
    #[case("", "HELLO")]
    #[case("HELLO", "")]
    #[case("TOM", "SYSTEM_BREACH")]
    #[case("SYSTEM_BREACH", "TOM")]
    #[case("héllo wörld", "ÆØÅ")]
    fn settles_on_target(#[case] start: &str, #[case] target: &str) {
        let range = 12;
        let mut animator = seeded(start, range, 1234);
        let completion = animator.set_text(target);
        let frames = animator.settle();

        assert!(completion.is_resolved());
        assert!(frames < 2 * range as usize);
        assert_eq!(animator.slot().current_text(), target);
        assert_eq!(animator.slot().frame().placeholder_count(), 0);
    }

    #[test]
    fn settled_cells_stay_settled() {
        let mut animator = seeded("abcdefgh", 20, 77);
        let target = "ZYXWVUTSRQ";
        animator.set_text(target);
        animator.settle();

        let target: Vec<char> = target.chars().collect();
        let history = animator.slot().history();
        for (index, ch) in target.iter().enumerate() {
            let first = history.iter().position(|frame| frame.glyphs().get(index) == Some(&Glyph::Plain(*ch)));
            let Some(first) = first else { panic!("position {index} never settled") };
            for frame in &history[first..] {
                assert_eq!(frame.glyphs().get(index), Some(&Glyph::Plain(*ch)));
            }
        }
    }

    #[test]
    fn supersession_drops_previous_transition() {
        let mut animator = seeded("start", 30, 5);
        let first = animator.set_text("AAAAAA");
        let stale = animator.pending_frame().expect("first transition still running");
        animator.tick();

        let second = animator.set_text("BB");
        assert_ne!(animator.pending_frame(), Some(stale));
        assert_eq!(animator.run_frame(stale), FrameState::Idle);

        animator.settle();
        assert!(second.is_resolved());
        assert!(!first.is_resolved());
        assert_eq!(animator.slot().current_text(), "BB");
    }

    #[test]
    fn new_transition_starts_from_displayed_text() {
        let slot = MemorySlot::new("");
        // windows far enough out that frame 0 shows only source characters
        let rng = ScriptedRandom::new(&[5, 5, 5, 5, 5, 5], &[]);
        let mut animator = ScrambleAnimator::bind_with_rng(slot, &config("#", 10), rng).expect("bind failed");
        animator.set_text("abc");
        assert_eq!(animator.slot().current_text(), "");

        let mut slot = MemorySlot::new("old");
        slot.write(&RenderedFrame::new(vec![Glyph::Plain('o'), Glyph::Placeholder('#')]));
        let rng = ScriptedRandom::new(&[5, 5, 5, 5], &[]);
        let mut animator = ScrambleAnimator::bind_with_rng(slot, &config("#", 10), rng).expect("bind failed");
        animator.set_text("ok");
        assert_eq!(animator.cells()[1].source, Some('#'));
        assert_eq!(animator.slot().current_text(), "o#");
    }

    #[test]
    fn generation_increases_per_call() {
        let mut animator = seeded("", 4, 2);
        assert_eq!(animator.generation(), 0);
        animator.set_text("a");
        animator.set_text("b");
        assert_eq!(animator.generation(), 2);
    }

    #[rstest]
    #[case::empty_alphabet(ScrambleConfig { alphabet: String::new(), ..Default::default() })]
    #[case::zero_range(ScrambleConfig { randomization_range: 0, ..Default::default() })]
    #[case::nan_probability(ScrambleConfig { mutation_probability: f64::NAN, ..Default::default() })]
    fn invalid_config_fails_fast(#[case] config: ScrambleConfig) {
        assert!(ScrambleAnimator::bind(MemorySlot::new(""), &config).is_err());
    }
}
