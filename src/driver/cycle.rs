use crate::{
    scramble::{Completion, RandomSource, ScrambleAnimator},
    slot::OutputSlot,
};
use std::time::{Duration, Instant};

#[derive(Debug)]
enum CycleState {
    Idle,
    Animating(Completion),
    Waiting(Instant),
}

/// Shows a list of phrases in turn, pausing between them.
///
/// Each phrase starts `delay` after the previous one settles. If another
/// caller supersedes the phrase in flight its completion never resolves and
/// the cycle stops until [`PhraseCycler::reset`].
#[derive(Debug)]
pub struct PhraseCycler {
    phrases: Vec<String>,
    next: usize,
    delay: Duration,
    state: CycleState,
}

impl PhraseCycler {
    /// Returns `None` when there are no phrases to cycle through.
    pub fn new(phrases: Vec<String>, delay: Duration) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self { phrases, next: 0, delay, state: CycleState::Idle })
    }

    /// Index of the phrase that will be shown next.
    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, CycleState::Waiting(_))
    }

    /// Start again from the phrase after the last one shown, on the next tick.
    pub fn reset(&mut self) {
        self.state = CycleState::Idle;
    }

    /// Advance the cycle. Call once per frame; returns the completion of a
    /// phrase started by this call.
    pub fn tick<S: OutputSlot, R: RandomSource>(
        &mut self,
        animator: &mut ScrambleAnimator<S, R>,
        now: Instant,
    ) -> Option<Completion> {
        let ready = match &self.state {
            CycleState::Idle => true,
            CycleState::Animating(completion) => {
                if completion.is_resolved() {
                    self.state = CycleState::Waiting(now + self.delay);
                }
                false
            }
            CycleState::Waiting(at) => now >= *at,
        };
        ready.then(|| self.start_next(animator))
    }

    fn start_next<S: OutputSlot, R: RandomSource>(&mut self, animator: &mut ScrambleAnimator<S, R>) -> Completion {
        let phrase = &self.phrases[self.next];
        tracing::debug!(index = self.next, phrase = %phrase, "cycling to next phrase");
        let completion = animator.set_text(phrase);
        self.next = (self.next + 1) % self.phrases.len();
        self.state = CycleState::Animating(completion.clone());
        completion
    }
}
