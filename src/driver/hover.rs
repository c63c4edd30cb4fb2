use crate::{
    scramble::{Completion, RandomSource, ScrambleAnimator},
    slot::OutputSlot,
};

/// Swaps between a resting phrase and a hover phrase on pointer enter/leave.
#[derive(Clone, Debug)]
pub struct HoverBinding {
    resting: String,
    hover: String,
    hovered: bool,
}

impl HoverBinding {
    pub fn new(resting: impl Into<String>, hover: impl Into<String>) -> Self {
        Self { resting: resting.into(), hover: hover.into(), hovered: false }
    }

    pub fn resting(&self) -> &str {
        &self.resting
    }

    pub fn hover(&self) -> &str {
        &self.hover
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn enter<S: OutputSlot, R: RandomSource>(&mut self, animator: &mut ScrambleAnimator<S, R>) -> Completion {
        self.hovered = true;
        tracing::debug!(phrase = %self.hover, "pointer entered");
        animator.set_text(&self.hover)
    }

    pub fn leave<S: OutputSlot, R: RandomSource>(&mut self, animator: &mut ScrambleAnimator<S, R>) -> Completion {
        self.hovered = false;
        tracing::debug!(phrase = %self.resting, "pointer left");
        animator.set_text(&self.resting)
    }

    /// Enter if not hovered, leave otherwise.
    pub fn toggle<S: OutputSlot, R: RandomSource>(&mut self, animator: &mut ScrambleAnimator<S, R>) -> Completion {
        if self.hovered { self.leave(animator) } else { self.enter(animator) }
    }
}
