//! The scramble animator and its building blocks.

mod alphabet;
mod animator;
mod cell;
mod completion;
mod random;

pub use alphabet::{DEFAULT_ALPHABET, ScrambleAlphabet};
pub use animator::{FrameRequest, FrameState, ScrambleAnimator};
pub use cell::{Cell, CellPhase};
pub use completion::Completion;
pub use random::RandomSource;
