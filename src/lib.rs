//! Frame-stepped "text scramble" transitions.
//!
//! A [`ScrambleAnimator`] is bound to one [`OutputSlot`]. Calling
//! [`ScrambleAnimator::set_text`] starts a transition from whatever the slot
//! shows to a new string; the host then calls [`ScrambleAnimator::tick`] once
//! per refresh until the returned [`Completion`] resolves. Every character
//! settles on its own randomized frame and flickers through placeholder
//! glyphs on the way.

pub mod config;
pub mod driver;
pub mod logging;
pub mod scramble;
pub mod slot;

pub use config::{Config, ConfigError, ScrambleConfig};
pub use scramble::{Completion, FrameState, ScrambleAnimator};
pub use slot::{OutputSlot, RenderedFrame};
