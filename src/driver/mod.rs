//! Callers that trigger transitions: pointer hover and a phrase cycle.

mod cycle;
mod hover;

pub use cycle::PhraseCycler;
pub use hover::HoverBinding;
