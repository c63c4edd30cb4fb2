use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    task::{Context, Poll, Waker},
};

#[derive(Debug, Default)]
struct CompletionState {
    resolved: bool,
    wakers: Vec<Waker>,
}

/// Resolves once when the transition that produced it has fully settled.
///
/// A transition superseded by a later `set_text` never resolves its handle;
/// awaiting it stays pending forever.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    state: Arc<Mutex<CompletionState>>,
}

impl Completion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.lock().resolved
    }

    /// Whether `other` refers to the same transition.
    pub fn same_transition(&self, other: &Completion) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Mark resolved and wake any waiters. Returns `false` if it already was.
    pub(crate) fn resolve(&self) -> bool {
        let wakers = {
            let mut state = self.lock();
            if state.resolved {
                return false;
            }
            state.resolved = true;
            std::mem::take(&mut state.wakers)
        };
        wakers.into_iter().for_each(Waker::wake);
        true
    }

    fn lock(&self) -> MutexGuard<'_, CompletionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.lock();
        if state.resolved {
            return Poll::Ready(());
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::task::Waker;

    fn poll_once(completion: &mut Completion) -> Poll<()> {
        let mut cx = Context::from_waker(Waker::noop());
        Pin::new(completion).poll(&mut cx)
    }

    #[test]
    fn resolves_once() {
        let completion = Completion::new();
        assert!(!completion.is_resolved());
        assert!(completion.resolve());
        assert!(!completion.resolve());
        assert!(completion.is_resolved());
    }

    #[test]
    fn clones_share_state() {
        let completion = Completion::new();
        let observer = completion.clone();
        completion.resolve();
        assert!(observer.is_resolved());
        assert!(observer.same_transition(&completion));
        assert!(!observer.same_transition(&Completion::new()));
    }

    #[test]
    fn future_is_pending_until_resolved() {
        let mut completion = Completion::new();
        assert_eq!(poll_once(&mut completion), Poll::Pending);
        completion.resolve();
        assert_eq!(poll_once(&mut completion), Poll::Ready(()));
    }
}
