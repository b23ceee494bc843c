//! # Bus-ready notification chain
//!
//! Drivers that depend on enumerated devices register a callback before the
//! bus is scanned. Once enumeration finishes the chain flips to
//! [`ReadyState::Ready`] and every pending callback runs exactly once, in
//! registration order.
//!
//! ```text
//!   Pending ──notify──► Ready
//!     │                   │
//!  register: queue     register: run now
//! ```
//!
//! The chain does not know what the callbacks receive; [`PciBus`](crate::PciBus)
//! owns a `ReadyChain<PciBus>` and hands itself to each callback.

use crate::ReadyError;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// A one-shot readiness callback receiving `&mut A`.
pub type ReadyCallback<'cb, A> = Box<dyn FnOnce(&mut A) + 'cb>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ReadyState {
    Pending,
    Ready,
}

/// What the caller must do after [`ReadyChain::register`].
pub enum Registration<'cb, A: ?Sized> {
    /// Stored; it runs on notification.
    Queued,
    /// The chain is already ready; run this now.
    RunNow(ReadyCallback<'cb, A>),
}

pub struct ReadyChain<'cb, A: ?Sized> {
    state: ReadyState,
    pending: Vec<ReadyCallback<'cb, A>>,
}

impl<A: ?Sized> Default for ReadyChain<'_, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'cb, A: ?Sized> ReadyChain<'cb, A> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ReadyState::Pending,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> ReadyState {
        self.state
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, ReadyState::Ready)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn register(&mut self, callback: ReadyCallback<'cb, A>) -> Registration<'cb, A> {
        match self.state {
            ReadyState::Pending => {
                self.pending.push(callback);
                Registration::Queued
            }
            ReadyState::Ready => Registration::RunNow(callback),
        }
    }

    /// Enter [`ReadyState::Ready`] and hand out the pending callbacks in
    /// registration order.
    ///
    /// # Errors
    /// [`ReadyError::AlreadyNotified`] on any call after the first.
    pub fn take_for_notify(&mut self) -> Result<Vec<ReadyCallback<'cb, A>>, ReadyError> {
        if self.is_ready() {
            return Err(ReadyError::AlreadyNotified);
        }
        self.state = ReadyState::Ready;
        Ok(core::mem::take(&mut self.pending))
    }
}

impl<A: ?Sized> core::fmt::Debug for ReadyChain<'_, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReadyChain")
            .field("state", &self.state)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(chain: &mut ReadyChain<'_, Vec<&'static str>>, log: &mut Vec<&'static str>) -> Result<(), ReadyError> {
        for cb in chain.take_for_notify()? {
            cb(log);
        }
        Ok(())
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut chain: ReadyChain<'_, Vec<&'static str>> = ReadyChain::new();
        for name in ["A", "B", "C"] {
            let r = chain.register(Box::new(move |log: &mut Vec<&'static str>| log.push(name)));
            assert!(matches!(r, Registration::Queued));
        }
        assert_eq!(chain.pending(), 3);

        let mut log = Vec::new();
        run(&mut chain, &mut log).unwrap();
        assert_eq!(log, ["A", "B", "C"]);
        assert_eq!(chain.pending(), 0);
        assert_eq!(chain.state(), ReadyState::Ready);
    }

    #[test]
    fn registration_after_ready_is_handed_back() {
        let mut chain: ReadyChain<'_, Vec<&'static str>> = ReadyChain::new();
        run(&mut chain, &mut Vec::new()).unwrap();

        let Registration::RunNow(cb) = chain.register(Box::new(|log| log.push("late"))) else {
            panic!("expected immediate run");
        };
        let mut log = Vec::new();
        cb(&mut log);
        assert_eq!(log, ["late"]);
    }

    #[test]
    fn second_notify_is_an_error() {
        let mut chain: ReadyChain<'_, Vec<&'static str>> = ReadyChain::new();
        run(&mut chain, &mut Vec::new()).unwrap();
        assert_eq!(run(&mut chain, &mut Vec::new()), Err(ReadyError::AlreadyNotified));
    }
}
