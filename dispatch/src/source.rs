//! Where pumped messages come from.

use std::collections::VecDeque;

use crate::event::Pumped;

/// A non-blocking source of pumped messages.
///
/// `poll` returns `None` when nothing is pending; the loop then runs an idle
/// frame and polls again.
pub trait EventSource {
    fn poll(&mut self) -> Option<Pumped>;
}

impl EventSource for VecDeque<Pumped> {
    fn poll(&mut self) -> Option<Pumped> {
        self.pop_front()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn poll(&mut self) -> Option<Pumped> {
        (**self).poll()
    }
}

/// Event source backed by a closure.
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Wraps `f` as an [`EventSource`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Option<Pumped>,
{
    FromFn(f)
}

impl<F> EventSource for FromFn<F>
where
    F: FnMut() -> Option<Pumped>,
{
    fn poll(&mut self) -> Option<Pumped> {
        (self.0)()
    }
}
