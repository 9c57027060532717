//! The pump loop.

use crate::event::Pumped;
use crate::handler::Flow;
use crate::registry::HandlerRegistry;
use crate::source::EventSource;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The source delivered [`Pumped::Quit`].
    SourceQuit,
    /// A handler returned [`Flow::Quit`].
    HandlerQuit,
    /// No handlers remain registered.
    NoHandlers,
}

/// Result of a single [`DispatchLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One message was dispatched.
    Message,
    /// Nothing was pending; an idle frame ran.
    Idle,
    /// The loop should stop.
    Stop(StopReason),
}

/// Counters returned by [`DispatchLoop::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub messages: u64,
    pub idle_frames: u64,
    pub stop: StopReason,
}

/// Pulls messages from a source and hands them to the registry.
///
/// When the source has nothing pending, each registered handler gets one
/// `on_idle` call instead.
#[derive(Debug)]
pub struct DispatchLoop<S> {
    source: S,
    registry: HandlerRegistry,
    messages: u64,
    idle_frames: u64,
}

impl<S: EventSource> DispatchLoop<S> {
    pub fn new(source: S, registry: HandlerRegistry) -> Self {
        Self {
            source,
            registry,
            messages: 0,
            idle_frames: 0,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Processes one pending message, or runs one idle frame if none is pending.
    pub fn step(&mut self) -> Step {
        if self.registry.is_empty() {
            return Step::Stop(StopReason::NoHandlers);
        }
        match self.source.poll() {
            Some(Pumped::Quit) => Step::Stop(StopReason::SourceQuit),
            Some(Pumped::Message { window, event }) => {
                self.messages += 1;
                match self.registry.dispatch(window, event) {
                    Flow::Quit => Step::Stop(StopReason::HandlerQuit),
                    Flow::Continue => Step::Message,
                }
            }
            None => {
                self.idle_frames += 1;
                match self.registry.idle() {
                    Flow::Quit => Step::Stop(StopReason::HandlerQuit),
                    Flow::Continue => Step::Idle,
                }
            }
        }
    }

    /// Steps until the source quits, a handler quits, or no handlers remain.
    pub fn run(&mut self) -> RunSummary {
        let stop = loop {
            if let Step::Stop(reason) = self.step() {
                break reason;
            }
        };
        let summary = RunSummary {
            messages: self.messages,
            idle_frames: self.idle_frames,
            stop,
        };
        tracing::debug!(
            messages = summary.messages,
            idle_frames = summary.idle_frames,
            stop = ?summary.stop,
            "dispatch loop stopped"
        );
        summary
    }

    /// Returns the source and registry.
    pub fn into_parts(self) -> (S, HandlerRegistry) {
        (self.source, self.registry)
    }
}
