//! Window event dispatch for the arena game.
//!
//! The platform layer translates native window messages into
//! [`WindowEvent`]s and feeds them through an [`EventSource`].
//! [`DispatchLoop`] pulls them one at a time and delivers each to the
//! [`EventHandler`] registered for its window in a [`HandlerRegistry`]. When
//! nothing is pending, every handler gets an idle frame, which is where the
//! game advances its simulation and captures snapshots.
//!
//! # Design Principles
//!
//! - **Explicit association** - Window handles map to handlers through an owned
//!   registry, never through pointers stashed in platform storage.
//! - **Defaults everywhere** - Handlers override only the events they use.
//! - **Non-blocking** - Sources are polled; an empty poll means an idle frame.

mod error;
mod event;
mod handler;
mod pump;
mod registry;
mod source;

pub use error::{DispatchError, DispatchResult};
pub use event::{HatPosition, KeyCode, Pumped, WindowEvent, WindowId};
pub use handler::{route, EventHandler, Flow};
pub use pump::{DispatchLoop, RunSummary, Step, StopReason};
pub use registry::HandlerRegistry;
pub use source::{from_fn, EventSource, FromFn};
